// src/quiz/assembler.rs

use rand::{Rng, seq::SliceRandom};

use crate::{
    config::MIN_IMAGE_RECORDS,
    models::{
        artwork::Artwork,
        quiz::{Quiz, QuizField},
    },
    quiz::{
        QuizError,
        distractors::{self, Distractor},
    },
};

/// Shown in place of the tested attribute.
pub const REDACTED: &str = "???";

/// Fields a question may test, given how many records of the pool carry an
/// image. The text fields are always eligible.
pub fn eligible_fields(image_records: i64) -> Vec<QuizField> {
    let mut fields = QuizField::TEXT_FIELDS.to_vec();
    if image_records >= MIN_IMAGE_RECORDS {
        fields.push(QuizField::Image);
    }
    fields
}

/// Uniform choice among `eligible`, falling back to the first text field when
/// the list is empty.
pub fn choose_field<R: Rng + ?Sized>(eligible: &[QuizField], rng: &mut R) -> QuizField {
    eligible
        .choose(rng)
        .copied()
        .unwrap_or(QuizField::TEXT_FIELDS[0])
}

/// Copy of `anchor` with the tested attribute hidden. For the image field the
/// displayable URL is cleared as well.
pub fn redact(anchor: &Artwork, field: QuizField) -> Artwork {
    let mut view = anchor.clone();
    let hidden = Some(REDACTED.to_string());
    match field {
        QuizField::Author => view.author = hidden,
        QuizField::Title => view.title = hidden,
        QuizField::Style => view.style = hidden,
        QuizField::Image => {
            view.image_filename = hidden;
            view.image_url = None;
        }
    }
    view
}

pub fn question_text(field: QuizField) -> String {
    match field {
        QuizField::Image => "この作品の画像はどれ？".to_string(),
        _ => format!("この作品の{}は？", field.display_name()),
    }
}

/// Builds the question for `anchor` on `field`.
///
/// `pool` is the snapshot distractors are drawn from; `curated` is the
/// catalog's list for this pool's genre and field.
pub fn assemble<R: Rng + ?Sized>(
    anchor: &Artwork,
    field: QuizField,
    pool: &[Artwork],
    curated: &[String],
    rng: &mut R,
) -> Result<Quiz, QuizError> {
    let correct_answer = anchor.field_value(field).to_string();

    let wrong: Vec<Distractor> = match field {
        QuizField::Image => distractors::resolve_image(anchor, pool, rng)?,
        _ => distractors::resolve_text(anchor, field, pool, curated, rng),
    };

    let mut choices = Vec::with_capacity(wrong.len() + 1);
    choices.push(correct_answer.clone());
    choices.extend(wrong.into_iter().map(|d| d.value));
    choices.shuffle(rng);

    Ok(Quiz {
        artwork: redact(anchor, field),
        full_artwork_data: anchor.clone(),
        question: question_text(field),
        question_field: field,
        choices,
        correct_answer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QUIZ_CHOICE_COUNT;
    use crate::quiz::{
        normalize,
        testing::{artwork, with_image},
    };
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    fn sample_pool() -> Vec<Artwork> {
        vec![
            with_image(artwork(1, "モネ", "睡蓮", "印象派"), "suiren.png"),
            with_image(artwork(2, "ルノワール", "舟遊びの昼食", "印象派"), "lunch.png"),
            with_image(artwork(3, "ピカソ", "ゲルニカ", "キュビスム"), "guernica.png"),
            artwork(4, "ダリ", "記憶の固執", "シュルレアリスム"),
            artwork(5, "フェルメール", "牛乳を注ぐ女", "バロック"),
        ]
    }

    #[test]
    fn test_image_field_eligibility_threshold() {
        assert_eq!(eligible_fields(0), QuizField::TEXT_FIELDS.to_vec());
        assert!(!eligible_fields(3).contains(&QuizField::Image));
        assert!(eligible_fields(4).contains(&QuizField::Image));
        assert!(eligible_fields(12).contains(&QuizField::Image));
    }

    #[test]
    fn test_choose_field_stays_within_eligible() {
        let mut rng = StdRng::seed_from_u64(42);
        let eligible = eligible_fields(0);
        for _ in 0..50 {
            assert!(eligible.contains(&choose_field(&eligible, &mut rng)));
        }
        assert_eq!(choose_field(&[], &mut rng), QuizField::Author);
    }

    #[test]
    fn test_redact_hides_only_tested_field() {
        let mut anchor = with_image(artwork(1, "モネ", "睡蓮", "印象派"), "suiren.png");
        anchor.image_url = Some("https://example.org/suiren.png".to_string());

        let view = redact(&anchor, QuizField::Title);
        assert_eq!(view.title.as_deref(), Some(REDACTED));
        assert_eq!(view.author, anchor.author);
        assert_eq!(view.style, anchor.style);
        assert_eq!(view.image_url, anchor.image_url);

        let view = redact(&anchor, QuizField::Image);
        assert_eq!(view.image_filename.as_deref(), Some(REDACTED));
        assert_eq!(view.image_url, None);
        assert_eq!(view.author, anchor.author);
    }

    #[test]
    fn test_question_text_names_field() {
        assert_eq!(question_text(QuizField::Author), "この作品の作者は？");
        assert_eq!(question_text(QuizField::Style), "この作品の美術様式は？");
        assert_eq!(question_text(QuizField::Image), "この作品の画像はどれ？");
    }

    #[test]
    fn test_assembled_quiz_invariants() {
        let pool = sample_pool();
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            for field in QuizField::TEXT_FIELDS {
                let anchor = &pool[(seed as usize) % pool.len()];
                let quiz = assemble(anchor, field, &pool, &[], &mut rng).unwrap();

                assert_eq!(quiz.choices.len(), QUIZ_CHOICE_COUNT);
                let unique: HashSet<&str> = quiz.choices.iter().map(|c| normalize(c)).collect();
                assert_eq!(unique.len(), QUIZ_CHOICE_COUNT);
                let hits = quiz
                    .choices
                    .iter()
                    .filter(|c| normalize(c) == normalize(&quiz.correct_answer))
                    .count();
                assert_eq!(hits, 1);

                assert_eq!(quiz.full_artwork_data, *anchor);
                assert_ne!(quiz.artwork.field_value(field), quiz.correct_answer);
                assert_eq!(quiz.question_field, field);
            }
        }
    }

    #[test]
    fn test_forced_image_field_with_three_images_fails() {
        let pool = sample_pool();
        let mut rng = StdRng::seed_from_u64(0);
        let err = assemble(&pool[0], QuizField::Image, &pool, &[], &mut rng).unwrap_err();
        assert!(matches!(err, QuizError::InsufficientImageData { .. }));
    }

    #[test]
    fn test_image_quiz_uses_filenames() {
        let mut pool = sample_pool();
        pool[3] = with_image(pool[3].clone(), "memory.png");
        let mut rng = StdRng::seed_from_u64(0);
        let quiz = assemble(&pool[1], QuizField::Image, &pool, &[], &mut rng).unwrap();

        assert_eq!(quiz.correct_answer, "lunch.png");
        let mut choices = quiz.choices.clone();
        choices.sort();
        assert_eq!(choices, vec!["guernica.png", "lunch.png", "memory.png", "suiren.png"]);
        assert_eq!(quiz.artwork.image_filename.as_deref(), Some(REDACTED));
    }
}
