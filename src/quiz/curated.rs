// src/quiz/curated.rs

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::quiz::QuizField;

/// Hand-picked plausible values per text field for one genre.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenreFallbacks {
    #[serde(default)]
    pub author: Vec<String>,
    #[serde(default)]
    pub title: Vec<String>,
    #[serde(default)]
    pub style: Vec<String>,
}

/// Curated distractor values keyed by genre, then by field.
///
/// Also acts as the registry of known genres: a genre without an entry here is
/// not served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuratedCatalog {
    genres: BTreeMap<String, GenreFallbacks>,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for CuratedCatalog {
    fn default() -> Self {
        let mut genres = BTreeMap::new();
        genres.insert(
            "western".to_string(),
            GenreFallbacks {
                author: owned(&["レオナルド・ダ・ヴィンチ", "ミケランジェロ", "ラファエロ", "ピカソ", "モネ", "ゴッホ"]),
                title: owned(&["モナリザ", "最後の晩餐", "星月夜", "ひまわり", "叫び", "真珠の耳飾りの少女"]),
                style: owned(&["ルネサンス", "バロック", "印象派", "キュビスム", "シュルレアリスム", "抽象表現主義"]),
            },
        );
        genres.insert(
            "japanese".to_string(),
            GenreFallbacks {
                author: owned(&["葛飾北斎", "歌川広重", "伊藤若冲", "雪舟", "千利休", "横山大観"]),
                title: owned(&["冨嶽三十六景 神奈川沖浪裏", "東海道五十三次", "鳥獣人物戯画", "雪松図屏風", "風神雷神図屏風", "無我"]),
                style: owned(&["浮世絵", "琳派", "狩野派", "水墨画", "大和絵", "日本画"]),
            },
        );
        Self { genres }
    }
}

impl CuratedCatalog {
    /// Loads a catalog from a JSON file shaped like
    /// `{"western": {"author": [...], "title": [...], "style": [...]}}`.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)?;
        let catalog: Self = serde_json::from_str(&raw)?;
        Ok(catalog)
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.contains_key(genre)
    }

    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.genres.keys().map(String::as_str)
    }

    /// Curated values for a genre and field. Empty for the image field and for
    /// unknown genres.
    pub fn options(&self, genre: &str, field: QuizField) -> &[String] {
        let Some(fallbacks) = self.genres.get(genre) else {
            return &[];
        };
        match field {
            QuizField::Author => &fallbacks.author,
            QuizField::Title => &fallbacks.title,
            QuizField::Style => &fallbacks.style,
            QuizField::Image => &[],
        }
    }
}
