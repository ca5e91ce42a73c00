// src/models/mod.rs

pub mod artwork;
pub mod quiz;
pub mod quiz_result;
