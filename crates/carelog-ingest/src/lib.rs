#![deny(unsafe_code)]

pub mod classify;
pub mod html_tables;
pub mod text_sections;

pub use classify::classify;
pub use html_tables::{ROW_MARKER_CLASS, parse_question_rows};
pub use text_sections::parse_sections;
