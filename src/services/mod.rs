pub mod fence;
pub mod gemini_client;
pub mod line_grouper;
pub mod normalizer;
pub mod parser;
pub mod prompt;
pub mod schema_normalizer;
