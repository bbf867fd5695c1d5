pub mod engine;
pub mod passive;
pub mod rules;
pub mod segmenter;
pub mod vocabulary;
