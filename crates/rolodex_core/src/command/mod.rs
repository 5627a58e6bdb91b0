//! Command surface: tokenizing, parsing and the error taxonomy.

pub mod error;
pub mod parser;
pub mod request;
pub mod tokenizer;
pub mod usage;
