//! Tokenizer adapters

mod tiktoken;

pub use tiktoken::TiktokenTokenizer;
