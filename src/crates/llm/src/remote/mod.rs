//! Remote reasoning service clients.
//!
//! - [`OpenAiCompatibleClient`] - any `/chat/completions` endpoint in the OpenAI
//!   wire format; Groq by default

pub mod openai;

pub use openai::OpenAiCompatibleClient;
