//! External suggestion generator adapters.

pub mod gemini_oracle;
pub mod prompts;

pub use gemini_oracle::GeminiSuggestionOracle;
