//! OpenAI integration for intent parsing and response formatting
//!
//! The turn pipeline treats natural-language understanding and phrasing as
//! oracle calls. Both oracles run over OpenAI's Chat Completions API:
//!
//! - **Parser**: `OpenAiIntentParser` - structured output (strict JSON schema)
//!   mapping one user message to a `ParsedInput`
//! - **Formatter**: `OpenAiResponseFormatter` - plain-text completion turning
//!   the structured turn outcome into the user-facing reply
//!
//! # Error Handling
//!
//! - Network errors and 5xx are retried by `HttpClient` with backoff
//! - 401/403 map to `Auth`, 429 to `Network`; neither is retried here
//! - Content that fails schema validation maps to `Parse`

mod client;
mod formatter;
mod parser;
mod types;

pub use formatter::OpenAiResponseFormatter;
pub use parser::OpenAiIntentParser;
