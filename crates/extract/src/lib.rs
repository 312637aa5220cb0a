pub mod backend;
pub mod http;
pub mod scripted;

pub use backend::{ExtractError, ExtractionBackend, ExtractionQuery, UnconfiguredExtractor};
pub use http::HttpExtractor;
pub use scripted::{ScriptedExtractor, ScriptedOutcome};
