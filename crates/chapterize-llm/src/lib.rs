pub mod client;
pub mod detector;
pub mod mock;
pub mod parse;
pub mod prompt;

pub use client::{AnthropicClient, Completer, CompletionRequest, DEFAULT_MODEL};
pub use detector::{AnthropicDetector, BoundaryDetector};
pub use mock::{MockCompleter, MockDetector};
