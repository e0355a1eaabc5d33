pub mod auth;
pub mod boundary;
pub mod errors;
pub mod ids;
pub mod messages;
pub mod segment;

pub use auth::ApiKey;
pub use boundary::{BoundaryCandidate, WindowSpec};
pub use errors::LlmError;
pub use ids::RunId;
pub use messages::{ChatMessage, Role, SegmentMessage};
pub use segment::{Segment, SegmentationRun};
