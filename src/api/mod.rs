pub mod backend;
pub mod http;
pub mod types;

pub use backend::{ApiError, ChatBackend, ProbeOutcome, probe};
pub use http::HttpBackend;
pub use types::{ChatBody, ChatReply};
