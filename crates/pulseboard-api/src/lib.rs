// pulseboard-api: Async client for the Pulseboard backend (REST + event stream)

pub mod client;
pub mod envelope;
pub mod error;
pub mod models;
pub mod retry;
pub mod stream;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use retry::RetryPolicy;
pub use stream::{ConnectionState, EventStreamClient, StreamMessage, StreamStatus};
