//! A fake CheddarGetter service for tests and manual runs.

mod mock_http;

pub use mock_http::{MockServer, RecordedRequest};
