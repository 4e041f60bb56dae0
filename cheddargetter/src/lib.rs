//! A client SDK for the CheddarGetter subscription billing API. Plans, customers and subscriptions of one
//! product are read and changed through a [Client], which returns the service's XML as [Record]s and
//! [Value]s.
//!
//! # Listing plans
//! ```no_run
//! use cheddargetter::Client;
//!
//! # async fn run() -> Result<(), cheddargetter::SdkError> {
//! let client = Client::new("me@example.com", "123456", "MY_PRODUCT")?;
//!
//! for plan in client.list_plans().await? {
//!     println!("{:?}", plan.get("name").and_then(|name| name.text()));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Empty results
//! List operations always return a list, with zero, one or many items. Operations returning a single
//! entity return an empty list ([Value::empty]) when the service sent nothing back.
//!
//! # Blocking
//! [blocking::Client] offers the same operations for code that isn't async.
//!

pub mod blocking;
pub mod client;
pub mod errors;
pub mod http;
pub mod models;
pub mod normalize;

pub use client::{Client, DEFAULT_ITEM_QUANTITY};
pub use errors::sdk_error::SdkError;
pub use errors::transport_error::TransportError;
pub use http::config::{ClientConfig, DEFAULT_BASE_URL};
pub use models::record::{Record, Value};
