//! Shapes response envelopes into what the client returns.
//!
//! The service nests entities as `<collection><item>...</item></collection>`. A single `<item>` parses to
//! the item itself while several parse to a list, so lists are normalized here.

use crate::models::record::{Record, Value};

/// Returns `envelope[collection][item]`. When the collection or the item is missing the result is an empty
/// list, which is how the service's empty results look to callers.
pub fn extract_one(mut envelope: Record, collection: &str, item: &str) -> Value {
    match envelope.remove(collection) {
        Some(Value::Record(mut collection)) => collection.remove(item).unwrap_or_else(Value::empty),
        _ => Value::empty(),
    }
}

/// Like [extract_one], but always a list of 0..N items in document order.
pub fn extract_many(envelope: Record, collection: &str, item: &str) -> Vec<Value> {
    match extract_one(envelope, collection, item) {
        Value::List(items) => items,
        single => vec![single],
    }
}
