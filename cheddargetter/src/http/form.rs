use crate::models::record::{Record, Value};
use urlencoding::encode;

/// Encodes attributes as an `application/x-www-form-urlencoded` body. Nested records use bracket
/// notation (`subscription[planCode]=FREE`) and lists repeat their key with `[]`.
pub(crate) fn encode_form(attributes: &Record) -> String {
    let mut pairs = Vec::with_capacity(attributes.len());
    for (name, value) in attributes.iter() {
        push_pairs(&mut pairs, encode(name).into_owned(), value);
    }

    pairs.join("&")
}

fn push_pairs(pairs: &mut Vec<String>, key: String, value: &Value) {
    match value {
        Value::Text(text) => pairs.push(format!("{key}={}", encode(text))),
        Value::Record(record) => {
            for (name, value) in record.iter() {
                push_pairs(pairs, format!("{key}[{}]", encode(name)), value);
            }
        }

        Value::List(items) => {
            for item in items {
                push_pairs(pairs, format!("{key}[]"), item);
            }
        }
    }
}
