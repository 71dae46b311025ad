//! Redaction of sensitive data before it reaches the logs.
//!
//! Values stored under sensitive keys (`token`, `secret`, `password`, ...) are
//! replaced with `[redacted]`, identifying keys (`username`, `workspaceID`, ...)
//! are replaced with a stable hash so log lines stay correlatable, and e-mail
//! addresses are cut out of any free-standing string.

use crate::utils::error::Result;
use lazy_static::lazy_static;
use regex::{NoExpand, Regex};
use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

lazy_static! {
    static ref REDACTED_KEYS: Regex =
        Regex::new(r"(?i)auth_|password|token|key|jwt|secret|email").unwrap();
    static ref HASHED_KEYS: Regex = Regex::new(r"(?i)contextURL|workspaceID|username").unwrap();
    // https://html.spec.whatwg.org/multipage/input.html#email-state-(type=email)
    static ref EMAIL: Regex = Regex::new(
        r#"[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*"#
    )
    .unwrap();
}

const NESTED_ARRAY: &str = "[redacted:nested:array]";
const NESTED_OBJECT: &str = "[redacted:nested:object]";

pub trait Scrubber {
    /// Scrubs `value` knowing the key it is stored under.
    fn scrub_key_value(&self, key: &str, value: &str) -> String;

    /// Scrubs a string that has no key context.
    fn scrub_value(&self, value: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultScrubber;

fn redact(key: Option<&str>) -> String {
    match key {
        Some(key) => format!("[redacted:{}]", key),
        None => "[redacted]".to_string(),
    }
}

fn hash(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    format!("[redacted:sha256:{}]", hex::encode(digest))
}

impl Scrubber for DefaultScrubber {
    fn scrub_key_value(&self, key: &str, value: &str) -> String {
        if REDACTED_KEYS.is_match(key) {
            return redact(None);
        }
        if HASHED_KEYS.is_match(key) {
            return hash(value);
        }
        self.scrub_value(value)
    }

    fn scrub_value(&self, value: &str) -> String {
        let email = redact(Some("email"));
        EMAIL
            .replace_all(value, NoExpand(email.as_str()))
            .into_owned()
    }
}

/// Returns a scrubbed copy of `value` using [`DefaultScrubber`].
///
/// With `nested == false` every array or object below the top level is
/// replaced by a placeholder instead of being walked.
pub fn scrub(value: &Value, nested: bool) -> Value {
    scrub_with(&DefaultScrubber, value, nested)
}

pub fn scrub_with<S: Scrubber + ?Sized>(scrubber: &S, value: &Value, nested: bool) -> Value {
    scrub_at(scrubber, value, 0, nested)
}

/// Serializes `value` to JSON and scrubs the result.
pub fn scrub_serializable<T: Serialize>(value: &T, nested: bool) -> Result<Value> {
    let value = serde_json::to_value(value)?;
    Ok(scrub(&value, nested))
}

fn scrub_at<S: Scrubber + ?Sized>(scrubber: &S, value: &Value, depth: usize, nested: bool) -> Value {
    match value {
        Value::String(s) => Value::String(scrubber.scrub_value(s)),
        Value::Array(items) => {
            if !nested && depth > 0 {
                return Value::String(NESTED_ARRAY.to_string());
            }
            Value::Array(
                items
                    .iter()
                    .map(|item| scrub_at(scrubber, item, depth + 1, nested))
                    .collect(),
            )
        }
        Value::Object(fields) => {
            if !nested && depth > 0 {
                return Value::String(NESTED_OBJECT.to_string());
            }
            let mut result = Map::with_capacity(fields.len());
            for (key, field) in fields {
                let scrubbed = match field {
                    Value::String(s) => Value::String(scrubber.scrub_key_value(key, s)),
                    other => scrub_at(scrubber, other, depth + 1, nested),
                };
                result.insert(key.clone(), scrubbed);
            }
            Value::Object(result)
        }
        other => other.clone(),
    }
}
