//! API alert headers.
//!
//! Mutation responses announce their outcome to clients through
//! `x-shopregistry-*` headers: an alert key plus the affected id on success,
//! an error key plus the entity name on rejection. Values are
//! translation-key style (`shopRegistry.shopTwo.created`, `error.idexists`)
//! so clients can map them to display messages.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Application tag used as the alert-key prefix.
pub const APPLICATION_NAME: &str = "shopRegistry";

pub const HEADER_ALERT: HeaderName = HeaderName::from_static("x-shopregistry-alert");
pub const HEADER_ERROR: HeaderName = HeaderName::from_static("x-shopregistry-error");
pub const HEADER_PARAMS: HeaderName = HeaderName::from_static("x-shopregistry-params");

/// Headers announcing a successful create.
#[must_use]
pub fn creation_alert(entity_name: &str, param: &str) -> HeaderMap {
    alert(&format!("{APPLICATION_NAME}.{entity_name}.created"), param)
}

/// Headers announcing a successful update.
#[must_use]
pub fn update_alert(entity_name: &str, param: &str) -> HeaderMap {
    alert(&format!("{APPLICATION_NAME}.{entity_name}.updated"), param)
}

/// Headers announcing a successful delete.
#[must_use]
pub fn deletion_alert(entity_name: &str, param: &str) -> HeaderMap {
    alert(&format!("{APPLICATION_NAME}.{entity_name}.deleted"), param)
}

/// Headers announcing a rejected request.
#[must_use]
pub fn failure_alert(entity_name: &str, error_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, HEADER_ERROR, &format!("error.{error_key}"));
    insert(&mut headers, HEADER_PARAMS, entity_name);
    headers
}

fn alert(message: &str, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, HEADER_ALERT, message);
    insert(&mut headers, HEADER_PARAMS, param);
    headers
}

// Alert values are ASCII translation keys and numeric ids; anything else is
// silently skipped rather than failing the response.
fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(name, value);
    }
}
