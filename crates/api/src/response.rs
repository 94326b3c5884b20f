//! Response envelope shared by all handlers.

use serde::Serialize;

/// Standard `{ "data": T }` envelope.
///
/// Every successful response wraps its payload in this struct rather than
/// building `serde_json::json!({ "data": ... })` by hand, so the wire
/// shape is enforced at compile time.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
