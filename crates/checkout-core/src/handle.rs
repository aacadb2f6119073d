//! # Invoice Handle Helpers
//!
//! A processor invoice handle is the platform order id, optionally
//! suffixed with `-<unix timestamp>` when a prior checkout attempt
//! already committed an invoice under the bare id. Both the return URL
//! and the webhook hand back the suffixed form; lookups against the
//! local store need the bare order id.

/// Recover the base order id from a handle by cutting at the first `-`.
/// A handle without a `-` is returned unchanged.
pub fn base_order_id(handle: &str) -> &str {
    match handle.find('-') {
        // A leading `-` is not a suffix separator
        Some(0) | None => handle,
        Some(pos) => &handle[..pos],
    }
}

/// Derive a fresh, unique handle for a retried checkout session.
pub fn suffixed_handle(order_id: &str, unix_ts: i64) -> String {
    format!("{}-{}", order_id, unix_ts)
}
