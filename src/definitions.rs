//! Predefined classification codes.
//!
//! The labels below are a wire contract: consumers match on these literals,
//! so their spelling never changes. Constant names equal their labels.
//!
//! # Groups
//!
//! - General: `INTERNAL_ERROR`, `BAD_REQUEST`, `VALIDATION_ERROR`, ...
//! - Additional client-side (4xx-like)
//! - Additional server-side (5xx-like)
//! - General non-HTTP: cancellation, deadlines, exhaustion, data loss
//!
//! The catalog is closed here but the code domain is not: callers add their
//! own with [`define_codes!`](crate::define_codes) or [`Code::new`].

use crate::Code;

// -----------------------------------------------------------------------------
// General
// -----------------------------------------------------------------------------
crate::define_codes! {
    /// Unclassified failure. Fallback for empty or missing codes.
    INTERNAL_ERROR = "INTERNAL_ERROR",
    /// Malformed request.
    BAD_REQUEST = "BAD_REQUEST",
    /// Input failed validation.
    VALIDATION_ERROR = "VALIDATION_ERROR",
    /// Caller is not authorized.
    UNAUTHORIZED = "UNAUTHORIZED",
    /// Caller is authenticated but not allowed.
    FORBIDDEN = "FORBIDDEN",
    /// Requested entity does not exist.
    NOT_FOUND = "NOT_FOUND",
    /// State conflict.
    CONFLICT = "CONFLICT",
}

// -----------------------------------------------------------------------------
// Client-side
// -----------------------------------------------------------------------------
crate::define_codes! {
    /// Method not supported on the target.
    METHOD_NOT_ALLOWED = "METHOD_NOT_ALLOWED",
    /// Client took too long to send the request.
    REQUEST_TIMEOUT = "REQUEST_TIMEOUT",
    /// Payload too large.
    REQUEST_ENTITY_TOO_LARGE = "REQUEST_ENTITY_TOO_LARGE",
    /// Payload media type not supported.
    UNSUPPORTED_MEDIA_TYPE = "UNSUPPORTED_MEDIA_TYPE",
    /// Well-formed but semantically invalid input.
    UNPROCESSABLE_ENTITY = "UNPROCESSABLE_ENTITY",
    /// Rate limited.
    TOO_MANY_REQUESTS = "TOO_MANY_REQUESTS",
    /// Entity existed but is permanently gone.
    GONE = "GONE",
}

// -----------------------------------------------------------------------------
// Server-side
// -----------------------------------------------------------------------------
crate::define_codes! {
    /// Feature not implemented.
    NOT_IMPLEMENTED = "NOT_IMPLEMENTED",
    /// Dependency or service temporarily unavailable.
    SERVICE_UNAVAILABLE = "SERVICE_UNAVAILABLE",
    /// Upstream did not answer in time.
    GATEWAY_TIMEOUT = "GATEWAY_TIMEOUT",
}

// -----------------------------------------------------------------------------
// General non-HTTP
// -----------------------------------------------------------------------------
crate::define_codes! {
    /// Caller identity could not be established.
    UNAUTHENTICATED = "UNAUTHENTICATED",
    /// Catch-all for unspecified errors.
    UNKNOWN = "UNKNOWN",
    /// Operation cancelled by the caller.
    CANCELLED = "CANCELLED",
    /// Timeout or deadline reached.
    DEADLINE_EXCEEDED = "DEADLINE_EXCEEDED",
    /// Out of memory, quota exceeded.
    RESOURCE_EXHAUSTED = "RESOURCE_EXHAUSTED",
    /// Aborted due to conflict or retry.
    ABORTED = "ABORTED",
    /// Unrecoverable data corruption.
    DATA_LOSS = "DATA_LOSS",
}

/// Every predefined code, in declaration order.
pub static CATALOG: [Code; 24] = [
    INTERNAL_ERROR,
    BAD_REQUEST,
    VALIDATION_ERROR,
    UNAUTHORIZED,
    FORBIDDEN,
    NOT_FOUND,
    CONFLICT,
    METHOD_NOT_ALLOWED,
    REQUEST_TIMEOUT,
    REQUEST_ENTITY_TOO_LARGE,
    UNSUPPORTED_MEDIA_TYPE,
    UNPROCESSABLE_ENTITY,
    TOO_MANY_REQUESTS,
    GONE,
    NOT_IMPLEMENTED,
    SERVICE_UNAVAILABLE,
    GATEWAY_TIMEOUT,
    UNAUTHENTICATED,
    UNKNOWN,
    CANCELLED,
    DEADLINE_EXCEEDED,
    RESOURCE_EXHAUSTED,
    ABORTED,
    DATA_LOSS,
];

/// Find the predefined code with exactly this label.
pub fn lookup(label: &str) -> Option<&'static Code> {
    CATALOG.iter().find(|code| code.as_str() == label)
}
