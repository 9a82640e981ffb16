//! # Coded Errors
//!
//! Structured errors that pair a human-readable message with a stable,
//! machine-readable classification [`Code`], and keep that classification
//! intact while errors are wrapped, re-wrapped and passed through foreign
//! wrapping layers.
//!
//! ## Design Philosophy
//!
//! 1. **Codes are open labels**: a fixed catalog exists, but any caller can mint new codes
//! 2. **Construction never fails**: empty input is normalized, never rejected
//! 3. **Wrapping keeps the chain**: the wrapped error is stored as-is, never flattened
//! 4. **Classification survives transit**: wrapping inherits the nearest code in the chain
//! 5. **Comparison is single-hop, scanning is explicit**: `is_code` looks at one
//!    node, [`chain::contains`] looks at all of them
//!
//! ## Quick Start
//!
//! ```rust
//! use coded_errors::{StructuredError, definitions, Result};
//!
//! fn find_user(id: u64) -> Result<String> {
//!     Err(StructuredError::new("row not found", definitions::NOT_FOUND))
//! }
//!
//! fn load_profile(id: u64) -> Result<String> {
//!     find_user(id).map_err(|e| StructuredError::wrap(e, "load user"))
//! }
//!
//! let err = load_profile(7).unwrap_err();
//! assert_eq!(err.to_string(), "load user: row not found");
//! assert_eq!(err.code(), &definitions::NOT_FOUND);
//! ```
//!
//! ## Overriding and Defaulting Codes
//!
//! ```rust
//! use coded_errors::{StructuredError, chain, definitions, with_code, with_default_code};
//! use std::io;
//!
//! // Override: the outer node is INTERNAL_ERROR, the inner node is still NOT_FOUND.
//! let inner = StructuredError::new("row not found", definitions::NOT_FOUND);
//! let outer = StructuredError::wrap_with(
//!     inner,
//!     "load user",
//!     [with_code(definitions::INTERNAL_ERROR)],
//! );
//! assert!(!outer.has_code(&definitions::NOT_FOUND));
//! assert!(chain::contains_code(&outer, &definitions::NOT_FOUND));
//!
//! // Default: only used when nothing in the chain carries a code.
//! let plain = io::Error::other("boom");
//! let err =
//!     StructuredError::wrap_with(plain, "failed", [with_default_code(definitions::BAD_REQUEST)]);
//! assert_eq!(err.code(), &definitions::BAD_REQUEST);
//! ```
//!
//! ## Features
//!
//! - `zeroize` (default): owned message buffers are cleared when an error is dropped

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::result;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

pub mod chain;
pub mod codes;
pub mod convenience;
pub mod definitions;
pub mod logging;
pub mod options;

pub use chain::Chain;
pub use codes::*;
pub use convenience::*;
pub use logging::*;
pub use options::*;

use options::WrapConfig;

/// Type alias for Results using our error type.
pub type Result<T, E = StructuredError> = result::Result<T, E>;

/// Owned, thread-safe, type-erased error. The storage type for causes.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Message used when an error is created with an empty one.
pub const FALLBACK_MESSAGE: &str = "error";

#[inline]
fn normalize_message(message: Cow<'static, str>) -> Cow<'static, str> {
    if message.is_empty() {
        Cow::Borrowed(FALLBACK_MESSAGE)
    } else {
        message
    }
}

/// An error carrying a message, a classification code and an optional cause.
///
/// # Key Properties
///
/// - `message` and `code` are never empty
/// - A leaf error (from [`new`](Self::new)) has no cause
/// - A wrapping error owns exactly one cause, exposed through [`cause`](Self::cause)
///   and `Error::source`
/// - Immutable after construction; `Send + Sync`
///
/// # Rendering
///
/// `Display` writes `"<message>: <cause>"` when a cause is present, otherwise
/// just `message`. The cause renders itself, recursively.
#[must_use = "errors should be handled or propagated"]
pub struct StructuredError {
    message: Cow<'static, str>,
    code: Code,
    cause: Option<BoxError>,
}

impl StructuredError {
    /// Create a leaf error.
    ///
    /// An empty `code` becomes `INTERNAL_ERROR`; an empty `message` becomes
    /// `"error"`.
    #[inline]
    pub fn new(message: impl Into<Cow<'static, str>>, code: impl Into<Code>) -> Self {
        Self {
            message: normalize_message(message.into()),
            code: code.into().or_internal(),
            cause: None,
        }
    }

    /// Wrap `err` with additional context.
    ///
    /// The code is inherited from the first `StructuredError` found in `err`'s
    /// chain (foreign layers included), or `INTERNAL_ERROR` when there is none.
    #[inline]
    pub fn wrap<E>(err: E, message: impl Into<Cow<'static, str>>) -> Self
    where
        E: Into<BoxError>,
    {
        Self::from_cause(err.into(), message.into(), WrapConfig::default())
    }

    /// Wrap `err` with additional context and wrap options.
    ///
    /// Code precedence: [`with_code`] > inherited from the chain >
    /// [`with_default_code`] > `INTERNAL_ERROR`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use coded_errors::{StructuredError, definitions, with_code, with_default_code};
    ///
    /// let inner = StructuredError::new("row not found", definitions::NOT_FOUND);
    /// let err = StructuredError::wrap_with(
    ///     inner,
    ///     "load user",
    ///     [with_default_code(definitions::BAD_REQUEST)],
    /// );
    /// assert_eq!(err.code(), &definitions::NOT_FOUND);
    ///
    /// let err = StructuredError::wrap_with(
    ///     err,
    ///     "handle request",
    ///     [with_code(definitions::SERVICE_UNAVAILABLE)],
    /// );
    /// assert_eq!(err.code(), &definitions::SERVICE_UNAVAILABLE);
    /// ```
    #[inline]
    pub fn wrap_with<E, I>(err: E, message: impl Into<Cow<'static, str>>, options: I) -> Self
    where
        E: Into<BoxError>,
        I: IntoIterator<Item = WrapOption>,
    {
        Self::from_cause(err.into(), message.into(), WrapConfig::from_options(options))
    }

    /// Wrap an error that may be absent. Wrapping nothing yields nothing.
    ///
    /// ```rust
    /// use coded_errors::{StructuredError, with_code, definitions};
    /// use std::io;
    ///
    /// let none =
    ///     StructuredError::wrap_opt(None::<io::Error>, "never", [with_code(definitions::GONE)]);
    /// assert!(none.is_none());
    /// ```
    #[inline]
    pub fn wrap_opt<E, I>(
        err: Option<E>,
        message: impl Into<Cow<'static, str>>,
        options: I,
    ) -> Option<Self>
    where
        E: Into<BoxError>,
        I: IntoIterator<Item = WrapOption>,
    {
        err.map(|err| Self::wrap_with(err, message, options))
    }

    fn from_cause(cause: BoxError, message: Cow<'static, str>, config: WrapConfig) -> Self {
        let code = config.resolve(cause.as_ref() as &(dyn Error + 'static));
        Self {
            message: normalize_message(message),
            code,
            cause: Some(cause),
        }
    }

    /// The message, without the cause.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// The classification code. Never empty.
    #[inline]
    pub const fn code(&self) -> &Code {
        &self.code
    }

    /// The wrapped error, exactly as it was passed in. `None` for leaf errors.
    #[inline]
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Take ownership of the wrapped error.
    #[inline]
    pub fn into_cause(mut self) -> Option<BoxError> {
        self.cause.take()
    }

    /// Compare this node's code with `target`, without looking at the chain.
    ///
    /// - `target` is a `StructuredError` (also boxed or in an `Arc`): both codes
    ///   non-empty and equal
    /// - `target` is a [`Code`]: this code non-empty and equal to it
    /// - anything else: `false`
    ///
    /// Use [`chain_contains`](Self::chain_contains) to test the whole chain.
    pub fn is_code(&self, target: &(dyn Error + 'static)) -> bool {
        if self.code.is_empty() {
            return false;
        }
        if let Some(other) = chain::as_structured(target) {
            return !other.code.is_empty() && self.code == other.code;
        }
        if let Some(code) = target.downcast_ref::<Code>() {
            return self.code == *code;
        }
        false
    }

    /// Single-hop check against a bare code.
    #[inline]
    pub fn has_code(&self, code: &Code) -> bool {
        self.is_code(code)
    }

    /// Walk this error and its sources.
    #[inline]
    pub fn chain(&self) -> Chain<'_> {
        Chain::new(self)
    }

    /// Whether any node of the chain starting here matches `target`.
    #[inline]
    pub fn chain_contains(&self, target: &(dyn Error + 'static)) -> bool {
        chain::contains(self, target)
    }

    /// Create a structured log record borrowing from this error.
    ///
    /// The record cannot outlive the error and is meant to be handed straight
    /// to a logger:
    ///
    /// ```rust
    /// # use coded_errors::{StructuredError, definitions};
    /// let err = StructuredError::wrap(
    ///     StructuredError::new("row not found", definitions::NOT_FOUND),
    ///     "load user",
    /// );
    /// let log = err.log_entry();
    /// assert_eq!(log.code(), &definitions::NOT_FOUND);
    /// assert_eq!(log.depth(), 1);
    /// ```
    #[inline]
    pub fn log_entry(&self) -> ChainLog<'_> {
        ChainLog::new(self)
    }

    /// Callback form of [`log_entry`](Self::log_entry).
    ///
    /// ```rust
    /// # use coded_errors::{StructuredError, definitions};
    /// # let err = StructuredError::new("denied", definitions::FORBIDDEN);
    /// let line = err.with_log_entry(|log| {
    ///     let mut buffer = String::new();
    ///     log.write_to(&mut buffer).map(|_| buffer)
    /// });
    /// assert_eq!(line.unwrap(), "[FORBIDDEN] message='denied' depth=0");
    /// ```
    #[inline]
    pub fn with_log_entry<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ChainLog<'_>) -> R,
    {
        let log = self.log_entry();
        f(&log)
    }
}

#[cfg(feature = "zeroize")]
impl Drop for StructuredError {
    fn drop(&mut self) {
        if let Cow::Owned(ref mut message) = self.message {
            message.zeroize();
        }
    }
}

impl fmt::Debug for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredError")
            .field("code", &self.code.as_str())
            .field("message", &self.message())
            .field("cause", &self.cause)
            .finish()
    }
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {}", self.message, cause),
            None => f.write_str(&self.message),
        }
    }
}

impl Error for StructuredError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| cause.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use std::io;

    /// Wrapper in the style of a third-party context layer.
    #[derive(Debug)]
    struct Context {
        message: &'static str,
        source: StructuredError,
    }

    impl fmt::Display for Context {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}: {}", self.message, self.source)
        }
    }

    impl Error for Context {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.source)
        }
    }

    fn assert_send_sync<T: Send + Sync + 'static>() {}

    #[test]
    fn structured_error_is_send_sync() {
        assert_send_sync::<StructuredError>();
        assert_send_sync::<Code>();
    }

    #[test]
    fn new_keeps_message_and_code() {
        let err = StructuredError::new("hello", definitions::INTERNAL_ERROR);
        assert_eq!(err.message(), "hello");
        assert_eq!(err.code(), &definitions::INTERNAL_ERROR);
        assert_eq!(err.to_string(), "hello");
        assert!(err.cause().is_none());
        assert!(err.source().is_none());
    }

    #[test]
    fn new_normalizes_empty_inputs() {
        let err = StructuredError::new("", definitions::NOT_FOUND);
        assert_eq!(err.message(), "error");

        let err = StructuredError::new("boom", "");
        assert_eq!(err.code(), &definitions::INTERNAL_ERROR);

        let err = StructuredError::new(String::new(), Code::EMPTY);
        assert_eq!(err.message(), FALLBACK_MESSAGE);
        assert_eq!(err.code(), &definitions::INTERNAL_ERROR);
    }

    #[test]
    fn wrap_renders_cause() {
        let err = StructuredError::wrap(io::Error::other("db down"), "load user");
        assert_eq!(err.to_string(), "load user: db down");
        assert_eq!(err.message(), "load user");
    }

    #[test]
    fn wrap_renders_nested_causes() {
        let inner = StructuredError::new("row not found", definitions::NOT_FOUND);
        let middle = StructuredError::wrap(inner, "load user");
        let outer = StructuredError::wrap(middle, "");
        assert_eq!(outer.to_string(), "error: load user: row not found");
    }

    #[test]
    fn wrap_inherits_code() {
        let inner = StructuredError::new("row not found", definitions::NOT_FOUND);
        let outer = StructuredError::wrap(inner, "load user");
        assert_eq!(outer.code(), &definitions::NOT_FOUND);
    }

    #[test]
    fn wrap_inherits_code_through_foreign_layer() {
        let inner = StructuredError::new("row not found", definitions::NOT_FOUND);
        let wrapped = Context { message: "db", source: inner };
        let outer = StructuredError::wrap(wrapped, "load user");
        assert_eq!(outer.code(), &definitions::NOT_FOUND);
        assert_eq!(outer.to_string(), "load user: db: row not found");
    }

    #[test]
    fn wrap_plain_error_defaults_to_internal() {
        let outer = StructuredError::wrap(io::Error::other("boom"), "failed");
        assert_eq!(outer.code(), &definitions::INTERNAL_ERROR);
    }

    #[test]
    fn with_code_overrides_inheritance() {
        let inner = StructuredError::new("row not found", definitions::NOT_FOUND);
        let outer = StructuredError::wrap_with(
            inner,
            "load user",
            [with_code(definitions::INTERNAL_ERROR)],
        );
        assert_eq!(outer.code(), &definitions::INTERNAL_ERROR);
    }

    #[test]
    fn with_default_code_only_without_inheritable_code() {
        let outer = StructuredError::wrap_with(
            io::Error::other("boom"),
            "failed",
            [with_default_code(definitions::BAD_REQUEST)],
        );
        assert_eq!(outer.code(), &definitions::BAD_REQUEST);

        let inner = StructuredError::new("row not found", definitions::NOT_FOUND);
        let outer = StructuredError::wrap_with(
            inner,
            "load user",
            [with_default_code(definitions::BAD_REQUEST)],
        );
        assert_eq!(outer.code(), &definitions::NOT_FOUND);
    }

    #[test]
    fn wrap_opt_short_circuits_on_none() {
        let none =
            StructuredError::wrap_opt(None::<StructuredError>, "x", [with_code(definitions::GONE)]);
        assert!(none.is_none());

        let some = StructuredError::wrap_opt(
            Some(io::Error::other("y")),
            "x",
            [with_code(definitions::GONE)],
        );
        assert_eq!(some.map(|e| e.code().clone()), Some(definitions::GONE));
    }

    #[test]
    fn cause_is_the_original_error() {
        let original: BoxError = Box::new(io::Error::other("x"));
        let address = original.as_ref() as *const (dyn Error + Send + Sync) as *const ();

        let outer = StructuredError::wrap(original, "y");
        let cause = outer.cause().map(|c| c as *const (dyn Error + Send + Sync) as *const ());
        assert_eq!(cause, Some(address));

        let source = outer.source().map(|s| s as *const dyn Error as *const ());
        assert_eq!(source, Some(address));
    }

    #[test]
    fn into_cause_returns_original() {
        let inner = StructuredError::new("row not found", definitions::NOT_FOUND);
        let outer = StructuredError::wrap(inner, "load user");
        let cause = outer.into_cause().expect("wrapped error has a cause");
        let inner = cause.downcast::<StructuredError>().expect("cause is structured");
        assert_eq!(inner.message(), "row not found");
    }

    #[test]
    fn is_code_against_code_target() {
        let err = StructuredError::new("nope", definitions::NOT_FOUND);
        assert!(err.is_code(&definitions::NOT_FOUND));
        assert!(!err.is_code(&definitions::INTERNAL_ERROR));
    }

    #[test]
    fn is_code_against_structured_target() {
        let err = StructuredError::new("nope", definitions::NOT_FOUND);
        let same = StructuredError::new("other message", definitions::NOT_FOUND);
        let different = StructuredError::new("nope", definitions::CONFLICT);
        assert!(err.is_code(&same));
        assert!(!err.is_code(&different));
    }

    #[test]
    fn is_code_against_boxed_structured_target() {
        let err = StructuredError::new("nope", definitions::NOT_FOUND);
        let boxed = Box::new(StructuredError::new("other", definitions::NOT_FOUND));
        let shared = std::sync::Arc::new(StructuredError::new("other", definitions::CONFLICT));
        assert!(err.is_code(&boxed));
        assert!(!err.is_code(&shared));
    }

    #[test]
    fn is_code_against_other_errors_is_false() {
        let err = StructuredError::new("nope", definitions::NOT_FOUND);
        assert!(!err.is_code(&io::Error::other("NOT_FOUND")));
    }

    #[test]
    fn is_code_is_single_hop() {
        let inner = StructuredError::new("row not found", definitions::NOT_FOUND);
        let outer = StructuredError::wrap_with(
            inner,
            "load user",
            [with_code(definitions::INTERNAL_ERROR)],
        );

        assert!(!outer.is_code(&definitions::NOT_FOUND));
        assert!(outer.chain_contains(&definitions::NOT_FOUND));
        assert!(chain::contains_code(&outer, &definitions::NOT_FOUND));
        assert_eq!(outer.chain().count(), 2);
    }

    #[test]
    fn custom_codes_round_trip_through_wrap() {
        let quota = Code::new(String::from("QUOTA_EXCEEDED"));
        let inner = StructuredError::new("tenant over quota", quota.clone());
        let outer = StructuredError::wrap(inner, "create project");
        assert_eq!(outer.code(), &quota);
        assert!(!outer.code().is_predefined());
    }

    #[test]
    fn debug_shows_fields() {
        let err = StructuredError::new("nope", definitions::NOT_FOUND);
        let debug = format!("{:?}", err);
        assert!(debug.contains("NOT_FOUND"));
        assert!(debug.contains("nope"));
    }

    #[cfg(feature = "zeroize")]
    #[test]
    fn drop_clears_owned_messages_only() {
        let mut buffer = String::from("secret token");
        buffer.zeroize();
        assert!(buffer.is_empty());

        drop(StructuredError::new(String::from("secret token"), definitions::FORBIDDEN));
        drop(StructuredError::new("static message", definitions::FORBIDDEN));
    }
}
