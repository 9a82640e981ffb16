//! Convenience macros and extension traits.
//!
//! # Macros
//!
//! - [`structured_err!`](crate::structured_err): build a leaf error, with an
//!   optional format string
//! - [`bail_code!`](crate::bail_code): return early with a leaf error
//! - [`ensure_code!`](crate::ensure_code): bail unless a condition holds
//! - [`define_code!`](crate::define_code) / [`define_codes!`](crate::define_codes):
//!   declare `Code` constants outside this crate
//!
//! # Extension Traits
//!
//! [`ResultExt`] wraps the error side of a `Result`. An `Ok` passes through
//! untouched, which is the `Result` shape of "wrapping nothing yields nothing".
//!
//! ```rust
//! use coded_errors::{ResultExt, definitions, with_default_code};
//!
//! fn read_port(raw: &str) -> coded_errors::Result<u16> {
//!     raw.parse::<u16>()
//!         .wrap_err_with("parse port", [with_default_code(definitions::BAD_REQUEST)])
//! }
//!
//! assert_eq!(read_port("8080").unwrap(), 8080);
//!
//! let err = read_port("eighty").unwrap_err();
//! assert_eq!(err.code(), &definitions::BAD_REQUEST);
//! assert!(err.to_string().starts_with("parse port: "));
//! ```
//!
//! Note: formatted messages allocate. Literal messages are stored borrowed.

use crate::{BoxError, Code, StructuredError, WrapOption};
use std::borrow::Cow;

// ============================================================================
// Error Creation Macros
// ============================================================================

/// Create a leaf `StructuredError`.
///
/// The message is a format string. When it has nothing to substitute
/// (no arguments, no inline captures) the literal is stored borrowed;
/// otherwise it goes through `format!`. Escaped braces are always unescaped.
///
/// # Example
///
/// ```rust
/// # use coded_errors::{structured_err, definitions};
/// let id = 42;
/// let err = structured_err!(definitions::NOT_FOUND, "user {} not found", id);
/// assert_eq!(err.to_string(), "user 42 not found");
///
/// let err = structured_err!(definitions::CONFLICT, "user {id} already exists");
/// assert_eq!(err.message(), "user 42 already exists");
/// ```
#[macro_export]
macro_rules! structured_err {
    ($code:expr, $msg:literal $(,)?) => {
        $crate::StructuredError::new(
            match ::std::format_args!($msg).as_str() {
                ::std::option::Option::Some(message) => ::std::borrow::Cow::Borrowed(message),
                ::std::option::Option::None => ::std::borrow::Cow::Owned(::std::format!($msg)),
            },
            $code,
        )
    };
    ($code:expr, $fmt:literal, $($arg:tt)+) => {
        $crate::StructuredError::new(::std::format!($fmt, $($arg)+), $code)
    };
}

/// Return early with a leaf `StructuredError`.
///
/// The error is converted with `Into`, so the enclosing function may return
/// any error type that `StructuredError` converts into.
///
/// # Example
///
/// ```rust
/// # use coded_errors::{bail_code, definitions, Result};
/// fn check(limit: usize) -> Result<()> {
///     if limit == 0 {
///         bail_code!(definitions::VALIDATION_ERROR, "limit must be positive");
///     }
///     Ok(())
/// }
/// assert!(check(0).is_err());
/// ```
#[macro_export]
macro_rules! bail_code {
    ($($tt:tt)+) => {
        return ::std::result::Result::Err($crate::structured_err!($($tt)+).into())
    };
}

/// Bail with a leaf `StructuredError` unless `$cond` holds.
///
/// # Example
///
/// ```rust
/// # use coded_errors::{ensure_code, definitions, Result};
/// fn check(len: usize) -> Result<()> {
///     ensure_code!(len <= 16, definitions::REQUEST_ENTITY_TOO_LARGE, "payload of {} bytes", len);
///     Ok(())
/// }
/// assert_eq!(check(32).unwrap_err().to_string(), "payload of 32 bytes");
/// ```
#[macro_export]
macro_rules! ensure_code {
    ($cond:expr, $($tt:tt)+) => {
        if !$cond {
            $crate::bail_code!($($tt)+);
        }
    };
}

// ============================================================================
// Code Definition Macros
// ============================================================================

/// Define a single `Code` constant.
///
/// # Example
///
/// ```rust
/// # use coded_errors::define_code;
/// define_code!(
///     /// Tenant quota exhausted.
///     QUOTA_EXCEEDED = "QUOTA_EXCEEDED"
/// );
/// assert_eq!(QUOTA_EXCEEDED.as_str(), "QUOTA_EXCEEDED");
/// ```
#[macro_export]
macro_rules! define_code {
    ($(#[$meta:meta])* $name:ident = $label:literal) => {
        $(#[$meta])*
        pub const $name: $crate::Code = $crate::Code::from_static($label);
    };
}

/// Define several `Code` constants at once.
///
/// # Example
///
/// ```rust
/// # use coded_errors::define_codes;
/// define_codes! {
///     /// Payment declined by the issuer.
///     PAYMENT_DECLINED = "PAYMENT_DECLINED",
///     /// Card expired.
///     CARD_EXPIRED = "CARD_EXPIRED",
/// }
/// assert_ne!(PAYMENT_DECLINED, CARD_EXPIRED);
/// ```
#[macro_export]
macro_rules! define_codes {
    { $( $(#[$meta:meta])* $name:ident = $label:literal ),+ $(,)? } => {
        $(
            $crate::define_code!($(#[$meta])* $name = $label);
        )+
    };
}

// ============================================================================
// Extension Traits
// ============================================================================

/// Wrap the error of a `Result` in a `StructuredError`.
pub trait ResultExt<T> {
    /// Wrap with `message`, inheriting the code from the error's chain.
    fn wrap_err(self, message: impl Into<Cow<'static, str>>) -> Result<T, StructuredError>;

    /// Wrap with `message` and explicit wrap options.
    fn wrap_err_with<I>(
        self,
        message: impl Into<Cow<'static, str>>,
        options: I,
    ) -> Result<T, StructuredError>
    where
        I: IntoIterator<Item = WrapOption>;

    /// Wrap with a message computed only on the error path.
    fn wrap_err_else<M, F>(self, message: F) -> Result<T, StructuredError>
    where
        M: Into<Cow<'static, str>>,
        F: FnOnce() -> M;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    #[inline]
    fn wrap_err(self, message: impl Into<Cow<'static, str>>) -> Result<T, StructuredError> {
        self.map_err(|err| StructuredError::wrap(err, message))
    }

    #[inline]
    fn wrap_err_with<I>(
        self,
        message: impl Into<Cow<'static, str>>,
        options: I,
    ) -> Result<T, StructuredError>
    where
        I: IntoIterator<Item = WrapOption>,
    {
        self.map_err(|err| StructuredError::wrap_with(err, message, options))
    }

    #[inline]
    fn wrap_err_else<M, F>(self, message: F) -> Result<T, StructuredError>
    where
        M: Into<Cow<'static, str>>,
        F: FnOnce() -> M,
    {
        self.map_err(|err| StructuredError::wrap(err, message()))
    }
}

/// Turn a missing value into a leaf `StructuredError`.
pub trait OptionExt<T> {
    /// `Some(v)` becomes `Ok(v)`; `None` becomes a leaf error with `message` and `code`.
    fn ok_or_code(
        self,
        message: impl Into<Cow<'static, str>>,
        code: impl Into<Code>,
    ) -> Result<T, StructuredError>;
}

impl<T> OptionExt<T> for Option<T> {
    #[inline]
    fn ok_or_code(
        self,
        message: impl Into<Cow<'static, str>>,
        code: impl Into<Code>,
    ) -> Result<T, StructuredError> {
        self.ok_or_else(|| StructuredError::new(message, code))
    }
}

// ============================================================================
// Tests
// ============================================================================
