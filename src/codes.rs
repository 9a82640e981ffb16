//! Classification codes - stable, machine-readable labels attached to errors.
//!
//! A [`Code`] is an opaque string label. The domain is open: the predefined
//! catalog in [`definitions`](crate::definitions) covers the common cases, and
//! any caller can mint its own labels without touching this crate.
//!
//! # Equality
//!
//! Two codes are equal iff their labels are byte-for-byte equal. Labels are
//! never trimmed, case-folded or otherwise normalized.
//!
//! # Storage
//!
//! Labels are held as `Cow<'static, str>`:
//! - Catalog constants and string literals are borrowed (zero allocation)
//! - Labels computed at runtime are owned
//!
//! # Code as an Error
//!
//! `Code` implements [`std::error::Error`] and renders as its own label, so a
//! bare code can be returned as a failure signal or used as the target of a
//! chain scan:
//!
//! ```rust
//! use coded_errors::{Code, StructuredError, chain, definitions};
//!
//! let err = StructuredError::new("row not found", definitions::NOT_FOUND);
//! assert!(chain::contains(&err, &definitions::NOT_FOUND));
//!
//! let custom = Code::new(format!("{}_{}", "QUOTA", "EXCEEDED"));
//! assert_eq!(custom.to_string(), "QUOTA_EXCEEDED");
//! ```

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// An immutable classification label.
///
/// Cheap to compare and hash; clone is free for borrowed labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(Cow<'static, str>);

impl Code {
    /// The empty label. Never stored on a `StructuredError`; construction
    /// replaces it with `INTERNAL_ERROR`.
    pub const EMPTY: Code = Code::from_static("");

    /// Create a code from a static label in const context.
    #[inline]
    pub const fn from_static(label: &'static str) -> Self {
        Self(Cow::Borrowed(label))
    }

    /// Create a code from any label, borrowed or owned.
    #[inline]
    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Self(label.into())
    }

    /// The label, verbatim.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    /// Whether this is the empty label.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the label belongs to the predefined catalog.
    #[inline]
    pub fn is_predefined(&self) -> bool {
        crate::definitions::lookup(self.as_str()).is_some()
    }

    /// Replace the empty label with `INTERNAL_ERROR`.
    #[inline]
    pub(crate) fn or_internal(self) -> Self {
        if self.is_empty() {
            crate::definitions::INTERNAL_ERROR
        } else {
            self
        }
    }
}

impl Default for Code {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for Code {
    /// Writes the label directly to the formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error for Code {}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&'static str> for Code {
    fn from(label: &'static str) -> Self {
        Self::from_static(label)
    }
}

impl From<String> for Code {
    fn from(label: String) -> Self {
        Self(Cow::Owned(label))
    }
}

impl From<Cow<'static, str>> for Code {
    fn from(label: Cow<'static, str>) -> Self {
        Self(label)
    }
}

impl From<&Code> for Code {
    fn from(code: &Code) -> Self {
        code.clone()
    }
}

impl PartialEq<str> for Code {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Code {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

// ============================================================================
// Tests
// ============================================================================
