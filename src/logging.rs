//! Structured log records for error chains.
//!
//! This crate never writes logs itself. [`ChainLog`] is a borrowed view of a
//! `StructuredError` and its causes that a caller hands to whatever logger it
//! uses.
//!
//! # Properties
//!
//! - Borrows from the error with an explicit lifetime and cannot outlive it
//! - Cause nodes are collected inline for typical chain depths (no heap until
//!   more than four causes)
//! - `write_to` bounds every field to [`MAX_FIELD_OUTPUT_LEN`] bytes, cutting
//!   on a UTF-8 boundary and marking the cut
//!
//! Structured accessors are untruncated; serializing them is the logging
//! framework's job.

use crate::{Code, StructuredError};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// Maximum length for any individual field in formatted output.
pub const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Truncation indicator appended to truncated fields.
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// One cause below the head of a [`ChainLog`].
#[derive(Clone, Copy)]
pub struct CauseEntry<'a> {
    error: &'a (dyn Error + 'static),
    structured: Option<&'a StructuredError>,
}

impl<'a> CauseEntry<'a> {
    fn new(error: &'a (dyn Error + 'static)) -> Self {
        Self {
            error,
            structured: crate::chain::as_structured(error),
        }
    }

    /// Code of this node, when it is a `StructuredError`.
    #[inline]
    pub fn code(&self) -> Option<&'a Code> {
        self.structured.map(StructuredError::code)
    }

    /// This node's own text.
    ///
    /// For a `StructuredError` that is its message alone. Foreign errors only
    /// expose `Display`, which may already include their own causes.
    pub fn message(&self) -> Cow<'a, str> {
        match self.structured {
            Some(structured) => Cow::Borrowed(structured.message()),
            None => Cow::Owned(self.error.to_string()),
        }
    }

    /// The underlying error.
    #[inline]
    pub fn error(&self) -> &'a (dyn Error + 'static) {
        self.error
    }
}

impl fmt::Debug for CauseEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CauseEntry")
            .field("code", &self.code().map(Code::as_str))
            .field("message", &self.message())
            .finish()
    }
}

/// Structured record of an error chain, borrowed from the head error.
///
/// # Example
///
/// ```rust
/// # use coded_errors::{StructuredError, definitions};
/// let inner = StructuredError::new("row not found", definitions::NOT_FOUND);
/// let err = StructuredError::wrap(inner, "load user");
///
/// let mut line = String::new();
/// err.log_entry().write_to(&mut line).unwrap();
/// assert_eq!(
///     line,
///     "[NOT_FOUND] message='load user' depth=1 cause.1='[NOT_FOUND] row not found'"
/// );
/// ```
#[derive(Debug)]
pub struct ChainLog<'a> {
    code: &'a Code,
    message: &'a str,
    causes: SmallVec<[CauseEntry<'a>; 4]>,
}

impl<'a> ChainLog<'a> {
    pub(crate) fn new(head: &'a StructuredError) -> Self {
        let causes = head
            .source()
            .map(|first| crate::chain::walk(first).map(CauseEntry::new).collect())
            .unwrap_or_default();
        Self {
            code: head.code(),
            message: head.message(),
            causes,
        }
    }

    /// Write the record as a single line.
    ///
    /// Format: `[CODE] message='...' depth=N cause.1='[CODE] ...' cause.2='...'`.
    /// Foreign causes carry no code prefix.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "[{}] message='{}' depth={}",
            truncate_with_indicator(self.code.as_str()),
            truncate_with_indicator(self.message),
            self.causes.len()
        )?;

        for (index, cause) in self.causes.iter().enumerate() {
            let message = cause.message();
            match cause.code() {
                Some(code) => write!(
                    f,
                    " cause.{}='[{}] {}'",
                    index + 1,
                    truncate_with_indicator(code.as_str()),
                    truncate_with_indicator(&message)
                )?,
                None => write!(
                    f,
                    " cause.{}='{}'",
                    index + 1,
                    truncate_with_indicator(&message)
                )?,
            }
        }

        Ok(())
    }

    /// Code of the head error.
    #[inline]
    pub const fn code(&self) -> &'a Code {
        self.code
    }

    /// Message of the head error, without causes.
    #[inline]
    pub const fn message(&self) -> &'a str {
        self.message
    }

    /// Causes below the head, nearest first.
    #[inline]
    pub fn causes(&self) -> &[CauseEntry<'a>] {
        &self.causes
    }

    /// Number of causes below the head.
    #[inline]
    pub fn depth(&self) -> usize {
        self.causes.len()
    }

    /// Codes present anywhere in the record, head first, duplicates kept.
    pub fn codes(&self) -> impl Iterator<Item = &'a Code> + '_ {
        std::iter::once(self.code).chain(self.causes.iter().filter_map(CauseEntry::code))
    }
}

impl fmt::Display for ChainLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Bound `field` to [`MAX_FIELD_OUTPUT_LEN`] bytes, marking the cut.
///
/// The cut lands on a char boundary. Fields within the limit are borrowed.
fn truncate_with_indicator(field: &str) -> Cow<'_, str> {
    if field.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(field);
    }
    let budget = MAX_FIELD_OUTPUT_LEN - TRUNCATION_INDICATOR.len();
    let cut = (0..=budget)
        .rev()
        .find(|&idx| field.is_char_boundary(idx))
        .unwrap_or(0);
    Cow::Owned(format!("{}{}", &field[..cut], TRUNCATION_INDICATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{definitions, with_code};
    use std::io;

    fn render(err: &StructuredError) -> String {
        let mut buffer = String::new();
        err.log_entry().write_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn leaf_record_has_no_causes() {
        let err = StructuredError::new("denied", definitions::FORBIDDEN);
        let log = err.log_entry();
        assert_eq!(log.depth(), 0);
        assert!(log.causes().is_empty());
        assert_eq!(render(&err), "[FORBIDDEN] message='denied' depth=0");
    }

    #[test]
    fn causes_are_listed_nearest_first() {
        let root = io::Error::other("db down");
        let middle = StructuredError::wrap_with(
            root,
            "query",
            [with_code(definitions::SERVICE_UNAVAILABLE)],
        );
        let head = StructuredError::wrap(middle, "load user");

        let log = head.log_entry();
        assert_eq!(log.depth(), 2);
        assert_eq!(log.causes()[0].code(), Some(&definitions::SERVICE_UNAVAILABLE));
        assert_eq!(log.causes()[0].message(), "query");
        assert_eq!(log.causes()[1].code(), None);
        assert_eq!(log.causes()[1].message(), "db down");

        assert_eq!(
            render(&head),
            "[SERVICE_UNAVAILABLE] message='load user' depth=2 \
             cause.1='[SERVICE_UNAVAILABLE] query' cause.2='db down'"
        );
    }

    #[test]
    fn codes_lists_head_and_structured_causes() {
        let inner = StructuredError::new("row not found", definitions::NOT_FOUND);
        let outer =
            StructuredError::wrap_with(inner, "load", [with_code(definitions::INTERNAL_ERROR)]);
        let log = outer.log_entry();
        let codes: Vec<&str> = log.codes().map(Code::as_str).collect();
        assert_eq!(codes, ["INTERNAL_ERROR", "NOT_FOUND"]);
    }

    #[test]
    fn deep_chains_spill_past_inline_capacity() {
        let mut err = StructuredError::new("root", definitions::DATA_LOSS);
        for _ in 0..6 {
            err = StructuredError::wrap(err, "again");
        }
        let log = err.log_entry();
        assert_eq!(log.depth(), 6);
        assert!(log.codes().all(|code| code == &definitions::DATA_LOSS));
    }

    #[test]
    fn display_matches_write_to() {
        let err = StructuredError::wrap(io::Error::other("x"), "y");
        assert_eq!(err.log_entry().to_string(), render(&err));
    }

    #[test]
    fn long_messages_are_truncated_in_output() {
        let err = StructuredError::new("m".repeat(MAX_FIELD_OUTPUT_LEN * 2), definitions::UNKNOWN);
        let line = render(&err);
        assert!(line.contains(TRUNCATION_INDICATOR));
        assert!(line.len() < MAX_FIELD_OUTPUT_LEN + 64);
        assert_eq!(err.log_entry().message().len(), MAX_FIELD_OUTPUT_LEN * 2);
    }

    /// Text of the `cause.N` field in a rendered line, quotes stripped.
    fn cause_field(line: &str, n: usize) -> &str {
        let marker = format!(" cause.{}='", n);
        let rest = &line[line.find(&marker).unwrap() + marker.len()..];
        &rest[..rest.find('\'').unwrap()]
    }

    #[test]
    fn long_structured_cause_is_cut_in_its_entry() {
        let inner = StructuredError::new("q".repeat(3000), definitions::NOT_FOUND);
        let head = StructuredError::wrap(inner, "load");
        let line = render(&head);

        assert!(line.starts_with("[NOT_FOUND] message='load' depth=1 "));
        let field = cause_field(&line, 1);
        let message = field.strip_prefix("[NOT_FOUND] ").unwrap();
        assert_eq!(message.len(), MAX_FIELD_OUTPUT_LEN);
        assert!(message.ends_with(TRUNCATION_INDICATOR));
        assert_eq!(head.log_entry().causes()[0].message().len(), 3000);
    }

    #[test]
    fn foreign_cause_is_cut_on_a_char_boundary() {
        // 3-byte chars, so the budget does not divide evenly
        let root = io::Error::other("\u{20ac}".repeat(MAX_FIELD_OUTPUT_LEN));
        let head = StructuredError::wrap(root, "charge");
        let line = render(&head);

        let field = cause_field(&line, 1);
        let budget = MAX_FIELD_OUTPUT_LEN - TRUNCATION_INDICATOR.len();
        assert_eq!(field.len(), budget - budget % 3 + TRUNCATION_INDICATOR.len());
        let kept = field.strip_suffix(TRUNCATION_INDICATOR).unwrap();
        assert!(kept.chars().all(|c| c == '\u{20ac}'));
    }

    #[test]
    fn long_code_label_is_cut_in_the_prefix() {
        let label = "X".repeat(2 * MAX_FIELD_OUTPUT_LEN);
        let err = StructuredError::new("quota", Code::new(label));
        let line = render(&err);
        assert!(line.starts_with("[XXXX"));
        assert!(line.contains("...[TRUNCATED]] message='quota' depth=0"));
        assert_eq!(err.log_entry().code().as_str().len(), 2 * MAX_FIELD_OUTPUT_LEN);
    }

    #[test]
    fn message_at_the_limit_is_left_intact() {
        let err = StructuredError::new("m".repeat(MAX_FIELD_OUTPUT_LEN), definitions::UNKNOWN);
        let line = render(&err);
        assert!(!line.contains(TRUNCATION_INDICATOR));
        assert!(matches!(truncate_with_indicator(err.message()), Cow::Borrowed(_)));
    }

    #[test]
    fn boxed_structured_cause_keeps_its_code() {
        let inner = Box::new(StructuredError::new("row not found", definitions::NOT_FOUND));
        let head = StructuredError::wrap(inner, "load user");

        let log = head.log_entry();
        assert_eq!(log.depth(), 1);
        assert_eq!(log.causes()[0].code(), Some(&definitions::NOT_FOUND));
        assert_eq!(
            render(&head),
            "[NOT_FOUND] message='load user' depth=1 cause.1='[NOT_FOUND] row not found'"
        );
    }
}
