//! Chain walking over `Error::source()`.
//!
//! `StructuredError` only exposes one causal step. Everything that needs the
//! whole chain (code inheritance on wrap, chain-wide code matching) goes
//! through [`Chain`], which repeatedly follows `source()` and therefore sees
//! through wrapping layers defined outside this crate.
//!
//! # Matching Rule
//!
//! [`contains`] tests each node against the target with the same rule as
//! [`StructuredError::is_code`]:
//! - the node is the target itself (same address)
//! - the node is a `StructuredError` whose `is_code(target)` holds
//! - the node is a bare [`Code`] and the target is an equal `Code`
//!
//! A `StructuredError` behind `Box` or `Arc` counts as a `StructuredError`.
//! Those smart pointers forward `source()` past the value they hold, so the
//! pointer node itself is the only place the inner error shows up.
//!
//! # Example
//!
//! ```rust
//! use coded_errors::{StructuredError, chain, definitions, with_code};
//!
//! let inner = StructuredError::new("row not found", definitions::NOT_FOUND);
//! let outer = StructuredError::wrap_with(
//!     inner,
//!     "load user",
//!     [with_code(definitions::INTERNAL_ERROR)],
//! );
//!
//! assert!(!outer.has_code(&definitions::NOT_FOUND));
//! assert!(chain::contains_code(&outer, &definitions::NOT_FOUND));
//! assert_eq!(chain::walk(&outer).count(), 2);
//! ```

use crate::{Code, StructuredError};
use std::error::Error;
use std::iter::FusedIterator;
use std::sync::Arc;

/// Iterator over an error and its transitive sources, head first.
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Chain<'a> {
    /// Start a walk at `head` (yielded first).
    #[inline]
    pub fn new(head: &'a (dyn Error + 'static)) -> Self {
        Self { next: Some(head) }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn Error + 'static);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}

/// Walk `err` and its sources.
#[inline]
pub fn walk<'a>(err: &'a (dyn Error + 'static)) -> Chain<'a> {
    Chain::new(err)
}

/// Whether any node of the chain starting at `err` matches `target`.
pub fn contains(err: &(dyn Error + 'static), target: &(dyn Error + 'static)) -> bool {
    walk(err).any(|node| node_matches(node, target))
}

/// Whether any node of the chain starting at `err` carries `code`.
#[inline]
pub fn contains_code(err: &(dyn Error + 'static), code: &Code) -> bool {
    contains(err, code)
}

/// View `node` as a `StructuredError`, also when it is boxed or shared.
pub fn as_structured<'a>(node: &'a (dyn Error + 'static)) -> Option<&'a StructuredError> {
    if let Some(structured) = node.downcast_ref::<StructuredError>() {
        return Some(structured);
    }
    if let Some(boxed) = node.downcast_ref::<Box<StructuredError>>() {
        return Some(boxed.as_ref());
    }
    node.downcast_ref::<Arc<StructuredError>>()
        .map(|shared| shared.as_ref())
}

/// First `StructuredError` in the chain, `err` included.
pub fn find_structured<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a StructuredError> {
    walk(err).find_map(as_structured)
}

/// Code of the first `StructuredError` in the chain with a non-empty code.
pub fn find_code<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a Code> {
    walk(err)
        .filter_map(as_structured)
        .map(StructuredError::code)
        .find(|code| !code.is_empty())
}

/// The deepest error in the chain; `err` itself when it has no source.
pub fn root_cause<'a>(err: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    walk(err).last().unwrap_or(err)
}

fn node_matches(node: &(dyn Error + 'static), target: &(dyn Error + 'static)) -> bool {
    if std::ptr::addr_eq(node as *const dyn Error, target as *const dyn Error) {
        return true;
    }
    if let Some(structured) = as_structured(node) {
        return structured.is_code(target);
    }
    match (node.downcast_ref::<Code>(), target.downcast_ref::<Code>()) {
        (Some(node_code), Some(target_code)) => node_code == target_code,
        _ => false,
    }
}
