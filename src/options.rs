//! Wrap options and the code-resolution policy.
//!
//! Options are small values applied, in order, to a default configuration.
//! A later option of the same kind replaces an earlier one.
//!
//! # Resolution Order
//!
//! 1. [`with_code`]: used unconditionally
//! 2. The first `StructuredError` found by walking the wrapped error's chain
//! 3. [`with_default_code`]
//! 4. `INTERNAL_ERROR`
//!
//! Empty codes count as "not supplied" at every step, so a wrapped error can
//! never end up with an empty code.

use crate::{Code, chain, definitions};
use std::error::Error;

/// A configuration modifier for [`StructuredError::wrap_with`](crate::StructuredError::wrap_with).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WrapOption {
    /// Force this code, overriding any inherited one.
    Code(Code),
    /// Use this code only when nothing can be inherited from the chain.
    DefaultCode(Code),
}

impl WrapOption {
    #[inline]
    fn apply(self, config: &mut WrapConfig) {
        match self {
            Self::Code(code) => config.code = Some(code),
            Self::DefaultCode(code) => config.default_code = Some(code),
        }
    }
}

/// Force `code` onto the wrapping error.
#[inline]
pub fn with_code(code: impl Into<Code>) -> WrapOption {
    WrapOption::Code(code.into())
}

/// Fall back to `code` when the wrapped chain carries no code.
#[inline]
pub fn with_default_code(code: impl Into<Code>) -> WrapOption {
    WrapOption::DefaultCode(code.into())
}

/// Accumulated wrap configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct WrapConfig {
    code: Option<Code>,
    default_code: Option<Code>,
}

impl WrapConfig {
    pub(crate) fn from_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = WrapOption>,
    {
        let mut config = Self::default();
        for option in options {
            option.apply(&mut config);
        }
        config
    }

    /// Pick the code for an error wrapping `cause`.
    pub(crate) fn resolve(self, cause: &(dyn Error + 'static)) -> Code {
        if let Some(code) = self.code.filter(|code| !code.is_empty()) {
            return code;
        }
        if let Some(inherited) = chain::find_code(cause) {
            return inherited.clone();
        }
        self.default_code
            .filter(|code| !code.is_empty())
            .unwrap_or(definitions::INTERNAL_ERROR)
    }
}
