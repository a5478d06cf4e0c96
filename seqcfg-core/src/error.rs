//! Error types for configuration construction and combination

use thiserror::Error;

use crate::budget::ErrorField;
use crate::kind::ElementKind;

/// Errors raised when configurations are combined or read back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError<K: ElementKind> {
    #[error("duplicate {domain} configuration element: `{kind}` is already present")]
    DuplicateKind { domain: &'static str, kind: K },

    #[error(
        "incompatible {domain} configuration elements: \
         `{first}` cannot be combined with `{second}`"
    )]
    IncompatibleKinds {
        domain: &'static str,
        first: K,
        second: K,
    },

    #[error("{domain} configuration element `{kind}` does not hold a `{expected}` value")]
    ValueMismatch {
        domain: &'static str,
        kind: K,
        expected: &'static str,
    },
}

impl<K: ElementKind> ConfigError<K> {
    pub fn duplicate(kind: K) -> Self {
        Self::DuplicateKind {
            domain: K::DOMAIN,
            kind,
        }
    }

    pub fn incompatible(first: K, second: K) -> Self {
        Self::IncompatibleKinds {
            domain: K::DOMAIN,
            first,
            second,
        }
    }

    pub fn value_mismatch(kind: K, expected: &'static str) -> Self {
        Self::ValueMismatch {
            domain: K::DOMAIN,
            kind,
            expected,
        }
    }

    /// Kinds named by this error, in the order they were reported
    pub fn kinds(&self) -> Vec<K> {
        match *self {
            Self::DuplicateKind { kind, .. } | Self::ValueMismatch { kind, .. } => vec![kind],
            Self::IncompatibleKinds { first, second, .. } => vec![first, second],
        }
    }
}

/// Errors raised while building a single configuration element
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedInputError {
    #[error("error field `{field}` was supplied more than once")]
    DuplicateField { field: ErrorField },

    #[error("{given} error fields supplied, but the record only holds {width}")]
    TooManyFields { given: usize, width: usize },

    #[error("error rate {value} is outside the range [0, 1]")]
    RateOutOfRange { value: f64 },

    #[error("invalid `{element}` value: {message}")]
    InvalidValue {
        element: &'static str,
        message: String,
    },
}

impl MalformedInputError {
    pub fn invalid_value<S: Into<String>>(element: &'static str, message: S) -> Self {
        Self::InvalidValue {
            element,
            message: message.into(),
        }
    }
}

/// Inconsistencies between a domain's kind registry and its compatibility table.
///
/// These never surface from user input; they are caught by
/// [`check_domain`](crate::kind::check_domain) in each domain's tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainDefinitionError {
    #[error("{domain}: {size} kinds declared, at most {max} are supported")]
    TooManyKinds {
        domain: &'static str,
        size: usize,
        max: usize,
    },

    #[error("{domain}: SIZE is {size} but the registry lists {listed} kinds")]
    RegistryLength {
        domain: &'static str,
        size: usize,
        listed: usize,
    },

    #[error("{domain}: kind `{kind}` is listed at position {position} but reports index {index}")]
    NonDenseIndex {
        domain: &'static str,
        kind: &'static str,
        position: usize,
        index: usize,
    },

    #[error("{domain}: compatibility table has {rows} rows, expected {expected}")]
    TableDimension {
        domain: &'static str,
        rows: usize,
        expected: usize,
    },

    #[error("{domain}: compatibility row {row} has {len} cells, expected {expected}")]
    RowLength {
        domain: &'static str,
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("{domain}: cell ({row}, {col}) holds {value}, expected 0 or 1")]
    InvalidCell {
        domain: &'static str,
        row: usize,
        col: usize,
        value: u8,
    },

    #[error("{domain}: kind {index} is marked compatible with itself")]
    SelfCompatible { domain: &'static str, index: usize },

    #[error("{domain}: cells ({row}, {col}) and ({col}, {row}) disagree")]
    Asymmetric {
        domain: &'static str,
        row: usize,
        col: usize,
    },
}
