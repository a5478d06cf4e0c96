//! seqcfg core library
//!
//! Composable, validated parameter sets for sequence analysis algorithms.
//! Small option elements are combined left to right into a [`Configuration`];
//! each combination is checked against the domain's kind registry and
//! compatibility table, so an inconsistent configuration never reaches the
//! algorithm that reads it.
//!
//! ```
//! use seqcfg_core::search::{MaxError, Mode, SearchSettings};
//! use seqcfg_core::{ConfigElement, ErrorCount};
//!
//! let errors = MaxError::new(&[ErrorCount::substitution(2), ErrorCount::insertion(1)])?;
//! let config = errors.combine(Mode::Best)?;
//!
//! let settings = SearchSettings::resolve(&config)?;
//! assert_eq!(settings.mode, Mode::Best);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod align;
pub mod budget;
pub mod configuration;
pub mod element;
pub mod error;
pub mod kind;
pub mod search;
pub mod table;

// Re-export commonly used types and functions
pub use budget::{BudgetValue, ErrorBudget, ErrorCount, ErrorField, ErrorRate};
pub use configuration::Configuration;
pub use element::{AnyElement, ConfigElement, Tagged};
pub use error::{ConfigError, DomainDefinitionError, MalformedInputError};
pub use kind::{check_domain, compatible, ElementKind, KindSet, MAX_KINDS};
pub use table::CompatibilityTable;

/// Version information for the seqcfg core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
