//! Search configuration domain
//!
//! Options for approximate string search over an index: an error limit,
//! given either as absolute counts or as rates relative to the query length,
//! the hit reporting mode and the form hits are reported in. Absolute and
//! relative error limits are mutually exclusive.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::budget::{ErrorBudget, ErrorCount, ErrorRate};
use crate::configuration::Configuration;
use crate::element::ConfigElement;
use crate::error::{ConfigError, MalformedInputError};
use crate::kind::ElementKind;
use crate::table::CompatibilityTable;

/// Kinds of the search domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SearchConfigId {
    MaxError,
    MaxErrorRate,
    Output,
    Mode,
}

static SEARCH_KINDS: [SearchConfigId; 4] = [
    SearchConfigId::MaxError,
    SearchConfigId::MaxErrorRate,
    SearchConfigId::Output,
    SearchConfigId::Mode,
];

pub static SEARCH_COMPATIBILITY: CompatibilityTable = CompatibilityTable::new(&[
    //0  1  2  3
    &[0, 0, 1, 1], // 0: max_error
    &[0, 0, 1, 1], // 1: max_error_rate
    &[1, 1, 0, 1], // 2: output
    &[1, 1, 1, 0], // 3: mode
]);

impl ElementKind for SearchConfigId {
    const DOMAIN: &'static str = "search";
    const SIZE: usize = 4;

    fn all() -> &'static [Self] {
        &SEARCH_KINDS
    }

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            SearchConfigId::MaxError => "max_error",
            SearchConfigId::MaxErrorRate => "max_error_rate",
            SearchConfigId::Output => "output",
            SearchConfigId::Mode => "mode",
        }
    }

    fn compatibility_table() -> &'static CompatibilityTable {
        &SEARCH_COMPATIBILITY
    }
}

impl fmt::Display for SearchConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Absolute error limits per category
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaxError {
    budget: ErrorBudget<u8>,
}

impl MaxError {
    pub fn new(errors: &[ErrorCount<u8>]) -> Result<Self, MalformedInputError> {
        Ok(Self {
            budget: ErrorBudget::reconcile(errors)?,
        })
    }

    /// Same limit for the total and every category
    pub fn total(errors: u8) -> Self {
        Self {
            budget: ErrorBudget::uniform(errors),
        }
    }

    pub fn budget(&self) -> &ErrorBudget<u8> {
        &self.budget
    }
}

impl ConfigElement for MaxError {
    type Kind = SearchConfigId;
    type Value = ErrorBudget<u8>;

    fn kind(&self) -> SearchConfigId {
        SearchConfigId::MaxError
    }

    fn value(&self) -> &ErrorBudget<u8> {
        &self.budget
    }
}

/// Error limits as fractions of the query length
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaxErrorRate {
    budget: ErrorBudget<ErrorRate>,
}

impl MaxErrorRate {
    pub fn new(rates: &[ErrorCount<ErrorRate>]) -> Result<Self, MalformedInputError> {
        Ok(Self {
            budget: ErrorBudget::reconcile(rates)?,
        })
    }

    pub fn total(rate: f64) -> Result<Self, MalformedInputError> {
        Ok(Self {
            budget: ErrorBudget::uniform(ErrorRate::new(rate)?),
        })
    }

    pub fn budget(&self) -> &ErrorBudget<ErrorRate> {
        &self.budget
    }
}

impl ConfigElement for MaxErrorRate {
    type Kind = SearchConfigId;
    type Value = ErrorBudget<ErrorRate>;

    fn kind(&self) -> SearchConfigId {
        SearchConfigId::MaxErrorRate
    }

    fn value(&self) -> &ErrorBudget<ErrorRate> {
        &self.budget
    }
}

/// How hits are reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Output {
    #[default]
    TextPosition,
    IndexCursor,
}

impl ConfigElement for Output {
    type Kind = SearchConfigId;
    type Value = Output;

    fn kind(&self) -> SearchConfigId {
        SearchConfigId::Output
    }

    fn value(&self) -> &Output {
        self
    }
}

/// Which hits are reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Every hit within the error limit
    #[default]
    All,
    /// Every hit with the lowest error count found
    AllBest,
    /// One hit with the lowest error count found
    Best,
    /// Every hit with at most `best + n` errors
    Strata(u8),
}

impl ConfigElement for Mode {
    type Kind = SearchConfigId;
    type Value = Mode;

    fn kind(&self) -> SearchConfigId {
        SearchConfigId::Mode
    }

    fn value(&self) -> &Mode {
        self
    }
}

/// Error limit as read out of a configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorLimit {
    Count(ErrorBudget<u8>),
    Rate(ErrorBudget<ErrorRate>),
}

impl ErrorLimit {
    /// Absolute limits for a query of `length` symbols
    pub fn counts_for(&self, length: usize) -> ErrorBudget<u8> {
        match self {
            ErrorLimit::Count(budget) => *budget,
            ErrorLimit::Rate(budget) => budget.map(|rate| rate.count_for(length)),
        }
    }
}

/// Search parameters with defaults filled in for absent kinds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchSettings {
    pub errors: ErrorLimit,
    pub mode: Mode,
    pub output: Output,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            errors: ErrorLimit::Count(ErrorBudget::default()),
            mode: Mode::default(),
            output: Output::default(),
        }
    }
}

impl SearchSettings {
    /// Read every kind out of `config`, falling back to defaults for absent ones.
    ///
    /// Fails if a present kind holds a value of an unexpected type.
    pub fn resolve(
        config: &Configuration<SearchConfigId>,
    ) -> Result<Self, ConfigError<SearchConfigId>> {
        debug_assert!(config.validate().is_ok());

        let defaults = Self::default();
        let errors = match (
            config.typed::<MaxError>(SearchConfigId::MaxError)?,
            config.typed::<MaxErrorRate>(SearchConfigId::MaxErrorRate)?,
        ) {
            (Some(limit), _) => ErrorLimit::Count(*limit.budget()),
            (None, Some(limit)) => ErrorLimit::Rate(*limit.budget()),
            (None, None) => defaults.errors,
        };

        Ok(Self {
            errors,
            mode: config
                .typed::<Mode>(SearchConfigId::Mode)?
                .copied()
                .unwrap_or(defaults.mode),
            output: config
                .typed::<Output>(SearchConfigId::Output)?
                .copied()
                .unwrap_or(defaults.output),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Tagged;
    use crate::kind::{check_domain, compatible};

    #[test]
    fn test_domain_is_consistent() {
        assert_eq!(check_domain::<SearchConfigId>(), Ok(()));
    }

    #[test]
    fn test_error_limits_are_exclusive() {
        assert!(!compatible(SearchConfigId::MaxError, SearchConfigId::MaxErrorRate));
        assert!(compatible(SearchConfigId::MaxError, SearchConfigId::Mode));
        assert!(compatible(SearchConfigId::Output, SearchConfigId::MaxErrorRate));
    }

    #[test]
    fn test_max_error_reconciles_parts() {
        let element =
            MaxError::new(&[ErrorCount::substitution(2), ErrorCount::insertion(1)]).unwrap();
        assert_eq!(element.value().to_array(), [3, 2, 1, 0]);
        assert_eq!(element.kind(), SearchConfigId::MaxError);
    }

    #[test]
    fn test_max_error_rejects_repeated_field() {
        assert!(MaxError::new(&[ErrorCount::total(1), ErrorCount::total(2)]).is_err());
    }

    #[test]
    fn test_max_error_rate_total() {
        let element = MaxErrorRate::total(0.1).unwrap();
        assert_eq!(element.budget().deletion().get(), 0.1);
        assert!(MaxErrorRate::total(1.1).is_err());
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = SearchSettings::resolve(&Configuration::new()).unwrap();
        assert_eq!(settings, SearchSettings::default());
        assert_eq!(settings.mode, Mode::All);
        assert_eq!(settings.output, Output::TextPosition);
        assert_eq!(settings.errors.counts_for(100), ErrorBudget::default());
    }

    #[test]
    fn test_resolve_reads_supplied_values() {
        let config = MaxErrorRate::total(0.1)
            .unwrap()
            .combine(Mode::Strata(1))
            .unwrap();
        let settings = SearchSettings::resolve(&config).unwrap();
        assert_eq!(settings.mode, Mode::Strata(1));
        assert_eq!(settings.output, Output::TextPosition);
        assert_eq!(settings.errors.counts_for(50), ErrorBudget::uniform(5));
    }

    #[test]
    fn test_resolve_rejects_foreign_value_for_known_kind() {
        let config = MaxError::total(1)
            .combine(Tagged::new(SearchConfigId::Mode, Mode::Best))
            .unwrap();
        assert_eq!(
            SearchSettings::resolve(&config),
            Err(ConfigError::value_mismatch(
                SearchConfigId::Mode,
                std::any::type_name::<Mode>()
            ))
        );

        let config = Tagged::new(SearchConfigId::Output, "cursor").into_configuration();
        assert!(matches!(
            SearchSettings::resolve(&config),
            Err(ConfigError::ValueMismatch {
                kind: SearchConfigId::Output,
                ..
            })
        ));
    }

    #[test]
    fn test_settings_serialize() {
        let settings = SearchSettings::resolve(&Mode::Best.into_configuration()).unwrap();
        let json = serde_json::to_value(settings).unwrap();
        assert_eq!(json["mode"], "best");
        assert_eq!(json["output"], "text_position");
        assert_eq!(json["errors"]["count"]["total"], 0);
    }
}
