//! Element files
//!
//! An element file names a domain and lists configuration elements in the
//! order they are combined:
//!
//! ```toml
//! domain = "search"
//!
//! [[element]]
//! kind = "max_error"
//! substitution = 2
//!
//! [[element]]
//! kind = "mode"
//! mode = "best"
//! ```

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

use seqcfg_core::align::{
    self, AlignConfigId, AlignedEnds, Band, Gap, GlobalAlignment, ResultSelection, Scoring,
};
use seqcfg_core::search::{self, MaxErrorRate, Mode, Output, SearchConfigId};
use seqcfg_core::{
    BudgetValue, ConfigElement, Configuration, ElementKind, ErrorCount, ErrorField, ErrorRate,
    MalformedInputError,
};

use crate::error::{CliError, CliResult};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Alignment,
    Search,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "snake_case")]
pub enum ElementFile {
    Alignment {
        #[serde(default, rename = "element")]
        elements: Vec<AlignElementSpec>,
    },
    Search {
        #[serde(default, rename = "element")]
        elements: Vec<SearchElementSpec>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlignElementSpec {
    AlignedEnds {
        #[serde(default)]
        leading_first: bool,
        #[serde(default)]
        trailing_first: bool,
        #[serde(default)]
        leading_second: bool,
        #[serde(default)]
        trailing_second: bool,
    },
    Band {
        lower: i32,
        upper: i32,
    },
    Gap {
        open: i32,
        extension: i32,
    },
    Global,
    MaxError {
        errors: u32,
    },
    Result {
        result: ResultSelection,
    },
    Scoring {
        match_score: i32,
        mismatch_score: i32,
    },
}

/// Sub-fields of an error budget as written in a file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetSpec<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substitution: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insertion: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion: Option<T>,
}

impl<T: Copy> BudgetSpec<T> {
    /// Supplied fields in field order
    fn counts<U: BudgetValue>(
        &self,
        convert: impl Fn(T) -> Result<U, MalformedInputError>,
    ) -> Result<Vec<ErrorCount<U>>, MalformedInputError> {
        [
            (ErrorField::Total, self.total),
            (ErrorField::Substitution, self.substitution),
            (ErrorField::Insertion, self.insertion),
            (ErrorField::Deletion, self.deletion),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| (field, value)))
        .map(|(field, value)| Ok(ErrorCount::new(field, convert(value)?)))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchElementSpec {
    MaxError(BudgetSpec<u8>),
    MaxErrorRate(BudgetSpec<f64>),
    Output { output: Output },
    Mode { mode: Mode },
}

/// Build one element and wrap it as a single-element configuration
pub trait ElementSpec {
    type Kind: ElementKind;

    fn kind(&self) -> Self::Kind;

    fn build(&self) -> Result<Configuration<Self::Kind>, MalformedInputError>;
}

impl ElementSpec for AlignElementSpec {
    type Kind = AlignConfigId;

    fn kind(&self) -> AlignConfigId {
        match self {
            AlignElementSpec::AlignedEnds { .. } => AlignConfigId::AlignedEnds,
            AlignElementSpec::Band { .. } => AlignConfigId::Band,
            AlignElementSpec::Gap { .. } => AlignConfigId::Gap,
            AlignElementSpec::Global => AlignConfigId::Global,
            AlignElementSpec::MaxError { .. } => AlignConfigId::MaxError,
            AlignElementSpec::Result { .. } => AlignConfigId::Result,
            AlignElementSpec::Scoring { .. } => AlignConfigId::Scoring,
        }
    }

    fn build(&self) -> Result<Configuration<AlignConfigId>, MalformedInputError> {
        let config = match *self {
            AlignElementSpec::AlignedEnds {
                leading_first,
                trailing_first,
                leading_second,
                trailing_second,
            } => AlignedEnds {
                leading_first,
                trailing_first,
                leading_second,
                trailing_second,
            }
            .into_configuration(),
            AlignElementSpec::Band { lower, upper } => {
                Band::new(lower, upper)?.into_configuration()
            }
            AlignElementSpec::Gap { open, extension } => {
                Gap::new(open, extension)?.into_configuration()
            }
            AlignElementSpec::Global => GlobalAlignment.into_configuration(),
            AlignElementSpec::MaxError { errors } => {
                align::MaxError::new(errors).into_configuration()
            }
            AlignElementSpec::Result { result } => result.into_configuration(),
            AlignElementSpec::Scoring {
                match_score,
                mismatch_score,
            } => Scoring::new(match_score, mismatch_score)?.into_configuration(),
        };
        Ok(config)
    }
}

impl ElementSpec for SearchElementSpec {
    type Kind = SearchConfigId;

    fn kind(&self) -> SearchConfigId {
        match self {
            SearchElementSpec::MaxError(_) => SearchConfigId::MaxError,
            SearchElementSpec::MaxErrorRate(_) => SearchConfigId::MaxErrorRate,
            SearchElementSpec::Output { .. } => SearchConfigId::Output,
            SearchElementSpec::Mode { .. } => SearchConfigId::Mode,
        }
    }

    fn build(&self) -> Result<Configuration<SearchConfigId>, MalformedInputError> {
        let config = match self {
            SearchElementSpec::MaxError(spec) => {
                search::MaxError::new(&spec.counts(Ok)?)?.into_configuration()
            }
            SearchElementSpec::MaxErrorRate(spec) => {
                MaxErrorRate::new(&spec.counts(ErrorRate::new)?)?.into_configuration()
            }
            SearchElementSpec::Output { output } => output.into_configuration(),
            SearchElementSpec::Mode { mode } => mode.into_configuration(),
        };
        Ok(config)
    }
}

impl ElementFile {
    pub fn domain(&self) -> Domain {
        match self {
            ElementFile::Alignment { .. } => Domain::Alignment,
            ElementFile::Search { .. } => Domain::Search,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ElementFile::Alignment { elements } => elements.len(),
            ElementFile::Search { elements } => elements.len(),
        }
    }

    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Err(CliError::file_not_found(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    pub fn parse(content: &str, source: &str) -> CliResult<Self> {
        toml::from_str(content).map_err(|err| CliError::parse(source.to_string(), err.to_string()))
    }

    /// Sample file for a domain
    pub fn example(domain: Domain) -> Self {
        match domain {
            Domain::Alignment => ElementFile::Alignment {
                elements: vec![
                    AlignElementSpec::Global,
                    AlignElementSpec::Scoring {
                        match_score: 4,
                        mismatch_score: -5,
                    },
                    AlignElementSpec::Gap {
                        open: -10,
                        extension: -1,
                    },
                    AlignElementSpec::Band { lower: -8, upper: 8 },
                    AlignElementSpec::Result {
                        result: ResultSelection::Alignment,
                    },
                ],
            },
            Domain::Search => ElementFile::Search {
                elements: vec![
                    SearchElementSpec::MaxError(BudgetSpec {
                        substitution: Some(2),
                        insertion: Some(1),
                        ..BudgetSpec::default()
                    }),
                    SearchElementSpec::Mode { mode: Mode::Best },
                    SearchElementSpec::Output {
                        output: Output::TextPosition,
                    },
                ],
            },
        }
    }

    pub fn to_toml(&self) -> CliResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_file() {
        let file = ElementFile::parse(
            r#"
domain = "search"

[[element]]
kind = "max_error"
substitution = 2
insertion = 1

[[element]]
kind = "mode"
mode = { strata = 1 }
"#,
            "inline",
        )
        .unwrap();

        assert_eq!(file.domain(), Domain::Search);
        assert_eq!(file.len(), 2);
        let ElementFile::Search { elements } = file else {
            panic!("expected a search file");
        };
        assert_eq!(elements[0].kind(), SearchConfigId::MaxError);
        assert_eq!(elements[1], SearchElementSpec::Mode { mode: Mode::Strata(1) });

        let built = elements[0].build().unwrap();
        assert_eq!(
            built.value_of::<search::MaxError>().map(|budget| budget.to_array()),
            Some([3, 2, 1, 0])
        );
    }

    #[test]
    fn test_parse_alignment_file() {
        let file = ElementFile::parse(
            r#"
domain = "alignment"

[[element]]
kind = "global"

[[element]]
kind = "aligned_ends"
leading_first = true
"#,
            "inline",
        )
        .unwrap();

        let ElementFile::Alignment { elements } = file else {
            panic!("expected an alignment file");
        };
        assert_eq!(elements[0], AlignElementSpec::Global);
        let ends = elements[1].build().unwrap();
        let ends = ends.get_as::<AlignedEnds>().unwrap();
        assert!(ends.leading_first);
        assert!(!ends.trailing_second);
    }

    #[test]
    fn test_invalid_rate_fails_to_build() {
        let spec = SearchElementSpec::MaxErrorRate(BudgetSpec {
            total: Some(1.5),
            ..BudgetSpec::default()
        });
        assert!(matches!(
            spec.build(),
            Err(MalformedInputError::RateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_unknown_kind_is_a_parse_error() {
        let err = ElementFile::parse(
            "domain = \"search\"\n[[element]]\nkind = \"band\"\nlower = 1\nupper = 2\n",
            "inline",
        )
        .unwrap_err();
        match err {
            CliError::Parse { file, message } => {
                assert_eq!(file, "inline");
                assert!(message.contains("band"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_examples_round_trip() {
        for domain in [Domain::Alignment, Domain::Search] {
            let example = ElementFile::example(domain);
            let text = example.to_toml().unwrap();
            assert!(text.contains("[[element]]"));
            let parsed = ElementFile::parse(&text, "example").unwrap();
            assert_eq!(parsed, example);
        }
    }
}
