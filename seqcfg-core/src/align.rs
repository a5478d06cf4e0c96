//! Alignment configuration domain
//!
//! Options for pairwise sequence alignment. Every pair of distinct kinds may
//! be combined; only duplicates are rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::configuration::Configuration;
use crate::element::ConfigElement;
use crate::error::{ConfigError, MalformedInputError};
use crate::kind::ElementKind;
use crate::table::CompatibilityTable;

/// Kinds of the alignment domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum AlignConfigId {
    AlignedEnds,
    Band,
    Gap,
    Global,
    MaxError,
    Result,
    Scoring,
}

static ALIGN_KINDS: [AlignConfigId; 7] = [
    AlignConfigId::AlignedEnds,
    AlignConfigId::Band,
    AlignConfigId::Gap,
    AlignConfigId::Global,
    AlignConfigId::MaxError,
    AlignConfigId::Result,
    AlignConfigId::Scoring,
];

pub static ALIGN_COMPATIBILITY: CompatibilityTable = CompatibilityTable::new(&[
    //0  1  2  3  4  5  6
    &[0, 1, 1, 1, 1, 1, 1], // 0: aligned_ends
    &[1, 0, 1, 1, 1, 1, 1], // 1: band
    &[1, 1, 0, 1, 1, 1, 1], // 2: gap
    &[1, 1, 1, 0, 1, 1, 1], // 3: global
    &[1, 1, 1, 1, 0, 1, 1], // 4: max_error
    &[1, 1, 1, 1, 1, 0, 1], // 5: result
    &[1, 1, 1, 1, 1, 1, 0], // 6: scoring
]);

impl ElementKind for AlignConfigId {
    const DOMAIN: &'static str = "alignment";
    const SIZE: usize = 7;

    fn all() -> &'static [Self] {
        &ALIGN_KINDS
    }

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            AlignConfigId::AlignedEnds => "aligned_ends",
            AlignConfigId::Band => "band",
            AlignConfigId::Gap => "gap",
            AlignConfigId::Global => "global",
            AlignConfigId::MaxError => "max_error",
            AlignConfigId::Result => "result",
            AlignConfigId::Scoring => "scoring",
        }
    }

    fn compatibility_table() -> &'static CompatibilityTable {
        &ALIGN_COMPATIBILITY
    }
}

impl fmt::Display for AlignConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which sequence ends may carry gaps without penalty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedEnds {
    pub leading_first: bool,
    pub trailing_first: bool,
    pub leading_second: bool,
    pub trailing_second: bool,
}

impl AlignedEnds {
    pub fn free_ends_none() -> Self {
        Self::default()
    }

    pub fn free_ends_all() -> Self {
        Self {
            leading_first: true,
            trailing_first: true,
            leading_second: true,
            trailing_second: true,
        }
    }

    /// Overlaps of the first sequence are free
    pub fn free_ends_first() -> Self {
        Self {
            leading_first: true,
            trailing_first: true,
            ..Self::default()
        }
    }

    pub fn free_ends_second() -> Self {
        Self {
            leading_second: true,
            trailing_second: true,
            ..Self::default()
        }
    }
}

impl ConfigElement for AlignedEnds {
    type Kind = AlignConfigId;
    type Value = AlignedEnds;

    fn kind(&self) -> AlignConfigId {
        AlignConfigId::AlignedEnds
    }

    fn value(&self) -> &AlignedEnds {
        self
    }
}

/// Diagonal band restricting the alignment matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBand")]
pub struct Band {
    lower_diagonal: i32,
    upper_diagonal: i32,
}

impl Band {
    pub fn new(lower_diagonal: i32, upper_diagonal: i32) -> Result<Self, MalformedInputError> {
        if lower_diagonal > upper_diagonal {
            return Err(MalformedInputError::invalid_value(
                "band",
                format!(
                    "lower diagonal {} lies above upper diagonal {}",
                    lower_diagonal, upper_diagonal
                ),
            ));
        }
        Ok(Self {
            lower_diagonal,
            upper_diagonal,
        })
    }

    pub fn lower_diagonal(&self) -> i32 {
        self.lower_diagonal
    }

    pub fn upper_diagonal(&self) -> i32 {
        self.upper_diagonal
    }

    pub fn width(&self) -> u32 {
        self.upper_diagonal.abs_diff(self.lower_diagonal) + 1
    }
}

#[derive(Deserialize)]
struct RawBand {
    lower_diagonal: i32,
    upper_diagonal: i32,
}

impl TryFrom<RawBand> for Band {
    type Error = MalformedInputError;

    fn try_from(raw: RawBand) -> Result<Self, Self::Error> {
        Self::new(raw.lower_diagonal, raw.upper_diagonal)
    }
}

impl ConfigElement for Band {
    type Kind = AlignConfigId;
    type Value = Band;

    fn kind(&self) -> AlignConfigId {
        AlignConfigId::Band
    }

    fn value(&self) -> &Band {
        self
    }
}

/// Affine gap scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGap")]
pub struct Gap {
    open: i32,
    extension: i32,
}

impl Gap {
    pub fn new(open: i32, extension: i32) -> Result<Self, MalformedInputError> {
        if open > 0 || extension > 0 {
            return Err(MalformedInputError::invalid_value(
                "gap",
                format!("gap scores must not be positive (open {}, extension {})", open, extension),
            ));
        }
        Ok(Self { open, extension })
    }

    pub fn open(&self) -> i32 {
        self.open
    }

    pub fn extension(&self) -> i32 {
        self.extension
    }

    /// Score of a gap of `length` positions
    pub fn score(&self, length: u32) -> i64 {
        if length == 0 {
            return 0;
        }
        i64::from(self.open) + i64::from(self.extension) * i64::from(length)
    }
}

impl Default for Gap {
    fn default() -> Self {
        Self {
            open: -10,
            extension: -1,
        }
    }
}

#[derive(Deserialize)]
struct RawGap {
    open: i32,
    extension: i32,
}

impl TryFrom<RawGap> for Gap {
    type Error = MalformedInputError;

    fn try_from(raw: RawGap) -> Result<Self, Self::Error> {
        Self::new(raw.open, raw.extension)
    }
}

impl ConfigElement for Gap {
    type Kind = AlignConfigId;
    type Value = Gap;

    fn kind(&self) -> AlignConfigId {
        AlignConfigId::Gap
    }

    fn value(&self) -> &Gap {
        self
    }
}

/// Marker selecting global alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalAlignment;

impl ConfigElement for GlobalAlignment {
    type Kind = AlignConfigId;
    type Value = GlobalAlignment;

    fn kind(&self) -> AlignConfigId {
        AlignConfigId::Global
    }

    fn value(&self) -> &GlobalAlignment {
        self
    }
}

/// Upper bound on the edit distance of reported alignments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxError(u32);

impl MaxError {
    pub fn new(errors: u32) -> Self {
        Self(errors)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl ConfigElement for MaxError {
    type Kind = AlignConfigId;
    type Value = u32;

    fn kind(&self) -> AlignConfigId {
        AlignConfigId::MaxError
    }

    fn value(&self) -> &u32 {
        &self.0
    }
}

/// How much of the alignment is computed and returned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSelection {
    #[default]
    Score,
    EndPosition,
    BeginPosition,
    Alignment,
}

impl ConfigElement for ResultSelection {
    type Kind = AlignConfigId;
    type Value = ResultSelection;

    fn kind(&self) -> AlignConfigId {
        AlignConfigId::Result
    }

    fn value(&self) -> &ResultSelection {
        self
    }
}

/// Simple match/mismatch scoring scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScoring")]
pub struct Scoring {
    match_score: i32,
    mismatch_score: i32,
}

impl Scoring {
    pub fn new(match_score: i32, mismatch_score: i32) -> Result<Self, MalformedInputError> {
        if mismatch_score > match_score {
            return Err(MalformedInputError::invalid_value(
                "scoring",
                format!(
                    "mismatch score {} exceeds match score {}",
                    mismatch_score, match_score
                ),
            ));
        }
        Ok(Self {
            match_score,
            mismatch_score,
        })
    }

    pub fn match_score(&self) -> i32 {
        self.match_score
    }

    pub fn mismatch_score(&self) -> i32 {
        self.mismatch_score
    }

    pub fn score(&self, a: u8, b: u8) -> i32 {
        if a.eq_ignore_ascii_case(&b) {
            self.match_score
        } else {
            self.mismatch_score
        }
    }
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            match_score: 0,
            mismatch_score: -1,
        }
    }
}

#[derive(Deserialize)]
struct RawScoring {
    match_score: i32,
    mismatch_score: i32,
}

impl TryFrom<RawScoring> for Scoring {
    type Error = MalformedInputError;

    fn try_from(raw: RawScoring) -> Result<Self, Self::Error> {
        Self::new(raw.match_score, raw.mismatch_score)
    }
}

impl ConfigElement for Scoring {
    type Kind = AlignConfigId;
    type Value = Scoring;

    fn kind(&self) -> AlignConfigId {
        AlignConfigId::Scoring
    }

    fn value(&self) -> &Scoring {
        self
    }
}

/// Alignment parameters with defaults filled in for absent kinds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AlignmentSettings {
    pub aligned_ends: AlignedEnds,
    pub band: Option<Band>,
    pub gap: Gap,
    pub global: bool,
    pub max_error: Option<u32>,
    pub result: ResultSelection,
    pub scoring: Scoring,
}

impl AlignmentSettings {
    /// Read every kind out of `config`, falling back to defaults for absent ones.
    ///
    /// Fails if a present kind holds a value of an unexpected type.
    pub fn resolve(
        config: &Configuration<AlignConfigId>,
    ) -> Result<Self, ConfigError<AlignConfigId>> {
        debug_assert!(config.validate().is_ok());

        let defaults = Self::default();
        Ok(Self {
            aligned_ends: config
                .typed::<AlignedEnds>(AlignConfigId::AlignedEnds)?
                .copied()
                .unwrap_or(defaults.aligned_ends),
            band: config.typed::<Band>(AlignConfigId::Band)?.copied(),
            gap: config
                .typed::<Gap>(AlignConfigId::Gap)?
                .copied()
                .unwrap_or(defaults.gap),
            global: config
                .typed::<GlobalAlignment>(AlignConfigId::Global)?
                .is_some(),
            max_error: config
                .typed::<MaxError>(AlignConfigId::MaxError)?
                .map(MaxError::get),
            result: config
                .typed::<ResultSelection>(AlignConfigId::Result)?
                .copied()
                .unwrap_or(defaults.result),
            scoring: config
                .typed::<Scoring>(AlignConfigId::Scoring)?
                .copied()
                .unwrap_or(defaults.scoring),
        })
    }
}
