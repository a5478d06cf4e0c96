//! Error budgets: multi-field values split across error categories
//!
//! An error budget holds an aggregate `total` and one limit per category
//! (substitution, insertion, deletion). Callers supply any subset of the
//! fields and [`ErrorBudget::reconcile`] fills in the rest:
//!
//! * only `total` given: every category may use the whole budget, so the
//!   total is copied into each of them;
//! * only categories given: `total` becomes their sum, saturating at the
//!   value type's maximum;
//! * `total` together with categories, or nothing at all: values are taken
//!   as given, explicit values always win.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MalformedInputError;

/// Named sub-field of an error budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorField {
    Total,
    Substitution,
    Insertion,
    Deletion,
}

impl ErrorField {
    pub const ALL: [ErrorField; 4] = [
        ErrorField::Total,
        ErrorField::Substitution,
        ErrorField::Insertion,
        ErrorField::Deletion,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorField::Total => "total",
            ErrorField::Substitution => "substitution",
            ErrorField::Insertion => "insertion",
            ErrorField::Deletion => "deletion",
        }
    }

    pub fn is_aggregate(self) -> bool {
        self == ErrorField::Total
    }
}

impl fmt::Display for ErrorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric type stored in an error budget
pub trait BudgetValue: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Largest representable limit; sums clamp here
    const MAX: Self;

    fn saturating_add(self, other: Self) -> Self;
}

impl BudgetValue for u8 {
    const MAX: Self = u8::MAX;

    fn saturating_add(self, other: Self) -> Self {
        u8::saturating_add(self, other)
    }
}

/// Fraction of a query's length that may be erroneous, in `[0, 1]`
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ErrorRate(f64);

impl ErrorRate {
    pub const ZERO: ErrorRate = ErrorRate(0.0);
    pub const ONE: ErrorRate = ErrorRate(1.0);

    pub fn new(value: f64) -> Result<Self, MalformedInputError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(MalformedInputError::RateOutOfRange { value })
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Absolute error count allowed for a query of `length` symbols
    pub fn count_for(self, length: usize) -> u8 {
        (self.0 * length as f64).floor().min(f64::from(u8::MAX)) as u8
    }
}

impl TryFrom<f64> for ErrorRate {
    type Error = MalformedInputError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ErrorRate> for f64 {
    fn from(rate: ErrorRate) -> Self {
        rate.0
    }
}

impl fmt::Display for ErrorRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl BudgetValue for ErrorRate {
    const MAX: Self = ErrorRate::ONE;

    fn saturating_add(self, other: Self) -> Self {
        ErrorRate((self.0 + other.0).min(1.0))
    }
}

/// One supplied sub-field of an error budget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorCount<T> {
    pub field: ErrorField,
    pub value: T,
}

impl<T: BudgetValue> ErrorCount<T> {
    pub fn new(field: ErrorField, value: T) -> Self {
        Self { field, value }
    }

    pub fn total(value: T) -> Self {
        Self::new(ErrorField::Total, value)
    }

    pub fn substitution(value: T) -> Self {
        Self::new(ErrorField::Substitution, value)
    }

    pub fn insertion(value: T) -> Self {
        Self::new(ErrorField::Insertion, value)
    }

    pub fn deletion(value: T) -> Self {
        Self::new(ErrorField::Deletion, value)
    }
}

/// Reconciled error budget.
///
/// Deserializes from any subset of the four fields through
/// [`ErrorBudget::reconcile`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawBudget<T>",
    bound(deserialize = "T: BudgetValue + Deserialize<'de>")
)]
pub struct ErrorBudget<T> {
    total: T,
    substitution: T,
    insertion: T,
    deletion: T,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBudget<T> {
    total: Option<T>,
    substitution: Option<T>,
    insertion: Option<T>,
    deletion: Option<T>,
}

impl<T: BudgetValue> TryFrom<RawBudget<T>> for ErrorBudget<T> {
    type Error = MalformedInputError;

    fn try_from(raw: RawBudget<T>) -> Result<Self, Self::Error> {
        let supplied: Vec<_> = [
            (ErrorField::Total, raw.total),
            (ErrorField::Substitution, raw.substitution),
            (ErrorField::Insertion, raw.insertion),
            (ErrorField::Deletion, raw.deletion),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| ErrorCount::new(field, value)))
        .collect();
        Self::reconcile(&supplied)
    }
}

impl<T: BudgetValue> ErrorBudget<T> {
    /// Number of sub-fields in the record
    pub const WIDTH: usize = 4;

    /// Build a budget from the supplied fields.
    ///
    /// Fails without producing a budget if more than [`Self::WIDTH`] fields
    /// are given or any field is given twice.
    pub fn reconcile(inputs: &[ErrorCount<T>]) -> Result<Self, MalformedInputError> {
        if inputs.len() > Self::WIDTH {
            return Err(MalformedInputError::TooManyFields {
                given: inputs.len(),
                width: Self::WIDTH,
            });
        }

        let mut seen = [false; 4];
        for input in inputs {
            let slot = &mut seen[input.field.index()];
            if *slot {
                return Err(MalformedInputError::DuplicateField { field: input.field });
            }
            *slot = true;
        }

        let mut budget = Self::default();
        for input in inputs {
            budget.set(input.field, input.value);
        }

        let total_given = seen[ErrorField::Total.index()];
        if total_given && inputs.len() == 1 {
            log::trace!("error budget: broadcasting total {:?}", budget.total);
            budget.substitution = budget.total;
            budget.insertion = budget.total;
            budget.deletion = budget.total;
        } else if !total_given && !inputs.is_empty() {
            budget.total = budget
                .substitution
                .saturating_add(budget.insertion)
                .saturating_add(budget.deletion);
            log::trace!("error budget: derived total {:?} from parts", budget.total);
        }

        Ok(budget)
    }

    /// Same limit for every field
    pub fn uniform(value: T) -> Self {
        Self {
            total: value,
            substitution: value,
            insertion: value,
            deletion: value,
        }
    }

    fn set(&mut self, field: ErrorField, value: T) {
        match field {
            ErrorField::Total => self.total = value,
            ErrorField::Substitution => self.substitution = value,
            ErrorField::Insertion => self.insertion = value,
            ErrorField::Deletion => self.deletion = value,
        }
    }

    pub fn get(&self, field: ErrorField) -> T {
        match field {
            ErrorField::Total => self.total,
            ErrorField::Substitution => self.substitution,
            ErrorField::Insertion => self.insertion,
            ErrorField::Deletion => self.deletion,
        }
    }

    pub fn total(&self) -> T {
        self.total
    }

    pub fn substitution(&self) -> T {
        self.substitution
    }

    pub fn insertion(&self) -> T {
        self.insertion
    }

    pub fn deletion(&self) -> T {
        self.deletion
    }

    /// Values in field order: total, substitution, insertion, deletion
    pub fn to_array(&self) -> [T; 4] {
        [self.total, self.substitution, self.insertion, self.deletion]
    }

    pub fn map<U: BudgetValue>(&self, mut f: impl FnMut(T) -> U) -> ErrorBudget<U> {
        ErrorBudget {
            total: f(self.total),
            substitution: f(self.substitution),
            insertion: f(self.insertion),
            deletion: f(self.deletion),
        }
    }
}
