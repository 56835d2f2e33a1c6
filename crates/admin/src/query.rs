//! Query predicates and their in-memory evaluation.
//!
//! Filters compile to [`Predicate`] values - plain, serializable data an
//! external ORM can translate into `where`/`whereDate`/`whereColumn`
//! clauses. The same predicates evaluate directly against records through
//! [`FieldAccess`], which is what widgets, navigation badges, and the test
//! suite run on.
//!
//! Evaluation is null-safe throughout: a record without a value for a
//! predicate's column simply does not match. Nothing in here fails.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single typed value read from a record column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Decimal(Decimal),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Bool(bool),
}

impl FieldValue {
    /// The calendar date of this value, if it has one.
    ///
    /// Timestamps compare by their UTC date, matching `whereDate` semantics.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::DateTime(dt) => Some(dt.date_naive()),
            _ => None,
        }
    }

    /// Numeric view of this value, if it has one.
    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            Self::Int(i) => Some(Decimal::from(*i)),
            _ => None,
        }
    }

    /// Boolean view of this value, if it has one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String view of this value, if it is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Column access for in-memory predicate evaluation.
///
/// Each record type exposes the columns its table, filters, and widgets
/// reference. Unknown columns return `None`.
pub trait FieldAccess {
    /// The value of `column` on this record, if present.
    fn field(&self, column: &str) -> Option<FieldValue>;
}

/// Soft-delete state, for record types that keep trashed rows around.
pub trait SoftDeletes {
    /// When the record was soft-deleted, if it was.
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    /// Whether the record is currently trashed.
    fn is_trashed(&self) -> bool {
        self.deleted_at().is_some()
    }
}

/// A single query predicate contributed by a filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    /// `whereDate(column, ">=", date)`
    DateOnOrAfter { column: String, date: NaiveDate },
    /// `whereDate(column, "<=", date)`
    DateOnOrBefore { column: String, date: NaiveDate },
    /// `where(column, "=", value)`
    Equals { column: String, value: FieldValue },
    /// `whereIn(column, values)`
    OneOf { column: String, values: Vec<FieldValue> },
    /// `where(column, true)`
    IsTrue { column: String },
    /// `where(column, false)`
    IsFalse { column: String },
    /// `whereColumn(left, "<", right)`
    ColumnLessThanColumn { left: String, right: String },
}

impl Predicate {
    /// Whether `record` satisfies this predicate.
    #[must_use]
    pub fn matches<R: FieldAccess>(&self, record: &R) -> bool {
        match self {
            Self::DateOnOrAfter { column, date } => record
                .field(column)
                .and_then(|v| v.as_date())
                .is_some_and(|d| d >= *date),
            Self::DateOnOrBefore { column, date } => record
                .field(column)
                .and_then(|v| v.as_date())
                .is_some_and(|d| d <= *date),
            Self::Equals { column, value } => {
                record.field(column).is_some_and(|v| v == *value)
            }
            Self::OneOf { column, values } => record
                .field(column)
                .is_some_and(|v| values.contains(&v)),
            Self::IsTrue { column } => record
                .field(column)
                .and_then(|v| v.as_bool())
                .is_some_and(|b| b),
            Self::IsFalse { column } => record
                .field(column)
                .and_then(|v| v.as_bool())
                .is_some_and(|b| !b),
            Self::ColumnLessThanColumn { left, right } => {
                let left = record.field(left).and_then(|v| v.as_decimal());
                let right = record.field(right).and_then(|v| v.as_decimal());
                matches!((left, right), (Some(l), Some(r)) if l < r)
            }
        }
    }
}

/// Soft-delete scope applied before any filter predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrashedScope {
    /// Hide trashed records (the default listing).
    #[default]
    ExcludeTrashed,
    /// Show both live and trashed records.
    WithTrashed,
    /// Show only trashed records.
    OnlyTrashed,
}

impl TrashedScope {
    /// Whether the scope admits `record`.
    pub fn admits<R: SoftDeletes>(self, record: &R) -> bool {
        match self {
            Self::ExcludeTrashed => !record.is_trashed(),
            Self::WithTrashed => true,
            Self::OnlyTrashed => record.is_trashed(),
        }
    }
}

/// An accumulated query: a trashed scope plus filter predicates.
///
/// `applyFilter` semantics: each filter contributes zero or more
/// predicates; filters with absent input contribute nothing, so an empty
/// filter panel yields the unconstrained query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Query {
    /// Soft-delete scope (ignored for record types without soft deletes).
    pub trashed: TrashedScope,
    /// Conjunction of filter predicates.
    pub predicates: Vec<Predicate>,
}

impl Query {
    /// An unconstrained query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate.
    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    /// Whether `record` satisfies every predicate (trashed scope ignored).
    pub fn matches<R: FieldAccess>(&self, record: &R) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }

    /// Filter a record slice by the predicates.
    pub fn filter<'a, R: FieldAccess>(&self, records: &'a [R]) -> Vec<&'a R> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }

    /// Filter a soft-deletable record slice by trashed scope + predicates.
    pub fn filter_soft_deletable<'a, R: FieldAccess + SoftDeletes>(
        &self,
        records: &'a [R],
    ) -> Vec<&'a R> {
        records
            .iter()
            .filter(|r| self.trashed.admits(*r) && self.matches(*r))
            .collect()
    }
}

/// Sum a numeric column over records; non-numeric and missing values are skipped.
pub fn sum_column<'a, R: FieldAccess + 'a>(
    records: impl IntoIterator<Item = &'a R>,
    column: &str,
) -> Decimal {
    records
        .into_iter()
        .filter_map(|r| r.field(column).and_then(|v| v.as_decimal()))
        .sum()
}

/// Average of a numeric column over records with a value for it.
pub fn avg_column<'a, R: FieldAccess + 'a>(
    records: impl IntoIterator<Item = &'a R>,
    column: &str,
) -> Option<Decimal> {
    let values: Vec<Decimal> = records
        .into_iter()
        .filter_map(|r| r.field(column).and_then(|v| v.as_decimal()))
        .collect();

    if values.is_empty() {
        return None;
    }

    let count = Decimal::from(values.len());
    Some(values.iter().sum::<Decimal>() / count)
}
