//! Per-level filter predicates.
//!
//! A [`LevelFilter`] is the conjunction of its [`Criterion`]s; a multi-valued criterion
//! ([`CriterionKind::AnyOf`]) matches when the field equals any selected value. Filters are
//! validated against the level table before they are applied, so an empty selection or a
//! malformed number never reaches propagation.
use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::table::Table;
use crate::value::Value;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CriterionKind {
    /// Inclusive numeric range; a missing bound is open.
    Range { min: Option<f64>, max: Option<f64> },
    /// Category membership.
    AnyOf { values: Vec<Value> },
    /// Minimum-count threshold.
    AtLeast { threshold: f64 },
    Flag { value: bool },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub field: String,
    #[serde(flatten)]
    pub kind: CriterionKind,
}

impl Criterion {
    pub fn range(field: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            field: field.into(),
            kind: CriterionKind::Range { min, max },
        }
    }

    pub fn any_of(field: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            field: field.into(),
            kind: CriterionKind::AnyOf {
                values: values.into_iter().collect(),
            },
        }
    }

    pub fn at_least(field: impl Into<String>, threshold: f64) -> Self {
        Self {
            field: field.into(),
            kind: CriterionKind::AtLeast { threshold },
        }
    }

    pub fn flag(field: impl Into<String>, value: bool) -> Self {
        Self {
            field: field.into(),
            kind: CriterionKind::Flag { value },
        }
    }

    /// Builds a range from form text. Blank text leaves that side of the range open.
    pub fn range_from_input(
        field: impl Into<String>,
        min: &str,
        max: &str,
    ) -> Result<Self, FilterError> {
        let field = field.into();
        let min = parse_bound(&field, min)?;
        let max = parse_bound(&field, max)?;
        Ok(Self::range(field, min, max))
    }

    pub fn at_least_from_input(field: impl Into<String>, input: &str) -> Result<Self, FilterError> {
        let field = field.into();
        match parse_bound(&field, input)? {
            Some(threshold) => Ok(Self::at_least(field, threshold)),
            None => Err(FilterError::InvalidNumber {
                field,
                input: input.to_string(),
            }),
        }
    }

    fn validate(&self, table: &Table) -> Result<(), FilterError> {
        if !table.has_column(&self.field) {
            return Err(FilterError::UnknownField {
                table: table.name().to_string(),
                field: self.field.clone(),
            });
        }

        let check_finite = |n: f64| {
            if n.is_finite() {
                Ok(())
            } else {
                Err(FilterError::InvalidNumber {
                    field: self.field.clone(),
                    input: n.to_string(),
                })
            }
        };

        match &self.kind {
            CriterionKind::AnyOf { values } if values.is_empty() => {
                Err(FilterError::EmptySelection {
                    field: self.field.clone(),
                })
            }
            CriterionKind::AnyOf { .. } | CriterionKind::Flag { .. } => Ok(()),
            CriterionKind::AtLeast { threshold } => check_finite(*threshold),
            CriterionKind::Range { min, max } => {
                min.map(check_finite).transpose()?;
                max.map(check_finite).transpose()?;
                match (min, max) {
                    (Some(min), Some(max)) if min > max => Err(FilterError::InvertedRange {
                        field: self.field.clone(),
                        min: *min,
                        max: *max,
                    }),
                    _ => Ok(()),
                }
            }
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match &self.kind {
            CriterionKind::Range { min, max } => value.as_f64().is_some_and(|n| {
                min.map_or(true, |min| n >= min) && max.map_or(true, |max| n <= max)
            }),
            CriterionKind::AnyOf { values } => values.contains(value),
            CriterionKind::AtLeast { threshold } => {
                value.as_f64().is_some_and(|n| n >= *threshold)
            }
            CriterionKind::Flag { value: flag } => value.as_bool() == Some(*flag),
        }
    }
}

fn parse_bound(field: &str, input: &str) -> Result<Option<f64>, FilterError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(FilterError::InvalidNumber {
            field: field.to_string(),
            input: input.to_string(),
        }),
    }
}

/// The user's criteria for one level. Criteria are ANDed; no criteria matches every row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelFilter {
    pub criteria: Vec<Criterion>,
}

impl LevelFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn validate(&self, table: &Table) -> Result<(), FilterError> {
        self.criteria
            .iter()
            .try_for_each(|criterion| criterion.validate(table))
    }

    /// Validates, then returns the rows of `table` satisfying every criterion, in table order.
    pub fn apply(&self, table: &Table) -> Result<Vec<usize>, FilterError> {
        self.validate(table)?;

        let resolved: Vec<(usize, &Criterion)> = self
            .criteria
            .iter()
            .filter_map(|c| table.column_idx(&c.field).map(|idx| (idx, c)))
            .collect();

        Ok((0..table.row_count())
            .filter(|&row| {
                resolved
                    .iter()
                    .all(|(idx, criterion)| criterion.matches(table.value_by_idx(row, *idx)))
            })
            .collect())
    }
}
