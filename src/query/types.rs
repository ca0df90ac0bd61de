use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::operators::Operator;
use crate::errors::FilterError;

/// Trailing combinator that joins a filter to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Logic {
    Or,
    And,
}

impl Logic {
    #[must_use]
    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            ',' => Some(Self::Or),
            ';' => Some(Self::And),
            _ => None,
        }
    }

    #[must_use]
    pub fn marker(self) -> char {
        match self {
            Self::Or => ',',
            Self::And => ';',
        }
    }

    /// AQL joiner keyword.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Or => "OR",
            Self::And => "AND",
        }
    }
}

/// A single parsed condition. Only constructible with a registered operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
    field: String,
    operator: Operator,
    value: String,
    logic: Option<Logic>,
}

impl Filter {
    /// # Errors
    /// Returns `FilterError::Parse` if `operator` is not in the closed operator set.
    pub fn new(
        field: impl Into<String>,
        operator: &str,
        value: impl Into<String>,
        logic: Option<Logic>,
    ) -> Result<Self, FilterError> {
        let op = Operator::from_token(operator)
            .ok_or_else(|| FilterError::Parse(operator.to_string()))?;
        Ok(Self::from_parts(field.into(), op, value.into(), logic))
    }

    pub(crate) fn from_parts(
        field: String,
        operator: Operator,
        value: String,
        logic: Option<Logic>,
    ) -> Self {
        Self { field, operator, value, logic }
    }

    pub(crate) fn set_logic(&mut self, logic: Logic) {
        self.logic = Some(logic);
    }

    pub(crate) fn without_logic(mut self) -> Self {
        self.logic = None;
        self
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn logic(&self) -> Option<Logic> {
        self.logic
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, self.operator.token(), self.value)?;
        if let Some(l) = self.logic {
            write!(f, "{}", l.marker())?;
        }
        Ok(())
    }
}

/// Logical field name to physical path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(HashMap<String, String>);

impl FieldMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, path: impl Into<String>) -> Option<String> {
        self.0.insert(field.into(), path.into())
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Mapped physical paths, in no particular order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }

    /// Adds entries from `other` whose keys are not present yet.
    pub fn merge_missing(&mut self, other: &Self) {
        for (k, v) in &other.0 {
            self.0.entry(k.clone()).or_insert_with(|| v.clone());
        }
    }

    /// Every distinct field of `filters` that has no mapping, sorted.
    #[must_use]
    pub fn missing_fields(&self, filters: &[Filter]) -> Vec<String> {
        let mut missing: Vec<String> = filters
            .iter()
            .map(Filter::field)
            .filter(|f| !self.contains(f))
            .map(str::to_string)
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Inputs for the loop-variable-relative compiling mode.
#[derive(Debug, Clone)]
pub struct StatementParameters {
    pub fmap: FieldMap,
    pub filters: Vec<Filter>,
    /// Document loop variable, e.g. `doc`.
    pub doc: String,
    /// Vertex loop variable; overrides `doc` as the path prefix when set.
    pub vert: Option<String>,
}

impl StatementParameters {
    #[must_use]
    pub fn loop_variable(&self) -> &str {
        self.vert.as_deref().unwrap_or(&self.doc)
    }
}
