//! Closed operator set of the filter language.
//!
//! Every token belongs to exactly one [`Category`]: plain comparisons, `$`-prefixed
//! date comparisons, or `@`-prefixed list membership tests.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Generic,
    Date,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    StrictEq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,
    Match,
    NotMatch,
    DateEq,
    DateLt,
    DateGt,
    DateLte,
    DateGte,
    ArrayEq,
    ArrayNe,
    ArrayMatch,
}

pub(crate) const ALL: [Operator; 17] = [
    Operator::Eq,
    Operator::StrictEq,
    Operator::Ne,
    Operator::Lt,
    Operator::Gt,
    Operator::Lte,
    Operator::Gte,
    Operator::Match,
    Operator::NotMatch,
    Operator::DateEq,
    Operator::DateLt,
    Operator::DateGt,
    Operator::DateLte,
    Operator::DateGte,
    Operator::ArrayEq,
    Operator::ArrayNe,
    Operator::ArrayMatch,
];

impl Operator {
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        ALL.into_iter().find(|op| op.token() == token)
    }

    /// Spelling in the filter language.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::StrictEq => "===",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Lte => "<=",
            Self::Gte => ">=",
            Self::Match => "=~",
            Self::NotMatch => "!~",
            Self::DateEq => "$==",
            Self::DateLt => "$<",
            Self::DateGt => "$>",
            Self::DateLte => "$<=",
            Self::DateGte => "$>=",
            Self::ArrayEq => "@==",
            Self::ArrayNe => "@!=",
            Self::ArrayMatch => "@=~",
        }
    }

    /// AQL operator the token compiles to.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq | Self::StrictEq | Self::DateEq | Self::ArrayEq => "==",
            Self::Ne | Self::ArrayNe => "!=",
            Self::Lt | Self::DateLt => "<",
            Self::Gt | Self::DateGt => ">",
            Self::Lte | Self::DateLte => "<=",
            Self::Gte | Self::DateGte => ">=",
            Self::Match | Self::ArrayMatch => "=~",
            Self::NotMatch => "!~",
        }
    }

    #[must_use]
    pub fn category(self) -> Category {
        match self {
            Self::DateEq | Self::DateLt | Self::DateGt | Self::DateLte | Self::DateGte => {
                Category::Date
            }
            Self::ArrayEq | Self::ArrayNe | Self::ArrayMatch => Category::Array,
            _ => Category::Generic,
        }
    }

    /// `<`, `>`, `<=`, `>=` in any category.
    #[must_use]
    pub fn is_relational(self) -> bool {
        matches!(self.symbol(), "<" | ">" | "<=" | ">=")
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.token())
    }
}

#[must_use]
pub fn has_operator(token: &str) -> bool {
    Operator::from_token(token).is_some()
}

#[must_use]
pub fn has_date_operator(token: &str) -> bool {
    category_of(token) == Some(Category::Date)
}

#[must_use]
pub fn has_array_operator(token: &str) -> bool {
    category_of(token) == Some(Category::Array)
}

#[must_use]
pub fn category_of(token: &str) -> Option<Category> {
    Operator::from_token(token).map(Operator::category)
}

#[must_use]
pub fn operator_symbol(token: &str) -> Option<&'static str> {
    Operator::from_token(token).map(Operator::symbol)
}

/// The closed operator set in registry order.
#[must_use]
pub fn all_operators() -> &'static [Operator] {
    &ALL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip_and_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for op in all_operators() {
            assert!(seen.insert(op.token()), "duplicate token {}", op.token());
            assert_eq!(Operator::from_token(op.token()), Some(*op));
        }
    }

    #[test]
    fn categories_are_disjoint() {
        assert!(has_date_operator("$>="));
        assert!(!has_array_operator("$>="));
        assert!(has_array_operator("@!="));
        assert!(!has_date_operator("@!="));
        assert_eq!(category_of("=~"), Some(Category::Generic));
        assert_eq!(category_of("@!~"), None);
        assert!(!has_operator("!=="));
    }

    #[test]
    fn emphasized_equals_maps_to_plain_equals() {
        assert_eq!(operator_symbol("==="), Some("=="));
        assert_eq!(operator_symbol("=="), Some("=="));
        assert_eq!(operator_symbol("$<="), Some("<="));
        assert_eq!(operator_symbol("@=~"), Some("=~"));
    }

    #[test]
    fn relational_detection() {
        assert!(Operator::Gte.is_relational());
        assert!(Operator::DateLt.is_relational());
        assert!(!Operator::StrictEq.is_relational());
        assert!(!Operator::NotMatch.is_relational());
    }
}
