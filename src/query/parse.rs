use log::{debug, warn};
use regex::Regex;
use std::sync::LazyLock;

use super::operators::Operator;
use super::types::{Filter, Logic};
use crate::errors::FilterError;

// FIELD OPERATOR VALUE [COMBINATOR]; operator runs are validated against the registry.
static FILTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9_]+)([=!<>~$@]+)([A-Za-z0-9_@.\-]+(?:[ \t]+[A-Za-z0-9_@.\-]+)*)([,;])?")
        .expect("filter grammar regex")
});

/// Parses a filter string such as `sport===football;email===a@b.com` into filters.
///
/// Input that matches nothing yields an empty vector. A trailing combinator on the
/// final filter is dropped. A filter followed by another one but carrying no
/// combinator of its own (`a==1 ;b==2`, `a==1&b==2`) is joined with AND.
///
/// # Errors
/// Returns `FilterError::Parse` naming the first operator token outside the closed set.
pub fn parse_filter_string(fstr: &str) -> Result<Vec<Filter>, FilterError> {
    let mut filters = Vec::new();
    for caps in FILTER_RE.captures_iter(fstr) {
        let token = &caps[2];
        let Some(op) = Operator::from_token(token) else {
            warn!("rejecting filter operator {token}");
            return Err(FilterError::Parse(token.to_string()));
        };
        let logic = caps.get(4).and_then(|m| m.as_str().chars().next()).and_then(Logic::from_marker);
        filters.push(Filter::from_parts(caps[1].to_string(), op, caps[3].to_string(), logic));
    }
    let count = filters.len();
    for f in filters.iter_mut().take(count.saturating_sub(1)) {
        if f.logic().is_none() {
            warn!("no combinator after {f}, joining with AND");
            f.set_logic(Logic::And);
        }
    }
    if let Some(last) = filters.pop() {
        if last.logic().is_some() {
            warn!("discarding trailing combinator on {last}");
        }
        filters.push(last.without_logic());
    }
    debug!("parsed {} filter(s)", filters.len());
    Ok(filters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_values_with_spaces() {
        let fls = parse_filter_string("ontology!~dicty annotation;tag=~logicx").unwrap();
        assert_eq!(fls.len(), 2);
        assert_eq!(fls[0].value(), "dicty annotation");
        assert_eq!(fls[0].operator(), Operator::NotMatch);
        assert_eq!(fls[0].logic(), Some(Logic::And));
        assert_eq!(fls[1].value(), "logicx");
        assert_eq!(fls[1].logic(), None);
    }

    #[test]
    fn unknown_operator_aborts() {
        let err = parse_filter_string("a==1;b!==2").unwrap_err();
        assert!(matches!(err, FilterError::Parse(ref t) if t == "!=="));
    }

    #[test]
    fn no_match_is_empty() {
        assert!(parse_filter_string("xyz").unwrap().is_empty());
        assert!(parse_filter_string("").unwrap().is_empty());
    }

    #[test]
    fn trailing_combinator_is_dropped() {
        let fls = parse_filter_string("a==1;b==2,").unwrap();
        assert_eq!(fls[0].logic(), Some(Logic::And));
        assert_eq!(fls[1].logic(), None);
    }

    #[test]
    fn missing_combinator_defaults_to_and() {
        for input in ["a==1 ;b==2", "a==1&b==2", "a==1 ,b==2;c==3"] {
            let fls = parse_filter_string(input).unwrap();
            assert!(fls.len() >= 2, "{input}");
            assert_eq!(fls[0].logic(), Some(Logic::And), "{input}");
            assert_eq!(fls.last().unwrap().logic(), None, "{input}");
        }
    }

    #[test]
    fn dates_keep_their_dashes() {
        let fls = parse_filter_string("created_at$>=2020-01-31").unwrap();
        assert_eq!(fls[0].operator(), Operator::DateGte);
        assert_eq!(fls[0].value(), "2020-01-31");
    }
}
