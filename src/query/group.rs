//! Parenthesization of a flat AND/OR term sequence.
//!
//! AQL binds `AND` tighter than `OR`, so every maximal run of `OR`-joined terms is
//! wrapped in one group. `AND`-joined terms outside such runs stay bare.

use super::compile::Term;
use super::types::Logic;

/// Expression tokens: terms, `(`, `)`, `AND`, `OR`. Every pair of adjacent terms is
/// separated by exactly one joiner.
#[must_use]
pub fn group_terms(terms: &[Term]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(terms.len() * 2 + 2);
    let mut open = false;
    let mut last_joiner: Option<Logic> = None;
    let last = terms.len().saturating_sub(1);
    for (i, term) in terms.iter().enumerate() {
        out.push(term.text.clone());
        // A non-final term without a combinator is joined with AND.
        let logic = if i == last { None } else { Some(term.logic.unwrap_or(Logic::And)) };
        match logic {
            None => {
                if open {
                    out.push(")".into());
                    open = false;
                }
            }
            Some(Logic::Or) => {
                if !open {
                    out.insert(out.len() - 1, "(".into());
                    open = true;
                }
                out.push(Logic::Or.keyword().into());
                last_joiner = Some(Logic::Or);
            }
            Some(Logic::And) => {
                if open && last_joiner == Some(Logic::Or) {
                    out.push(")".into());
                    open = false;
                }
                out.push(Logic::And.keyword().into());
                last_joiner = Some(Logic::And);
            }
        }
    }
    out
}

/// [`group_terms`] joined with single spaces.
#[must_use]
pub fn grouped_expression(terms: &[Term]) -> String {
    group_terms(terms).join(" ")
}
