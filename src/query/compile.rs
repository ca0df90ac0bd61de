use log::{trace, warn};
use std::collections::{HashSet, VecDeque};

use super::ident::IdentGenerator;
use super::operators::{Category, Operator};
use super::render::{quote, render_value};
use super::types::{FieldMap, Filter, Logic};
use crate::errors::FilterError;

/// How a mapped field becomes an attribute path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode<'a> {
    /// The field map already holds complete paths.
    Qualified,
    /// Paths are `<loop variable>.<mapped field>`.
    Relative(&'a str),
}

/// One boolean condition plus the combinator that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub text: String,
    pub logic: Option<Logic>,
}

/// Output of [`ClauseCompiler::compile`]: `LET` bindings and boolean terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Streams {
    /// Newest array binding first.
    pub bindings: VecDeque<String>,
    /// In filter order.
    pub terms: Vec<Term>,
}

/// Draws per compile before giving up on a generator that keeps repeating itself.
pub const MAX_IDENT_DRAWS: usize = 64;

pub struct ClauseCompiler<'a, G: IdentGenerator + ?Sized> {
    fmap: &'a FieldMap,
    mode: PathMode<'a>,
    idents: &'a mut G,
    issued: HashSet<String>,
}

impl<'a, G: IdentGenerator + ?Sized> ClauseCompiler<'a, G> {
    pub fn new(fmap: &'a FieldMap, mode: PathMode<'a>, idents: &'a mut G) -> Self {
        // Binding names must not shadow the loop variable or a path root.
        let issued = match mode {
            PathMode::Relative(var) => HashSet::from([var.to_string()]),
            PathMode::Qualified => fmap.paths().map(|p| path_root(p).to_string()).collect(),
        };
        Self { fmap, mode, idents, issued }
    }

    /// Compiles every filter or none.
    ///
    /// # Errors
    /// `FilterError::Validation` listing all unmapped fields, checked before anything is
    /// emitted, `FilterError::DateFormat` for the first invalid date value, or
    /// `FilterError::InvalidArgument` when the generator yields no unused name within
    /// [`MAX_IDENT_DRAWS`] draws.
    pub fn compile(&mut self, filters: &[Filter]) -> Result<Streams, FilterError> {
        let missing = self.fmap.missing_fields(filters);
        if !missing.is_empty() {
            warn!("unmapped filter fields: {}", missing.join(", "));
            return Err(FilterError::Validation(missing));
        }
        let mut streams = Streams::default();
        for f in filters {
            let path = self.path_for(f.field())?;
            let op = f.operator();
            let text = match op.category() {
                Category::Generic | Category::Date => {
                    format!("{path} {} {}", op.symbol(), render_value(op, f.value())?)
                }
                Category::Array => {
                    let id = self.fresh_ident()?;
                    let value = render_value(op, f.value())?;
                    streams.bindings.push_front(array_binding(&id, op, &path, &value));
                    format!("LENGTH({id}) > 0")
                }
            };
            streams.terms.push(Term { text, logic: f.logic() });
        }
        Ok(streams)
    }

    fn path_for(&self, field: &str) -> Result<String, FilterError> {
        let mapped = self
            .fmap
            .get(field)
            .ok_or_else(|| FilterError::Validation(vec![field.to_string()]))?;
        Ok(match self.mode {
            PathMode::Qualified => mapped.to_string(),
            PathMode::Relative(var) => format!("{var}.{mapped}"),
        })
    }

    fn fresh_ident(&mut self) -> Result<String, FilterError> {
        for _ in 0..MAX_IDENT_DRAWS {
            let id = self.idents.next_ident();
            if self.issued.insert(id.clone()) {
                trace!("binding identifier {id}");
                return Ok(id);
            }
        }
        warn!("identifier generator repeated itself {MAX_IDENT_DRAWS} times");
        Err(FilterError::InvalidArgument(format!(
            "no unused binding identifier after {MAX_IDENT_DRAWS} draws"
        )))
    }
}

/// Leading identifier of an attribute path (`fizz` for `fizz.identifier`).
pub(crate) fn path_root(path: &str) -> &str {
    path.split(['.', '[']).next().unwrap_or(path)
}

fn array_binding(id: &str, op: Operator, path: &str, value: &str) -> String {
    let quoted = quote(value);
    match op {
        Operator::ArrayMatch => format!(
            "LET {id} = (\n    FOR {id}_item IN {path}[*]\n        FILTER CONTAINS(LOWER({id}_item), LOWER({quoted}))\n        LIMIT 1\n        RETURN 1\n)"
        ),
        Operator::ArrayNe => {
            format!("LET {id} = (\n    FILTER {quoted} NOT IN {path}[*]\n    RETURN 1\n)")
        }
        _ => format!("LET {id} = (\n    FILTER {quoted} IN {path}[*]\n    RETURN 1\n)"),
    }
}
