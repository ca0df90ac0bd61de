use log::debug;

use super::compile::{ClauseCompiler, PathMode, Streams, path_root};
use super::group::grouped_expression;
use super::ident::{IdentGenerator, RandomIdents};
use super::types::{FieldMap, Filter, StatementParameters};
use crate::errors::FilterError;

/// Bindings (newest first), then `FILTER` and the grouped expression.
///
/// An empty term stream yields a bare `FILTER`; callers embedding the clause must
/// guard against that themselves.
#[must_use]
pub fn assemble(streams: &Streams) -> String {
    let expr = grouped_expression(&streams.terms);
    let filter = if expr.is_empty() { "FILTER".to_string() } else { format!("FILTER {expr}") };
    if streams.bindings.is_empty() {
        return filter;
    }
    let mut out = streams.bindings.iter().map(String::as_str).collect::<Vec<_>>().join("\n");
    out.push('\n');
    out.push_str(&filter);
    out
}

/// Compiles `filters` where `fmap` values are complete attribute paths.
///
/// # Errors
/// See [`ClauseCompiler::compile`].
pub fn gen_qualified_aql_filter_statement(
    fmap: &FieldMap,
    filters: &[Filter],
) -> Result<String, FilterError> {
    gen_qualified_aql_filter_statement_with(fmap, filters, &mut RandomIdents)
}

/// # Errors
/// See [`ClauseCompiler::compile`].
pub fn gen_qualified_aql_filter_statement_with<G: IdentGenerator + ?Sized>(
    fmap: &FieldMap,
    filters: &[Filter],
    idents: &mut G,
) -> Result<String, FilterError> {
    let streams = ClauseCompiler::new(fmap, PathMode::Qualified, idents).compile(filters)?;
    debug!("compiled {} qualified filter(s)", filters.len());
    Ok(assemble(&streams))
}

/// Compiles `params.filters` with paths relative to the loop variable.
///
/// # Errors
/// See [`ClauseCompiler::compile`].
pub fn gen_aql_filter_statement(params: &StatementParameters) -> Result<String, FilterError> {
    gen_aql_filter_statement_with(params, &mut RandomIdents)
}

/// # Errors
/// See [`ClauseCompiler::compile`].
pub fn gen_aql_filter_statement_with<G: IdentGenerator + ?Sized>(
    params: &StatementParameters,
    idents: &mut G,
) -> Result<String, FilterError> {
    let var = params.loop_variable();
    let streams =
        ClauseCompiler::new(&params.fmap, PathMode::Relative(var), idents).compile(&params.filters)?;
    debug!("compiled {} filter(s) relative to {var}", params.filters.len());
    Ok(assemble(&streams))
}

/// The single root variable shared by the qualified paths of `filters`, usable as
/// the loop variable when the clause is wrapped in a `FOR` query.
///
/// # Errors
/// `FilterError::Validation` for unmapped fields, or `FilterError::InvalidArgument`
/// when the paths have no common root.
pub fn qualified_loop_variable(fmap: &FieldMap, filters: &[Filter]) -> Result<String, FilterError> {
    let missing = fmap.missing_fields(filters);
    if !missing.is_empty() {
        return Err(FilterError::Validation(missing));
    }
    let mut roots: Vec<&str> = filters
        .iter()
        .filter_map(|f| fmap.get(f.field()))
        .map(path_root)
        .collect();
    roots.sort_unstable();
    roots.dedup();
    match roots.as_slice() {
        [root] if !root.is_empty() => Ok((*root).to_string()),
        _ => Err(FilterError::InvalidArgument(format!(
            "qualified paths need one common root variable, found [{}]",
            roots.join(", ")
        ))),
    }
}

/// `FOR <var> IN <collection> <clause> RETURN <var>`.
#[must_use]
pub fn wrap_for_return(var: &str, collection: &str, clause: &str) -> String {
    let body = clause.lines().map(|l| format!("    {l}")).collect::<Vec<_>>().join("\n");
    format!("FOR {var} IN {collection}\n{body}\n    RETURN {var}")
}
