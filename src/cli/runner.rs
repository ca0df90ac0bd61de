use log::info;
use serde_json::json;
use std::io::Write;

use super::command::Command;
use crate::errors::FilterError;
use crate::query::{
    self, IdentGenerator, RandomIdents, SequentialIdents, StatementParameters, all_operators,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputMode {
    Human,
    Plain,
    Json,
}

fn io_err(e: std::io::Error) -> FilterError {
    FilterError::Io(e.to_string())
}

/// Runs `cmd` writing human-readable output to `out`.
///
/// # Errors
/// Returns the parse/compile error of the command or an I/O error from `out`.
pub fn run<W: Write>(cmd: Command, out: &mut W) -> Result<(), FilterError> {
    run_with_format(cmd, OutputMode::Human, out)
}

/// # Errors
/// Returns the parse/compile error of the command or an I/O error from `out`.
pub fn run_with_format<W: Write>(
    cmd: Command,
    mode: OutputMode,
    out: &mut W,
) -> Result<(), FilterError> {
    match cmd {
        Command::Parse { filter } => {
            let filters = query::parse_filter_string(&filter)?;
            match mode {
                OutputMode::Json => {
                    writeln!(out, "{}", serde_json::to_string_pretty(&filters)?).map_err(io_err)?;
                }
                OutputMode::Plain => {
                    for f in &filters {
                        writeln!(out, "{f}").map_err(io_err)?;
                    }
                }
                OutputMode::Human => {
                    for f in &filters {
                        writeln!(
                            out,
                            "field={} operator={} value={:?} logic={}",
                            f.field(),
                            f.operator().token(),
                            f.value(),
                            f.logic().map_or("-", |l| l.keyword())
                        )
                        .map_err(io_err)?;
                    }
                }
            }
            Ok(())
        }
        Command::Compile { filter, fields, doc, vert, qualified, collection, deterministic } => {
            let filters = query::parse_filter_string(&filter)?;
            let mut seq = SequentialIdents::default();
            let mut rnd = RandomIdents;
            let idents: &mut dyn IdentGenerator = if deterministic { &mut seq } else { &mut rnd };
            // The FOR variable must be the one the clause's paths start from.
            let loop_var = match (&collection, qualified) {
                (None, _) => None,
                (Some(_), true) => Some(query::qualified_loop_variable(&fields, &filters)?),
                (Some(_), false) => Some(vert.clone().unwrap_or_else(|| doc.clone())),
            };
            let clause = if qualified {
                query::gen_qualified_aql_filter_statement_with(&fields, &filters, idents)?
            } else {
                let params = StatementParameters { fmap: fields, filters, doc, vert };
                query::gen_aql_filter_statement_with(&params, idents)?
            };
            let text = match (&collection, &loop_var) {
                (Some(coll), Some(var)) => query::wrap_for_return(var, coll, &clause),
                _ => clause,
            };
            info!("compiled filter string {filter:?}");
            match mode {
                OutputMode::Json => {
                    let v = json!({ "filter": filter, "aql": text });
                    writeln!(out, "{}", serde_json::to_string_pretty(&v)?).map_err(io_err)?;
                }
                OutputMode::Plain | OutputMode::Human => writeln!(out, "{text}").map_err(io_err)?,
            }
            Ok(())
        }
        Command::Operators => {
            match mode {
                OutputMode::Json => {
                    let ops: Vec<_> = all_operators()
                        .iter()
                        .map(|op| {
                            json!({ "token": op.token(), "symbol": op.symbol(), "category": op.category() })
                        })
                        .collect();
                    writeln!(out, "{}", serde_json::to_string_pretty(&ops)?).map_err(io_err)?;
                }
                OutputMode::Plain => {
                    for op in all_operators() {
                        writeln!(out, "{}", op.token()).map_err(io_err)?;
                    }
                }
                OutputMode::Human => {
                    for op in all_operators() {
                        writeln!(out, "{:<4} -> {:<3} ({:?})", op.token(), op.symbol(), op.category())
                            .map_err(io_err)?;
                    }
                }
            }
            Ok(())
        }
    }
}
