// Submodules for separation of concerns
mod compile;
mod group;
mod ident;
mod operators;
mod parse;
mod render;
mod statement;
mod types;

// Public API re-exports
pub use compile::{ClauseCompiler, PathMode, Streams, Term};
pub use group::{group_terms, grouped_expression};
pub use ident::{IdentGenerator, RandomIdents, SequentialIdents};
pub use operators::{
    Category, Operator, all_operators, category_of, has_array_operator, has_date_operator,
    has_operator, operator_symbol,
};
pub use parse::parse_filter_string;
pub use render::{quote, render_value, validate_date};
pub use statement::{
    assemble, gen_aql_filter_statement, gen_aql_filter_statement_with,
    gen_qualified_aql_filter_statement, gen_qualified_aql_filter_statement_with,
    qualified_loop_variable, wrap_for_return,
};
pub use types::{FieldMap, Filter, Logic, StatementParameters};
