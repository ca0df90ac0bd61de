//! Compiles compact filter strings (`sport===football;tags@==rust`) into AQL `FILTER`
//! clauses for ArangoDB `FOR ... RETURN` queries.
//!
//! ```
//! use aqlfilter::query::{parse_filter_string, gen_aql_filter_statement, FieldMap, StatementParameters};
//!
//! let filters = parse_filter_string("sport===football;email===mahomes@gmail.com").unwrap();
//! let params = StatementParameters {
//!     fmap: [("sport", "sports"), ("email", "email")].into_iter().collect::<FieldMap>(),
//!     filters,
//!     doc: "doc".into(),
//!     vert: None,
//! };
//! let clause = gen_aql_filter_statement(&params).unwrap();
//! assert_eq!(clause, "FILTER doc.sports == 'football' AND doc.email == 'mahomes@gmail.com'");
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod logger;
pub mod query;

pub use errors::FilterError;
pub use query::{
    FieldMap, Filter, Logic, StatementParameters, gen_aql_filter_statement,
    gen_qualified_aql_filter_statement, parse_filter_string,
};
