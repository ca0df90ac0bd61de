use crate::query::FieldMap;

pub enum Command {
    // Parse a filter string and print the filters
    Parse {
        filter: String,
    },
    // Compile a filter string into a FILTER clause
    Compile {
        filter: String,
        fields: FieldMap,
        doc: String,
        vert: Option<String>,
        qualified: bool,
        // wraps the clause in FOR ... RETURN when set
        collection: Option<String>,
        deterministic: bool,
    },
    // List the closed operator set
    Operators,
}
