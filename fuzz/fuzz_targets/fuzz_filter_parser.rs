#![no_main]
use aqlfilter::query::{FieldMap, SequentialIdents, gen_qualified_aql_filter_statement_with, parse_filter_string};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 { return; }
    if let Ok(s) = std::str::from_utf8(data) {
        // Parsing and compiling must never panic; errors are fine
        if let Ok(filters) = parse_filter_string(s) {
            let fmap: FieldMap = filters.iter().map(|f| (f.field(), f.field())).collect();
            let _ = gen_qualified_aql_filter_statement_with(&fmap, &filters, &mut SequentialIdents::default());
        }
    }
});
