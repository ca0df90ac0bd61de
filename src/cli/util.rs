use crate::errors::FilterError;
use crate::query::FieldMap;

use super::runner::OutputMode;

pub fn parse_output_mode(s: &Option<String>) -> OutputMode {
    match s.as_ref().map(|x| x.to_lowercase()).as_deref() {
        Some("json") => OutputMode::Json,
        Some("plain") => OutputMode::Plain,
        _ => OutputMode::Human,
    }
}

/// Parses `field=path` pairs into a field map; later pairs replace earlier ones.
///
/// # Errors
/// Returns `FilterError::InvalidArgument` for a pair without `=` or with an empty side.
pub fn parse_field_pairs(pairs: &[String]) -> Result<FieldMap, FilterError> {
    let mut fmap = FieldMap::new();
    for pair in pairs {
        match pair.split_once('=') {
            Some((k, v)) if !k.trim().is_empty() && !v.trim().is_empty() => {
                fmap.insert(k.trim(), v.trim());
            }
            _ => {
                return Err(FilterError::InvalidArgument(format!(
                    "expected field=path, got {pair:?}"
                )));
            }
        }
    }
    Ok(fmap)
}
