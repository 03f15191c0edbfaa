// Helpers shared by the export providers.

use assembly_data::{classify_column, parse_numeric, ColumnKind, RawValue};

use crate::dash::config_reader::PercentageScale;

/// Applies the declared source scale to share columns, leaving every other
/// column untouched. This is the only place where a fraction-scaled source
/// is converted to canonical percent; consumers never branch on magnitude.
pub fn scale_share(column: &str, value: RawValue, scale: PercentageScale) -> RawValue {
    if scale == PercentageScale::Percent {
        return value;
    }
    match classify_column(column) {
        ColumnKind::CandidateShare { .. } | ColumnKind::ReservedShare { .. } => {
            RawValue::Number(scale.apply(parse_numeric(&value)))
        }
        _ => value,
    }
}

/// File name for a written report, derived from the report name.
pub fn report_file_name(report_name: &str) -> String {
    let mut slug = String::new();
    for c in report_name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    format!("{}.json", slug.trim_matches('_'))
}
