//! Result exporter: renders a terminal job's results as CSV.
//!
//! Only reads the `results` field of a snapshot. Safe to call once a job is
//! terminal; the store guarantees results stop mutating at that point.

use leadmap_core::BusinessRecord;

const HEADER: &[&str] = &[
    "business_name",
    "address",
    "city",
    "state",
    "phone",
    "website",
    "category",
    "source_url",
];

/// Render records as a CSV document with a header row.
pub fn render_csv(records: &[BusinessRecord]) -> String {
    let mut out = String::new();
    out.push_str(&HEADER.join(","));
    out.push('\n');
    for record in records {
        let row = [
            &record.business_name,
            &record.address,
            &record.city,
            &record.state,
            &record.phone,
            &record.website,
            &record.category,
            &record.source_url,
        ];
        let line: Vec<String> = row.iter().map(|field| csv_field(field)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

/// Quote a field when it contains a delimiter, quote, or line break;
/// embedded quotes are doubled.
fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
