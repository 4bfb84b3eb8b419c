use serde_json::Value;

use crate::model::{FIELDS, FieldSpec, UnitSystem};

/// Footer appended to every rendered report.
pub const ATTRIBUTION: &str = "Weather data by Weather Underground\n(http://www.wunderground.com)\n";

/// A field's key path did not resolve against the response document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("response document has no value at '{path}' (missing key '{key}')")]
pub struct MissingField {
    /// Dotted path of the field being resolved.
    pub path: String,
    /// The key that was absent.
    pub key: &'static str,
}

/// Render the weather report for one decoded response document.
///
/// Fields are resolved in declared order, and every path is resolved
/// before the unit filter is consulted: a missing key fails the whole
/// report even when that field would not have been printed.
pub fn render(document: &Value, units: UnitSystem) -> Result<String, MissingField> {
    let mut out = String::new();

    for field in FIELDS {
        let value = lookup(document, field)?;
        if !field.units.matches(units) {
            continue;
        }
        out.push_str(field.prefix);
        out.push_str(&value);
        out.push_str(field.suffix);
    }

    out.push_str(ATTRIBUTION);
    Ok(out)
}

/// Listing printed when the service matched several locations: a header
/// with the candidate count, then each candidate's values on one line.
pub fn render_ambiguous(candidates: &[serde_json::Map<String, Value>]) -> String {
    let mut out = format!(
        "The location is ambiguous. Weather Underground reports {} locations\n",
        candidates.len()
    );

    for candidate in candidates {
        let line = candidate.values().map(scalar_text).collect::<Vec<_>>().join(",");
        out.push_str(&line);
        out.push('\n');
    }

    out
}

fn lookup(document: &Value, field: &FieldSpec) -> Result<String, MissingField> {
    let mut current = document;
    for &key in field.path {
        current = current.get(key).ok_or_else(|| MissingField {
            path: field.path.join("."),
            key,
        })?;
    }
    Ok(scalar_text(current))
}

/// String leaves print verbatim; anything else falls back to its JSON
/// text, matching how numeric fields such as wind speed are reported.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
