//! Logical-to-physical column name mapping.
//!
//! API payloads name fields in camelCase (`numEmployees`); storage columns
//! are snake_case (`num_employees`). A [`FieldMap`] records the exceptions;
//! any field without an entry resolves to itself, so entities only list the
//! names that actually differ.

use std::collections::BTreeMap;

/// Mapping from logical (API-facing) field names to physical column names.
///
/// Immutable once built. Lookup is pure; a missing key is valid and falls
/// back to the logical name verbatim.
///
/// # Example
/// ```ignore
/// let map = FieldMap::new()
///     .map("numEmployees", "num_employees")
///     .map("logoUrl", "logo_url");
/// assert_eq!(map.resolve("numEmployees"), "num_employees");
/// assert_eq!(map.resolve("name"), "name");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    columns: BTreeMap<String, String>,
}

impl FieldMap {
    /// Create an empty map (every field resolves to itself).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a logical-to-physical mapping.
    pub fn map(mut self, logical: &str, column: &str) -> Self {
        self.columns.insert(logical.to_string(), column.to_string());
        self
    }

    /// Resolve a logical field name to its physical column name.
    pub fn resolve<'a>(&'a self, logical: &'a str) -> &'a str {
        self.columns
            .get(logical)
            .map(String::as_str)
            .unwrap_or(logical)
    }
}

/// Render a column name as a quoted SQL identifier, doubling any embedded
/// quotes. Quoting keeps case-sensitive and reserved-word column names
/// valid.
pub(crate) fn write_quoted(out: &mut String, column: &str) {
    out.push('"');
    for ch in column.chars() {
        if ch == '"' {
            out.push('"');
            out.push('"');
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}
