//! Partial-update SET clause construction.
//!
//! An [`UpdatePayload`] carries the subset of fields a request wants to
//! change, in insertion order. [`set_clause`] turns it into a `SET` fragment
//! with one `"column"=$n` assignment per field; the parameter list holds the
//! values in the same order, so the caller can append a row identifier and
//! finish the statement.
//!
//! Values never appear in the generated SQL text. They travel only through
//! the fragment's parameter list.

use crate::error::{StoreError, StoreResult};
use crate::field_map::{FieldMap, write_quoted};
use crate::fragment::Fragment;
use crate::value::Scalar;
use std::fmt::Write as _;

/// An ordered set of fields to change.
///
/// Insertion order is the parameter order of the generated fragment; the
/// vector makes that contract explicit rather than leaning on map iteration
/// order.
///
/// # Example
/// ```ignore
/// let payload = UpdatePayload::new()
///     .set("name", "New Co")
///     .set_opt("numEmployees", Some(12));
/// ```
#[derive(Debug, Clone, Default)]
pub struct UpdatePayload {
    fields: Vec<(String, Scalar)>,
}

impl UpdatePayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field to change.
    pub fn set(mut self, field: &str, value: impl Into<Scalar>) -> Self {
        self.fields.push((field.to_string(), value.into()));
        self
    }

    /// Add a field only when a value is present (`None` => skip).
    pub fn set_opt(self, field: &str, value: Option<impl Into<Scalar>>) -> Self {
        match value {
            Some(v) => self.set(field, v),
            None => self,
        }
    }

    /// Whether the payload has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// The fields in insertion order.
    pub fn fields(&self) -> &[(String, Scalar)] {
        &self.fields
    }
}

/// Build a `SET` clause fragment from a partial-update payload.
///
/// Each field resolves through `map` to its physical column and emits
/// `"column"=$n`, with `n` assigned 1-based in payload order. The returned
/// fragment's parameters are the payload values in that same order.
///
/// Fails with [`StoreError::EmptyPayload`] when the payload has no fields:
/// an update with nothing to set is a caller error, not a no-op.
pub fn set_clause(payload: &UpdatePayload, map: &FieldMap) -> StoreResult<Fragment> {
    if payload.is_empty() {
        return Err(StoreError::EmptyPayload);
    }

    let mut sql = String::new();
    let mut params = Vec::with_capacity(payload.len());

    for (field, value) in payload.fields() {
        if !params.is_empty() {
            sql.push_str(", ");
        }
        write_quoted(&mut sql, map.resolve(field));
        params.push(value.clone());
        let _ = write!(sql, "=${}", params.len());
    }

    Ok(Fragment::new(sql, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_assignments_in_payload_order() {
        let payload = UpdatePayload::new()
            .set("name", "New Co")
            .set("secondName", "Alt Co");
        let frag = set_clause(&payload, &FieldMap::new()).unwrap();
        assert_eq!(frag.sql(), r#""name"=$1, "secondName"=$2"#);
        assert_eq!(
            frag.params(),
            &[Scalar::from("New Co"), Scalar::from("Alt Co")]
        );
    }

    #[test]
    fn resolves_mapped_columns() {
        let map = FieldMap::new()
            .map("numEmployees", "num_employees")
            .map("logoUrl", "logo_url");
        let payload = UpdatePayload::new()
            .set("name", "C1")
            .set("numEmployees", 5i32)
            .set("logoUrl", "http://c1.img");
        let frag = set_clause(&payload, &map).unwrap();
        assert_eq!(
            frag.sql(),
            r#""name"=$1, "num_employees"=$2, "logo_url"=$3"#
        );
        assert_eq!(frag.params().len(), 3);
    }

    #[test]
    fn placeholder_count_matches_field_count() {
        let payload = UpdatePayload::new()
            .set("a", 1i64)
            .set("b", 2i64)
            .set("c", 3i64)
            .set("d", Scalar::Null);
        let frag = set_clause(&payload, &FieldMap::new()).unwrap();
        assert_eq!(frag.params().len(), 4);
        for n in 1..=4 {
            assert!(frag.sql().contains(&format!("=${n}")));
        }
        assert!(!frag.sql().contains("$5"));
    }

    #[test]
    fn empty_payload_is_an_error() {
        let err = set_clause(&UpdatePayload::new(), &FieldMap::new()).unwrap_err();
        assert!(matches!(err, StoreError::EmptyPayload));
    }

    #[test]
    fn identical_inputs_build_identical_fragments() {
        let map = FieldMap::new().map("logoUrl", "logo_url");
        let payload = UpdatePayload::new().set("logoUrl", "x").set("name", "y");
        let a = set_clause(&payload, &map).unwrap();
        let b = set_clause(&payload, &map).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn set_opt_skips_none() {
        let payload = UpdatePayload::new()
            .set("name", "C1")
            .set_opt("description", None::<&str>);
        assert_eq!(payload.len(), 1);
    }
}
