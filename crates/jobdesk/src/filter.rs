//! Search filter WHERE clause construction.
//!
//! Every entity that supports ad-hoc filtering declares a [`FilterSpec`]:
//! the fixed set of filter keys it recognizes, each bound to one physical
//! column and one [`FilterOp`]. Callers never pick operators; a key outside
//! the whitelist is a hard error. That whitelist is the only defense between a
//! request query string and the generated SQL, so it is checked over the
//! whole payload before any clause is emitted.
//!
//! Clauses join with `AND`. Placeholder indices advance per emitted clause,
//! not per payload key: a [`FilterOp::Flag`] key whose value is not the
//! string `"true"` contributes no clause and no parameter.

use crate::error::{StoreError, StoreResult};
use crate::fragment::Fragment;
use crate::value::Scalar;
use std::fmt::Write as _;

/// Comparison semantics for one recognized filter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Case-insensitive substring match: `column ILIKE $n`, value wrapped
    /// in `%...%`.
    Contains,
    /// Inclusive lower bound: `column >= $n`.
    Gte,
    /// Inclusive upper bound: `column <= $n`.
    Lte,
    /// Strict lower bound: `column > $n`.
    Gt,
    /// Positivity flag: emits `column > $n` binding the sentinel `0` when
    /// the supplied value is the string `"true"`; any other value makes the
    /// key contribute nothing.
    Flag,
}

/// One whitelist entry: a recognized key, its target column, and its
/// operator.
#[derive(Debug, Clone)]
pub struct FilterRule {
    key: &'static str,
    column: &'static str,
    op: FilterOp,
}

impl FilterRule {
    /// The logical filter key.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// The physical column the clause targets.
    pub fn column(&self) -> &'static str {
        self.column
    }

    /// The operator fixed for this key.
    pub fn op(&self) -> FilterOp {
        self.op
    }
}

/// The whitelist of filter keys an entity recognizes.
///
/// # Example
/// ```ignore
/// let spec = FilterSpec::new()
///     .rule("title", "title", FilterOp::Contains)
///     .rule("minSalary", "salary", FilterOp::Gt)
///     .rule("hasEquity", "equity", FilterOp::Flag);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    rules: Vec<FilterRule>,
}

impl FilterSpec {
    /// Create an empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule for a recognized key.
    pub fn rule(mut self, key: &'static str, column: &'static str, op: FilterOp) -> Self {
        self.rules.push(FilterRule { key, column, op });
        self
    }

    /// Look up the rule for a key, if recognized.
    pub fn get(&self, key: &str) -> Option<&FilterRule> {
        self.rules.iter().find(|r| r.key == key)
    }

    /// The recognized keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.key)
    }
}

/// An ordered set of filter key/value pairs from a request.
#[derive(Debug, Clone, Default)]
pub struct FilterPayload {
    fields: Vec<(String, Scalar)>,
}

impl FilterPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter key and its caller-supplied value.
    pub fn add(mut self, key: &str, value: impl Into<Scalar>) -> Self {
        self.fields.push((key.to_string(), value.into()));
        self
    }

    /// Whether the payload has no keys.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// The key/value pairs in insertion order.
    pub fn fields(&self) -> &[(String, Scalar)] {
        &self.fields
    }
}

/// Build a conjunctive `WHERE` clause fragment from a filter payload.
///
/// Fails with [`StoreError::EmptyPayload`] when the payload has no keys,
/// and with [`StoreError::UnsupportedFilter`] (naming the offending key)
/// when any key is missing from `spec`. The whitelist check covers the
/// whole payload before clause generation starts.
///
/// The result may be an empty fragment when every key was a skipped flag;
/// callers treat that as "no clause", not an error.
pub fn where_clause(payload: &FilterPayload, spec: &FilterSpec) -> StoreResult<Fragment> {
    if payload.is_empty() {
        return Err(StoreError::EmptyPayload);
    }

    let mut matched = Vec::with_capacity(payload.len());
    for (key, value) in payload.fields() {
        let rule = spec
            .get(key)
            .ok_or_else(|| StoreError::UnsupportedFilter(key.clone()))?;
        matched.push((rule, value));
    }

    let mut sql = String::new();
    let mut params: Vec<Scalar> = Vec::new();

    for (rule, value) in matched {
        let (operator, param) = match rule.op {
            FilterOp::Contains => ("ILIKE", Some(Scalar::Text(format!("%{value}%")))),
            FilterOp::Gte => (">=", Some(value.clone())),
            FilterOp::Lte => ("<=", Some(value.clone())),
            FilterOp::Gt => (">", Some(value.clone())),
            FilterOp::Flag => {
                if matches!(value, Scalar::Text(s) if s == "true") {
                    (">", Some(Scalar::Int(0)))
                } else {
                    (">", None)
                }
            }
        };

        // Flag keys with a non-"true" value emit nothing; placeholder
        // indices track emitted clauses only.
        let Some(param) = param else { continue };

        if !sql.is_empty() {
            sql.push_str(" AND ");
        }
        params.push(param);
        let _ = write!(sql, "{} {} ${}", rule.column, operator, params.len());
    }

    Ok(Fragment::new(sql, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_spec() -> FilterSpec {
        FilterSpec::new()
            .rule("title", "title", FilterOp::Contains)
            .rule("minSalary", "salary", FilterOp::Gt)
            .rule("hasEquity", "equity", FilterOp::Flag)
    }

    fn company_spec() -> FilterSpec {
        FilterSpec::new()
            .rule("name", "name", FilterOp::Contains)
            .rule("minEmployees", "num_employees", FilterOp::Gte)
            .rule("maxEmployees", "num_employees", FilterOp::Lte)
    }

    #[test]
    fn builds_all_job_clauses() {
        let payload = FilterPayload::new()
            .add("title", "j")
            .add("minSalary", 1i64)
            .add("hasEquity", "true");
        let frag = where_clause(&payload, &job_spec()).unwrap();
        assert_eq!(frag.sql(), "title ILIKE $1 AND salary > $2 AND equity > $3");
        assert_eq!(
            frag.params(),
            &[Scalar::from("%j%"), Scalar::Int(1), Scalar::Int(0)]
        );
    }

    #[test]
    fn company_range_clauses() {
        let payload = FilterPayload::new()
            .add("name", "net")
            .add("minEmployees", 10i64)
            .add("maxEmployees", 500i64);
        let frag = where_clause(&payload, &company_spec()).unwrap();
        assert_eq!(
            frag.sql(),
            "name ILIKE $1 AND num_employees >= $2 AND num_employees <= $3"
        );
        assert_eq!(
            frag.params(),
            &[Scalar::from("%net%"), Scalar::Int(10), Scalar::Int(500)]
        );
    }

    #[test]
    fn skipped_flag_does_not_consume_a_placeholder() {
        let payload = FilterPayload::new()
            .add("hasEquity", "false")
            .add("minSalary", 1i64);
        let frag = where_clause(&payload, &job_spec()).unwrap();
        assert_eq!(frag.sql(), "salary > $1");
        assert_eq!(frag.params(), &[Scalar::Int(1)]);
    }

    #[test]
    fn all_keys_skipped_yields_empty_fragment() {
        let payload = FilterPayload::new().add("hasEquity", "false");
        let frag = where_clause(&payload, &job_spec()).unwrap();
        assert!(frag.is_empty());
        assert!(frag.params().is_empty());
    }

    #[test]
    fn flag_requires_the_string_true() {
        // A boolean true is not the string "true"; the key contributes
        // nothing, matching the query-string origin of the value.
        let payload = FilterPayload::new().add("hasEquity", true);
        let frag = where_clause(&payload, &job_spec()).unwrap();
        assert!(frag.is_empty());
    }

    #[test]
    fn unsupported_key_names_the_offender() {
        let payload = FilterPayload::new()
            .add("title", "j")
            .add("wrong", "wrong");
        let err = where_clause(&payload, &job_spec()).unwrap_err();
        match err {
            StoreError::UnsupportedFilter(key) => assert_eq!(key, "wrong"),
            other => panic!("expected UnsupportedFilter, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_key_rejected_before_any_clause() {
        // Whitelist failure wins even when it follows a skipped flag.
        let payload = FilterPayload::new()
            .add("hasEquity", "false")
            .add("bogus", 1i64);
        assert!(matches!(
            where_clause(&payload, &job_spec()),
            Err(StoreError::UnsupportedFilter(_))
        ));
    }

    #[test]
    fn empty_payload_is_an_error() {
        assert!(matches!(
            where_clause(&FilterPayload::new(), &job_spec()),
            Err(StoreError::EmptyPayload)
        ));
    }

    #[test]
    fn identical_inputs_build_identical_fragments() {
        let payload = FilterPayload::new().add("title", "j").add("hasEquity", "true");
        let spec = job_spec();
        assert_eq!(
            where_clause(&payload, &spec).unwrap(),
            where_clause(&payload, &spec).unwrap()
        );
    }
}
