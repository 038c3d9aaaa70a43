//! SQL fragments: partial clauses plus their ordered bind parameters.
//!
//! A [`Fragment`] pairs a piece of SQL text with the parameters its `$n`
//! placeholders refer to. Builders return fragments; data-access code
//! splices the text into a full statement and executes it with
//! [`Fragment::bind_refs`].
//!
//! Invariant: placeholder indices in the text are contiguous starting at
//! `$1` and their count equals the parameter count. Callers appending a
//! trailing parameter (for example a row identifier after a SET clause) use
//! [`Fragment::push_param`], which returns the new parameter's 1-based
//! placeholder index.

use crate::value::Scalar;
use tokio_postgres::types::ToSql;

/// A partial SQL clause and its ordered bind parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fragment {
    sql: String,
    params: Vec<Scalar>,
}

impl Fragment {
    /// Create a fragment from SQL text and its parameters.
    pub fn new(sql: impl Into<String>, params: Vec<Scalar>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Create an empty fragment (no SQL text, no parameters).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the fragment carries no SQL text.
    ///
    /// A filter payload whose every key was skipped produces an empty
    /// fragment; callers treat it as "no clause" rather than an error.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// The SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The bind parameters, in placeholder order.
    pub fn params(&self) -> &[Scalar] {
        &self.params
    }

    /// The placeholder index the next appended parameter will receive.
    pub fn next_placeholder(&self) -> usize {
        self.params.len() + 1
    }

    /// Append a parameter and return its 1-based placeholder index.
    ///
    /// The caller is responsible for referencing the returned index in
    /// whatever SQL text it splices the fragment into.
    pub fn push_param(&mut self, value: impl Into<Scalar>) -> usize {
        self.params.push(value.into());
        self.params.len()
    }

    /// Decompose into SQL text and parameters.
    pub fn into_parts(self) -> (String, Vec<Scalar>) {
        (self.sql, self.params)
    }

    /// Borrow the parameters as `tokio-postgres` bind references.
    pub fn bind_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p as &(dyn ToSql + Sync)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_param_returns_one_based_index() {
        let mut frag = Fragment::new("handle = $1", vec![Scalar::from("c1")]);
        assert_eq!(frag.next_placeholder(), 2);
        let idx = frag.push_param(10i64);
        assert_eq!(idx, 2);
        assert_eq!(frag.params().len(), 2);
    }

    #[test]
    fn empty_fragment() {
        let frag = Fragment::empty();
        assert!(frag.is_empty());
        assert_eq!(frag.next_placeholder(), 1);
        assert!(frag.bind_refs().is_empty());
    }
}
