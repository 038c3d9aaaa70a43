//! Convenient imports for typical `jobdesk` usage.
//!
//! ```ignore
//! use jobdesk::prelude::*;
//! ```

pub use crate::{
    FieldMap, FilterOp, FilterPayload, FilterSpec, Fragment, FromRow, GenericClient, RowExt,
    Scalar, StoreError, StoreResult, UpdatePayload, set_clause, where_clause,
};

#[cfg(feature = "pool")]
pub use crate::{create_pool, create_pool_with_config};
