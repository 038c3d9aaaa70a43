//! # jobdesk
//!
//! PostgreSQL data layer for a job-board backend: companies, jobs, and
//! users.
//!
//! ## Features
//!
//! - **Safe dynamic SQL**: partial updates and ad-hoc search filters are
//!   built from payloads into parameterized fragments; values never enter
//!   the SQL text
//! - **Per-entity whitelists**: each entity declares the filter keys it
//!   recognizes and the operator fixed for each key; anything else is a
//!   hard error
//! - **Type-safe mapping**: row → struct via the `FromRow` trait
//! - **Client-agnostic**: pass a direct connection or a pooled one anywhere
//!   a `GenericClient` is expected
//!
//! ## Query construction
//!
//! ```ignore
//! use jobdesk::{FieldMap, UpdatePayload, set_clause};
//!
//! let payload = UpdatePayload::new()
//!     .set("name", "New Co")
//!     .set("numEmployees", 12);
//! let map = FieldMap::new().map("numEmployees", "num_employees");
//!
//! let fragment = set_clause(&payload, &map)?;
//! assert_eq!(fragment.sql(), r#""name"=$1, "num_employees"=$2"#);
//! ```
//!
//! ## Data access
//!
//! ```ignore
//! use jobdesk::FilterPayload;
//! use jobdesk::models::job;
//!
//! let pool = jobdesk::create_pool("postgres://localhost/jobdesk")?;
//! let conn = pool.get().await?;
//!
//! let filter = FilterPayload::new()
//!     .add("title", "engineer")
//!     .add("minSalary", 90_000)
//!     .add("hasEquity", "true");
//! let jobs = job::search(&conn, &filter).await?;
//! ```

pub mod client;
pub mod error;
pub mod field_map;
pub mod filter;
pub mod fragment;
pub mod models;
pub mod prelude;
pub mod row;
pub mod update;
pub mod value;

pub use client::GenericClient;
pub use error::{StoreError, StoreResult};
pub use field_map::FieldMap;
pub use filter::{FilterOp, FilterPayload, FilterRule, FilterSpec, where_clause};
pub use fragment::Fragment;
pub use row::{FromRow, RowExt};
pub use update::{UpdatePayload, set_clause};
pub use value::Scalar;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};
