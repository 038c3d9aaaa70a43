//! Company data access.
//!
//! Companies are keyed by a URL-friendly handle. Search supports a
//! case-insensitive name match and an employee-count range; partial updates
//! map the API names `numEmployees` and `logoUrl` onto their storage
//! columns.

use crate::client::GenericClient;
use crate::error::{StoreError, StoreResult};
use crate::field_map::FieldMap;
use crate::filter::{FilterOp, FilterPayload, FilterSpec, where_clause};
use crate::fragment::Fragment;
use crate::row::{FromRow, RowExt};
use crate::update::{UpdatePayload, set_clause};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// A company row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// Input for creating a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &Row) -> StoreResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

/// Update-field mapping for companies.
pub fn update_columns() -> FieldMap {
    FieldMap::new()
        .map("numEmployees", "num_employees")
        .map("logoUrl", "logo_url")
}

/// Search whitelist for companies.
pub fn search_spec() -> FilterSpec {
    FilterSpec::new()
        .rule("name", "name", FilterOp::Contains)
        .rule("minEmployees", "num_employees", FilterOp::Gte)
        .rule("maxEmployees", "num_employees", FilterOp::Lte)
}

/// Build the filtered-listing statement for a search payload.
///
/// An empty clause (every key skipped) degrades to the unfiltered listing.
pub fn search_query(filter: &FilterPayload) -> StoreResult<Fragment> {
    let clause = where_clause(filter, &search_spec())?;
    let (clause_sql, params) = clause.into_parts();

    let mut sql = format!("SELECT {COMPANY_COLUMNS} FROM companies");
    if !clause_sql.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clause_sql);
    }
    sql.push_str(" ORDER BY name");

    Ok(Fragment::new(sql, params))
}

/// Build the partial-update statement for a company.
///
/// The handle is appended after the payload values, taking the next free
/// placeholder index.
pub fn update_query(handle: &str, data: &UpdatePayload) -> StoreResult<Fragment> {
    let set = set_clause(data, &update_columns())?;
    let handle_idx = set.next_placeholder();
    let (set_sql, mut params) = set.into_parts();
    params.push(handle.into());

    let sql = format!(
        "UPDATE companies SET {set_sql} WHERE handle = ${handle_idx} RETURNING {COMPANY_COLUMNS}"
    );
    Ok(Fragment::new(sql, params))
}

/// Create a company, rejecting a duplicate handle.
pub async fn create(conn: &impl GenericClient, company: &NewCompany) -> StoreResult<Company> {
    let duplicate = conn
        .query_opt(
            "SELECT handle FROM companies WHERE handle = $1",
            &[&company.handle],
        )
        .await?;
    if duplicate.is_some() {
        return Err(StoreError::duplicate(format!(
            "Duplicate company: {}",
            company.handle
        )));
    }

    let row = conn
        .query_one(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING handle, name, description, num_employees, logo_url",
            &[
                &company.handle,
                &company.name,
                &company.description,
                &company.num_employees,
                &company.logo_url,
            ],
        )
        .await?;
    Company::from_row(&row)
}

/// List all companies, ordered by name.
pub async fn find_all(conn: &impl GenericClient) -> StoreResult<Vec<Company>> {
    let rows = conn
        .query(
            "SELECT handle, name, description, num_employees, logo_url \
             FROM companies ORDER BY name",
            &[],
        )
        .await?;
    rows.iter().map(Company::from_row).collect()
}

/// List companies matching a search payload.
pub async fn search(conn: &impl GenericClient, filter: &FilterPayload) -> StoreResult<Vec<Company>> {
    let query = search_query(filter)?;
    let rows = conn.query(query.sql(), &query.bind_refs()).await?;
    rows.iter().map(Company::from_row).collect()
}

/// Fetch one company by handle.
pub async fn get(conn: &impl GenericClient, handle: &str) -> StoreResult<Company> {
    let row = conn
        .query_opt(
            "SELECT handle, name, description, num_employees, logo_url \
             FROM companies WHERE handle = $1",
            &[&handle],
        )
        .await?
        .ok_or_else(|| StoreError::not_found(format!("No company: {handle}")))?;
    Company::from_row(&row)
}

/// Apply a partial update to a company and return the updated row.
pub async fn update(
    conn: &impl GenericClient,
    handle: &str,
    data: &UpdatePayload,
) -> StoreResult<Company> {
    let query = update_query(handle, data)?;
    let row = conn
        .query_opt(query.sql(), &query.bind_refs())
        .await?
        .ok_or_else(|| StoreError::not_found(format!("No company: {handle}")))?;
    Company::from_row(&row)
}

/// Delete a company by handle.
pub async fn remove(conn: &impl GenericClient, handle: &str) -> StoreResult<()> {
    conn.query_opt(
        "DELETE FROM companies WHERE handle = $1 RETURNING handle",
        &[&handle],
    )
    .await?
    .ok_or_else(|| StoreError::not_found(format!("No company: {handle}")))?;
    Ok(())
}
