//! Job data access.
//!
//! Jobs are keyed by a serial id and belong to a company via
//! `company_handle`. Search supports a case-insensitive title match, a
//! strict salary floor, and an equity-positivity flag.

use crate::client::GenericClient;
use crate::error::{StoreError, StoreResult};
use crate::field_map::FieldMap;
use crate::filter::{FilterOp, FilterPayload, FilterSpec, where_clause};
use crate::fragment::Fragment;
use crate::row::{FromRow, RowExt};
use crate::update::{UpdatePayload, set_clause};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

/// A job row.
///
/// `equity` is a NUMERIC fraction and serializes as a decimal string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Input for creating a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &Row) -> StoreResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
        })
    }
}

/// Update-field mapping for jobs.
pub fn update_columns() -> FieldMap {
    FieldMap::new().map("companyHandle", "company_handle")
}

/// Search whitelist for jobs.
pub fn search_spec() -> FilterSpec {
    FilterSpec::new()
        .rule("title", "title", FilterOp::Contains)
        .rule("minSalary", "salary", FilterOp::Gt)
        .rule("hasEquity", "equity", FilterOp::Flag)
}

/// Build the filtered-listing statement for a search payload.
///
/// An empty clause (every key skipped, e.g. `hasEquity` not `"true"`)
/// degrades to the unfiltered listing.
pub fn search_query(filter: &FilterPayload) -> StoreResult<Fragment> {
    let clause = where_clause(filter, &search_spec())?;
    let (clause_sql, params) = clause.into_parts();

    let mut sql = format!("SELECT {JOB_COLUMNS} FROM jobs");
    if !clause_sql.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clause_sql);
    }
    sql.push_str(" ORDER BY title");

    Ok(Fragment::new(sql, params))
}

/// Build the partial-update statement for a job.
pub fn update_query(id: i32, data: &UpdatePayload) -> StoreResult<Fragment> {
    let set = set_clause(data, &update_columns())?;
    let id_idx = set.next_placeholder();
    let (set_sql, mut params) = set.into_parts();
    params.push(id.into());

    let sql =
        format!("UPDATE jobs SET {set_sql} WHERE id = ${id_idx} RETURNING {JOB_COLUMNS}");
    Ok(Fragment::new(sql, params))
}

/// Create a job, rejecting a duplicate title at the same company.
pub async fn create(conn: &impl GenericClient, job: &NewJob) -> StoreResult<Job> {
    let duplicate = conn
        .query_opt(
            "SELECT id FROM jobs WHERE title = $1 AND company_handle = $2",
            &[&job.title, &job.company_handle],
        )
        .await?;
    if duplicate.is_some() {
        return Err(StoreError::duplicate(format!(
            "Duplicate job: {} at {}",
            job.title, job.company_handle
        )));
    }

    let row = conn
        .query_one(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, title, salary, equity, company_handle",
            &[&job.title, &job.salary, &job.equity, &job.company_handle],
        )
        .await?;
    Job::from_row(&row)
}

/// List all jobs, ordered by title.
pub async fn find_all(conn: &impl GenericClient) -> StoreResult<Vec<Job>> {
    let rows = conn
        .query(
            "SELECT id, title, salary, equity, company_handle FROM jobs ORDER BY title",
            &[],
        )
        .await?;
    rows.iter().map(Job::from_row).collect()
}

/// List jobs matching a search payload.
pub async fn search(conn: &impl GenericClient, filter: &FilterPayload) -> StoreResult<Vec<Job>> {
    let query = search_query(filter)?;
    let rows = conn.query(query.sql(), &query.bind_refs()).await?;
    rows.iter().map(Job::from_row).collect()
}

/// List a company's jobs, ordered by id.
///
/// The handle is bound as a parameter like every other filter value.
pub async fn find_by_company(
    conn: &impl GenericClient,
    company_handle: &str,
) -> StoreResult<Vec<Job>> {
    let rows = conn
        .query(
            "SELECT id, title, salary, equity, company_handle \
             FROM jobs WHERE company_handle = $1 ORDER BY id",
            &[&company_handle],
        )
        .await?;
    rows.iter().map(Job::from_row).collect()
}

/// Fetch one job by id.
pub async fn get(conn: &impl GenericClient, id: i32) -> StoreResult<Job> {
    let row = conn
        .query_opt(
            "SELECT id, title, salary, equity, company_handle FROM jobs WHERE id = $1",
            &[&id],
        )
        .await?
        .ok_or_else(|| StoreError::not_found(format!("No job: {id}")))?;
    Job::from_row(&row)
}

/// Apply a partial update to a job and return the updated row.
pub async fn update(conn: &impl GenericClient, id: i32, data: &UpdatePayload) -> StoreResult<Job> {
    let query = update_query(id, data)?;
    let row = conn
        .query_opt(query.sql(), &query.bind_refs())
        .await?
        .ok_or_else(|| StoreError::not_found(format!("No job: {id}")))?;
    Job::from_row(&row)
}

/// Delete a job by id.
pub async fn remove(conn: &impl GenericClient, id: i32) -> StoreResult<()> {
    conn.query_opt("DELETE FROM jobs WHERE id = $1 RETURNING id", &[&id])
        .await?
        .ok_or_else(|| StoreError::not_found(format!("No job: {id}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Scalar;

    #[test]
    fn search_query_with_all_filters() {
        let filter = FilterPayload::new()
            .add("title", "j")
            .add("minSalary", 1i64)
            .add("hasEquity", "true");
        let query = search_query(&filter).unwrap();
        assert_eq!(
            query.sql(),
            "SELECT id, title, salary, equity, company_handle FROM jobs \
             WHERE title ILIKE $1 AND salary > $2 AND equity > $3 \
             ORDER BY title"
        );
        assert_eq!(
            query.params(),
            &[Scalar::from("%j%"), Scalar::Int(1), Scalar::Int(0)]
        );
    }

    #[test]
    fn search_query_skips_false_equity_flag() {
        let filter = FilterPayload::new()
            .add("hasEquity", "false")
            .add("minSalary", 2i64);
        let query = search_query(&filter).unwrap();
        assert_eq!(
            query.sql(),
            "SELECT id, title, salary, equity, company_handle FROM jobs \
             WHERE salary > $1 ORDER BY title"
        );
        assert_eq!(query.params(), &[Scalar::Int(2)]);
    }

    #[test]
    fn search_query_degrades_to_full_listing() {
        let filter = FilterPayload::new().add("hasEquity", "nope");
        let query = search_query(&filter).unwrap();
        assert_eq!(
            query.sql(),
            "SELECT id, title, salary, equity, company_handle FROM jobs ORDER BY title"
        );
        assert!(query.params().is_empty());
    }

    #[test]
    fn search_query_rejects_company_filter_keys() {
        let filter = FilterPayload::new().add("minEmployees", 3i64);
        assert!(matches!(
            search_query(&filter),
            Err(StoreError::UnsupportedFilter(key)) if key == "minEmployees"
        ));
    }

    #[test]
    fn update_query_maps_company_handle() {
        let data = UpdatePayload::new()
            .set("title", "j1-renamed")
            .set("companyHandle", "c2");
        let query = update_query(7, &data).unwrap();
        assert_eq!(
            query.sql(),
            "UPDATE jobs SET \"title\"=$1, \"company_handle\"=$2 WHERE id = $3 \
             RETURNING id, title, salary, equity, company_handle"
        );
        assert_eq!(
            query.params(),
            &[
                Scalar::from("j1-renamed"),
                Scalar::from("c2"),
                Scalar::Int(7)
            ]
        );
    }

    #[test]
    fn job_serializes_equity_as_string() {
        let job = Job {
            id: 1,
            title: "j1".into(),
            salary: Some(100),
            equity: Some(Decimal::new(1, 1)),
            company_handle: "c1".into(),
        };
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["equity"], serde_json::json!("0.1"));
        assert_eq!(json["companyHandle"], serde_json::json!("c1"));
    }
}
