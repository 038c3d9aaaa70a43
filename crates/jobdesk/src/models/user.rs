//! User data access.
//!
//! Users are keyed by username. Partial updates map `firstName`,
//! `lastName`, and `isAdmin` onto their storage columns; job applications
//! live in a join table keyed by (username, job_id).
//!
//! Registration, password storage, and authentication belong to the HTTP
//! layer's auth stack, not here.

use crate::client::GenericClient;
use crate::error::{StoreError, StoreResult};
use crate::field_map::FieldMap;
use crate::fragment::Fragment;
use crate::row::{FromRow, RowExt};
use crate::update::{UpdatePayload, set_clause};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

const USER_COLUMNS: &str = "username, first_name, last_name, email, is_admin";

/// A user row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

impl FromRow for User {
    fn from_row(row: &Row) -> StoreResult<Self> {
        Ok(Self {
            username: row.try_get_column("username")?,
            first_name: row.try_get_column("first_name")?,
            last_name: row.try_get_column("last_name")?,
            email: row.try_get_column("email")?,
            is_admin: row.try_get_column("is_admin")?,
        })
    }
}

/// Update-field mapping for users.
pub fn update_columns() -> FieldMap {
    FieldMap::new()
        .map("firstName", "first_name")
        .map("lastName", "last_name")
        .map("isAdmin", "is_admin")
}

/// Build the partial-update statement for a user.
pub fn update_query(username: &str, data: &UpdatePayload) -> StoreResult<Fragment> {
    let set = set_clause(data, &update_columns())?;
    let username_idx = set.next_placeholder();
    let (set_sql, mut params) = set.into_parts();
    params.push(username.into());

    let sql = format!(
        "UPDATE users SET {set_sql} WHERE username = ${username_idx} RETURNING {USER_COLUMNS}"
    );
    Ok(Fragment::new(sql, params))
}

/// List all users, ordered by username.
pub async fn find_all(conn: &impl GenericClient) -> StoreResult<Vec<User>> {
    let rows = conn
        .query(
            "SELECT username, first_name, last_name, email, is_admin \
             FROM users ORDER BY username",
            &[],
        )
        .await?;
    rows.iter().map(User::from_row).collect()
}

/// Fetch one user by username.
pub async fn get(conn: &impl GenericClient, username: &str) -> StoreResult<User> {
    let row = conn
        .query_opt(
            "SELECT username, first_name, last_name, email, is_admin \
             FROM users WHERE username = $1",
            &[&username],
        )
        .await?
        .ok_or_else(|| StoreError::not_found(format!("No user: {username}")))?;
    User::from_row(&row)
}

/// Apply a partial update to a user and return the updated row.
pub async fn update(
    conn: &impl GenericClient,
    username: &str,
    data: &UpdatePayload,
) -> StoreResult<User> {
    let query = update_query(username, data)?;
    let row = conn
        .query_opt(query.sql(), &query.bind_refs())
        .await?
        .ok_or_else(|| StoreError::not_found(format!("No user: {username}")))?;
    User::from_row(&row)
}

/// Delete a user by username.
pub async fn remove(conn: &impl GenericClient, username: &str) -> StoreResult<()> {
    conn.query_opt(
        "DELETE FROM users WHERE username = $1 RETURNING username",
        &[&username],
    )
    .await?
    .ok_or_else(|| StoreError::not_found(format!("No user: {username}")))?;
    Ok(())
}

/// List the job ids a user has applied to.
pub async fn applications(conn: &impl GenericClient, username: &str) -> StoreResult<Vec<i32>> {
    let rows = conn
        .query(
            "SELECT job_id FROM applications WHERE username = $1 ORDER BY job_id",
            &[&username],
        )
        .await?;
    rows.iter().map(|row| row.try_get_column("job_id")).collect()
}

/// Record a job application and return the applied job id.
///
/// A missing user or job surfaces as a foreign-key violation from the join
/// table.
pub async fn apply(conn: &impl GenericClient, username: &str, job_id: i32) -> StoreResult<i32> {
    let row = conn
        .query_one(
            "INSERT INTO applications (username, job_id) VALUES ($1, $2) RETURNING job_id",
            &[&username, &job_id],
        )
        .await?;
    row.try_get_column("job_id")
}
