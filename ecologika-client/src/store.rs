//! Relational store endpoints
//!
//! Typed select/insert/update over the platform's row API. Queries are
//! built with [`TableQuery`] and decoded straight into the shared model
//! types via serde.

use crate::{ClientError, ClientResult, HttpClient};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Query builder for list selects
///
/// Filters compose conjunctively, matching the store's semantics.
#[derive(Debug, Clone)]
pub struct TableQuery {
    table: String,
    params: Vec<(String, String)>,
}

impl TableQuery {
    /// Query all rows of a table
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            params: vec![("select".into(), "*".into())],
        }
    }

    /// Restrict the selected columns
    pub fn select(mut self, columns: &str) -> Self {
        self.params.retain(|(k, _)| k != "select");
        self.params.push(("select".into(), columns.into()));
        self
    }

    /// Exact-match filter
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.into(), format!("eq.{}", value.to_string())));
        self
    }

    /// Case-insensitive substring filter
    pub fn contains(mut self, column: &str, value: &str) -> Self {
        self.params.push((column.into(), format!("ilike.*{}*", value)));
        self
    }

    /// In-list filter
    pub fn in_list(mut self, column: &str, values: &[String]) -> Self {
        self.params
            .push((column.into(), format!("in.({})", values.join(","))));
        self
    }

    /// Ascending order
    pub fn order_asc(mut self, column: &str) -> Self {
        self.params.push(("order".into(), format!("{}.asc", column)));
        self
    }

    /// Descending order
    pub fn order_desc(mut self, column: &str) -> Self {
        self.params.push(("order".into(), format!("{}.desc", column)));
        self
    }

    /// Row limit
    pub fn limit(mut self, limit: u32) -> Self {
        self.params.push(("limit".into(), limit.to_string()));
        self
    }

    fn path(&self) -> String {
        format!("rest/v1/{}", self.table)
    }
}

/// Relational store API handle
#[derive(Debug, Clone)]
pub struct StoreApi {
    http: HttpClient,
}

impl StoreApi {
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Run a list select
    pub async fn select<T: DeserializeOwned>(&self, query: TableQuery) -> ClientResult<Vec<T>> {
        let request = self
            .http
            .request(Method::GET, &query.path())
            .query(&query.params);
        self.http.send(request).await
    }

    /// Run a select expected to yield at most one row
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        query: TableQuery,
    ) -> ClientResult<Option<T>> {
        let mut rows: Vec<T> = self.select(query.limit(1)).await?;
        Ok(rows.pop())
    }

    /// Insert a row and return its stored representation
    pub async fn insert<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        row: &B,
    ) -> ClientResult<T> {
        let request = self
            .http
            .request(Method::POST, &format!("rest/v1/{}", table))
            .header("Prefer", "return=representation")
            .json(row);

        let mut rows: Vec<T> = self.http.send(request).await?;
        rows.pop()
            .ok_or_else(|| ClientError::InvalidResponse(format!("empty insert response from {}", table)))
    }

    /// Update a row by primary key and return its stored representation
    pub async fn update_by_id<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        id: &str,
        changes: &B,
    ) -> ClientResult<T> {
        let request = self
            .http
            .request(Method::PATCH, &format!("rest/v1/{}", table))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(changes);

        let mut rows: Vec<T> = self.http.send(request).await?;
        rows.pop()
            .ok_or_else(|| ClientError::NotFound(format!("{}/{}", table, id)))
    }

    /// Delete a row by primary key
    pub async fn delete_by_id(&self, table: &str, id: &str) -> ClientResult<()> {
        let request = self
            .http
            .request(Method::DELETE, &format!("rest/v1/{}", table))
            .query(&[("id", format!("eq.{}", id))]);
        self.http.send_no_content(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params() {
        let query = TableQuery::new("products")
            .eq("is_active", true)
            .order_desc("created_at");

        assert_eq!(query.path(), "rest/v1/products");
        assert!(query.params.contains(&("is_active".into(), "eq.true".into())));
        assert!(query.params.contains(&("order".into(), "created_at.desc".into())));
    }

    #[test]
    fn test_in_list_and_select() {
        let query = TableQuery::new("products")
            .select("material")
            .in_list("id", &["a".into(), "b".into()]);

        assert!(query.params.contains(&("select".into(), "material".into())));
        assert!(query.params.contains(&("id".into(), "in.(a,b)".into())));
    }

    #[test]
    fn test_substring_filter() {
        let query = TableQuery::new("products").contains("location", "porto");
        assert!(query
            .params
            .contains(&("location".into(), "ilike.*porto*".into())));
    }
}
