//! Paginated query execution.
//!
//! Runs the count-transformed form of a parsed query to size the result
//! set, clamps the limit, resolves the requested page into an offset, and
//! fetches the page of rows. The count and row queries are two sequential
//! round-trips with no transaction between them, so the total and the page
//! may observe different snapshots under concurrent writers.

use formql_core::{parse_select, subst, Params, SelectQuery, SqlArg, Suffix, Transform};
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;

use crate::error::{DbError, Result};

/// Result-set statistics for one paginated request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectStats {
    /// Human-readable form of the executed query, with arguments inlined.
    /// Display-only; never execute it.
    pub query: String,
    /// Total number of matching rows.
    pub total: i64,
    /// Effective page size after clamping.
    pub limit: i64,
    /// Current page, 1-based.
    pub page: i64,
    /// Total page count (ceiling of total / limit).
    pub total_pages: i64,
}

/// Configuration for [`select_with_stats`].
#[derive(Debug, Clone)]
pub struct StatsConfig {
    /// Lower bound for the page size; a parsed limit below it is raised.
    pub minimum_limit: i64,
    /// Transforms applied to the query before rendering its display form.
    pub query_options: Vec<Transform>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            minimum_limit: 5,
            query_options: Vec::new(),
        }
    }
}

impl StatsConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum page size.
    #[must_use]
    pub fn minimum_limit(mut self, limit: i64) -> Self {
        self.minimum_limit = limit;
        self
    }

    /// Appends a transform for the display query.
    #[must_use]
    pub fn query_option(mut self, transform: Transform) -> Self {
        self.query_options.push(transform);
        self
    }

    /// Renders the display query with a `SELECT *` column list.
    #[must_use]
    pub fn query_all(self) -> Self {
        self.query_option(Transform::SelectAll)
    }
}

/// Parses `params`, counts the matching rows, then fetches the requested
/// page.
///
/// A count-query failure short-circuits before any row query runs. A
/// row-query failure is returned as [`DbError::RowQuery`] carrying the
/// stats that were already computed.
pub async fn select_with_stats(
    pool: &PgPool,
    params: &Params,
    config: StatsConfig,
) -> Result<(Vec<PgRow>, SelectStats)> {
    let mut query = parse_select(params);

    let (count_sql, count_args) = query.to_sql_with(&[Transform::Count]);
    let mut count_query = sqlx::query(&count_sql);
    for arg in count_args {
        count_query = bind_arg(count_query, arg);
    }
    let row = count_query.fetch_one(pool).await?;
    let total: i64 = row.get(0);

    let stats = apply_pagination(&mut query, params, &config, total);
    debug!(
        query = %stats.query,
        total = stats.total,
        page = stats.page,
        "compiled paginated select"
    );

    let (row_sql, row_args) = query.to_sql();
    let mut row_query = sqlx::query(&row_sql);
    for arg in row_args {
        row_query = bind_arg(row_query, arg);
    }
    match row_query.fetch_all(pool).await {
        Ok(rows) => Ok((rows, stats)),
        Err(source) => Err(DbError::RowQuery {
            source,
            stats: Box::new(stats),
        }),
    }
}

/// Clamps the limit, resolves the page into an offset on `query`, and
/// builds the stats record for `total` matching rows.
fn apply_pagination(
    query: &mut SelectQuery,
    params: &Params,
    config: &StatsConfig,
    total: i64,
) -> SelectStats {
    if query.limit < config.minimum_limit {
        query.limit = config.minimum_limit;
    }
    let page = page_number(params);
    query.offset = query.limit * (page - 1);

    let (display_sql, display_args) = query.to_sql_with(&config.query_options);
    SelectStats {
        query: subst(&display_sql, &display_args),
        total,
        limit: query.limit,
        page,
        total_pages: total_pages(total, query.limit),
    }
}

/// Resolves the requested page from the `PAGE` parameter.
///
/// Defaults to 1; a parsed value only ever raises it, so malformed or
/// non-positive input degrades to the first page.
fn page_number(params: &Params) -> i64 {
    let mut page = 1;
    if let Some(first) = params.get(Suffix::Page.token()).and_then(|v| v.first()) {
        let parsed = first.parse().unwrap_or(0);
        if parsed > page {
            page = parsed;
        }
    }
    page
}

/// Ceiling division of `total` by `limit`; 0 when the limit is 0.
fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

/// Binds a `SqlArg` parameter to a query.
fn bind_arg<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    arg: SqlArg,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    match arg {
        SqlArg::Null => query.bind(Option::<String>::None),
        SqlArg::Bool(b) => query.bind(b),
        SqlArg::Int(i) => query.bind(i),
        SqlArg::Float(f) => query.bind(f),
        SqlArg::Text(s) => query.bind(s),
        SqlArg::Timestamp(ts) => query.bind(ts),
        SqlArg::Json(v) => query.bind(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    fn sample_params(page: Option<&str>) -> Params {
        let mut params = Params::new();
        params.insert("SEL".to_string(), strings(&["id", "name"]));
        params.insert("FRM".to_string(), strings(&["users"]));
        if let Some(page) = page {
            params.insert("PAGE".to_string(), strings(&[page]));
        }
        params
    }

    #[test]
    fn test_stats_with_page_unset() {
        let params = sample_params(None);
        let mut query = parse_select(&params);
        let stats = apply_pagination(&mut query, &params, &StatsConfig::new(), 12);

        assert_eq!(stats.page, 1);
        assert_eq!(stats.limit, 5);
        assert_eq!(stats.total, 12);
        assert_eq!(stats.total_pages, 3);
        assert_eq!(query.offset, 0);
        assert_eq!(stats.query, "SELECT id, name FROM users LIMIT 5;");
    }

    #[test]
    fn test_stats_with_page_three() {
        let params = sample_params(Some("3"));
        let mut query = parse_select(&params);
        let stats = apply_pagination(&mut query, &params, &StatsConfig::new(), 12);

        assert_eq!(stats.page, 3);
        assert_eq!(query.offset, 10);
        assert_eq!(
            stats.query,
            "SELECT id, name FROM users LIMIT 5 OFFSET 10;"
        );
    }

    #[test]
    fn test_page_never_lowered_below_one() {
        assert_eq!(page_number(&sample_params(Some("0"))), 1);
        assert_eq!(page_number(&sample_params(Some("-3"))), 1);
        assert_eq!(page_number(&sample_params(Some("junk"))), 1);
        assert_eq!(page_number(&sample_params(None)), 1);
        assert_eq!(page_number(&sample_params(Some("7"))), 7);
    }

    #[test]
    fn test_limit_above_minimum_is_kept() {
        let mut params = sample_params(None);
        params.insert("LIM".to_string(), strings(&["50"]));
        let mut query = parse_select(&params);
        let stats = apply_pagination(&mut query, &params, &StatsConfig::new(), 120);

        assert_eq!(stats.limit, 50);
        assert_eq!(stats.total_pages, 3);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(12, 5), 3);
        assert_eq!(total_pages(10, 5), 2);
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(1, 5), 1);
        assert_eq!(total_pages(7, 0), 0);
    }

    #[test]
    fn test_query_all_option_changes_display_only() {
        let params = sample_params(None);
        let mut query = parse_select(&params);
        let stats = apply_pagination(
            &mut query,
            &params,
            &StatsConfig::new().query_all(),
            12,
        );

        assert_eq!(stats.query, "SELECT * FROM users LIMIT 5;");
        // The query itself still selects the parsed columns.
        let (sql, _) = query.to_sql();
        assert!(sql.starts_with("SELECT id, name"));
    }

    #[test]
    fn test_config_builder() {
        let config = StatsConfig::new()
            .minimum_limit(25)
            .query_option(Transform::SelectAll);
        assert_eq!(config.minimum_limit, 25);
        assert_eq!(config.query_options, vec![Transform::SelectAll]);
    }
}
