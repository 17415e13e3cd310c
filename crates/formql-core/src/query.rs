//! The assembled query model and its SQL rendering.

use crate::params::{dedup, remove_empty};
use crate::placeholder::replace_placeholders;
use crate::predicate::PredGroup;
use crate::render::group_sql;
use crate::value::SqlArg;

/// The row-count select expression used by [`Transform::Count`].
pub const COUNT_ALL: &str = "COUNT(*)";

/// Order direction for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    /// Ascending order (ASC)
    Asc,
    /// Descending order (DESC)
    Desc,
}

impl OrderDirection {
    /// Returns the SQL token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Parses an `ASC`/`DESC` token.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// An ordering specification.
///
/// Only fully specified pairs are ever materialized; an order entry whose
/// column or direction never resolved is discarded by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Column to order by.
    pub column: String,
    /// Order direction.
    pub direction: OrderDirection,
}

impl OrderBy {
    /// Creates a new ascending order specification.
    #[must_use]
    pub fn asc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            direction: OrderDirection::Asc,
        }
    }

    /// Creates a new descending order specification.
    #[must_use]
    pub fn desc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            direction: OrderDirection::Desc,
        }
    }

    /// Returns the SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        format!("{} {}", self.column, self.direction.as_str())
    }
}

/// A named query transform, applied after parsing.
///
/// Transforms are pure: each consumes a query and returns the adjusted
/// copy. They compose left-to-right; later transforms override earlier
/// ones on overlapping fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Select `COUNT(*)` only; clears ordering, limit and offset.
    Count,
    /// Select `*` instead of the parsed column list.
    SelectAll,
    /// Keep only the predicate tree, for embedding as a sub-clause.
    WhereOnly,
}

impl Transform {
    /// Applies this transform to a query.
    #[must_use]
    pub fn apply(self, mut query: SelectQuery) -> SelectQuery {
        match self {
            Self::Count => {
                query.select = vec![COUNT_ALL.to_string()];
                query.order_by.clear();
                query.limit = 0;
                query.offset = 0;
            }
            Self::SelectAll => {
                query.select = vec!["*".to_string()];
            }
            Self::WhereOnly => {
                query.select.clear();
                query.from.clear();
                query.order_by.clear();
                query.limit = 0;
                query.offset = 0;
            }
        }
        query
    }
}

/// An assembled SELECT query.
///
/// Built once from a parameter map by [`crate::parse_select`], rendered by
/// [`Self::to_sql`]. Rendering never mutates the query, so serializing the
/// same value twice yields byte-identical output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectQuery {
    /// Selected column expressions, insertion order preserved.
    pub select: Vec<String>,
    /// Source table; empty means unset.
    pub from: String,
    /// Root of the predicate tree.
    pub filter: PredGroup,
    /// Ordering specifications.
    pub order_by: Vec<OrderBy>,
    /// LIMIT; 0 means no clause.
    pub limit: i64,
    /// OFFSET; 0 means no clause.
    pub offset: i64,
}

impl SelectQuery {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the query into positional-placeholder SQL plus arguments.
    #[must_use]
    pub fn to_sql(&self) -> (String, Vec<SqlArg>) {
        self.to_sql_with(&[])
    }

    /// Applies `transforms` left-to-right, then renders.
    #[must_use]
    pub fn to_sql_with(&self, transforms: &[Transform]) -> (String, Vec<SqlArg>) {
        let mut query = self.clone();
        for transform in transforms {
            query = transform.apply(query);
        }

        let select = dedup(&remove_empty(&query.select)).join(", ");
        let (where_sql, args) = group_sql(&query.filter);
        let order = order_sql(&query.order_by);

        let mut sql = String::new();
        push_clause(&mut sql, "SELECT", &select);
        push_clause(&mut sql, "FROM", &query.from);
        push_clause(&mut sql, "WHERE", &where_sql);
        push_clause(&mut sql, "ORDER BY", &order);
        if query.limit != 0 {
            if !sql.is_empty() {
                sql.push(' ');
            }
            sql.push_str(&format!("LIMIT {}", query.limit));
        }
        if query.offset != 0 {
            if !sql.is_empty() {
                sql.push(' ');
            }
            sql.push_str(&format!("OFFSET {}", query.offset));
        }

        (replace_placeholders(&sql), args)
    }
}

/// Appends `keyword content` to the buffer when the content is non-empty.
fn push_clause(sql: &mut String, keyword: &str, content: &str) {
    if content.is_empty() {
        return;
    }
    if !sql.is_empty() {
        sql.push(' ');
    }
    sql.push_str(keyword);
    sql.push(' ');
    sql.push_str(content);
}

/// Joins order specifications with `, `.
fn order_sql(order_by: &[OrderBy]) -> String {
    order_by
        .iter()
        .map(OrderBy::to_sql)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::PredNode;

    fn sample_query() -> SelectQuery {
        let mut filter = PredGroup::default();
        filter.preds.insert(
            "1".to_string(),
            PredNode {
                column: "name".to_string(),
                operator: "EQ".to_string(),
                value: "bob".to_string(),
                values: vec!["bob".to_string()],
                ..PredNode::default()
            },
        );
        SelectQuery {
            select: vec!["id".to_string(), "name".to_string()],
            from: "users".to_string(),
            filter,
            order_by: vec![OrderBy::desc("id")],
            limit: 10,
            offset: 20,
        }
    }

    #[test]
    fn test_full_assembly() {
        let (sql, args) = sample_query().to_sql();
        assert_eq!(
            sql,
            "SELECT id, name FROM users WHERE name = $1 ORDER BY id DESC LIMIT 10 OFFSET 20"
        );
        assert_eq!(args, vec![SqlArg::text("bob")]);
    }

    #[test]
    fn test_zero_limit_offset_omitted() {
        let mut query = sample_query();
        query.limit = 0;
        query.offset = 0;
        let (sql, _) = query.to_sql();
        assert!(!sql.contains("LIMIT"));
        assert!(!sql.contains("OFFSET"));
    }

    #[test]
    fn test_select_list_deduplicated() {
        let mut query = sample_query();
        query.select = vec![
            "id".to_string(),
            String::new(),
            "id".to_string(),
            "name".to_string(),
        ];
        let (sql, _) = query.to_sql();
        assert!(sql.starts_with("SELECT id, name FROM"));
    }

    #[test]
    fn test_count_transform() {
        let (sql, args) = sample_query().to_sql_with(&[Transform::Count]);
        assert_eq!(sql, "SELECT COUNT(*) FROM users WHERE name = $1");
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_select_all_transform() {
        let (sql, _) = sample_query().to_sql_with(&[Transform::SelectAll]);
        assert!(sql.starts_with("SELECT * FROM users"));
    }

    #[test]
    fn test_where_only_transform() {
        let (sql, args) = sample_query().to_sql_with(&[Transform::WhereOnly]);
        assert_eq!(sql, "WHERE name = $1");
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_transforms_compose_left_to_right() {
        // SelectAll after Count overrides the count column but keeps the
        // cleared ordering and limits.
        let (sql, _) = sample_query().to_sql_with(&[Transform::Count, Transform::SelectAll]);
        assert_eq!(sql, "SELECT * FROM users WHERE name = $1");
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let query = sample_query();
        let first = query.to_sql();
        let second = query.to_sql();
        assert_eq!(first, second);
    }

    #[test]
    fn test_deterministic_with_placeholder_column() {
        // Escaping must not accumulate across renders.
        let mut query = sample_query();
        if let Some(node) = query.filter.preds.get_mut("1") {
            node.column = "odd?name".to_string();
        }
        let (first, _) = query.to_sql();
        let (second, _) = query.to_sql();
        assert_eq!(first, second);
        assert!(first.contains("odd?name = $1"));
    }

    #[test]
    fn test_empty_query_renders_empty() {
        let (sql, args) = SelectQuery::new().to_sql();
        assert!(sql.is_empty());
        assert!(args.is_empty());
    }

    #[test]
    fn test_order_direction_parse() {
        assert_eq!(OrderDirection::parse("ASC"), Some(OrderDirection::Asc));
        assert_eq!(OrderDirection::parse("DESC"), Some(OrderDirection::Desc));
        assert_eq!(OrderDirection::parse("asc"), None);
        assert_eq!(OrderDirection::parse("nyeh"), None);
    }
}
