//! WHERE-clause serialization.
//!
//! Walks the predicate tree and renders each node per the operator grammar,
//! appending arguments in render order. Fragments use generic `?`
//! placeholders; the placeholder translator rewrites them afterwards.

use tracing::warn;

use crate::params::dedup;
use crate::predicate::{Operator, PredGroup, PredNode};
use crate::value::SqlArg;

/// Renders a group into a clause fragment and its arguments.
///
/// Children are visited in key order (the tree map is sorted), non-empty
/// fragments joined with the group's connector. An empty group renders to
/// an empty fragment with no arguments.
pub(crate) fn group_sql(group: &PredGroup) -> (String, Vec<SqlArg>) {
    let connector = group.connector();
    let mut sql = String::new();
    let mut args = Vec::new();
    for node in group.preds.values() {
        let (node_sql, node_args) = node_sql(node);
        if node_sql.is_empty() {
            continue;
        }
        if !sql.is_empty() {
            sql.push(' ');
            sql.push_str(connector);
            sql.push(' ');
        }
        sql.push_str(&node_sql);
        args.extend(node_args);
    }
    (sql, args)
}

/// Renders one node: a nested node recurses into its child group, a leaf
/// renders per its operator.
fn node_sql(node: &PredNode) -> (String, Vec<SqlArg>) {
    if node.nested {
        if !node.column.is_empty() || !node.operator.is_empty() {
            // Ambiguous encoding: the node was addressed both as a leaf and
            // as a parent. Nested wins; the leaf fields are unreachable.
            warn!(
                column = %node.column,
                operator = %node.operator,
                "predicate node is both nested and leaf-assigned; rendering the nested group"
            );
        }
        let (inner, args) = node
            .group
            .as_deref()
            .map(group_sql)
            .unwrap_or_default();
        return (format!("({inner})"), args);
    }

    // Escape literal placeholder markers in the column so the translator
    // leaves them alone.
    let column = node.column.replace('?', "??");
    if column.is_empty() {
        return (String::new(), Vec::new());
    }
    let Some(operator) = Operator::parse(node.operator.trim()) else {
        return (String::new(), Vec::new());
    };

    match operator {
        Operator::Eq => (format!("{column} = ?"), vec![SqlArg::text(&node.value)]),
        Operator::Ne => (format!("{column} <> ?"), vec![SqlArg::text(&node.value)]),
        Operator::Gt => (format!("{column} > ?"), vec![SqlArg::text(&node.value)]),
        Operator::Ge => (format!("{column} >= ?"), vec![SqlArg::text(&node.value)]),
        Operator::Lt => (format!("{column} < ?"), vec![SqlArg::text(&node.value)]),
        Operator::Le => (format!("{column} <= ?"), vec![SqlArg::text(&node.value)]),
        Operator::Like => (format!("{column} LIKE ?"), vec![SqlArg::text(&node.value)]),
        Operator::ILike => (format!("{column} ILIKE ?"), vec![SqlArg::text(&node.value)]),
        Operator::In => {
            let values = dedup(&node.values);
            let placeholders: Vec<&str> = values.iter().map(|_| "?").collect();
            let args = values.into_iter().map(SqlArg::Text).collect();
            (
                format!("{column} IN ({})", placeholders.join(", ")),
                args,
            )
        }
        Operator::Null => (format!("{column} IS NULL"), Vec::new()),
        Operator::NotNull => (format!("{column} IS NOT NULL"), Vec::new()),
        Operator::Between => {
            let values = dedup(&node.values);
            // Fewer than two bounds renders nothing; lenient by design.
            if values.len() < 2 {
                return (String::new(), Vec::new());
            }
            let args = values.into_iter().take(2).map(SqlArg::Text).collect();
            (format!("{column} BETWEEN ? AND ?"), args)
        }
        Operator::Ignore => (String::new(), Vec::new()),
    }
}
