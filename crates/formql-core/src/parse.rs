//! Parameter-map parsing.
//!
//! Folds a full parameter map into one [`SelectQuery`]: scalar keys fill
//! the select/from/limit/offset fields, path-addressed keys grow the
//! predicate tree, and `ORD` keys resolve into the order list.

use std::collections::BTreeMap;

use crate::params::{dedup, param_value, param_value_int, remove_empty, Params};
use crate::predicate::{Operator, PredGroup, OR};
use crate::query::{OrderBy, OrderDirection, SelectQuery};
use crate::suffix::{split_key, Suffix};

/// Parses a parameter map into a query.
///
/// Keys with unrecognized suffixes are ignored; this never fails. Malformed
/// numeric limit/offset values degrade to 0.
#[must_use]
pub fn parse_select(params: &Params) -> SelectQuery {
    let mut query = SelectQuery::new();
    query.select = dedup(&remove_empty(
        params
            .get(Suffix::Select.token())
            .map_or(&[][..], Vec::as_slice),
    ));
    query.from = param_value(params, Suffix::From.token()).to_string();
    query.limit = param_value_int(params, Suffix::Limit.token());
    query.offset = param_value_int(params, Suffix::Offset.token());

    // Order entries are keyed by their source parameter key; the BTreeMap
    // yields them sorted so output is stable across map iteration orders.
    let mut order_entries: BTreeMap<String, OrderBy> = BTreeMap::new();

    for (name, raw_values) in params {
        let (path, suffix_token) = split_key(name);
        let Some(suffix) = Suffix::parse(suffix_token) else {
            continue;
        };
        let value = raw_values.first().cloned().unwrap_or_default();
        let values = dedup(raw_values);
        match suffix {
            Suffix::Order => {
                if let Some(orderby) = resolve_order(&values) {
                    order_entries.insert(name.clone(), orderby);
                }
            }
            Suffix::Column | Suffix::Operator | Suffix::Value | Suffix::AndOr => {
                apply_tree_key(&mut query.filter, &path, suffix, &value, &values);
            }
            Suffix::Select | Suffix::From | Suffix::Limit | Suffix::Offset | Suffix::Page => {}
        }
    }

    query.order_by = order_entries.into_values().collect();
    query
}

/// Scans an `ORD` value list into an order specification.
///
/// Tokens are consumed in order: `IGNORE` aborts the entry, `ASC`/`DESC`
/// set the direction, anything else sets the column. Scanning stops as soon
/// as both halves are set; an entry that never completes is discarded.
fn resolve_order(values: &[String]) -> Option<OrderBy> {
    let mut column = String::new();
    let mut direction = None;
    for token in values {
        if token == Operator::Ignore.token() {
            return None;
        }
        match OrderDirection::parse(token) {
            Some(dir) => direction = Some(dir),
            None => column = token.clone(),
        }
        if let Some(dir) = direction {
            if !column.is_empty() {
                return Some(OrderBy {
                    column,
                    direction: dir,
                });
            }
        }
    }
    None
}

/// Applies one path-addressed key to the predicate tree.
///
/// Every segment except the last ensures a node, marks it nested and
/// descends into its child group; the last segment receives the suffix
/// effect. A key with no path segments has no addressable node and is
/// ignored.
fn apply_tree_key(
    group: &mut PredGroup,
    path: &[&str],
    suffix: Suffix,
    value: &str,
    values: &[String],
) {
    let Some((head, tail)) = path.split_first() else {
        return;
    };
    let node = group.preds.entry((*head).to_string()).or_default();
    if tail.is_empty() {
        match suffix {
            Suffix::Column => node.column = value.to_string(),
            Suffix::Operator => node.operator = value.to_string(),
            Suffix::Value => {
                node.value = value.to_string();
                node.values = values.to_vec();
            }
            Suffix::AndOr => node.ensure_group().or = value == OR,
            _ => {}
        }
        return;
    }
    node.nested = true;
    apply_tree_key(node.ensure_group(), tail, suffix, value, values);
}
