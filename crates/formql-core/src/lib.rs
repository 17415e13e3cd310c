//! # formql-core
//!
//! A compiler from flat, URL-style request parameters to parameterized SQL
//! SELECT statements.
//!
//! Parameter keys are dotted paths with a reserved suffix (`SEL`, `FRM`,
//! `COL`, `OPR`, `VAL`, `ORD`, `LIM`, `OFF`, `AOR`, `PAGE`). Path segments
//! address nodes in an arbitrarily nested AND/OR predicate tree; the tree
//! is rendered deterministically into a WHERE clause with positional
//! placeholders and an ordered argument list.
//!
//! ## Quick Start
//!
//! ```
//! use formql_core::{parse_select, scrub, Params, Transform};
//!
//! let mut params = Params::new();
//! params.insert("SEL".into(), vec!["id".into(), "name".into()]);
//! params.insert("FRM".into(), vec!["users".into()]);
//! params.insert("1.COL".into(), vec!["name".into()]);
//! params.insert("1.OPR".into(), vec!["EQ".into()]);
//! params.insert("1.VAL".into(), vec!["bob".into()]);
//! params.insert("csrf_token".into(), vec!["junk".into()]);
//!
//! // The scrub step is the only input validation: keys with unknown
//! // suffixes are dropped.
//! scrub(&mut params);
//!
//! let query = parse_select(&params);
//! let (sql, args) = query.to_sql();
//! assert_eq!(sql, "SELECT id, name FROM users WHERE name = $1");
//! assert_eq!(args.len(), 1);
//!
//! // A count-only variant of the same query:
//! let (sql, _) = query.to_sql_with(&[Transform::Count]);
//! assert_eq!(sql, "SELECT COUNT(*) FROM users WHERE name = $1");
//! ```
//!
//! ## Nesting
//!
//! A key like `4.1.COL` addresses node `1` inside the child group of node
//! `4`; `4.AOR=OR` makes that child group a disjunction. Groups render
//! wrapped in parentheses, so arbitrarily deep AND/OR combinations can be
//! encoded from a flat form.
//!
//! The compiler is deliberately lenient: malformed numbers degrade to 0,
//! unknown operators render nothing, and no column or table names are
//! validated — values are only ever bound as parameters, never spliced
//! into the SQL text.

mod params;
mod parse;
mod placeholder;
mod predicate;
mod query;
mod render;
mod subst;
mod suffix;
mod value;

pub use params::{resolve_page, scrub, Params};
pub use parse::parse_select;
pub use placeholder::replace_placeholders;
pub use predicate::{Operator, PredGroup, PredNode, AND, OR};
pub use query::{OrderBy, OrderDirection, SelectQuery, Transform, COUNT_ALL};
pub use subst::subst;
pub use suffix::{
    aor_key, col_key, is_valid_suffix, key, opr_key, ord_key, split_key, val_key, Suffix, SEP,
};
pub use value::{SqlArg, ToSqlArg};
