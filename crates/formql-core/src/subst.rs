//! Debug literal rendering.
//!
//! Inlines arguments into a rendered query so it can be logged or shown in
//! a UI. The output is for inspection only: literal interpolation gives no
//! injection safety and the result must never be executed.

use chrono::SecondsFormat;
use regex::{Captures, Regex};

use crate::value::SqlArg;

/// Inlines `args` into `query`, replacing each `$N` marker with a literal.
///
/// `--` comments and line breaks are normalized to single spaces first, and
/// a trailing `;` is appended if absent. Strings and timestamps render
/// single-quoted, integers render bare, NULL renders as the keyword, and
/// any other value is attempted as a JSON literal; if that serialization
/// fails the error text is appended to the output instead of failing the
/// caller.
#[must_use]
pub fn subst(query: &str, args: &[SqlArg]) -> String {
    let comment_re = Regex::new(r"(?m)--.*$").expect("valid regex");
    let whitespace_re = Regex::new(r"\s+").expect("valid regex");
    let marker_re = Regex::new(r"\$(\d+)").expect("valid regex");

    let query = comment_re.replace_all(query, " ");
    let query = whitespace_re.replace_all(&query, " ");
    let query = query.trim();

    let mut failure = None;
    let mut substituted = marker_re
        .replace_all(query, |caps: &Captures<'_>| {
            if failure.is_some() {
                return caps[0].to_string();
            }
            let index: usize = caps[1].parse().unwrap_or(0);
            let Some(arg) = index.checked_sub(1).and_then(|i| args.get(i)) else {
                return caps[0].to_string();
            };
            match literal(arg) {
                Ok(lit) => lit,
                Err(err) => {
                    failure = Some(err.to_string());
                    caps[0].to_string()
                }
            }
        })
        .into_owned();

    if let Some(err) = failure {
        return format!("{substituted} {err}");
    }
    if !substituted.ends_with(';') {
        substituted.push(';');
    }
    substituted
}

/// Renders one argument as a printable SQL literal.
fn literal(arg: &SqlArg) -> Result<String, serde_json::Error> {
    match arg {
        SqlArg::Null => Ok(String::from("NULL")),
        SqlArg::Int(n) => Ok(n.to_string()),
        SqlArg::Text(s) => Ok(format!("'{s}'")),
        SqlArg::Timestamp(ts) => Ok(format!(
            "'{}'",
            ts.to_rfc3339_opts(SecondsFormat::Secs, true)
        )),
        SqlArg::Bool(b) => Ok(format!("'{}'", serde_json::to_string(b)?)),
        SqlArg::Float(f) => Ok(format!("'{}'", serde_json::to_string(f)?)),
        SqlArg::Json(v) => Ok(format!("'{}'", serde_json::to_string(v)?)),
    }
}
