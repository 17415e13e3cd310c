//! The predicate tree.
//!
//! A WHERE clause is a tree of [`PredGroup`] nodes: each group combines its
//! children with AND or OR, and each child is either a leaf comparison or a
//! nested group. Children are keyed by the opaque path segment that
//! addressed them; the `BTreeMap` keeps every walk sorted by that key so
//! serialization is deterministic regardless of parameter-map iteration
//! order.

use std::collections::BTreeMap;

/// The AND connector token.
pub const AND: &str = "AND";

/// The OR connector token.
pub const OR: &str = "OR";

/// A group of sibling predicates combined with one connector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredGroup {
    /// Combine children with OR instead of AND.
    pub or: bool,
    /// Child predicates keyed by path segment.
    pub preds: BTreeMap<String, PredNode>,
}

impl PredGroup {
    /// Returns the SQL connector for this group.
    #[must_use]
    pub const fn connector(&self) -> &'static str {
        if self.or {
            OR
        } else {
            AND
        }
    }

    /// Renders this group as a WHERE-clause fragment plus its arguments.
    ///
    /// The fragment uses generic `?` placeholders; run the result through
    /// [`crate::replace_placeholders`] for the positional dialect.
    #[must_use]
    pub fn to_sql(&self) -> (String, Vec<crate::SqlArg>) {
        crate::render::group_sql(self)
    }
}

/// One predicate: either a leaf comparison or a nested group.
///
/// The `nested` flag is authoritative for serialization. A node gains the
/// flag when some key's path continues past it; an `AOR` key alone creates
/// the child group without setting the flag, so such a node still renders
/// as a leaf.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredNode {
    /// Leaf column name.
    pub column: String,
    /// Leaf operator token (see [`Operator`]).
    pub operator: String,
    /// Leaf single value (first value of the `VAL` key).
    pub value: String,
    /// Leaf value list, deduplicated.
    pub values: Vec<String>,
    /// Whether this node serializes as its nested group.
    pub nested: bool,
    /// Child group, lazily created.
    pub group: Option<Box<PredGroup>>,
}

impl PredNode {
    /// Returns the child group, creating it if absent.
    pub fn ensure_group(&mut self) -> &mut PredGroup {
        self.group.get_or_insert_with(Box::default)
    }
}

/// The closed set of leaf operator tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `=`
    Eq,
    /// `<>`
    Ne,
    /// `IN (…)`
    In,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `IS NULL`
    Null,
    /// `IS NOT NULL`
    NotNull,
    /// `LIKE`
    Like,
    /// `ILIKE`
    ILike,
    /// `BETWEEN … AND …`
    Between,
    /// Sentinel meaning "no filter"; renders nothing. Form widgets emit it
    /// for untouched inputs.
    Ignore,
}

impl Operator {
    /// Returns the wire token for this operator.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::In => "IN",
            Self::Gt => "GT",
            Self::Ge => "GE",
            Self::Lt => "LT",
            Self::Le => "LE",
            Self::Null => "NULL",
            Self::NotNull => "NOTNULL",
            Self::Like => "LIKE",
            Self::ILike => "ILIKE",
            Self::Between => "BETWEEN",
            Self::Ignore => "IGNORE",
        }
    }

    /// Parses a wire token into an operator.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "EQ" => Some(Self::Eq),
            "NE" => Some(Self::Ne),
            "IN" => Some(Self::In),
            "GT" => Some(Self::Gt),
            "GE" => Some(Self::Ge),
            "LT" => Some(Self::Lt),
            "LE" => Some(Self::Le),
            "NULL" => Some(Self::Null),
            "NOTNULL" => Some(Self::NotNull),
            "LIKE" => Some(Self::Like),
            "ILIKE" => Some(Self::ILike),
            "BETWEEN" => Some(Self::Between),
            "IGNORE" => Some(Self::Ignore),
            _ => None,
        }
    }
}
