//! # formql-db
//!
//! Executes `formql-core`-compiled queries against PostgreSQL and computes
//! pagination statistics.
//!
//! The engine needs only two things from the database: a parameterized
//! count query returning a scalar, and a parameterized row query returning
//! a cursor of rows. Both go through `sqlx`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use formql_db::{scrub, select_with_stats, Params, StatsConfig};
//! use sqlx::PgPool;
//!
//! async fn list_users(pool: &PgPool, mut params: Params) -> formql_db::Result<()> {
//!     scrub(&mut params);
//!     let (rows, stats) = select_with_stats(
//!         pool,
//!         &params,
//!         StatsConfig::new().minimum_limit(10),
//!     )
//!     .await?;
//!
//!     println!("{} of {} rows, page {}/{}", rows.len(), stats.total, stats.page, stats.total_pages);
//!     println!("ran: {}", stats.query);
//!     Ok(())
//! }
//! ```
//!
//! Count-query failures short-circuit; row-query failures carry the
//! already-computed stats (see [`DbError::RowQuery`]).

mod error;
mod paginate;

pub use error::{DbError, Result};
pub use paginate::{select_with_stats, SelectStats, StatsConfig};

// Re-export the commonly used compiler surface so callers need only one
// dependency.
pub use formql_core::{parse_select, resolve_page, scrub, Params, SelectQuery, SqlArg, Transform};
