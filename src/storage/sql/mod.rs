//! Unified SQL storage implementations.
//!
//! This module provides shared implementations for SQL-based storage backends
//! (PostgreSQL, SQLite). The implementations are parameterized by database type
//! using the `SqlDatabase` trait.

mod pricing_catalog;
mod query;
mod session_store;

use chrono::{DateTime, Utc};

pub use pricing_catalog::SqlPricingCatalog;
pub use query::SqlDatabase;
pub use session_store::SqlSessionStore;

use crate::interfaces::{Result, StorageError};

/// Narrow a BIGINT column to `u16`.
pub(crate) fn column_u16(field: &'static str, value: i64) -> Result<u16> {
    u16::try_from(value).map_err(|_| StorageError::InvalidData {
        field,
        message: format!("{value} does not fit in u16"),
    })
}

/// Narrow a nullable BIGINT column to `u16`.
pub(crate) fn column_opt_u16(field: &'static str, value: Option<i64>) -> Result<Option<u16>> {
    value.map(|v| column_u16(field, v)).transpose()
}

/// Parse an RFC 3339 text column.
pub(crate) fn column_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StorageError::InvalidData {
            field,
            message: e.to_string(),
        })
}

#[cfg(feature = "postgres")]
pub mod postgres {
    //! PostgreSQL database backend.

    use sea_query::PostgresQueryBuilder;
    use sqlx::PgPool;

    /// PostgreSQL database marker type.
    pub struct Postgres;

    impl super::SqlDatabase for Postgres {
        type Pool = PgPool;

        const NAME: &'static str = "postgres";

        fn build_select(stmt: sea_query::SelectStatement) -> String {
            stmt.to_string(PostgresQueryBuilder)
        }

        fn build_insert(stmt: sea_query::InsertStatement) -> String {
            stmt.to_string(PostgresQueryBuilder)
        }

        fn build_update(stmt: sea_query::UpdateStatement) -> String {
            stmt.to_string(PostgresQueryBuilder)
        }
    }

    /// PostgreSQL session store.
    pub type PostgresSessionStore = super::SqlSessionStore<Postgres>;

    /// PostgreSQL pricing catalog.
    pub type PostgresPricingCatalog = super::SqlPricingCatalog<Postgres>;
}

#[cfg(feature = "sqlite")]
pub mod sqlite {
    //! SQLite database backend.

    use sea_query::SqliteQueryBuilder;
    use sqlx::SqlitePool;

    /// SQLite database marker type.
    pub struct Sqlite;

    impl super::SqlDatabase for Sqlite {
        type Pool = SqlitePool;

        const NAME: &'static str = "sqlite";

        fn build_select(stmt: sea_query::SelectStatement) -> String {
            stmt.to_string(SqliteQueryBuilder)
        }

        fn build_insert(stmt: sea_query::InsertStatement) -> String {
            stmt.to_string(SqliteQueryBuilder)
        }

        fn build_update(stmt: sea_query::UpdateStatement) -> String {
            stmt.to_string(SqliteQueryBuilder)
        }
    }

    /// SQLite session store.
    pub type SqliteSessionStore = super::SqlSessionStore<Sqlite>;

    /// SQLite pricing catalog.
    pub type SqlitePricingCatalog = super::SqlPricingCatalog<Sqlite>;
}
