//! Unified SQL SessionStore implementation.
//!
//! Uses a macro to generate implementations for each SQL backend,
//! eliminating code duplication while maintaining type safety.

use std::marker::PhantomData;

use super::SqlDatabase;

/// SQL-based implementation of SessionStore.
///
/// Uniqueness of `code` and `payment_reference` is enforced by the table's
/// constraints; a violation surfaces as `StorageError::Duplicate`.
pub struct SqlSessionStore<DB: SqlDatabase> {
    pool: DB::Pool,
    _marker: PhantomData<DB>,
}

impl<DB: SqlDatabase> SqlSessionStore<DB> {
    /// Create a new SQL session store with the given pool.
    pub fn new(pool: DB::Pool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &DB::Pool {
        &self.pool
    }
}

/// Columns read back for a record, in select order.
const RECORD_COLUMNS: [crate::storage::schema::Sessions; 10] = {
    use crate::storage::schema::Sessions;
    [
        Sessions::Code,
        Sessions::GameId,
        Sessions::Name,
        Sessions::Price,
        Sessions::PlayTime,
        Sessions::Levels,
        Sessions::PaymentReference,
        Sessions::IsPlayed,
        Sessions::IssuedAt,
        Sessions::PlayedAt,
    ]
};

/// Decode a sessions row into a `RedemptionRecord`.
macro_rules! record_from_row {
    ($row:expr) => {{
        use sqlx::Row;

        use crate::storage::sql::{column_opt_u16, column_timestamp, column_u16};

        let row = $row;
        let issued_at: String = row.try_get("issued_at")?;
        let played_at: Option<String> = row.try_get("played_at")?;

        crate::models::RedemptionRecord {
            code: row.try_get("code")?,
            game_id: column_u16("game_id", row.try_get("game_id")?)?,
            name: row.try_get("name")?,
            price: column_u16("price", row.try_get("price")?)?,
            play_time: column_opt_u16("play_time", row.try_get("play_time")?)?,
            levels: column_opt_u16("levels", row.try_get("levels")?)?,
            payment_reference: row.try_get("payment_reference")?,
            is_played: row.try_get("is_played")?,
            issued_at: column_timestamp("issued_at", &issued_at)?,
            played_at: played_at
                .as_deref()
                .map(|t| column_timestamp("played_at", t))
                .transpose()?,
        }
    }};
}

/// Macro to implement SessionStore for a specific SQL backend.
///
/// This eliminates duplication between PostgreSQL and SQLite implementations
/// while maintaining full type safety.
macro_rules! impl_session_store {
    ($db_type:ty, $feature:literal) => {
        #[cfg(feature = $feature)]
        impl SqlSessionStore<$db_type> {
            /// Create the sessions table if it does not exist.
            pub async fn init(&self) -> crate::interfaces::Result<()> {
                sqlx::raw_sql(crate::storage::schema::CREATE_SESSIONS_TABLE)
                    .execute(&self.pool)
                    .await?;
                tracing::debug!(backend = <$db_type>::NAME, "Sessions table ready");
                Ok(())
            }
        }

        #[cfg(feature = $feature)]
        #[async_trait::async_trait]
        impl crate::interfaces::SessionStore for SqlSessionStore<$db_type> {
            async fn insert(
                &self,
                record: &crate::models::RedemptionRecord,
            ) -> crate::interfaces::Result<()> {
                use sea_query::Query;

                use crate::storage::schema::Sessions;

                let stmt = Query::insert()
                    .into_table(Sessions::Table)
                    .columns(RECORD_COLUMNS)
                    .values_panic([
                        record.code.as_str().into(),
                        i64::from(record.game_id).into(),
                        record.name.as_str().into(),
                        i64::from(record.price).into(),
                        record.play_time.map(i64::from).into(),
                        record.levels.map(i64::from).into(),
                        record.payment_reference.as_str().into(),
                        record.is_played.into(),
                        record.issued_at.to_rfc3339().into(),
                        record.played_at.map(|t| t.to_rfc3339()).into(),
                    ])
                    .to_owned();

                let sql = <$db_type>::build_insert(stmt);
                sqlx::query(&sql).execute(&self.pool).await?;

                Ok(())
            }

            async fn get_by_code(
                &self,
                code: &str,
            ) -> crate::interfaces::Result<Option<crate::models::RedemptionRecord>> {
                use sea_query::{Expr, Query};

                use crate::storage::schema::Sessions;

                let stmt = Query::select()
                    .columns(RECORD_COLUMNS)
                    .from(Sessions::Table)
                    .and_where(Expr::col(Sessions::Code).eq(code))
                    .to_owned();

                let sql = <$db_type>::build_select(stmt);
                let row = sqlx::query(&sql).fetch_optional(&self.pool).await?;

                match row {
                    Some(row) => Ok(Some(record_from_row!(&row))),
                    None => Ok(None),
                }
            }

            async fn mark_played(
                &self,
                code: &str,
                played_at: chrono::DateTime<chrono::Utc>,
            ) -> crate::interfaces::Result<bool> {
                use sea_query::{Expr, Query};

                use crate::storage::schema::Sessions;

                let stmt = Query::update()
                    .table(Sessions::Table)
                    .values([
                        (Sessions::IsPlayed, true.into()),
                        (Sessions::PlayedAt, played_at.to_rfc3339().into()),
                    ])
                    .and_where(Expr::col(Sessions::Code).eq(code))
                    .and_where(Expr::col(Sessions::IsPlayed).eq(false))
                    .to_owned();

                let sql = <$db_type>::build_update(stmt);
                let result = sqlx::query(&sql).execute(&self.pool).await?;

                Ok(result.rows_affected() == 1)
            }
        }
    };
}

// Generate implementations for each SQL backend
impl_session_store!(super::postgres::Postgres, "postgres");
impl_session_store!(super::sqlite::Sqlite, "sqlite");
