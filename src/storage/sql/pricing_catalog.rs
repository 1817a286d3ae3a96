//! Unified SQL PricingCatalog implementation.

use std::marker::PhantomData;

use super::SqlDatabase;

/// SQL-based implementation of PricingCatalog.
///
/// Reads the `games` and `game_prices` tables. Catalog administration
/// writes them; this store never does.
pub struct SqlPricingCatalog<DB: SqlDatabase> {
    pool: DB::Pool,
    _marker: PhantomData<DB>,
}

impl<DB: SqlDatabase> SqlPricingCatalog<DB> {
    /// Create a new SQL pricing catalog with the given pool.
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

/// Decode a game_prices row into a `PriceEntry`.
macro_rules! price_from_row {
    ($row:expr) => {{
        use sqlx::Row;

        use crate::storage::sql::column_u16;

        let row = $row;
        let kind: String = row.try_get("kind")?;

        crate::models::PriceEntry {
            game_id: column_u16("game_id", row.try_get("game_id")?)?,
            kind: kind.parse().map_err(|e: crate::models::UnknownPricingKind| {
                crate::interfaces::StorageError::InvalidData {
                    field: "kind",
                    message: e.to_string(),
                }
            })?,
            label: column_u16("label", row.try_get("label")?)?,
            price: column_u16("price", row.try_get("price")?)?,
        }
    }};
}

/// Macro to implement PricingCatalog for a specific SQL backend.
macro_rules! impl_pricing_catalog {
    ($db_type:ty, $feature:literal) => {
        #[cfg(feature = $feature)]
        impl SqlPricingCatalog<$db_type> {
            /// Create the catalog tables if they do not exist.
            pub async fn init(&self) -> crate::interfaces::Result<()> {
                sqlx::raw_sql(crate::storage::schema::CREATE_CATALOG_TABLES)
                    .execute(&self.pool)
                    .await?;
                tracing::debug!(backend = <$db_type>::NAME, "Catalog tables ready");
                Ok(())
            }

            async fn fetch_prices(
                &self,
                game_id: Option<u16>,
            ) -> crate::interfaces::Result<Vec<crate::models::PriceEntry>> {
                use sea_query::{Expr, Order, Query};

                use crate::storage::schema::GamePrices;

                // SelectStatement is !Send; drop it before the first await.
                let sql = {
                    let mut stmt = Query::select()
                        .columns([
                            GamePrices::GameId,
                            GamePrices::Kind,
                            GamePrices::Label,
                            GamePrices::Price,
                        ])
                        .from(GamePrices::Table)
                        .order_by(GamePrices::GameId, Order::Asc)
                        .order_by(GamePrices::Kind, Order::Asc)
                        .order_by(GamePrices::Label, Order::Asc)
                        .to_owned();
                    if let Some(game_id) = game_id {
                        stmt.and_where(Expr::col(GamePrices::GameId).eq(i64::from(game_id)));
                    }
                    <$db_type>::build_select(stmt)
                };
                let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

                let mut entries = Vec::with_capacity(rows.len());
                for row in &rows {
                    entries.push(price_from_row!(row));
                }
                Ok(entries)
            }
        }

        #[cfg(feature = $feature)]
        #[async_trait::async_trait]
        impl crate::interfaces::PricingCatalog for SqlPricingCatalog<$db_type> {
            async fn query_pricing(
                &self,
                game_id: u16,
            ) -> crate::interfaces::Result<Vec<crate::models::PriceEntry>> {
                self.fetch_prices(Some(game_id)).await
            }

            async fn query_all_pricing(
                &self,
            ) -> crate::interfaces::Result<Vec<crate::models::PriceEntry>> {
                self.fetch_prices(None).await
            }

            async fn query_games_displayable(
                &self,
            ) -> crate::interfaces::Result<Vec<crate::models::GameListing>> {
                use sea_query::{Expr, Order, Query};
                use sqlx::Row;

                use crate::storage::schema::Games;
                use crate::storage::sql::column_u16;

                let stmt = Query::select()
                    .columns([Games::GameId, Games::Name, Games::Thumbnail])
                    .from(Games::Table)
                    .and_where(Expr::col(Games::IsDisplayable).eq(true))
                    .order_by(Games::GameId, Order::Asc)
                    .to_owned();

                let sql = <$db_type>::build_select(stmt);
                let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

                let mut games = Vec::with_capacity(rows.len());
                for row in rows {
                    games.push(crate::models::GameListing {
                        game_id: column_u16("game_id", row.try_get("game_id")?)?,
                        name: row.try_get("name")?,
                        thumbnail: row.try_get("thumbnail")?,
                    });
                }
                Ok(games)
            }
        }
    };
}

// Generate implementations for each SQL backend
impl_pricing_catalog!(super::postgres::Postgres, "postgres");
impl_pricing_catalog!(super::sqlite::Sqlite, "sqlite");
