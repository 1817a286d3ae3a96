//! Database schema definitions using sea-query.
//!
//! These define the table and column identifiers for type-safe query building.
//! The DDL is portable between SQLite and PostgreSQL: integers are declared
//! BIGINT so both backends decode them as `i64`, timestamps are RFC 3339 text.

use sea_query::Iden;

/// Issued sessions (the redemption ledger).
#[derive(Iden)]
pub enum Sessions {
    Table,
    #[iden = "code"]
    Code,
    #[iden = "game_id"]
    GameId,
    #[iden = "name"]
    Name,
    #[iden = "price"]
    Price,
    #[iden = "play_time"]
    PlayTime,
    #[iden = "levels"]
    Levels,
    #[iden = "payment_reference"]
    PaymentReference,
    #[iden = "is_played"]
    IsPlayed,
    #[iden = "issued_at"]
    IssuedAt,
    #[iden = "played_at"]
    PlayedAt,
}

/// Catalog games.
#[derive(Iden)]
pub enum Games {
    Table,
    #[iden = "game_id"]
    GameId,
    #[iden = "name"]
    Name,
    #[iden = "thumbnail"]
    Thumbnail,
    #[iden = "is_displayable"]
    IsDisplayable,
}

/// Catalog prices, one row per `(game, kind, label, price)`.
#[derive(Iden)]
pub enum GamePrices {
    Table,
    #[iden = "game_id"]
    GameId,
    #[iden = "kind"]
    Kind,
    #[iden = "label"]
    Label,
    #[iden = "price"]
    Price,
}

/// SQL for creating the sessions table.
///
/// `code` and `payment_reference` are each unique: the database is the final
/// arbiter of at-most-once registration.
pub const CREATE_SESSIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS sessions (
    code TEXT NOT NULL PRIMARY KEY,
    game_id BIGINT NOT NULL,
    name TEXT NOT NULL,
    price BIGINT NOT NULL,
    play_time BIGINT,
    levels BIGINT,
    payment_reference TEXT NOT NULL UNIQUE,
    is_played BOOLEAN NOT NULL DEFAULT FALSE,
    issued_at TEXT NOT NULL,
    played_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_sessions_game ON sessions(game_id);
"#;

/// SQL for creating the catalog tables.
pub const CREATE_CATALOG_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS games (
    game_id BIGINT NOT NULL PRIMARY KEY,
    name TEXT NOT NULL,
    thumbnail TEXT,
    is_displayable BOOLEAN NOT NULL DEFAULT TRUE
);

CREATE TABLE IF NOT EXISTS game_prices (
    game_id BIGINT NOT NULL REFERENCES games(game_id),
    kind TEXT NOT NULL CHECK (kind IN ('time', 'level')),
    label BIGINT NOT NULL,
    price BIGINT NOT NULL,
    PRIMARY KEY (game_id, kind, label, price)
);
"#;
