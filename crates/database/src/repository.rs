use crate::DbError;
use analytics::{AnalyticsError, PriceStore};
use async_trait::async_trait;
use core_types::{DateWindow, Instrument, InstrumentUpdate, NewInstrument, PriceBar, SymbolBar};
use sqlx::postgres::PgPool;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Fetches a page of instruments ordered by id.
    pub async fn list_instruments(&self, offset: i64, limit: i64) -> Result<Vec<Instrument>, DbError> {
        let instruments = sqlx::query_as::<_, Instrument>(
            "SELECT id, name, symbol, founded, description FROM stocks ORDER BY id ASC OFFSET $1 LIMIT $2",
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(instruments)
    }

    /// Fetches a single instrument by id.
    pub async fn get_instrument(&self, id: i32) -> Result<Instrument, DbError> {
        sqlx::query_as::<_, Instrument>(
            "SELECT id, name, symbol, founded, description FROM stocks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)
    }

    /// Registers a new instrument. Symbols are unique regardless of case.
    pub async fn create_instrument(&self, new: &NewInstrument) -> Result<Instrument, DbError> {
        let instrument = sqlx::query_as::<_, Instrument>(
            r#"
            INSERT INTO stocks (name, symbol, founded, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, symbol, founded, description
            "#,
        )
        .bind(&new.name)
        .bind(&new.symbol)
        .bind(new.founded)
        .bind(new.description.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from_write(e, &new.symbol))?;

        tracing::info!(id = instrument.id, symbol = %instrument.symbol, "Instrument created.");
        Ok(instrument)
    }

    /// Applies a partial update; `None` fields keep their stored value.
    pub async fn update_instrument(
        &self,
        id: i32,
        update: &InstrumentUpdate,
    ) -> Result<Instrument, DbError> {
        if update.is_empty() {
            return self.get_instrument(id).await;
        }

        let symbol = update.symbol.clone().unwrap_or_default();
        sqlx::query_as::<_, Instrument>(
            r#"
            UPDATE stocks SET
                name = COALESCE($2, name),
                symbol = COALESCE($3, symbol),
                founded = COALESCE($4, founded),
                description = COALESCE($5, description)
            WHERE id = $1
            RETURNING id, name, symbol, founded, description
            "#,
        )
        .bind(id)
        .bind(update.name.as_deref())
        .bind(update.symbol.as_deref())
        .bind(update.founded)
        .bind(update.description.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DbError::from_write(e, &symbol))?
        .ok_or(DbError::NotFound)
    }

    /// Deletes an instrument and all of its bars within a single transaction.
    pub async fn delete_instrument(&self, id: i32) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let bars = sqlx::query("DELETE FROM stock_histories WHERE stock_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM stocks WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Err(DbError::NotFound);
        }

        tx.commit().await?;
        tracing::info!(id, bars, "Instrument and its history deleted.");
        Ok(())
    }

    /// Fetches a page of bars across all instruments, most recent first.
    pub async fn list_bars_page(&self, offset: i64, limit: i64) -> Result<Vec<PriceBar>, DbError> {
        let bars = sqlx::query_as::<_, PriceBar>(
            r#"
            SELECT date, open, high, low, close, adjusted_close, volume
            FROM stock_histories
            ORDER BY date DESC, id DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(bars)
    }

    /// Whether any instrument matches `symbol`, ignoring case.
    pub async fn symbol_exists(&self, symbol: &str) -> Result<bool, DbError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM stocks WHERE LOWER(symbol) = LOWER($1))",
        )
        .bind(symbol)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Fetches bars inside `window` ordered by (symbol, date), optionally for
    /// one symbol only. Symbols come back lower-cased.
    pub async fn get_bars_in_window(
        &self,
        symbol: Option<&str>,
        window: &DateWindow,
    ) -> Result<Vec<SymbolBar>, DbError> {
        let bars = sqlx::query_as::<_, SymbolBar>(
            r#"
            SELECT LOWER(s.symbol) AS symbol, h.date, h.open, h.high, h.low, h.close,
                   h.adjusted_close, h.volume
            FROM stock_histories AS h
            JOIN stocks AS s ON s.id = h.stock_id
            WHERE h.date BETWEEN $1 AND $2
              AND ($3::TEXT IS NULL OR LOWER(s.symbol) = LOWER($3))
            ORDER BY LOWER(s.symbol) ASC, h.date ASC
            "#,
        )
        .bind(window.start)
        .bind(window.end)
        .bind(symbol)
        .fetch_all(&self.pool)
        .await?;
        Ok(bars)
    }
}

#[async_trait]
impl PriceStore for DbRepository {
    async fn instrument_exists(&self, symbol: &str) -> Result<bool, AnalyticsError> {
        self.symbol_exists(symbol).await.map_err(|e| {
            tracing::error!(error = ?e, %symbol, "Instrument lookup failed.");
            AnalyticsError::Store(e.to_string())
        })
    }

    async fn list_bars(
        &self,
        symbol: Option<&str>,
        window: &DateWindow,
    ) -> Result<Vec<SymbolBar>, AnalyticsError> {
        self.get_bars_in_window(symbol, window).await.map_err(|e| {
            tracing::error!(error = ?e, ?symbol, %window, "Bar query failed.");
            AnalyticsError::Store(e.to_string())
        })
    }
}
