use crate::{error::AppError, AppState};
use analytics::Report;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use core_types::{Instrument, InstrumentUpdate, NewInstrument, PriceBar};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    skip: i64,
    limit: Option<i64>,
}

/// The body of `POST /api/stocks`. Fields are optional here so that missing
/// ones can be reported together.
#[derive(Debug, Deserialize)]
pub struct CreateStockRequest {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub founded: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStockRequest {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub founded: Option<String>,
    pub description: Option<String>,
}

/// Accepts `YYYY-MM-DD` or an ISO-8601 date-time; only the date is kept.
fn parse_founded(value: &str) -> Result<NaiveDate, AppError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| {
            AppError::BadRequest(
                "Invalid 'founded' date format. Expected ISO 8601 format (e.g., '2023-01-01').".to_string(),
            )
        })
}

impl CreateStockRequest {
    fn validate(self) -> Result<NewInstrument, AppError> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push("name");
        }
        if self.symbol.is_none() {
            missing.push("symbol");
        }
        if self.founded.is_none() {
            missing.push("founded");
        }

        match (self.name, self.symbol, self.founded) {
            (Some(name), Some(symbol), Some(founded)) => Ok(NewInstrument {
                name,
                symbol,
                founded: parse_founded(&founded)?,
                description: self.description,
            }),
            _ => Err(AppError::BadRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}

impl UpdateStockRequest {
    fn validate(self) -> Result<InstrumentUpdate, AppError> {
        let founded = self.founded.as_deref().map(parse_founded).transpose()?;
        Ok(InstrumentUpdate {
            name: self.name,
            symbol: self.symbol,
            founded,
            description: self.description,
        })
    }
}

/// # GET /api/health
pub async fn health() -> &'static str {
    "OK"
}

/// # GET /api/stocks
pub async fn list_stocks(
    State(state): State<Arc<AppState>>,
    Query(page): Query<PageParams>,
) -> Result<Json<Vec<Instrument>>, AppError> {
    let limit = state.pagination.clamp(page.limit);
    let stocks = state.db_repo.list_instruments(page.skip.max(0), limit).await?;
    Ok(Json(stocks))
}

/// # POST /api/stocks
pub async fn create_stock(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateStockRequest>,
) -> Result<(StatusCode, Json<Instrument>), AppError> {
    let new = request.validate()?;
    let stock = state.db_repo.create_instrument(&new).await?;
    Ok((StatusCode::CREATED, Json(stock)))
}

/// # GET /api/stocks/:stock_id
pub async fn get_stock(
    Path(stock_id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Instrument>, AppError> {
    let stock = state.db_repo.get_instrument(stock_id).await?;
    Ok(Json(stock))
}

/// # PUT /api/stocks/:stock_id
pub async fn update_stock(
    Path(stock_id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateStockRequest>,
) -> Result<Json<Instrument>, AppError> {
    let update = request.validate()?;
    let stock = state.db_repo.update_instrument(stock_id, &update).await?;
    Ok(Json(stock))
}

/// # DELETE /api/stocks/:stock_id
/// Removes the instrument together with its price history.
pub async fn delete_stock(
    Path(stock_id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, AppError> {
    state.db_repo.delete_instrument(stock_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// # GET /api/stock-history
/// Most recent bars first.
pub async fn list_stock_history(
    State(state): State<Arc<AppState>>,
    Query(page): Query<PageParams>,
) -> Result<Json<Vec<PriceBar>>, AppError> {
    let limit = state.pagination.clamp(page.limit);
    let bars = state.db_repo.list_bars_page(page.skip.max(0), limit).await?;
    Ok(Json(bars))
}

/// # GET /api/analysis/:symbol/:start_date/:end_date
/// Compares the requested window with the windows of equal span before and after it.
pub async fn analyze_stock(
    Path((symbol, start_date, end_date)): Path<(String, String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Report>, AppError> {
    let report = state
        .comparator
        .analyze(&symbol, &start_date, &end_date)
        .await?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn founded_accepts_dates_and_datetimes() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert_eq!(parse_founded("2023-01-01").unwrap(), expected);
        assert_eq!(parse_founded("2023-01-01T00:00:00").unwrap(), expected);
        assert_eq!(parse_founded("2023-01-01T09:30:00+02:00").unwrap(), expected);
        assert!(parse_founded("01/01/2023").is_err());
    }

    #[test]
    fn create_request_lists_every_missing_field() {
        let request = CreateStockRequest {
            name: None,
            symbol: Some("TS".to_string()),
            founded: None,
            description: None,
        };
        match request.validate() {
            Err(AppError::BadRequest(message)) => {
                assert_eq!(message, "Missing required fields: name, founded");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn update_request_keeps_absent_fields_empty() {
        let request = UpdateStockRequest {
            name: Some("Renamed".to_string()),
            symbol: None,
            founded: None,
            description: None,
        };
        let update = request.validate().unwrap();
        assert_eq!(update.name.as_deref(), Some("Renamed"));
        assert!(update.symbol.is_none());
        assert!(update.founded.is_none());
    }
}
