//! Bitget USDT-m futures REST client

use crate::models::{Candle, Timeframe};
use crate::services::bitget::symbols;
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

const DEFAULT_BASE_URL: &str = "https://api.bitget.com";
const CANDLES_PATH: &str = "/api/v2/mix/market/candles";
const PRODUCT_TYPE: &str = "USDT-FUTURES";
const OK_CODE: &str = "00000";

#[derive(Debug, Deserialize)]
struct CandleResponse {
    code: String,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Vec<Vec<Value>>,
}

pub struct BitgetClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: usize,
}

impl BitgetClient {
    pub fn new(max_retries: usize) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(20))
                .build()
                .unwrap_or_default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries,
        }
    }

    /// Point the client at a different host (used by the wiremock tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_once(
        &self,
        instrument: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let url = format!("{}{}", self.base_url, CANDLES_PATH);
        let limit = limit.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("symbol", instrument),
                ("granularity", timeframe.granularity()),
                ("limit", limit.as_str()),
                ("productType", PRODUCT_TYPE),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::Status {
                status: status.as_u16(),
            });
        }

        let body: CandleResponse = response.json().await?;
        if body.code != OK_CODE {
            return Err(MarketDataError::Malformed(format!(
                "exchange error {}: {}",
                body.code, body.msg
            )));
        }

        let mut candles = body
            .data
            .iter()
            .map(|row| parse_row(row))
            .collect::<Result<Vec<_>, _>>()?;
        candles.sort_by_key(|c| c.timestamp);
        Ok(candles)
    }
}

#[async_trait]
impl MarketDataProvider for BitgetClient {
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let instrument = symbols::instrument_id(symbol);

        (|| self.fetch_once(&instrument, timeframe, limit))
            .retry(
                ExponentialBuilder::default()
                    .with_max_times(self.max_retries)
                    .with_jitter(),
            )
            .when(MarketDataError::is_transient)
            .notify(|err: &MarketDataError, after: Duration| {
                warn!(
                    symbol = %instrument,
                    timeframe = %timeframe,
                    error = %err,
                    retry_in_ms = after.as_millis() as u64,
                    "transient candle fetch failure, retrying"
                );
            })
            .await
    }
}

/// Bitget candle rows are `[ts, open, high, low, close, baseVol, quoteVol]`
/// with every field serialized as a string.
fn parse_row(row: &[Value]) -> Result<Candle, MarketDataError> {
    if row.len() < 6 {
        return Err(MarketDataError::Malformed(format!(
            "candle row has {} fields, expected at least 6",
            row.len()
        )));
    }

    let ts_millis = field_f64(&row[0])? as i64;
    let timestamp: DateTime<Utc> = DateTime::from_timestamp_millis(ts_millis)
        .ok_or_else(|| MarketDataError::Malformed(format!("invalid timestamp: {}", ts_millis)))?;

    Ok(Candle::new(
        field_f64(&row[1])?,
        field_f64(&row[2])?,
        field_f64(&row[3])?,
        field_f64(&row[4])?,
        field_f64(&row[5])?,
        timestamp,
    ))
}

fn field_f64(value: &Value) -> Result<f64, MarketDataError> {
    match value {
        Value::String(s) => s
            .parse()
            .map_err(|_| MarketDataError::Malformed(format!("not a number: {}", s))),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| MarketDataError::Malformed(format!("not a number: {}", n))),
        other => Err(MarketDataError::Malformed(format!(
            "unexpected candle field: {}",
            other
        ))),
    }
}
