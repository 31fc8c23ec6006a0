//! Ticker types for the market-data REST API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::instrument::InstrumentType;

/// A 24-hour ticker snapshot as returned by `GET /api/v5/market/tickers`
/// and `GET /api/v5/market/ticker`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    /// Instrument type
    pub inst_type: InstrumentType,
    /// Instrument identifier, e.g. `BTC-USDT`
    pub inst_id: String,
    /// Last traded price
    #[serde(with = "rust_decimal::serde::str")]
    pub last: Decimal,
    /// Last traded size
    #[serde(with = "super::serde_util::decimal_opt", default)]
    pub last_sz: Option<Decimal>,
    /// Best ask price
    #[serde(with = "super::serde_util::decimal_opt", default)]
    pub ask_px: Option<Decimal>,
    /// Best ask size
    #[serde(with = "super::serde_util::decimal_opt", default)]
    pub ask_sz: Option<Decimal>,
    /// Best bid price
    #[serde(with = "super::serde_util::decimal_opt", default)]
    pub bid_px: Option<Decimal>,
    /// Best bid size
    #[serde(with = "super::serde_util::decimal_opt", default)]
    pub bid_sz: Option<Decimal>,
    /// Open price in the past 24 hours
    #[serde(rename = "open24h", with = "super::serde_util::decimal_opt", default)]
    pub open_24h: Option<Decimal>,
    /// Highest price in the past 24 hours
    #[serde(rename = "high24h", with = "super::serde_util::decimal_opt", default)]
    pub high_24h: Option<Decimal>,
    /// Lowest price in the past 24 hours
    #[serde(rename = "low24h", with = "super::serde_util::decimal_opt", default)]
    pub low_24h: Option<Decimal>,
    /// 24-hour volume in quote currency
    #[serde(rename = "volCcy24h", with = "super::serde_util::decimal_opt", default)]
    pub vol_ccy_24h: Option<Decimal>,
    /// 24-hour volume in base currency
    #[serde(rename = "vol24h", with = "super::serde_util::decimal_opt", default)]
    pub vol_24h: Option<Decimal>,
    /// Snapshot timestamp
    #[serde(with = "super::serde_util::ts_millis")]
    pub ts: DateTime<Utc>,
}

impl Ticker {
    /// Mid price from the best bid/ask, when both sides are quoted.
    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.bid_px, self.ask_px) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::from(2)),
            _ => None,
        }
    }
}
