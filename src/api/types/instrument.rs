//! Instrument types for the market-data REST API.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Instrument type discriminator used across the market-data endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentType {
    /// Spot trading pair
    #[default]
    #[serde(rename = "SPOT")]
    Spot,
    /// Margin trading pair
    #[serde(rename = "MARGIN")]
    Margin,
    /// Perpetual swap
    #[serde(rename = "SWAP")]
    Swap,
    /// Dated futures
    #[serde(rename = "FUTURES")]
    Futures,
    /// Options contract
    #[serde(rename = "OPTION")]
    Option,
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Spot => "SPOT",
            Self::Margin => "MARGIN",
            Self::Swap => "SWAP",
            Self::Futures => "FUTURES",
            Self::Option => "OPTION",
        };
        f.write_str(text)
    }
}

/// Listing state of an instrument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentState {
    /// Trading normally
    #[default]
    Live,
    /// Trading suspended
    Suspend,
    /// Listed but not yet tradable
    Preopen,
    /// Test instrument, not tradable with real funds
    Test,
}

/// A tradable instrument as returned by `GET /api/v5/public/instruments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    /// Instrument type
    pub inst_type: InstrumentType,
    /// Instrument identifier, e.g. `BTC-USDT`
    pub inst_id: String,
    /// Underlying, e.g. `BTC-USD` (derivatives only)
    #[serde(default)]
    pub uly: Option<String>,
    /// Base currency (spot/margin only, empty otherwise)
    #[serde(default)]
    pub base_ccy: String,
    /// Quote currency (spot/margin only, empty otherwise)
    #[serde(default)]
    pub quote_ccy: String,
    /// Tick size for price granularity
    #[serde(with = "super::serde_util::decimal_opt", default)]
    pub tick_sz: Option<Decimal>,
    /// Lot size for order quantity granularity
    #[serde(with = "super::serde_util::decimal_opt", default)]
    pub lot_sz: Option<Decimal>,
    /// Minimum order size
    #[serde(with = "super::serde_util::decimal_opt", default)]
    pub min_sz: Option<Decimal>,
    /// Listing state
    #[serde(default)]
    pub state: InstrumentState,
    /// Listing time
    #[serde(with = "super::serde_util::ts_millis_opt", default)]
    pub list_time: Option<DateTime<Utc>>,
}
