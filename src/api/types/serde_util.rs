//! Serde adapters for the API's string-encoded numeric fields.
//!
//! The API encodes every decimal and timestamp as a JSON string and uses
//! the empty string for "not applicable", so optional fields need adapters
//! that round-trip that convention.

/// `Option<Decimal>` as a decimal string, empty string for `None`.
pub(crate) mod decimal_opt {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(de: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(de)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(text) => text.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }

    pub fn serialize<S>(value: &Option<Decimal>, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(decimal) => ser.serialize_str(&decimal.to_string()),
            None => ser.serialize_str(""),
        }
    }
}

/// `DateTime<Utc>` as a millisecond-epoch string.
pub(crate) mod ts_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(de: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(de)?;
        let millis: i64 = raw.parse().map_err(serde::de::Error::custom)?;
        DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {millis}")))
    }

    pub fn serialize<S>(value: &DateTime<Utc>, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ser.serialize_str(&value.timestamp_millis().to_string())
    }
}

/// `Option<DateTime<Utc>>` as a millisecond-epoch string, empty for `None`.
pub(crate) mod ts_millis_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(de: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(de)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(text) => {
                let millis: i64 = text.parse().map_err(serde::de::Error::custom)?;
                DateTime::<Utc>::from_timestamp_millis(millis)
                    .map(Some)
                    .ok_or_else(|| {
                        serde::de::Error::custom(format!("timestamp out of range: {millis}"))
                    })
            }
        }
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => ser.serialize_str(&ts.timestamp_millis().to_string()),
            None => ser.serialize_str(""),
        }
    }
}
