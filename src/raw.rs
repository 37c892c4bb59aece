//! Lenient model of the flight-search API payload.
//!
//! Every field is optional and read leniently: `null` or a value of the wrong
//! JSON type reads as absent instead of failing the surrounding record, and a
//! malformed entry inside a sequence reads as an empty record so positions are
//! kept. Price and duration fields keep whatever value they were sent, see
//! [`Scalar`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
        ),
        _ => None,
    })
}

/// A number-or-string field, as the API sends prices and durations.
///
/// Anything else (a boolean, an object) is kept as `Other`, so it still counts
/// as present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
    Other(Value),
}

impl Scalar {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whole-number view: integral numbers, or text holding an integer.
    pub fn as_whole_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 => Some(*n as i64),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Whether the value counts as set: non-zero numbers, non-empty text,
    /// and anything else but `false`.
    pub fn is_set(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Other(v) => !matches!(v, Value::Bool(false) | Value::Null),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPrice {
    #[serde(default, deserialize_with = "lenient")]
    pub amount: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub raw: Option<Scalar>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingOption {
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<RawPrice>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub display_code: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,
}

/// The `{date}` object some responses attach to each side of a leg. Its
/// `time` sibling is never displayed and is not read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatedPoint {
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carrier {
    /// Carrier code, despite the field name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carriers {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub marketing: Option<Vec<Carrier>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSegment {
    #[serde(default, deserialize_with = "lenient")]
    pub departure_date_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub arrival_date_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLeg {
    #[serde(default, deserialize_with = "lenient")]
    pub origin: Option<Endpoint>,
    #[serde(default, deserialize_with = "lenient")]
    pub destination: Option<Endpoint>,
    #[serde(default, deserialize_with = "lenient")]
    pub departure_date_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub arrival_date_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub departure: Option<DatedPoint>,
    #[serde(default, deserialize_with = "lenient")]
    pub arrival: Option<DatedPoint>,
    #[serde(default, deserialize_with = "lenient")]
    pub departure_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub arrival_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub duration_in_minutes: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub carriers: Option<Carriers>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub segments: Option<Vec<RawSegment>>,
}

impl RawLeg {
    pub fn first_carrier(&self) -> Option<&Carrier> {
        self.carriers
            .as_ref()
            .and_then(|c| c.marketing.as_deref())
            .and_then(|m| m.first())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItinerary {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub pricing_options: Option<Vec<PricingOption>>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<RawPrice>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub legs: Option<Vec<RawLeg>>,
}

impl RawItinerary {
    /// Reads one itinerary out of an arbitrary JSON value. Never fails.
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }

    pub fn first_leg(&self) -> Option<&RawLeg> {
        self.legs.as_deref().and_then(|legs| legs.first())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchData {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub itineraries: Option<Vec<RawItinerary>>,
    #[serde(default, deserialize_with = "lenient")]
    pub destination_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<SearchData>,
}

impl SearchResponse {
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }

    pub fn itineraries(&self) -> &[RawItinerary] {
        self.data
            .as_ref()
            .and_then(|d| d.itineraries.as_deref())
            .unwrap_or_default()
    }

    pub fn destination_image_url(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.destination_image_url.as_deref())
    }
}
