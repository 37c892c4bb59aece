use serde_json::Value;
use tracing::debug;

use crate::airline::resolve_airline;
use crate::datetime::{leg_time_label, resolve_date_label, Side, DATE_UNAVAILABLE, TIME_UNAVAILABLE};
use crate::duration::duration_label;
use crate::error::SkyError;
use crate::model::*;
use crate::price::resolve_price;
use crate::raw::{Endpoint, RawItinerary, RawLeg, SearchResponse};

fn endpoint_label(endpoint: Option<&Endpoint>) -> String {
    endpoint
        .and_then(|e| {
            e.name
                .as_deref()
                .filter(|s| !s.is_empty())
                .or_else(|| e.display_code.as_deref().filter(|s| !s.is_empty()))
        })
        .unwrap_or(LABEL_UNAVAILABLE)
        .to_string()
}

fn route(leg: Option<&RawLeg>) -> Route {
    Route {
        origin_label: endpoint_label(leg.and_then(|l| l.origin.as_ref())),
        destination_label: endpoint_label(leg.and_then(|l| l.destination.as_ref())),
    }
}

fn moment(leg: Option<&RawLeg>, side: Side) -> LegMoment {
    match leg {
        Some(leg) => LegMoment {
            date_label: resolve_date_label(leg, side),
            time_label: leg_time_label(leg, side),
        },
        None => LegMoment {
            date_label: DATE_UNAVAILABLE.to_string(),
            time_label: TIME_UNAVAILABLE.to_string(),
        },
    }
}

/// Builds the display view of one itinerary from its first leg and prices.
pub fn normalize_itinerary(index: usize, itinerary: &RawItinerary) -> DisplayItinerary {
    let leg = itinerary.first_leg();
    if leg.is_none() {
        debug!(index, "itinerary has no legs");
    }

    let carrier = leg.and_then(RawLeg::first_carrier);
    let airline = resolve_airline(
        carrier.and_then(|c| c.name.as_deref()),
        carrier.and_then(|c| c.logo_url.as_deref()),
    );

    DisplayItinerary {
        index,
        best_price: resolve_price(itinerary),
        route: route(leg),
        departure: moment(leg, Side::Departure),
        arrival: moment(leg, Side::Arrival),
        duration_label: duration_label(leg.and_then(|l| l.duration_in_minutes.as_ref())),
        airline,
    }
}

pub fn normalize_itineraries(itineraries: &[RawItinerary]) -> Vec<DisplayItinerary> {
    itineraries
        .iter()
        .enumerate()
        .map(|(index, itinerary)| normalize_itinerary(index, itinerary))
        .collect()
}

pub fn normalize_response(response: &SearchResponse) -> SearchResults {
    SearchResults {
        itineraries: normalize_itineraries(response.itineraries()),
        destination_image_url: response.destination_image_url().map(String::from),
    }
}

/// Total over any JSON value; shapes that are not a response read as empty.
pub fn normalize_value(value: &Value) -> SearchResults {
    normalize_response(&SearchResponse::from_value(value))
}

fn api_message(message: Option<&Value>) -> String {
    match message {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        None => "request was not successful".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Parses response text, surfacing an explicit `status: false` as an error.
pub fn parse_response(text: &str) -> Result<SearchResponse, SkyError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| SkyError::InvalidResponse(e.to_string()))?;
    if !value.is_object() {
        return Err(SkyError::InvalidResponse(
            "expected a JSON object at the top level".into(),
        ));
    }

    let response = SearchResponse::from_value(&value);
    if response.status == Some(false) {
        return Err(SkyError::Api(api_message(response.message.as_ref())));
    }
    Ok(response)
}

pub fn normalize_json(text: &str) -> Result<SearchResults, SkyError> {
    parse_response(text).map(|response| normalize_response(&response))
}
