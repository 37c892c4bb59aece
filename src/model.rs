use serde::Serialize;

use crate::airline::AirlineIdentity;

pub const LABEL_UNAVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub origin_label: String,
    pub destination_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegMoment {
    pub date_label: String,
    pub time_label: String,
}

/// Display-ready view of one itinerary. Every field holds either a usable
/// value or its sentinel text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayItinerary {
    pub index: usize,
    pub best_price: Option<f64>,
    pub route: Route,
    pub departure: LegMoment,
    pub arrival: LegMoment,
    pub duration_label: String,
    pub airline: AirlineIdentity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults {
    pub itineraries: Vec<DisplayItinerary>,
    pub destination_image_url: Option<String>,
}
