use tracing::debug;

use crate::fallback::{first_of, Attempt};
use crate::raw::{RawItinerary, RawPrice, Scalar};

pub const PRICE_UNAVAILABLE: &str = "Price unavailable";

/// Strips everything but digits and dots, then reads the longest leading
/// decimal number. `"$1,299.00"` reads as `1299.0`, `"1.2.3"` as `1.2`.
pub fn parse_price_text(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let end = cleaned
        .match_indices('.')
        .nth(1)
        .map_or(cleaned.len(), |(i, _)| i);
    let number = &cleaned[..end];
    if !number.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    number.parse().ok()
}

fn is_usable(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

fn option_price(price: &RawPrice) -> Option<f64> {
    let numeric = price
        .amount
        .as_ref()
        .and_then(Scalar::as_number)
        .or_else(|| price.raw.as_ref().and_then(Scalar::as_number));

    let candidate = match numeric {
        Some(n) => Some(n),
        // A set amount of any type wins over raw; only text can parse.
        None => price
            .amount
            .as_ref()
            .filter(|a| a.is_set())
            .or(price.raw.as_ref())
            .and_then(Scalar::as_text)
            .and_then(parse_price_text),
    };

    match candidate {
        Some(p) if is_usable(p) => Some(p),
        other => {
            debug!(?price, ?other, "discarding pricing option");
            None
        }
    }
}

/// Cheapest usable price across `pricingOptions`.
pub fn from_pricing_options(itinerary: &RawItinerary) -> Option<f64> {
    itinerary
        .pricing_options
        .as_deref()?
        .iter()
        .filter_map(|opt| opt.price.as_ref().and_then(option_price))
        .min_by(f64::total_cmp)
}

/// `price.amount` when it is a number, taken as-is.
pub fn from_price_amount(itinerary: &RawItinerary) -> Option<f64> {
    itinerary
        .price
        .as_ref()?
        .amount
        .as_ref()
        .and_then(Scalar::as_number)
}

/// `price.raw` read as text, kept only when positive.
pub fn from_price_raw(itinerary: &RawItinerary) -> Option<f64> {
    let text = match itinerary.price.as_ref()?.raw.as_ref()? {
        Scalar::Number(n) => n.to_string(),
        Scalar::Text(s) => s.clone(),
        Scalar::Other(_) => return None,
    };
    parse_price_text(&text).filter(|p| is_usable(*p))
}

pub fn resolve_price(itinerary: &RawItinerary) -> Option<f64> {
    first_of(
        "price",
        &[
            Attempt::new("pricing options", &|| from_pricing_options(itinerary)),
            Attempt::new("price amount", &|| from_price_amount(itinerary)),
            Attempt::new("price raw", &|| from_price_raw(itinerary)),
        ],
    )
}

pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) => format!("{p:.2}"),
        None => PRICE_UNAVAILABLE.to_string(),
    }
}
