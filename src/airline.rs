use serde::Serialize;

const LOGO_BASE_URL: &str = "https://logos.skyscnr.com/images/airlines/favicon";

pub const AIRLINE_UNAVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirlineIdentity {
    pub display_name: String,
    pub logo_url: Option<String>,
}

pub fn airline_name(code: &str) -> Option<&'static str> {
    match code {
        "LH" => Some("Lufthansa"),
        "BA" => Some("British Airways"),
        "AF" => Some("Air France"),
        "KL" => Some("KLM"),
        "FR" => Some("Ryanair"),
        "U2" => Some("EasyJet"),
        "W6" => Some("Wizz Air"),
        "OS" => Some("Austrian Airlines"),
        "LX" => Some("Swiss"),
        "TK" => Some("Turkish Airlines"),
        _ => None,
    }
}

pub fn logo_url(code: &str) -> Option<String> {
    if code.is_empty() {
        return None;
    }
    Some(format!("{LOGO_BASE_URL}/{}.png", code.to_lowercase()))
}

/// Unknown codes pass through as their own display name. A logo URL
/// supplied by the payload wins over the synthesized one.
pub fn resolve_airline(code: Option<&str>, supplied_logo: Option<&str>) -> AirlineIdentity {
    let code = code.filter(|c| !c.is_empty());

    let display_name = match code {
        Some(c) => airline_name(c).unwrap_or(c).to_string(),
        None => AIRLINE_UNAVAILABLE.to_string(),
    };

    let logo_url = supplied_logo
        .filter(|url| !url.is_empty())
        .map(String::from)
        .or_else(|| code.and_then(logo_url));

    AirlineIdentity {
        display_name,
        logo_url,
    }
}
