use std::time::Duration;

use tracing::{debug, warn};
use wreq::Client;
use wreq_util::Emulation;

use crate::error::{self, SkyError};

pub const DEFAULT_BASE_URL: &str =
    "https://sky-scrapper.p.rapidapi.com/api/v2/flights/searchFlights";

pub const API_KEY_ENV: &str = "RAPIDAPI_KEY";
pub const BASE_URL_ENV: &str = "SKYFARE_API_URL";

#[derive(Clone)]
pub struct FetchOptions {
    pub api_key: Option<String>,
    pub base_url: String,
    pub proxy: Option<String>,
    pub timeout: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            proxy: None,
            timeout: 30,
        }
    }
}

impl FetchOptions {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            base_url: std::env::var(BASE_URL_ENV)
                .ok()
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            ..Default::default()
        }
    }
}

pub async fn fetch_json(
    params: &[(String, String)],
    options: &FetchOptions,
) -> Result<String, SkyError> {
    let api_key = options
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or(SkyError::MissingApiKey)?;

    let uri: wreq::Uri = options
        .base_url
        .parse()
        .map_err(|e| SkyError::Validation(format!("invalid API URL \"{}\": {e}", options.base_url)))?;
    let host = uri
        .host()
        .ok_or_else(|| SkyError::Validation(format!("API URL has no host: {}", options.base_url)))?
        .to_string();

    let mut builder = Client::builder()
        .emulation(Emulation::Chrome137)
        .timeout(Duration::from_secs(options.timeout));

    if let Some(ref proxy) = options.proxy {
        builder = builder.proxy(wreq::Proxy::all(proxy).map_err(error::from_http_error)?);
    }

    let client = builder.build().map_err(error::from_http_error)?;

    debug!(url = %options.base_url, "requesting flight search");
    let response = client
        .get(options.base_url.as_str())
        .query(params)
        .header("x-rapidapi-key", api_key)
        .header("x-rapidapi-host", host)
        .send()
        .await
        .map_err(error::from_http_error)?;

    let status = response.status().as_u16();
    debug!(status, "flight search responded");
    match status {
        200 => {}
        429 => return Err(SkyError::RateLimited),
        401 | 403 => return Err(SkyError::Unauthorized(status)),
        _ if status >= 400 => {
            warn!(status, "flight search failed");
            return Err(SkyError::HttpStatus(status));
        }
        _ => {}
    }

    response.text().await.map_err(error::from_http_error)
}
