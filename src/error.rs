use std::fmt;

#[derive(Debug)]
pub enum SkyError {
    Timeout,
    ConnectionFailed(String),
    DnsResolution(String),
    ProxyError(String),
    TlsError(String),
    RateLimited,
    Unauthorized(u16),
    HttpStatus(u16),
    MissingApiKey,
    Api(String),
    InvalidResponse(String),
    Io(String),
    InvalidDate(String),
    InvalidPage { page: usize, total_pages: usize },
    Validation(String),
    Serialization(String),
}

impl fmt::Display for SkyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(
                f,
                "request timed out — the flight-search API may be slow or unreachable. \
                 Try increasing --timeout or check your connection"
            ),
            Self::ConnectionFailed(detail) => write!(
                f,
                "connection failed — check your internet connection ({detail})"
            ),
            Self::DnsResolution(host) => write!(
                f,
                "DNS resolution failed for {host} — check your internet connection"
            ),
            Self::ProxyError(detail) => write!(
                f,
                "proxy error — check your --proxy URL is correct ({detail})"
            ),
            Self::TlsError(detail) => write!(
                f,
                "TLS/SSL error — connection to the flight-search API failed ({detail})"
            ),
            Self::RateLimited => write!(
                f,
                "rate limited by the flight-search API (HTTP 429) — wait a few minutes before retrying"
            ),
            Self::Unauthorized(status) => write!(
                f,
                "request rejected (HTTP {status}) — check that your API key is valid \
                 and subscribed to the flight-search API"
            ),
            Self::HttpStatus(status) => write!(
                f,
                "unexpected HTTP status {status} from the flight-search API"
            ),
            Self::MissingApiKey => write!(
                f,
                "no API key — pass --api-key or set RAPIDAPI_KEY"
            ),
            Self::Api(message) => write!(f, "flight-search API reported an error: {message}"),
            Self::InvalidResponse(detail) => write!(
                f,
                "failed to read search response — {detail}"
            ),
            Self::Io(detail) => write!(f, "failed to read input — {detail}"),
            Self::InvalidDate(date) => write!(
                f,
                "invalid date \"{date}\" — must be YYYY-MM-DD format (e.g. 2025-01-29)"
            ),
            Self::InvalidPage { page, total_pages } => write!(
                f,
                "page {page} is out of range — results have {total_pages} page(s)"
            ),
            Self::Validation(msg) => write!(f, "{msg}"),
            Self::Serialization(detail) => write!(f, "failed to serialize results — {detail}"),
        }
    }
}

impl std::error::Error for SkyError {}

impl From<std::io::Error> for SkyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

pub fn from_http_error(err: wreq::Error) -> SkyError {
    let msg = err.to_string();
    let lower = msg.to_lowercase();

    if err.is_timeout() {
        return SkyError::Timeout;
    }

    if err.is_connect() {
        if lower.contains("dns") || lower.contains("resolve") || lower.contains("getaddrinfo") {
            return SkyError::DnsResolution(msg);
        }
        return SkyError::ConnectionFailed(msg);
    }

    if lower.contains("proxy") || lower.contains("socks") {
        return SkyError::ProxyError(msg);
    }

    if lower.contains("tls") || lower.contains("ssl") || lower.contains("certificate") {
        return SkyError::TlsError(msg);
    }

    SkyError::ConnectionFailed(msg)
}
