pub mod airline;
pub mod datetime;
pub mod duration;
pub mod error;
pub mod fallback;
pub mod fetch;
pub mod mcp;
pub mod model;
pub mod normalize;
pub mod pager;
pub mod price;
pub mod query;
pub mod raw;
pub mod table;

use serde::Serialize;

use error::SkyError;
use fetch::FetchOptions;
use model::{DisplayItinerary, SearchResults};
use pager::Page;
use query::SearchParams;

pub async fn search(
    params: SearchParams,
    options: FetchOptions,
) -> Result<SearchResults, SkyError> {
    let url_params = params.to_url_params();
    let body = fetch::fetch_json(&url_params, &options).await?;
    normalize::normalize_json(&body)
}

/// One window of results, ready to print or serialize.
#[derive(Debug, Clone, Serialize)]
pub struct ResultsPage<'a> {
    pub total_results: usize,
    pub destination_image_url: Option<&'a str>,
    #[serde(flatten)]
    pub page: Page<'a, DisplayItinerary>,
}

impl ResultsPage<'_> {
    pub fn to_json(&self, pretty: bool) -> Result<String, SkyError> {
        let serialized = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        serialized.map_err(|e| SkyError::Serialization(e.to_string()))
    }
}

/// Bounds-checks `page_number` before handing the window to the pager.
/// An empty result set still has a (blank) first page.
pub fn select_page(
    results: &SearchResults,
    per_page: usize,
    page_number: usize,
) -> Result<ResultsPage<'_>, SkyError> {
    if per_page == 0 {
        return Err(SkyError::Validation("--per-page must be at least 1".into()));
    }

    let total_pages = pager::total_pages(results.itineraries.len(), per_page);
    let last = total_pages.max(1);
    if page_number == 0 || page_number > last {
        return Err(SkyError::InvalidPage {
            page: page_number,
            total_pages,
        });
    }

    Ok(ResultsPage {
        total_results: results.itineraries.len(),
        destination_image_url: results.destination_image_url.as_deref(),
        page: pager::paginate(&results.itineraries, per_page, page_number),
    })
}
