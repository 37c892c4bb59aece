use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};
use serde::Deserialize;
use tracing::error;

use crate::error::SkyError;
use crate::fetch::FetchOptions;
use crate::model::SearchResults;
use crate::pager::RESULTS_PER_PAGE;
use crate::query::{CabinClass, SearchParams};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct NormalizeArgs {
    #[schemars(
        description = "Raw flight-search API response as JSON text (the object holding data.itineraries)"
    )]
    response: String,
    #[schemars(description = "Page number, starting at 1. Default: 1")]
    page: Option<usize>,
    #[schemars(description = "Itineraries per page. Default: 10")]
    per_page: Option<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct SearchArgs {
    #[schemars(description = "Origin sky ID from airport lookup. Example: LOND")]
    origin_sky_id: String,
    #[schemars(description = "Origin entity ID from airport lookup. Example: 27544008")]
    origin_entity_id: String,
    #[schemars(description = "Destination sky ID from airport lookup. Example: NYCA")]
    destination_sky_id: String,
    #[schemars(description = "Destination entity ID from airport lookup. Example: 27537542")]
    destination_entity_id: String,
    #[schemars(description = "Departure date in YYYY-MM-DD format. Example: 2025-01-29")]
    date: String,
    #[schemars(description = "Return date in YYYY-MM-DD format for round trips")]
    return_date: Option<String>,
    #[schemars(description = "Adult passengers. Default: 1")]
    adults: Option<u32>,
    #[schemars(description = "One of: economy, premium_economy, business, first. Default: economy")]
    cabin_class: Option<String>,
    #[schemars(description = "Page number, starting at 1. Default: 1")]
    page: Option<usize>,
    #[schemars(description = "Itineraries per page. Default: 10")]
    per_page: Option<usize>,
}

fn tool_error(msg: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(msg.into())]))
}

fn page_json(
    results: &SearchResults,
    page: Option<usize>,
    per_page: Option<usize>,
) -> Result<String, SkyError> {
    let selected = crate::select_page(
        results,
        per_page.unwrap_or(RESULTS_PER_PAGE),
        page.unwrap_or(1),
    )?;
    selected.to_json(true)
}

fn search_params(args: &SearchArgs) -> Result<SearchParams, SkyError> {
    let cabin_class = args
        .cabin_class
        .as_deref()
        .map(CabinClass::from_str_loose)
        .transpose()?
        .unwrap_or(CabinClass::Economy);

    let params = SearchParams {
        origin_sky_id: args.origin_sky_id.trim().to_string(),
        destination_sky_id: args.destination_sky_id.trim().to_string(),
        origin_entity_id: args.origin_entity_id.trim().to_string(),
        destination_entity_id: args.destination_entity_id.trim().to_string(),
        date: args.date.clone(),
        return_date: args.return_date.clone(),
        adults: args.adults.unwrap_or(1),
        cabin_class,
    };
    params.validate()?;
    Ok(params)
}

#[derive(Debug, Clone)]
struct SkyfareMcp {
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SkyfareMcp {
    fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Normalize a raw flight-search API response into display-ready itineraries. Returns one page of results as JSON: best price (null when unavailable), route labels, departure/arrival date and time labels, duration label and airline name/logo. Missing data is reported with sentinel text such as \"Date not available\" or \"N/A\"."
    )]
    async fn skyfare_normalize(
        &self,
        Parameters(args): Parameters<NormalizeArgs>,
    ) -> Result<CallToolResult, McpError> {
        let results = match crate::normalize::normalize_json(&args.response) {
            Ok(r) => r,
            Err(e) => return tool_error(e.to_string()),
        };

        match page_json(&results, args.page, args.per_page) {
            Ok(json) => Ok(CallToolResult::success(vec![Content::text(json)])),
            Err(e) => tool_error(e.to_string()),
        }
    }

    #[tool(
        description = "Search flights through the flight-search API and return one page of normalized itineraries as JSON. Requires the RAPIDAPI_KEY environment variable on the server. Sky IDs and entity IDs come from the API's airport lookup."
    )]
    async fn skyfare_search(
        &self,
        Parameters(args): Parameters<SearchArgs>,
    ) -> Result<CallToolResult, McpError> {
        let params = match search_params(&args) {
            Ok(p) => p,
            Err(e) => return tool_error(e.to_string()),
        };

        match crate::search(params, FetchOptions::from_env()).await {
            Ok(results) => match page_json(&results, args.page, args.per_page) {
                Ok(json) => Ok(CallToolResult::success(vec![Content::text(json)])),
                Err(e) => tool_error(e.to_string()),
            },
            Err(e) => {
                error!(error = %e, "search tool failed");
                tool_error(e.to_string())
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for SkyfareMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "skyfare".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Flight results tool. Use skyfare_search to query the flight-search API, or skyfare_normalize to turn a response you already hold into display-ready itineraries. Both return one page at a time; request further pages with the page argument.".into(),
            ),
        }
    }
}

pub async fn run() {
    let service = SkyfareMcp::new()
        .serve(rmcp::transport::stdio())
        .await
        .expect("failed to start MCP server");
    service.waiting().await.expect("MCP server error");
}
