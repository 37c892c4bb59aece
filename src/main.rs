use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use skyfare::error::SkyError;
use skyfare::fetch::{FetchOptions, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
use skyfare::model::SearchResults;
use skyfare::pager::RESULTS_PER_PAGE;
use skyfare::query::{CabinClass, SearchParams};
use skyfare::{normalize, table};

#[derive(Parser)]
#[command(
    name = "skyfare",
    about = "Normalize flight-search results into display-ready itineraries",
    version,
    after_help = "\
Examples:
  skyfare results --input response.json
  curl -s ... | skyfare results --page 2 --compact
  skyfare search --origin-sky-id LOND --origin-entity-id 27544008 \\
      --destination-sky-id NYCA --destination-entity-id 27537542 -d 2025-01-29"
)]
struct Cli {
    #[arg(short, long, global = true, help = "Log resolution details to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    #[command(
        about = "Normalize a saved search response",
        long_about = "Read a flight-search API response (JSON) from a file or stdin and print \
            one normalized itinerary per result, a page at a time."
    )]
    Results(ResultsArgs),
    #[command(about = "Search flights through the API and normalize the results")]
    Search(SearchArgs),
    #[command(about = "Start MCP server for AI agents (stdio transport)")]
    Mcp,
}

#[derive(clap::Args)]
struct OutputArgs {
    #[arg(long, default_value = "1", value_name = "N", help = "Page of results to show")]
    page: usize,

    #[arg(
        long,
        default_value_t = RESULTS_PER_PAGE,
        value_name = "N",
        help = "Itineraries per page"
    )]
    per_page: usize,

    #[arg(long, help = "One-line-per-itinerary output")]
    compact: bool,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,
}

#[derive(clap::Args)]
struct ResultsArgs {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Response file (reads stdin when omitted)"
    )]
    input: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(clap::Args)]
struct SearchArgs {
    #[arg(long, value_name = "ID", help = "Origin sky ID (e.g. LOND)")]
    origin_sky_id: String,

    #[arg(long, value_name = "ID", help = "Origin entity ID")]
    origin_entity_id: String,

    #[arg(long, value_name = "ID", help = "Destination sky ID (e.g. NYCA)")]
    destination_sky_id: String,

    #[arg(long, value_name = "ID", help = "Destination entity ID")]
    destination_entity_id: String,

    #[arg(short, long, value_name = "YYYY-MM-DD", help = "Departure date")]
    date: String,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Return date")]
    return_date: Option<String>,

    #[arg(long, default_value = "1", value_name = "N", help = "Number of adult passengers")]
    adults: u32,

    #[arg(
        long,
        default_value = "economy",
        value_name = "CLASS",
        help = "Cabin class [economy, premium_economy, business, first]"
    )]
    cabin_class: String,

    #[arg(long, env = API_KEY_ENV, hide_env_values = true, value_name = "KEY", help = "RapidAPI key")]
    api_key: Option<String>,

    #[arg(
        long,
        env = BASE_URL_ENV,
        default_value = DEFAULT_BASE_URL,
        value_name = "URL",
        help = "Flight search endpoint"
    )]
    base_url: String,

    #[arg(long, value_name = "URL", help = "HTTP or SOCKS5 proxy")]
    proxy: Option<String>,

    #[arg(long, default_value = "30", value_name = "SECS", help = "Request timeout")]
    timeout: u64,

    #[command(flatten)]
    output: OutputArgs,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "skyfare=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SKYFARE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn is_json(args: &OutputArgs) -> bool {
    args.json || args.pretty
}

fn error_code(err: &SkyError) -> i32 {
    match err {
        SkyError::InvalidDate(_)
        | SkyError::InvalidPage { .. }
        | SkyError::MissingApiKey
        | SkyError::Validation(_) => 2,
        SkyError::Timeout
        | SkyError::ConnectionFailed(_)
        | SkyError::DnsResolution(_)
        | SkyError::TlsError(_)
        | SkyError::ProxyError(_) => 3,
        SkyError::RateLimited | SkyError::Unauthorized(_) => 4,
        SkyError::HttpStatus(_) => 5,
        SkyError::Api(_) | SkyError::InvalidResponse(_) => 6,
        SkyError::Io(_) => 7,
        SkyError::Serialization(_) => 8,
    }
}

fn error_kind(err: &SkyError) -> &'static str {
    match err {
        SkyError::InvalidDate(_) => "invalid_date",
        SkyError::InvalidPage { .. } => "invalid_page",
        SkyError::MissingApiKey => "missing_api_key",
        SkyError::Validation(_) => "validation_error",
        SkyError::Timeout => "timeout",
        SkyError::ConnectionFailed(_) => "connection_failed",
        SkyError::DnsResolution(_) => "dns_error",
        SkyError::TlsError(_) => "tls_error",
        SkyError::ProxyError(_) => "proxy_error",
        SkyError::RateLimited => "rate_limited",
        SkyError::Unauthorized(_) => "unauthorized",
        SkyError::HttpStatus(_) => "http_error",
        SkyError::Api(_) => "api_error",
        SkyError::InvalidResponse(_) => "parse_error",
        SkyError::Io(_) => "io_error",
        SkyError::Serialization(_) => "serialization_error",
    }
}

fn die(err: &SkyError, json_mode: bool) -> ! {
    if json_mode {
        let json = serde_json::json!({
            "error": {
                "kind": error_kind(err),
                "message": err.to_string(),
            }
        });
        println!("{json}");
    } else {
        eprintln!("error: {err}");
    }
    process::exit(error_code(err));
}

fn read_input(path: Option<&PathBuf>) -> Result<String, SkyError> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| SkyError::Io(format!("{}: {e}", path.display())))?,
        None => std::io::read_to_string(std::io::stdin())?,
    };
    Ok(text)
}

fn print_results(results: &SearchResults, args: &OutputArgs) -> Result<(), SkyError> {
    let page = skyfare::select_page(results, args.per_page, args.page)?;

    if is_json(args) {
        println!("{}", page.to_json(args.pretty)?);
        return Ok(());
    }

    if page.page.items.is_empty() {
        println!("No flight itineraries found.");
        return Ok(());
    }

    if let Some(image) = page.destination_image_url {
        println!("Destination: {image}");
    }

    if args.compact {
        for itinerary in page.page.items {
            println!("{}", table::compact_line(itinerary));
        }
    } else {
        println!("{}", table::render(page.page.items));
    }
    println!("{}", table::page_footer(&page));
    Ok(())
}

fn run_results(args: &ResultsArgs) -> Result<(), SkyError> {
    let text = read_input(args.input.as_ref())?;
    let results = normalize::normalize_json(&text)?;
    print_results(&results, &args.output)
}

fn build_params(args: &SearchArgs) -> Result<SearchParams, SkyError> {
    let params = SearchParams {
        origin_sky_id: args.origin_sky_id.trim().to_string(),
        destination_sky_id: args.destination_sky_id.trim().to_string(),
        origin_entity_id: args.origin_entity_id.trim().to_string(),
        destination_entity_id: args.destination_entity_id.trim().to_string(),
        date: args.date.clone(),
        return_date: args.return_date.clone(),
        adults: args.adults,
        cabin_class: CabinClass::from_str_loose(&args.cabin_class)?,
    };
    params.validate()?;
    Ok(params)
}

async fn run_search(args: &SearchArgs) -> Result<(), SkyError> {
    let params = build_params(args)?;

    let options = FetchOptions {
        api_key: args.api_key.clone(),
        base_url: args.base_url.clone(),
        proxy: args.proxy.clone(),
        timeout: args.timeout,
    };

    let results = skyfare::search(params, options).await?;
    print_results(&results, &args.output)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Mcp => skyfare::mcp::run().await,
        Commands::Results(args) => {
            if let Err(e) = run_results(&args) {
                die(&e, is_json(&args.output));
            }
        }
        Commands::Search(args) => {
            if let Err(e) = run_search(&args).await {
                die(&e, is_json(&args.output));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_failure_is_not_a_usage_error() {
        let err = SkyError::Serialization("key must be a string".into());
        assert_eq!(error_code(&err), 8);
        assert_eq!(error_kind(&err), "serialization_error");
        assert_ne!(error_code(&err), error_code(&SkyError::Validation(String::new())));
    }

    #[test]
    fn usage_errors_exit_with_two() {
        let page = SkyError::InvalidPage { page: 4, total_pages: 2 };
        assert_eq!(error_code(&page), 2);
        assert_eq!(error_code(&SkyError::MissingApiKey), 2);
        assert_eq!(error_kind(&SkyError::InvalidResponse(String::new())), "parse_error");
    }
}
