use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo_bin!("skyfare"))
}

fn itinerary(price: u32) -> serde_json::Value {
    json!({
        "pricingOptions": [{ "price": { "amount": price } }],
        "legs": [{
            "origin": { "name": "London Heathrow", "displayCode": "LHR" },
            "destination": { "name": "Munich", "displayCode": "MUC" },
            "durationInMinutes": 125,
            "departureDateTime": "2025-01-29T10:00:00",
            "arrivalDateTime": "2025-01-29T13:05:00",
            "carriers": { "marketing": [{ "name": "LH" }] }
        }]
    })
}

fn response(count: u32) -> String {
    let itineraries: Vec<_> = (0..count).map(|i| itinerary(100 + i)).collect();
    json!({
        "status": true,
        "data": {
            "itineraries": itineraries,
            "destinationImageUrl": "https://content.skyscnr.com/munich.jpg"
        }
    })
    .to_string()
}

#[test]
fn top_level_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Normalize flight-search results into display-ready itineraries",
        ))
        .stdout(predicate::str::contains("results"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("Examples:"));
}

#[test]
fn top_level_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("skyfare 0.1.0"));
}

#[test]
fn results_help_shows_output_flags() {
    cmd()
        .args(["results", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--input <FILE>"))
        .stdout(predicate::str::contains("--page <N>"))
        .stdout(predicate::str::contains("--per-page <N>"))
        .stdout(predicate::str::contains("[default: 10]"))
        .stdout(predicate::str::contains("--compact"))
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("--pretty"));
}

#[test]
fn results_table_from_stdin() {
    cmd()
        .arg("results")
        .write_stdin(response(2))
        .assert()
        .success()
        .stdout(predicate::str::contains("Lufthansa"))
        .stdout(predicate::str::contains("London Heathrow → Munich"))
        .stdout(predicate::str::contains("Jan 29, 2025"))
        .stdout(predicate::str::contains("2h 5m"))
        .stdout(predicate::str::contains("100.00"))
        .stdout(predicate::str::contains("Destination: https://content.skyscnr.com/munich.jpg"))
        .stdout(predicate::str::contains("Page 1 of 1 (2 results)"));
}

#[test]
fn results_compact() {
    cmd()
        .args(["results", "--compact"])
        .write_stdin(response(1))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "100.00 | London Heathrow>Munich | 2h 5m | Lufthansa | Jan 29, 2025 10:00>13:05",
        ));
}

#[test]
fn results_second_page() {
    cmd()
        .args(["results", "--compact", "--page", "3"])
        .write_stdin(response(23))
        .assert()
        .success()
        .stdout(predicate::str::contains("120.00"))
        .stdout(predicate::str::contains("122.00"))
        .stdout(predicate::str::contains("119.00").not())
        .stdout(predicate::str::contains("Page 3 of 3 (23 results)"));
}

#[test]
fn results_json() {
    let output = cmd()
        .args(["results", "--json", "--per-page", "5"])
        .write_stdin(response(7))
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(parsed["total_results"], 7);
    assert_eq!(parsed["total_pages"], 2);
    assert_eq!(parsed["has_next"], true);
    assert_eq!(parsed["items"].as_array().unwrap().len(), 5);
    assert_eq!(parsed["items"][0]["best_price"], json!(100.0));
    assert_eq!(parsed["items"][0]["airline"]["display_name"], "Lufthansa");
    assert_eq!(
        parsed["destination_image_url"],
        "https://content.skyscnr.com/munich.jpg"
    );
}

#[test]
fn results_pretty_json_is_multiline() {
    let output = cmd()
        .args(["results", "--pretty"])
        .write_stdin(response(1))
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    assert!(stdout.lines().count() > 10);
    assert!(serde_json::from_str::<serde_json::Value>(&stdout).is_ok());
}

#[test]
fn results_from_file() {
    let path = std::env::temp_dir().join(format!("skyfare-cli-test-{}.json", std::process::id()));
    std::fs::write(&path, response(1)).unwrap();
    cmd()
        .args(["results", "--input"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Lufthansa"));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn missing_input_file_fails() {
    cmd()
        .args(["results", "--input", "/nonexistent/skyfare/response.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read input"));
}

#[test]
fn empty_results_message() {
    cmd()
        .arg("results")
        .write_stdin(json!({ "status": true, "data": { "itineraries": [] } }).to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("No flight itineraries found."));
}

#[test]
fn partial_itinerary_renders_sentinels() {
    let body = json!({ "data": { "itineraries": [{ "legs": [{}] }] } }).to_string();
    cmd()
        .args(["results", "--compact"])
        .write_stdin(body)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Price unavailable | N/A>N/A | N/A | N/A | Date not available N/A>N/A",
        ));
}

#[test]
fn page_out_of_range_fails() {
    cmd()
        .args(["results", "--page", "3"])
        .write_stdin(response(12))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("page 3 is out of range"));
}

#[test]
fn json_mode_error_is_structured() {
    let output = cmd()
        .args(["results", "--json", "--page", "0"])
        .write_stdin(response(1))
        .assert()
        .failure();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON error");
    assert_eq!(parsed["error"]["kind"], "invalid_page");
    assert!(parsed["error"]["message"]
        .as_str()
        .unwrap()
        .contains("out of range"));
}

#[test]
fn malformed_json_fails() {
    cmd()
        .arg("results")
        .write_stdin("{ definitely not json")
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("failed to read search response"));
}

#[test]
fn api_error_status_fails() {
    cmd()
        .arg("results")
        .write_stdin(json!({ "status": false, "message": "Rate limit reached" }).to_string())
        .assert()
        .failure()
        .stderr(predicate::str::contains("flight-search API reported an error"))
        .stderr(predicate::str::contains("Rate limit reached"));
}

fn search_cmd() -> Command {
    let mut c = cmd();
    c.env_remove("RAPIDAPI_KEY").args([
        "search",
        "--origin-sky-id",
        "LOND",
        "--origin-entity-id",
        "27544008",
        "--destination-sky-id",
        "NYCA",
        "--destination-entity-id",
        "27537542",
    ]);
    c
}

#[test]
fn search_requires_route_args() {
    cmd()
        .args(["search", "-d", "2025-01-29"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--origin-sky-id"));
}

#[test]
fn search_invalid_date() {
    search_cmd()
        .args(["-d", "29-01-2025", "--api-key", "k"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date"));
}

#[test]
fn search_invalid_cabin_class() {
    search_cmd()
        .args(["-d", "2025-01-29", "--cabin-class", "luxury", "--api-key", "k"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid cabin class"));
}

#[test]
fn search_too_many_adults() {
    search_cmd()
        .args(["-d", "2025-01-29", "--adults", "12", "--api-key", "k"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds maximum of 9"));
}

#[test]
fn search_without_api_key() {
    search_cmd()
        .args(["-d", "2025-01-29"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("no API key"));
}

#[test]
fn search_without_api_key_json() {
    let output = search_cmd()
        .args(["-d", "2025-01-29", "--json"])
        .assert()
        .failure();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON error");
    assert_eq!(parsed["error"]["kind"], "missing_api_key");
}
