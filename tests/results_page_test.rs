use serde_json::json;
use skyfare::error::SkyError;
use skyfare::normalize::normalize_value;
use skyfare::select_page;
use skyfare::table::{compact_line, page_footer, render};

fn results(count: usize) -> skyfare::model::SearchResults {
    let itineraries: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "price": { "amount": 100 + i },
                "legs": [{
                    "origin": { "displayCode": "LHR" },
                    "destination": { "displayCode": "CDG" },
                    "durationInMinutes": 75,
                    "departureDateTime": "2025-01-29T08:30:00",
                    "arrivalDateTime": "2025-01-29T10:45:00",
                    "carriers": { "marketing": [{ "name": "AF" }] }
                }]
            })
        })
        .collect();
    normalize_value(&json!({ "data": { "itineraries": itineraries } }))
}

#[test]
fn selects_requested_window() {
    let results = results(23);
    let page = select_page(&results, 10, 3).unwrap();
    assert_eq!(page.total_results, 23);
    assert_eq!(page.page.total_pages, 3);
    assert_eq!(page.page.items.len(), 3);
    assert_eq!(page.page.items[0].index, 20);
    assert!(!page.page.has_next);
}

#[test]
fn rejects_page_past_the_end() {
    let results = results(23);
    match select_page(&results, 10, 4) {
        Err(SkyError::InvalidPage { page, total_pages }) => {
            assert_eq!(page, 4);
            assert_eq!(total_pages, 3);
        }
        other => panic!("expected InvalidPage, got {other:?}"),
    }
}

#[test]
fn rejects_page_zero_and_zero_size() {
    let results = results(3);
    assert!(select_page(&results, 10, 0).is_err());
    assert!(select_page(&results, 0, 1).is_err());
}

#[test]
fn empty_results_have_a_blank_first_page() {
    let results = results(0);
    let page = select_page(&results, 10, 1).unwrap();
    assert!(page.page.items.is_empty());
    assert_eq!(page.page.total_pages, 0);
    assert!(select_page(&results, 10, 2).is_err());
}

#[test]
fn page_serializes_flat() {
    let results = results(12);
    let page = select_page(&results, 10, 2).unwrap();
    let value = serde_json::to_value(&page).unwrap();
    assert_eq!(value["number"], 2);
    assert_eq!(value["total_pages"], 2);
    assert_eq!(value["has_previous"], true);
    assert_eq!(value["has_next"], false);
    assert_eq!(value["items"].as_array().unwrap().len(), 2);
}

#[test]
fn table_shows_display_labels() {
    let results = results(2);
    let output = render(&results.itineraries);
    assert!(output.contains("Air France"));
    assert!(output.contains("LHR → CDG"));
    assert!(output.contains("Jan 29, 2025"));
    assert!(output.contains("1h 15m"));
    assert!(output.contains("100.00"));
    assert!(output.contains("101.00"));
}

#[test]
fn compact_line_layout() {
    let results = results(1);
    assert_eq!(
        compact_line(&results.itineraries[0]),
        "100.00 | LHR>CDG | 1h 15m | Air France | Jan 29, 2025 08:30>10:45"
    );
}

#[test]
fn footer_points_at_neighbours() {
    let results = results(23);
    let page = select_page(&results, 10, 2).unwrap();
    let footer = page_footer(&page);
    assert!(footer.starts_with("Page 2 of 3 (23 results)"));
    assert!(footer.contains("previous: --page 1"));
    assert!(footer.contains("next: --page 3"));
}

#[test]
fn page_serializes_compact_or_pretty() {
    let results = results(3);
    let page = select_page(&results, 2, 1).unwrap();
    let compact = page.to_json(false).unwrap();
    let pretty = page.to_json(true).unwrap();
    assert_eq!(compact.lines().count(), 1);
    assert!(pretty.lines().count() > 1);
    let parsed: serde_json::Value = serde_json::from_str(&compact).unwrap();
    assert_eq!(parsed["total_results"], 3);
    assert_eq!(parsed["items"].as_array().unwrap().len(), 2);
}

#[test]
fn serialization_error_message() {
    let err = SkyError::Serialization("recursion limit exceeded".into());
    assert_eq!(
        err.to_string(),
        "failed to serialize results — recursion limit exceeded"
    );
}
