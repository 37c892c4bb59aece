use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::model::{DisplayItinerary, LegMoment};
use crate::price::format_price;
use crate::ResultsPage;

fn moment_cell(moment: &LegMoment) -> String {
    format!("{}\n{}", moment.date_label, moment.time_label)
}

pub fn render(itineraries: &[DisplayItinerary]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Airline", "Route", "Depart", "Arrive", "Duration", "Price"]);

    for itinerary in itineraries {
        let number = (itinerary.index + 1).to_string();
        let route = format!(
            "{} → {}",
            itinerary.route.origin_label, itinerary.route.destination_label
        );
        let depart = moment_cell(&itinerary.departure);
        let arrive = moment_cell(&itinerary.arrival);
        let price = format_price(itinerary.best_price);

        table.add_row(vec![
            &number,
            &itinerary.airline.display_name,
            &route,
            &depart,
            &arrive,
            &itinerary.duration_label,
            &price,
        ]);
    }

    table.to_string()
}

/// One line per itinerary, for scripts and agents.
pub fn compact_line(itinerary: &DisplayItinerary) -> String {
    format!(
        "{} | {}>{} | {} | {} | {} {}>{}",
        format_price(itinerary.best_price),
        itinerary.route.origin_label,
        itinerary.route.destination_label,
        itinerary.duration_label,
        itinerary.airline.display_name,
        itinerary.departure.date_label,
        itinerary.departure.time_label,
        itinerary.arrival.time_label,
    )
}

pub fn page_footer(page: &ResultsPage<'_>) -> String {
    let mut footer = format!(
        "Page {} of {} ({} results)",
        page.page.number, page.page.total_pages, page.total_results
    );
    if page.page.has_previous {
        footer.push_str(&format!(" · previous: --page {}", page.page.number - 1));
    }
    if page.page.has_next {
        footer.push_str(&format!(" · next: --page {}", page.page.number + 1));
    }
    footer
}
