//! Plain-text rendering of planner results. Colors are applied by the caller.

use common::types::place::{Place, PlaceCandidate, PlaceDetails};
use common::types::place_category::PlaceCategory;
use common::types::trip::TripWithExpenses;
use common::utils::format_rating;
use trips::ledger::{split_amount, total_by_currency};

const REVIEW_PREVIEW_CHARS: usize = 160;

/// One legend entry per active category, e.g. `"● Restaurants (red)"`.
pub fn legend(categories: &[PlaceCategory]) -> Vec<String> {
    categories
        .iter()
        .map(|category| format!("● {} ({})", category.label(), category.marker_color()))
        .collect()
}

/// Numbered list entry, numbering from 1.
pub fn place_line(index: usize, place: &Place) -> String {
    let mut line = format!(
        "{:>2}. {} {} [{}]",
        index + 1,
        place.name,
        format_rating(place.rating),
        place.category.label()
    );
    if let Some(vicinity) = &place.vicinity {
        line.push_str(&format!(" - {}", vicinity));
    }
    line
}

pub fn candidate_line(index: usize, candidate: &PlaceCandidate) -> String {
    let mut line = format!(
        "{:>2}. {} {}",
        index + 1,
        candidate.name,
        format_rating(candidate.rating)
    );
    if let Some(vicinity) = &candidate.vicinity {
        line.push_str(&format!(" - {}", vicinity));
    }
    line
}

/// Detail card of a focused place. Fields the provider did not return are
/// left out.
pub fn detail_card(place: &Place) -> Vec<String> {
    let mut card = vec![
        place.name.clone(),
        format!("Rating: {}", format_rating(place.rating)),
    ];
    let Some(details) = &place.details else {
        if let Some(vicinity) = &place.vicinity {
            card.push(format!("Near: {}", vicinity));
        }
        card.push("No further details available.".to_string());
        return card;
    };
    push_details(&mut card, details);
    card
}

fn push_details(card: &mut Vec<String>, details: &PlaceDetails) {
    if let Some(address) = &details.formatted_address {
        card.push(format!("Address: {}", address));
    }
    if let Some(phone) = &details.phone {
        card.push(format!("Phone: {}", phone));
    }
    match details.open_now {
        Some(true) => card.push("Open now".to_string()),
        Some(false) => card.push("Closed".to_string()),
        None => {}
    }
    if let Some(website) = &details.website {
        card.push(format!("Website: {}", website));
    }
    if details.photo_reference.is_some() {
        card.push("Photo available".to_string());
    }
    if let Some(review) = &details.latest_review {
        let author = review.author.as_deref().unwrap_or("Anonymous");
        let text: String = review.text.chars().take(REVIEW_PREVIEW_CHARS).collect();
        let ellipsis = if review.text.chars().count() > REVIEW_PREVIEW_CHARS {
            "..."
        } else {
            ""
        };
        card.push(format!(
            "Latest review by {} ({}): {}{}",
            author,
            format_rating(review.rating),
            text,
            ellipsis
        ));
    }
}

/// Trip header, expense lines with per-person share, and the total.
pub fn trip_summary(entry: &TripWithExpenses) -> Vec<String> {
    let trip = &entry.trip;
    let mut lines = vec![format!(
        "{} ({} -> {}), created {}",
        trip.title,
        trip.start_location,
        trip.destination,
        trip.created_at.format("%Y-%m-%d")
    )];
    for expense in &entry.expenses {
        lines.push(format!(
            "  {} {:.2} {} [{}] paid by {}, {} each{}",
            expense.currency,
            expense.amount,
            expense.description,
            expense.expense_type,
            expense.payee,
            split_amount(expense),
            if expense.split_count > 1 {
                format!(" ({} ways)", expense.split_count)
            } else {
                String::new()
            }
        ));
    }
    if entry.expenses.is_empty() {
        lines.push("  No expenses yet.".to_string());
    } else {
        lines.push(format!("  Total: {}", total_by_currency(&entry.expenses)));
    }
    lines
}
