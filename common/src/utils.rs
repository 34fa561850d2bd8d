use crate::types::geo_point::GeoPoint;
use colored::*;

pub fn print_welcome_message() {
    println!(
        "{}",
        "==============================================".bright_blue()
    );
    println!("{}", "        Route-aware travel planner".bold());
    println!(
        "{}",
        "==============================================".bright_blue()
    );
}

/// Renders a rating as `"4.5★"`, or `"-"` when missing.
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(value) => format!("{:.1}★", value),
        None => "-".to_string(),
    }
}

/// Parses `"lat,lng"` into a point, rejecting out-of-range coordinates.
pub fn parse_lat_lng(raw: &str) -> Option<GeoPoint> {
    let (lat, lng) = raw.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lng: f64 = lng.trim().parse().ok()?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return None;
    }
    Some(GeoPoint::new(lat, lng))
}
