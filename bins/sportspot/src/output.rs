//! Terminal output helpers

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde_json::Value;
use sportspot_places::{format_distance, FavoriteEntry, Place, RankedPlace, Review};
use std::time::Duration;

/// Status message helpers
pub struct Status;

impl Status {
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Spinner on stderr while waiting for the network
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Distance when known, otherwise the category.
fn distance_label(place: &RankedPlace) -> String {
    match place.distance_km {
        Some(km) => format_distance(km),
        None => place.place.category.clone(),
    }
}

/// One line per place: position, name, distance or category.
pub fn print_places(places: &[RankedPlace]) {
    for (i, place) in places.iter().enumerate() {
        println!(
            "{:>3}. {}  {}  {}",
            i + 1,
            place.name().bold(),
            distance_label(place).cyan(),
            format!("#{}", place.id()).dimmed()
        );
    }
}

pub fn print_place(place: &Place, distance_km: Option<f64>, favorite: bool) {
    Status::header(&place.name);
    let star = if favorite { " ★".yellow().to_string() } else { String::new() };
    println!("  {} {}{}", "Category:".dimmed(), place.category, star);
    if let Some(km) = distance_km {
        println!("  {} {}", "Distance:".dimmed(), format_distance(km));
    }
    for (label, value) in [
        ("Address:", &place.address),
        ("City:", &place.city),
        ("Hours:", &place.opening_hours),
        ("Phone:", &place.phone),
    ] {
        if let Some(value) = value {
            println!("  {} {}", label.dimmed(), value);
        }
    }
    println!("  {} {}", "Position:".dimmed(), place.coordinate);
}

pub fn print_favorites(favorites: &[FavoriteEntry]) {
    for entry in favorites {
        println!(
            "  {} {}  {}  {}",
            "★".yellow(),
            entry.name.bold(),
            entry.category.cyan(),
            format!("#{} saved {}", entry.id, entry.saved_at.format("%Y-%m-%d")).dimmed()
        );
    }
}

pub fn print_reviews(reviews: &[Review]) {
    for review in reviews {
        let stars = "★".repeat(usize::from(review.rating));
        let date = review
            .created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let footer = format!("#{} {date}", review.id);
        println!("  {:<5} {}  {}", stars.yellow(), review.comment, footer.dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sportspot_places::{rank, Coordinate};
    use std::sync::Arc;

    #[test]
    fn test_distance_label_falls_back_to_category() {
        let gym = Place::new("1", "Central Gym", "gym", Coordinate::new(13.75, 100.5));
        let places = vec![Arc::new(gym)];

        let unranked = rank(&places, None);
        assert_eq!(distance_label(&unranked[0]), "gym");

        let ranked = rank(&places, Some(Coordinate::new(13.75, 100.504)));
        assert_eq!(distance_label(&ranked[0]), "432 m");
    }
}
