//! Schedule rendering for direct connections
//!
//! Turns the transit API's raw fields into the plain-text connection table
//! shown to the traveller.

use crate::ports::TrainConnection;

/// Guidance shown instead of an empty table
pub const NO_CONNECTIONS_HELP: &str = "No valid connections data. Try searching for a connection \
     to Paris first, then from Paris to your final destination.";

/// Placeholder for fields the API did not report
const UNKNOWN: &str = "Unknown";

/// Parse the API's `DDdHH:MM:SS` duration shape into total minutes
///
/// Seconds are present in the wire format but never shown, so they are
/// validated for shape and dropped.
#[must_use]
pub fn parse_duration_minutes(raw: &str) -> Option<u32> {
    let (days, time) = raw.split_once('d')?;
    let mut parts = time.splitn(3, ':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    let _seconds: u32 = parts.next()?.parse().ok()?;
    let days: u32 = days.parse().ok()?;

    Some((days * 24 + hours) * 60 + minutes)
}

/// Render total minutes as "27h 0m", days already folded into hours
#[must_use]
pub fn format_duration(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Render connections as a plain-text table
///
/// Times are truncated to hour:minute; absent fields render as "Unknown".
/// An empty list produces the fixed guidance message rather than an empty
/// table.
#[must_use]
pub fn format_schedule(connections: &[TrainConnection]) -> String {
    if connections.is_empty() {
        return NO_CONNECTIONS_HELP.to_string();
    }

    let mut table = String::from("Time\t\t\tJourney\t\t\tProducts\t\t\tPlatform\n");
    table.push_str(&"-".repeat(100));
    table.push('\n');

    for connection in connections {
        let departure = connection
            .departure
            .map_or_else(|| UNKNOWN.to_string(), |t| t.format("%H:%M").to_string());
        let arrival = connection
            .arrival
            .map_or_else(|| UNKNOWN.to_string(), |t| t.format("%H:%M").to_string());
        let duration = connection
            .duration_minutes
            .map_or_else(|| UNKNOWN.to_string(), format_duration);
        let products = if connection.products.is_empty() {
            UNKNOWN.to_string()
        } else {
            connection.products.join(", ")
        };
        let from_platform = connection.from_platform.as_deref().unwrap_or(UNKNOWN);
        let to_platform = connection.to_platform.as_deref().unwrap_or(UNKNOWN);

        table.push_str(&format!(
            "{departure} - {arrival}\t{duration}\t\t{products}\t\t{from_platform} to {to_platform}\n"
        ));
    }

    table
}
