//! Text and JSON rendering of engine results.
//!
//! Tables are fixed-width ASCII; cells that do not fit are cut and end in `...`.

use clap::ValueEnum;
use dispatch_core::engine::ResetSummary;
use dispatch_core::fleet::FleetRegistry;
use dispatch_core::snapshot::{BacklogSnapshot, CabSnapshot};
use dispatch_core::{BookingOutcome, Cab, CabStatus, DispatchError, NodeId, Ride, RideClosure};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// How a ride left the active set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosureKind {
    Ended,
    Canceled,
}

struct Column {
    title: &'static str,
    width: usize,
}

const fn column(title: &'static str, width: usize) -> Column {
    Column { title, width }
}

const CAB_COLUMNS: [Column; 5] = [
    column("ID", 6),
    column("Driver", 18),
    column("Location", 10),
    column("Status", 11),
    column("Ride", 6),
];

const ACTIVE_COLUMNS: [Column; 5] = [
    column("Ride", 6),
    column("Cab", 6),
    column("Pickup", 8),
    column("Approach", 10),
    column("Path", 25),
];

const COMPLETED_COLUMNS: [Column; 7] = [
    column("Ride", 6),
    column("Cab", 6),
    column("Pickup", 8),
    column("Drop", 6),
    column("Distance", 10),
    column("Fare", 8),
    column("Path", 25),
];

const BACKLOG_COLUMNS: [Column; 2] = [column("Position", 10), column("Pickup", 8)];

fn fit(text: &str, width: usize) -> String {
    let length = text.chars().count();
    if length <= width {
        return format!("{text:<width$}");
    }
    let keep = width.saturating_sub(3);
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str(&".".repeat(width - keep));
    cut
}

fn table<I>(columns: &[Column], rows: I) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    let border = columns.iter().fold(String::from("+"), |mut line, column| {
        line.push_str(&"-".repeat(column.width + 2));
        line.push('+');
        line
    });
    let row_line = |cells: &[String]| {
        columns
            .iter()
            .zip(cells)
            .fold(String::from("|"), |mut line, (column, cell)| {
                line.push(' ');
                line.push_str(&fit(cell, column.width));
                line.push_str(" |");
                line
            })
    };

    let header: Vec<String> = columns.iter().map(|column| column.title.to_string()).collect();
    let mut lines = vec![border.clone(), row_line(&header), border.clone()];
    lines.extend(rows.into_iter().map(|cells| row_line(&cells)));
    lines.push(border);
    lines.join("\n")
}

/// `2->3->5`; an empty path renders as `-`.
pub fn format_path(path: &[NodeId]) -> String {
    if path.is_empty() {
        return "-".to_string();
    }
    path.iter()
        .map(NodeId::to_string)
        .collect::<Vec<_>>()
        .join("->")
}

fn status_label(status: CabStatus) -> &'static str {
    match status {
        CabStatus::Available => "Available",
        CabStatus::OnRide => "On ride",
        CabStatus::Canceled => "Canceled",
    }
}

pub fn cabs_table(cabs: &[CabSnapshot]) -> String {
    if cabs.is_empty() {
        return "No cabs registered.".to_string();
    }
    table(
        &CAB_COLUMNS,
        cabs.iter().map(|cab| {
            vec![
                cab.id.to_string(),
                cab.driver.clone(),
                cab.location.to_string(),
                status_label(cab.status).to_string(),
                cab.ride.map_or_else(|| "-".to_string(), |ride| ride.to_string()),
            ]
        }),
    )
}

pub fn active_rides_table(rides: &[Ride]) -> String {
    if rides.is_empty() {
        return "No active rides.".to_string();
    }
    table(
        &ACTIVE_COLUMNS,
        rides.iter().map(|ride| {
            vec![
                ride.id.to_string(),
                ride.cab.to_string(),
                ride.pickup.to_string(),
                ride.pickup_distance.to_string(),
                format_path(&ride.path),
            ]
        }),
    )
}

pub fn completed_rides_table(rides: &[Ride]) -> String {
    if rides.is_empty() {
        return "No completed rides.".to_string();
    }
    table(
        &COMPLETED_COLUMNS,
        rides.iter().map(|ride| {
            vec![
                ride.id.to_string(),
                ride.cab.to_string(),
                ride.pickup.to_string(),
                ride.drop.map_or_else(|| "-".to_string(), |drop| drop.to_string()),
                ride.distance.to_string(),
                ride.fare.to_string(),
                format_path(&ride.path),
            ]
        }),
    )
}

pub fn backlog_table(entries: &[BacklogSnapshot]) -> String {
    if entries.is_empty() {
        return "No pickups waiting in the queue.".to_string();
    }
    table(
        &BACKLOG_COLUMNS,
        entries
            .iter()
            .map(|entry| vec![entry.position.to_string(), entry.pickup.to_string()]),
    )
}

fn driver_of(fleet: &FleetRegistry, ride: &Ride) -> String {
    fleet
        .get(ride.cab)
        .map_or_else(|| "unknown".to_string(), |cab| cab.driver.clone())
}

pub fn cab_added_message(cab: &Cab) -> String {
    format!(
        "Cab {} added (driver: {}) at node {}.",
        cab.id, cab.driver, cab.location
    )
}

pub fn booking_message(outcome: &BookingOutcome, fleet: &FleetRegistry) -> String {
    match outcome {
        BookingOutcome::Booked { ride } => format!(
            "Ride {} booked: cab {} (driver: {}) picks up at node {}, {} away.",
            ride.id,
            ride.cab,
            driver_of(fleet, ride),
            ride.pickup,
            ride.pickup_distance
        ),
        BookingOutcome::Queued { pickup, position } => format!(
            "No cab can reach node {pickup} right now. Pickup queued at position {position}."
        ),
    }
}

pub fn closure_message(closure: &RideClosure, kind: ClosureKind, fleet: &FleetRegistry) -> String {
    let ride = &closure.ride;
    let mut lines = vec![match kind {
        ClosureKind::Ended => format!(
            "Ride {} ended at node {}: distance {}, fare {}.",
            ride.id,
            ride.drop.map_or_else(|| "-".to_string(), |drop| drop.to_string()),
            ride.distance,
            ride.fare
        ),
        ClosureKind::Canceled => format!("Ride {} canceled.", ride.id),
    }];

    if let Some(pickup) = closure.discarded {
        lines.push(format!(
            "Queued pickup at node {pickup} dropped: cab {} cannot reach it.",
            ride.cab
        ));
    }
    match &closure.reassigned {
        Some(next) => lines.push(format!(
            "Cab {} (driver: {}) assigned to queued pickup at node {} as ride {}.",
            next.cab,
            driver_of(fleet, next),
            next.pickup,
            next.id
        )),
        None => lines.push(format!(
            "Cab {} is now {}.",
            ride.cab,
            status_label(closure.cab_status).to_lowercase()
        )),
    }
    lines.join("\n")
}

pub fn reset_message(summary: &ResetSummary) -> String {
    format!(
        "All cabs set to available ({} active ride(s) and {} queued pickup(s) cleared).",
        summary.rides_cleared, summary.backlog_cleared
    )
}

pub fn error_message(error: &DispatchError) -> String {
    format!("error: {error}")
}

/// Pretty JSON; serialization of engine types cannot fail, but a failure still renders.
pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|error| serde_json::json!({ "error": error.to_string() }).to_string())
}
