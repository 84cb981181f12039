#![allow(dead_code)]

use dispatch_core::{BookingOutcome, CabId, CabStatus, DispatchEngine, NodeId, Ride};

/// Unwrap a booking that must have matched a cab.
pub fn booked(outcome: BookingOutcome) -> Ride {
    match outcome {
        BookingOutcome::Booked { ride } => ride,
        other => panic!("expected a booked ride, got {other:?}"),
    }
}

/// Unwrap a booking that must have been queued, returning its backlog position.
pub fn queued(outcome: BookingOutcome) -> usize {
    match outcome {
        BookingOutcome::Queued { position, .. } => position,
        other => panic!("expected a queued pickup, got {other:?}"),
    }
}

pub fn cab_status(engine: &DispatchEngine, id: u32) -> CabStatus {
    engine.fleet().get(CabId(id)).expect("cab exists").status
}

pub fn cab_location(engine: &DispatchEngine, id: u32) -> NodeId {
    engine.fleet().get(CabId(id)).expect("cab exists").location
}

pub fn backlog(engine: &DispatchEngine) -> Vec<u32> {
    engine.backlog().peek_all().map(|node| node.0).collect()
}
