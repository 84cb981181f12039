mod support;

use dispatch_core::config::DispatchConfig;
use dispatch_core::test_helpers::{engine_with_cabs, reference_engine};
use dispatch_core::{CabId, CabStatus, DispatchError, NodeId, RideId, RidePhase, RoadNetwork};
use support::{backlog, booked, cab_location, cab_status, queued};

#[test]
fn reference_scenario_books_and_completes() {
    let mut engine = reference_engine(&[(1, 2)]);

    let ride = booked(engine.book_ride(NodeId(5)).expect("book"));
    assert_eq!(ride.pickup_distance, 3);
    assert_eq!(ride.phase, RidePhase::InProgress);
    assert_eq!(cab_location(&engine, 1), NodeId(5));
    assert_eq!(cab_status(&engine, 1), CabStatus::OnRide);

    let closure = engine.end_ride(ride.id, NodeId(8)).expect("end");
    assert_eq!(closure.ride.distance, 3);
    assert_eq!(closure.ride.fare, 30);
    assert_eq!(closure.ride.drop, Some(NodeId(8)));
    assert_eq!(closure.ride.path.first(), Some(&NodeId(5)));
    assert_eq!(closure.ride.path.last(), Some(&NodeId(8)));
    assert_eq!(closure.cab_status, CabStatus::Available);
    assert!(closure.reassigned.is_none());

    assert_eq!(cab_location(&engine, 1), NodeId(8));
    assert_eq!(cab_status(&engine, 1), CabStatus::Available);
    assert_eq!(engine.ledger().completed_rides().len(), 1);
    assert_eq!(engine.ledger().active_rides().count(), 0);
}

#[test]
fn equidistant_cabs_go_to_lowest_id() {
    for _ in 0..5 {
        let mut engine = reference_engine(&[(5, 4), (3, 6)]);
        let ride = booked(engine.book_ride(NodeId(5)).expect("book"));
        assert_eq!(ride.cab, CabId(3));
    }
}

#[test]
fn nearest_cab_beats_lower_id() {
    let mut engine = reference_engine(&[(1, 0), (9, 6)]);
    let ride = booked(engine.book_ride(NodeId(7)).expect("book"));
    assert_eq!(ride.cab, CabId(9));
    assert_eq!(ride.pickup_distance, 1);
}

#[test]
fn cab_already_at_pickup_has_zero_length_approach() {
    let mut engine = reference_engine(&[(1, 4)]);
    let ride = booked(engine.book_ride(NodeId(4)).expect("book"));
    assert_eq!(ride.pickup_distance, 0);
    assert_eq!(ride.path, vec![NodeId(4)]);
}

#[test]
fn ride_ids_increase_across_bookings_and_reset() {
    let mut engine = reference_engine(&[(1, 0), (2, 9)]);
    let first = booked(engine.book_ride(NodeId(1)).expect("book"));
    let second = booked(engine.book_ride(NodeId(8)).expect("book"));
    assert!(second.id > first.id);

    engine.reset_availability();
    let third = booked(engine.book_ride(NodeId(3)).expect("book"));
    assert_eq!(third.id, RideId(3));
}

#[test]
fn cancel_never_records_completion_but_end_does() {
    let mut engine = reference_engine(&[(1, 0), (2, 9)]);
    let canceled = booked(engine.book_ride(NodeId(1)).expect("book"));
    let ended = booked(engine.book_ride(NodeId(8)).expect("book"));

    engine.cancel_ride(canceled.id).expect("cancel");
    assert!(engine.ledger().completed_rides().is_empty());

    engine.end_ride(ended.id, NodeId(6)).expect("end");
    let completed = engine.ledger().completed_rides();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, ended.id);
    assert_eq!(completed[0].fare, 20);
}

#[test]
fn closed_rides_cannot_be_closed_again() {
    let mut engine = reference_engine(&[(1, 0)]);
    let ride = booked(engine.book_ride(NodeId(2)).expect("book"));
    engine.end_ride(ride.id, NodeId(3)).expect("end");

    assert_eq!(
        engine.end_ride(ride.id, NodeId(4)),
        Err(DispatchError::RideNotFound(ride.id))
    );
    assert_eq!(
        engine.cancel_ride(ride.id),
        Err(DispatchError::RideNotFound(ride.id))
    );
    assert_eq!(engine.ledger().completed_rides().len(), 1);
}

#[test]
fn reset_clears_rides_backlog_and_markers() {
    let mut engine = reference_engine(&[(1, 0), (2, 5)]);
    let first = booked(engine.book_ride(NodeId(1)).expect("book"));
    booked(engine.book_ride(NodeId(6)).expect("book"));
    queued(engine.book_ride(NodeId(9)).expect("queue"));
    queued(engine.book_ride(NodeId(3)).expect("queue"));
    // The canceled cab is handed the oldest queued pickup straight away.
    engine.cancel_ride(first.id).expect("cancel");

    let summary = engine.reset_availability();
    assert_eq!(summary.rides_cleared, 2);
    assert_eq!(summary.backlog_cleared, 1);

    assert!(engine.backlog().is_empty());
    assert_eq!(engine.ledger().active_rides().count(), 0);
    assert!(engine
        .fleet()
        .iter()
        .all(|cab| cab.status == CabStatus::Available));
}

#[test]
fn reset_on_idle_engine_is_harmless() {
    let mut engine = reference_engine(&[(1, 0)]);
    let summary = engine.reset_availability();
    assert_eq!(summary.rides_cleared, 0);
    assert_eq!(summary.backlog_cleared, 0);
    assert_eq!(cab_status(&engine, 1), CabStatus::Available);
}

#[test]
fn fare_rate_comes_from_config() {
    let mut engine = engine_with_cabs(
        RoadNetwork::linear(10),
        DispatchConfig::default().with_fare_per_unit(7),
        &[(1, 0)],
    );
    let ride = booked(engine.book_ride(NodeId(0)).expect("book"));
    let closure = engine.end_ride(ride.id, NodeId(4)).expect("end");
    assert_eq!(closure.ride.fare, 28);
}

#[test]
fn duplicate_cab_ids_are_rejected() {
    let mut engine = reference_engine(&[(1, 0)]);
    let err = engine.add_cab(CabId(1), "Someone Else", NodeId(3)).unwrap_err();
    assert_eq!(err, DispatchError::AlreadyExists(CabId(1)));
    assert_eq!(engine.fleet().len(), 1);
    assert_eq!(cab_location(&engine, 1), NodeId(0));
}

#[test]
fn booking_with_no_cabs_queues_without_error() {
    let mut engine = reference_engine(&[]);
    assert_eq!(queued(engine.book_ride(NodeId(4)).expect("queue")), 1);
    assert_eq!(queued(engine.book_ride(NodeId(4)).expect("queue")), 2);
    assert_eq!(backlog(&engine), vec![4, 4]);
}

#[test]
fn a_cab_serves_at_most_one_active_ride() {
    let mut engine = reference_engine(&[(1, 0), (2, 9)]);
    for pickup in [1, 2, 3, 4] {
        engine.book_ride(NodeId(pickup)).expect("book");
    }

    let mut cabs: Vec<CabId> = engine.ledger().active_rides().map(|ride| ride.cab).collect();
    cabs.sort();
    cabs.dedup();
    assert_eq!(cabs.len(), engine.ledger().active_rides().count());
    assert_eq!(engine.backlog().len(), 2);
}
