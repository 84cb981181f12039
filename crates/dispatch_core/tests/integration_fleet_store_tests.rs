use std::fs;

use dispatch_core::config::DispatchConfig;
use dispatch_core::fleet::FleetRegistry;
use dispatch_core::fleet_store::{load_fleet, save_fleet, FleetStoreError};
use dispatch_core::test_helpers::{reference_engine, reference_network};
use dispatch_core::{BookingOutcome, CabId, CabStatus, DispatchEngine, NodeId};

#[test]
fn missing_file_loads_as_empty_fleet() {
    let dir = tempfile::tempdir().expect("temp dir");
    let fleet = load_fleet(&dir.path().join("cabs.txt")).expect("load");
    assert!(fleet.is_empty());
}

#[test]
fn saved_fleet_loads_back_with_availability() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("cabs.txt");

    let mut engine = reference_engine(&[(1, 2), (2, 7)]);
    engine.add_cab(CabId(3), "Anita Rao", NodeId(4)).expect("add");
    let outcome = engine.book_ride(NodeId(5)).expect("book");
    assert!(matches!(outcome, BookingOutcome::Booked { .. }));

    save_fleet(&path, engine.fleet()).expect("save");
    let contents = fs::read_to_string(&path).expect("read");
    assert_eq!(contents, "1 driver-1 2 1\n2 driver-2 7 1\n3 Anita Rao 5 0\n");

    let restored = load_fleet(&path).expect("load");
    assert_eq!(restored.len(), 3);
    let anita = restored.get(CabId(3)).expect("cab 3");
    assert_eq!(anita.driver, "Anita Rao");
    assert_eq!(anita.location, NodeId(5));
    assert_eq!(anita.status, CabStatus::OnRide);
}

#[test]
fn save_replaces_previous_contents() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("cabs.txt");

    let mut fleet = FleetRegistry::new();
    fleet.add_cab(CabId(1), "Asha", NodeId(0)).expect("add");
    save_fleet(&path, &fleet).expect("save");
    fleet.add_cab(CabId(2), "Ravi", NodeId(1)).expect("add");
    save_fleet(&path, &fleet).expect("save again");

    assert_eq!(load_fleet(&path).expect("load").len(), 2);
    let leftovers = fs::read_dir(dir.path()).expect("list").count();
    assert_eq!(leftovers, 1, "temp files must not be left behind");
}

#[test]
fn malformed_line_reports_line_number() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("cabs.txt");
    fs::write(&path, "1 Asha 0 1\n\n2 Ravi north 1\n").expect("write");

    match load_fleet(&path) {
        Err(FleetStoreError::InvalidFormat { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected invalid format, got {other:?}"),
    }
}

#[test]
fn duplicate_ids_in_file_are_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("cabs.txt");
    fs::write(&path, "1 Asha 0 1\n1 Ravi 3 1\n").expect("write");

    match load_fleet(&path) {
        Err(FleetStoreError::Duplicate { line, cab, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(cab, CabId(1));
        }
        other => panic!("expected duplicate, got {other:?}"),
    }
}

#[test]
fn restored_fleet_is_usable_after_reset() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("cabs.txt");
    fs::write(&path, "4 Meera 2 0\n6 Li Wei 8 1\n").expect("write");

    let fleet = load_fleet(&path).expect("load");
    let mut engine =
        DispatchEngine::with_fleet(reference_network(), fleet, DispatchConfig::default());
    assert_eq!(engine.fleet().free_cabs().count(), 1);

    engine.reset_availability();
    assert_eq!(engine.fleet().free_cabs().count(), 2);

    match engine.book_ride(NodeId(3)).expect("book") {
        BookingOutcome::Booked { ride } => assert_eq!(ride.cab, CabId(4)),
        other => panic!("expected booking, got {other:?}"),
    }
}
