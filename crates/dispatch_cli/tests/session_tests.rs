use std::fs;
use std::path::PathBuf;

use dispatch_cli::render::OutputFormat;
use dispatch_cli::session::{Session, PROMPT};
use dispatch_core::config::DispatchConfig;
use dispatch_core::test_helpers::{reference_engine, reference_network};
use dispatch_core::DispatchEngine;

fn run_script(session: &mut Session, script: &str) -> String {
    let mut out = Vec::new();
    session
        .run(script.as_bytes(), &mut out, false)
        .expect("session i/o");
    String::from_utf8(out).expect("utf8 output")
}

#[test]
fn booking_and_ending_rides_through_commands() {
    let mut session = Session::new(
        reference_engine(&[(1, 2), (2, 7), (3, 5)]),
        None,
        OutputFormat::Table,
    );

    let output = run_script(
        &mut session,
        "book 4\nbook 1\n\nactive\nend 1 6\ncompleted\nquit\nbook 9\n",
    );

    assert!(output.contains("Ride 1 booked: cab 3 (driver: driver-3) picks up at node 4, 1 away."));
    assert!(output.contains("Ride 2 booked: cab 1"));
    assert!(output.contains("Ride 1 ended at node 6: distance 2, fare 20."));
    assert!(output.contains("Cab 3 is now available."));
    assert!(output.contains("| Fare"));
    assert!(!output.contains(PROMPT));

    // `quit` stops the loop before the last booking.
    let ledger = session.engine().ledger();
    assert_eq!(ledger.active_rides().count(), 1);
    assert_eq!(ledger.completed_rides().len(), 1);
}

#[test]
fn engine_errors_are_reported_and_the_session_continues() {
    let mut session = Session::new(reference_engine(&[(1, 0)]), None, OutputFormat::Table);

    let output = run_script(&mut session, "end 99 1\nbook 42\nteleport\nbook 3\n");

    assert!(output.contains("error: ride 99 is not active"));
    assert!(output.contains("error: pickup node 42 is not part of the road network"));
    assert!(output.contains("teleport"));
    assert!(output.contains("Ride 1 booked"));
}

#[test]
fn queued_pickups_are_served_when_a_cab_frees_up() {
    let mut session = Session::new(reference_engine(&[(1, 0)]), None, OutputFormat::Table);

    let output = run_script(&mut session, "book 2\nbook 8\nqueue\ncancel 1\nqueue\n");

    assert!(output.contains("Pickup queued at position 1."));
    assert!(output.contains("Ride 1 canceled."));
    assert!(output.contains("assigned to queued pickup at node 8 as ride 2."));
    assert!(output.contains("No pickups waiting in the queue."));
}

#[test]
fn json_format_emits_documents() {
    let mut session = Session::new(reference_engine(&[(1, 2)]), None, OutputFormat::Json);

    let output = run_script(&mut session, "book 5\n");
    let outcome: serde_json::Value = serde_json::from_str(&output).expect("json output");

    assert_eq!(outcome["outcome"], "booked");
    assert_eq!(outcome["ride"]["cab"], 1);
    assert_eq!(outcome["ride"]["pickup_distance"], 3);
}

#[test]
fn json_format_reports_bad_input_as_documents() {
    let mut session = Session::new(reference_engine(&[(1, 2)]), None, OutputFormat::Json);

    let output = run_script(&mut session, "teleport \"3\"\nbook two\nend 9 1\n");
    let documents: Vec<serde_json::Value> = serde_json::Deserializer::from_str(&output)
        .into_iter::<serde_json::Value>()
        .collect::<Result<_, _>>()
        .expect("every reply is a json document");

    assert_eq!(documents.len(), 3);
    assert!(documents[0]["error"]
        .as_str()
        .is_some_and(|message| message.contains("teleport")));
    assert!(documents[1]["error"].is_string());
    assert_eq!(documents[2]["error"], "ride 9 is not active");
}

#[test]
fn fleet_changes_are_saved_after_each_command() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path: PathBuf = dir.path().join("cabs.txt");
    let engine = DispatchEngine::new(reference_network(), DispatchConfig::default());
    let mut session = Session::new(engine, Some(path.clone()), OutputFormat::Table);

    run_script(&mut session, "add-cab 1 3 Anita  Rao\nadd-cab 2 6 Li\n");
    assert_eq!(
        fs::read_to_string(&path).expect("fleet file"),
        "1 Anita Rao 3 1\n2 Li 6 1\n"
    );

    run_script(&mut session, "book 7\n");
    assert_eq!(
        fs::read_to_string(&path).expect("fleet file"),
        "1 Anita Rao 3 1\n2 Li 7 0\n"
    );

    let output = run_script(&mut session, "reset\ncabs\n");
    assert!(output.contains("1 active ride(s) and 0 queued pickup(s) cleared"));
    assert!(output.contains("Anita Rao"));
    assert_eq!(
        fs::read_to_string(&path).expect("fleet file"),
        "1 Anita Rao 3 1\n2 Li 7 1\n"
    );
}
