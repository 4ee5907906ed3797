//! End-to-end tests for the clock -> collector -> queue -> reporter wiring

use std::sync::atomic::Ordering;
use std::time::Duration;

use hostwatch::Severity;
use hostwatch::actors::clock::ClockActor;
use hostwatch::actors::collector::CollectorActor;
use hostwatch::actors::reporter::{ReporterActor, ReporterConfig};
use hostwatch::agent::Agent;
use tokio::sync::mpsc;

use crate::helpers::*;

#[tokio::test]
async fn readings_flow_from_clock_to_sink_classified() {
    let config = create_test_config(r#"{ "cpu": { "warning": 70.0, "critical": 90.0 } }"#);
    let sink = MockSink::default();

    let (queue_tx, queue_rx) = mpsc::channel(100);
    let (mut clock, clock_handle) = ClockActor::new(Duration::from_millis(10));

    let hot = ScriptedSampler::new("cpu", 95.0);
    let cool = ScriptedSampler::new("memory", 40.0);

    tokio::spawn(CollectorActor::new(Box::new(hot), queue_tx.clone(), clock.register()).run());
    tokio::spawn(CollectorActor::new(Box::new(cool), queue_tx.clone(), clock.register()).run());
    drop(queue_tx);

    let (reporter, reporter_handle) =
        ReporterActor::new(ReporterConfig::from(&config), Box::new(sink.clone()), queue_rx);
    tokio::spawn(reporter.run());
    tokio::spawn(clock.run());

    wait_for(|| sink.sent_events().len() >= 4).await;

    let events = sink.sent_events();
    for event in &events {
        // Static fields come straight from the config.
        assert_eq!(event.ttl, 20.0);
        assert_eq!(event.host, "test-host");
        assert_eq!(event.tags, vec![String::from("integration")]);

        match event.service.as_str() {
            "cpu" => assert_eq!(event.state, Severity::Critical),
            "memory" => assert_eq!(event.state, Severity::Ok), // no threshold
            other => panic!("unexpected service {other}"),
        }
    }

    clock_handle.shutdown().await;
    reporter_handle.shutdown().await;
}

#[tokio::test]
async fn all_collectors_observe_the_shared_clock() {
    let config = create_test_config("{}");
    let sink = MockSink::default();

    let (queue_tx, queue_rx) = mpsc::channel(100);
    let (mut clock, clock_handle) = ClockActor::new(Duration::from_millis(10));

    let first = ScriptedSampler::new("cpu", 1.0);
    let second = ScriptedSampler::new("load", 2.0);
    let first_rounds = first.rounds.clone();
    let second_rounds = second.rounds.clone();

    tokio::spawn(CollectorActor::new(Box::new(first), queue_tx.clone(), clock.register()).run());
    tokio::spawn(CollectorActor::new(Box::new(second), queue_tx.clone(), clock.register()).run());
    drop(queue_tx);

    let (reporter, reporter_handle) =
        ReporterActor::new(ReporterConfig::from(&config), Box::new(sink.clone()), queue_rx);
    tokio::spawn(reporter.run());
    tokio::spawn(clock.run());

    // Both collectors keep pace with the same clock.
    wait_for(|| {
        first_rounds.load(Ordering::SeqCst) >= 3 && second_rounds.load(Ordering::SeqCst) >= 3
    })
    .await;

    let events = sink.sent_events();
    assert!(events.iter().any(|event| event.service == "cpu"));
    assert!(events.iter().any(|event| event.service == "load"));

    clock_handle.shutdown().await;
    reporter_handle.shutdown().await;
}

#[tokio::test]
async fn compound_disk_services_classify_under_the_base_key() {
    let config = create_test_config(r#"{ "disk": { "warning": 80.0, "critical": 95.0 } }"#);
    let sink = MockSink::default();

    let (queue_tx, queue_rx) = mpsc::channel(100);
    let (mut clock, clock_handle) = ClockActor::new(Duration::from_millis(10));

    let boot = ScriptedSampler::new("disk /boot", 85.0);
    tokio::spawn(CollectorActor::new(Box::new(boot), queue_tx.clone(), clock.register()).run());
    drop(queue_tx);

    let (reporter, reporter_handle) =
        ReporterActor::new(ReporterConfig::from(&config), Box::new(sink.clone()), queue_rx);
    tokio::spawn(reporter.run());
    tokio::spawn(clock.run());

    wait_for(|| !sink.sent_events().is_empty()).await;

    let events = sink.sent_events();
    assert_eq!(events[0].service, "disk /boot");
    assert_eq!(events[0].state, Severity::Warning);

    clock_handle.shutdown().await;
    reporter_handle.shutdown().await;
}

#[tokio::test]
async fn agent_delivers_real_host_readings() {
    let mut config = create_test_config("{}");
    config.checks = ["cpu", "memory", "load"]
        .iter()
        .map(|check| check.to_string())
        .collect();

    let sink = MockSink::default();
    let handle = Agent::new(config)
        .start_with_connector(Box::new(sink.clone()))
        .unwrap();

    // Interval is one second; allow a few rounds.
    tokio::time::timeout(Duration::from_secs(5), async {
        while sink.sent_events().len() < 3 {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    })
    .await
    .expect("agent should deliver readings");

    let events = sink.sent_events();
    assert!(events.iter().any(|event| event.service == "cpu"));
    assert!(events.iter().any(|event| event.service == "memory"));

    handle.shutdown().await;
}
