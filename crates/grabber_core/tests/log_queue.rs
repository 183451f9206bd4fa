use std::thread;
use std::time::Duration;

use grabber_core::{log_queue, LogLevel, LogMessage, DEFAULT_POLL_INTERVAL};
use pretty_assertions::assert_eq;

#[test]
fn drain_is_non_blocking_when_empty() {
    let (_tx, relay) = log_queue();
    assert!(relay.drain().is_empty());
    assert_eq!(relay.poll_interval(), DEFAULT_POLL_INTERVAL);
    assert_eq!(DEFAULT_POLL_INTERVAL, Duration::from_millis(100));
}

#[test]
fn messages_survive_any_number_of_ticks_in_order() {
    let (tx, relay) = log_queue();
    let mut seen = Vec::new();

    for i in 0..250 {
        tx.send(format!("line {i}"));
        // Drain at uneven points, as a timer would.
        if i % 7 == 0 || i % 11 == 0 {
            seen.extend(relay.drain());
        }
    }
    seen.extend(relay.drain());

    let expected: Vec<LogMessage> = (0..250).map(|i| LogMessage::info(format!("line {i}"))).collect();
    assert_eq!(seen, expected);
    assert!(relay.drain().is_empty());
}

#[test]
fn concurrent_producers_keep_per_producer_order() {
    let (tx, relay) = log_queue();
    let producers: Vec<_> = (0..4)
        .map(|p| {
            let tx = tx.clone();
            thread::spawn(move || {
                for i in 0..100 {
                    tx.send(format!("{p}:{i}"));
                }
            })
        })
        .collect();

    let mut seen = Vec::new();
    for handle in producers {
        seen.extend(relay.drain());
        handle.join().unwrap();
    }
    seen.extend(relay.drain());

    assert_eq!(seen.len(), 400);
    for p in 0..4 {
        let prefix = format!("{p}:");
        let order: Vec<u32> = seen
            .iter()
            .filter_map(|m| m.as_str().strip_prefix(prefix.as_str()))
            .map(|n| n.parse().unwrap())
            .collect();
        assert_eq!(order, (0..100).collect::<Vec<_>>());
    }
}

#[test]
fn send_after_relay_dropped_is_ignored() {
    let (tx, relay) = log_queue();
    drop(relay);
    tx.send(LogMessage::finished());
}

#[test]
fn custom_poll_interval_is_kept() {
    let (_tx, relay) = log_queue();
    let relay = relay.with_poll_interval(Duration::from_millis(250));
    assert_eq!(relay.poll_interval(), Duration::from_millis(250));
}

#[test]
fn prefixes_classify_messages() {
    let cases = [
        (LogMessage::info("plain"), LogLevel::Info, false),
        (LogMessage::warning("w"), LogLevel::Warning, false),
        (LogMessage::error("e"), LogLevel::Error, false),
        (LogMessage::started(), LogLevel::Started, false),
        (LogMessage::finished(), LogLevel::Finished, true),
        (LogMessage::failed("boom"), LogLevel::Failed, true),
        (LogMessage::missing_input(), LogLevel::Failed, true),
    ];
    for (message, level, terminal) in cases {
        assert_eq!(message.level(), level, "{message}");
        assert_eq!(message.is_terminal(), terminal, "{message}");
    }
    assert_eq!(LogMessage::missing_input().as_str(), "✖ Missing URL or folder");
    assert_eq!(LogMessage::failed("boom").as_str(), "✖ boom");
    assert_eq!(LogMessage::warning("w").as_str(), "[WARN] w");
}
