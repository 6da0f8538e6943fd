use super::*;
use std::sync::Mutex;
use tokio::time::Instant;

// =========================================================================
// RecordingSink
// =========================================================================

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<(Duration, Option<String>, String)>>,
    started: Mutex<Option<Instant>>,
}

impl RecordingSink {
    fn arm(&self) {
        *self.started.lock().unwrap() = Some(Instant::now());
    }

    fn events(&self) -> Vec<(Duration, Option<String>, String)> {
        self.events.lock().unwrap().clone()
    }
}

impl StatusSink for RecordingSink {
    fn status(&self, title: Option<&str>, subtitle: &str) {
        let at = self
            .started
            .lock()
            .unwrap()
            .map_or(Duration::ZERO, |start| start.elapsed());
        self.events
            .lock()
            .unwrap()
            .push((at, title.map(str::to_string), subtitle.to_string()));
    }
}

// =========================================================================
// run
// =========================================================================

#[tokio::test(start_paused = true)]
async fn resolves_only_after_total() {
    let sink = RecordingSink::default();
    let start = Instant::now();
    run(Duration::from_secs(2), &[], &sink).await;
    assert!(start.elapsed() >= Duration::from_secs(2));
    assert!(sink.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn zero_duration_resolves_immediately() {
    let sink = RecordingSink::default();
    let start = Instant::now();
    run(Duration::ZERO, &[], &sink).await;
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn updates_fire_at_their_offsets() {
    let sink = RecordingSink::default();
    sink.arm();
    let updates = vec![
        StatusUpdate {
            at: Duration::from_millis(1200),
            title: None,
            subtitle: "Aplicando firma".into(),
        },
        StatusUpdate {
            at: Duration::from_millis(2400),
            title: Some("Casi listo...".into()),
            subtitle: "Registrando documento".into(),
        },
    ];
    let start = Instant::now();
    run(Duration::from_millis(3600), &updates, &sink).await;

    assert_eq!(start.elapsed(), Duration::from_millis(3600));
    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].0, Duration::from_millis(1200));
    assert_eq!(events[0].1, None);
    assert_eq!(events[0].2, "Aplicando firma");
    assert_eq!(events[1].0, Duration::from_millis(2400));
    assert_eq!(events[1].1.as_deref(), Some("Casi listo..."));
}

#[tokio::test(start_paused = true)]
async fn update_past_total_is_clamped() {
    let sink = RecordingSink::default();
    sink.arm();
    let updates = vec![StatusUpdate {
        at: Duration::from_secs(10),
        title: None,
        subtitle: "tarde".into(),
    }];
    let start = Instant::now();
    run(Duration::from_secs(2), &updates, &sink).await;

    assert_eq!(start.elapsed(), Duration::from_secs(2));
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, Duration::from_secs(2));
}
