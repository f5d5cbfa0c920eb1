//! Logger wiring test
//!
//! `TrackingConfig::debug` переключает глобальный level: Debug ↔ Info.
//! Один #[test]: logger глобальный, параллельные тесты в этом binary перетирали бы level.

use arpro_tracking::logger::{self, LogLevel, LogPrinter};
use arpro_tracking::*;
use bevy::prelude::*;
use std::sync::{Arc, Mutex};

struct RecordingLogger {
    lines: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl LogPrinter for RecordingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, message.to_string()));
        }
    }
}

fn tracking_app(debug: bool) -> App {
    let config = TrackingConfig::new(vec![MarkerTemplate::new("A", "prefabs/a.tscn")]).with_debug(debug);
    let mut app = create_headless_app(7);
    app.add_plugins(MarkerTrackingPlugin::new(config));
    app.update();
    app
}

fn add_marker(app: &mut App) {
    let anchor = app.world_mut().spawn(Transform::default()).id();
    app.world_mut().send_event(TrackedImagesChanged(
        MarkerBatch::new().with_added(TrackedMarker::anchored("A", TrackingState::Tracking, anchor)),
    ));
    app.update();
}

fn take_lines(lines: &Arc<Mutex<Vec<(LogLevel, String)>>>) -> Vec<(LogLevel, String)> {
    std::mem::take(&mut *lines.lock().unwrap())
}

#[test]
fn test_debug_flag_controls_verbosity() {
    let lines = Arc::new(Mutex::new(Vec::new()));
    // До create_headless_app: init_logger не перетирает уже установленный sink
    logger::set_logger(Box::new(RecordingLogger { lines: lines.clone() }));

    // debug = true → Debug сообщения reconciler'а проходят
    let mut app = tracking_app(true);
    assert_eq!(logger::log_level(), LogLevel::Debug);
    add_marker(&mut app);

    let verbose = take_lines(&lines);
    assert!(
        verbose
            .iter()
            .any(|(level, line)| *level == LogLevel::Debug && line.contains("Instantiated 'prefabs/a.tscn'")),
        "debug lines missing: {:?}",
        verbose
    );

    // debug = false → Info, Debug отбрасываются
    let mut app = tracking_app(false);
    assert_eq!(logger::log_level(), LogLevel::Info);
    add_marker(&mut app);
    logger::log_info("info still reaches the sink");

    let quiet = take_lines(&lines);
    assert!(quiet.iter().all(|(level, _)| *level >= LogLevel::Info), "{:?}", quiet);
    assert!(quiet.iter().any(|(_, line)| line.ends_with("info still reaches the sink")));
    assert_eq!(app.world().resource::<MarkerReconciler>().stats.created, 1);
}
