//! Headless tracking session
//!
//! Симулированный AR runtime шлёт события 1000 кадров, печатаем статистику reconcile.

use arpro_tracking::{
    create_headless_app, MarkerReconciler, MarkerTemplate, MarkerTrackingPlugin,
    SimulatedRuntimePlugin, TrackingConfig,
};

const SEED: u64 = 42;
const TICKS: usize = 1000;

fn main() {
    println!("Starting ARPRO headless tracking session (seed: {})", SEED);

    let config = TrackingConfig::new(vec![
        MarkerTemplate::new("PIIE_AR_MO004_LONJA", "prefabs/lonja.tscn"),
        MarkerTemplate::new("PIIE_AR_MO018_RELOJ", "prefabs/reloj.tscn"),
        MarkerTemplate::new("PIIE_AR_MO021_PLAZA", "prefabs/plaza.tscn"),
    ])
    .with_indicator("PIIE_AR_MO004_LONJA", 0)
    .with_indicator("PIIE_AR_MO018_RELOJ", 1);

    let mut app = create_headless_app(SEED);
    app.add_plugins(MarkerTrackingPlugin::new(config))
        .add_plugins(SimulatedRuntimePlugin::new([
            "PIIE_AR_MO004_LONJA",
            "PIIE_AR_MO018_RELOJ",
            "PIIE_AR_MO021_PLAZA",
            // В reference library, но без template
            "PIIE_AR_MO030_MURALLA",
        ]));

    for tick in 0..TICKS {
        app.update();

        if tick % 100 == 0 {
            let tracking = app.world().resource::<MarkerReconciler>();
            println!(
                "Tick {}: {} instances {:?}",
                tick,
                tracking.reconciler.len(),
                tracking.reconciler.registered_markers()
            );
        }
    }

    let stats = &app.world().resource::<MarkerReconciler>().stats;
    println!("Session complete: {:?}", stats);
}
