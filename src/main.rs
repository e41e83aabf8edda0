//! Stone Runner entry point
//!
//! The browser build is driven from `web::WebRunner`. The native binary runs
//! one headless autopilot run and keeps the best score in a JSON file.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use stone_runner::best_score::{BestScoreStore, FileStore, persist_events};
    use stone_runner::consts::SIM_DT;
    use stone_runner::sim::autopilot::should_jump;
    use stone_runner::{RunPhase, Simulation, Tuning};

    /// Longest simulated run before the demo stops on its own (seconds)
    const DEMO_TIME_LIMIT: f32 = 180.0;
    const BEST_SCORE_FILE: &str = "stone_runner_best.json";

    env_logger::init();
    log::info!("Stone Runner (native) starting...");

    let tuning = Tuning::load();
    let mut store = FileStore::new(
        std::env::var("STONE_RUNNER_BEST").unwrap_or_else(|_| BEST_SCORE_FILE.to_string()),
    );
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("Game initialized with seed: {}", seed);

    let mut sim = Simulation::new(tuning, seed, store.load());
    sim.on_start();

    let mut frame_ms = 0.0f64;
    sim.advance_frame(frame_ms);
    while sim.phase() == RunPhase::Running && sim.state().elapsed < DEMO_TIME_LIMIT {
        if should_jump(sim.state(), sim.tuning()) {
            sim.on_jump();
        }
        frame_ms += f64::from(SIM_DT) * 1000.0;
        sim.advance_frame(frame_ms);
        let events = sim.drain_events();
        persist_events(&mut store, &events);
    }

    let timed_out = sim.phase() == RunPhase::Running;
    if timed_out {
        sim.end_run();
        let events = sim.drain_events();
        persist_events(&mut store, &events);
    }

    let state = sim.state();
    println!(
        "{} after {:.1}s: score {} (best {})",
        if timed_out {
            "Time limit reached"
        } else {
            "Hit by a stone"
        },
        state.elapsed,
        state.score,
        state.best_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
