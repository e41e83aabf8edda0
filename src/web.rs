//! Browser surface
//!
//! The page owns the canvas, the asset loading and the input listeners. It
//! forwards key presses and `requestAnimationFrame` timestamps here and draws
//! from `snapshot_json()`.

use wasm_bindgen::prelude::*;

use crate::best_score::{BestScoreStore, LocalStorageStore, persist_events};
use crate::sim::Simulation;
use crate::sim::autopilot::should_jump;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Stone Runner starting...");
}

/// One game instance bound to LocalStorage
#[wasm_bindgen]
pub struct WebRunner {
    sim: Simulation,
    store: LocalStorageStore,
    demo: bool,
}

#[wasm_bindgen]
impl WebRunner {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebRunner {
        let store = LocalStorageStore;
        let seed = js_sys::Date::now() as u64;
        let sim = Simulation::new(Tuning::load(), seed, store.load());
        log::info!("Game initialized with seed: {}", seed);
        WebRunner {
            sim,
            store,
            demo: false,
        }
    }

    pub fn start(&mut self) {
        self.sim.on_start();
    }

    pub fn jump(&mut self) {
        self.sim.on_jump();
    }

    pub fn restart(&mut self) {
        self.sim.on_restart();
    }

    pub fn primary_action(&mut self) {
        self.sim.on_primary_action();
    }

    pub fn reset(&mut self) {
        self.sim.on_reset();
    }

    /// Let the autopilot play (attract screen)
    pub fn set_demo(&mut self, demo: bool) {
        self.demo = demo;
        log::info!("Demo mode: {}", demo);
    }

    /// Advance one frame from a `requestAnimationFrame` timestamp
    pub fn advance_frame(&mut self, timestamp_ms: f64) {
        if self.demo && should_jump(self.sim.state(), self.sim.tuning()) {
            self.sim.on_jump();
        }
        self.sim.advance_frame(timestamp_ms);
        let events = self.sim.drain_events();
        persist_events(&mut self.store, &events);
    }

    pub fn snapshot_json(&self) -> String {
        self.sim.snapshot().to_json()
    }

    pub fn score(&self) -> f64 {
        self.sim.score() as f64
    }

    pub fn best_score(&self) -> f64 {
        self.sim.best_score() as f64
    }
}

impl Default for WebRunner {
    fn default() -> Self {
        Self::new()
    }
}
