//! Flying Heads entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use flying_heads::Settings;
    use flying_heads::particles::spawn_particles;
    use flying_heads::platform::web::{
        DomTarget, WindowViewport, spawn_particle_elements, start_countdown,
    };
    use flying_heads::platform::{JsClock, seed_from_clock};
    use flying_heads::render::ViewportProvider;
    use flying_heads::scheduler::{FrameControl, HeadsDriver};
    use flying_heads::sim::HeadsState;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    type Driver = HeadsDriver<DomTarget, WindowViewport>;

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flying Heads starting...");

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| seed_from_clock(&JsClock));
        log::info!("Seed: {}", seed);

        start_countdown(settings.countdown_target_ms);

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document; nothing to draw into");
            return;
        };

        let mut rng = Pcg32::seed_from_u64(seed);
        let particles = spawn_particles(settings.particle_count, &mut rng);
        spawn_particle_elements(&document, &particles);

        let viewport = WindowViewport::new();
        let state = HeadsState::spawn(
            settings.tuning,
            &settings.head_names,
            viewport.viewport(),
            &mut rng,
        );
        let target = DomTarget::bind(
            document,
            state.heads.iter().map(|h| (h.id, h.name.as_str())),
        );
        let driver = Rc::new(RefCell::new(HeadsDriver::new(state, target, viewport)));

        request_animation_frame(driver);
        log::info!("Flying Heads running!");
    }

    fn request_animation_frame(driver: Rc<RefCell<Driver>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(driver, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(driver: Rc<RefCell<Driver>>, time: f64) {
        let control = driver.borrow_mut().on_frame(time);
        match control {
            FrameControl::Continue => request_animation_frame(driver),
            FrameControl::Stop => log::info!("Heads resolved; stopping frame loop"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flying_heads::consts::FIXED_DT;
    use flying_heads::platform::{Clock, SystemClock, seed_from_clock};
    use flying_heads::render::LogTarget;
    use flying_heads::scheduler::{HeadsDriver, run_fixed};
    use flying_heads::sim::{HeadsState, Viewport};
    use flying_heads::{Settings, countdown};

    env_logger::init();
    log::info!("Flying Heads (native) starting...");
    log::info!("Browser page requires a wasm build - run with `trunk serve` for web version");

    let settings = Settings::load();
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .or(settings.seed)
        .unwrap_or_else(|| seed_from_clock(&SystemClock));

    match countdown::countdown_status(SystemClock.now_ms(), settings.countdown_target_ms) {
        countdown::CountdownStatus::Remaining(t) => log::info!("Countdown: {}", t),
        countdown::CountdownStatus::Completed => log::info!("Countdown complete"),
    }

    // Headless bout: fixed 60 Hz step, capped at ten simulated minutes
    let viewport = Viewport::new(1280.0, 720.0);
    let state = HeadsState::new(seed, settings.tuning, &settings.head_names, viewport);
    let mut driver = HeadsDriver::new(state, LogTarget::default(), viewport);
    let summary = run_fixed(&mut driver, FIXED_DT, 60 * 60 * 10);

    println!("\nSeed {}: {} frames", seed, summary.frames);
    match &driver.target.outcome {
        Some(flying_heads::sim::Outcome::Winner { name, .. }) => println!("Winner: {}", name),
        Some(flying_heads::sim::Outcome::Draw) => println!("Draw"),
        None => println!("No winner within the frame limit"),
    }
}
