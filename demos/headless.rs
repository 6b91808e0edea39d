//! Runs the engine without a renderer and logs step timings.
//!
//! ```text
//! NBODY_COUNT=20000 NBODY_MODE=spiral RUST_LOG=debug cargo run --release --example headless
//! ```
//!
//! Recognized variables: `NBODY_COUNT`, `NBODY_STEPS`, `NBODY_MODE` (`cluster` or
//! `spiral`), `NBODY_DT` and `NBODY_THREADS`.
use std::env;
use std::error::Error;
use std::str::FromStr;
use std::time::Duration;

use log::{info, warn};
use rs_nbody::simulation::Simulation;
use rs_nbody::utils::{InitMode, SimulationConfig};

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring unparsable {}={:?}", name, raw);
            default
        }),
        Err(_) => default,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let bodies: usize = env_or("NBODY_COUNT", 4096);
    let steps: usize = env_or("NBODY_STEPS", 100);
    let dt: f32 = env_or("NBODY_DT", 0.0001);
    let mode = match env_or("NBODY_MODE", String::from("cluster")).as_str() {
        "spiral" => InitMode::Spiral,
        _ => InitMode::Cluster,
    };

    let mut config = SimulationConfig::new(bodies, Some(dt), Some(mode), None);
    if let Ok(threads) = env::var("NBODY_THREADS") {
        config = config.with_workers(threads.parse()?);
    }

    let mut sim = Simulation::new(config)?;
    let before = sim.diagnostics();

    let mut slowest = Duration::ZERO;
    let mut total = Duration::ZERO;
    for _ in 0..steps {
        let elapsed = sim.step();
        slowest = slowest.max(elapsed);
        total += elapsed;
    }

    let after = sim.diagnostics();
    let mean = total.checked_div(steps as u32).unwrap_or_default();
    info!(
        "{} steps of {} bodies: mean {:?}, slowest {:?}",
        steps,
        sim.body_count(),
        mean,
        slowest
    );
    info!(
        "energy {:.6e} -> {:.6e}, momentum ({:.3e}, {:.3e}) -> ({:.3e}, {:.3e})",
        before.total_energy(),
        after.total_energy(),
        before.momentum.0,
        before.momentum.1,
        after.momentum.0,
        after.momentum.1
    );
    Ok(())
}
