//! # Crossing Demo
//!
//! One intersection, N vehicles, all arriving at a red light.
//!
//! ## Usage
//!
//! ```bash
//! crossing --vehicles 6 --dwell-min 1000 --dwell-max 2000 --seed 42
//! ```

use junction_sim::{TogglerConfig, TrafficLight, Vehicle};
use std::sync::Arc;
use std::time::Duration;

fn main() {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         JUNCTION CROSSING DEMO                                   ║");
    println!("║         ONE LIGHT, MANY WAITERS                                  ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    // Parse command line arguments (simple parsing, no external deps)
    let args: Vec<String> = std::env::args().collect();
    let mut vehicles = 6u32;
    let mut config = TogglerConfig {
        dwell_min_ms: 1_000,
        dwell_max_ms: 2_000,
        ..TogglerConfig::default()
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--vehicles" | "-n" => {
                if i + 1 < args.len() {
                    vehicles = args[i + 1].parse().unwrap_or(6);
                    i += 1;
                }
            }
            "--dwell-min" => {
                if i + 1 < args.len() {
                    config.dwell_min_ms = args[i + 1].parse().unwrap_or(1_000);
                    i += 1;
                }
            }
            "--dwell-max" => {
                if i + 1 < args.len() {
                    config.dwell_max_ms = args[i + 1].parse().unwrap_or(2_000);
                    i += 1;
                }
            }
            "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    if let Err(e) = config.validate() {
        eprintln!("bad config: {e}");
        std::process::exit(1);
    }

    println!(
        "light: dwell {}..={}ms, poll {}ms | vehicles: {}",
        config.dwell_min_ms, config.dwell_max_ms, config.poll_interval_ms, vehicles
    );
    println!();

    let mut light = TrafficLight::with_config(config);
    if let Err(e) = light.start() {
        eprintln!("failed to start light: {e}");
        std::process::exit(1);
    }
    let light = Arc::new(light);

    let (tx, rx) = crossbeam_channel::unbounded();
    let drivers: Vec<_> = (0..vehicles)
        .map(|id| Vehicle::new(id).drive(Arc::clone(&light), tx.clone()))
        .collect();
    drop(tx);

    for _ in 0..vehicles {
        match rx.recv_timeout(Duration::from_secs(60)) {
            Ok(crossing) => {
                let held = if crossing.waited { "waited" } else { "rolled through" };
                println!(
                    "vehicle {:>3} crossed after {:>6}ms ({held})",
                    crossing.vehicle_id,
                    crossing.wait_time.as_millis()
                );
            }
            Err(_) => {
                eprintln!("gave up waiting for crossings");
                std::process::exit(1);
            }
        }
    }

    for d in drivers {
        let _ = d.join();
    }

    let stats = light.stats();
    println!();
    println!("=== Light Stats ===");
    println!("toggles: {}", stats.total_toggles);
    println!(
        "dwell min/max/last: {}ms / {}ms / {}ms",
        stats.min_dwell_ms, stats.max_dwell_ms, stats.last_dwell_ms
    );
}
