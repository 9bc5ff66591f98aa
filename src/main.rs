//! Headless demo runner
//!
//! Drives the sim with the built-in autopilot at a fixed 60 Hz and logs the
//! event stream. Useful for soak-testing rule configs without a real host.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    use roboman_core::RulesConfig;
    use roboman_core::consts::FRAME_DT_MS;
    use roboman_core::host;
    use roboman_core::sim::{Phase, SimEvent, SimState, TickInput};

    env_logger::init();

    let mut rules: Option<RulesConfig> = None;
    let mut seed: Option<u64> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let Some(path) = args.next() else {
                    eprintln!("--config needs a path");
                    std::process::exit(2);
                };
                match RulesConfig::load(Path::new(&path)) {
                    Ok(loaded) => rules = Some(loaded),
                    Err(err) => {
                        eprintln!("failed to load {}: {}", path, err);
                        std::process::exit(2);
                    }
                }
            }
            "--seed" => {
                let Some(value) = args.next().and_then(|s| s.parse().ok()) else {
                    eprintln!("--seed needs an integer");
                    std::process::exit(2);
                };
                seed = Some(value);
            }
            other => {
                eprintln!("unknown argument: {}", other);
                eprintln!("usage: roboman-demo [--config rules.json] [--seed N]");
                std::process::exit(2);
            }
        }
    }

    let rules = rules.unwrap_or_else(|| RulesConfig::load_or_default(Path::new("roboman.json")));
    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(1)
    });

    log::info!("demo starting, seed {}", seed);
    let mut state = SimState::new(seed, rules);
    let input = TickInput {
        autopilot: true,
        ..TickInput::default()
    };

    let mut rounds_finished = 0u32;
    let mut ticks = 0u64;
    while rounds_finished < 3 && ticks < 36_000 {
        let was_terminal = matches!(state.phase, Phase::RoundWon | Phase::RoundLost);
        host::step(&mut state, &input, FRAME_DT_MS);
        ticks += 1;

        for event in state.drain_events() {
            match event {
                SimEvent::CountdownTick { seconds_left } => {
                    log::debug!("countdown {}", seconds_left);
                }
                SimEvent::AdversaryHit { hp } => log::debug!("adversary hit, {} hp left", hp),
                other => log::info!("{:?}", other),
            }
        }

        let is_terminal = matches!(state.phase, Phase::RoundWon | Phase::RoundLost);
        if is_terminal && !was_terminal {
            rounds_finished += 1;
        }
    }

    println!(
        "{:.1}s simulated, {} rounds finished, {} won",
        state.clock_ms / 1000.0,
        rounds_finished,
        state.rounds_won
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The sim core is host-driven on wasm; nothing to run standalone
}
