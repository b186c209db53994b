//! Full simulation run with the reference bandit agent.

use hochlern_core::SimConfig;
use hochlern_harness::{RunReport, Simulation};
use hochlern_markov::PayoffBandit;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = SimConfig::default();
    let sim = Simulation::new(cfg)?;
    let mut rng = StdRng::seed_from_u64(42);

    let result = sim.run(
        |cfg| PayoffBandit::from_config(cfg, Some(42)),
        &mut rng,
        |phase| eprintln!("phase: {phase:?}"),
    )?;

    let report = RunReport::new(result);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
