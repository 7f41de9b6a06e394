//! Evolve a population on a benchmark function with the DE adapter.
//!
//! ```text
//! RUST_LOG=debug run_popde --function rastrigin --dim 5 --generations 20 -o maxiter=200
//! ```

use anyhow::Context;
use clap::Parser;
use ndarray::Array1;
use popde::cli::Args;
use popde::{Algorithm, Benchmark, DeAdapter, Population, ProblemHandle, Translate};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_functions {
        for name in Benchmark::available() {
            println!("{}", name);
        }
        return Ok(());
    }

    let options = args.solver_options()?;
    let mut algo = DeAdapter::new(options).context("invalid solver options")?;

    let bench = Benchmark::new(&args.function, args.dim as usize)?;
    let problem = if args.translate.is_empty() {
        ProblemHandle::new(bench)?
    } else {
        ProblemHandle::new(Translate::new(bench, Array1::from(args.translate.clone()))?)?
    };
    println!("{}\n", problem);

    let mut pop = Population::new(problem, args.size, args.seed)?;
    println!("{}:\n{}\n", algo.name(), algo.extra_info());

    for generation in 1..=args.generations {
        pop = algo.evolve(pop).with_context(|| format!("generation {} failed", generation))?;
        let champion = pop.champion_f().map_or(f64::NAN, |f| f[0]);
        let (nit, message) =
            algo.result().map_or((0, "no solver run"), |r| (r.nit, r.message.as_str()));
        println!(
            "gen {:4}  champion f={:.6e}  solver iterations={:4}  fevals={:8}  {}",
            generation,
            champion,
            nit,
            pop.problem().fevals(),
            message
        );
    }

    if let (Some(x), Some(f)) = (pop.champion_x(), pop.champion_f()) {
        println!("\nChampion x = {}", x);
        println!("Champion f = {}", f);
    }
    Ok(())
}
