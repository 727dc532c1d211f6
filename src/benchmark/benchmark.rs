use std::time::Instant;

use crate::error::Result;
use crate::simulation::engine::SimulationWorld;
use crate::simulation::geometry::{Space, Topology};
use crate::simulation::params::Parameters;

/// Helper to build a world of `n` light bodies on a deterministic spiral,
/// spread wide enough that nothing merges during the benchmark
fn make_world(n: usize) -> Result<SimulationWorld> {
    let params = Parameters {
        g: 1.0e-4,
        max_mass: 1.0e12,
        space: Space::new(4000.0, 4000.0, Topology::Toroidal),
        seed: Some(42),
        ..Parameters::default()
    };
    let mut world = SimulationWorld::new(params)?;

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = 2000.0 + (i_f * 0.37).sin() * (40.0 + 9.0 * i_f);
        let y = 2000.0 + (i_f * 0.37).cos() * (40.0 + 9.0 * i_f);
        world.spawn_body(1.0, x, y, 0.0, 0.0)?;
    }
    Ok(world)
}

/// Time `step()` across population sizes.
/// Prints CSV so it can be pasted straight into a spreadsheet
pub fn bench_step() -> Result<()> {
    println!("N,step_ms");

    for n in [10, 20, 40, 80, 160, 320] {
        // Small n: average over many steps to smooth noise
        let steps = if n <= 80 { 200 } else { 20 };
        let mut world = make_world(n)?;

        // Warm-up
        world.step();

        let t0 = Instant::now();
        for _ in 0..steps {
            world.step();
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
    Ok(())
}
