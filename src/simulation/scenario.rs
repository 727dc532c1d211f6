//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a `Scenario`: a
//! populated `SimulationWorld`.
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by the
//! stepping, input and drawing systems

use bevy::prelude::Resource;
use tracing::{info, warn};

use crate::configuration::config::ScenarioConfig;
use crate::error::Result;
use crate::simulation::engine::SimulationWorld;

/// Bevy resource representing a running 2D scenario
///
/// The world inside is the single owner of all bodies; Bevy systems reach it
/// through `ResMut<Scenario>`, which already serializes access between ticks
/// and input handling
#[derive(Resource)]
pub struct Scenario {
    pub world: SimulationWorld,
}

impl Scenario {
    /// Validate the parameters and spawn every configured body. Bodies the
    /// engine rejects are skipped with a warning, like any other bad spawn.
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self> {
        let params = cfg.to_parameters();
        let mut world = SimulationWorld::new(params)?;

        for (i, bc) in cfg.bodies.iter().enumerate() {
            if let Err(e) = world.spawn_body(bc.m, bc.x[0], bc.x[1], bc.v[0], bc.v[1]) {
                warn!("scenario body {i} skipped: {e}");
            }
        }
        if cfg.running {
            world.play();
        }

        info!(
            bodies = world.body_count(),
            total_mass = world.total_mass(),
            "scenario built"
        );
        Ok(Self { world })
    }
}
