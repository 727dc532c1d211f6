//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – physical constants and the RNG seed
//! - [`SpaceConfig`]      – extent, topology and resize behaviour
//! - [`ExplosionConfig`]  – fragmentation model
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every section has defaults, so a file that only lists `bodies` (or only
//! sets `running`) is a valid scenario.
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   G: 0.001                # gravitational constant
//!   density: 1.0            # mass -> radius conversion
//!   max_mass: 10000.0       # explosion threshold
//!   seed: 42                # omit for a random seed
//!
//! space:
//!   width: 800.0
//!   height: 600.0
//!   topology: toroidal      # or "bounded"
//!   on_resize: rescale      # or "reset"
//!
//! explosion:
//!   model: energy           # or "momentum"
//!   inherit_velocity: true
//!   converted_mass: 1.0
//!   min_fragments: 10
//!   max_fragments: 20
//!
//! running: true
//!
//! bodies:
//!   - x: [ 300.0, 300.0 ]
//!     v: [ 0.0, 0.3 ]
//!     m: 800.0
//! ```
//!
//! Radii are never configured: they follow from mass and density.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::simulation::geometry::{Space, Topology};
use crate::simulation::params::{ExplosionParams, FragmentSpeedModel, Parameters, ResizePolicy};

/// Global physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    #[serde(rename = "G")]
    pub g: f64,          // gravitational constant
    pub density: f64,    // mass -> radius conversion factor
    pub max_mass: f64,   // explosion threshold
    pub seed: Option<u64>, // deterministic seed to make runs reproducible
}

impl Default for ParametersConfig {
    fn default() -> Self {
        let p = Parameters::default();
        Self {
            g: p.g,
            density: p.density,
            max_mass: p.max_mass,
            seed: None,
        }
    }
}

/// Extent and topology of the plane
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SpaceConfig {
    pub width: f64,
    pub height: f64,
    pub topology: Topology,
    pub on_resize: ResizePolicy, // what a width/height change does to live bodies
}

impl Default for SpaceConfig {
    fn default() -> Self {
        let p = Parameters::default();
        Self {
            width: p.space.width,
            height: p.space.height,
            topology: p.space.topology,
            on_resize: p.on_resize,
        }
    }
}

/// Fragmentation model
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ExplosionConfig {
    pub model: FragmentSpeedModel,
    pub inherit_velocity: bool,
    pub converted_mass: f64,
    pub min_fragments: usize,
    pub max_fragments: usize,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        let e = ExplosionParams::default();
        Self {
            model: e.model,
            inherit_velocity: e.inherit_velocity,
            converted_mass: e.converted_mass,
            min_fragments: e.min_fragments,
            max_fragments: e.max_fragments,
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial position
    #[serde(default)]
    pub v: [f64; 2], // initial velocity, per tick
    pub m: f64,      // mass
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig,
    pub space: SpaceConfig,
    pub explosion: ExplosionConfig,
    pub running: bool, // start ticking immediately
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    /// Runtime parameters described by this config (not yet validated).
    pub fn to_parameters(&self) -> Parameters {
        let p = &self.parameters;
        let s = &self.space;
        let e = &self.explosion;
        Parameters {
            g: p.g,
            density: p.density,
            max_mass: p.max_mass,
            space: Space::new(s.width, s.height, s.topology),
            on_resize: s.on_resize,
            explosion: ExplosionParams {
                model: e.model,
                inherit_velocity: e.inherit_velocity,
                converted_mass: e.converted_mass,
                min_fragments: e.min_fragments,
                max_fragments: e.max_fragments,
            },
            seed: p.seed,
        }
    }
}

/// Parse a scenario from a YAML string.
pub fn parse_scenario(yaml: &str) -> Result<ScenarioConfig> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Load a scenario file.
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_yaml::from_reader(reader)?)
}
