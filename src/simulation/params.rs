//! Physical parameters for the simulation
//!
//! `Parameters` holds the world-wide settings:
//! - gravitational constant `g`, `density` and `max_mass` (explosion threshold),
//! - the `space` extent and topology, and what a resize does to existing bodies,
//! - the explosion model and the random seed

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};
use super::geometry::{Space, Topology};

/// Slider presets for G.
pub const G_PRESETS: [f64; 4] = [0.001, 0.01, 0.1, 1.0];
/// Slider presets for the explosion threshold.
pub const MAX_MASS_PRESETS: [f64; 4] = [5000.0, 10000.0, 20000.0, 40000.0];
/// Slider presets for density.
pub const DENSITY_PRESETS: [f64; 5] = [0.01, 0.1, 1.0, 10.0, 100.0];

/// What happens to live bodies when `width` or `height` changes.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizePolicy {
    /// Positions are scaled by new/old extent per axis.
    #[default]
    #[serde(rename = "rescale")]
    Rescale,

    /// All bodies are removed and the world is paused.
    #[serde(rename = "reset")]
    Reset,
}

/// How fragment speed is derived when a body explodes.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FragmentSpeedModel {
    /// Fixed explosion energy `converted_mass · max_mass`, split equally:
    /// speed_k = sqrt(2·E/N / m_k)
    #[default]
    #[serde(rename = "energy")]
    Energy,

    /// Parent momentum magnitude split equally: speed_k = |p|/N / m_k
    #[serde(rename = "momentum")]
    Momentum,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExplosionParams {
    pub model: FragmentSpeedModel,
    pub inherit_velocity: bool, // add the parent's velocity to every fragment
    pub converted_mass: f64, // mass turned into explosion energy, not handed to fragments
    pub min_fragments: usize,
    pub max_fragments: usize,
}

impl Default for ExplosionParams {
    fn default() -> Self {
        Self {
            model: FragmentSpeedModel::Energy,
            inherit_velocity: true,
            converted_mass: 1.0,
            min_fragments: 10,
            max_fragments: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub density: f64, // mass -> radius conversion
    pub max_mass: f64, // explosion threshold
    pub space: Space,
    pub on_resize: ResizePolicy,
    pub explosion: ExplosionParams,
    pub seed: Option<u64>, // None -> seeded from entropy
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g: 0.001,
            density: 1.0,
            max_mass: 10000.0,
            space: Space::new(800.0, 600.0, Topology::Toroidal),
            on_resize: ResizePolicy::Rescale,
            explosion: ExplosionParams::default(),
            seed: None,
        }
    }
}

impl Parameters {
    /// Check every field against the ranges the engine relies on.
    pub fn validate(&self) -> Result<()> {
        check_g(self.g)?;
        check_density(self.density)?;
        check_extent("width", self.space.width)?;
        check_extent("height", self.space.height)?;
        self.check_max_mass(self.max_mass)?;

        let e = &self.explosion;
        if !e.converted_mass.is_finite() || e.converted_mass < 0.0 {
            return Err(Error::InvalidParam(format!(
                "converted_mass must be finite and >= 0, got {}",
                e.converted_mass
            )));
        }
        if e.min_fragments < 2 || e.min_fragments > e.max_fragments {
            return Err(Error::InvalidParam(format!(
                "fragment range must satisfy 2 <= min <= max, got {}..={}",
                e.min_fragments, e.max_fragments
            )));
        }
        Ok(())
    }

    // max_mass has to leave something to hand out to fragments
    fn check_max_mass(&self, value: f64) -> Result<()> {
        if !value.is_finite() || value <= self.explosion.converted_mass {
            return Err(Error::InvalidParam(format!(
                "maxMass must be finite and > converted_mass ({}), got {value}",
                self.explosion.converted_mass
            )));
        }
        Ok(())
    }

    /// Assign a single scalar after validating it. Side effects on live
    /// bodies are the world's business, see `SimulationWorld::set_parameter`.
    pub(crate) fn assign(&mut self, param: Parameter, value: f64) -> Result<()> {
        match param {
            Parameter::G => {
                check_g(value)?;
                self.g = value;
            }
            Parameter::Density => {
                check_density(value)?;
                self.density = value;
            }
            Parameter::MaxMass => {
                self.check_max_mass(value)?;
                self.max_mass = value;
            }
            Parameter::Width => {
                check_extent("width", value)?;
                self.space.width = value;
            }
            Parameter::Height => {
                check_extent("height", value)?;
                self.space.height = value;
            }
        }
        Ok(())
    }

    pub fn get(&self, param: Parameter) -> f64 {
        match param {
            Parameter::G => self.g,
            Parameter::Density => self.density,
            Parameter::MaxMass => self.max_mass,
            Parameter::Width => self.space.width,
            Parameter::Height => self.space.height,
        }
    }
}

fn check_g(value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::InvalidParam(format!("G must be finite, got {value}")));
    }
    Ok(())
}

fn check_density(value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidParam(format!("density must be finite and > 0, got {value}")));
    }
    Ok(())
}

fn check_extent(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidParam(format!("{name} must be finite and > 0, got {value}")));
    }
    Ok(())
}

/// The scalars collaborators may change at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    G,
    Density,
    MaxMass,
    Width,
    Height,
}

impl Parameter {
    pub fn name(&self) -> &'static str {
        match self {
            Parameter::G => "G",
            Parameter::Density => "density",
            Parameter::MaxMass => "maxMass",
            Parameter::Width => "width",
            Parameter::Height => "height",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "G" | "g" => Ok(Parameter::G),
            "density" => Ok(Parameter::Density),
            "maxMass" | "max_mass" => Ok(Parameter::MaxMass),
            "width" => Ok(Parameter::Width),
            "height" => Ok(Parameter::Height),
            other => Err(Error::UnknownParameter(other.to_string())),
        }
    }
}

/// Next value in a preset list after `current`, wrapping to the first.
pub fn next_preset(presets: &[f64], current: f64) -> f64 {
    presets
        .iter()
        .position(|p| (p - current).abs() <= 1e-9 * p.abs().max(1.0))
        .map(|i| presets[(i + 1) % presets.len()])
        .unwrap_or(presets[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Parameters::default().validate().is_ok());
    }

    #[test]
    fn parameter_names_round_trip() {
        for p in [Parameter::G, Parameter::Density, Parameter::MaxMass, Parameter::Width, Parameter::Height] {
            assert_eq!(p.name().parse::<Parameter>().ok(), Some(p));
        }
        assert!(matches!("viscosity".parse::<Parameter>(), Err(Error::UnknownParameter(_))));
    }

    #[test]
    fn assign_rejects_bad_values_without_mutating() {
        let mut p = Parameters::default();
        assert!(p.assign(Parameter::Density, 0.0).is_err());
        assert!(p.assign(Parameter::Width, -1.0).is_err());
        assert!(p.assign(Parameter::MaxMass, 0.5).is_err());
        assert!(p.assign(Parameter::G, f64::NAN).is_err());
        assert_eq!(p, Parameters::default());
    }

    #[test]
    fn presets_cycle() {
        assert_eq!(next_preset(&G_PRESETS, 0.001), 0.01);
        assert_eq!(next_preset(&G_PRESETS, 1.0), 0.001);
        assert_eq!(next_preset(&DENSITY_PRESETS, 3.0), 0.01);
    }

    #[test]
    fn fragment_range_is_checked() {
        let mut p = Parameters::default();
        p.explosion.min_fragments = 12;
        p.explosion.max_fragments = 11;
        assert!(p.validate().is_err());
    }
}
