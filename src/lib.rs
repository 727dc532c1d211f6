pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Body, BodyId, BodySnapshot, NVec2};
pub use simulation::geometry::{calculate_radius, wrap_coord, wrapped_delta, Space, Topology};
pub use simulation::params::{ExplosionParams, FragmentSpeedModel, Parameter, Parameters, ResizePolicy};
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity};
pub use simulation::integrator::{apply_gravity, euler_integrator, integrate_positions};
pub use simulation::merge::{merge_pair, resolve_merges};
pub use simulation::explosion::{fragment_body, sector_partition, FragmentSpec};
pub use simulation::engine::{SimulationWorld, StepReport};
pub use simulation::scenario::Scenario;

pub use configuration::config::{load_scenario, parse_scenario, BodyConfig, ExplosionConfig, ParametersConfig, ScenarioConfig, SpaceConfig};

pub use visualization::gravsim_vis2d::run_2d;

pub use benchmark::benchmark::bench_step;

pub use error::{Error, Result};
