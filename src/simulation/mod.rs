pub mod states;
pub mod geometry;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod merge;
pub mod explosion;
pub mod scenario;
