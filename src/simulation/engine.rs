//! The simulation world
//!
//! `SimulationWorld` exclusively owns the body list, the parameters, the
//! force set and the explosion RNG. Renderers and input handlers only read
//! it through the accessors below or change it through its operations; every
//! mutator takes `&mut self`, so a tick can never interleave with one.
//!
//! One tick: gravity kick → position drift → merges → explosions.

use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use super::explosion::fragment_body;
use super::forces::AccelSet;
use super::geometry::Topology;
use super::integrator::euler_integrator;
use super::merge::resolve_merges;
use super::params::{Parameter, Parameters, ResizePolicy};
use super::states::{Body, BodyId, BodySnapshot, NVec2};

/// What happened during one `step()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub merges: usize,
    pub explosions: usize,
    pub fragments: usize,
}

pub struct SimulationWorld {
    bodies: Vec<Body>,
    params: Parameters,
    forces: AccelSet,
    rng: StdRng,
    running: bool,
    tick: u64,
    next_id: BodyId,
}

impl SimulationWorld {
    /// Empty, paused world. Fails if `params` do not validate.
    pub fn new(params: Parameters) -> Result<Self> {
        params.validate()?;
        let rng = match params.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::seed_from_u64(rng().random()),
        };
        Ok(Self {
            bodies: Vec::new(),
            params,
            forces: AccelSet::gravity(),
            rng,
            running: false,
            tick: 0,
            next_id: 0,
        })
    }

    /// Replace the force set (gravity by default). Extra terms see the same
    /// state as gravity and are summed into the same kick.
    pub fn with_forces(mut self, forces: AccelSet) -> Self {
        self.forces = forces;
        self
    }

    // =====================================================================================
    // Stepping
    // =====================================================================================

    /// Run one full tick, whether or not the world is running.
    pub fn step(&mut self) -> StepReport {
        euler_integrator(&mut self.bodies, &self.forces, &self.params);
        let merges = self.resolve_merges();
        let (explosions, fragments) = self.resolve_explosions();
        self.tick += 1;

        let report = StepReport { merges, explosions, fragments };
        if merges > 0 || explosions > 0 {
            debug!(tick = self.tick, ?report, bodies = self.bodies.len(), "step");
        }
        report
    }

    /// Frame callback: steps only while running.
    pub fn tick(&mut self) -> Option<StepReport> {
        if self.running {
            Some(self.step())
        } else {
            None
        }
    }

    /// Manual single step; halts automatic ticking.
    pub fn step_once(&mut self) -> StepReport {
        self.running = false;
        self.step()
    }

    /// Merge touching bodies until none touch. Returns the merge count.
    pub fn resolve_merges(&mut self) -> usize {
        resolve_merges(
            &mut self.bodies,
            &self.params.space,
            self.params.density,
            &mut self.next_id,
        )
    }

    /// Explode every body above `max_mass`, in list order. Fragments are
    /// appended and not re-checked until the next tick, even if one of them
    /// is itself still above the threshold.
    /// Returns (bodies exploded, fragments created).
    pub fn resolve_explosions(&mut self) -> (usize, usize) {
        let max_mass = self.params.max_mass;
        if self.bodies.iter().all(|b| b.m <= max_mass) {
            return (0, 0);
        }

        let (doomed, kept): (Vec<Body>, Vec<Body>) =
            self.bodies.drain(..).partition(|b| b.m > max_mass);
        self.bodies = kept;

        let mut created = 0;
        for parent in &doomed {
            let frags = fragment_body(
                parent,
                max_mass,
                &self.params.explosion,
                &self.params.space,
                &mut self.rng,
            );
            info!(id = parent.id, m = parent.m, fragments = frags.len(), "body exploded");
            for f in frags {
                if f.m > max_mass {
                    debug!(m = f.m, "fragment above max mass; it explodes on a later tick");
                }
                match self.insert_body(f.m, f.x, f.v) {
                    Ok(_) => created += 1,
                    Err(e) => warn!("dropping fragment of {}: {e}", parent.id),
                }
            }
        }
        (doomed.len(), created)
    }

    // =====================================================================================
    // Spawning and queries
    // =====================================================================================

    /// Add a body at rest or in motion. Rejects non-positive mass and
    /// non-finite input; in a bounded space also rejects points outside
    /// `[0, width) × [0, height)`, on a torus the point is wrapped instead.
    pub fn spawn_body(&mut self, m: f64, x: f64, y: f64, vx: f64, vy: f64) -> Result<BodyId> {
        let pos = NVec2::new(x, y);
        if self.params.space.topology == Topology::Bounded
            && pos.iter().all(|c| c.is_finite())
            && !self.params.space.contains(&pos)
        {
            let err = Error::InvalidSpawn(format!(
                "({x}, {y}) is outside the {}x{} space",
                self.params.space.width, self.params.space.height
            ));
            warn!("{err}");
            return Err(err);
        }
        self.insert_body(m, pos, NVec2::new(vx, vy)).inspect_err(|e| warn!("{e}"))
    }

    /// Click spawn: random mass in [1, max_mass/10], zero velocity.
    pub fn spawn_random_at(&mut self, x: f64, y: f64) -> Result<BodyId> {
        let m = (self.rng.random::<f64>() * self.params.max_mass / 10.0).max(1.0);
        self.spawn_body(m, x, y, 0.0, 0.0)
    }

    /// Shared insertion path for user spawns and fragments.
    fn insert_body(&mut self, m: f64, x: NVec2, v: NVec2) -> Result<BodyId> {
        if !m.is_finite() || m <= 0.0 {
            return Err(Error::InvalidSpawn(format!("mass must be finite and > 0, got {m}")));
        }
        if !x.iter().chain(v.iter()).all(|c| c.is_finite()) {
            return Err(Error::InvalidSpawn("position and velocity must be finite".into()));
        }
        let id = self.next_id;
        self.next_id += 1;
        let x = self.params.space.wrap(x);
        self.bodies.push(Body::in_space(id, m, x, v, self.params.density, &self.params.space));
        Ok(id)
    }

    /// First body (list order) whose wrapped distance to (x, y) is within
    /// its radius.
    pub fn query_body_at(&self, x: f64, y: f64) -> Option<&Body> {
        let p = NVec2::new(x, y);
        let space = &self.params.space;
        self.bodies.iter().find(|b| space.distance(&p, &b.x) <= b.radius)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    // =====================================================================================
    // Parameters
    // =====================================================================================

    /// Change one scalar and apply its side effects:
    /// - density: every cached radius is recomputed
    /// - width/height: bodies are rescaled or cleared per `on_resize`;
    ///   radii follow `height / base_height`
    pub fn set_parameter(&mut self, param: Parameter, value: f64) -> Result<()> {
        let old = self.params.get(param);
        self.params.assign(param, value).inspect_err(|e| warn!("{e}"))?;
        info!(%param, old, new = value, "parameter changed");

        match param {
            Parameter::Density => {
                self.refresh_radii();
            }
            Parameter::Width | Parameter::Height => self.on_resize(param, old, value),
            Parameter::G | Parameter::MaxMass => {}
        }
        Ok(())
    }

    /// `set_parameter` keyed by name: G, density, maxMass, width, height.
    pub fn set_parameter_by_name(&mut self, name: &str, value: f64) -> Result<()> {
        let param = name.parse::<Parameter>().inspect_err(|e| warn!("{e}"))?;
        self.set_parameter(param, value)
    }

    fn on_resize(&mut self, axis: Parameter, old: f64, new: f64) {
        match self.params.on_resize {
            ResizePolicy::Reset => {
                info!(bodies = self.bodies.len(), "space resized; clearing world");
                self.clear();
            }
            ResizePolicy::Rescale => {
                let k = new / old;
                for b in self.bodies.iter_mut() {
                    match axis {
                        Parameter::Width => b.x.x *= k,
                        _ => b.x.y *= k,
                    }
                }
                let space = self.params.space;
                for b in self.bodies.iter_mut() {
                    b.x = space.wrap(b.x);
                }
                // radii track the height so touching pairs stay touching
                self.refresh_radii();
            }
        }
    }

    fn refresh_radii(&mut self) {
        let (density, space) = (self.params.density, self.params.space);
        for b in self.bodies.iter_mut() {
            b.refresh_radius(density, &space);
        }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    // =====================================================================================
    // Run control
    // =====================================================================================

    pub fn play(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Remove every body and pause.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // =====================================================================================
    // Read-only state
    // =====================================================================================

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Ordered render view of the bodies.
    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.bodies.iter().map(BodySnapshot::from).collect()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.m).sum()
    }

    pub fn total_momentum(&self) -> NVec2 {
        self.bodies.iter().fold(NVec2::zeros(), |p, b| p + b.momentum())
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }
}
