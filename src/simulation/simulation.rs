//! The simulation controller.
//!
//! A [`Simulation`] owns the body store, the SIMD policy picked at construction and the
//! compute backend. Callers drive it with [`Simulation::advance`] and read positions
//! back between steps.
//!
//! # Example
//!
//! ```
//! use rs_nbody::simulation::Simulation;
//! use rs_nbody::utils::{InitMode, SimulationConfig};
//!
//! let config = SimulationConfig::new(256, Some(0.001), Some(InitMode::Spiral), None)
//!     .with_workers(2);
//! let mut sim = Simulation::new(config).expect("Failed to create simulation");
//!
//! sim.simulate(10);
//! assert_eq!(sim.pos_x().len(), 256);
//! assert!(sim.pos_x().iter().all(|x| x.is_finite()));
//! ```
use std::time::{Duration, Instant};

use log::{info, trace};

use crate::initialization::initialize;
use crate::models::{Body, BodyStore};
use crate::simd::PolicyKind;
use crate::simulation::{ComputeBackend, CpuBackend, Diagnostics, StepBackend};
use crate::utils::{ComputeMode, SimulationConfig, SimulationError};

#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    policy: PolicyKind,
    store: BodyStore,
    backend: ComputeBackend,
}

impl Simulation {
    /// Validates `config`, allocates and initializes the bodies, and starts the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, if a requested SIMD policy is
    /// not available, or if the worker pool cannot be started.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let workers = config.resolved_workers();
        let policy = match config.policy {
            Some(kind) if !kind.is_supported() => return Err(SimulationError::PolicyUnavailable(kind)),
            Some(kind) => kind,
            None => PolicyKind::detect(),
        };

        let mut store = BodyStore::new(config.body_count, workers, policy);
        initialize(&mut store, config.init_mode, config.seed);
        let backend = ComputeBackend::for_mode(config.compute_mode, policy, workers)?;

        info!(
            "Simulation ready: {} bodies, {} workers, policy {}, {:?} init, {} compute",
            config.body_count,
            workers,
            policy,
            config.init_mode,
            backend.name()
        );

        Ok(Self {
            config: SimulationConfig {
                workers: Some(workers),
                policy: Some(policy),
                ..config
            },
            policy,
            store,
            backend,
        })
    }

    /// Runs an explicit set of bodies on the CPU backend with one worker per
    /// accumulator row of `store`. An empty store is accepted; advancing it does nothing.
    ///
    /// Without a requested policy, the widest one both the host and the store's layout
    /// support is used.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid time step, a store holding bodies but no
    /// accumulator rows, or a requested policy that the host or the store's layout
    /// cannot run.
    pub fn from_store(
        store: BodyStore,
        fixed_time_step: f32,
        policy: Option<PolicyKind>,
    ) -> Result<Self, SimulationError> {
        if !fixed_time_step.is_finite() || fixed_time_step <= 0.0 {
            return Err(SimulationError::InvalidTimeStep(fixed_time_step));
        }
        if !store.is_empty() && store.workers() == 0 {
            return Err(SimulationError::InvalidWorkerCount(0));
        }
        let policy = match policy {
            Some(kind) if kind.is_supported() && store.supports_policy(kind) => kind,
            Some(kind) => return Err(SimulationError::PolicyUnavailable(kind)),
            None => PolicyKind::available()
                .into_iter()
                .find(|&kind| store.supports_policy(kind))
                .unwrap_or(PolicyKind::Scalar),
        };

        let workers = store.workers().max(1);
        let backend = ComputeBackend::Cpu(CpuBackend::new(policy, workers)?);
        info!(
            "Simulation ready: {} explicit bodies, {} workers, policy {}",
            store.body_count(),
            workers,
            policy
        );

        Ok(Self {
            config: SimulationConfig {
                body_count: store.body_count(),
                fixed_time_step,
                compute_mode: ComputeMode::Cpu,
                workers: Some(workers),
                policy: Some(policy),
                ..SimulationConfig::default()
            },
            policy,
            store,
            backend,
        })
    }

    /// Advances every body by `dt` and returns the wall-clock time the step took.
    ///
    /// With no bodies this does nothing.
    pub fn advance(&mut self, dt: f32) -> Duration {
        let start = Instant::now();
        if !self.store.is_empty() {
            self.backend.step(&mut self.store, dt);
        }
        let elapsed = start.elapsed();
        trace!("Advanced {} bodies by {} in {:?}", self.store.body_count(), dt, elapsed);
        elapsed
    }

    /// Advances by the configured fixed time step.
    pub fn step(&mut self) -> Duration {
        self.advance(self.config.fixed_time_step)
    }

    /// Runs `steps` fixed steps and returns their total elapsed time.
    pub fn simulate(&mut self, steps: usize) -> Duration {
        (0..steps).map(|_| self.step()).sum()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn policy(&self) -> PolicyKind {
        self.policy
    }

    pub fn workers(&self) -> usize {
        self.store.workers()
    }

    pub fn compute_mode(&self) -> ComputeMode {
        self.backend.mode()
    }

    pub fn store(&self) -> &BodyStore {
        &self.store
    }

    pub fn body_count(&self) -> usize {
        self.store.body_count()
    }

    pub fn pos_x(&self) -> &[f32] {
        self.store.pos_x()
    }

    pub fn pos_y(&self) -> &[f32] {
        self.store.pos_y()
    }

    pub fn vel_x(&self) -> &[f32] {
        self.store.vel_x()
    }

    pub fn vel_y(&self) -> &[f32] {
        self.store.vel_y()
    }

    pub fn masses(&self) -> &[f32] {
        self.store.masses()
    }

    pub fn bodies(&self) -> impl ExactSizeIterator<Item = Body> + '_ {
        self.store.bodies()
    }

    /// Copies the current bodies, for handing to a renderer.
    pub fn snapshot(&self) -> Vec<Body> {
        self.store.snapshot()
    }

    /// Conserved quantities of the current state.
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::measure(&self.store)
    }
}
