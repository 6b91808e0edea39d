// src/utils/constants_config.rs
use crate::simd::PolicyKind;
use crate::utils::{
    DEFAULT_SIMULATION_CONFIG,
    MAX_BODY_COUNT,
    errors::SimulationError,
    round_up_to_multiple,
};

/// Starting distribution written into the body store at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMode {
    /// Gaussian blob around the origin.
    Cluster,
    /// Concentric, progressively rotated ellipses with tangential velocities.
    Spiral,
}

/// Where the per-step work runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeMode {
    Cpu,
    /// Accepted but not implemented: stepping leaves the bodies untouched.
    Gpu,
}

/// Immutable description of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub body_count: usize,
    pub fixed_time_step: f32,
    pub init_mode: InitMode,
    pub compute_mode: ComputeMode,
    /// Number of force-phase workers. `None` uses the host's hardware concurrency.
    pub workers: Option<usize>,
    /// Forces a SIMD policy. `None` picks the widest one the host supports.
    pub policy: Option<PolicyKind>,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        DEFAULT_SIMULATION_CONFIG
    }
}

impl SimulationConfig {
    pub fn new(
        body_count: usize,
        fixed_time_step: Option<f32>,
        init_mode: Option<InitMode>,
        compute_mode: Option<ComputeMode>,
    ) -> Self {
        let default = DEFAULT_SIMULATION_CONFIG;
        Self {
            body_count,
            fixed_time_step: fixed_time_step.unwrap_or(default.fixed_time_step),
            init_mode: init_mode.unwrap_or(default.init_mode),
            compute_mode: compute_mode.unwrap_or(default.compute_mode),
            ..default
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Worker count the simulation will run with.
    pub fn resolved_workers(&self) -> usize {
        self.workers.unwrap_or_else(hardware_concurrency)
    }

    /// Checks the configuration before anything is allocated.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero or oversized body count, a time step that is not
    /// positive and finite, an explicit worker count of zero, or accumulator
    /// matrices whose byte size would overflow.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.body_count == 0 || self.body_count > MAX_BODY_COUNT {
            return Err(SimulationError::InvalidBodyCount(self.body_count));
        }
        if !self.fixed_time_step.is_finite() || self.fixed_time_step <= 0.0 {
            return Err(SimulationError::InvalidTimeStep(self.fixed_time_step));
        }
        if self.workers == Some(0) {
            return Err(SimulationError::InvalidWorkerCount(0));
        }

        let workers = self.resolved_workers();
        let padded = round_up_to_multiple(self.body_count, PolicyKind::MAX_WIDTH);
        workers
            .checked_mul(padded)
            .and_then(|cells| cells.checked_mul(std::mem::size_of::<f32>()))
            .filter(|&bytes| bytes <= isize::MAX as usize)
            .ok_or(SimulationError::AllocationTooLarge {
                bodies: self.body_count,
                workers,
            })?;
        Ok(())
    }
}

/// Number of hardware threads visible to this process, at least one.
pub fn hardware_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
