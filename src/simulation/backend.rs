use log::{debug, warn};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::forces::{compute_accelerations, reduce_accelerations};
use crate::integration::integrate;
use crate::models::BodyStore;
use crate::simd::PolicyKind;
use crate::utils::{ComputeMode, SimulationError};

/// One way of advancing a body store by a time step.
pub trait StepBackend {
    fn step(&self, store: &mut BodyStore, dt: f32);

    fn name(&self) -> &'static str;
}

/// Force, reduction and integration phases on a dedicated rayon pool.
///
/// Each phase is a parallel loop that returns only when all of its tasks are done, so
/// the reduction never sees a half-written row and integration never sees a
/// half-reduced one.
#[derive(Debug)]
pub struct CpuBackend {
    policy: PolicyKind,
    workers: usize,
    pool: ThreadPool,
}

impl CpuBackend {
    pub fn new(policy: PolicyKind, workers: usize) -> Result<Self, SimulationError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("nbody-worker-{}", i))
            .build()
            .map_err(|e| SimulationError::ThreadPool(e.to_string()))?;
        debug!("Started thread pool with {} workers", pool.current_num_threads());
        Ok(Self {
            policy,
            workers,
            pool,
        })
    }

    pub fn policy(&self) -> PolicyKind {
        self.policy
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl StepBackend for CpuBackend {
    fn step(&self, store: &mut BodyStore, dt: f32) {
        self.pool.install(|| {
            compute_accelerations(self.policy, store);
            reduce_accelerations(store);
            integrate(store, dt);
        });
    }

    fn name(&self) -> &'static str {
        "cpu"
    }
}

/// Placeholder for a device path. Stepping leaves the store untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct GpuBackend;

impl StepBackend for GpuBackend {
    fn step(&self, _store: &mut BodyStore, _dt: f32) {}

    fn name(&self) -> &'static str {
        "gpu"
    }
}

/// Backend chosen once from [`ComputeMode`] when a simulation is built.
#[derive(Debug)]
pub enum ComputeBackend {
    Cpu(CpuBackend),
    Gpu(GpuBackend),
}

impl ComputeBackend {
    pub fn for_mode(
        mode: ComputeMode,
        policy: PolicyKind,
        workers: usize,
    ) -> Result<Self, SimulationError> {
        match mode {
            ComputeMode::Cpu => Ok(ComputeBackend::Cpu(CpuBackend::new(policy, workers)?)),
            ComputeMode::Gpu => {
                warn!("GPU compute mode is not implemented; bodies will not move");
                Ok(ComputeBackend::Gpu(GpuBackend))
            }
        }
    }

    pub fn mode(&self) -> ComputeMode {
        match self {
            ComputeBackend::Cpu(_) => ComputeMode::Cpu,
            ComputeBackend::Gpu(_) => ComputeMode::Gpu,
        }
    }
}

impl StepBackend for ComputeBackend {
    fn step(&self, store: &mut BodyStore, dt: f32) {
        match self {
            ComputeBackend::Cpu(backend) => backend.step(store, dt),
            ComputeBackend::Gpu(backend) => backend.step(store, dt),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ComputeBackend::Cpu(backend) => backend.name(),
            ComputeBackend::Gpu(backend) => backend.name(),
        }
    }
}
