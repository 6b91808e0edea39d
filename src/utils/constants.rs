use crate::utils;

/// Softening term added to every squared distance. Bounds the force between coincident bodies.
pub const SOFTENING_EPSILON: f32 = 1e-12;

/// Seed shared by the initializers so that every run of a given mode is reproducible.
pub const DEFAULT_SEED: u64 = 737_274;

/// Largest body count accepted by [`utils::SimulationConfig::validate`].
pub const MAX_BODY_COUNT: usize = 1 << 24;

/// Default fixed time step.
pub const DEFAULT_TIME_STEP: f32 = 0.0001;

// cluster initializer
pub const CLUSTER_POSITION_SIGMA: f32 = 0.5;
pub const CLUSTER_SPEED_SIGMA: f32 = 0.5;
pub const MASS_MEAN: f32 = 0.005;
pub const MASS_SIGMA: f32 = 0.05;
pub const MASS_SCALE: f32 = 0.5;
pub const MASS_FLOOR: f32 = 0.001;

// spiral initializer
pub const SPIRAL_RINGS: usize = 25;
pub const SPIRAL_SEGMENTS: usize = 100;
pub const SPIRAL_INNER_RADIUS: f32 = 0.05;
pub const SPIRAL_RING_SPACING: f32 = 0.04;
pub const SPIRAL_AXIS_RATIO: f32 = 0.7;
pub const SPIRAL_RING_TWIST: f32 = 0.12;
pub const SPIRAL_POSITION_NOISE: f32 = 0.01;

pub const DEFAULT_SIMULATION_CONFIG: utils::SimulationConfig = utils::SimulationConfig {
    body_count: 2,
    fixed_time_step: DEFAULT_TIME_STEP,
    init_mode: utils::InitMode::Cluster,
    compute_mode: utils::ComputeMode::Cpu,
    workers: None,
    policy: None,
    seed: DEFAULT_SEED,
};
