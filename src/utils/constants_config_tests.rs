use crate::simd::PolicyKind;
use crate::utils::{
    ComputeMode, InitMode, SimulationConfig, SimulationError, DEFAULT_SEED, DEFAULT_TIME_STEP,
    MAX_BODY_COUNT,
};

#[test]
fn test_default_config() {
    let config = SimulationConfig::default();
    assert_eq!(config.body_count, 2);
    assert_eq!(config.fixed_time_step, DEFAULT_TIME_STEP);
    assert_eq!(config.init_mode, InitMode::Cluster);
    assert_eq!(config.compute_mode, ComputeMode::Cpu);
    assert_eq!(config.seed, DEFAULT_SEED);
    assert!(config.validate().is_ok());
}

#[test]
fn test_new_with_partial_overrides() {
    let config = SimulationConfig::new(500, Some(0.01), None, Some(ComputeMode::Gpu));
    assert_eq!(config.body_count, 500);
    assert_eq!(config.fixed_time_step, 0.01);
    assert_eq!(config.init_mode, InitMode::Cluster);
    assert_eq!(config.compute_mode, ComputeMode::Gpu);
}

#[test]
fn test_builder_methods() {
    let config = SimulationConfig::new(10, None, Some(InitMode::Spiral), None)
        .with_workers(3)
        .with_policy(PolicyKind::Scalar)
        .with_seed(42);
    assert_eq!(config.workers, Some(3));
    assert_eq!(config.resolved_workers(), 3);
    assert_eq!(config.policy, Some(PolicyKind::Scalar));
    assert_eq!(config.seed, 42);
}

#[test]
fn test_validate_rejects_zero_bodies() {
    let config = SimulationConfig::new(0, None, None, None);
    assert_eq!(config.validate(), Err(SimulationError::InvalidBodyCount(0)));
}

#[test]
fn test_validate_rejects_absurd_body_count() {
    let config = SimulationConfig::new(MAX_BODY_COUNT + 1, None, None, None);
    assert_eq!(config.validate(), Err(SimulationError::InvalidBodyCount(MAX_BODY_COUNT + 1)));
}

#[test]
fn test_validate_rejects_bad_time_step() {
    for &dt in &[0.0, -0.1, f32::NAN, f32::INFINITY] {
        let result = SimulationConfig::new(4, Some(dt), None, None).validate();
        assert!(
            matches!(result, Err(SimulationError::InvalidTimeStep(_))),
            "time step {} should be rejected",
            dt
        );
    }
}

#[test]
fn test_validate_rejects_zero_workers() {
    let config = SimulationConfig::new(4, None, None, None).with_workers(0);
    assert_eq!(config.validate(), Err(SimulationError::InvalidWorkerCount(0)));
}

#[test]
fn test_validate_rejects_overflowing_accumulators() {
    let config = SimulationConfig::new(MAX_BODY_COUNT, None, None, None).with_workers(usize::MAX / 4);
    assert!(matches!(
        config.validate(),
        Err(SimulationError::AllocationTooLarge { .. })
    ));
}

#[test]
fn test_error_display() {
    let message = SimulationError::InvalidBodyCount(0).to_string();
    assert!(message.contains("body count"));
    let message = SimulationError::PolicyUnavailable(PolicyKind::Wide).to_string();
    assert!(message.contains("wide"));
}
