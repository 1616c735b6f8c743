use rand::rngs::ThreadRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::WheelConfig;
use crate::constants::{FULL_TURN_DEGREES, MAX_ABS_ANGLE_DEGREES};
use crate::error::WheelError;
use crate::prize_pool::PrizePool;
use crate::reconciler::normalize_degrees;

/// Source of the cosmetic randomness in a spin: how many extra turns, and where inside
/// the winning segment the pointer stops.
pub trait SpinEntropy {
    /// Number of full extra turns, within `min..=max`.
    fn extra_rotations(&mut self, min: u32, max: u32) -> u32;
    /// Landing offset from the segment midpoint as a fraction of the allowed jitter, within `[-1, 1]`.
    fn jitter_unit(&mut self) -> f64;
}

/// Entropy drawn from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomEntropy<R> {
    rng: R,
}

impl RandomEntropy<ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> RandomEntropy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SpinEntropy for RandomEntropy<R> {
    fn extra_rotations(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    fn jitter_unit(&mut self) -> f64 {
        self.rng.gen_range(-1.0..=1.0)
    }
}

/// Pinned entropy, for replaying a spin exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedEntropy {
    pub rotations: u32,
    pub jitter_unit: f64,
}

impl FixedEntropy {
    pub fn centered(rotations: u32) -> Self {
        Self { rotations, jitter_unit: 0.0 }
    }
}

impl SpinEntropy for FixedEntropy {
    fn extra_rotations(&mut self, min: u32, max: u32) -> u32 {
        self.rotations.clamp(min, max.max(min))
    }

    fn jitter_unit(&mut self) -> f64 {
        self.jitter_unit.clamp(-1.0, 1.0)
    }
}

/// A planned spin. `target_angle` is absolute and strictly ahead of the starting angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinPlan {
    pub index: usize,
    pub start_angle: f64,
    pub target_angle: f64,
    pub extra_rotations: u32,
    pub jitter_degrees: f64,
}

/// Computes the absolute angle at which `winning_index` sits under the pointer,
/// at least `config.min_extra_rotations` full turns ahead of `current_angle`.
///
/// `current_angle` must be finite and within `MAX_ABS_ANGLE_DEGREES` of zero.
pub fn plan<E: SpinEntropy + ?Sized>(
    pool: &PrizePool,
    current_angle: f64,
    winning_index: usize,
    config: &WheelConfig,
    entropy: &mut E,
) -> Result<SpinPlan, WheelError> {
    if !current_angle.is_finite() {
        return Err(WheelError::NonFiniteAngle(current_angle));
    }
    if current_angle.abs() > MAX_ABS_ANGLE_DEGREES {
        return Err(WheelError::AngleOutOfRange(current_angle));
    }
    pool.ensure_winnable(winning_index)?;

    let span = pool.segment_angle_span();
    let midpoint = (winning_index as f64 + 0.5) * span;
    let jitter_unit = entropy.jitter_unit();
    if jitter_unit.is_nan() {
        return Err(WheelError::InvalidJitter(jitter_unit));
    }
    let jitter_degrees = jitter_unit.clamp(-1.0, 1.0) * config.jitter_fraction * span;

    // Pointer reads the un-rotated position -angle, so land on the negated stop point
    let desired = normalize_degrees(-(midpoint + jitter_degrees));
    let forward = normalize_degrees(desired - normalize_degrees(current_angle));

    let min_rotations = config.min_extra_rotations.max(1);
    let extra_rotations =
        entropy.extra_rotations(min_rotations, config.max_extra_rotations.max(min_rotations));
    let target_angle = current_angle + extra_rotations as f64 * FULL_TURN_DEGREES + forward;
    if !target_angle.is_finite() || target_angle <= current_angle {
        return Err(WheelError::NonFiniteAngle(target_angle));
    }

    log::debug!(
        "Planned spin to index {} ({} turns, jitter {:.2}°): {:.2}° -> {:.2}°",
        winning_index,
        extra_rotations,
        jitter_degrees,
        current_angle,
        target_angle
    );

    Ok(SpinPlan {
        index: winning_index,
        start_angle: current_angle,
        target_angle,
        extra_rotations,
        jitter_degrees,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::prize_pool::PrizeRecord;
    use crate::reconciler::reconcile;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn abc() -> PrizePool {
        PrizePool::new(vec![
            PrizeRecord::new("A", 10.0),
            PrizeRecord::new("B", 30.0),
            PrizeRecord::new("C", 60.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_plan_exact_target() {
        let pool = abc();
        let config = WheelConfig::default();
        let index = pool.resolve_label("B").unwrap();

        let plan = plan(&pool, 0.0, index, &config, &mut FixedEntropy::centered(5)).unwrap();
        assert_eq!(plan.target_angle, 5.0 * 360.0 + 180.0);
        assert_eq!(plan.extra_rotations, 5);
        assert_eq!(reconcile(&pool, plan.target_angle).unwrap(), 1);
        assert_eq!(pool.win_probability_percent(1).unwrap(), 30.0);
    }

    #[test]
    fn test_plan_from_turned_wheel() {
        let pool = abc();
        let config = WheelConfig::default();
        // Wheel already resting on B; landing on A needs a further 120° plus the turns
        let plan = plan(&pool, 1980.0, 0, &config, &mut FixedEntropy::centered(5)).unwrap();
        assert_eq!(plan.target_angle, 1980.0 + 1800.0 + 120.0);
        assert_eq!(reconcile(&pool, plan.target_angle).unwrap(), 0);

        // Same segment again still makes full turns
        let again = super::plan(&pool, 1980.0, 1, &config, &mut FixedEntropy::centered(5)).unwrap();
        assert_eq!(again.target_angle, 1980.0 + 1800.0);
    }

    #[test]
    fn test_plan_rejects_bad_winners() {
        let pool = PrizePool::new(vec![PrizeRecord::new("A", 0.0), PrizeRecord::new("B", 1.0)]).unwrap();
        let config = WheelConfig::default();
        let mut entropy = FixedEntropy::centered(5);

        let err = plan(&pool, 0.0, 0, &config, &mut entropy).unwrap_err();
        assert!(matches!(err, WheelError::ZeroWeightWinner { index: 0, .. }));
        assert_eq!(err.kind(), ErrorKind::ContractViolation);

        let err = plan(&pool, 0.0, 2, &config, &mut entropy).unwrap_err();
        assert_eq!(err, WheelError::IndexOutOfRange { index: 2, len: 2 });

        let err = plan(&pool, f64::NAN, 1, &config, &mut entropy).unwrap_err();
        assert!(matches!(err, WheelError::NonFiniteAngle(_)));
    }

    #[test]
    fn test_plan_rejects_nan_jitter() {
        let pool = abc();
        let config = WheelConfig::default();
        let mut entropy = FixedEntropy { rotations: 5, jitter_unit: f64::NAN };

        let err = plan(&pool, 0.0, 1, &config, &mut entropy).unwrap_err();
        assert!(matches!(err, WheelError::InvalidJitter(j) if j.is_nan()));
        assert_eq!(err.kind(), ErrorKind::ContractViolation);

        // Infinite jitter is still clamped onto the segment edge margin
        let mut entropy = FixedEntropy { rotations: 5, jitter_unit: f64::INFINITY };
        let plan = plan(&pool, 0.0, 1, &config, &mut entropy).unwrap();
        assert!(plan.target_angle.is_finite());
        assert_eq!(reconcile(&pool, plan.target_angle).unwrap(), 1);
    }

    #[test]
    fn test_plan_rejects_huge_angles() {
        let records = (0..37).map(|i| PrizeRecord::new(format!("P{}", i), 1.0)).collect();
        let pool = PrizePool::new(records).unwrap();
        let config = WheelConfig::default();
        let mut entropy = FixedEntropy { rotations: 5, jitter_unit: 1.0 };

        for current in [1.0e17, -1.0e16, MAX_ABS_ANGLE_DEGREES * 2.0] {
            let err = plan(&pool, current, 3, &config, &mut entropy).unwrap_err();
            assert_eq!(err, WheelError::AngleOutOfRange(current));
            assert_eq!(err.kind(), ErrorKind::ContractViolation);
        }

        for current in [MAX_ABS_ANGLE_DEGREES, -MAX_ABS_ANGLE_DEGREES, 123_456_789.5] {
            for index in 0..37 {
                let plan = plan(&pool, current, index, &config, &mut entropy).unwrap();
                assert!(plan.target_angle > current);
                assert_eq!(reconcile(&pool, plan.target_angle).unwrap(), index);
            }
        }
    }

    #[test]
    fn test_jitter_stays_inside_segment() {
        let pool = abc();
        let config = WheelConfig::default();
        for jitter_unit in [-1.0, -0.5, 0.0, 0.5, 1.0] {
            let mut entropy = FixedEntropy { rotations: 6, jitter_unit };
            let plan = plan(&pool, 0.0, 2, &config, &mut entropy).unwrap();
            assert!((plan.jitter_degrees.abs() - jitter_unit.abs() * 48.0).abs() < 1e-9);
            assert_eq!(reconcile(&pool, plan.target_angle).unwrap(), 2);
        }
    }

    #[test]
    fn test_round_trip_and_monotonic() {
        let config = WheelConfig::default();
        let mut rng = StdRng::seed_from_u64(7);

        for n in 1..=24 {
            let records = (0..n)
                .map(|i| PrizeRecord::new(format!("P{}", i), if i % 5 == 4 { 0.0 } else { 1.0 + i as f64 }))
                .collect();
            let pool = PrizePool::new(records).unwrap();

            for seed in 0..20u64 {
                let mut entropy = RandomEntropy::new(StdRng::seed_from_u64(seed * 31 + n as u64));
                let current = rng.gen_range(-50_000.0..50_000.0);

                for index in 0..n {
                    let result = plan(&pool, current, index, &config, &mut entropy);
                    if !pool.entries()[index].is_winnable() {
                        assert!(result.is_err());
                        continue;
                    }
                    let plan = result.unwrap();
                    assert_eq!(reconcile(&pool, plan.target_angle).unwrap(), index);
                    assert!(plan.target_angle > current);
                    assert!(plan.target_angle - current >= config.min_extra_rotations as f64 * 360.0 - 1e-6);
                    assert!(plan.target_angle - current < (config.max_extra_rotations + 1) as f64 * 360.0);
                    assert!((config.min_extra_rotations..=config.max_extra_rotations)
                        .contains(&plan.extra_rotations));
                }
            }
        }
    }

    #[test]
    fn test_fixed_entropy_respects_config_range() {
        let mut entropy = FixedEntropy { rotations: 0, jitter_unit: 3.0 };
        assert_eq!(entropy.extra_rotations(5, 7), 5);
        assert_eq!(entropy.jitter_unit(), 1.0);
        let mut entropy = FixedEntropy::centered(12);
        assert_eq!(entropy.extra_rotations(5, 7), 7);
    }
}
