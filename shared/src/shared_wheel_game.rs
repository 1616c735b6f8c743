use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use rand::rngs::ThreadRng;
use serde::{Deserialize, Serialize};

use crate::config::WheelConfig;
use crate::error::{WheelAction, WheelError};
use crate::prize_pool::{PrizeDesignation, PrizeEntry, PrizePool};
use crate::reconciler::reconcile;
use crate::spin_animator::SpinAnimator;
use crate::spin_planner::{plan, RandomEntropy, SpinEntropy, SpinPlan};
use crate::wheel_renderer::{render, SegmentDraw};

/// Lifecycle of one wheel: Idle -> Planning -> Animating -> Settled, then back to Planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpinPhase {
    #[default]
    Idle,
    Planning,
    Animating,
    Settled,
}

impl SpinPhase {
    pub fn accepts_spin(&self) -> bool {
        matches!(self, Self::Idle | Self::Settled)
    }

    pub fn is_spinning(&self) -> bool {
        !self.accepts_spin()
    }
}

impl fmt::Display for SpinPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Planning => "planning",
            Self::Animating => "animating",
            Self::Settled => "settled",
        };
        write!(f, "{}", name)
    }
}

/// Represents the current state of the wheel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SpinState {
    pub current_angle: f64, // Absolute degrees, never wrapped
    pub target_angle: Option<f64>,
    pub phase: SpinPhase,
}

/// The prize the wheel came to rest on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinOutcome {
    pub index: usize,
    pub prize: PrizeEntry,
    pub final_angle: f64,
}

/// What the host should draw for this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUpdate {
    pub angle: f64,
    pub phase: SpinPhase,
    pub progress: f64,
    /// Present on exactly one frame per spin: the one that settles it.
    pub outcome: Option<SpinOutcome>,
}

/// Resolves with the outcome once the spin settles, or `Canceled` if it never does.
#[derive(Debug)]
pub struct SpinCompletion {
    receiver: oneshot::Receiver<SpinOutcome>,
}

impl SpinCompletion {
    /// Non-blocking check, for hosts that poll once per frame.
    pub fn try_outcome(&mut self) -> Option<SpinOutcome> {
        self.receiver.try_recv().ok().flatten()
    }
}

impl Future for SpinCompletion {
    type Output = Result<SpinOutcome, oneshot::Canceled>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver).poll(cx)
    }
}

struct ActiveSpin {
    plan: SpinPlan,
    animator: SpinAnimator,
    completion: Option<oneshot::Sender<SpinOutcome>>,
}

/// Owns one wheel: its prize snapshot, spin state and the spin in flight.
///
/// Hosts call [`request_spin`](Self::request_spin) when the outcome authority names a
/// winner, then [`tick`](Self::tick) once per display frame with a wall-clock timestamp.
pub struct WheelController<E = RandomEntropy<ThreadRng>> {
    pool: PrizePool,
    config: WheelConfig,
    state: SpinState,
    entropy: E,
    active: Option<ActiveSpin>,
    last_outcome: Option<SpinOutcome>,
}

impl WheelController<RandomEntropy<ThreadRng>> {
    pub fn new(pool: PrizePool, config: WheelConfig) -> Result<Self, WheelError> {
        Self::with_entropy(pool, config, RandomEntropy::thread())
    }
}

impl<E: SpinEntropy> WheelController<E> {
    pub fn with_entropy(pool: PrizePool, config: WheelConfig, entropy: E) -> Result<Self, WheelError> {
        Ok(Self {
            pool,
            config: config.checked()?,
            state: SpinState::default(),
            entropy,
            active: None,
            last_outcome: None,
        })
    }

    pub fn pool(&self) -> &PrizePool {
        &self.pool
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    pub fn phase(&self) -> SpinPhase {
        self.state.phase
    }

    pub fn current_angle(&self) -> f64 {
        self.state.current_angle
    }

    pub fn last_outcome(&self) -> Option<&SpinOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn can_spin(&self) -> bool {
        self.state.phase.accepts_spin()
    }

    /// Draw commands for the wheel at its current angle.
    pub fn segments(&self) -> Vec<SegmentDraw> {
        render(&self.pool, self.state.current_angle)
    }

    /// Starts a spin towards the designated prize.
    ///
    /// Rejected without side effects while another spin is in flight, or when the
    /// designation does not name a winnable prize of the current snapshot.
    /// The animation clock starts on the first [`tick`](Self::tick) after this call.
    pub fn request_spin(
        &mut self,
        designation: impl Into<PrizeDesignation>,
    ) -> Result<SpinCompletion, WheelError> {
        let designation = designation.into();
        if !self.can_spin() {
            log::warn!("Ignoring spin request for {:?}: wheel is {}", designation, self.state.phase);
            return Err(WheelError::InvalidStateTransition {
                phase: self.state.phase,
                action: WheelAction::RequestSpin,
            });
        }

        let previous = self.state.phase;
        self.state.phase = SpinPhase::Planning;

        let planned = self.pool.resolve_winner(&designation).and_then(|index| {
            plan(&self.pool, self.state.current_angle, index, &self.config, &mut self.entropy)
        });
        let spin_plan = match planned {
            Ok(spin_plan) => spin_plan,
            Err(e) => {
                log::warn!("Spin for {:?} rejected: {}", designation, e);
                self.state.phase = previous;
                return Err(e);
            }
        };

        let (sender, receiver) = oneshot::channel();
        self.active = Some(ActiveSpin {
            plan: spin_plan,
            animator: SpinAnimator::new(
                spin_plan.start_angle,
                spin_plan.target_angle,
                self.config.spin_duration_ms_f64(),
            ),
            completion: Some(sender),
        });
        self.state.target_angle = Some(spin_plan.target_angle);
        self.state.phase = SpinPhase::Animating;

        Ok(SpinCompletion { receiver })
    }

    /// Advances the spin in flight to host time `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> Result<FrameUpdate, WheelError> {
        let Some(active) = self.active.as_mut() else {
            return Ok(self.idle_frame());
        };

        let sample = active.animator.sample(now_ms);
        self.state.current_angle = sample.angle;
        if !sample.finished {
            return Ok(FrameUpdate {
                angle: sample.angle,
                phase: self.state.phase,
                progress: sample.progress,
                outcome: None,
            });
        }

        let Some(mut active) = self.active.take() else {
            return Ok(self.idle_frame());
        };
        let final_angle = active.plan.target_angle;
        self.state.current_angle = final_angle;
        self.state.phase = SpinPhase::Settled;

        let landed = reconcile(&self.pool, final_angle)?;
        if landed != active.plan.index {
            log::error!(
                "Wheel settled at {:.4}° on index {} but index {} was planned",
                final_angle,
                landed,
                active.plan.index
            );
            return Err(WheelError::ReconciliationMismatch {
                expected: active.plan.index,
                landed,
            });
        }

        let outcome = SpinOutcome {
            index: landed,
            prize: self.pool.get(landed)?.clone(),
            final_angle,
        };
        log::debug!("Wheel settled on '{}' at {:.2}°", outcome.prize.label(), final_angle);

        if let Some(sender) = active.completion.take() {
            // The host may have dropped its completion handle; the frame still carries the outcome
            let _ = sender.send(outcome.clone());
        }
        self.last_outcome = Some(outcome.clone());

        Ok(FrameUpdate {
            angle: final_angle,
            phase: SpinPhase::Settled,
            progress: 1.0,
            outcome: Some(outcome),
        })
    }

    /// Swaps in a freshly fetched prize snapshot. Not allowed mid-spin.
    pub fn replace_pool(&mut self, pool: PrizePool) -> Result<(), WheelError> {
        if !self.can_spin() {
            return Err(WheelError::InvalidStateTransition {
                phase: self.state.phase,
                action: WheelAction::ReplacePool,
            });
        }
        self.pool = pool;
        self.last_outcome = None;
        Ok(())
    }

    fn idle_frame(&self) -> FrameUpdate {
        FrameUpdate {
            angle: self.state.current_angle,
            phase: self.state.phase,
            progress: if self.state.phase == SpinPhase::Settled { 1.0 } else { 0.0 },
            outcome: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::prize_pool::PrizeRecord;
    use crate::spin_planner::FixedEntropy;
    use futures::executor::block_on;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn abc() -> PrizePool {
        PrizePool::new(vec![
            PrizeRecord::new("A", 10.0),
            PrizeRecord::new("B", 30.0).with_payload(serde_json::json!({ "points": 30 })),
            PrizeRecord::new("C", 60.0),
        ])
        .unwrap()
    }

    fn controller() -> WheelController<FixedEntropy> {
        WheelController::with_entropy(abc(), WheelConfig::default(), FixedEntropy::centered(5)).unwrap()
    }

    #[test]
    fn test_full_spin_lifecycle() {
        let mut wheel = controller();
        assert_eq!(wheel.phase(), SpinPhase::Idle);
        assert_eq!(wheel.current_angle(), 0.0);

        let mut completion = wheel.request_spin("B").unwrap();
        assert_eq!(wheel.phase(), SpinPhase::Animating);
        assert_eq!(wheel.state().target_angle, Some(1980.0));

        let first = wheel.tick(100.0).unwrap();
        assert_eq!(first.angle, 0.0);
        assert!(first.outcome.is_none());

        let middle = wheel.tick(2350.0).unwrap();
        assert!(middle.angle > 0.0 && middle.angle < 1980.0);
        assert_eq!(middle.phase, SpinPhase::Animating);
        assert!(completion.try_outcome().is_none());

        let last = wheel.tick(4600.0).unwrap();
        assert_eq!(last.angle, 1980.0);
        assert_eq!(last.phase, SpinPhase::Settled);
        let outcome = last.outcome.unwrap();
        assert_eq!(outcome.index, 1);
        assert_eq!(outcome.prize.label(), "B");
        assert_eq!(outcome.prize.payload()["points"], 30);
        assert_eq!(wheel.current_angle(), 1980.0);

        assert_eq!(completion.try_outcome().unwrap().index, 1);
        assert_eq!(wheel.last_outcome().unwrap().index, 1);

        // Outcome is only emitted once
        let after = wheel.tick(5000.0).unwrap();
        assert!(after.outcome.is_none());
        assert_eq!(after.angle, 1980.0);
    }

    #[test]
    fn test_completion_future_resolves() {
        let mut wheel = controller();
        let completion = wheel.request_spin(2usize).unwrap();
        wheel.tick(0.0).unwrap();
        wheel.tick(10_000.0).unwrap();

        let outcome = block_on(completion).unwrap();
        assert_eq!(outcome.index, 2);
        assert_eq!(outcome.prize.label(), "C");
    }

    #[test]
    fn test_second_request_while_spinning_is_ignored() {
        let mut wheel = controller();
        let _completion = wheel.request_spin("A").unwrap();
        let before = wheel.state();

        let err = wheel.request_spin("C").unwrap_err();
        assert!(err.is_benign());
        assert_eq!(err.kind(), ErrorKind::InvalidStateTransition);
        assert_eq!(wheel.state(), before);

        wheel.tick(0.0).unwrap();
        let done = wheel.tick(4500.0).unwrap();
        assert_eq!(done.outcome.unwrap().prize.label(), "A");
    }

    #[test]
    fn test_contract_violation_leaves_wheel_idle() {
        let mut wheel = WheelController::with_entropy(
            PrizePool::new(vec![PrizeRecord::new("Nothing", 0.0), PrizeRecord::new("Car", 1.0)]).unwrap(),
            WheelConfig::default(),
            FixedEntropy::centered(5),
        )
        .unwrap();

        let err = wheel.request_spin("Boat").unwrap_err();
        assert_eq!(err, WheelError::UnknownPrize("Boat".to_string()));
        assert_eq!(wheel.phase(), SpinPhase::Idle);

        let err = wheel.request_spin("Nothing").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ContractViolation);
        assert_eq!(wheel.phase(), SpinPhase::Idle);
        assert_eq!(wheel.state().target_angle, None);

        assert!(wheel.request_spin("Car").is_ok());
    }

    #[test]
    fn test_bad_entropy_does_not_wedge_the_wheel() {
        let mut wheel = WheelController::with_entropy(
            abc(),
            WheelConfig::default(),
            FixedEntropy { rotations: 5, jitter_unit: f64::NAN },
        )
        .unwrap();

        let err = wheel.request_spin("B").unwrap_err();
        assert!(matches!(err, WheelError::InvalidJitter(_)));
        assert_eq!(wheel.phase(), SpinPhase::Idle);
        assert_eq!(wheel.current_angle(), 0.0);
        assert_eq!(wheel.state().target_angle, None);
        assert_eq!(wheel.tick(100.0).unwrap().angle, 0.0);
    }

    #[test]
    fn test_consecutive_spins_move_forward() {
        let mut wheel = WheelController::with_entropy(
            PrizePool::default_seed(),
            WheelConfig::default(),
            RandomEntropy::new(StdRng::seed_from_u64(42)),
        )
        .unwrap();

        let mut now = 0.0;
        for label in ["10 Points", "10 Points", "1000 Points", "75 Points", "500 Points"] {
            let start = wheel.current_angle();
            wheel.request_spin(label).unwrap();
            wheel.tick(now).unwrap();
            now += 4500.0;
            let done = wheel.tick(now).unwrap();
            now += 1000.0;

            assert!(done.angle - start >= 5.0 * 360.0 - 1e-6);
            assert_eq!(wheel.phase(), SpinPhase::Settled);
            assert_eq!(done.outcome.unwrap().prize.label(), label);
        }
    }

    #[test]
    fn test_stalled_host_settles_on_resume() {
        let mut wheel = controller();
        wheel.request_spin("C").unwrap();
        wheel.tick(1_000.0).unwrap();
        let resumed = wheel.tick(1_000.0 + 3_600_000.0).unwrap();
        assert_eq!(resumed.phase, SpinPhase::Settled);
        assert_eq!(Some(resumed.angle), wheel.state().target_angle);
    }

    #[test]
    fn test_replace_pool_only_when_not_spinning() {
        let mut wheel = controller();
        wheel.request_spin("A").unwrap();
        let err = wheel.replace_pool(PrizePool::default_seed()).unwrap_err();
        assert!(err.is_benign());
        assert_eq!(wheel.pool().len(), 3);

        wheel.tick(0.0).unwrap();
        wheel.tick(4500.0).unwrap();
        wheel.replace_pool(PrizePool::default_seed()).unwrap();
        assert_eq!(wheel.pool().len(), 8);
        assert_eq!(wheel.segments().len(), 8);
    }

    #[test]
    fn test_dropped_completion_does_not_block_settling() {
        let mut wheel = controller();
        drop(wheel.request_spin("B").unwrap());
        wheel.tick(0.0).unwrap();
        let done = wheel.tick(4500.0).unwrap();
        assert_eq!(done.outcome.unwrap().index, 1);
    }

    #[test]
    fn test_tick_without_spin() {
        let mut wheel = controller();
        let frame = wheel.tick(123.0).unwrap();
        assert_eq!(frame.angle, 0.0);
        assert_eq!(frame.phase, SpinPhase::Idle);
        assert!(frame.outcome.is_none());
    }
}
