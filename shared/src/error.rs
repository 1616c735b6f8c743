use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared_wheel_game::SpinPhase;

/// Coarse classification used by callers to decide how to react to a [`WheelError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The wheel cannot be drawn or spun with the given setup. Fatal.
    Configuration,
    /// The outcome authority and the client disagree about the prize list. Fatal for the spin.
    ContractViolation,
    /// A request that is illegal in the current phase. Benign, the request is dropped.
    InvalidStateTransition,
}

/// What the caller tried to do when a phase check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WheelAction {
    RequestSpin,
    ReplacePool,
}

impl fmt::Display for WheelAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestSpin => write!(f, "request a spin"),
            Self::ReplacePool => write!(f, "replace the prize pool"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WheelError {
    #[error("Prize pool is empty")]
    EmptyPool,
    #[error("Total prize weight is negative: {0}")]
    NegativeTotalWeight(f64),
    #[error("Invalid prize at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },
    #[error("Duplicate prize label: {0}")]
    DuplicateLabel(String),
    #[error("Invalid wheel config: {0}")]
    InvalidConfig(String),

    #[error("Prize index {index} is out of range for a pool of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Prize '{0}' does not match any entry in the current pool")]
    UnknownPrize(String),
    #[error("Prize '{label}' at index {index} has zero weight and cannot be won")]
    ZeroWeightWinner { index: usize, label: String },
    #[error("Angle is not finite: {0}")]
    NonFiniteAngle(f64),
    #[error("Angle {0} is beyond the supported range")]
    AngleOutOfRange(f64),
    #[error("Spin entropy produced an unusable jitter value: {0}")]
    InvalidJitter(f64),
    #[error("Wheel landed on index {landed} but index {expected} was requested")]
    ReconciliationMismatch { expected: usize, landed: usize },

    #[error("Cannot {action} while the wheel is {phase}")]
    InvalidStateTransition { phase: SpinPhase, action: WheelAction },
}

impl WheelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyPool
            | Self::NegativeTotalWeight(_)
            | Self::InvalidEntry { .. }
            | Self::DuplicateLabel(_)
            | Self::InvalidConfig(_) => ErrorKind::Configuration,
            Self::IndexOutOfRange { .. }
            | Self::UnknownPrize(_)
            | Self::ZeroWeightWinner { .. }
            | Self::NonFiniteAngle(_)
            | Self::AngleOutOfRange(_)
            | Self::InvalidJitter(_)
            | Self::ReconciliationMismatch { .. } => ErrorKind::ContractViolation,
            Self::InvalidStateTransition { .. } => ErrorKind::InvalidStateTransition,
        }
    }

    /// Rejected requests that the caller may safely ignore.
    pub fn is_benign(&self) -> bool {
        self.kind() == ErrorKind::InvalidStateTransition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(WheelError::EmptyPool.kind(), ErrorKind::Configuration);
        assert_eq!(
            WheelError::UnknownPrize("Jackpot".to_string()).kind(),
            ErrorKind::ContractViolation
        );
        let busy = WheelError::InvalidStateTransition {
            phase: SpinPhase::Animating,
            action: WheelAction::RequestSpin,
        };
        assert!(busy.is_benign());
        assert_eq!(busy.to_string(), "Cannot request a spin while the wheel is animating");
    }
}
