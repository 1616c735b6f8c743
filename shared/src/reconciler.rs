use crate::constants::FULL_TURN_DEGREES;
use crate::error::WheelError;
use crate::prize_pool::PrizePool;

/// Wraps any finite angle into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(FULL_TURN_DEGREES);
    // rem_euclid may round up to the modulus for tiny negative inputs
    if wrapped >= FULL_TURN_DEGREES {
        0.0
    } else {
        wrapped
    }
}

/// Index of the segment sitting under the pointer when the wheel is at `final_angle`.
///
/// The wheel turns clockwise while indices are read against the fixed pointer, so the
/// angle is inverted before it is divided into spans.
pub fn reconcile(pool: &PrizePool, final_angle: f64) -> Result<usize, WheelError> {
    if !final_angle.is_finite() {
        return Err(WheelError::NonFiniteAngle(final_angle));
    }
    let normalized = normalize_degrees(-final_angle);
    let index = (normalized / pool.segment_angle_span()).floor() as usize;
    Ok(index % pool.len())
}
