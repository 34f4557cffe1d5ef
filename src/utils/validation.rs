use log::warn;

use crate::utils::errors::UtilsError;

/// # Errors
///
/// Returns an error if either bound is not finite or `min` exceeds `max`.
pub fn validate_range(min: f64, max: f64) -> Result<(), UtilsError> {
    for bound in [min, max] {
        if !bound.is_finite() {
            warn!("Rejecting non-finite bound {}", bound);
            return Err(UtilsError::NonFiniteBound(bound));
        }
    }

    if min > max {
        warn!("Invalid range: min={}, max={}", min, max);
        return Err(UtilsError::InvalidRange { min, max });
    }

    Ok(())
}
