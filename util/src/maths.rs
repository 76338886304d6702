//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Limit a value to the range [min, max].
pub fn clamp<T>(value: T, min: T, max: T) -> T
where
    T: Float,
{
    let mut ret = value;

    if ret > max {
        ret = max
    }
    if ret < min {
        ret = min
    }

    ret
}

/// True if `value` is within `tolerance` of `target`.
pub fn within<T>(value: T, target: T, tolerance: T) -> bool
where
    T: Float,
{
    (value - target).abs() <= tolerance
}
