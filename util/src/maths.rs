//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the sign of a value as `+1`, `0` or `-1`.
///
/// Unlike `f64::signum` zero (and NaN) map to zero.
pub fn sign<T>(value: T) -> T
where
    T: Float
{
    if value > T::zero() {
        T::one()
    }
    else if value < T::zero() {
        -T::one()
    }
    else {
        T::zero()
    }
}

/// Wrap an angle in degrees into the range [0, 360).
pub fn wrap_360<T>(angle_deg: T) -> T
where
    T: Float
{
    let full: T = T::from(360.0).unwrap();

    let r = rem_euclid(angle_deg, full);

    // rem_euclid can round up to exactly the modulus
    if r >= full { T::zero() } else { r }
}

/// Normalise an angle in degrees into the range (-180, 180].
///
/// Exactly -180 maps to +180.
pub fn norm_180<T>(angle_deg: T) -> T
where
    T: Float
{
    let half: T = T::from(180.0).unwrap();
    let full: T = T::from(360.0).unwrap();

    let r = half - rem_euclid(half - angle_deg, full);

    if r <= -half { r + full } else { r }
}

/// Get the signed shortest angular distance in degrees to go from `from_deg`
/// to `to_deg`.
///
/// Positive distances are counter-clockwise (increasing angle), the result is
/// in the range (-180, 180].
pub fn get_ang_dist_deg<T>(from_deg: T, to_deg: T) -> T
where
    T: Float
{
    norm_180(to_deg - from_deg)
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
/// 
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()`, violating the mathematical definition, if
/// `self` is much smaller than `rhs.abs()` in magnitude and `self < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sign() {
        assert_eq!(sign(3.2f64), 1.0);
        assert_eq!(sign(-0.1f64), -1.0);
        assert_eq!(sign(0f64), 0.0);
        assert_eq!(sign(-0f64), 0.0);
    }

    #[test]
    fn test_wrap_360() {
        assert_eq!(wrap_360(0f64), 0.0);
        assert_eq!(wrap_360(360f64), 0.0);
        assert_eq!(wrap_360(370f64), 10.0);
        assert_eq!(wrap_360(-10f64), 350.0);
        assert_eq!(wrap_360(-720f64), 0.0);
    }

    #[test]
    fn test_norm_180() {
        assert_eq!(norm_180(190f64), -170.0);
        assert_eq!(norm_180(-190f64), 170.0);
        assert_eq!(norm_180(180f64), 180.0);
        assert_eq!(norm_180(-180f64), 180.0);
        assert_eq!(norm_180(540f64), 180.0);
        assert_eq!(norm_180(0f64), 0.0);
        assert_eq!(norm_180(-20f64), -20.0);
    }

    #[test]
    fn test_get_ang_dist_deg() {
        assert_eq!(get_ang_dist_deg(10f64, 200f64), -170.0);
        assert_eq!(get_ang_dist_deg(350f64, 10f64), 20.0);
        assert_eq!(get_ang_dist_deg(10f64, 350f64), -20.0);
        assert_eq!(get_ang_dist_deg(90f64, 270f64), 180.0);
        assert_eq!(get_ang_dist_deg(270f64, 90f64), 180.0);
        assert_eq!(get_ang_dist_deg(45f64, 45f64), 0.0);
    }
}
