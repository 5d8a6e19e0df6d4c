//! Astronomical distances in metres and durations in milliseconds.

/// One kilometre.
pub const KM: f64 = 1000.0;
/// One astronomical unit.
pub const AU: f64 = 149_597_870_700.0;
/// Mean Earth-Moon distance.
pub const MOON_DISTANCE: f64 = 384_400.0 * KM;

/// Mean solar radius.
pub const SUN_RADIUS: f64 = 696_000.0 * KM;
/// Earth's polar radius.
pub const EARTH_RADIUS: f64 = 6_357.0 * KM;
/// Mean Martian radius.
pub const MARS_RADIUS: f64 = 3_389.5 * KM;
/// Mean lunar radius.
pub const MOON_RADIUS: f64 = 1_737.4 * KM;
/// Mean radius of Ceres.
pub const CERES_RADIUS: f64 = 469.73 * KM;

/// One day in milliseconds.
pub const DAY_MS: u64 = 86_400_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radii_are_in_metres() {
        assert_eq!(EARTH_RADIUS, 6_357_000.0);
        assert!(SUN_RADIUS > EARTH_RADIUS);
        assert!(EARTH_RADIUS > MARS_RADIUS);
        assert!(MARS_RADIUS > MOON_RADIUS);
        assert!(MOON_RADIUS > CERES_RADIUS);
        assert!(MOON_DISTANCE < AU);
    }
}
