//! Global utility functions, publicly re-exported in `prelude.rs`.

pub mod general;

pub use general::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_mapping() {
        assert!((map_f32(5.0, 0.0, 10.0, 0.0, 1.0) - 0.5).abs() < 1e-6);
        assert!((map_f32(0.25, 0.0, 1.0, -1.0, 1.0) + 0.5).abs() < 1e-6);
        assert!(map_f32(0.5, 0.0, 1.0, -135.0, 135.0).abs() < 1e-6);
    }

    #[test]
    fn test_unit_clamping() {
        assert_eq!(clamp_unit(1.7), 1.0);
        assert_eq!(clamp_unit(-3.0), 0.0);
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert_eq!(clamp_unit(0.42), 0.42);
    }

    #[test]
    fn test_distance() {
        assert!((distance(0.0, 0.0, 3.0, 4.0) - 5.0).abs() < 1e-6);
    }
}
