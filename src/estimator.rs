// src/estimator.rs
//
// Travel time from the congestion-implied pace. Deliberately independent of
// the travel-time feature fed to the classifier: that one uses the caller's
// claimed speed, this one reports what the predicted congestion allows.

use crate::features::round1;
use crate::types::CongestionLevel;

pub fn estimate(distance_km: f64, congestion: CongestionLevel) -> f64 {
    round1(distance_km / congestion.speed_kmh() * 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_per_level() {
        assert_eq!(estimate(12.0, CongestionLevel::Low), 12.0);
        assert_eq!(estimate(12.0, CongestionLevel::Medium), 24.0);
        assert_eq!(estimate(12.0, CongestionLevel::High), 60.0);
    }

    #[test]
    fn test_estimate_rounds_to_one_decimal() {
        assert_eq!(estimate(7.0, CongestionLevel::Medium), 14.0);
        // 2.5/12*60 = 12.5
        assert_eq!(estimate(2.5, CongestionLevel::High), 12.5);
        // 14/60*60 = 14.0 exactly, 14/30*60 = 28.0
        assert_eq!(estimate(14.0, CongestionLevel::Medium), 28.0);
    }
}
