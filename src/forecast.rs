// src/forecast.rs

/// Advances a time-of-day bucket one period for the "future congestion"
/// query. Buckets outside the known cycle pass through unchanged.
pub fn next_period(time_of_day: &str) -> &str {
    match time_of_day {
        "Morning" => "Afternoon",
        "Afternoon" => "Evening",
        "Evening" => "Night",
        "Night" => "Morning",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_cycle() {
        for start in ["Morning", "Afternoon", "Evening", "Night"] {
            let mut period = start;
            for _ in 0..4 {
                period = next_period(period);
            }
            assert_eq!(period, start);
        }
    }

    #[test]
    fn test_single_shifts() {
        assert_eq!(next_period("Morning"), "Afternoon");
        assert_eq!(next_period("Afternoon"), "Evening");
        assert_eq!(next_period("Evening"), "Night");
        assert_eq!(next_period("Night"), "Morning");
    }

    #[test]
    fn test_unknown_passes_through() {
        assert_eq!(next_period("Rush Hour"), "Rush Hour");
        assert_eq!(next_period(""), "");
    }
}
