// src/features.rs
//
// Assembles the fixed-order numeric feature vector the classifier expects:
// encoded categories plus distance, speed, and the derived cost columns.

use crate::codec::CategoryCodec;
use crate::error::EngineResult;

/// Column order the model was trained with. Artifacts must declare the same
/// order; the mismatch check happens once at startup, not per request.
pub const MODEL_COLUMNS: [&str; 8] = [
    "Route",
    "TimeOfDay",
    "DayOfWeek",
    "Distance(km)",
    "AvgSpeed(km/h)",
    "TravelTime(mins)",
    "FuelCost(Naira)",
    "CO2(kg)",
];

const FUEL_EFFICIENCY_KM_PER_LITRE: f64 = 12.0;
const FUEL_PRICE_NAIRA_PER_LITRE: f64 = 650.0;
const CO2_KG_PER_LITRE: f64 = 2.3;

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub route_code: usize,
    pub time_code: usize,
    pub day_code: usize,
    pub distance_km: f64,
    pub avg_speed_kmh: f64,
    pub travel_time_mins: f64,
    pub fuel_cost_naira: f64,
    pub co2_kg: f64,
}

impl FeatureVector {
    /// The vector in MODEL_COLUMNS order.
    pub fn as_row(&self) -> [f64; 8] {
        [
            self.route_code as f64,
            self.time_code as f64,
            self.day_code as f64,
            self.distance_km,
            self.avg_speed_kmh,
            self.travel_time_mins,
            self.fuel_cost_naira,
            self.co2_kg,
        ]
    }
}

/// Builds one sample for classification. Fails on any category outside its
/// vocabulary; a non-positive speed falls back to 0.0 travel time instead of
/// dividing.
pub fn build(
    codec: &CategoryCodec,
    route: &str,
    time_of_day: &str,
    day_type: &str,
    distance_km: f64,
    avg_speed_kmh: f64,
) -> EngineResult<FeatureVector> {
    let route_code = codec.route().encode(route)?;
    let time_code = codec.time_of_day().encode(time_of_day)?;
    let day_code = codec.day_type().encode(day_type)?;

    let travel_time_mins = if avg_speed_kmh > 0.0 {
        round1(distance_km / avg_speed_kmh * 60.0)
    } else {
        0.0
    };
    let litres = distance_km / FUEL_EFFICIENCY_KM_PER_LITRE;

    Ok(FeatureVector {
        route_code,
        time_code,
        day_code,
        distance_km,
        avg_speed_kmh,
        travel_time_mins,
        fuel_cost_naira: round2(litres * FUEL_PRICE_NAIRA_PER_LITRE),
        co2_kg: round2(litres * CO2_KG_PER_LITRE),
    })
}

/// Half-up to one decimal. f64::round is half-away-from-zero, which is the
/// half-up behavior for the non-negative quantities used here.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Half-up to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CategoryCodec;

    fn mk_codec() -> CategoryCodec {
        CategoryCodec::new(
            vec!["Ikeja-Ojota".into(), "Lekki-Ajah".into()],
            vec!["Morning".into(), "Evening".into()],
            vec!["Weekday".into(), "Weekend".into()],
            vec!["High".into(), "Low".into(), "Medium".into()],
        )
    }

    #[test]
    fn test_travel_time_formula() {
        let codec = mk_codec();
        let fv = build(&codec, "Ikeja-Ojota", "Morning", "Weekday", 12.0, 30.0).unwrap();
        assert_eq!(fv.travel_time_mins, 24.0);

        let fv = build(&codec, "Ikeja-Ojota", "Morning", "Weekday", 10.0, 45.0).unwrap();
        // 10/45*60 = 13.333... -> 13.3
        assert_eq!(fv.travel_time_mins, 13.3);
    }

    #[test]
    fn test_zero_speed_falls_back_to_zero_time() {
        let codec = mk_codec();
        let fv = build(&codec, "Lekki-Ajah", "Evening", "Weekend", 15.0, 0.0).unwrap();
        assert_eq!(fv.travel_time_mins, 0.0);
    }

    #[test]
    fn test_fuel_and_co2_columns() {
        let codec = mk_codec();
        let fv = build(&codec, "Lekki-Ajah", "Morning", "Weekday", 15.0, 25.0).unwrap();
        // 15/12 = 1.25 litres
        assert_eq!(fv.fuel_cost_naira, 812.5);
        // 1.25 * 2.3 = 2.875 -> half-up -> 2.88
        assert_eq!(fv.co2_kg, 2.88);
    }

    #[test]
    fn test_row_order_matches_columns() {
        let codec = mk_codec();
        let fv = build(&codec, "Lekki-Ajah", "Evening", "Weekend", 15.0, 25.0).unwrap();
        let row = fv.as_row();
        assert_eq!(row.len(), MODEL_COLUMNS.len());
        assert_eq!(row[0], 1.0); // Lekki-Ajah
        assert_eq!(row[1], 1.0); // Evening
        assert_eq!(row[2], 1.0); // Weekend
        assert_eq!(row[3], 15.0);
        assert_eq!(row[4], 25.0);
    }

    #[test]
    fn test_unknown_category_produces_no_vector() {
        let codec = mk_codec();
        assert!(build(&codec, "Oshodi-Apapa", "Morning", "Weekday", 10.0, 30.0).is_err());
        assert!(build(&codec, "Ikeja-Ojota", "Dawn", "Weekday", 10.0, 30.0).is_err());
        assert!(build(&codec, "Ikeja-Ojota", "Morning", "Holiday", 10.0, 30.0).is_err());
    }

    #[test]
    fn test_half_up_rounding() {
        assert_eq!(round1(2.25), 2.3);
        assert_eq!(round1(0.04), 0.0);
        assert_eq!(round2(2.875), 2.88);
        assert_eq!(round2(812.504), 812.5);
    }
}
