// src/codec.rs
//
// Bidirectional mapping between the human-readable categorical values
// (route, time-of-day, day-type, congestion label) and the integer codes
// the classifier was trained with. The vocabularies are fixed at startup
// from the model artifact and never change afterwards.

use crate::error::{EngineError, EngineResult};

/// A closed, ordered set of labels for one categorical dimension.
/// Codes are positions in the training order.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    dimension: &'static str,
    labels: Vec<String>,
}

impl Vocabulary {
    pub fn new(dimension: &'static str, labels: Vec<String>) -> Self {
        Self { dimension, labels }
    }

    pub fn encode(&self, value: &str) -> EngineResult<usize> {
        self.labels
            .iter()
            .position(|label| label == value)
            .ok_or_else(|| EngineError::UnknownCategory {
                dimension: self.dimension,
                value: value.to_string(),
            })
    }

    pub fn decode(&self, code: usize) -> EngineResult<&str> {
        self.labels
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| EngineError::UnknownCategory {
                dimension: self.dimension,
                value: code.to_string(),
            })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// All four vocabularies: the three feature dimensions plus the target
/// labels used to decode the classifier's class index.
#[derive(Debug, Clone)]
pub struct CategoryCodec {
    route: Vocabulary,
    time_of_day: Vocabulary,
    day_type: Vocabulary,
    target: Vocabulary,
}

impl CategoryCodec {
    pub fn new(
        routes: Vec<String>,
        times_of_day: Vec<String>,
        day_types: Vec<String>,
        target_labels: Vec<String>,
    ) -> Self {
        Self {
            route: Vocabulary::new("route", routes),
            time_of_day: Vocabulary::new("time_of_day", times_of_day),
            day_type: Vocabulary::new("day_type", day_types),
            target: Vocabulary::new("congestion label", target_labels),
        }
    }

    pub fn route(&self) -> &Vocabulary {
        &self.route
    }

    pub fn time_of_day(&self) -> &Vocabulary {
        &self.time_of_day
    }

    pub fn day_type(&self) -> &Vocabulary {
        &self.day_type
    }

    pub fn target(&self) -> &Vocabulary {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_codec() -> CategoryCodec {
        CategoryCodec::new(
            vec![
                "CMS-Yaba".into(),
                "Ikeja-Ojota".into(),
                "Lekki-Ajah".into(),
            ],
            vec![
                "Afternoon".into(),
                "Evening".into(),
                "Morning".into(),
                "Night".into(),
            ],
            vec!["Weekday".into(), "Weekend".into()],
            vec!["High".into(), "Low".into(), "Medium".into()],
        )
    }

    #[test]
    fn test_encode_decode_identity() {
        let codec = mk_codec();
        for vocab in [
            codec.route(),
            codec.time_of_day(),
            codec.day_type(),
            codec.target(),
        ] {
            for label in vocab.labels().to_vec() {
                let code = vocab.encode(&label).unwrap();
                assert_eq!(vocab.decode(code).unwrap(), label);
            }
        }
    }

    #[test]
    fn test_encode_unknown_fails() {
        let codec = mk_codec();
        let err = codec.route().encode("Third-Mainland").unwrap_err();
        match err {
            crate::error::EngineError::UnknownCategory { dimension, value } => {
                assert_eq!(dimension, "route");
                assert_eq!(value, "Third-Mainland");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_out_of_range_fails() {
        let codec = mk_codec();
        assert!(codec.day_type().decode(2).is_err());
    }

    #[test]
    fn test_codes_follow_training_order() {
        let codec = mk_codec();
        assert_eq!(codec.target().encode("High").unwrap(), 0);
        assert_eq!(codec.target().encode("Low").unwrap(), 1);
        assert_eq!(codec.target().encode("Medium").unwrap(), 2);
    }
}
