use serde::{Deserialize, Serialize};

/// Coefficients of the evaluator's linear combination.
///
/// Every term is oriented so that larger is better, so all shipped weights are
/// non-negative. Weights are fixed at compile time; a JSON file with the same field
/// names can override them (missing fields fall back to [`EvaluationWeights::DEFAULT`]).
///
/// ```
/// use twozero_evaluator::weights::EvaluationWeights;
///
/// let weights: EvaluationWeights = serde_json::from_str(r#"{ "islands": 0.5 }"#).unwrap();
/// assert_eq!(weights.islands, 0.5);
/// assert_eq!(weights.emptiness, EvaluationWeights::DEFAULT.emptiness);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluationWeights {
    pub smoothness: f32,
    pub monotonicity: f32,
    pub emptiness: f32,
    pub max_tile: f32,
    pub raw_score: f32,
    pub islands: f32,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl EvaluationWeights {
    pub const DEFAULT: Self = Self {
        smoothness: 0.1,
        monotonicity: 1.0,
        emptiness: 2.7,
        max_tile: 1.0,
        raw_score: 0.1,
        islands: 0.0,
    };

    /// [`Self::DEFAULT`] plus a penalty for fragmented boards.
    pub const WITH_ISLANDS: Self = Self {
        islands: 0.5,
        ..Self::DEFAULT
    };

    /// Weights that only reward smoothness: the score is the negated roughness.
    pub const SMOOTHNESS_ONLY: Self = Self {
        smoothness: 1.0,
        monotonicity: 0.0,
        emptiness: 0.0,
        max_tile: 0.0,
        raw_score: 0.0,
        islands: 0.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let json = serde_json::to_string(&EvaluationWeights::WITH_ISLANDS).unwrap();
        let weights: EvaluationWeights = serde_json::from_str(&json).unwrap();
        assert_eq!(weights, EvaluationWeights::WITH_ISLANDS);
    }

    #[test]
    fn test_empty_json_is_default() {
        let weights: EvaluationWeights = serde_json::from_str("{}").unwrap();
        assert_eq!(weights, EvaluationWeights::DEFAULT);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(serde_json::from_str::<EvaluationWeights>(r#"{ "holes": 1.0 }"#).is_err());
    }
}
