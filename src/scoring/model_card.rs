use crate::types::{FeatureImportance, ModelMetrics};

/// Hand-authored importance table from the offline model.
///
/// This is not derived from `engine` weights and does not track them.
const FEATURE_IMPORTANCE: [(&str, f64); 6] = [
    ("Goals", 0.28),
    ("Assists", 0.22),
    ("Trophies Won", 0.18),
    ("Average Match Rating", 0.15),
    ("Minutes Played", 0.10),
    ("Appearances", 0.07),
];

const MODEL_METRICS: ModelMetrics = ModelMetrics {
    accuracy: 0.72,
    top3_accuracy: 0.89,
    top5_accuracy: 0.94,
    roc_auc: 0.86,
};

pub fn feature_importance() -> Vec<FeatureImportance> {
    FEATURE_IMPORTANCE
        .iter()
        .map(|(feature, importance)| FeatureImportance {
            feature: feature.to_string(),
            importance: *importance,
        })
        .collect()
}

pub fn model_metrics() -> ModelMetrics {
    MODEL_METRICS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importances_sum_to_one() {
        let total: f64 = feature_importance().iter().map(|f| f.importance).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_importances_ordered_descending() {
        let table = feature_importance();
        assert_eq!(table[0].feature, "Goals");
        for pair in table.windows(2) {
            assert!(pair[0].importance >= pair[1].importance);
        }
    }

    #[test]
    fn test_metrics_constants() {
        let metrics = model_metrics();
        assert_eq!(metrics.accuracy, 0.72);
        assert_eq!(metrics.roc_auc, 0.86);
    }
}
