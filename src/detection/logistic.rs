use super::{PathHeuristics, ThreatClassifier, TrainingOutcome};
use crate::models::{ScanHistoryItem, Severity};
use crate::SentinelResult;

/// Fewer threats than this and the model stays untrained
pub const MIN_TRAINING_SAMPLES: usize = 5;

const EPOCHS: usize = 200;
const LEARNING_RATE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Weights {
    w: [f64; 2],
    bias: f64,
}

impl Weights {
    fn predict(&self, x: [f64; 2]) -> f64 {
        sigmoid(self.w[0] * x[0] + self.w[1] * x[1] + self.bias)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Two-feature logistic regression fitted by batch gradient descent.
///
/// Training rows are `(category index, severity rank)` of historical threats,
/// both scaled to `0..=1`, labelled dangerous when above medium severity.
/// Paths are projected onto the same two inputs: download location, and the
/// share of executable/keyword traits present.
pub struct LogisticClassifier {
    heuristics: PathHeuristics,
    weights: Option<Weights>,
}

impl LogisticClassifier {
    pub fn new() -> SentinelResult<Self> {
        Ok(Self {
            heuristics: PathHeuristics::new()?,
            weights: None,
        })
    }

    fn fit(samples: &[([f64; 2], f64)]) -> Weights {
        let mut weights = Weights {
            w: [0.0, 0.0],
            bias: 0.0,
        };
        let n = samples.len() as f64;

        for _ in 0..EPOCHS {
            let mut grad = [0.0, 0.0];
            let mut grad_bias = 0.0;

            for (x, y) in samples {
                let error = weights.predict(*x) - y;
                grad[0] += error * x[0];
                grad[1] += error * x[1];
                grad_bias += error;
            }

            weights.w[0] -= LEARNING_RATE * grad[0] / n;
            weights.w[1] -= LEARNING_RATE * grad[1] / n;
            weights.bias -= LEARNING_RATE * grad_bias / n;
        }

        weights
    }
}

impl ThreatClassifier for LogisticClassifier {
    fn name(&self) -> &str {
        "logistic"
    }

    fn train(&mut self, history: &[ScanHistoryItem]) -> TrainingOutcome {
        let samples: Vec<([f64; 2], f64)> = history
            .iter()
            .flat_map(|scan| scan.threats.iter())
            .map(|threat| {
                let x = [
                    f64::from(threat.category.index()) / 9.0,
                    f64::from(threat.severity.rank()) / 3.0,
                ];
                let y = if threat.severity > Severity::Medium { 1.0 } else { 0.0 };
                (x, y)
            })
            .collect();

        if samples.len() < MIN_TRAINING_SAMPLES {
            log::info!(
                "Not enough threat data to train a model ({} < {})",
                samples.len(),
                MIN_TRAINING_SAMPLES
            );
            return TrainingOutcome::InsufficientData {
                samples: samples.len(),
                required: MIN_TRAINING_SAMPLES,
            };
        }

        let weights = Self::fit(&samples);
        log::info!(
            "Threat detection model trained on {} samples (w={:?}, b={:.3})",
            samples.len(),
            weights.w,
            weights.bias
        );
        self.weights = Some(weights);

        TrainingOutcome::Trained {
            samples: samples.len(),
        }
    }

    fn score_path(&self, path: &str) -> f64 {
        let Some(weights) = self.weights else {
            log::debug!("Threat model not initialized");
            return 0.0;
        };

        let features = self.heuristics.features(path);
        let traits = u8::from(features.executable_extension) + u8::from(features.suspicious_keyword);
        let x = [
            if features.download_location { 1.0 } else { 0.0 },
            f64::from(traits) / 2.0,
        ];

        weights.predict(x)
    }

    fn is_ready(&self) -> bool {
        self.weights.is_some()
    }
}
