use crate::*;
use incognito_core::*;
use serde::Deserialize;
use serde::Serialize;

/// Engine parameters, defaulting to the constants in `incognito_core`.
///
/// Every field is optional when deserializing, so a config file only
/// needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-decision discount folded into back-propagated returns.
    pub discount: Utility,
    /// Floor on the running-mean step size. `None` keeps a plain average.
    pub decay: Option<Probability>,
    /// Root samples required before a query is answered.
    pub min_root_samples: u32,
    /// Samples the queried entry must hold before it is returned.
    pub min_entry_samples: u32,
    /// How off-tree players pick actions from approximator predictions.
    pub rollout: Rollout,
    /// Seed for the manager's random source.
    pub seed: u64,
    /// Approximator hyperparameters.
    pub hyper: Hyper,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discount: DISCOUNT,
            decay: None,
            min_root_samples: MIN_ROOT_SAMPLES,
            min_entry_samples: MIN_ENTRY_SAMPLES,
            rollout: Rollout::Softmax {
                temperature: ROLLOUT_TEMPERATURE,
            },
            seed: SEED,
            hyper: Hyper::default(),
        }
    }
}

/// Hyperparameters of the [`Perceptron`] approximator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hyper {
    pub hidden: usize,
    pub learning_rate: f32,
    pub momentum: f32,
    /// Variance assumed for a single return in the regression loss.
    pub variance: f32,
    /// Weight of the message-likelihood loss against the regression loss.
    pub message_weight: f32,
    /// Softmax temperature of the modelled opponent policy.
    pub temperature: Entropy,
    /// New samples that must be buffered before a training round.
    pub threshold: usize,
    /// Capacity of each replay ring buffer.
    pub capacity: usize,
    /// Gradient steps per training round.
    pub steps: usize,
}

impl Default for Hyper {
    fn default() -> Self {
        Self {
            hidden: HIDDEN_WIDTH,
            learning_rate: LEARNING_RATE,
            momentum: MOMENTUM,
            variance: ASSUMED_VARIANCE,
            message_weight: MESSAGE_WEIGHT,
            temperature: ROLLOUT_TEMPERATURE,
            threshold: TRAINING_THRESHOLD,
            capacity: REPLAY_CAPACITY,
            steps: TRAINING_STEPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = serde_json::from_str::<Config>(
            r#"{ "discount": 0.5, "rollout": "Greedy", "hyper": { "hidden": 4 } }"#,
        )
        .expect("valid config");
        assert_eq!(config.discount, 0.5);
        assert_eq!(config.rollout, Rollout::Greedy);
        assert_eq!(config.hyper.hidden, 4);
        assert_eq!(config.hyper.momentum, MOMENTUM);
        assert_eq!(config.min_root_samples, MIN_ROOT_SAMPLES);
        assert_eq!(config.decay, None);
    }

    #[test]
    fn softmax_rollout_parses_temperature() {
        let config = serde_json::from_str::<Config>(
            r#"{ "rollout": { "Softmax": { "temperature": 2.0 } } }"#,
        )
        .expect("valid config");
        assert_eq!(config.rollout, Rollout::Softmax { temperature: 2.0 });
    }
}
