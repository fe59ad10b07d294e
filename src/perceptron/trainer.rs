//! The perceptron learning loop.
//!
//! Training repeatedly sweeps the dataset in its given order, classifying
//! each example with the current weights and correcting the weights on every
//! misclassification, until one full sweep produces zero misclassifications.
//! Every decision is recorded as a [`TrainingEvent`] so a presentation layer
//! can render the trace without the core knowing anything about text output.

use std::fmt::Debug;

use log::{debug, trace};
use num_traits::Float;
use rand::Rng;

use super::classifier;
use super::PerceptronError;
use crate::common_types::DataPoint;

/// One decision made during training, in the order it happened.
///
/// The event sequence is the trainer's observable contract; it never feeds
/// back into control flow.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrainingEvent<F> {
    /// The current weights classified this input correctly; no update.
    CorrectClassification { input: Vec<F> },
    /// Predicted 1 where the label was 0; the input was subtracted from
    /// the weights.
    FalsePositive { input: Vec<F> },
    /// Predicted 0 where the label was 1; the input was added to the
    /// weights.
    FalseNegative { input: Vec<F> },
    /// A sweep finished with at least one misclassification; another sweep
    /// follows.
    SweepIncomplete,
    /// A sweep finished with zero misclassifications; training halted.
    SweepComplete,
}

/// The result of a successful training run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainOutcome<F> {
    /// The converged weight vector.
    pub weights: Vec<F>,
    /// Every per-example and per-sweep decision, in order.
    pub events: Vec<TrainingEvent<F>>,
    /// Number of full sweeps performed, including the final clean one.
    pub sweeps: usize,
}

/// Trains a single-layer perceptron on an ordered dataset.
///
/// The bias is a fixed threshold for the whole run, not a learned
/// parameter. Weight updates are full-vector add/subtract of the offending
/// input (a fixed learning rate of 1.0), and each update replaces the
/// weight vector with a freshly built one rather than mutating in place.
#[derive(Debug, Clone)]
pub struct PerceptronTrainer<F> {
    /// Threshold subtracted from the dot product before thresholding.
    pub bias: F,
    /// Maximum number of sweeps before giving up, checked at each sweep
    /// boundary. `None` reproduces the reference behavior: on data that is
    /// not linearly separable the loop never returns.
    pub max_sweeps: Option<usize>,
}

impl<F> PerceptronTrainer<F>
where
    F: Float + std::iter::Sum + Debug,
{
    /// Creates a trainer with no sweep cap.
    ///
    /// Callers are responsible for only feeding this trainer linearly
    /// separable data; use [`PerceptronTrainer::with_max_sweeps`] to get an
    /// error instead of an infinite loop.
    pub fn new(bias: F) -> Self {
        PerceptronTrainer { bias, max_sweeps: None }
    }

    /// Creates a trainer that fails with `SweepLimitExceeded` if `max_sweeps`
    /// sweeps finish and misclassifications are still occurring.
    pub fn with_max_sweeps(bias: F, max_sweeps: usize) -> Self {
        PerceptronTrainer { bias, max_sweeps: Some(max_sweeps) }
    }

    /// Runs the learning loop to convergence.
    ///
    /// Sweeps `dataset` in order, classifying each example with the current
    /// weights. A false positive subtracts the input from the weights, a
    /// false negative adds it. After a sweep with any misclassification the
    /// dataset is re-traversed in the same order with the updated weights;
    /// after a clean sweep the current weights are returned together with
    /// the ordered event trace.
    ///
    /// An empty dataset converges trivially: the initial weights come back
    /// unchanged with an empty event trace and zero sweeps.
    ///
    /// # Errors
    /// - `PerceptronError::DimensionMismatch` if any input's length differs
    ///   from the weight vector's length. No weight update is performed for
    ///   the offending example; the whole run is aborted.
    /// - `PerceptronError::SweepLimitExceeded` if a sweep cap is configured
    ///   and reached before convergence.
    pub fn train<L>(
        &self,
        dataset: &[DataPoint<F, L>],
        initial_weights: Vec<F>,
    ) -> Result<TrainOutcome<F>, PerceptronError>
    where
        L: Into<F> + Copy,
    {
        let mut weights = initial_weights;
        let mut events = Vec::new();
        let mut sweeps = 0;

        if dataset.is_empty() {
            debug!("empty dataset, returning initial weights unchanged");
            return Ok(TrainOutcome { weights, events, sweeps });
        }

        loop {
            let mut misclassified_this_sweep = false;

            for point in dataset {
                let prediction = classifier::classify(&point.features, &weights, self.bias)?;
                let target: F = point.label.into();

                if prediction == target {
                    events.push(TrainingEvent::CorrectClassification {
                        input: point.features.clone(),
                    });
                } else if prediction > target {
                    weights = vector_sub(&weights, &point.features);
                    trace!("false positive on {:?}, weights now {:?}", point.features, weights);
                    events.push(TrainingEvent::FalsePositive { input: point.features.clone() });
                    misclassified_this_sweep = true;
                } else {
                    weights = vector_add(&weights, &point.features);
                    trace!("false negative on {:?}, weights now {:?}", point.features, weights);
                    events.push(TrainingEvent::FalseNegative { input: point.features.clone() });
                    misclassified_this_sweep = true;
                }
            }

            sweeps += 1;

            if misclassified_this_sweep {
                debug!("sweep {sweeps} had misclassifications, sweeping again");
                events.push(TrainingEvent::SweepIncomplete);
                if let Some(cap) = self.max_sweeps {
                    if sweeps >= cap {
                        return Err(PerceptronError::SweepLimitExceeded { sweeps });
                    }
                }
            } else {
                debug!("sweep {sweeps} was clean, converged with weights {:?}", weights);
                events.push(TrainingEvent::SweepComplete);
                return Ok(TrainOutcome { weights, events, sweeps });
            }
        }
    }
}

/// Builds the element-wise sum of two equal-length vectors as a new vector.
fn vector_add<F: Float>(a: &[F], b: &[F]) -> Vec<F> {
    a.iter().zip(b.iter()).map(|(&x, &y)| x + y).collect()
}

/// Builds the element-wise difference of two equal-length vectors as a new
/// vector.
fn vector_sub<F: Float>(a: &[F], b: &[F]) -> Vec<F> {
    a.iter().zip(b.iter()).map(|(&x, &y)| x - y).collect()
}

/// Generates a random initial weight vector with components uniform in
/// [-1, 1), for callers who want a random starting point instead of zeros.
pub fn random_weights(dimensions: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..dimensions).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

// --- Unit tests for the trainer ---
#[cfg(test)]
mod tests {
    use super::*;
    use TrainingEvent::{
        CorrectClassification, FalseNegative, FalsePositive, SweepComplete, SweepIncomplete,
    };

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn truth_table(labels: [f64; 4]) -> Vec<DataPoint<f64, f64>> {
        vec![
            DataPoint::new(vec![0.0, 0.0], labels[0]),
            DataPoint::new(vec![0.0, 1.0], labels[1]),
            DataPoint::new(vec![1.0, 0.0], labels[2]),
            DataPoint::new(vec![1.0, 1.0], labels[3]),
        ]
    }

    fn correct(x: [f64; 2]) -> TrainingEvent<f64> {
        CorrectClassification { input: x.to_vec() }
    }

    #[test]
    fn test_converges_on_and() {
        init_logs();
        let data = truth_table([0.0, 0.0, 0.0, 1.0]);
        let trainer = PerceptronTrainer::new(1.0);

        let outcome = trainer.train(&data, vec![0.0, 0.0]).unwrap();

        assert_eq!(outcome.weights, vec![1.0, 1.0]);
        assert_eq!(outcome.sweeps, 2);
        assert_eq!(
            outcome.events,
            vec![
                correct([0.0, 0.0]),
                correct([0.0, 1.0]),
                correct([1.0, 0.0]),
                FalseNegative { input: vec![1.0, 1.0] },
                SweepIncomplete,
                correct([0.0, 0.0]),
                correct([0.0, 1.0]),
                correct([1.0, 0.0]),
                correct([1.0, 1.0]),
                SweepComplete,
            ]
        );
    }

    #[test]
    fn test_converges_on_or() {
        init_logs();
        let data = truth_table([0.0, 1.0, 1.0, 1.0]);
        let trainer = PerceptronTrainer::new(1.0);

        let outcome = trainer.train(&data, vec![0.0, 0.0]).unwrap();

        assert_eq!(outcome.weights, vec![2.0, 2.0]);
        // two corrective sweeps, each with two false negatives, then a clean one
        assert_eq!(outcome.sweeps, 3);
        assert_eq!(
            outcome.events,
            vec![
                correct([0.0, 0.0]),
                FalseNegative { input: vec![0.0, 1.0] },
                FalseNegative { input: vec![1.0, 0.0] },
                correct([1.0, 1.0]),
                SweepIncomplete,
                correct([0.0, 0.0]),
                FalseNegative { input: vec![0.0, 1.0] },
                FalseNegative { input: vec![1.0, 0.0] },
                correct([1.0, 1.0]),
                SweepIncomplete,
                correct([0.0, 0.0]),
                correct([0.0, 1.0]),
                correct([1.0, 0.0]),
                correct([1.0, 1.0]),
                SweepComplete,
            ]
        );
    }

    #[test]
    fn test_false_positive_decrements_weights() {
        // weights already firing on everything; the 0-labeled example with a
        // positive activation must be subtracted
        let data = vec![DataPoint::new(vec![1.0, 1.0], 0.0_f64)];
        let trainer = PerceptronTrainer::new(0.5);

        let outcome = trainer.train(&data, vec![2.0, 2.0]).unwrap();

        assert_eq!(outcome.events[0], FalsePositive { input: vec![1.0, 1.0] });
        assert_eq!(outcome.weights, vec![1.0, 1.0]);
    }

    #[test]
    fn test_retraining_from_final_weights_converges_in_one_sweep() {
        let data = truth_table([0.0, 0.0, 0.0, 1.0]);
        let trainer = PerceptronTrainer::new(1.0);

        let first = trainer.train(&data, vec![0.0, 0.0]).unwrap();
        let second = trainer.train(&data, first.weights.clone()).unwrap();

        assert_eq!(second.sweeps, 1);
        assert_eq!(second.weights, first.weights);
        assert_eq!(second.events.last(), Some(&SweepComplete));
        assert!(
            second.events[..second.events.len() - 1]
                .iter()
                .all(|e| matches!(e, CorrectClassification { .. }))
        );
    }

    #[test]
    fn test_permuted_dataset_still_converges() {
        let mut data = truth_table([0.0, 0.0, 0.0, 1.0]);
        data.reverse();
        let trainer = PerceptronTrainer::with_max_sweeps(1.0, 100);

        let outcome = trainer.train(&data, vec![0.0, 0.0]).unwrap();

        // the trace differs from the in-order run but training still converges
        assert_eq!(outcome.events.last(), Some(&SweepComplete));
        for point in &data {
            let prediction =
                classifier::classify(&point.features, &outcome.weights, 1.0).unwrap();
            assert_eq!(prediction, point.label);
        }
    }

    #[test]
    fn test_empty_dataset_returns_initial_weights() {
        let data: Vec<DataPoint<f64, f64>> = Vec::new();
        let trainer = PerceptronTrainer::new(1.0);

        let outcome = trainer.train(&data, vec![0.5, -0.5]).unwrap();

        assert_eq!(outcome.weights, vec![0.5, -0.5]);
        assert!(outcome.events.is_empty());
        assert_eq!(outcome.sweeps, 0);
    }

    #[test]
    fn test_dimension_mismatch_aborts_run() {
        let data = vec![DataPoint::new(vec![1.0, 0.0, 1.0], 1.0_f64)];
        let trainer = PerceptronTrainer::new(1.0);

        let err = trainer.train(&data, vec![0.0, 0.0]).unwrap_err();

        assert_eq!(err, PerceptronError::DimensionMismatch { got: 3, expected: 2 });
    }

    #[test]
    fn test_sweep_cap_on_inseparable_data() {
        // XOR is not linearly separable; without a cap this would never halt
        let data = truth_table([0.0, 1.0, 1.0, 0.0]);
        let trainer = PerceptronTrainer::with_max_sweeps(1.0, 25);

        let err = trainer.train(&data, vec![0.0, 0.0]).unwrap_err();

        assert_eq!(err, PerceptronError::SweepLimitExceeded { sweeps: 25 });
    }

    #[test]
    fn test_separable_data_converges_within_generous_cap() {
        let fixtures = [
            truth_table([0.0, 0.0, 0.0, 1.0]),
            truth_table([0.0, 1.0, 1.0, 1.0]),
            truth_table([0.0, 0.0, 1.0, 1.0]), // label = first input
        ];
        let trainer = PerceptronTrainer::with_max_sweeps(1.0, 1000);

        for data in &fixtures {
            let outcome = trainer.train(data, vec![0.0, 0.0]).unwrap();
            assert!(outcome.sweeps < 1000);
            assert_eq!(outcome.events.last(), Some(&SweepComplete));
        }
    }

    #[test]
    fn test_random_weights_dimension_and_range() {
        let w = random_weights(8);
        assert_eq!(w.len(), 8);
        assert!(w.iter().all(|&x| (-1.0..1.0).contains(&x)));
    }
}
