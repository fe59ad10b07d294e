
// Declare your algorithm modules
pub mod common_types;
pub mod perceptron;

pub use common_types::DataPoint;
pub use perceptron::classifier::{activation, classify, dot_product};
pub use perceptron::trainer::{random_weights, PerceptronTrainer, TrainOutcome, TrainingEvent};
pub use perceptron::PerceptronError;

// --- Optional Python binding surface (enable the `python` feature) ---
#[cfg(feature = "python")]
mod python {
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::common_types::DataPoint;
    use crate::perceptron::classifier;
    use crate::perceptron::trainer::{PerceptronTrainer, TrainingEvent};

    /// Classifies a single input vector against a weight vector and bias.
    #[pyfunction]
    fn classify_py(input: Vec<f64>, weights: Vec<f64>, bias: f64) -> PyResult<f64> {
        classifier::classify(&input, &weights, bias)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Generates a random initial weight vector with components in [-1, 1).
    #[pyfunction]
    fn random_weights_py(dimensions: usize) -> PyResult<Vec<f64>> {
        Ok(crate::perceptron::trainer::random_weights(dimensions))
    }

    #[pyclass(name = "PerceptronTrainer")]
    struct PyPerceptronTrainer {
        trainer: PerceptronTrainer<f64>,
    }

    #[pymethods]
    impl PyPerceptronTrainer {
        #[new]
        #[pyo3(signature = (bias, max_sweeps = None))]
        fn new(bias: f64, max_sweeps: Option<usize>) -> Self {
            PyPerceptronTrainer {
                trainer: PerceptronTrainer { bias, max_sweeps },
            }
        }

        /// Trains on `(features, label)` tuples and returns the final weights
        /// plus the event trace as `(kind, features_or_None)` tuples.
        fn train(
            &self,
            dataset: Vec<(Vec<f64>, f64)>,
            initial_weights: Vec<f64>,
        ) -> PyResult<(Vec<f64>, Vec<(String, Option<Vec<f64>>)>)> {
            let data: Vec<DataPoint<f64, f64>> = dataset
                .into_iter()
                .map(|(features, label)| DataPoint::new(features, label))
                .collect();

            let outcome = self
                .trainer
                .train(&data, initial_weights)
                .map_err(|e| PyValueError::new_err(e.to_string()))?;

            let events = outcome
                .events
                .into_iter()
                .map(|event| match event {
                    TrainingEvent::CorrectClassification { input } => {
                        ("correct".to_string(), Some(input))
                    }
                    TrainingEvent::FalsePositive { input } => {
                        ("false_positive".to_string(), Some(input))
                    }
                    TrainingEvent::FalseNegative { input } => {
                        ("false_negative".to_string(), Some(input))
                    }
                    TrainingEvent::SweepIncomplete => ("sweep_incomplete".to_string(), None),
                    TrainingEvent::SweepComplete => ("sweep_complete".to_string(), None),
                })
                .collect();

            Ok((outcome.weights, events))
        }
    }

    /// A Python module implemented in Rust. The name of this function must
    /// match the `lib.name` in `Cargo.toml`.
    #[pymodule]
    fn perceptron(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(classify_py, m)?)?;
        m.add_function(wrap_pyfunction!(random_weights_py, m)?)?;
        m.add_class::<PyPerceptronTrainer>()?;
        Ok(())
    }
}
