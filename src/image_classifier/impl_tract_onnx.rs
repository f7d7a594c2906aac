use crate::image_classifier::interface::{ImageClassifier, Prediction};
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::tract::image::resize_image_to_tensor;
use crate::label::{LabelError, LabelUniverse, ProbabilityDistribution};
use crate::library::logger::interface::Logger;
use image::RgbImage;
use std::sync::Arc;
use tract_onnx::prelude::*;

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("model produced no output tensor")]
    NoOutput,
    #[error("model produced {actual} scores for {expected} labels")]
    OutputMismatch { expected: usize, actual: usize },
    #[error("model output has no usable probability")]
    NoUsableProbability,
    #[error(transparent)]
    Labels(#[from] LabelError),
}

/// Runs a single image classification ONNX model through tract.
///
/// The model is expected to take a `[1, 3, height, width]` float input in
/// [0, 1] and return one score per label, in `labels.txt` order.
pub struct ImageClassifierTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    labels: LabelUniverse,
    config: ModelConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierTractOnnx {
    pub fn new(
        config: ModelConfig,
        labels: LabelUniverse,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let logger = logger.with_namespace("image_classifier").with_namespace("tract_onnx");
        let (height, width) = config.input_shape;

        logger.info(&format!(
            "Loading model {} ({} labels, input {}x{})",
            config.onnx_model_path.display(),
            labels.len(),
            width,
            height
        ))?;

        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)?
            .with_input_fact(0, f32::fact([1, 3, height as usize, width as usize]).into())?
            .into_optimized()?
            .into_runnable()?;

        logger.info("Model loaded")?;

        Ok(Self {
            model,
            labels,
            config,
            logger,
        })
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn labels(&self) -> &LabelUniverse {
        &self.labels
    }

    fn predict(
        &self,
        image: &RgbImage,
    ) -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>> {
        let (height, width) = self.config.input_shape;

        let input = resize_image_to_tensor(image, width, height);

        let outputs = self.model.run(tvec!(input.into_tvalue()))?;

        let output = outputs.first().ok_or(ClassifierError::NoOutput)?;
        let scores: Vec<f32> = output.to_array_view::<f32>()?.iter().copied().collect();

        let prediction = prediction_from_scores(&self.labels, &scores)?;

        self.logger.info(&format!(
            "Predicted {} ({:.2}%)",
            prediction.label(),
            prediction.probability() * 100.0
        ))?;

        Ok(prediction)
    }
}

/// Turns one raw score per label into a `Prediction`.
pub fn prediction_from_scores(
    labels: &LabelUniverse,
    scores: &[f32],
) -> Result<Prediction, ClassifierError> {
    if scores.len() != labels.len() {
        return Err(ClassifierError::OutputMismatch {
            expected: labels.len(),
            actual: scores.len(),
        });
    }

    let probabilities = to_probabilities(scores);

    let distribution = ProbabilityDistribution::new(labels, &probabilities)?;

    Prediction::from_distribution(distribution).ok_or(ClassifierError::NoUsableProbability)
}

/// Passes scores through when they already form a distribution, otherwise
/// treats them as logits and applies softmax.
pub fn to_probabilities(scores: &[f32]) -> Vec<f32> {
    let in_range = scores.iter().all(|s| (0.0..=1.0).contains(s));
    let total: f32 = scores.iter().sum();

    if in_range && (total - 1.0).abs() < 1e-3 {
        return scores.to_vec();
    }

    softmax(scores)
}

pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores
        .iter()
        .copied()
        .filter(|s| !s.is_nan())
        .fold(f32::NEG_INFINITY, f32::max);

    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f32 = exps.iter().filter(|e| !e.is_nan()).sum();

    exps.iter().map(|e| e / total).collect()
}
