use crate::image_classifier::interface::{ImageClassifier, Prediction};
use crate::label::{LabelUniverse, ProbabilityDistribution};
use crate::library::logger::interface::Logger;
use image::RgbImage;
use rand::distr::{Distribution, Uniform};
use std::sync::Arc;

/// Produces a random distribution over its labels. Lets the whole pipeline
/// run without a model file.
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    labels: LabelUniverse,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, labels: LabelUniverse) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            labels,
        }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn labels(&self) -> &LabelUniverse {
        &self.labels
    }

    fn predict(
        &self,
        image: &RgbImage,
    ) -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!(
            "Classifying {}x{} image with fake classifier...",
            image.width(),
            image.height()
        ))?;

        let mut rng = rand::rng();

        let weight_dist = Uniform::new(0.0f32, 1.0)?;

        let weights: Vec<f32> = (0..self.labels.len())
            .map(|_| weight_dist.sample(&mut rng))
            .collect();

        let total: f32 = weights.iter().sum();

        let probabilities: Vec<f32> = if total > 0.0 {
            weights.iter().map(|w| w / total).collect()
        } else {
            vec![1.0 / self.labels.len() as f32; self.labels.len()]
        };

        let distribution = ProbabilityDistribution::new(&self.labels, &probabilities)?;

        let prediction = Prediction::from_distribution(distribution)
            .ok_or("fake classifier produced no usable probability")?;

        Ok(prediction)
    }
}
