use crate::label::{Label, LabelUniverse, ProbabilityDistribution};
use image::RgbImage;

/// Outcome of classifying one image: the most probable label, its position in
/// the label universe and the full distribution it was picked from.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    label: Label,
    index: usize,
    distribution: ProbabilityDistribution,
}

impl Prediction {
    /// Picks the argmax of `distribution`. Returns `None` when no label has a
    /// usable (non NaN) probability.
    pub fn from_distribution(distribution: ProbabilityDistribution) -> Option<Self> {
        let index = distribution.argmax()?;
        let label = distribution.entries()[index].0.clone();

        Some(Self {
            label,
            index,
            distribution,
        })
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn probability(&self) -> f32 {
        self.distribution.entries()[self.index].1
    }

    pub fn distribution(&self) -> &ProbabilityDistribution {
        &self.distribution
    }
}

pub trait ImageClassifier: Send + Sync {
    /// The ordered label universe. Available before any prediction.
    fn labels(&self) -> &LabelUniverse;

    fn predict(
        &self,
        image: &RgbImage,
    ) -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>>;
}
