use crate::content::resolver::resolve;
use crate::content::table::ContentTable;
use crate::error::Error;
use crate::image_classifier::interface::{ImageClassifier, Prediction};
use crate::image_decoder::decode;
use crate::label::{Label, LabelUniverse};
use crate::library::logger::interface::Logger;
use crate::ranking::rank;
use crate::video_link::{thumbnail_for, VideoLink};
use std::sync::Arc;

/// Content panel for one label, with video links already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelContent {
    pub label: Label,
    pub texts: Vec<String>,
    pub images: Vec<String>,
    pub videos: Vec<VideoLink>,
}

impl LabelContent {
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty() && self.images.is_empty() && self.videos.is_empty()
    }
}

/// Everything shown for one submitted image.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub image_dimensions: (u32, u32),
    pub prediction: Prediction,
    pub ranked: Vec<(Label, f32)>,
    pub content: LabelContent,
}

/// Read-only state shared by every submission: the loaded classifier, its
/// label universe and the content table. Built once at startup.
#[derive(Clone)]
pub struct AppContext {
    logger: Arc<dyn Logger + Send + Sync>,
    image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    content_table: Arc<ContentTable>,
}

impl AppContext {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        content_table: ContentTable,
    ) -> Self {
        let logger = logger.with_namespace("app");

        for label in content_table.unknown_labels(image_classifier.labels()) {
            let _ = logger.warn(&format!(
                "Content configured for `{}`, which the classifier never predicts",
                label
            ));
        }

        let uncovered = content_table.uncovered_labels(image_classifier.labels());
        if !uncovered.is_empty() {
            let names: Vec<&str> = uncovered.iter().map(|l| l.as_str()).collect();
            let _ = logger.info(&format!("No content configured for: {}", names.join(", ")));
        }

        Self {
            logger,
            image_classifier,
            content_table: Arc::new(content_table),
        }
    }

    pub fn labels(&self) -> &LabelUniverse {
        self.image_classifier.labels()
    }

    /// Decodes, classifies and ranks one image and resolves the content of the
    /// predicted label.
    pub fn submit(&self, bytes: &[u8]) -> Result<Submission, Error> {
        let _ = self
            .logger
            .info(&format!("Received submission of {} bytes", bytes.len()));

        let image = decode(bytes).inspect_err(|e| {
            let _ = self.logger.warn(&format!("Rejected submission: {}", e));
        })?;

        let prediction = self
            .image_classifier
            .predict(&image)
            .map_err(Error::Classify)?;

        let _ = self.logger.info(&format!(
            "Predicted `{}` (label #{}) with probability {:.4}",
            prediction.label(),
            prediction.index(),
            prediction.probability()
        ));

        let ranked = rank(prediction.distribution());
        let content = self.content_for(prediction.label().as_str());

        Ok(Submission {
            image_dimensions: image.dimensions(),
            prediction,
            ranked,
            content,
        })
    }

    /// Content panel for any label, not only the predicted one.
    pub fn content_for(&self, label: &str) -> LabelContent {
        let resolved = resolve(&self.content_table, label);

        if resolved.is_empty() {
            let _ = self
                .logger
                .info(&format!("No content available for `{}`", label));
        }

        LabelContent {
            label: Label::from(label),
            texts: resolved.texts,
            images: resolved.images,
            videos: resolved.videos.iter().map(|url| thumbnail_for(url)).collect(),
        }
    }
}
