use crate::app::context::{LabelContent, Submission};
use crate::config::Config;
use crate::label::LabelUniverse;
use std::io::{self, Write};

const FILLED: char = '█';
const EMPTY: char = '░';
const MAX_BAR_WIDTH: usize = 200;

/// Plain text presentation of submissions for a terminal.
#[derive(Debug, Clone)]
pub struct Render {
    bar_width: usize,
}

impl Render {
    pub fn new(config: &Config) -> Self {
        Self {
            bar_width: config.probability_bar_width.clamp(1, MAX_BAR_WIDTH),
        }
    }

    pub fn render_labels<W: Write>(&self, out: &mut W, labels: &LabelUniverse) -> io::Result<()> {
        let names: Vec<&str> = labels.iter().map(|l| l.as_str()).collect();
        writeln!(out, "Classifiable labels: {}", names.join(", "))
    }

    /// Prediction box, ranked probabilities and the content panel. `content`
    /// overrides the panel when the user asked for another label.
    pub fn render_submission<W: Write>(
        &self,
        out: &mut W,
        submission: &Submission,
        content: Option<&LabelContent>,
    ) -> io::Result<()> {
        let (width, height) = submission.image_dimensions;
        let rule = "─".repeat(self.bar_width + 12);

        writeln!(out, "Input image: {}x{}", width, height)?;
        writeln!(out, "┌{}", rule)?;
        writeln!(out, "│ Prediction: {}", submission.prediction.label())?;
        writeln!(out, "└{}", rule)?;
        writeln!(out)?;

        writeln!(out, "Probabilities")?;
        let label_width = submission
            .ranked
            .iter()
            .map(|(label, _)| label.as_str().chars().count())
            .max()
            .unwrap_or(0);
        for (label, probability) in &submission.ranked {
            let marker = if label == submission.prediction.label() {
                '>'
            } else {
                ' '
            };
            writeln!(
                out,
                "{} {:<label_width$} {:>7.2}% {}",
                marker,
                label.as_str(),
                probability * 100.0,
                self.probability_bar(*probability),
            )?;
        }
        writeln!(out)?;

        self.render_content(out, content.unwrap_or(&submission.content))
    }

    pub fn render_content<W: Write>(&self, out: &mut W, content: &LabelContent) -> io::Result<()> {
        writeln!(out, "Content for `{}`", content.label)?;

        if content.is_empty() {
            return writeln!(
                out,
                "  No content for label `{}` yet. Add it to the content table.",
                content.label
            );
        }

        for text in &content.texts {
            writeln!(out, "  Text:  {}", text)?;
        }
        for image in &content.images {
            writeln!(out, "  Image: {}", describe_image_source(image))?;
        }
        for video in &content.videos {
            match video.thumbnail_url() {
                Some(thumbnail) => {
                    writeln!(out, "  Video: {} (thumbnail {})", video.url(), thumbnail)?
                }
                None => writeln!(out, "  Video: {}", video.url())?,
            }
        }

        Ok(())
    }

    fn probability_bar(&self, probability: f32) -> String {
        let filled = (probability.clamp(0.0, 1.0) * self.bar_width as f32).round() as usize;
        let filled = filled.min(self.bar_width);

        let mut bar = String::with_capacity(self.bar_width * 3);
        bar.extend(std::iter::repeat(FILLED).take(filled));
        bar.extend(std::iter::repeat(EMPTY).take(self.bar_width - filled));
        bar
    }
}

/// Remote URLs print as-is, inline `data:` images are summarized by media
/// type and decoded size.
pub fn describe_image_source(reference: &str) -> String {
    match reference.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest.split_once(',').unwrap_or((rest, ""));
            let media_type = header.split(';').next().unwrap_or("");
            let media_type = if media_type.is_empty() {
                "unknown type"
            } else {
                media_type
            };
            format!(
                "inline {} ({} bytes)",
                media_type,
                data_uri_payload_size(header, payload)
            )
        }
        None => reference.to_string(),
    }
}

/// Byte length of a `data:` payload once decoded, without decoding it.
fn data_uri_payload_size(header: &str, payload: &str) -> usize {
    if header.ends_with(";base64") {
        let digits = payload
            .trim_end_matches('=')
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .count();
        return digits * 3 / 4;
    }

    // Percent-encoded: every `%XX` escape stands for one byte.
    let escapes = payload.matches('%').count();
    payload.len().saturating_sub(escapes * 2)
}
