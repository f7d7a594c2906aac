use app::context::AppContext;
use app::render::Render;
use clap::Parser;
use config::Config;
use content::table::ContentTable;
use error::Error;
use image_classifier::impl_fake::ImageClassifierFake;
use image_classifier::impl_tract_onnx::ImageClassifierTractOnnx;
use image_classifier::interface::ImageClassifier;
use label::{Label, LabelUniverse};
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

mod app;
mod config;
mod content;
mod error;
mod image_classifier;
mod image_decoder;
mod label;
mod library;
mod ranking;
mod video_link;

/// Classify a photo and show the curated content for its label
#[derive(Parser, Debug)]
#[command(name = "photo-label")]
#[command(version)]
struct Args {
    /// Image to classify (JPEG, PNG, WEBP or TIFF)
    image: PathBuf,

    /// TOML configuration file
    #[arg(short, long, env = "PHOTO_LABEL_CONFIG")]
    config: Option<PathBuf>,

    /// ONNX model, overrides the configuration
    #[arg(long)]
    model: Option<PathBuf>,

    /// labels.txt matching the model output, overrides the configuration
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Content table, overrides the configuration
    #[arg(long)]
    content: Option<PathBuf>,

    /// Show the content of this label instead of the predicted one
    #[arg(long)]
    show_label: Option<String>,

    /// Use the random fake classifier instead of the ONNX model
    #[arg(long)]
    fake: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_bad_submission() => {
            eprintln!("{}", e);
            eprintln!("Please submit another image.");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(model) = args.model {
        config.model.onnx_model_path = model;
    }
    if let Some(labels) = args.labels {
        config.model.labels_path = labels;
    }
    if let Some(content) = args.content {
        config.content_path = content;
    }

    let logger = Arc::new(LoggerConsole::new(config.logger_timezone()?));

    let image_classifier = load_classifier(&config, args.fake, logger.clone())?;

    let content_table = load_content_table(&config.content_path)?;

    let app = AppContext::new(logger.clone(), image_classifier, content_table);

    if let Some(label) = &args.show_label {
        check_show_label(app.labels(), label)?;
    }

    let bytes = std::fs::read(&args.image).map_err(|source| Error::Io {
        path: args.image.clone(),
        source,
    })?;

    let submission = app.submit(&bytes)?;

    let selected = args.show_label.as_deref().map(|label| app.content_for(label));

    let render = Render::new(&config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render
        .render_labels(&mut out, app.labels())
        .and_then(|_| render.render_submission(&mut out, &submission, selected.as_ref()))
        .map_err(Error::Output)?;

    Ok(())
}

fn check_show_label(labels: &LabelUniverse, label: &str) -> Result<(), Error> {
    if labels.contains(label) {
        return Ok(());
    }

    Err(Error::Config(format!(
        "unknown label `{}`, expected one of the classifiable labels",
        label
    )))
}

fn load_classifier(
    config: &Config,
    fake: bool,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Error> {
    if fake {
        let labels = LabelUniverse::new(config.fake_labels.iter().cloned().map(Label::from).collect())
            .map_err(|e| Error::Config(format!("fake_labels: {}", e)))?;
        return Ok(Arc::new(ImageClassifierFake::new(logger, labels)));
    }

    let labels_path = &config.model.labels_path;
    let text = std::fs::read_to_string(labels_path).map_err(|source| Error::Io {
        path: labels_path.clone(),
        source,
    })?;
    let labels = LabelUniverse::from_lines(&text)
        .map_err(|e| Error::Config(format!("{}: {}", labels_path.display(), e)))?;

    let classifier = ImageClassifierTractOnnx::new(config.model.clone(), labels, logger)
        .map_err(Error::Model)?;

    Ok(Arc::new(classifier))
}

fn load_content_table(path: &Path) -> Result<ContentTable, Error> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    ContentTable::from_toml_str(&text)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}
