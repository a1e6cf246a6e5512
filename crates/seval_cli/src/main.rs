//! seval CLI for inspecting labelled image sets and generating mosaic batches.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seval_core::ImageLayout;
use seval_data::{read_images_npy, read_labels, ImageDataset, LabelValue};
use seval_mosaic::{MosaicComposer, MosaicConfig};

#[derive(Parser)]
#[command(name = "seval")]
#[command(author, version)]
#[command(about = "Saliency evaluation toolkit - build labelled mosaic batches from image datasets")]
#[command(long_about = "seval: tools for evaluating explanation methods.

EXAMPLES:
  # Summarise a dataset
  seval inspect --images x_test.npy --labels y_test.npy

  # Build 10 mosaics per class with a fixed seed
  seval mosaic --images x_test.npy --labels y_test.npy --per-class 10 --seed 42 --output ./mosaics

  # Channels-first images, settings from a JSON config
  seval mosaic --images x.npy --labels y.json --layout chw --config mosaic.json --output ./out

OUTPUT:
  mosaics.npy   stacked mosaics (count, ...) in the input layout
  records.json  per-mosaic source indices, quadrant labels, membership flags, target class")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a mosaic batch
    Mosaic {
        /// Image array (.npy) of shape (N, ...)
        #[arg(long, value_name = "FILE")]
        images: PathBuf,

        /// Labels (.npy integers or .json array)
        #[arg(long, value_name = "FILE")]
        labels: PathBuf,

        /// Mosaics per class (overrides the config file)
        #[arg(long, value_name = "N")]
        per_class: Option<usize>,

        /// Random seed for reproducibility (overrides the config file)
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,

        /// Per-image axis layout: hw, hwc, chw
        #[arg(long, default_value = "hwc", value_name = "LAYOUT")]
        layout: String,

        /// JSON file with a mosaic configuration
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output directory
        #[arg(long, default_value = "./mosaics", value_name = "DIR")]
        output: PathBuf,
    },
    /// Show dataset summary
    Inspect {
        /// Image array (.npy) of shape (N, ...)
        #[arg(long, value_name = "FILE")]
        images: PathBuf,

        /// Labels (.npy integers or .json array)
        #[arg(long, value_name = "FILE")]
        labels: PathBuf,

        /// Per-image axis layout: hw, hwc, chw
        #[arg(long, default_value = "hwc", value_name = "LAYOUT")]
        layout: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::from_level(log_level))
        .init();

    match cli.command {
        Commands::Mosaic {
            images,
            labels,
            per_class,
            seed,
            layout,
            config,
            output,
        } => handle_mosaic(&images, &labels, per_class, seed, &layout, config.as_deref(), &output),
        Commands::Inspect {
            images,
            labels,
            layout,
        } => handle_inspect(&images, &labels, &layout),
    }
}

fn load_dataset(images: &Path, labels: &Path, layout: &str) -> Result<ImageDataset<LabelValue>> {
    let layout: ImageLayout = layout.parse()?;

    let x = read_images_npy(images)
        .with_context(|| format!("Failed to read images from {}", images.display()))?;
    let y = read_labels(labels)
        .with_context(|| format!("Failed to read labels from {}", labels.display()))?;

    tracing::info!(images = ?x.shape(), labels = y.len(), %layout, "Loaded dataset");

    Ok(ImageDataset::new(x, y, layout)?)
}

fn load_config(
    path: Option<&Path>,
    per_class: Option<usize>,
    seed: Option<u64>,
) -> Result<MosaicConfig<LabelValue>> {
    let mut config = match path {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open config {}", path.display()))?;
            serde_json::from_reader(std::io::BufReader::new(file))
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => {
            let Some(per_class) = per_class else {
                bail!("--per-class is required when no --config is given");
            };
            MosaicConfig::new(per_class)
        }
    };

    if let Some(per_class) = per_class {
        config.mosaics_per_class = per_class;
    }
    if seed.is_some() {
        config.seed = seed;
    }

    Ok(config)
}

fn handle_mosaic(
    images: &Path,
    labels: &Path,
    per_class: Option<usize>,
    seed: Option<u64>,
    layout: &str,
    config: Option<&Path>,
    output: &Path,
) -> Result<()> {
    let config = load_config(config, per_class, seed)?;
    let composer = MosaicComposer::new(config)?;
    let dataset = load_dataset(images, labels, layout)?;

    let batch = composer.compose(&dataset)?;

    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let mosaics_path = output.join("mosaics.npy");
    ndarray_npy::write_npy(&mosaics_path, batch.mosaics())
        .with_context(|| format!("Failed to write {}", mosaics_path.display()))?;

    let records_path = output.join("records.json");
    let file = std::fs::File::create(&records_path)
        .with_context(|| format!("Failed to create {}", records_path.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), batch.records())
        .with_context(|| format!("Failed to write {}", records_path.display()))?;

    println!(
        "Wrote {} mosaics of shape {:?} to {}",
        batch.len(),
        batch.mosaic_shape(),
        output.display()
    );

    Ok(())
}

fn handle_inspect(images: &Path, labels: &Path, layout: &str) -> Result<()> {
    let dataset = load_dataset(images, labels, layout)?;

    println!("Samples:     {}", dataset.len());
    println!("Image shape: {}", dataset.image_shape());
    println!("Classes:");
    println!("─────────────────────────");
    for (label, count) in dataset.class_counts() {
        println!("  {:<16} {:>6}", label.to_string(), count);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_config_from_flags() {
        let config = load_config(None, Some(3), Some(9)).unwrap();
        assert_eq!(config.mosaics_per_class, 3);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.classes, None);
    }

    #[test]
    fn test_load_config_requires_count() {
        assert!(load_config(None, None, Some(9)).is_err());
    }

    #[test]
    fn test_load_config_file_with_overrides() {
        let file = config_file(r#"{"mosaics_per_class": 2, "seed": 5, "classes": [1, "cat"]}"#);

        let config = load_config(Some(file.path()), None, None).unwrap();
        assert_eq!(config.mosaics_per_class, 2);
        assert_eq!(config.seed, Some(5));
        assert_eq!(
            config.classes,
            Some(vec![LabelValue::Int(1), LabelValue::from("cat")])
        );

        let config = load_config(Some(file.path()), Some(8), Some(0)).unwrap();
        assert_eq!(config.mosaics_per_class, 8);
        assert_eq!(config.seed, Some(0));
        assert!(config.classes.is_some());
    }

    #[test]
    fn test_load_config_rejects_malformed_file() {
        let file = config_file(r#"{"seed": 5}"#);
        assert!(load_config(Some(file.path()), Some(1), None).is_err());
    }
}
