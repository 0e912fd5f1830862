//! Demo driver: trains the point-region and digit classifiers with either strategy and
//! writes the resulting network plus its training history to an output directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use nnlab::samples::{argmax, DigitDataset, DigitSampler, PointRegion};
use nnlab::{
    train_loop, ActivationFunction, EvolutionConfig, EvolutionaryTrainer, Network, Objective,
    RandomSource, TrainConfig,
};

const POINT_TOPOLOGY: [usize; 5] = [2, 3, 4, 3, 2];
const DIGIT_TOPOLOGY: [usize; 5] = [28 * 28, 384, 192, 91, 10];

#[derive(Parser)]
#[command(name = "nnlab")]
#[command(about = "Train small perceptrons by gradient descent or by evolution", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify whether x + y lies in [-5, 5] using gradient descent
    PointBackprop {
        #[arg(long, default_value = "100000")]
        steps: usize,

        #[arg(long, default_value = "0.02")]
        learning_rate: f64,

        /// Fixed seed; the OS entropy source is used when omitted
        #[arg(long)]
        seed: Option<u64>,

        #[arg(short, long, default_value = "output")]
        out: PathBuf,
    },

    /// Classify whether x + y lies in [-5, 5] using the evolutionary trainer
    PointEvolve {
        #[arg(long, default_value = "100")]
        pool_size: usize,

        #[arg(long, default_value = "50")]
        selected: usize,

        #[arg(long, default_value = "50")]
        samples: usize,

        #[arg(long, default_value = "3000")]
        generations: usize,

        #[arg(long, default_value = "0.1")]
        mutation: f64,

        /// Rank by classification accuracy instead of cost
        #[arg(long)]
        accuracy: bool,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(short, long, default_value = "output")]
        out: PathBuf,
    },

    /// Train a digit classifier on the raw digit dataset using gradient descent
    DigitsBackprop {
        #[arg(long, default_value = "datasets/digit_images.bin")]
        images: PathBuf,

        #[arg(long, default_value = "datasets/digit_labels.bin")]
        labels: PathBuf,

        #[arg(long, default_value = "100000")]
        steps: usize,

        #[arg(long, default_value = "0.02")]
        learning_rate: f64,

        /// Feed pixels as 0-255 instead of scaling them to [0, 1]
        #[arg(long)]
        raw_pixels: bool,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(short, long, default_value = "output")]
        out: PathBuf,
    },

    /// Run a saved network on a JSON input vector and print the output
    Run {
        network: PathBuf,

        /// Input as a JSON array, e.g. "[1.5, -2]"
        input: String,
    },

    /// Print one dataset entry (1-based index, or random) as JSON
    Digit {
        index: Option<usize>,

        #[arg(long, default_value = "datasets/digit_images.bin")]
        images: PathBuf,

        #[arg(long, default_value = "datasets/digit_labels.bin")]
        labels: PathBuf,
    },

    /// Classify the k-th (1-based) dataset digit with a saved network
    Classify {
        index: usize,

        network: PathBuf,

        #[arg(long, default_value = "datasets/digit_images.bin")]
        images: PathBuf,

        #[arg(long, default_value = "datasets/digit_labels.bin")]
        labels: PathBuf,

        #[arg(long)]
        raw_pixels: bool,
    },
}

#[derive(Serialize)]
struct Classification {
    #[serde(rename = "Output")]
    output: usize,
    #[serde(rename = "GroundTruth")]
    ground_truth: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Commands::PointBackprop { steps, learning_rate, seed, out } => {
            let mut rng = rng(seed);
            let mut network = sigmoid_network(&POINT_TOPOLOGY)?;
            network.randomize(&mut rng, (-1.0, 1.0), (-1.0, 1.0));
            let mut points = PointRegion::new(rng.fork());
            let history = train_loop(&mut network, &mut points, &TrainConfig::new(steps, learning_rate))?;
            save(&out, &network, &history)?;
        }
        Commands::PointEvolve { pool_size, selected, samples, generations, mutation, accuracy, seed, out } => {
            let mut rng = rng(seed);
            let objective = if accuracy { Objective::MaximizeAccuracy } else { Objective::MinimizeCost };
            let config = EvolutionConfig::new(pool_size, selected, samples, generations)
                .with_mutation_magnitude(mutation)
                .with_objective(objective);
            let mut points = PointRegion::new(rng.fork());
            let mut trainer =
                EvolutionaryTrainer::new(config, &POINT_TOPOLOGY, &[ActivationFunction::Sigmoid; 4], rng)?;
            let history = trainer.run(&mut points)?;
            let Some(best) = trainer.into_best() else {
                bail!("no generations were run");
            };
            save(&out, &best.network, &history)?;
        }
        Commands::DigitsBackprop { images, labels, steps, learning_rate, raw_pixels, seed, out } => {
            let dataset = DigitDataset::load(&images, &labels).context("loading digit dataset")?;
            let mut rng = rng(seed);
            let mut network = sigmoid_network(&DIGIT_TOPOLOGY)?;
            network.randomize(&mut rng, (-1.0, 1.0), (-1.0, 1.0));
            let mut sampler = DigitSampler::new(&dataset, rng.fork());
            if raw_pixels {
                sampler = sampler.raw_pixels();
            }
            let history = train_loop(&mut network, &mut sampler, &TrainConfig::new(steps, learning_rate))?;
            save(&out, &network, &history)?;
        }
        Commands::Run { network, input } => {
            let network = Network::load_json(&network).with_context(|| format!("loading {}", network.display()))?;
            let input: Vec<f64> = serde_json::from_str(&input).context("parsing input vector")?;
            println!("{}", serde_json::to_string(&network.forward(&input)?)?);
        }
        Commands::Digit { index, images, labels } => {
            let dataset = DigitDataset::load(&images, &labels)?;
            let index = match index {
                Some(k) => one_based(k, dataset.len())?,
                None => RandomSource::from_entropy().index(dataset.len()),
            };
            let entry = dataset.entry(index).context("index out of range")?;
            println!("{}", serde_json::to_string(&entry)?);
        }
        Commands::Classify { index, network, images, labels, raw_pixels } => {
            let dataset = DigitDataset::load(&images, &labels)?;
            let network = Network::load_json(&network)?;
            let sample = dataset
                .sample_at(one_based(index, dataset.len())?, !raw_pixels)
                .context("index out of range")?;
            let result = Classification {
                output: argmax(&network.forward(&sample.input)?),
                ground_truth: argmax(&sample.target),
            };
            println!("{}", serde_json::to_string(&result)?);
        }
    }
    Ok(())
}

fn rng(seed: Option<u64>) -> RandomSource {
    seed.map_or_else(RandomSource::from_entropy, RandomSource::seeded)
}

fn sigmoid_network(layer_sizes: &[usize]) -> nnlab::Result<Network> {
    Network::new(layer_sizes, &vec![ActivationFunction::Sigmoid; layer_sizes.len() - 1])
}

fn one_based(k: usize, len: usize) -> Result<usize> {
    if k == 0 || k > len {
        bail!("index {k} is outside 1..={len}");
    }
    Ok(k - 1)
}

fn save<T: Serialize>(dir: &Path, network: &Network, history: &[T]) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    network.save_json(dir.join("network.json"))?;
    fs::write(dir.join("history.json"), serde_json::to_string(history)?)?;
    info!("wrote network and training history to {}", dir.display());
    Ok(())
}
