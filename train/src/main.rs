//! モルフレキシコンを学習するユーティリティ
//!
//! このバイナリは、単語頻度コーパスからモルフのレキシコンを学習し、
//! 全体コストとリーフモルフの一覧を標準出力に出力します。

use std::error::Error;
use std::fs::File;
use std::io;
use std::path::PathBuf;

use morfessor::{AlgorithmMode, Corpus, Trainer};

use clap::Parser;

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "train", about = "Learns a morph lexicon")]
struct Args {
    /// Training corpus (lines of "<frequency> <word>").
    #[clap(short = 'i', long)]
    corpus: PathBuf,

    /// Algorithm mode. Choices are baseline, baseline-freq,
    /// baseline-length, and baseline-freq-length.
    #[clap(short = 'm', long, default_value = "baseline-freq-length")]
    mode: AlgorithmMode,

    /// Convergence threshold of the optimizer.
    #[clap(short = 'e', long, default_value = "0.005")]
    epsilon: f64,

    /// Hapax legomena prior of the explicit frequency cost.
    #[clap(short = 'p', long, default_value = "0.5")]
    hapax_prior: f64,

    /// Random seed for the epoch permutations.
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// Writes the segmentation forest in DOT format to the given file.
    #[clap(short = 'd', long)]
    dot: Option<PathBuf>,
}

/// メイン関数
///
/// コーパスを読み込んで学習を実行し、リーフモルフのレポートを
/// 標準出力に出力します。
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Reading the corpus...");
    let corpus = Corpus::from_reader(File::open(args.corpus)?)?;

    eprintln!("Training on {} words...", corpus.len());
    let mut trainer = Trainer::new(args.mode)
        .convergence_threshold(args.epsilon)
        .hapax_legomena_prior(args.hapax_prior);
    if let Some(seed) = args.seed {
        trainer = trainer.seed(seed);
    }
    let model = trainer.train(&corpus)?;

    let stdout = io::stdout();
    model.write_report(stdout.lock())?;

    if let Some(path) = args.dot {
        eprintln!("Writing the segmentation forest...");
        model.write_dot(File::create(path)?)?;
    }

    Ok(())
}
