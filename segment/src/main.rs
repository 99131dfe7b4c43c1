//! 未知語の分割を実行するユーティリティ
//!
//! このバイナリは、学習コーパスからモルフのレキシコンを学習し、
//! テストコーパスの各単語を空白区切りのモルフ列として標準出力に
//! 出力します。モデルは永続化されないため、分割のたびにその場で
//! 学習が実行されます。

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use morfessor::{AlgorithmMode, Corpus, Segmenter, Trainer};

use clap::Parser;

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "segment", about = "Segments words into morphs")]
struct Args {
    /// Training corpus (lines of "<frequency> <word>").
    #[clap(short = 'i', long)]
    corpus: PathBuf,

    /// Test corpus whose words are segmented.
    #[clap(short = 't', long)]
    test_corpus: PathBuf,

    /// Algorithm mode. Choices are baseline, baseline-freq,
    /// baseline-length, and baseline-freq-length.
    #[clap(short = 'm', long, default_value = "baseline-freq-length")]
    mode: AlgorithmMode,

    /// Convergence threshold of the optimizer.
    #[clap(short = 'e', long, default_value = "0.005")]
    epsilon: f64,

    /// Random seed for the epoch permutations.
    #[clap(short = 's', long)]
    seed: Option<u64>,
}

/// メイン関数
///
/// 学習コーパスでモデルを学習し、テストコーパスの各単語を
/// 分割して標準出力に出力します。
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Reading the corpora...");
    let corpus = Corpus::from_reader(File::open(args.corpus)?)?;
    let test_corpus = Corpus::from_reader(File::open(args.test_corpus)?)?;

    eprintln!("Training on {} words...", corpus.len());
    let mut trainer = Trainer::new(args.mode).convergence_threshold(args.epsilon);
    if let Some(seed) = args.seed {
        trainer = trainer.seed(seed);
    }
    let model = trainer.train(&corpus)?;

    eprintln!("Segmenting...");
    let segmenter = Segmenter::new(model);
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for segmentation in segmenter.segment_corpus(&test_corpus) {
        writeln!(out, "{segmentation}")?;
    }

    Ok(())
}
