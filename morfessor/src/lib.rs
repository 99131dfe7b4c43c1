//! # Morfessor
//!
//! Morfessorは、Morfessor Baselineアルゴリズム族に基づく教師なし
//! 形態素セグメンテーションの実装です。
//!
//! ## 概要
//!
//! このライブラリは、単語と頻度のペアからなるコーパスを入力として、
//! 単語を再帰的に二分割しながらサブワード単位（モルフ）の目録を
//! 発見します。分割の選択は最小記述長（MDL）原理に従い、モルフ目録の
//! 記述コストと目録を所与としたコーパスの記述コストの和を最小化します。
//!
//! ## 主な機能
//!
//! - **共有フォレスト構造**: 単語間で部分モルフを共有する参照カウント付きの分割フォレスト
//! - **4種類のコストモデル**: 頻度項と長さ項それぞれの暗黙・明示の組み合わせ
//! - **貪欲な最適化**: 語彙のランダムな順列に対する反復的な再帰的再分割
//! - **Viterbiデコード**: 学習済み目録による未知語の最小コスト分割
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use morfessor::{AlgorithmMode, Corpus, Segmenter, Trainer};
//!
//! let corpus = Corpus::from_reader("10 open\n10 do\n3 reopen\n3 redo\n".as_bytes())?;
//!
//! let trainer = Trainer::new(AlgorithmMode::Baseline).seed(42);
//! let model = trainer.train(&corpus)?;
//!
//! assert!(model.contains("reopen"));
//! assert!(model.overall_cost() > 0.0);
//!
//! let segmenter = Segmenter::new(model);
//! let mut worker = segmenter.new_worker();
//!
//! worker.reset_word("redo");
//! worker.segment();
//!
//! // The decoded morphs always concatenate back to the input word.
//! let concatenated: String = worker.segmentation().split(' ').collect();
//! assert_eq!(concatenated, "redo");
//! # Ok(())
//! # }
//! ```

/// コーパスデータ構造
pub mod corpus;

/// MDLコストモデルの定義
pub mod cost;

/// エラー型の定義
pub mod errors;

/// コスト計算用の数値関数
mod math;

/// セグメンテーションのフォレスト構造
pub mod segmentation;

/// Viterbiデコーダの実装
pub mod segmenter;

/// モデル学習機能
pub mod trainer;


// Re-exports
pub use corpus::{Corpus, Word};
pub use cost::{AlgorithmMode, CostModel};
pub use segmentation::{MorphNode, Segmentation};
pub use segmenter::Segmenter;
pub use trainer::Trainer;

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
