//! 貪欲な再帰的再分割によるモデル学習のモジュール。
//!
//! このモジュールは、単語頻度コーパスからモルフのレキシコンを学習する
//! 機能を提供します。各単語についてすべての二分割位置を試し、MDLコストを
//! 最小化する分割を貪欲に選択して、選ばれた両半分に再帰します。
//!
//! # 概要
//!
//! - 学習設定のビルダー（アルゴリズムモード、プライア、収束閾値、乱数シード）
//! - 語彙のランダムな順列に対する反復的な局所探索
//! - コスト改善が収束閾値を下回った時点での停止
//!
//! # 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use morfessor::{AlgorithmMode, Corpus, Trainer};
//!
//! let corpus = Corpus::from_reader("10 open\n10 do\n3 reopen\n3 redo\n".as_bytes())?;
//!
//! let trainer = Trainer::new(AlgorithmMode::BaselineFreqLength)
//!     .convergence_threshold(0.005)
//!     .seed(42);
//! let model = trainer.train(&corpus)?;
//!
//! assert!(model.contains("reopen"));
//! assert!(model.overall_cost() > 0.0);
//! # Ok(())
//! # }
//! ```

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::corpus::Corpus;
use crate::cost::{AlgorithmMode, CostModel};
use crate::errors::Result;
use crate::segmentation::{char_offsets, Segmentation};

/// モルフレキシコンのトレーナー。
///
/// 反復的なランダム化局所探索でセグメンテーションの全体コストを
/// 最小化します。1回の外側の反復（エポック）では、語彙を一様ランダムに
/// 並べ替えて各単語を再分割し、コストの改善が
/// `収束閾値 × モルフ種類数` 以下になった時点で停止します。
///
/// 乱数はシード可能な擬似乱数生成器から引かれます。シードを指定しない
/// 場合はOSのエントロピー源から初期化されるため、エポックの順列は
/// 実行ごとに異なります。これは最適化における唯一の非決定性です。
pub struct Trainer {
    mode: AlgorithmMode,
    hapax_legomena_prior: f64,
    length_prior_mean: f64,
    length_prior_scale: f64,
    convergence_threshold: f64,
    seed: Option<u64>,
}

impl Trainer {
    /// 指定されたモードで新しいトレーナーを作成します。
    ///
    /// プライアと収束閾値は既定値に設定されます。
    ///
    /// # 引数
    ///
    /// * `mode` - アルゴリズムモード
    pub fn new(mode: AlgorithmMode) -> Self {
        Self {
            mode,
            hapax_legomena_prior: 0.5,
            length_prior_mean: 5.0,
            length_prior_scale: 1.0,
            convergence_threshold: 0.005,
            seed: None,
        }
    }

    /// ハパックス・レゴメナのプライアを変更します。
    ///
    /// 明示頻度項の分布の裾の重さを制御します。
    /// デフォルト値は 0.5 です。
    ///
    /// # 引数
    ///
    /// * `prior` - プライア（0より大きく1未満の値）
    ///
    /// # 戻り値
    ///
    /// 設定が更新されたトレーナー
    ///
    /// # パニック
    ///
    /// 値が範囲外の場合、パニックします。
    pub fn hapax_legomena_prior(mut self, prior: f64) -> Self {
        assert!(prior > 0.0 && prior < 1.0);
        self.hapax_legomena_prior = prior;
        self
    }

    /// 明示長さ項のガンマプライアを変更します。
    ///
    /// デフォルト値は平均 5.0、尺度 1.0 です。
    ///
    /// # 引数
    ///
    /// * `mean` - プライアの平均（正の値）
    /// * `scale` - プライアの尺度（正の値）
    ///
    /// # 戻り値
    ///
    /// 設定が更新されたトレーナー
    ///
    /// # パニック
    ///
    /// いずれかの値が0以下の場合、パニックします。
    pub fn length_prior(mut self, mean: f64, scale: f64) -> Self {
        assert!(mean > 0.0);
        assert!(scale > 0.0);
        self.length_prior_mean = mean;
        self.length_prior_scale = scale;
        self
    }

    /// 収束閾値を変更します。
    ///
    /// 1エポックでのコスト改善が `閾値 × モルフ種類数` 以下になると
    /// 学習を終了します。デフォルト値は 0.005 です。
    ///
    /// # 引数
    ///
    /// * `threshold` - 収束閾値（0以上の値）
    ///
    /// # 戻り値
    ///
    /// 設定が更新されたトレーナー
    ///
    /// # パニック
    ///
    /// 値が負の場合、パニックします。
    pub fn convergence_threshold(mut self, threshold: f64) -> Self {
        assert!(threshold >= 0.0);
        self.convergence_threshold = threshold;
        self
    }

    /// 乱数シードを指定します。
    ///
    /// 同じシードと同じコーパスに対して、学習結果は再現可能になります。
    ///
    /// # 引数
    ///
    /// * `seed` - 擬似乱数生成器のシード
    ///
    /// # 戻り値
    ///
    /// 設定が更新されたトレーナー
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// コーパスからモルフレキシコンを学習します。
    ///
    /// コーパスの全単語を未分割のリーフとして登録した後、収束するまで
    /// エポックを繰り返します。各エポックの開始時に文字確率テーブルが
    /// 再構築され、コスト項が再集計されます。
    ///
    /// # 引数
    ///
    /// * `corpus` - 学習コーパス
    ///
    /// # 戻り値
    ///
    /// 学習されたセグメンテーション
    pub fn train(&self, corpus: &Corpus) -> Result<Segmentation> {
        let model = CostModel::with_priors(
            self.mode,
            self.hapax_legomena_prior,
            self.length_prior_mean,
            self.length_prior_scale,
        );
        let mut segmentation = Segmentation::from_corpus(corpus, model);

        // The vocabulary is fixed for the whole run; only its order is
        // permuted between epochs. Snapshotting it in corpus order keeps
        // seeded runs reproducible.
        let mut seen = hashbrown::HashSet::new();
        let mut keys: Vec<String> = Vec::with_capacity(corpus.len());
        for word in corpus.iter() {
            if seen.insert(word.surface()) {
                keys.push(word.surface().to_string());
            }
        }
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut epoch = 0;
        loop {
            epoch += 1;
            // The letter table is frozen for the whole pass; rebuilding it
            // here also clears any drift in the incremental accumulators.
            segmentation.reconcile();
            let old_cost = segmentation.overall_cost();

            keys.shuffle(&mut rng);
            for key in &keys {
                self.resplit_node(&mut segmentation, key);
            }

            let new_cost = segmentation.overall_cost();
            log::info!("epoch {epoch}: cost {old_cost:.5} -> {new_cost:.5}");

            let threshold = self.convergence_threshold
                * segmentation.model().unique_morph_types() as f64;
            if old_cost - new_cost <= threshold {
                break;
            }
        }

        Ok(segmentation)
    }

    /// モルフの最良の二分割を探索して適用します。
    ///
    /// モルフの現在の表現（過去に選ばれた分割を含む）をモデルから除去し、
    /// 未分割の代替とすべての分割位置を試します。コストが最小の構成を
    /// 採用し、分割した場合は両半分に再帰します。
    ///
    /// 同コストの分割の間では最初に見つかったもの（最小の分割位置）が
    /// 維持されます。
    ///
    /// # 引数
    ///
    /// * `segmentation` - 対象のセグメンテーション
    /// * `morph` - 再分割するモルフ
    fn resplit_node(&self, segmentation: &mut Segmentation, morph: &str) {
        assert!(!morph.is_empty());
        let frequency = segmentation.at(morph).count() as i64;

        // Drop the current representation, so the best split is
        // recomputed against the present state of the model. This keeps
        // the search less dependent on the evaluation order.
        segmentation.adjust_morph_count(morph, -frequency);

        // Score the unsplit alternative first.
        segmentation.adjust_morph_count(morph, frequency);
        let mut best_cost = segmentation.overall_cost();
        let mut best_split = 0;

        // Only leaves are scored, so the morph must be absent while its
        // hypothetical splits are tried.
        segmentation.adjust_morph_count(morph, -frequency);

        let offsets = char_offsets(morph);
        let num_chars = offsets.len() - 1;
        for split_index in 1..num_chars {
            let (left, right) = morph.split_at(offsets[split_index]);
            segmentation.adjust_morph_count(left, frequency);
            segmentation.adjust_morph_count(right, frequency);

            let new_cost = segmentation.overall_cost();
            if new_cost < best_cost {
                best_cost = new_cost;
                best_split = split_index;
            }

            segmentation.adjust_morph_count(left, -frequency);
            segmentation.adjust_morph_count(right, -frequency);
        }

        if best_split > 0 {
            // Reinstate the morph as an internal node. It carries its
            // count but contributes nothing to the leaf cost terms.
            let (left, right) = morph.split_at(offsets[best_split]);
            segmentation.insert_internal(morph, frequency as usize, left, right);
            segmentation.adjust_morph_count(left, frequency);
            segmentation.adjust_morph_count(right, frequency);
            self.resplit_node(segmentation, left);
            self.resplit_node(segmentation, right);
        } else {
            segmentation.adjust_morph_count(morph, frequency);
        }
    }
}
