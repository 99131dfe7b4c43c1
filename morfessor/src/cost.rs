//! MDLコストモデルのモジュール。
//!
//! このモジュールは、セグメンテーションの最小記述長（MDL）コストを管理します。
//! 全体コストはレキシコンコスト（モルフ目録の記述長）とコーパスコスト
//! （目録を所与としたコーパスの記述長）の和です。
//!
//! レキシコンコストの頻度項と長さ項にはそれぞれ暗黙・明示の2種類があり、
//! その組み合わせがアルゴリズムモードを構成します。
//!
//! | モード | 頻度項 | 長さ項 | 文字列項 |
//! |--------|--------|--------|----------|
//! | `Baseline` | 暗黙 | 暗黙 | 終端マーカーあり |
//! | `BaselineFreq` | 明示 | 暗黙 | 終端マーカーあり |
//! | `BaselineLength` | 暗黙 | 明示 | 終端マーカーなし |
//! | `BaselineFreqLength` | 明示 | 明示 | 終端マーカーなし |
//!
//! コストはセグメンテーション構造からのフックで増分的に維持され、
//! 最適化の各パスの開始時にゼロから再集計されて誤差の蓄積が抑えられます。

mod letters;

use std::str::FromStr;

use crate::math;
pub use letters::LetterTable;

/// アルゴリズムモード。
///
/// レキシコンコストの頻度項と長さ項の計算方法を選択します。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlgorithmMode {
    /// 暗黙の頻度項と暗黙の長さ項
    #[default]
    Baseline,
    /// 明示の頻度項と暗黙の長さ項
    BaselineFreq,
    /// 暗黙の頻度項と明示の長さ項
    BaselineLength,
    /// 明示の頻度項と明示の長さ項
    BaselineFreqLength,
}

impl AlgorithmMode {
    /// 明示の頻度項を使用するかどうかを返します。
    pub const fn explicit_frequency(self) -> bool {
        matches!(self, Self::BaselineFreq | Self::BaselineFreqLength)
    }

    /// 明示の長さ項を使用するかどうかを返します。
    pub const fn explicit_length(self) -> bool {
        matches!(self, Self::BaselineLength | Self::BaselineFreqLength)
    }

    /// 文字列項がモルフ終端マーカーを含むかどうかを返します。
    ///
    /// 長さ項が暗黙の場合、モルフの長さは終端マーカーで符号化されるため、
    /// 文字列項は終端マーカー付きの文字モデルを使用します。
    pub const fn uses_end_marker(self) -> bool {
        !self.explicit_length()
    }
}

/// `AlgorithmMode` の `FromStr` 実装
impl FromStr for AlgorithmMode {
    type Err = &'static str;

    /// 文字列からアルゴリズムモードをパースする
    ///
    /// # 引数
    ///
    /// * `mode` - パース対象の文字列（"baseline"、"baseline-freq"、
    ///   "baseline-length"、"baseline-freq-length"のいずれか）
    ///
    /// # 戻り値
    ///
    /// パースに成功した場合は対応する `AlgorithmMode`、失敗した場合はエラーメッセージ
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "baseline" => Ok(Self::Baseline),
            "baseline-freq" => Ok(Self::BaselineFreq),
            "baseline-length" => Ok(Self::BaselineLength),
            "baseline-freq-length" => Ok(Self::BaselineFreqLength),
            _ => Err("Could not parse an algorithm mode"),
        }
    }
}

/// MDLコストモデル。
///
/// セグメンテーションのリーフ集合に対するコスト項を増分的に維持します。
/// カウンタと累積項はセグメンテーション構造の各リーフ遷移時にフック経由で
/// 更新され、再集計（[`Segmentation::reconcile`](crate::Segmentation::reconcile)）
/// でゼロから再構築できます。
#[derive(Clone, Debug)]
pub struct CostModel {
    mode: AlgorithmMode,
    hapax_legomena_prior: f64,
    length_prior_mean: f64,
    length_prior_scale: f64,

    total_morph_tokens: usize,
    unique_morph_types: usize,

    // Σ count·log2(count) over leaves; the corpus cost is derived from
    // this sum and the token total.
    corpus_sum: f64,
    // Σ of per-leaf explicit frequency terms (bits).
    frequency_sum: f64,
    // Σ of per-leaf explicit length terms (bits).
    length_sum: f64,
    // Σ of per-leaf string costs against the current letter table (bits).
    string_sum: f64,

    letters: Option<LetterTable>,
}

impl CostModel {
    /// 既定のプライアでコストモデルを作成します。
    ///
    /// ハパックス・レゴメナのプライアは0.5、長さプライアは平均5.0・
    /// 尺度1.0に設定されます。
    ///
    /// # 引数
    ///
    /// * `mode` - アルゴリズムモード
    pub fn new(mode: AlgorithmMode) -> Self {
        Self::with_priors(mode, 0.5, 5.0, 1.0)
    }

    /// プライアを指定してコストモデルを作成します。
    ///
    /// # 引数
    ///
    /// * `mode` - アルゴリズムモード
    /// * `hapax_legomena_prior` - 明示頻度項のプライア（0より大きく1未満）
    /// * `length_prior_mean` - 明示長さ項のガンマプライアの平均（正の値）
    /// * `length_prior_scale` - 明示長さ項のガンマプライアの尺度（正の値）
    ///
    /// # パニック
    ///
    /// いずれかのプライアが範囲外の場合、パニックします。
    pub fn with_priors(
        mode: AlgorithmMode,
        hapax_legomena_prior: f64,
        length_prior_mean: f64,
        length_prior_scale: f64,
    ) -> Self {
        assert!(hapax_legomena_prior > 0.0 && hapax_legomena_prior < 1.0);
        assert!(length_prior_mean > 0.0);
        assert!(length_prior_scale > 0.0);
        Self {
            mode,
            hapax_legomena_prior,
            length_prior_mean,
            length_prior_scale,
            total_morph_tokens: 0,
            unique_morph_types: 0,
            corpus_sum: 0.0,
            frequency_sum: 0.0,
            length_sum: 0.0,
            string_sum: 0.0,
            letters: None,
        }
    }

    /// アルゴリズムモードを返します。
    pub const fn mode(&self) -> AlgorithmMode {
        self.mode
    }

    /// リーフモルフのトークン総数を返します。
    pub const fn total_morph_tokens(&self) -> usize {
        self.total_morph_tokens
    }

    /// リーフモルフの種類数を返します。
    pub const fn unique_morph_types(&self) -> usize {
        self.unique_morph_types
    }

    /// コーパスコストを返します。
    ///
    /// 各リーフトークンがカウント比の多項分布から引かれると仮定した
    /// コーパスの符号長（ビット単位）です。
    pub fn corpus_cost(&self) -> f64 {
        if self.total_morph_tokens == 0 {
            return 0.0;
        }
        let total = self.total_morph_tokens as f64;
        total * total.log2() - self.corpus_sum
    }

    /// 頻度コストを返します。
    ///
    /// モードに応じて明示または暗黙の頻度項を返します。
    pub fn frequency_cost(&self) -> f64 {
        if self.mode.explicit_frequency() {
            self.frequency_sum
        } else {
            self.implicit_frequency_cost()
        }
    }

    /// 長さコストを返します。
    ///
    /// モードに応じて明示または暗黙の長さ項を返します。暗黙の長さ項は
    /// リーフごとの終端マーカーのコストで、直近の再集計
    /// （[`Segmentation::reconcile`](crate::Segmentation::reconcile)）で
    /// 構築された文字確率テーブルに対して測定されます。テーブルが
    /// 一度も構築されていない間は0です。
    pub fn length_cost(&self) -> f64 {
        if self.mode.explicit_length() {
            self.length_sum
        } else {
            let end_cost = self.letters.as_ref().map_or(0.0, LetterTable::end_cost);
            self.unique_morph_types as f64 * end_cost
        }
    }

    /// モルフ文字列コストを返します。
    ///
    /// 各リーフの表層形を文字モデルで符号化したコストの総和です。
    /// 直近の再集計
    /// （[`Segmentation::reconcile`](crate::Segmentation::reconcile)）で
    /// 構築された文字確率テーブルに対して測定され、テーブルが一度も
    /// 構築されていない間は0です。
    pub fn morph_string_cost(&self) -> f64 {
        self.string_sum
    }

    /// レキシコン順序の補正項を返します。
    ///
    /// レキシコンが順序を持たないことによる記述長の補正で、
    /// `log U!` のスターリング近似の第1項を使用します。
    pub fn lexicon_order_cost(&self) -> f64 {
        if self.unique_morph_types == 0 {
            return 0.0;
        }
        let unique = self.unique_morph_types as f64;
        unique * (1.0 - unique.ln()) / std::f64::consts::LN_2
    }

    /// レキシコンコストを返します。
    ///
    /// 頻度項、長さ項、文字列項、順序補正項の総和です。
    pub fn lexicon_cost(&self) -> f64 {
        self.lexicon_order_cost() + self.frequency_cost() + self.length_cost()
            + self.morph_string_cost()
    }

    /// 全体コストを返します。
    ///
    /// レキシコンコストとコーパスコストの和です。
    pub fn overall_cost(&self) -> f64 {
        self.lexicon_cost() + self.corpus_cost()
    }

    /// 暗黙の頻度項を計算します。
    ///
    /// トークン総数が小さい場合は二項係数による正確な式を、
    /// それ以外の場合は対数近似式を使用します。
    fn implicit_frequency_cost(&self) -> f64 {
        let tokens = self.total_morph_tokens;
        let unique = self.unique_morph_types;
        if tokens == 0 || unique == 0 {
            return 0.0;
        }
        if tokens < 100 {
            // Exact formula.
            math::log2_binomial(tokens - 1, unique - 1)
        } else {
            // Logarithmic approximation to the binomial coefficient.
            // Factors whose logarithm argument would be non-positive
            // contribute nothing.
            let tokens = tokens as f64;
            let unique = unique as f64;
            let mut sum = (tokens - 1.0) * (tokens - 2.0).log2();
            if unique - 2.0 > 0.0 {
                sum -= (unique - 1.0) * (unique - 2.0).log2();
            }
            if tokens - unique > 0.0 && tokens - unique - 1.0 > 0.0 {
                sum -= (tokens - unique) * (tokens - unique - 1.0).log2();
            }
            sum
        }
    }

    /// 1リーフ分の明示頻度項を計算します。
    fn explicit_frequency_term(&self, count: usize) -> f64 {
        let exponent = (1.0 - self.hapax_legomena_prior).log2();
        let count = count as f64;
        -(count.powf(exponent) - (count + 1.0).powf(exponent)).log2()
    }

    /// 1リーフ分の明示長さ項を計算します。
    fn explicit_length_term(&self, length: usize) -> f64 {
        let alpha = self.length_prior_mean / self.length_prior_scale + 1.0;
        -math::log2_gamma_pdf(length as f64, alpha, self.length_prior_scale)
    }

    /// トークン総数を調整します。
    ///
    /// # 引数
    ///
    /// * `delta` - トークン数の増減
    pub(crate) fn adjust_morph_token_count(&mut self, delta: i64) {
        let total = self.total_morph_tokens as i64 + delta;
        assert!(total >= 0);
        self.total_morph_tokens = total as usize;
    }

    /// コーパスコストの1リーフ分の寄与を調整します。
    ///
    /// 正のカウントはそのカウントの寄与を追加し、負のカウントは
    /// 絶対値のカウントの寄与を除去します。
    pub(crate) fn adjust_corpus_cost(&mut self, count: i64) {
        if count == 0 {
            return;
        }
        let magnitude = count.unsigned_abs() as f64;
        let term = magnitude * magnitude.log2();
        if count > 0 {
            self.corpus_sum += term;
        } else {
            self.corpus_sum -= term;
        }
    }

    /// 明示頻度項の1リーフ分の寄与を調整します。
    ///
    /// 暗黙頻度モードでは何も行いません。
    pub(crate) fn adjust_frequency_cost(&mut self, count: i64) {
        if !self.mode.explicit_frequency() || count == 0 {
            return;
        }
        let term = self.explicit_frequency_term(count.unsigned_abs() as usize);
        if count > 0 {
            self.frequency_sum += term;
        } else {
            self.frequency_sum -= term;
        }
    }

    /// モルフ種類数を調整します。
    ///
    /// # 引数
    ///
    /// * `delta` - 種類数の増減
    pub(crate) fn adjust_unique_morph_count(&mut self, delta: i64) {
        let unique = self.unique_morph_types as i64 + delta;
        assert!(unique >= 0);
        self.unique_morph_types = unique as usize;
    }

    /// 明示長さ項の1リーフ分の寄与を調整します。
    ///
    /// 正の長さは該当する長さの寄与を追加し、負の長さは除去します。
    /// 暗黙長さモードでは長さ項は種類数と終端コストから導出されるため、
    /// 何も行いません。
    pub(crate) fn adjust_length_cost(&mut self, length: i64) {
        if !self.mode.explicit_length() || length == 0 {
            return;
        }
        let term = self.explicit_length_term(length.unsigned_abs() as usize);
        if length > 0 {
            self.length_sum += term;
        } else {
            self.length_sum -= term;
        }
    }

    /// 文字列項の1リーフ分の寄与を調整します。
    ///
    /// 文字確率テーブルが未構築の間は何も行いません。その間の寄与は
    /// 次回の [`rebuild`](CostModel::rebuild) で取り込まれます。
    pub(crate) fn adjust_string_cost(&mut self, morph: &str, added: bool) {
        if let Some(letters) = &self.letters {
            let term = letters.string_cost(morph);
            if added {
                self.string_sum += term;
            } else {
                self.string_sum -= term;
            }
        }
    }

    /// 文字確率テーブルを再構築し、すべての累積項を再集計します。
    ///
    /// 増分更新による浮動小数点誤差の蓄積を抑えるため、最適化の
    /// 各パスの開始時に呼び出されます。
    ///
    /// # 引数
    ///
    /// * `leaves` - 現在のリーフ集合（`(モルフ文字列, カウント)` のスライス）
    pub(crate) fn rebuild(&mut self, leaves: &[(&str, usize)]) {
        let letters = LetterTable::build(leaves.iter().copied(), self.mode.uses_end_marker());

        let mut total_morph_tokens = 0;
        let mut corpus_sum = 0.0;
        let mut frequency_sum = 0.0;
        let mut length_sum = 0.0;
        let mut string_sum = 0.0;

        for &(morph, count) in leaves {
            total_morph_tokens += count;
            corpus_sum += count as f64 * (count as f64).log2();
            if self.mode.explicit_frequency() {
                frequency_sum += self.explicit_frequency_term(count);
            }
            if self.mode.explicit_length() {
                length_sum += self.explicit_length_term(morph.chars().count());
            }
            string_sum += letters.string_cost(morph);
        }

        self.total_morph_tokens = total_morph_tokens;
        self.unique_morph_types = leaves.len();
        self.corpus_sum = corpus_sum;
        self.frequency_sum = frequency_sum;
        self.length_sum = length_sum;
        self.string_sum = string_sum;
        self.letters = Some(letters);
    }
}
