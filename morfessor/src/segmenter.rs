//! Viterbiアルゴリズムに基づくセグメンタ。
//!
//! このモジュールは、学習済みのモルフレキシコンを使って未知の単語を
//! 最小コストのモルフ列に分割する機能を提供します。
//!
//! # 主要な構造体
//!
//! - [`Segmenter`]: 学習済みモデルを保持するセグメンタ構造体
//! - [`Worker`]: セグメンタのワーカー。実際の分割処理を行う
//!
//! # 例
//!
//! ```
//! use morfessor::{Segmentation, Segmenter};
//!
//! let mut model = Segmentation::new();
//! model.emplace("re", 3);
//! model.emplace("open", 1);
//! model.emplace("do", 2);
//!
//! let segmenter = Segmenter::new(model);
//! let mut worker = segmenter.new_worker();
//!
//! worker.reset_word("reopen");
//! worker.segment();
//! assert_eq!(worker.segmentation(), "re open");
//! ```

use std::sync::Arc;

use crate::corpus::Corpus;
use crate::segmentation::{char_offsets, Segmentation};

/// 学習済みモデルで単語を分割するセグメンタ。
///
/// `Segmenter` は学習済みのセグメンテーションを保持し、複数の
/// [`Worker`] インスタンスを生成できます。各ワーカーは独立した
/// 作業バッファを保持するため、モデルを再読み込みすることなく
/// 複数の単語列を分割できます。
#[derive(Clone)]
pub struct Segmenter {
    model: Arc<Segmentation>,
}

impl Segmenter {
    /// 新しいセグメンタを作成します。
    ///
    /// モデルはセグメンタに所有権が移動します。既存の共有モデルを使う
    /// 場合は [`Segmenter::from_shared_model`] を使用してください。
    ///
    /// # 引数
    ///
    /// * `model` - 学習済みのセグメンテーション
    pub fn new(model: Segmentation) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    /// 共有されたモデルから新しいセグメンタを作成します。
    ///
    /// # 引数
    ///
    /// * `model` - 共有されるモデルへの`Arc`参照
    pub fn from_shared_model(model: Arc<Segmentation>) -> Self {
        Self { model }
    }

    /// 学習済みモデルへの参照を返します。
    pub fn model(&self) -> &Segmentation {
        &self.model
    }

    /// 新しいワーカーを作成します。
    ///
    /// # 戻り値
    ///
    /// 新しい[`Worker`]インスタンス
    pub fn new_worker(&self) -> Worker {
        Worker::new(self.clone())
    }

    /// テストコーパスの全単語を分割します。
    ///
    /// 出力は入力コーパスと同じ順序で並び、各要素は空白区切りの
    /// モルフ列です。
    ///
    /// # 引数
    ///
    /// * `corpus` - テストコーパス
    ///
    /// # 戻り値
    ///
    /// 単語ごとの分割結果
    pub fn segment_corpus(&self, corpus: &Corpus) -> Vec<String> {
        let mut worker = self.new_worker();
        corpus
            .iter()
            .map(|word| {
                worker.reset_word(word.surface());
                worker.segment();
                worker.segmentation().to_string()
            })
            .collect()
    }
}

/// 分割処理のためのルーチンを提供する構造体。
///
/// Viterbi探索に使用される内部バッファを保持し、それらを再利用する
/// ことで不要なメモリ再割り当てを回避します。
pub struct Worker {
    segmenter: Segmenter,
    word: String,
    offsets: Vec<usize>,
    delta: Vec<f64>,
    psi: Vec<usize>,
    // Morph spans of the best path in char positions, in word order.
    spans: Vec<(usize, usize)>,
    output: String,
}

impl Worker {
    /// 新しいインスタンスを作成します。
    ///
    /// # 引数
    ///
    /// * `segmenter` - 使用するセグメンタ
    pub(crate) fn new(segmenter: Segmenter) -> Self {
        Self {
            segmenter,
            word: String::new(),
            offsets: vec![],
            delta: vec![],
            psi: vec![],
            spans: vec![],
            output: String::new(),
        }
    }

    /// 分割する単語をリセットします。
    ///
    /// 新しい単語を設定し、以前の分割結果をクリアします。
    ///
    /// # 引数
    ///
    /// * `word` - 分割する単語
    pub fn reset_word(&mut self, word: &str) {
        self.word.clear();
        self.word.push_str(word);
        self.offsets = char_offsets(&self.word);
        self.spans.clear();
        self.output.clear();
    }

    /// 現在の単語を最小コストのモルフ列に分割します。
    ///
    /// 位置ごとに、レキシコンに存在するすべての接尾部分文字列を候補とし、
    /// 累積コストが最小のものを選びます。レキシコンにない1文字はペナルティ
    /// 付きで受理され、独立したモルフとして出力に現れます。
    pub fn segment(&mut self) {
        self.spans.clear();
        self.output.clear();

        let num_chars = self.offsets.len().saturating_sub(1);
        let model = Arc::clone(&self.segmenter.model);
        let total_morph_tokens = model.model().total_morph_tokens();
        if num_chars == 0 || total_morph_tokens == 0 {
            return;
        }

        let log_tokens = (total_morph_tokens as f64).ln();
        let bad_cost = (num_chars + 1) as f64 * log_tokens;
        let infinite_cost = (num_chars + 1) as f64 * bad_cost;

        self.delta.clear();
        self.delta.resize(num_chars + 1, 0.0);
        self.psi.clear();
        self.psi.resize(num_chars + 1, 0);

        for end in 1..=num_chars {
            let mut best_delta = infinite_cost;
            let mut best_length = 0;

            for length in 1..=end {
                let morph = &self.word[self.offsets[end - length]..self.offsets[end]];
                let cost = match model.get(morph) {
                    Some(node) if !node.has_children() => {
                        log_tokens - (node.count() as f64).ln()
                    }
                    // A single unknown character is accepted with a bad
                    // likelihood; longer unknown substrings are skipped.
                    _ if length == 1 => bad_cost,
                    _ => continue,
                };

                let candidate = self.delta[end - length] + cost;
                if candidate < best_delta {
                    best_delta = candidate;
                    best_length = length;
                }
            }

            self.delta[end] = best_delta;
            self.psi[end] = best_length;
        }

        let mut end = num_chars;
        while self.psi[end] != 0 {
            let length = self.psi[end];
            self.spans.push((end - length, end));
            end -= length;
        }
        self.spans.reverse();

        for (i, &(start, end)) in self.spans.iter().enumerate() {
            if i > 0 {
                self.output.push(' ');
            }
            self.output
                .push_str(&self.word[self.offsets[start]..self.offsets[end]]);
        }
    }

    /// 分割されたモルフの数を返します。
    pub fn num_morphs(&self) -> usize {
        self.spans.len()
    }

    /// 指定された位置のモルフを返します。
    ///
    /// # 引数
    ///
    /// * `i` - モルフの位置
    ///
    /// # パニック
    ///
    /// 位置が範囲外の場合、パニックします。
    pub fn morph(&self, i: usize) -> &str {
        let (start, end) = self.spans[i];
        &self.word[self.offsets[start]..self.offsets[end]]
    }

    /// 空白区切りの分割結果を返します。
    pub fn segmentation(&self) -> &str {
        &self.output
    }
}
