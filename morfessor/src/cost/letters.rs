//! 文字確率テーブルのモジュール。
//!
//! 現在のリーフ集合から最尤推定で構築される文字モデルを提供します。
//! 各文字のコストは `-log2 p(c)` で表され、モルフ終端マーカー付きで
//! 構築した場合は終端コストも保持します。

use hashbrown::HashMap;

/// 文字確率テーブル。
///
/// リーフモルフの文字頻度から構築され、各文字の符号長（ビット単位）を
/// 保持します。任意の分割をまたいだ文字頻度の増分管理は丸め誤差に
/// 敏感なため、このテーブルは最適化の各パスの開始時に一括で再構築され、
/// パス内の分割はすべて同じテーブルを共有します。
#[derive(Clone, Debug, Default)]
pub struct LetterTable {
    costs: HashMap<char, f64>,
    end_cost: f64,
}

impl LetterTable {
    /// リーフ集合から文字確率テーブルを構築します。
    ///
    /// 各文字 `c` の頻度は、リーフごとの出現回数にそのリーフのカウントを
    /// 掛けた値の総和です。`with_end_marker` が真の場合、すべてのリーフの
    /// 末尾に終端マーカーが付くものとして扱い、終端コストを計算します。
    ///
    /// # 引数
    ///
    /// * `leaves` - `(モルフ文字列, カウント)` のイテレータ
    /// * `with_end_marker` - 終端マーカーを文字として数えるかどうか
    ///
    /// # 戻り値
    ///
    /// 構築された文字確率テーブル
    pub(crate) fn build<'a, I>(leaves: I, with_end_marker: bool) -> Self
    where
        I: IntoIterator<Item = (&'a str, usize)>,
    {
        let mut counts: HashMap<char, usize> = HashMap::new();
        let mut total_letters = 0usize;
        let mut total_morph_tokens = 0usize;

        for (morph, count) in leaves {
            total_morph_tokens += count;
            for c in morph.chars() {
                total_letters += count;
                *counts.entry(c).or_insert(0) += count;
            }
        }

        if with_end_marker {
            // The end-of-morph marker occurs once at the end of every token.
            total_letters += total_morph_tokens;
        }

        if total_letters == 0 {
            return Self::default();
        }

        let log_total = (total_letters as f64).log2();
        let costs = counts
            .into_iter()
            .map(|(c, n)| (c, log_total - (n as f64).log2()))
            .collect();
        let end_cost = if with_end_marker {
            log_total - (total_morph_tokens as f64).log2()
        } else {
            0.0
        };

        Self { costs, end_cost }
    }

    /// 文字のコストを返します。
    ///
    /// # 引数
    ///
    /// * `c` - 対象の文字
    ///
    /// # 戻り値
    ///
    /// `-log2 p(c)` の値
    ///
    /// # パニック
    ///
    /// テーブルに存在しない文字の場合、パニックします。
    pub fn cost(&self, c: char) -> f64 {
        self.costs[&c]
    }

    /// モルフ文字列全体のコストを返します。
    ///
    /// テーブルにない文字は寄与しません。そのような文字の寄与は
    /// 次回のテーブル再構築で取り込まれます。
    ///
    /// # 引数
    ///
    /// * `morph` - 対象のモルフ文字列
    ///
    /// # 戻り値
    ///
    /// テーブルに含まれる各文字のコストの総和
    pub fn string_cost(&self, morph: &str) -> f64 {
        morph
            .chars()
            .filter_map(|c| self.costs.get(&c).copied())
            .sum()
    }

    /// モルフ終端マーカーのコストを返します。
    ///
    /// # 戻り値
    ///
    /// 終端マーカーの `-log2 p(#)`。終端マーカーなしで構築された場合は0
    pub const fn end_cost(&self) -> f64 {
        self.end_cost
    }
}
