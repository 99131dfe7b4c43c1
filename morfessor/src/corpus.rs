//! コーパスデータ構造のモジュール。
//!
//! このモジュールは、学習および評価に使用する単語頻度リストの
//! 読み込みと管理に必要なデータ構造を提供します。

use std::io::{BufRead, BufReader, Read};
use std::ops::{Deref, DerefMut};

use crate::errors::{MorfessorError, Result};

/// 表層形と頻度のペアの表現。
///
/// コーパスの1単語を表します。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    surface: String,
    frequency: usize,
}

impl Word {
    /// 新しい単語を作成します。
    ///
    /// # 引数
    ///
    /// * `surface` - 表層形
    /// * `frequency` - 出現頻度（1以上の値）
    ///
    /// # パニック
    ///
    /// 表層形が空の場合、または頻度が0の場合、パニックします。
    pub fn new<S>(surface: S, frequency: usize) -> Self
    where
        S: Into<String>,
    {
        let surface = surface.into();
        assert!(!surface.is_empty());
        assert!(frequency >= 1);
        Self { surface, frequency }
    }

    /// 表層形の文字列を返します。
    ///
    /// # 戻り値
    ///
    /// 表層形
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// 出現頻度を返します。
    ///
    /// # 戻り値
    ///
    /// 出現頻度
    pub const fn frequency(&self) -> usize {
        self.frequency
    }
}

/// コーパスの表現。
///
/// 単語と頻度のペアの有限な列を表します。読み込み後は不変であり、
/// 学習の初期化時と各デコード呼び出し時に先頭から走査されます。
#[derive(Clone, Debug, Default)]
pub struct Corpus {
    words: Vec<Word>,
}

impl Corpus {
    /// 指定されたリーダーからコーパスを読み込みます。
    ///
    /// コーパスファイルは、各行が「頻度 表層形」の空白区切り形式を
    /// 想定しています。空行は無視されます。
    ///
    /// # 引数
    ///
    /// * `rdr` - コーパスのリーダー
    ///
    /// # 戻り値
    ///
    /// 読み込まれたコーパス
    ///
    /// # エラー
    ///
    /// 入力形式が不正な場合（フィールド数の過不足、頻度が0、
    /// 頻度が整数として解釈できない場合など）、[`MorfessorError`] が返されます。
    ///
    /// # 例
    ///
    /// ```
    /// use morfessor::Corpus;
    ///
    /// let corpus = Corpus::from_reader("7 reopen\n10 retry\n".as_bytes()).unwrap();
    /// assert_eq!(corpus.len(), 2);
    /// assert_eq!(corpus[0].surface(), "reopen");
    /// assert_eq!(corpus[0].frequency(), 7);
    /// ```
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let buf = BufReader::new(rdr);

        let mut words = vec![];
        for line in buf.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let mut spl = line.split_whitespace();
            let frequency = spl.next();
            let surface = spl.next();
            let rest = spl.next();
            match (frequency, surface, rest) {
                (Some(frequency), Some(surface), None) => {
                    let frequency: usize = frequency.parse()?;
                    if frequency == 0 {
                        return Err(MorfessorError::invalid_format(
                            "rdr",
                            "Word frequencies must be positive",
                        ));
                    }
                    words.push(Word {
                        surface: surface.to_string(),
                        frequency,
                    });
                }
                _ => {
                    return Err(MorfessorError::invalid_format(
                        "rdr",
                        "Each line must be a pair of a frequency and a surface",
                    ))
                }
            }
        }

        Ok(Self { words })
    }

    /// 単語のリストからコーパスを作成します。
    ///
    /// # 引数
    ///
    /// * `words` - 単語のリスト
    pub fn from_words(words: Vec<Word>) -> Self {
        Self { words }
    }
}

impl Deref for Corpus {
    type Target = [Word];

    fn deref(&self) -> &Self::Target {
        &self.words
    }
}

impl DerefMut for Corpus {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_corpus() {
        let corpus_data = "\
7 reopen
10 retry

4 trying
";

        let corpus = Corpus::from_reader(corpus_data.as_bytes()).unwrap();

        assert_eq!(3, corpus.len());
        assert_eq!("reopen", corpus[0].surface());
        assert_eq!(7, corpus[0].frequency());
        assert_eq!("retry", corpus[1].surface());
        assert_eq!(10, corpus[1].frequency());
        assert_eq!("trying", corpus[2].surface());
        assert_eq!(4, corpus[2].frequency());
    }

    #[test]
    fn test_load_corpus_empty() {
        let corpus = Corpus::from_reader("".as_bytes()).unwrap();
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_load_corpus_zero_frequency() {
        let result = Corpus::from_reader("0 reopen".as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_corpus_missing_surface() {
        let result = Corpus::from_reader("7".as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_corpus_extra_field() {
        let result = Corpus::from_reader("7 reopen again".as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_corpus_unparsable_frequency() {
        let result = Corpus::from_reader("seven reopen".as_bytes());
        assert!(result.is_err());
    }
}
