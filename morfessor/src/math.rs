//! コスト計算用の数値関数を提供するモジュール
//!
//! 対数ガンマ関数と、それを用いた二項係数およびガンマ分布の
//! 対数確率密度を提供します。いずれも2を底とする対数（ビット単位）で
//! 結果を返します。

use std::f64::consts::PI;

/// Lanczos近似の係数 (g = 7, n = 9)
const LANCZOS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// ガンマ関数の自然対数を計算します
///
/// Lanczos近似を使用します。`x < 0.5` の場合は反射公式を適用します。
///
/// # 引数
///
/// * `x` - 正の実数
///
/// # 戻り値
///
/// `ln(Γ(x))` の値
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection formula: Γ(x)Γ(1−x) = π / sin(πx)
        PI.ln() - (PI * x).sin().ln() - ln_gamma(1.0 - x)
    } else {
        let x = x - 1.0;
        let mut acc = LANCZOS[0];
        for (i, &c) in LANCZOS.iter().enumerate().skip(1) {
            acc += c / (x + i as f64);
        }
        let t = x + 7.5;
        0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + acc.ln()
    }
}

/// 二項係数の2を底とする対数を計算します
///
/// # 引数
///
/// * `n` - 全体の要素数
/// * `k` - 選択する要素数（`k <= n`）
///
/// # 戻り値
///
/// `log2(C(n, k))` の値
pub fn log2_binomial(n: usize, k: usize) -> f64 {
    debug_assert!(k <= n);
    (ln_gamma(n as f64 + 1.0) - ln_gamma(k as f64 + 1.0) - ln_gamma((n - k) as f64 + 1.0))
        / std::f64::consts::LN_2
}

/// ガンマ分布の確率密度の2を底とする対数を計算します
///
/// 形状パラメータ `alpha`、尺度パラメータ `beta` のガンマ分布に対する
/// `log2(pdf(x))` を返します。
///
/// # 引数
///
/// * `x` - 評価点（正の実数）
/// * `alpha` - 形状パラメータ（正の実数）
/// * `beta` - 尺度パラメータ（正の実数）
pub fn log2_gamma_pdf(x: f64, alpha: f64, beta: f64) -> f64 {
    debug_assert!(x > 0.0);
    debug_assert!(alpha > 0.0);
    debug_assert!(beta > 0.0);
    ((alpha - 1.0) * x.ln() - x / beta - ln_gamma(alpha) - alpha * beta.ln())
        / std::f64::consts::LN_2
}
