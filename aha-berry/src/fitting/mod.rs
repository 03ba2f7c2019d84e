//! 曲线拟合与一维滤波.
//!
//! 给定一系列点 `(x, y)`, 该模块可以拟合出一条高斯曲线;
//! 另外提供插入点检测所需的中值滤波.

use ndarray::ArrayView1;

mod gaussian;
mod median;

pub use gaussian::{GaussFit, Gaussian};
pub use median::{median, median_filter};

/// 拟合高斯曲线, 初值为 `(max(y), x[0] + argmax(y), 1)`.
///
/// `x` 与 `y` 长度必须一致. 点数少于 3, 峰值不为正, 或迭代不收敛时返回 [`GaussFit::Degenerate`].
pub fn gaussian_f64(x: ArrayView1<f64>, y: ArrayView1<f64>) -> GaussFit {
    let imp = gaussian::GaussImp::new(x.view(), y.view());
    match imp.initial_guess() {
        Some(p0) => imp.fit(p0),
        None => GaussFit::Degenerate,
    }
}

