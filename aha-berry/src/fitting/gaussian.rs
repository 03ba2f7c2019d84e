//! 基于 Levenberg-Marquardt 的高斯曲线非线性最小二乘拟合.

use nalgebra::{Matrix3, Vector3};
use ndarray::ArrayView1;

/// 最大迭代次数. 超过后视为不收敛.
const MAX_ITER: usize = 200;

/// 相对误差下降量阈值.
const FTOL: f64 = 1.49012e-8;

/// 相对步长阈值.
const XTOL: f64 = 1.49012e-8;

const LAMBDA_INIT: f64 = 1e-3;
const LAMBDA_MIN: f64 = 1e-12;
const LAMBDA_MAX: f64 = 1e16;

/// 高斯曲线 `amplitude * exp(-(x - mean)² / (2 * sigma²))`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Gaussian {
    /// 峰值.
    pub amplitude: f64,

    /// 均值, 即峰所在位置.
    pub mean: f64,

    /// 标准差. 拟合结果可能为负数, 使用时应当取绝对值.
    pub sigma: f64,
}

impl Gaussian {
    /// 在 `x` 处求值.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        let d = x - self.mean;
        self.amplitude * (-d * d / (2.0 * self.sigma * self.sigma)).exp()
    }

    /// 对三个参数 `(amplitude, mean, sigma)` 的偏导数.
    fn gradient(&self, x: f64) -> Vector3<f64> {
        let d = x - self.mean;
        let s2 = self.sigma * self.sigma;
        let e = (-d * d / (2.0 * s2)).exp();
        let f = self.amplitude * e;
        Vector3::new(e, f * d / s2, f * d * d / (s2 * self.sigma))
    }

    fn params(&self) -> Vector3<f64> {
        Vector3::new(self.amplitude, self.mean, self.sigma)
    }

    fn is_finite(&self) -> bool {
        self.amplitude.is_finite() && self.mean.is_finite() && self.sigma.is_finite()
    }

    fn step(&self, delta: &Vector3<f64>) -> Self {
        Self {
            amplitude: self.amplitude + delta.x,
            mean: self.mean + delta.y,
            sigma: self.sigma + delta.z,
        }
    }
}

/// 高斯拟合结果.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GaussFit {
    /// 拟合收敛.
    Converged(Gaussian),

    /// 数据不足, 初值非法, 矩阵奇异, 或迭代不收敛.
    Degenerate,
}

impl GaussFit {
    /// 返回 `(mean, sigma)`. 退化时为 `(0, 0)`.
    pub fn mean_sigma(&self) -> (f64, f64) {
        match self {
            GaussFit::Converged(g) => (g.mean, g.sigma),
            GaussFit::Degenerate => (0.0, 0.0),
        }
    }

    /// 是否退化.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, GaussFit::Degenerate)
    }

    /// 收敛时返回拟合出的曲线.
    pub fn gaussian(&self) -> Option<Gaussian> {
        match self {
            GaussFit::Converged(g) => Some(*g),
            GaussFit::Degenerate => None,
        }
    }
}

pub(crate) struct GaussImp<'a> {
    x: ArrayView1<'a, f64>,
    y: ArrayView1<'a, f64>,
}

impl<'a> GaussImp<'a> {
    /// `x` 与 `y` 长度必须一致, 否则程序 panic.
    pub fn new(x: ArrayView1<'a, f64>, y: ArrayView1<'a, f64>) -> Self {
        assert_eq!(x.len(), y.len(), "x, y 长度不一致");
        Self { x, y }
    }

    /// 默认初值: 峰值取 `max(y)`, 均值取 `x[0] + argmax(y)`, 标准差取 1.
    pub fn initial_guess(&self) -> Option<Gaussian> {
        let x0 = *self.x.first()?;
        let (idx, &peak) = self
            .y
            .iter()
            .enumerate()
            .reduce(|a, b| if b.1 > a.1 { b } else { a })?;
        Some(Gaussian {
            amplitude: peak,
            mean: x0 + idx as f64,
            sigma: 1.0,
        })
    }

    /// 残差平方和.
    fn cost(&self, g: &Gaussian) -> f64 {
        self.x
            .iter()
            .zip(self.y.iter())
            .map(|(&x, &y)| {
                let r = y - g.eval(x);
                r * r
            })
            .sum()
    }

    /// 法方程 `JᵀJ` 与 `Jᵀr`.
    fn normal_equations(&self, g: &Gaussian) -> (Matrix3<f64>, Vector3<f64>) {
        let mut jtj = Matrix3::zeros();
        let mut jtr = Vector3::zeros();
        for (&x, &y) in self.x.iter().zip(self.y.iter()) {
            let j = g.gradient(x);
            jtr += j * (y - g.eval(x));
            jtj += j * j.transpose();
        }
        (jtj, jtr)
    }

    /// 从 `p0` 出发迭代拟合.
    pub fn fit(&self, p0: Gaussian) -> GaussFit {
        if self.x.len() < 3 || !p0.is_finite() || p0.amplitude <= 0.0 || p0.sigma == 0.0 {
            return GaussFit::Degenerate;
        }

        let mut p = p0;
        let mut cost = self.cost(&p);
        let mut lambda = LAMBDA_INIT;
        if !cost.is_finite() {
            return GaussFit::Degenerate;
        }

        for _ in 0..MAX_ITER {
            if cost == 0.0 {
                return Self::accept(p);
            }
            let (jtj, jtr) = self.normal_equations(&p);
            if jtj.iter().chain(jtr.iter()).any(|v| !v.is_finite()) {
                return GaussFit::Degenerate;
            }

            // 增大阻尼直到误差下降
            loop {
                let a = jtj + Matrix3::from_diagonal(&(jtj.diagonal() * lambda));

                let improved = a.lu().solve(&jtr).and_then(|delta| {
                    let cand = p.step(&delta);
                    let cand_cost = self.cost(&cand);
                    (cand.is_finite() && cand_cost.is_finite() && cand_cost < cost)
                        .then_some((delta, cand, cand_cost))
                });

                match improved {
                    Some((delta, cand, cand_cost)) => {
                        let old = p.params();
                        let small_step = delta
                            .iter()
                            .zip(old.iter())
                            .all(|(d, v)| d.abs() <= XTOL * (v.abs() + XTOL));
                        let small_drop = cost - cand_cost <= FTOL * cost;

                        p = cand;
                        cost = cand_cost;
                        lambda = (lambda / 10.0).max(LAMBDA_MIN);
                        if small_step || small_drop {
                            return Self::accept(p);
                        }
                        break;
                    }
                    None => {
                        lambda *= 10.0;
                        if lambda > LAMBDA_MAX {
                            // 任何方向都无法继续下降, 已处于极小值.
                            return Self::accept(p);
                        }
                    }
                }
            }
        }

        GaussFit::Degenerate
    }

    fn accept(p: Gaussian) -> GaussFit {
        if p.is_finite() && p.sigma != 0.0 {
            GaussFit::Converged(p)
        } else {
            GaussFit::Degenerate
        }
    }
}
