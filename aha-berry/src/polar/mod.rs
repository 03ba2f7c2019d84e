//! 极坐标采样.
//!
//! 以某个实数坐标为原点, 沿若干射线每隔固定半径取一个点, 四舍五入
//! (相同距离时取偶数) 到最近的像素, 并丢弃图像之外的点.
//!
//! 采样网格只计算一次, 之后可以按单条射线 (一列) 或全部射线 (展平) 读取.

use crate::data::sector::angle_to_arc;
use crate::{Idx2d, Idx2dF};
use ndarray::{Array1, Array2, ArrayView1};
use num::ToPrimitive;

mod profile;

pub use profile::AngularProfile;

/// 生成半径序列 `0, step, 2·step, ...`, 严格小于 `max(H, W)`.
///
/// `step` 必须为正数, 否则程序 panic.
pub fn radii(shape: Idx2d, step: f64) -> Array1<f64> {
    assert!(step > 0.0, "半径步长 `{step}` 必须为正数");
    let limit = shape.0.max(shape.1) as f64;
    let n = (limit / step).ceil() as usize;
    Array1::from_shape_fn(n, |k| k as f64 * step)
}

/// 把 `(r, θ)` 映射为像素坐标. 越界时返回 `None`.
fn project(center: Idx2dF, r: f64, angle: f64, (height, width): Idx2d) -> Option<Idx2d> {
    let theta = angle_to_arc(angle);
    let h = (-(r * theta.sin()) + center.0).round_ties_even();
    let w = (r * theta.cos() + center.1).round_ties_even();
    // 负数 (以及 NaN) 在此处被丢弃, `-0.0` 被视为 0.
    let h = h.to_usize()?;
    let w = w.to_usize()?;
    (h < height && w < width).then_some((h, w))
}

/// 读取方式.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// 只取第 `n` 条射线.
    Column(usize),

    /// 全部射线, 按 "半径优先, 角度其次" 展平.
    All,
}

/// 预先计算的极坐标采样网格. 行对应半径, 列对应角度.
#[derive(Clone, Debug)]
pub struct PolarGrid {
    shape: Idx2d,
    pos: Array2<Option<Idx2d>>,
}

impl PolarGrid {
    /// 以 `center` 为原点, 在分辨率为 `shape` 的图像上按给定半径和角度 (单位: 度) 采样.
    pub fn with_radii(
        center: Idx2dF,
        shape: Idx2d,
        radii: ArrayView1<f64>,
        angles: ArrayView1<f64>,
    ) -> Self {
        let pos = Array2::from_shape_fn((radii.len(), angles.len()), |(i, j)| {
            project(center, radii[i], angles[j], shape)
        });
        Self { shape, pos }
    }

    /// 半径序列由 [`radii`] 生成.
    pub fn new(center: Idx2dF, shape: Idx2d, radius_step: f64, angles: ArrayView1<f64>) -> Self {
        let r = radii(shape, radius_step);
        Self::with_radii(center, shape, r.view(), angles)
    }

    /// 目标图像的分辨率.
    #[inline]
    pub fn shape(&self) -> Idx2d {
        self.shape
    }

    /// 半径的数量.
    #[inline]
    pub fn n_radii(&self) -> usize {
        self.pos.nrows()
    }

    /// 射线 (角度) 的数量.
    #[inline]
    pub fn n_angles(&self) -> usize {
        self.pos.ncols()
    }

    /// 第 `n` 条射线上所有在图像内的像素, 由近及远. 同一像素可能出现多次.
    ///
    /// `n` 越界时程序 panic.
    pub fn column(&self, n: usize) -> impl Iterator<Item = Idx2d> + '_ {
        assert!(n < self.n_angles(), "射线 `{n}` 越界");
        self.pos.column(n).into_iter().flatten().copied()
    }

    /// 所有射线上所有在图像内的像素.
    pub fn flattened(&self) -> impl Iterator<Item = Idx2d> + '_ {
        self.pos.iter().flatten().copied()
    }

    /// 按 `sel` 收集像素坐标.
    pub fn sample(&self, sel: Selection) -> Vec<Idx2d> {
        match sel {
            Selection::Column(n) => self.column(n).collect(),
            Selection::All => self.flattened().collect(),
        }
    }
}
