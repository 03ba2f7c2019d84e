//! RV 径向投影曲线.

use super::PolarGrid;
use crate::consts::PROFILE_BINS;
use crate::{Idx2dF, MaskSlice};
use ndarray::{Array1, ArrayView1};

/// 每个整数角度一个值的投影曲线, 长度恒为 [`PROFILE_BINS`].
#[derive(Clone, Debug, PartialEq)]
pub struct AngularProfile {
    data: Array1<f64>,
}

impl AngularProfile {
    /// 从已有数据创建. 长度不是 [`PROFILE_BINS`] 时返回 `None`.
    pub fn new(data: Array1<f64>) -> Option<Self> {
        (data.len() == PROFILE_BINS).then_some(Self { data })
    }

    /// 以 `center` 为原点, 沿 `0°, 1°, ..., 359°` 各条射线累加 RV 掩膜的像素值.
    ///
    /// 同一像素被多次采样时重复累加, 越界点直接忽略.
    pub fn from_rv(rv: &MaskSlice, center: Idx2dF, radius_step: f64) -> Self {
        let angles = Array1::from_shape_fn(PROFILE_BINS, |d| d as f64);
        let grid = PolarGrid::new(center, rv.shape(), radius_step, angles.view());
        let data = Array1::from_shape_fn(PROFILE_BINS, |d| {
            grid.column(d).map(|pos| rv[pos] as f64).sum()
        });
        Self { data }
    }

    /// 曲线数据.
    #[inline]
    pub fn view(&self) -> ArrayView1<f64> {
        self.data.view()
    }

    /// 最大值所在的角度. 多个最大值时取第一个.
    pub fn argmax(&self) -> usize {
        self.data
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, &v)| {
                if v > best.1 {
                    (i, v)
                } else {
                    best
                }
            })
            .0
    }
}
