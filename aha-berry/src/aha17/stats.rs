//! 体素统计量.

use crate::consts::aha::DECIMALS;
use crate::fitting::median;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 四舍五入到 [`DECIMALS`] 位小数, 相同距离时取偶数.
#[inline]
pub fn round_decimals(v: f64) -> f64 {
    let scale = 10f64.powi(DECIMALS);
    (v * scale).round_ties_even() / scale
}

fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

/// 单个节段的统计结果. 没有体素时均值与中位数都为 0.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SegmentStats {
    /// 均值.
    pub mean: f64,

    /// 中位数.
    pub median: f64,

    /// 节段内全部体素在定量参数图上的值, 按行优先顺序.
    pub voxels: Vec<f64>,
}

impl SegmentStats {
    /// 由体素值计算.
    pub fn from_voxels(voxels: Vec<f64>) -> Self {
        let m = mean(&voxels).map_or(0.0, round_decimals);
        let med = median(&voxels).map_or(0.0, round_decimals);
        Self {
            mean: m,
            median: med,
            voxels,
        }
    }

    /// 该节段是否没有任何体素?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }
}

/// 若干节段合并后的统计结果 (室间隔, 非室间隔, 全局). 只统计正值体素.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RegionStats {
    /// 均值. 没有正值体素时为 `None`.
    pub mean: Option<f64>,

    /// 中位数. 没有正值体素时为 `None`.
    pub median: Option<f64>,

    /// 参与统计的体素个数.
    pub voxels: usize,
}

impl RegionStats {
    /// 合并 `segments` 中的体素并计算统计量.
    pub fn pool<'a, I: IntoIterator<Item = &'a SegmentStats>>(segments: I) -> Self {
        let values: Vec<f64> = segments
            .into_iter()
            .flat_map(|s| s.voxels.iter().copied())
            .filter(|&v| v > 0.0)
            .collect();
        Self {
            mean: mean(&values).map(round_decimals),
            median: median(&values).map(round_decimals),
            voxels: values.len(),
        }
    }
}
