//! 划分参数.

use crate::consts::{
    ANGLE_STEP, ATTACHMENT_THRESHOLD, MEDIAN_KERNEL, RADIUS_STEP, SIGMA_SPAN,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 划分流程的可调参数. 默认值即 [`crate::consts`] 中的常量.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SegmentOptions {
    radius_step: f64,
    angle_step: f64,
    attachment_threshold: f64,
    sigma_span: f64,
    median_kernel: usize,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            radius_step: RADIUS_STEP,
            angle_step: ANGLE_STEP,
            attachment_threshold: ATTACHMENT_THRESHOLD,
            sigma_span: SIGMA_SPAN,
            median_kernel: MEDIAN_KERNEL,
        }
    }
}

impl SegmentOptions {
    /// 创建参数.
    ///
    /// 两个步长必须为正的有限值, 门限与 sigma 倍数必须为有限值,
    /// 中值滤波窗口必须为正奇数, 否则返回 `None`.
    pub fn new(
        radius_step: f64,
        angle_step: f64,
        attachment_threshold: f64,
        sigma_span: f64,
        median_kernel: usize,
    ) -> Option<Self> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let ok = positive(radius_step)
            && positive(angle_step)
            && attachment_threshold.is_finite()
            && sigma_span.is_finite()
            && median_kernel % 2 == 1;
        ok.then_some(Self {
            radius_step,
            angle_step,
            attachment_threshold,
            sigma_span,
            median_kernel,
        })
    }

    /// 沿射线采样时相邻半径的距离.
    #[inline]
    pub fn radius_step(&self) -> f64 {
        self.radius_step
    }

    /// 光栅化扇区时相邻射线的夹角.
    #[inline]
    pub fn angle_step(&self) -> f64 {
        self.angle_step
    }

    /// 判定 RV 附着的投影门限.
    #[inline]
    pub fn attachment_threshold(&self) -> f64 {
        self.attachment_threshold
    }

    /// 插入点距高斯均值的 sigma 倍数.
    #[inline]
    pub fn sigma_span(&self) -> f64 {
        self.sigma_span
    }

    /// 中值滤波窗口大小.
    #[inline]
    pub fn median_kernel(&self) -> usize {
        self.median_kernel
    }
}
