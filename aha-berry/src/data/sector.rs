//! 短轴切片上的角度扇区.
//!
//! 我们一般使用行优先编码存储二维图像. 其中行就是 "Height" (垂直方向), 列就是 "Width" (水平方向).
//! 扇区的角度以度为单位, 0° 指向 "Width" 增加的方向, 90° 指向 "Height" 减少的方向,
//! 即在屏幕上看是逆时针方向增长的. 这与 [`crate::polar::PolarGrid`] 的采样约定一致.
//!
//! 与一般的扇区不同, 这里的起止角度是 **相位展开** 后的值, 不要求落在 `[0, 360)` 之内,
//! 这样跨越 0°/360° 接缝的扇区仍然是一个连续递增的区间.

use crate::{Idx2d, Idx2dF};
use std::fmt::Formatter;

/// 角度转换为弧度. 先除以 180 再乘以 π, 运算顺序会影响像素取整.
#[inline]
pub(crate) fn angle_to_arc(angle: f64) -> f64 {
    angle / 180.0 * std::f64::consts::PI
}

/// 弧度转换为角度.
#[inline]
pub(crate) fn arc_to_angle(arc: f64) -> f64 {
    arc * 180.0 * std::f64::consts::FRAC_1_PI
}

/// 以某个实数坐标为顶点, 从 `start` 度扫到 `end` 度 (左闭右开) 的扇区.
///
/// 当 `end <= start` 时扇区为空. 该结构不负责检测图像越界.
#[derive(Copy, Clone, PartialEq)]
pub struct AngularSector {
    /// 中心坐标 `(h, w)`.
    center: Idx2dF,
    /// 展开后的起始角度.
    start: f64,
    /// 展开后的终止角度 (不包含).
    end: f64,
}

/// 压缩到一行.
impl std::fmt::Debug for AngularSector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "AngularSector {{ center: ({:.3}, {:.3}), [{:.2}°, {:.2}°) }}",
            self.center.0, self.center.1, self.start, self.end
        ))
    }
}

impl AngularSector {
    /// 以 `center` 为顶点, 创建从 `start` 度到 `end` 度的扇区.
    ///
    /// 如果任一参数不是有限值, 则程序 panic.
    pub fn new(center: Idx2dF, start: f64, end: f64) -> Self {
        assert!(
            center.0.is_finite() && center.1.is_finite(),
            "扇区中心 `{center:?}` 非法"
        );
        assert!(
            start.is_finite() && end.is_finite(),
            "扇区角度 `[{start}, {end})` 非法"
        );
        Self { center, start, end }
    }

    /// 创建全区域扇区 (圆), 从 0° 开始.
    #[inline]
    pub fn new_circle(center: Idx2dF) -> Self {
        Self::new(center, 0.0, 360.0)
    }

    /// 获取中心点.
    #[inline]
    pub fn center(&self) -> Idx2dF {
        self.center
    }

    /// 展开后的起始角度.
    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// 展开后的终止角度 (不包含).
    #[inline]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// 获取本扇区扫过的角度. 空扇区返回 0.
    #[inline]
    pub fn span(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// 扇区是否为空?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// 在 `[start, end)` 内以 `step` 为步长生成采样角度,
    /// 即 `start, start + step, ...`, 共 `ceil((end - start) / step)` 个.
    ///
    /// `step` 必须为正数, 否则程序 panic.
    pub fn sample_angles(&self, step: f64) -> impl ExactSizeIterator<Item = f64> {
        assert!(step > 0.0, "步长 `{step}` 必须为正数");
        let n = if self.is_empty() {
            0
        } else {
            ((self.end - self.start) / step).ceil() as usize
        };
        let start = self.start;
        (0..n).map(move |k| start + k as f64 * step)
    }

    /// 获取点 `(h, w)` 相对于 `self.center` 的角度, 取值范围为 `[0, 360)`.
    ///
    /// # 角度规范
    ///
    /// - w 增加的方向为 `0°`;
    /// - h 减少的方向为 `90°`;
    /// - w 减少的方向为 `180°`;
    /// - h 增加的方向为 `270°`.
    pub fn angle_to(&self, (h, w): Idx2d) -> f64 {
        let dh = h as f64 - self.center.0;
        let dw = w as f64 - self.center.1;
        let raw = arc_to_angle(f64::atan2(-dh, dw));
        // -0.0 和极小负数都会落到 360 上, 需要再压一次.
        let angle = raw.rem_euclid(360.0);
        if angle >= 360.0 {
            0.0
        } else {
            angle
        }
    }

    /// 判断点 `point` 是否被包含在扇区中. 扇区中心本身视为角度 0°.
    pub fn contains(&self, point: Idx2d) -> bool {
        if self.is_empty() {
            return false;
        }
        let span = self.end - self.start;
        if span >= 360.0 {
            return true;
        }
        let offset = (self.angle_to(point) - self.start).rem_euclid(360.0);
        offset < span
    }
}
