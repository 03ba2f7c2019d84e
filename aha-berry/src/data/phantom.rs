//! 合成心脏短轴体模. 用于测试和消融实验.
//!
//! 体模由三部分组成:
//!
//! 1. 圆形 LV 血池 (`r < inner`);
//! 2. 环形 LV 心肌 (`inner <= r <= outer`);
//! 3. 紧贴心肌外侧的 RV 血池, 只出现在给定角度区间内 (`outer < r <= outer + rv_thickness`).

use super::{AngularSector, OwnedSliceInput};
use crate::{Idx2d, Idx2dF};
use ndarray::Array2;

/// 像素类别.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Tissue {
    LvBlood,
    LvWall,
    RvBlood,
    Other,
}

/// 合成短轴体模.
#[derive(Copy, Clone, Debug)]
pub struct Phantom {
    shape: Idx2d,
    center: Idx2dF,
    inner: f64,
    outer: f64,
    rv: AngularSector,
    rv_thickness: f64,
    wall_value: f64,
}

impl Phantom {
    /// 以 `center` 为 LV 中心创建体模. 默认心肌内外半径为 8 和 14,
    /// RV 占据 `[60, 120)` 度, 厚度 12 像素, 心肌参数值恒为 1000.
    pub fn new(shape: Idx2d, center: Idx2dF) -> Self {
        Self {
            shape,
            center,
            inner: 8.0,
            outer: 14.0,
            rv: AngularSector::new(center, 60.0, 120.0),
            rv_thickness: 12.0,
            wall_value: 1000.0,
        }
    }

    /// 设置心肌内外半径.
    ///
    /// 要求 `0 <= inner <= outer`, 否则程序 panic.
    pub fn wall_radii(mut self, inner: f64, outer: f64) -> Self {
        assert!(0.0 <= inner && inner <= outer, "半径 `{inner}, {outer}` 非法");
        self.inner = inner;
        self.outer = outer;
        self
    }

    /// 设置 RV 所在的角度区间 `[start, end)` (单位: 度, 可以跨越 0°).
    pub fn rv_arc(mut self, start: f64, end: f64) -> Self {
        self.rv = AngularSector::new(self.center, start, end);
        self
    }

    /// 设置 RV 的径向厚度.
    pub fn rv_thickness(mut self, thickness: f64) -> Self {
        self.rv_thickness = thickness;
        self
    }

    /// 设置心肌像素的参数值.
    pub fn wall_value(mut self, value: f64) -> Self {
        self.wall_value = value;
        self
    }

    /// 获取 RV 扇区.
    #[inline]
    pub fn rv(&self) -> AngularSector {
        self.rv
    }

    /// 图像分辨率.
    #[inline]
    pub fn shape(&self) -> Idx2d {
        self.shape
    }

    fn tissue(&self, pos: Idx2d) -> Tissue {
        let dh = pos.0 as f64 - self.center.0;
        let dw = pos.1 as f64 - self.center.1;
        let r = dh.hypot(dw);
        if r < self.inner {
            Tissue::LvBlood
        } else if r <= self.outer {
            Tissue::LvWall
        } else if r <= self.outer + self.rv_thickness && self.rv.contains(pos) {
            Tissue::RvBlood
        } else {
            Tissue::Other
        }
    }

    fn mask_of(&self, tissue: Tissue) -> Array2<u8> {
        Array2::from_shape_fn(self.shape, |pos| u8::from(self.tissue(pos) == tissue))
    }

    /// LV 血池掩膜.
    #[inline]
    pub fn lv_blood(&self) -> Array2<u8> {
        self.mask_of(Tissue::LvBlood)
    }

    /// LV 心肌掩膜.
    #[inline]
    pub fn lv_wall(&self) -> Array2<u8> {
        self.mask_of(Tissue::LvWall)
    }

    /// RV 血池掩膜.
    #[inline]
    pub fn rv_blood(&self) -> Array2<u8> {
        self.mask_of(Tissue::RvBlood)
    }

    /// 定量参数图: 心肌为 `wall_value`, 其余为 0.
    pub fn qmap(&self) -> Array2<f64> {
        Array2::from_shape_fn(self.shape, |pos| match self.tissue(pos) {
            Tissue::LvWall => self.wall_value,
            _ => 0.0,
        })
    }

    /// 生成完整的单切片输入.
    pub fn build(&self) -> OwnedSliceInput {
        OwnedSliceInput {
            lv_blood: self.lv_blood(),
            lv_wall: self.lv_wall(),
            rv_blood: self.rv_blood(),
            qmap: self.qmap(),
        }
    }
}
