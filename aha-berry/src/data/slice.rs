//! 短轴切片上的二维掩膜与定量参数图.

use crate::consts::gray::*;
use crate::{Idx2d, Idx2dF};
use ndarray::ArrayView2;
use std::ops::Index;

/// 不可变、借用的二维掩膜 (LV 血池, LV 心肌或 RV 血池).
///
/// 像素值通常为 0 或 1, 但不强制; 非零即前景.
#[derive(Clone, Copy, Debug)]
pub struct MaskSlice<'a> {
    /// 底层数据的轻量级视图.
    ///
    /// 这里有意把代码写死为 `ArrayView` 降低灵活性, 但使结构的意图更加明确.
    data: ArrayView2<'a, u8>,
}

impl Index<Idx2d> for MaskSlice<'_> {
    type Output = u8;

    #[inline]
    fn index(&self, index: Idx2d) -> &Self::Output {
        &self.data[index]
    }
}

impl<'a> MaskSlice<'a> {
    /// 直接初始化.
    #[inline]
    pub fn new(data: ArrayView2<'a, u8>) -> Self {
        Self { data }
    }

    /// 获得 **底层** 数据的一份不可变 shallow copy.
    #[inline]
    pub fn array_view(&self) -> ArrayView2<'a, u8> {
        self.data
    }

    /// 以行优先规则, 获取能迭代图像所有 `(索引, 像素值)` 的迭代器.
    #[inline]
    pub fn indexed_iter(&self) -> impl Iterator<Item = (Idx2d, &u8)> {
        self.data.indexed_iter()
    }

    /// 图像的分辨率 (高, 宽).
    #[inline]
    pub fn shape(&self) -> Idx2d {
        self.data.dim()
    }

    /// 以像素值为权重的质心 `(h, w)`. 如果图片为全背景则返回 `None`.
    ///
    /// 对二值掩膜而言, 这就是所有前景像素索引的平均值.
    pub fn centroid(&self) -> Option<Idx2dF> {
        let mut total = 0.0;
        let (mut sum_h, mut sum_w) = (0.0, 0.0);
        for ((h, w), &pix) in self.indexed_iter() {
            if is_background(pix) {
                continue;
            }
            let weight = pix as f64;
            total += weight;
            sum_h += weight * h as f64;
            sum_w += weight * w as f64;
        }
        (total > 0.0).then(|| (sum_h / total, sum_w / total))
    }
}

/// 不可变、借用的二维定量参数图 (如 T1 map).
#[derive(Clone, Copy, Debug)]
pub struct MapSlice<'a> {
    data: ArrayView2<'a, f64>,
}

impl Index<Idx2d> for MapSlice<'_> {
    type Output = f64;

    #[inline]
    fn index(&self, index: Idx2d) -> &Self::Output {
        &self.data[index]
    }
}

impl<'a> MapSlice<'a> {
    /// 直接初始化.
    #[inline]
    pub fn new(data: ArrayView2<'a, f64>) -> Self {
        Self { data }
    }

    /// 图像的分辨率 (高, 宽).
    #[inline]
    pub fn shape(&self) -> Idx2d {
        self.data.dim()
    }
}

#[cfg(test)]
mod tests {
    use super::MaskSlice;
    use ndarray::{array, Array2};

    fn f64_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    #[test]
    fn test_centroid_empty() {
        let data = Array2::<u8>::zeros((4, 5));
        let m = MaskSlice::new(data.view());
        assert_eq!(m.centroid(), None);
    }

    #[test]
    fn test_centroid_binary() {
        let data = array![[0u8, 1, 0], [1, 0, 1], [0, 1, 0]];
        let m = MaskSlice::new(data.view());
        let (h, w) = m.centroid().unwrap();
        assert!(f64_eq(h, 1.0));
        assert!(f64_eq(w, 1.0));
    }

    /// 非二值掩膜按像素值加权.
    #[test]
    fn test_centroid_weighted() {
        let data = array![[3u8, 0, 1]];
        let m = MaskSlice::new(data.view());
        let (h, w) = m.centroid().unwrap();
        assert!(f64_eq(h, 0.0));
        assert!(f64_eq(w, 0.5));
    }
}
