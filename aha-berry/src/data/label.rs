//! 节段标签图.

use super::{MapSlice, MaskSlice};
use crate::consts::gray::*;
use crate::Idx2d;
use ndarray::{Array2, ArrayView2};
use std::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 拥有所有权的节段标签图. 与心肌掩膜同形状, 背景为 0, 心肌像素为其所属节段编号.
///
/// 由划分流程一次性生成, 返回后归调用者所有, 流程本身不会再修改它.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentLabel {
    data: Array2<u8>,
}

impl Index<Idx2d> for SegmentLabel {
    type Output = u8;

    #[inline]
    fn index(&self, index: Idx2d) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<Idx2d> for SegmentLabel {
    #[inline]
    fn index_mut(&mut self, index: Idx2d) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl SegmentLabel {
    /// 创建全背景标签图.
    #[inline]
    pub(crate) fn zeros(shape: Idx2d) -> Self {
        Self {
            data: Array2::zeros(shape),
        }
    }

    /// 将 `it` 中的每个索引对应的像素改为 `label`. 后写入者覆盖先写入者.
    pub(crate) fn fill_batch<I: IntoIterator<Item = Idx2d>>(&mut self, it: I, label: u8) {
        for pos in it.into_iter() {
            self[pos] = label;
        }
    }

    /// 将 `mask` 中的背景位置全部清零.
    ///
    /// 如果形状不一致, 则程序 panic.
    pub(crate) fn retain_within(&mut self, mask: &MaskSlice) {
        assert_eq!(self.shape(), mask.shape(), "标签图与掩膜形状不一致");
        self.data.zip_mut_with(&mask.array_view(), |label, &m| {
            if is_background(m) {
                *label = BACKGROUND;
            }
        });
    }

    /// 获得底层数据的一份不可变 shallow copy.
    #[inline]
    pub fn array_view(&self) -> ArrayView2<u8> {
        self.data.view()
    }

    /// 直接获得底层数据.
    #[inline]
    pub fn into_raw(self) -> Array2<u8> {
        self.data
    }

    /// 图像的分辨率 (高, 宽).
    #[inline]
    pub fn shape(&self) -> Idx2d {
        self.data.dim()
    }

    /// 统计图像中值为 `label` 的像素总个数.
    #[inline]
    pub fn count(&self, label: u8) -> usize {
        self.data.iter().filter(|&p| *p == label).count()
    }

    /// 图像中出现过的最大标签. 全背景时为 0.
    #[inline]
    pub fn max_label(&self) -> u8 {
        self.data.iter().copied().max().unwrap_or(BACKGROUND)
    }

    /// 以行优先规则, 获取所有值为 `label` 的像素索引.
    pub fn positions<B: FromIterator<Idx2d>>(&self, label: u8) -> B {
        self.data
            .indexed_iter()
            .filter_map(|(pos, &pix)| (pix == label).then_some(pos))
            .collect()
    }

    /// 以行优先规则, 收集标签为 `label` 的像素在 `map` 上对应的值.
    ///
    /// 如果形状不一致, 则程序 panic.
    pub fn values_in(&self, map: &MapSlice, label: u8) -> Vec<f64> {
        assert_eq!(self.shape(), map.shape(), "标签图与参数图形状不一致");
        self.data
            .indexed_iter()
            .filter_map(|(pos, &pix)| (pix == label).then(|| map[pos]))
            .collect()
    }

    /// 将所有非零标签加上 `offset` (饱和加法), 用于把切片内编号转换为全局 AHA 编号.
    pub fn offset(mut self, offset: u8) -> Self {
        self.data.mapv_inplace(|p| {
            if is_foreground(p) {
                p.saturating_add(offset)
            } else {
                p
            }
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::SegmentLabel;
    use crate::{MapSlice, MaskSlice};
    use ndarray::array;

    #[test]
    fn test_fill_and_retain() {
        let mut label = SegmentLabel::zeros((2, 3));
        label.fill_batch([(0, 0), (0, 1), (1, 2)], 1);
        // 后写入者覆盖.
        label.fill_batch([(0, 1)], 2);
        assert_eq!(label.count(1), 2);
        assert_eq!(label.count(2), 1);

        let wall = array![[1u8, 1, 0], [0, 0, 0]];
        label.retain_within(&MaskSlice::new(wall.view()));
        assert_eq!(label.into_raw(), array![[1u8, 2, 0], [0, 0, 0]]);
    }

    #[test]
    fn test_values_and_offset() {
        let mut label = SegmentLabel::zeros((2, 2));
        label.fill_batch([(0, 0), (1, 1)], 3);
        label.fill_batch([(0, 1)], 1);
        let map = array![[10.0, 20.0], [30.0, 40.0]];
        assert_eq!(label.values_in(&MapSlice::new(map.view()), 3), vec![10.0, 40.0]);
        assert_eq!(label.positions::<Vec<_>>(1), vec![(0, 1)]);

        let label = label.offset(6);
        assert_eq!(label.max_label(), 9);
        assert_eq!(label[(1, 0)], 0);
        assert_eq!(label[(0, 1)], 7);
    }
}
