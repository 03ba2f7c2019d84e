//! 单个短轴切片的全部输入.

use super::{MapSlice, MaskSlice};
use crate::segment::{SegError, SegResult};
use crate::Idx2d;
use ndarray::Array2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 借用的单切片输入: 三个掩膜和一张定量参数图, 形状一致.
#[derive(Clone, Copy, Debug)]
pub struct SliceInput<'a> {
    /// LV 血池掩膜. 核心划分流程不使用它.
    pub lv_blood: MaskSlice<'a>,

    /// LV 心肌掩膜.
    pub lv_wall: MaskSlice<'a>,

    /// RV 血池掩膜.
    pub rv_blood: MaskSlice<'a>,

    /// 定量参数图.
    pub qmap: MapSlice<'a>,
}

impl<'a> SliceInput<'a> {
    /// 组装输入. 任意两者形状不一致时返回 `Err(SegError::ShapeMismatch)`.
    pub fn new(
        lv_blood: MaskSlice<'a>,
        lv_wall: MaskSlice<'a>,
        rv_blood: MaskSlice<'a>,
        qmap: MapSlice<'a>,
    ) -> SegResult<Self> {
        let expected = lv_wall.shape();
        for found in [lv_blood.shape(), rv_blood.shape(), qmap.shape()] {
            if found != expected {
                return Err(SegError::ShapeMismatch { expected, found });
            }
        }
        Ok(Self {
            lv_blood,
            lv_wall,
            rv_blood,
            qmap,
        })
    }

    /// 图像的分辨率 (高, 宽).
    #[inline]
    pub fn shape(&self) -> Idx2d {
        self.lv_wall.shape()
    }
}

/// 拥有所有权的单切片输入, 通常从磁盘加载或由体模生成.
///
/// 该结构仅保存数据; 形状一致性在 [`OwnedSliceInput::as_input`] 时检查.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct OwnedSliceInput {
    /// LV 血池掩膜.
    pub lv_blood: Array2<u8>,

    /// LV 心肌掩膜.
    pub lv_wall: Array2<u8>,

    /// RV 血池掩膜.
    pub rv_blood: Array2<u8>,

    /// 定量参数图.
    pub qmap: Array2<f64>,
}

impl OwnedSliceInput {
    /// 获得借用的输入视图.
    pub fn as_input(&self) -> SegResult<SliceInput<'_>> {
        SliceInput::new(
            MaskSlice::new(self.lv_blood.view()),
            MaskSlice::new(self.lv_wall.view()),
            MaskSlice::new(self.rv_blood.view()),
            MapSlice::new(self.qmap.view()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::OwnedSliceInput;
    use crate::segment::SegError;
    use ndarray::Array2;

    #[test]
    fn test_shape_mismatch() {
        let input = OwnedSliceInput {
            lv_blood: Array2::zeros((8, 8)),
            lv_wall: Array2::zeros((8, 8)),
            rv_blood: Array2::zeros((8, 8)),
            qmap: Array2::zeros((8, 9)),
        };
        match input.as_input() {
            Err(SegError::ShapeMismatch { expected, found }) => {
                assert_eq!(expected, (8, 8));
                assert_eq!(found, (8, 9));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
