//! 运行时错误.

use crate::Idx2d;
use std::fmt::{Display, Formatter};

/// 单个切片划分的运行时错误.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegError {
    /// 输入图像形状不一致.
    ShapeMismatch {
        /// 以 LV 心肌掩膜为准的形状.
        expected: Idx2d,
        /// 实际遇到的形状.
        found: Idx2d,
    },

    /// LV 心肌掩膜为空, 无法计算质心.
    EmptyWall,

    /// 投影曲线上没有任何角度超过门限, 即找不到 RV 与 LV 的附着处.
    NoAttachment,

    /// 不支持的节段数. 仅支持 4 和 6.
    UnsupportedSegmentCount(usize),
}

impl Display for SegError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SegError::ShapeMismatch { expected, found } => write!(
                f,
                "shape mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            SegError::EmptyWall => f.write_str("LV wall mask is empty"),
            SegError::NoAttachment => f.write_str("no RV attachment found on the LV wall"),
            SegError::UnsupportedSegmentCount(n) => {
                write!(f, "unsupported segment count {n}, expected 4 or 6")
            }
        }
    }
}

impl std::error::Error for SegError {}
