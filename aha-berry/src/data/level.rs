//! 短轴切片层级.

use crate::boundary::SegmentCount;
use std::fmt::{Display, Formatter};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 参与 AHA 17 节段划分的三个短轴切片层级.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SliceLevel {
    /// 基底段, 全局节段 1 ~ 6.
    Basal,

    /// 中段, 全局节段 7 ~ 12.
    Mid,

    /// 心尖段, 全局节段 13 ~ 16.
    Apical,
}

impl SliceLevel {
    /// 全部层级, 按基底 -> 中段 -> 心尖排列.
    pub const ALL: [SliceLevel; 3] = [Self::Basal, Self::Mid, Self::Apical];

    /// 该层级的节段个数.
    #[inline]
    pub const fn segment_count(&self) -> SegmentCount {
        match self {
            Self::Basal | Self::Mid => SegmentCount::Six,
            Self::Apical => SegmentCount::Four,
        }
    }

    /// 切片内编号 `1..=n` 转换为全局 AHA 编号时需要加上的偏移量.
    #[inline]
    pub const fn label_offset(&self) -> u8 {
        match self {
            Self::Basal => 0,
            Self::Mid => 6,
            Self::Apical => 12,
        }
    }

    /// 该层级节段在 17 节段数组中的下标范围 (从 0 开始).
    #[inline]
    pub fn segment_range(&self) -> Range<usize> {
        let start = self.label_offset() as usize;
        start..start + self.segment_count().get()
    }

    /// 在 [`Self::ALL`] 中的下标.
    #[inline]
    pub const fn index(&self) -> usize {
        match self {
            Self::Basal => 0,
            Self::Mid => 1,
            Self::Apical => 2,
        }
    }

    /// 层级名称.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Basal => "basal",
            Self::Mid => "mid",
            Self::Apical => "apical",
        }
    }
}

impl Display for SliceLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
