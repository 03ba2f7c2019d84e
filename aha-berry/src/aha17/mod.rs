//! AHA 17 节段统计.
//!
//! 基底, 中段, 心尖三个切片分别划分后, 切片内编号加上偏移量成为全局编号 `1..=16`,
//! 然后统计每个节段在定量参数图上的均值和中位数, 以及室间隔, 非室间隔和全局的合并统计量.
//! 第 17 节段 (心尖帽) 不出现在短轴切片上, 其统计值恒为空.

mod stats;

use crate::consts::aha::{NON_SEPTAL, SEGMENTS, SEPTAL};
use crate::segment::{SegError, Segmenter, SegmentOptions};
use crate::{SegmentLabel, SliceInput, SliceLevel};
use std::fmt::{Display, Formatter};

pub use stats::{round_decimals, RegionStats, SegmentStats};

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::iter::{IntoParallelIterator, ParallelIterator};
    }
}

/// AHA 17 节段统计错误.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aha17Error {
    /// 某个切片划分失败.
    Slice {
        /// 出错的切片.
        level: SliceLevel,
        /// 底层错误.
        source: SegError,
    },
}

impl Display for Aha17Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Aha17Error::Slice { level, source } => write!(f, "{level} slice: {source}"),
        }
    }
}

impl std::error::Error for Aha17Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Aha17Error::Slice { source, .. } => Some(source),
        }
    }
}

/// 三个切片的输入, 每个都可以缺失.
#[derive(Clone, Copy, Debug, Default)]
pub struct Aha17Input<'a> {
    slices: [Option<SliceInput<'a>>; 3],
}

impl<'a> Aha17Input<'a> {
    /// 全部缺失.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置 `level` 层级的切片.
    #[inline]
    pub fn with(mut self, level: SliceLevel, input: SliceInput<'a>) -> Self {
        self.slices[level.index()] = Some(input);
        self
    }

    /// 获取 `level` 层级的切片.
    #[inline]
    pub fn get(&self, level: SliceLevel) -> Option<&SliceInput<'a>> {
        self.slices[level.index()].as_ref()
    }
}

/// 单个切片的结果: 全局编号的标签图和该切片各节段的统计量.
struct SliceOutcome {
    label: Option<SegmentLabel>,
    stats: Vec<SegmentStats>,
}

fn run_slice(
    level: SliceLevel,
    input: Option<&SliceInput>,
    segmenter: &Segmenter,
) -> Result<SliceOutcome, Aha17Error> {
    let count = level.segment_count();
    let Some(input) = input else {
        log::debug!("{level} slice missing, statistics set to zero");
        return Ok(SliceOutcome {
            label: None,
            stats: vec![SegmentStats::default(); count.get()],
        });
    };

    let seg = segmenter
        .run(&input.lv_blood, &input.lv_wall, &input.rv_blood, count)
        .map_err(|source| Aha17Error::Slice { level, source })?;
    log::debug!("{level} slice: insertion = {:?}", seg.insertion);

    let label = seg.into_label();
    // 局部编号 1..=n, 最大为 6.
    let stats = (1..=count.get() as u8)
        .map(|l| SegmentStats::from_voxels(label.values_in(&input.qmap, l)))
        .collect();
    Ok(SliceOutcome {
        label: Some(label.offset(level.label_offset())),
        stats,
    })
}

/// 三个切片并行处理.
#[cfg(feature = "rayon")]
fn run_all(input: &Aha17Input, segmenter: &Segmenter) -> Result<Vec<SliceOutcome>, Aha17Error> {
    SliceLevel::ALL
        .into_par_iter()
        .map(|level| run_slice(level, input.get(level), segmenter))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn run_all(input: &Aha17Input, segmenter: &Segmenter) -> Result<Vec<SliceOutcome>, Aha17Error> {
    SliceLevel::ALL
        .into_iter()
        .map(|level| run_slice(level, input.get(level), segmenter))
        .collect()
}

/// AHA 17 节段统计结果.
#[derive(Clone, Debug)]
pub struct Aha17 {
    segments: Vec<SegmentStats>,
    labels: [Option<SegmentLabel>; 3],
    septal: RegionStats,
    non_septal: RegionStats,
    global: RegionStats,
}

impl Aha17 {
    /// 第 `n` 节段 (`1..=17`) 的统计量. `n` 越界时程序 panic.
    #[inline]
    pub fn segment(&self, n: usize) -> &SegmentStats {
        assert!((1..=SEGMENTS).contains(&n), "节段编号 `{n}` 越界");
        &self.segments[n - 1]
    }

    /// 全部 17 个节段的统计量.
    #[inline]
    pub fn segments(&self) -> &[SegmentStats] {
        &self.segments
    }

    /// 17 个节段的均值.
    pub fn mean17(&self) -> [f64; SEGMENTS] {
        std::array::from_fn(|i| self.segments[i].mean)
    }

    /// 17 个节段的中位数.
    pub fn median17(&self) -> [f64; SEGMENTS] {
        std::array::from_fn(|i| self.segments[i].median)
    }

    /// `level` 层级的全局编号标签图. 切片缺失时为 `None`.
    #[inline]
    pub fn label(&self, level: SliceLevel) -> Option<&SegmentLabel> {
        self.labels[level.index()].as_ref()
    }

    /// 室间隔统计量.
    #[inline]
    pub fn septal(&self) -> &RegionStats {
        &self.septal
    }

    /// 非室间隔统计量.
    #[inline]
    pub fn non_septal(&self) -> &RegionStats {
        &self.non_septal
    }

    /// 全局统计量.
    #[inline]
    pub fn global(&self) -> &RegionStats {
        &self.global
    }
}

/// 以默认参数计算 AHA 17 节段统计.
///
/// 任意一个切片划分失败时返回该切片的错误.
pub fn aha17(input: &Aha17Input) -> Result<Aha17, Aha17Error> {
    aha17_with(input, &SegmentOptions::default())
}

/// 以给定参数计算 AHA 17 节段统计. 打开 `rayon` feature 时三个切片并行处理.
pub fn aha17_with(input: &Aha17Input, opts: &SegmentOptions) -> Result<Aha17, Aha17Error> {
    let outcomes = run_all(input, &Segmenter::new(*opts))?;

    let mut segments = Vec::with_capacity(SEGMENTS);
    let mut labels: [Option<SegmentLabel>; 3] = Default::default();
    for (level, outcome) in SliceLevel::ALL.into_iter().zip(outcomes) {
        debug_assert_eq!(segments.len(), level.segment_range().start);
        segments.extend(outcome.stats);
        labels[level.index()] = outcome.label;
    }
    // 心尖帽
    segments.push(SegmentStats::default());

    let pick = |ids: &[u8]| -> RegionStats {
        RegionStats::pool(ids.iter().map(|&n| &segments[n as usize - 1]))
    };
    let septal = pick(&SEPTAL);
    let non_septal = pick(&NON_SEPTAL);
    let global = RegionStats::pool(&segments);

    Ok(Aha17 {
        segments,
        labels,
        septal,
        non_septal,
        global,
    })
}
