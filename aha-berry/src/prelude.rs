//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::{Idx2d, Idx2dF};

pub use crate::data::{
    AngularSector, MapSlice, MaskSlice, OwnedSliceInput, Phantom, SegmentLabel, SliceInput,
    SliceLevel,
};

pub use crate::aha17::{aha17, aha17_with, Aha17, Aha17Error, Aha17Input};
pub use crate::boundary::{sector_boundaries, SectorBoundaries, SegmentCount};
pub use crate::landmark::Insertion;
pub use crate::segment::{
    segment, segment_with, SegError, SegResult, SegmentOptions, Segmentation, Segmenter,
};

pub use crate::dataset::{home_dataset_dir_with, load_slice, Case};
