//! 短轴切片基础数据结构.

mod input;
mod label;
mod level;
mod phantom;
pub mod sector;
mod slice;

pub use input::{OwnedSliceInput, SliceInput};
pub use label::SegmentLabel;
pub use level::SliceLevel;
pub use phantom::Phantom;
pub use sector::AngularSector;
pub use slice::{MapSlice, MaskSlice};
