//! 把扇区光栅化到心肌掩膜上.

use crate::boundary::SectorBoundaries;
use crate::polar::{radii, PolarGrid};
use crate::{Idx2dF, MaskSlice, SegmentLabel};
use ndarray::Array1;

/// 为心肌掩膜上的每个前景像素打上扇区标签 `1..=boundaries.len()`.
///
/// 每个扇区以 `angle_step` 为步长在全部半径上采样 (左闭右开), 后面的扇区覆盖前面的扇区.
/// 最后把心肌之外的标签全部清零. 落在采样间隙中的心肌像素保持为 0.
pub fn label_sectors(
    boundaries: &SectorBoundaries,
    wall: &MaskSlice,
    center: Idx2dF,
    radius_step: f64,
    angle_step: f64,
) -> SegmentLabel {
    let shape = wall.shape();
    let r = radii(shape, radius_step);
    let mut label = SegmentLabel::zeros(shape);

    for (i, sector) in boundaries.sectors(center).iter().enumerate() {
        let angles = Array1::from_iter(sector.sample_angles(angle_step));
        let grid = PolarGrid::with_radii(center, shape, r.view(), angles.view());
        // 扇区数量最多为 6, 不会溢出.
        label.fill_batch(grid.flattened(), (i + 1) as u8);
    }

    label.retain_within(wall);
    label
}
