//! 单个短轴切片的心肌节段划分.
//!
//! 流程: 形状检查 -> 心肌质心 -> RV 径向投影 -> 插入点 -> 边界角度 -> 扇区光栅化.
//! 每一步都是纯函数, 不持有任何全局状态.

mod error;
mod options;

use crate::boundary::{sector_boundaries, SectorBoundaries, SegmentCount};
use crate::labeler::label_sectors;
use crate::landmark::{locate_insertion, Insertion};
use crate::polar::AngularProfile;
use crate::{Idx2dF, MaskSlice, SegmentLabel};

pub use error::SegError;
pub use options::SegmentOptions;

/// 节段划分运行时错误.
pub type SegResult<T> = Result<T, SegError>;

/// 划分结果以及中间量.
#[derive(Clone, Debug)]
pub struct Segmentation {
    /// LV 心肌质心.
    pub center: Idx2dF,

    /// RV 插入点.
    pub insertion: Insertion,

    /// 扇区边界角度.
    pub boundaries: SectorBoundaries,

    /// 节段标签图, 取值 `0..=n`.
    pub label: SegmentLabel,
}

impl Segmentation {
    /// 丢弃中间量, 只保留标签图.
    #[inline]
    pub fn into_label(self) -> SegmentLabel {
        self.label
    }
}

/// 节段划分器.
#[derive(Copy, Clone, Debug, Default)]
pub struct Segmenter {
    opts: SegmentOptions,
}

impl Segmenter {
    /// 使用给定参数.
    #[inline]
    pub fn new(opts: SegmentOptions) -> Self {
        Self { opts }
    }

    /// 参数.
    #[inline]
    pub fn options(&self) -> &SegmentOptions {
        &self.opts
    }

    /// 划分一个切片.
    ///
    /// `lv_blood` 只参与形状检查. 任何输入错误都不会产生部分写入的标签图.
    pub fn run(
        &self,
        lv_blood: &MaskSlice,
        lv_wall: &MaskSlice,
        rv_blood: &MaskSlice,
        count: SegmentCount,
    ) -> SegResult<Segmentation> {
        let expected = lv_wall.shape();
        for found in [lv_blood.shape(), rv_blood.shape()] {
            if found != expected {
                return Err(SegError::ShapeMismatch { expected, found });
            }
        }

        let center = lv_wall.centroid().ok_or(SegError::EmptyWall)?;
        let profile = AngularProfile::from_rv(rv_blood, center, self.opts.radius_step());
        let insertion = locate_insertion(&profile, &self.opts)?;
        let boundaries = sector_boundaries(insertion, count);
        log::trace!(
            "center = ({:.2}, {:.2}), insertion = {insertion:?}, boundaries = {:?}",
            center.0,
            center.1,
            boundaries.as_slice()
        );

        let label = label_sectors(
            &boundaries,
            lv_wall,
            center,
            self.opts.radius_step(),
            self.opts.angle_step(),
        );
        Ok(Segmentation {
            center,
            insertion,
            boundaries,
            label,
        })
    }
}

/// 以默认参数划分一个切片, 返回标签图.
pub fn segment(
    lv_blood: &MaskSlice,
    lv_wall: &MaskSlice,
    rv_blood: &MaskSlice,
    count: SegmentCount,
) -> SegResult<SegmentLabel> {
    segment_with(lv_blood, lv_wall, rv_blood, count, &SegmentOptions::default())
}

/// 以给定参数划分一个切片, 返回标签图.
pub fn segment_with(
    lv_blood: &MaskSlice,
    lv_wall: &MaskSlice,
    rv_blood: &MaskSlice,
    count: SegmentCount,
    opts: &SegmentOptions,
) -> SegResult<SegmentLabel> {
    Segmenter::new(*opts)
        .run(lv_blood, lv_wall, rv_blood, count)
        .map(Segmentation::into_label)
}

#[cfg(test)]
mod tests {
    use super::{segment, SegError, Segmenter};
    use crate::boundary::SegmentCount;
    use crate::landmark::Insertion;
    use crate::{AngularSector, MaskSlice, Phantom};
    use ndarray::Array2;

    fn ring(shape: (usize, usize), c: (f64, f64), inner: f64, outer: f64) -> Array2<u8> {
        Array2::from_shape_fn(shape, |(h, w)| {
            let r = (h as f64 - c.0).hypot(w as f64 - c.1);
            u8::from(inner <= r && r <= outer)
        })
    }

    /// 半径 10 的心肌环, RV 为右上方 (0° ~ 90°) 的四分之一圆盘.
    #[test]
    fn test_ring_with_quarter_disc() {
        let shape = (100, 100);
        let wall = ring(shape, (50.0, 50.0), 8.0, 12.0);
        let blood = ring(shape, (50.0, 50.0), 0.0, 7.9);
        let rv = Array2::from_shape_fn(shape, |(h, w)| {
            let r = (h as f64 - 50.0).hypot(w as f64 - 50.0);
            u8::from(h < 50 && w > 50 && r > 12.0 && r <= 30.0)
        });

        for count in [SegmentCount::Four, SegmentCount::Six] {
            let label = segment(
                &MaskSlice::new(blood.view()),
                &MaskSlice::new(wall.view()),
                &MaskSlice::new(rv.view()),
                count,
            )
            .unwrap();
            let n = count.get() as u8;
            assert_eq!(label.max_label(), n);
            for ((pos, &l), &m) in label.array_view().indexed_iter().zip(wall.iter()) {
                if m == 0 {
                    assert_eq!(l, 0, "{pos:?}");
                } else {
                    assert!((1..=n).contains(&l), "{pos:?} -> {l}");
                }
            }
            for l in 1..=n {
                assert!(label.count(l) > 0, "label {l} missing");
            }
        }
    }

    /// 单像素宽的心肌环 (`round(r) == 10`), RV 为右上方的四分之一圆盘.
    ///
    /// 投影曲线在 2° 和 88° 处越过门限, 两侧高斯拟合给出的范围更宽, 因此插入点取门限结果.
    #[test]
    fn test_thin_ring_with_quarter_disc() {
        let shape = (100, 100);
        let wall = Array2::from_shape_fn(shape, |(h, w)| {
            u8::from((h as f64 - 50.0).hypot(w as f64 - 50.0).round() == 10.0)
        });
        let blood = ring(shape, (50.0, 50.0), 0.0, 8.0);
        let rv = Array2::from_shape_fn(shape, |(h, w)| {
            let r = (h as f64 - 50.0).hypot(w as f64 - 50.0);
            u8::from(h < 50 && w > 50 && r > 12.0 && r <= 30.0)
        });
        let ring_px = wall.iter().filter(|&&m| m != 0).count();
        let circle = AngularSector::new_circle((50.0, 50.0));

        for (count, expected) in [
            (SegmentCount::Four, vec![268, 2, 88, 182]),
            (SegmentCount::Six, vec![268, 2, 45, 88, 182, 225]),
        ] {
            let seg = Segmenter::default()
                .run(
                    &MaskSlice::new(blood.view()),
                    &MaskSlice::new(wall.view()),
                    &MaskSlice::new(rv.view()),
                    count,
                )
                .unwrap();
            assert_eq!(seg.center, (50.0, 50.0));
            assert_eq!(seg.insertion, Insertion::new(2, 88));
            assert_eq!(seg.boundaries.as_slice(), expected.as_slice());

            let n = count.get() as u8;
            let labeled: usize = (1..=n).map(|l| seg.label.count(l)).sum();
            assert_eq!(labeled, ring_px);

            // 45° 与 225° 处的环上像素.
            let (at45, at225) = match count {
                SegmentCount::Four => (2, 4),
                // 两者恰好落在边界上, 由后一个扇区覆盖.
                SegmentCount::Six => (3, 6),
            };
            assert_eq!(seg.label[(43, 57)], at45);
            assert_eq!(seg.label[(57, 43)], at225);

            // 离边界至少 3° 的环上像素属于第 `i + 1` 个扇区.
            let sectors = seg.boundaries.sectors(seg.center);
            let mut checked = 0;
            for ((h, w), &m) in wall.indexed_iter() {
                if m == 0 {
                    continue;
                }
                let angle = circle.angle_to((h, w));
                for (i, s) in sectors.iter().enumerate() {
                    let offset = (angle - s.start()).rem_euclid(360.0);
                    if offset >= 3.0 && offset < s.span() - 3.0 {
                        assert_eq!(seg.label[(h, w)], i as u8 + 1, "({h}, {w}) at {angle}");
                        checked += 1;
                    }
                }
            }
            assert!(checked > 40, "{checked}");
        }
    }

    #[test]
    fn test_phantom_insertion() {
        // 其他测试可能已经初始化过.
        let _ = simple_logger::SimpleLogger::new()
            .with_level(log::LevelFilter::Trace)
            .init();

        let input = Phantom::new((96, 96), (48.0, 48.0)).rv_arc(40.0, 130.0).build();
        let seg = Segmenter::default()
            .run(
                &MaskSlice::new(input.lv_blood.view()),
                &MaskSlice::new(input.lv_wall.view()),
                &MaskSlice::new(input.rv_blood.view()),
                SegmentCount::Six,
            )
            .unwrap();
        assert!((seg.center.0 - 48.0).abs() < 1e-9);
        assert!((seg.insertion.up - 40).abs() <= 3, "{:?}", seg.insertion);
        assert!((seg.insertion.down - 130).abs() <= 3, "{:?}", seg.insertion);
        assert_eq!(seg.boundaries.len(), 6);
        // RV 正对的心肌 (85°) 属于扇区 2 或 3, 对侧 (265°) 属于扇区 5 或 6.
        let near = seg.label[(48 - 11, 48 + 1)];
        assert!(near == 2 || near == 3, "{near}");
        let far = seg.label[(48 + 11, 48 - 1)];
        assert!(far == 5 || far == 6, "{far}");
    }

    #[test]
    fn test_errors() {
        let wall = ring((32, 32), (16.0, 16.0), 4.0, 8.0);
        let other = Array2::<u8>::zeros((32, 31));
        let empty = Array2::<u8>::zeros((32, 32));
        let w = MaskSlice::new(wall.view());

        let err = segment(&w, &w, &MaskSlice::new(other.view()), SegmentCount::Four);
        assert_eq!(
            err.unwrap_err(),
            SegError::ShapeMismatch {
                expected: (32, 32),
                found: (32, 31)
            }
        );

        let e = MaskSlice::new(empty.view());
        assert_eq!(
            segment(&e, &e, &w, SegmentCount::Four).unwrap_err(),
            SegError::EmptyWall
        );

        // 没有 RV.
        assert_eq!(
            segment(&e, &w, &e, SegmentCount::Six).unwrap_err(),
            SegError::NoAttachment
        );
    }
}
