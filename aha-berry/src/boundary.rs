//! 扇区边界角度.
//!
//! 基底和中段切片划分为 6 个节段, 心尖切片划分为 4 个节段. 边界的 **顺序** 决定了
//! 第 `i` 个扇区是 `boundaries[i]` 到 `boundaries[i + 1]` (最后一个回绕到第一个).

use crate::data::AngularSector;
use crate::landmark::Insertion;
use crate::segment::SegError;
use crate::Idx2dF;
use itertools::Itertools;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 一个切片上的节段数.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SegmentCount {
    /// 心尖切片.
    Four,

    /// 基底和中段切片.
    Six,
}

impl SegmentCount {
    /// 节段数.
    #[inline]
    pub fn get(&self) -> usize {
        match self {
            SegmentCount::Four => 4,
            SegmentCount::Six => 6,
        }
    }
}

impl TryFrom<usize> for SegmentCount {
    type Error = SegError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(SegmentCount::Four),
            6 => Ok(SegmentCount::Six),
            n => Err(SegError::UnsupportedSegmentCount(n)),
        }
    }
}

/// 有序的边界角度列表, 每个角度都在 `[0, 360)` 之内.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectorBoundaries {
    angles: Vec<i32>,
}

/// 取模到 `[0, 360)` 后截断为整数.
#[inline]
fn wrap_trunc(angle: f64) -> i32 {
    (angle + 360.0).rem_euclid(360.0).trunc() as i32
}

/// 根据插入点计算边界角度.
///
/// - 4 节段: `[down - 180, up, down, up + 180]`;
/// - 6 节段: `[down - 180, up, (up + down) / 2, down, up + 180, (up + down) / 2 + 180]`.
///
/// 中点在取模截断之前保持实数.
pub fn sector_boundaries(ins: Insertion, count: SegmentCount) -> SectorBoundaries {
    let up = ins.up as f64;
    let down = ins.down as f64;
    let raw: Vec<f64> = match count {
        SegmentCount::Four => vec![down - 180.0, up, down, up + 180.0],
        SegmentCount::Six => {
            let mid = (up + down) / 2.0;
            vec![down - 180.0, up, mid, down, up + 180.0, mid + 180.0]
        }
    };
    SectorBoundaries {
        angles: raw.into_iter().map(wrap_trunc).collect(),
    }
}

impl SectorBoundaries {
    /// 直接从角度列表创建. 角度会被取模到 `[0, 360)`.
    ///
    /// 列表为空时返回 `None`.
    pub fn from_angles(angles: &[i32]) -> Option<Self> {
        if angles.is_empty() {
            return None;
        }
        Some(Self {
            angles: angles.iter().map(|a| a.rem_euclid(360)).collect(),
        })
    }

    /// 边界角度.
    #[inline]
    pub fn as_slice(&self) -> &[i32] {
        &self.angles
    }

    /// 边界数量, 也就是扇区数量.
    #[inline]
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    /// 总是 `false`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// 首尾相接后做相位展开, 返回 `len() + 1` 个连续的角度.
    ///
    /// 相邻两个角度之差被映射到 `(-180, 180]` 内等价的值; 差的绝对值小于 180 时不做调整.
    pub fn unwrapped(&self) -> Vec<f64> {
        let mut closed: Vec<f64> = self.angles.iter().map(|&a| a as f64).collect();
        closed.push(self.angles[0] as f64);

        let mut out = Vec::with_capacity(closed.len());
        out.push(closed[0]);
        let mut correction = 0.0;
        for (a, b) in closed.iter().tuple_windows() {
            let diff = b - a;
            let mut wrapped = (diff + 180.0).rem_euclid(360.0) - 180.0;
            if wrapped == -180.0 && diff > 0.0 {
                wrapped = 180.0;
            }
            if diff.abs() >= 180.0 {
                correction += wrapped - diff;
            }
            out.push(b + correction);
        }
        out
    }

    /// 以 `center` 为顶点的各个扇区, 第 `i` 个对应标签 `i + 1`.
    pub fn sectors(&self, center: Idx2dF) -> Vec<AngularSector> {
        self.unwrapped()
            .into_iter()
            .tuple_windows()
            .map(|(start, end)| AngularSector::new(center, start, end))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{sector_boundaries, SectorBoundaries, SegmentCount};
    use crate::landmark::Insertion;
    use crate::segment::SegError;

    fn spans(b: &SectorBoundaries) -> Vec<f64> {
        b.sectors((0.0, 0.0)).iter().map(|s| s.end() - s.start()).collect()
    }

    #[test]
    fn test_four() {
        let b = sector_boundaries(Insertion::new(80, 100), SegmentCount::Four);
        assert_eq!(b.as_slice(), &[280, 80, 100, 260]);
        assert_eq!(b.unwrapped(), vec![280.0, 440.0, 460.0, 620.0, 640.0]);
        assert_eq!(spans(&b), vec![160.0, 20.0, 160.0, 20.0]);
    }

    #[test]
    fn test_six() {
        let b = sector_boundaries(Insertion::new(80, 100), SegmentCount::Six);
        assert_eq!(b.as_slice(), &[280, 80, 90, 100, 260, 270]);

        // 中点截断.
        let b = sector_boundaries(Insertion::new(30, 101), SegmentCount::Six);
        assert_eq!(b.as_slice(), &[281, 30, 65, 101, 210, 245]);
    }

    #[test]
    fn test_modulo_closure() {
        for up in (0..360).step_by(13) {
            for down in (0..360).step_by(17) {
                for count in [SegmentCount::Four, SegmentCount::Six] {
                    let b = sector_boundaries(Insertion::new(up, down), count);
                    assert_eq!(b.len(), count.get());
                    assert!(b.as_slice().iter().all(|a| (0..360).contains(a)), "{b:?}");
                }
            }
        }
    }

    /// 4 节段和 6 节段都恰好覆盖一整圈, 包括跨越 0° 的情形.
    #[test]
    fn test_spans_sum_to_full_circle() {
        for up in (0..360).step_by(7) {
            for arc in 2..=170 {
                let ins = Insertion::new(up, up + arc);
                for count in [SegmentCount::Four, SegmentCount::Six] {
                    let b = sector_boundaries(ins, count);
                    let s = spans(&b);
                    assert!(s.iter().all(|&v| v > 0.0), "{ins:?} {b:?} {s:?}");
                    assert_eq!(s.iter().sum::<f64>(), 360.0, "{ins:?} {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_unwrap_half_turn() {
        // 差恰好为 +180 时保持不变, -180 时也保持不变.
        let b = SectorBoundaries::from_angles(&[0, 180]).unwrap();
        assert_eq!(b.unwrapped(), vec![0.0, 180.0, 0.0]);
        let b = SectorBoundaries::from_angles(&[350, -370]).unwrap();
        assert_eq!(b.as_slice(), &[350, 350]);
        assert_eq!(b.unwrapped(), vec![350.0, 350.0, 350.0]);
        assert!(SectorBoundaries::from_angles(&[]).is_none());
    }

    #[test]
    fn test_try_from() {
        assert_eq!(SegmentCount::try_from(4), Ok(SegmentCount::Four));
        assert_eq!(SegmentCount::try_from(6), Ok(SegmentCount::Six));
        assert_eq!(
            SegmentCount::try_from(5),
            Err(SegError::UnsupportedSegmentCount(5))
        );
    }
}
