//! RV 插入点定位.
//!
//! RV 紧贴 LV 心肌的那一段角度在投影曲线上表现为一个 "鼓包". 我们对鼓包的上升沿和下降沿
//! 分别拟合高斯曲线, 取 `μ ∓ 2.5σ` 作为候选; 再以固定门限找到第一个和最后一个超限的角度.
//! 两组结果中取更靠内的那个, 即上插入点取较大者, 下插入点取较小者.

use crate::fitting::{self, GaussFit};
use crate::polar::AngularProfile;
use crate::segment::{SegError, SegResult, SegmentOptions};
use ndarray::{s, Array1};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 两个 RV 插入点的角度 (单位: 度).
///
/// `up` 是附着弧的起点, `down` 是终点.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Insertion {
    /// 上插入点.
    pub up: i32,

    /// 下插入点.
    pub down: i32,
}

impl Insertion {
    /// 创建.
    #[inline]
    pub fn new(up: i32, down: i32) -> Self {
        Self { up, down }
    }

    /// 附着弧的角度跨度, 取值范围 `[0, 360)`.
    ///
    /// 拟合结果极端时插入点会饱和到 `i32` 的边界, 因此在 `i64` 中求差.
    #[inline]
    pub fn arc(&self) -> i32 {
        // 结果小于 360, 转换不会截断.
        (i64::from(self.down) - i64::from(self.up)).rem_euclid(360) as i32
    }
}

/// 对 `y[range]` 拟合高斯曲线, 横坐标为对应下标.
fn fit_flank(y: &Array1<f64>, start: usize, end: usize, flank: &str) -> (f64, f64) {
    let x = Array1::from_iter((start..end).map(|v| v as f64));
    let fit = fitting::gaussian_f64(x.view(), y.slice(s![start..end]));
    if let GaussFit::Degenerate = fit {
        log::debug!("{flank} flank [{start}, {end}): degenerate gaussian fit, fallback to (0, 0)");
    }
    fit.mean_sigma()
}

/// 根据投影曲线定位两个插入点.
///
/// 滤波后的曲线上没有任何值超过门限时返回 `Err(SegError::NoAttachment)`.
pub fn locate_insertion(profile: &AngularProfile, opts: &SegmentOptions) -> SegResult<Insertion> {
    let raw = profile.view();
    // 峰值位置取自滤波前的曲线.
    let peak = profile.argmax();
    let y = fitting::median_filter(raw, opts.median_kernel());
    let n = y.len();

    let (mu, sigma) = fit_flank(&y, 0, peak, "ascending");
    let up_fit = mu - opts.sigma_span() * sigma;

    let (mu, sigma) = fit_flank(&y, peak, n, "descending");
    let mut down_fit = mu + opts.sigma_span() * sigma;
    if down_fit == 0.0 {
        down_fit = 360.0;
    }

    let threshold = opts.attachment_threshold();
    let up_thr = y.iter().position(|&v| v > threshold);
    let down_thr = y.iter().rposition(|&v| v > threshold);
    let (up_thr, down_thr) = match (up_thr, down_thr) {
        (Some(u), Some(d)) => (u as f64, d as f64),
        _ => return Err(SegError::NoAttachment),
    };

    let up = up_fit.max(up_thr).trunc() as i32;
    let down = down_fit.min(down_thr).trunc() as i32;
    log::trace!(
        "insertion: fit = ({up_fit:.2}, {down_fit:.2}), threshold = ({up_thr}, {down_thr}), \
         result = ({up}, {down})"
    );
    Ok(Insertion { up, down })
}

#[cfg(test)]
mod tests {
    use super::{locate_insertion, Insertion};
    use crate::polar::AngularProfile;
    use crate::segment::{SegError, SegmentOptions};
    use crate::{MaskSlice, Phantom};
    use ndarray::Array1;

    fn plateau(lo: usize, hi: usize, v: f64) -> AngularProfile {
        let data = Array1::from_shape_fn(360, |d| if (lo..=hi).contains(&d) { v } else { 0.0 });
        AngularProfile::new(data).unwrap()
    }

    #[test]
    fn test_plateau() {
        let ins = locate_insertion(&plateau(80, 100, 10.0), &SegmentOptions::default()).unwrap();
        assert!((ins.up - 80).abs() <= 2, "{ins:?}");
        assert!((ins.down - 100).abs() <= 2, "{ins:?}");
        assert!(ins.up <= ins.down);
    }

    /// 单个尖峰会被中值滤波抹平.
    #[test]
    fn test_no_attachment() {
        let opts = SegmentOptions::default();
        let zeros = AngularProfile::new(Array1::zeros(360)).unwrap();
        assert_eq!(locate_insertion(&zeros, &opts), Err(SegError::NoAttachment));

        let mut spike = Array1::zeros(360);
        spike[200] = 100.0;
        let spike = AngularProfile::new(spike).unwrap();
        assert_eq!(locate_insertion(&spike, &opts), Err(SegError::NoAttachment));

        let low = plateau(10, 50, 5.0);
        assert_eq!(locate_insertion(&low, &opts), Err(SegError::NoAttachment));
    }

    /// 高斯鼓包: 门限给出的结果比拟合结果更靠内.
    #[test]
    fn test_gaussian_bump() {
        let data = Array1::from_shape_fn(360, |d| {
            let x = d as f64 - 150.0;
            40.0 * (-x * x / (2.0 * 10.0 * 10.0)).exp()
        });
        let ins = locate_insertion(&AngularProfile::new(data).unwrap(), &Default::default()).unwrap();
        // μ ∓ 2.5σ 约为 125 和 175; 超过门限 5 的区间为 [130, 170].
        assert_eq!(ins, Insertion::new(130, 170));
    }

    #[test]
    fn test_arc() {
        assert_eq!(Insertion::new(80, 100).arc(), 20);
        assert_eq!(Insertion::new(350, 20).arc(), 30);
        assert_eq!(Insertion::new(10, 10).arc(), 0);
        // 4294967295 = 360 * 11930464 + 255
        assert_eq!(Insertion::new(i32::MAX, i32::MIN).arc(), 105);
        assert_eq!(Insertion::new(i32::MIN, i32::MAX).arc(), 255);
    }

    #[test]
    fn test_phantom() {
        let p = Phantom::new((96, 96), (48.0, 48.0)).rv_arc(20.0, 110.0);
        let input = p.build();
        let wall = MaskSlice::new(input.lv_wall.view());
        let rv = MaskSlice::new(input.rv_blood.view());
        let center = wall.centroid().unwrap();
        let profile = AngularProfile::from_rv(&rv, center, 0.5);
        let ins = locate_insertion(&profile, &SegmentOptions::default()).unwrap();
        assert!((ins.up - 20).abs() <= 3, "{ins:?}");
        assert!((ins.down - 110).abs() <= 3, "{ins:?}");
        assert_eq!(ins.arc(), ins.down - ins.up);
    }
}
