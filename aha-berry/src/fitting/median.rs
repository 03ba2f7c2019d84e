//! 中值滤波与中位数.

use ndarray::{Array1, ArrayView1};
use ordered_float::OrderedFloat;

/// 一维中值滤波. 窗口大小为 `kernel` (必须为正奇数, 否则程序 panic),
/// 两端以 0 补齐, 输出长度与输入相同.
pub fn median_filter(y: ArrayView1<f64>, kernel: usize) -> Array1<f64> {
    assert!(kernel % 2 == 1, "中值滤波窗口 `{kernel}` 必须为正奇数");
    let half = kernel / 2;
    let n = y.len();
    let mut window: Vec<OrderedFloat<f64>> = Vec::with_capacity(kernel);

    Array1::from_iter((0..n).map(|i| {
        window.clear();
        // 第 `j` 个元素对应原数组下标 `i + j - half`.
        window.extend((i..i + kernel).map(|j| {
            if j < half || j - half >= n {
                OrderedFloat(0.0)
            } else {
                OrderedFloat(y[j - half])
            }
        }));
        window.sort_unstable();
        window[half].0
    }))
}

/// 求中位数. 偶数个元素时取中间两者的平均值. 空输入返回 `None`.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut v: Vec<OrderedFloat<f64>> = values.iter().copied().map(OrderedFloat).collect();
    v.sort_unstable();
    let mid = v.len() / 2;
    if v.len() % 2 == 1 {
        Some(v[mid].0)
    } else {
        Some((v[mid - 1].0 + v[mid].0) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{median, median_filter};
    use ndarray::array;

    #[test]
    fn test_median_filter_spike() {
        let y = array![0.0, 0.0, 9.0, 0.0, 3.0, 3.0, 3.0];
        let f = median_filter(y.view(), 3);
        assert_eq!(f, array![0.0, 0.0, 0.0, 3.0, 3.0, 3.0, 3.0]);
    }

    /// 两端补零, 因此孤立的端点值会被抹掉.
    #[test]
    fn test_median_filter_edges() {
        let y = array![5.0, 5.0, 5.0];
        assert_eq!(median_filter(y.view(), 3), array![5.0, 5.0, 5.0]);
        let y = array![5.0, 1.0];
        assert_eq!(median_filter(y.view(), 3), array![1.0, 1.0]);
        assert_eq!(median_filter(y.view(), 1), y);
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[3.0]), Some(3.0));
        assert_eq!(median(&[4.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }
}
