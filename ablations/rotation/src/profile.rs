//! 实验运行统计.

use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

/// ablation/benchmark 计时器.
///
/// 该计时器支持 "中途中断" 与 "结束中断, 继续开始计时".
#[derive(Clone, Debug)]
struct AccTimer {
    consumed: Duration,
    since: Instant,
}

impl AccTimer {
    /// 初始化计时器. 初始化时会视为已经开始计时.
    #[inline]
    pub fn new() -> Self {
        Self {
            consumed: Duration::ZERO,
            since: Instant::now(),
        }
    }

    /// 开始计时.
    #[inline]
    pub fn start(&mut self) {
        self.since = Instant::now();
    }

    /// 结束计时, 并将这一区间的时间累加. 返回本轮计时时长.
    #[inline]
    pub fn elapsed(&mut self) -> Duration {
        let d = self.since.elapsed();
        self.consumed += d;
        d
    }

    /// 累计时间 (以微秒为单位).
    #[inline]
    pub fn get_total_us(&self) -> u64 {
        self.consumed.as_micros() as u64
    }
}

/// 两个角度之间的圆周距离, 取值范围 `[0, 180]`.
#[inline]
pub fn angle_error(a: i32, b: i32) -> u32 {
    let d = (i64::from(a) - i64::from(b)).rem_euclid(360);
    d.min(360 - d) as u32
}

/// 一组实验的统计数据.
#[derive(Clone, Debug)]
pub struct Profile {
    /// 成功完成划分的次数.
    done: u64,

    /// 划分失败的次数.
    failed: u64,

    /// 划分本身花费的总时间.
    seg_time: AccTimer,

    /// 整组实验花费的总时间 (包括生成体模, 加载数据).
    real_time: AccTimer,

    /// 最耗时的一次划分.
    most: Option<Duration>,

    /// 上插入点误差之和 (单位: 度).
    up_error: u64,

    /// 下插入点误差之和 (单位: 度).
    down_error: u64,

    /// 最大单点误差.
    worst: Option<u32>,
}

impl Profile {
    /// 初始化, 同时开始总计时.
    #[inline]
    pub fn new() -> Self {
        Self {
            done: 0,
            failed: 0,
            seg_time: AccTimer::new(),
            real_time: AccTimer::new(),
            most: None,
            up_error: 0,
            down_error: 0,
            worst: None,
        }
    }

    /// 开始一次划分计时.
    #[inline]
    pub fn trial_start(&mut self) {
        self.seg_time.start();
    }

    /// 结束一次划分计时.
    #[inline]
    pub fn trial_elapsed(&mut self) {
        let d = self.seg_time.elapsed();
        self.most = Some(self.most.map_or(d, |m| m.max(d)));
    }

    /// 记录一次成功的划分.
    #[inline]
    pub fn count_done(&mut self) {
        self.done += 1;
    }

    /// 记录一次成功的划分以及两个插入点的误差.
    pub fn count_error(&mut self, up: u32, down: u32) {
        self.count_done();
        self.up_error += up as u64;
        self.down_error += down as u64;
        let w = up.max(down);
        self.worst = Some(self.worst.map_or(w, |v| v.max(w)));
    }

    /// 记录一次失败的划分.
    #[inline]
    pub fn count_failed(&mut self) {
        self.failed += 1;
    }

    /// 结束全部计时.
    #[inline]
    pub fn finish(mut self) -> Self {
        self.real_time.elapsed();
        self
    }

    /// 成功次数.
    #[inline]
    pub fn get_done(&self) -> u64 {
        self.done
    }

    /// 失败次数.
    #[inline]
    pub fn get_failed(&self) -> u64 {
        self.failed
    }

    /// 以微秒为单位获得划分的总时间.
    #[inline]
    pub fn get_seg_time_us(&self) -> u64 {
        self.seg_time.get_total_us()
    }

    /// 以微秒为单位获得整组实验的总时间.
    #[inline]
    pub fn get_real_time_us(&self) -> u64 {
        self.real_time.get_total_us()
    }

    /// 以微秒为单位获得单次划分 (含失败) 的平均时间.
    pub fn get_avg_seg_time_us(&self) -> Option<f64> {
        match self.done + self.failed {
            0 => None,
            n => Some(self.get_seg_time_us() as f64 / n as f64),
        }
    }

    /// 上插入点平均误差. 只统计记录过误差的实验.
    pub fn get_avg_up_error(&self) -> Option<f64> {
        self.worst.map(|_| self.up_error as f64 / self.done as f64)
    }

    /// 下插入点平均误差. 只统计记录过误差的实验.
    pub fn get_avg_down_error(&self) -> Option<f64> {
        self.worst.map(|_| self.down_error as f64 / self.done as f64)
    }

    /// 最大单点误差.
    #[inline]
    pub fn get_worst_error(&self) -> Option<u32> {
        self.worst
    }

    /// 最耗时的一次划分. 如果不存在任务, 则返回 `None`.
    #[inline]
    pub fn get_most_time_consuming(&self) -> Option<Duration> {
        self.most
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}

/// 缺失的统计量显示为 `/`.
struct OrSlash<T>(Option<T>);

impl Display for OrSlash<f64> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v:.3}"),
            None => f.write_str("/"),
        }
    }
}

impl Display for OrSlash<u64> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("/"),
        }
    }
}

/// 多行报告, 每行缩进 4 个空格.
impl Display for Profile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        const S4: &str = "    ";
        writeln!(
            f,
            "{S4}Segmented: {}, failed: {}",
            self.get_done(),
            self.get_failed()
        )?;
        writeln!(
            f,
            "{S4}Segmentation time: {} us in total, {} us on average",
            self.get_seg_time_us(),
            OrSlash(self.get_avg_seg_time_us())
        )?;
        writeln!(f, "{S4}Total machine time: {} us", self.get_real_time_us())?;
        writeln!(
            f,
            "{S4}Insertion error (degrees): up {}, down {}, worst {}",
            OrSlash(self.get_avg_up_error()),
            OrSlash(self.get_avg_down_error()),
            OrSlash(self.get_worst_error().map(u64::from))
        )?;
        let most = self.get_most_time_consuming().map(|d| d.as_micros() as u64);
        write!(f, "{S4}Most time-consuming trial: {} us", OrSlash(most))
    }
}

#[cfg(test)]
mod tests {
    use super::{angle_error, Profile};

    #[test]
    fn test_angle_error() {
        assert_eq!(angle_error(10, 10), 0);
        assert_eq!(angle_error(359, 2), 3);
        assert_eq!(angle_error(2, 359), 3);
        assert_eq!(angle_error(0, 180), 180);
        assert_eq!(angle_error(-5, 5), 10);
        assert_eq!(angle_error(i32::MIN, i32::MAX), 105);
    }

    #[test]
    fn test_profile() {
        let mut p = Profile::new();
        assert_eq!(p.get_avg_up_error(), None);
        p.count_error(2, 4);
        p.count_error(0, 1);
        p.count_failed();
        let p = p.finish();
        assert_eq!(p.get_done(), 2);
        assert_eq!(p.get_failed(), 1);
        assert_eq!(p.get_avg_up_error(), Some(1.0));
        assert_eq!(p.get_avg_down_error(), Some(2.5));
        assert_eq!(p.get_worst_error(), Some(4));
        assert!(p.get_most_time_consuming().is_none());

        let report = p.to_string();
        assert!(report.contains("Segmented: 2, failed: 1"), "{report}");
        assert!(report.contains("up 1.000, down 2.500, worst 4"), "{report}");
        assert!(report.ends_with("Most time-consuming trial: / us"), "{report}");
    }

    #[test]
    fn test_empty_report() {
        let report = Profile::new().finish().to_string();
        assert!(report.contains("0 us in total, / us on average"), "{report}");
        assert!(report.contains("up /, down /, worst /"), "{report}");
        assert_eq!(report.lines().count(), 5);
    }
}
