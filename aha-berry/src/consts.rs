//! 通用常量.

/// 极坐标采样时相邻两个半径之间的距离 (单位: 像素).
pub const RADIUS_STEP: f64 = 0.5;

/// 扇区光栅化时相邻两条射线之间的夹角 (单位: 度).
pub const ANGLE_STEP: f64 = 0.5;

/// 径向投影曲线的长度, 即每个整数角度一个值.
pub const PROFILE_BINS: usize = 360;

/// 投影值严格超过该门限的角度才被认为与 RV 相连.
pub const ATTACHMENT_THRESHOLD: f64 = 5.0;

/// 插入点距离高斯曲线均值的 sigma 倍数.
pub const SIGMA_SPAN: f64 = 2.5;

/// 投影曲线中值滤波的窗口大小.
pub const MEDIAN_KERNEL: usize = 3;

/// 单通道标签.
pub mod gray {
    /// 掩膜和节段标签图中, 背景的像素值.
    pub const BACKGROUND: u8 = 0;

    /// 像素是否是前景 (非零)?
    #[inline]
    pub const fn is_foreground(p: u8) -> bool {
        p != BACKGROUND
    }

    /// 像素是否是背景?
    #[inline]
    pub const fn is_background(p: u8) -> bool {
        p == BACKGROUND
    }
}

/// AHA 17 节段模型.
pub mod aha {
    /// 节段总数. 第 17 节段 (心尖帽) 不在短轴切片上, 其统计值始终为空.
    pub const SEGMENTS: usize = 17;

    /// 室间隔节段 (全局编号, 从 1 开始).
    pub const SEPTAL: [u8; 5] = [2, 3, 8, 9, 14];

    /// 非室间隔节段 (全局编号, 从 1 开始). 与 [`SEPTAL`] 一起覆盖 `1..=16`.
    pub const NON_SEPTAL: [u8; 11] = [1, 4, 5, 6, 7, 10, 11, 12, 13, 15, 16];

    /// 统计值保留的小数位数.
    pub const DECIMALS: i32 = 3;
}
