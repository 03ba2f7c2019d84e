#![warn(missing_docs)] // <= 合适时移除它.
// #![warn(clippy::missing_docs_in_private_items)]  // <= too strict.

//! 核心库. 根据左心室 (LV) 心肌掩膜和右心室 (RV) 血池掩膜,
//! 在短轴切片上按 AHA 17 节段模型划分左心室心肌, 并统计定量参数图
//! (如 T1/T2 弛豫时间图) 在各节段上的均值和中位数.
//!
//! 该 crate 目前仅提供 `safe` 接口.
//!
//! # 注意
//!
//! 1. 该 crate 假设输入的二值掩膜已经足够准确, 它只负责确定心肌环的
//!   **角度** 划分, 不负责图像配准或从头分割.
//! 2. 用户输入错误 (形状不一致, 空掩膜, 找不到 RV 附着) 以 `Err` 形式返回;
//!   只有违反文档约定的调用才会 panic.
//!
//! # 开发计划
//!
//! ### 极坐标采样 & RV 径向投影 ✅
//!
//! 以 LV 心肌质心为原点, 每 0.5 像素沿射线采样, 统计每个整数角度上的
//! RV 掩膜累计值.
//!
//! 实现位于 `aha-berry/src/polar`.
//!
//! ### RV 插入点定位 ✅
//!
//! 对投影曲线的上升沿和下降沿分别拟合高斯曲线 (Levenberg-Marquardt),
//! 拟合失败时退化为零均值零方差, 再与固定门限的结果取更保守者.
//!
//! 实现位于 `aha-berry/src/landmark.rs` 和 `aha-berry/src/fitting`.
//!
//! ### 扇区边界与扇区光栅化 ✅
//!
//! 根据两个插入点得到 4 (心尖) 或 6 (基底, 中段) 个边界角度,
//! 相位展开后以 0.5° 为步长光栅化到心肌掩膜上.
//!
//! 实现位于 `aha-berry/src/boundary.rs` 和 `aha-berry/src/labeler.rs`.
//!
//! ### AHA 17 节段统计 ✅
//!
//! 三个切片 (可并行) 分别划分后, 统计每个节段, 室间隔, 非室间隔,
//! 以及全局的均值和中位数.
//!
//! 实现位于 `aha-berry/src/aha17`.
//!
//! ### npz 数据加载 & 合成体模 ✅
//!
//! 实现位于 `aha-berry/src/dataset` 和 `aha-berry/src/data/phantom.rs`.
//!
//! ### 坐标约定
//!
//! 图像按行优先存储, 索引为 `(h, w)`. 角度 `θ` (单位: 度) 处、
//! 半径 `r` 的点为 `(c_h - r·sin θ, c_w + r·cos θ)`. 也就是说 0° 指向
//! `w` 增加的方向, 90° 指向 `h` 减少的方向.

/// 二维索引, 同时也可一定程度上用作非负整数向量.
pub type Idx2d = (usize, usize);

/// 高精度二维坐标 `(h, w)`, 例如心肌质心.
pub type Idx2dF = (f64, f64);

mod data;

pub use data::{
    sector, AngularSector, MapSlice, MaskSlice, OwnedSliceInput, Phantom, SegmentLabel,
    SliceInput, SliceLevel,
};

pub mod consts;

pub mod polar;

pub mod fitting;

pub mod landmark;

pub mod boundary;

pub mod labeler;

pub mod segment;

pub mod aha17;

pub mod dataset;

pub mod prelude;
