//! # 能带物理模块
//!
//! 四能带紧束缚模型：哈密顿量构造、能带能量和高对称路径。
//!
//! ## 子模块
//! - `hamiltonian`: H(k) 构造与结构因子
//! - `bands`: 本征值求解，作为 DOS 引擎的回调
//! - `kpath`: 高对称路径能带
//!
//! ## 依赖关系
//! - 被 `dos/` 和 `commands/` 使用
//! - 使用 `models/` 的参数环境与倒格子

pub mod bands;
pub mod hamiltonian;
pub mod kpath;

pub use bands::{BandEnergies, BandEnergyProvider};

/// 模型能带数（A/B 子格 × 两种宇称），固定为 4
pub const NUM_BANDS: usize = 4;
