//! # 数据模型模块
//!
//! 定义物理参数环境和倒格子数据模型。
//!
//! ## 依赖关系
//! - 被 `physics/`, `dos/` 和 `commands/` 使用
//! - 子模块: environment, lattice

pub mod environment;
pub mod lattice;

pub use environment::PhysicalEnvironment;
pub use lattice::{cubic_reciprocal, Momentum, ReciprocalMatrix};
