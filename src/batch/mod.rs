//! # 批量处理模块
//!
//! 提供线程数可控的并行执行能力。
//!
//! ## 功能
//! - 单次计算在指定大小的线程池中运行
//! - 参数扫描并行处理
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被各命令模块使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod runner;

pub use runner::{BatchResult, BatchRunner, ProcessResult};
