//! # 统一错误处理模块
//!
//! 定义 tetra-dos 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// tetra-dos 统一错误类型
#[derive(Error, Debug)]
pub enum TetraDosError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 数值计算错误
    // ─────────────────────────────────────────────────────────────
    #[error("Eigenvalue solver did not converge at k = ({:.6}, {:.6}, {:.6})", .k[0], .k[1], .k[2])]
    EigenNonConvergence { k: [f64; 3] },

    // ─────────────────────────────────────────────────────────────
    // CSV / 绘图错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plot error: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

impl TetraDosError {
    /// 参数类错误（与命令行用法错误同等对待）
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            TetraDosError::InvalidArgument(_) | TetraDosError::InvalidParameter { .. }
        )
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, TetraDosError>;
