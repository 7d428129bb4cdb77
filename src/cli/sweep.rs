//! # sweep 子命令 CLI 定义
//!
//! CSV 每行一组模型参数，列名 Tae, Tce, Tbe, Tao, Tco, Tbo, EpsilonR, EpsilonM, M, W, Mu，
//! 可选 `label` 列作为输出文件名。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/sweep.rs`

use clap::Args;
use std::path::PathBuf;

/// sweep 子命令参数
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// CSV file with one parameter set per row
    pub params: PathBuf,

    /// Output directory for the DOS files
    #[arg(short, long, default_value = "dos_sweep")]
    pub output: PathBuf,

    /// Brillouin-zone grid resolution (n x n x n k-points)
    #[arg(short = 'n', long = "grid", default_value_t = 8)]
    pub n: usize,

    /// Number of energy samples per DOS file
    #[arg(long, default_value_t = 500)]
    pub num_dos: usize,

    /// Number of worker threads (0 = all CPUs)
    #[arg(short, long, env = "TETRA_DOS_JOBS", default_value_t = 0)]
    pub jobs: usize,

    /// Overwrite existing DOS files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
