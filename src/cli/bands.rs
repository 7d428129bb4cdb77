//! # bands 子命令 CLI 定义
//!
//! 沿高对称路径输出能带 CSV。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/bands.rs`

use super::ModelArgs;
use clap::Args;
use std::path::PathBuf;

/// bands 子命令参数
#[derive(Args, Debug)]
pub struct BandsArgs {
    /// Output CSV file (index, distance, k1, k2, k3, E0..E3)
    #[arg(value_name = "OUT_CSV")]
    pub output: PathBuf,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Number of k-points per path segment, including both ends
    #[arg(long, default_value_t = 50)]
    pub points_per_panel: usize,

    /// Number of worker threads (0 = all CPUs)
    #[arg(short, long, env = "TETRA_DOS_JOBS", default_value_t = 0)]
    pub jobs: usize,

    /// Also render the band structure to this image (.png or .svg)
    #[arg(long)]
    pub plot: Option<PathBuf>,
}
