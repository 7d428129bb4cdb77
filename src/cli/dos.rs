//! # dos 子命令 CLI 定义
//!
//! 位置参数：输出文件、网格分辨率 n、DOS 采样点数，以及 11 个模型参数。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/dos.rs`

use super::ModelArgs;
use clap::Args;
use std::path::PathBuf;

/// dos 子命令参数
#[derive(Args, Debug)]
pub struct DosArgs {
    /// Output file for the tab-separated (E, DOS) table
    #[arg(value_name = "OUT_PATH")]
    pub output: PathBuf,

    /// Brillouin-zone grid resolution (n x n x n k-points)
    pub n: usize,

    /// Number of energy samples in the output
    pub num_dos: usize,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Number of worker threads (0 = all CPUs)
    #[arg(short, long, env = "TETRA_DOS_JOBS", default_value_t = 0)]
    pub jobs: usize,

    /// Also render the DOS curve to this image (.png or .svg)
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Suppress informational output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}
