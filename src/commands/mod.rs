//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `models/`, `physics/`, `dos/`, `batch/`, `utils/`
//! - 子模块: dos, bands, plot, sweep

pub mod bands;
pub mod dos;
pub mod plot;
pub mod sweep;

use crate::cli::Commands;
use crate::dos::Gap;
use crate::error::Result;
use crate::utils::output::Reporter;

use tabled::{Table, Tabled};

/// 图片默认尺寸
pub const PLOT_WIDTH: u32 = 1200;
pub const PLOT_HEIGHT: u32 = 800;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Dos(args) => dos::execute(args),
        Commands::Bands(args) => bands::execute(args),
        Commands::Plot(args) => plot::execute(args),
        Commands::Sweep(args) => sweep::execute(args),
    }
}

/// 能隙表格行
#[derive(Tabled)]
struct GapRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "E start")]
    start: String,
    #[tabled(rename = "E stop")]
    stop: String,
    #[tabled(rename = "Width")]
    width: String,
}

/// 打印能隙报告
pub(crate) fn report_gaps(reporter: &Reporter, gaps: &[Gap]) {
    if gaps.is_empty() {
        reporter.info("No gaps found between occupied energy windows");
        return;
    }

    let rows: Vec<GapRow> = gaps
        .iter()
        .enumerate()
        .map(|(i, gap)| GapRow {
            index: i + 1,
            start: format!("{:.6}", gap.start),
            stop: format!("{:.6}", gap.stop),
            width: format!("{:.6}", gap.width()),
        })
        .collect();

    reporter.header(&format!("{} Gap(s) in the DOS", rows.len()));
    reporter.block(&Table::new(&rows).to_string());
}
