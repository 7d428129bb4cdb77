//! # plot 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/plot.rs`

use clap::Args;
use std::path::PathBuf;

/// plot 子命令参数
#[derive(Args, Debug)]
pub struct PlotArgs {
    /// DOS file written by the `dos` or `sweep` command
    pub input: PathBuf,

    /// Output image (.png or .svg)
    #[arg(short, long, default_value = "dos.png")]
    pub output: PathBuf,

    /// Plot title
    #[arg(long, default_value = "Density of States")]
    pub title: String,

    /// Image width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,
}
