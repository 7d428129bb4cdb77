//! # tetra-dos - VO2 四能带模型态密度工具
//!
//! 以四面体方法对布里渊区积分，计算 VO2 四能带紧束缚模型的态密度。
//!
//! ## 子命令
//! - `dos`   - 计算 DOS 并写出 (E, DOS) 表
//! - `bands` - 高对称路径能带
//! - `plot`  - 重新绘制 DOS 文件并报告能隙
//! - `sweep` - 批量参数扫描
//!
//! 省略子命令时按 `dos` 处理，兼容纯位置参数的调用方式。
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── dos/       (四面体积分、能隙、导出、绘图)
//!   │     ├── physics/   (哈密顿量、能带、k 路径)
//!   │     ├── batch/     (线程池与批量执行)
//!   │     └── models/    (参数环境、倒格子)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod dos;
mod error;
mod models;
mod physics;
mod utils;

use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse_with_default();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        let code = if e.is_usage_error() { 2 } else { 1 };
        std::process::exit(code);
    }
}
