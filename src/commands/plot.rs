//! # plot 子命令实现
//!
//! 读取已写出的 DOS 文件，报告能隙并重新绘图。
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的 PlotArgs
//! - 使用 `dos/export.rs` 读取文件，`dos/plot.rs` 绘图

use crate::cli::plot::PlotArgs;
use crate::commands::report_gaps;
use crate::dos::{export, find_gaps, plot};
use crate::error::{Result, TetraDosError};
use crate::utils::output::{self, Reporter};

/// 执行绘图
pub fn execute(args: PlotArgs) -> Result<()> {
    output::print_header("DOS Plot");

    if !args.input.exists() {
        return Err(TetraDosError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let samples = export::read_dos_values(&args.input)?;
    if samples.is_empty() {
        return Err(TetraDosError::ParseError {
            format: "DOS".to_string(),
            path: args.input.display().to_string(),
            reason: "no data lines".to_string(),
        });
    }

    output::print_info(&format!(
        "Loaded {} samples from '{}' (∫ DOS dE = {:.6})",
        samples.len(),
        args.input.display(),
        samples.integral()
    ));

    let gaps = find_gaps(&samples.values, &samples.energies);
    report_gaps(&Reporter::default(), &gaps);

    plot::generate_dos_plot(
        &samples,
        &gaps,
        &args.output,
        &args.title,
        args.width,
        args.height,
        plot::is_svg_path(&args.output),
    )?;
    output::print_success(&format!("Plot saved to '{}'", args.output.display()));

    Ok(())
}
