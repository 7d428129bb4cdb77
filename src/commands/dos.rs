//! # dos 子命令实现
//!
//! 计算四能带模型的态密度并写出 (E, DOS) 表。
//!
//! ## 功能
//! - 在 `--jobs` 大小的线程池中执行四面体积分
//! - 汇总表格：网格规模、能量范围、积分、峰值
//! - 能隙报告与可选图表
//!
//! 输出文件无法写入时只打印错误并丢弃结果，命令仍然成功返回。
//!
//! ## 依赖关系
//! - 使用 `cli/dos.rs` 定义的 DosArgs
//! - 使用 `dos/` 模块计算、导出和绘图
//! - 使用 `batch/runner.rs` 控制线程数

use crate::batch::BatchRunner;
use crate::cli::dos::DosArgs;
use crate::commands::{report_gaps, PLOT_HEIGHT, PLOT_WIDTH};
use crate::dos::tetrahedra::Mesh;
use crate::dos::{self, export, find_gaps, plot, DosSamples};
use crate::error::Result;
use crate::models::PhysicalEnvironment;
use crate::physics::NUM_BANDS;
use crate::utils::output::{self, Reporter};
use crate::utils::progress;

use tabled::{Table, Tabled};

/// 汇总表格行
#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl SummaryRow {
    fn new(quantity: &str, value: String) -> Self {
        Self {
            quantity: quantity.to_string(),
            value,
        }
    }
}

/// 执行 DOS 计算
pub fn execute(args: DosArgs) -> Result<()> {
    let reporter = Reporter::new(args.quiet);
    let env = args.model.environment()?;
    let runner = BatchRunner::new(args.jobs);

    reporter.header("Tetrahedron-Method Density of States");
    reporter.info(&format!(
        "Grid: {}³ k-points, {} energy samples, {} thread(s)",
        args.n,
        args.num_dos,
        runner.jobs()
    ));
    print_parameters(&reporter, &env);

    let spinner = (!reporter.is_quiet())
        .then(|| progress::create_spinner("Integrating over the Brillouin zone..."));
    let result = runner.install(|| dos::dos_values(&env, args.n, args.num_dos));
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let samples = result??;

    if let Err(e) = export::write_dos_values(&args.output, &samples) {
        output::print_error(&format!("{}; results discarded", e));
        return Ok(());
    }
    reporter.success(&format!("DOS written to '{}'", args.output.display()));

    print_summary(&reporter, &samples, args.n);

    let gaps = find_gaps(&samples.values, &samples.energies);
    report_gaps(&reporter, &gaps);

    if let Some(plot_path) = &args.plot {
        let title = format!("DOS (n = {}, μ = {})", args.n, env.mu);
        plot::generate_dos_plot(
            &samples,
            &gaps,
            plot_path,
            &title,
            PLOT_WIDTH,
            PLOT_HEIGHT,
            plot::is_svg_path(plot_path),
        )?;
        reporter.success(&format!("Plot saved to '{}'", plot_path.display()));
    }

    Ok(())
}

/// 打印模型参数
fn print_parameters(reporter: &Reporter, env: &PhysicalEnvironment) {
    let line = env
        .named_values()
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(" ");
    reporter.info(&format!("Parameters: {}", line));
    reporter.info(&format!("On-site energy: {:.6}", env.onsite()));
}

/// 打印汇总表格
fn print_summary(reporter: &Reporter, samples: &DosSamples, n: usize) {
    let mut rows = Vec::new();
    if let Ok(mesh) = Mesh::new(n) {
        rows.push(SummaryRow::new("k-points", mesh.num_points().to_string()));
        rows.push(SummaryRow::new("tetrahedra", mesh.num_tetrahedra().to_string()));
    }
    rows.push(SummaryRow::new("energy samples", samples.len().to_string()));

    if let (Some(first), Some(last)) = (samples.energies.first(), samples.energies.last()) {
        rows.push(SummaryRow::new(
            "energy range",
            format!("[{:.6}, {:.6}]", first, last),
        ));
    }
    rows.push(SummaryRow::new(
        "∫ DOS dE",
        format!("{:.6} (bands: {})", samples.integral(), NUM_BANDS),
    ));
    if let Some((e, d)) = samples.peak() {
        rows.push(SummaryRow::new("peak", format!("{:.6} at E = {:.6}", d, e)));
    }

    reporter.block(&Table::new(&rows).to_string());
}
