//! # bands 子命令实现
//!
//! 沿 Γ-X-M-Γ-R-X-M-R 计算能带，写出 CSV 并打印高对称点能量。
//!
//! ## 依赖关系
//! - 使用 `cli/bands.rs` 定义的 BandsArgs
//! - 使用 `physics/kpath.rs` 计算路径能带
//! - 使用 `dos/export.rs`, `dos/plot.rs` 输出

use crate::batch::BatchRunner;
use crate::cli::bands::BandsArgs;
use crate::commands::{PLOT_HEIGHT, PLOT_WIDTH};
use crate::dos::{export, plot};
use crate::error::Result;
use crate::models::cubic_reciprocal;
use crate::physics::kpath::{band_structure, BandPath};
use crate::utils::{output, progress};

use tabled::{Table, Tabled};

/// 高对称点能量表格行
#[derive(Tabled)]
struct SymmetryPointRow {
    #[tabled(rename = "Point")]
    label: String,
    #[tabled(rename = "Distance")]
    distance: String,
    #[tabled(rename = "E0")]
    e0: String,
    #[tabled(rename = "E1")]
    e1: String,
    #[tabled(rename = "E2")]
    e2: String,
    #[tabled(rename = "E3")]
    e3: String,
}

/// 执行能带计算
pub fn execute(args: BandsArgs) -> Result<()> {
    output::print_header("Band Structure Along Γ-X-M-Γ-R-X-M-R");

    let env = args.model.environment()?;
    let recip = cubic_reciprocal(1.0)?;
    let runner = BatchRunner::new(args.jobs);

    let spinner = progress::create_spinner("Diagonalizing along the path...");
    let result = runner.install(|| band_structure(&env, &recip, args.points_per_panel));
    spinner.finish_and_clear();
    let path_data = result??;

    output::print_info(&format!(
        "{} k-points, {} per segment",
        path_data.points.len(),
        args.points_per_panel
    ));

    export::write_band_csv(&path_data, &args.output)?;
    output::print_success(&format!("Bands written to '{}'", args.output.display()));

    print_symmetry_points(&path_data, args.points_per_panel);

    if let Some(plot_path) = &args.plot {
        plot::generate_band_plot(
            &path_data,
            plot_path,
            "Band structure",
            PLOT_WIDTH,
            PLOT_HEIGHT,
            plot::is_svg_path(plot_path),
        )?;
        output::print_success(&format!("Plot saved to '{}'", plot_path.display()));
    }

    Ok(())
}

/// 打印高对称点处的能带能量
fn print_symmetry_points(path_data: &BandPath, points_per_panel: usize) {
    let rows: Vec<SymmetryPointRow> = path_data
        .labels
        .iter()
        .enumerate()
        .filter_map(|(panel, (label, distance))| {
            let point = path_data.points.get(panel * (points_per_panel - 1))?;
            let [e0, e1, e2, e3] = point.energies;
            Some(SymmetryPointRow {
                label: label.clone(),
                distance: format!("{:.4}", distance),
                e0: format!("{:.6}", e0),
                e1: format!("{:.6}", e1),
                e2: format!("{:.6}", e2),
                e3: format!("{:.6}", e3),
            })
        })
        .collect();

    output::print_header("Energies at High-Symmetry Points");
    println!("{}", Table::new(&rows));
}
