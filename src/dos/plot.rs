//! # DOS 与能带图表生成
//!
//! 使用 `plotters` 库绘制态密度曲线和高对称路径能带。
//!
//! ## 功能
//! - DOS 曲线，能隙区间以阴影标出
//! - 能带图，高对称点处画竖线
//! - 支持 PNG 和 SVG 输出（按扩展名或 `use_svg` 选择）
//!
//! ## 依赖关系
//! - 被 `commands/dos.rs`, `commands/bands.rs`, `commands/plot.rs` 调用
//! - 使用 `dos/gaps.rs` 的 Gap
//! - 使用 `plotters` 渲染图表

use crate::dos::{DosSamples, Gap};
use crate::error::{Result, TetraDosError};
use crate::physics::kpath::BandPath;
use crate::physics::NUM_BANDS;

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

fn plot_error<E: std::fmt::Debug>(e: E) -> TetraDosError {
    TetraDosError::PlotError(format!("{:?}", e))
}

/// 根据扩展名判断是否输出 SVG
pub fn is_svg_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}

/// 数据范围，两端各留 `pad` 比例的空白；退化区间展开为 ±0.5
fn padded_range(lo: f64, hi: f64, pad: f64) -> (f64, f64) {
    if hi <= lo {
        return (lo - 0.5, lo + 0.5);
    }
    let margin = (hi - lo) * pad;
    (lo - margin, hi + margin)
}

/// 生成 DOS 图表
pub fn generate_dos_plot(
    samples: &DosSamples,
    gaps: &[Gap],
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
    use_svg: bool,
) -> Result<()> {
    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_dos_chart(&root, samples, gaps, title)?;
        root.present().map_err(plot_error)?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_dos_chart(&root, samples, gaps, title)?;
        root.present().map_err(plot_error)?;
    }
    Ok(())
}

/// 绘制 DOS 曲线
fn draw_dos_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    samples: &DosSamples,
    gaps: &[Gap],
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_error)?;

    let e_lo = samples.energies.first().copied().unwrap_or(-1.0);
    let e_hi = samples.energies.last().copied().unwrap_or(1.0);
    let (x_min, x_max) = padded_range(e_lo, e_hi, 0.02);

    let d_max = samples.peak().map(|(_, d)| d).unwrap_or(0.0);
    let y_max = if d_max > 0.0 { d_max * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("E")
        .y_desc("DOS (states / energy)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_error)?;

    // 能隙阴影
    let gap_color = RGBColor(204, 51, 51).mix(0.15);
    chart
        .draw_series(
            gaps.iter()
                .map(|gap| Rectangle::new([(gap.start, 0.0), (gap.stop, y_max)], gap_color.filled())),
        )
        .map_err(plot_error)?;

    let fill_color = RGBColor(0, 102, 204).mix(0.2);
    chart
        .draw_series(AreaSeries::new(samples.iter(), 0.0, fill_color))
        .map_err(plot_error)?;

    let line_color = RGBColor(0, 102, 204);
    chart
        .draw_series(LineSeries::new(samples.iter(), line_color.stroke_width(2)))
        .map_err(plot_error)?;

    Ok(())
}

/// 生成能带图表
pub fn generate_band_plot(
    path_data: &BandPath,
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
    use_svg: bool,
) -> Result<()> {
    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_band_chart(&root, path_data, title)?;
        root.present().map_err(plot_error)?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_band_chart(&root, path_data, title)?;
        root.present().map_err(plot_error)?;
    }
    Ok(())
}

/// 绘制能带
fn draw_band_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    path_data: &BandPath,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_error)?;

    let x_max = path_data.points.last().map(|p| p.distance).unwrap_or(1.0);
    let x_max = if x_max > 0.0 { x_max } else { 1.0 };

    let (e_lo, e_hi) = path_data
        .points
        .iter()
        .flat_map(|p| p.energies.iter().copied())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), e| {
            (lo.min(e), hi.max(e))
        });
    let (y_min, y_max) = if e_lo.is_finite() && e_hi.is_finite() {
        padded_range(e_lo, e_hi, 0.05)
    } else {
        (-1.0, 1.0)
    };

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)
        .map_err(plot_error)?;

    // 横轴刻度用高对称点标签代替
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .y_desc("E")
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(path_data.labels.iter().map(|(_, d)| {
            PathElement::new(vec![(*d, y_min), (*d, y_max)], BLACK.mix(0.4).stroke_width(1))
        }))
        .map_err(plot_error)?;

    let label_style = ("sans-serif", 18).into_font().color(&BLACK);
    chart
        .draw_series(
            path_data
                .labels
                .iter()
                .map(|(name, d)| Text::new(name.clone(), (*d, y_min), label_style.clone())),
        )
        .map_err(plot_error)?;

    let palette = [
        RGBColor(0, 102, 204),
        RGBColor(204, 51, 51),
        RGBColor(0, 153, 76),
        RGBColor(153, 76, 204),
    ];
    for band in 0..NUM_BANDS {
        let color = palette[band % palette.len()];
        chart
            .draw_series(LineSeries::new(
                path_data.points.iter().map(|p| (p.distance, p.energies[band])),
                color.stroke_width(2),
            ))
            .map_err(plot_error)?
            .label(format!("band {}", band))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_svg_path() {
        assert!(is_svg_path(Path::new("dos.svg")));
        assert!(is_svg_path(Path::new("out/DOS.SVG")));
        assert!(!is_svg_path(Path::new("dos.png")));
        assert!(!is_svg_path(Path::new("dos")));
    }

    #[test]
    fn test_padded_range() {
        let (lo, hi) = padded_range(-1.0, 1.0, 0.05);
        assert!((lo + 1.1).abs() < 1e-12);
        assert!((hi - 1.1).abs() < 1e-12);

        let (lo, hi) = padded_range(2.0, 2.0, 0.05);
        assert!((lo - 1.5).abs() < 1e-12);
        assert!((hi - 2.5).abs() < 1e-12);
    }
}
