//! # DOS 数据导出
//!
//! DOS 文本文件读写和能带 CSV 导出。
//!
//! ## 支持格式
//! - DOS: 制表符分隔，表头 `E\tDOS`，每行能量与 DOS 各保留 10 位小数
//! - 能带: CSV，列为 index, distance, k1, k2, k3, E0..E3
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `dos/engine.rs` 的 DosSamples
//! - 使用 `physics/kpath.rs` 的 BandPath
//! - 使用 `csv` 库写入 CSV 文件

use crate::dos::DosSamples;
use crate::error::{Result, TetraDosError};
use crate::physics::kpath::BandPath;
use crate::physics::NUM_BANDS;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// DOS 文件表头
pub const DOS_HEADER: &str = "E\tDOS";

/// 写入 DOS 文件
pub fn write_dos_values(output_path: &Path, samples: &DosSamples) -> Result<()> {
    let write_error = |e: std::io::Error| TetraDosError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let file = File::create(output_path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", DOS_HEADER).map_err(write_error)?;
    for (e, dos) in samples.iter() {
        writeln!(writer, "{:.10}\t{:.10}", e, dos).map_err(write_error)?;
    }

    writer.flush().map_err(write_error)?;
    Ok(())
}

/// 读取 DOS 文件（跳过表头）
pub fn read_dos_values(input_path: &Path) -> Result<DosSamples> {
    let content = fs::read_to_string(input_path).map_err(|e| TetraDosError::FileReadError {
        path: input_path.display().to_string(),
        source: e,
    })?;
    parse_dos_content(&content, &input_path.display().to_string())
}

/// 解析 DOS 文件内容
pub fn parse_dos_content(content: &str, name: &str) -> Result<DosSamples> {
    let parse_error = |line_no: usize, reason: &str| TetraDosError::ParseError {
        format: "DOS".to_string(),
        path: name.to_string(),
        reason: format!("line {}: {}", line_no, reason),
    };

    let mut energies = Vec::new();
    let mut values = Vec::new();

    for (i, line) in content.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split('\t');
        let (e, dos) = match (fields.next(), fields.next(), fields.next()) {
            (Some(e), Some(dos), None) => (e, dos),
            _ => return Err(parse_error(i + 1, "expected two tab-separated columns")),
        };

        let e: f64 = e
            .trim()
            .parse()
            .map_err(|_| parse_error(i + 1, "invalid energy"))?;
        let dos: f64 = dos
            .trim()
            .parse()
            .map_err(|_| parse_error(i + 1, "invalid DOS value"))?;

        energies.push(e);
        values.push(dos);
    }

    Ok(DosSamples { energies, values })
}

/// 导出能带为 CSV 格式
pub fn write_band_csv(path_data: &BandPath, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    let mut header = vec![
        "index".to_string(),
        "distance".to_string(),
        "k1".to_string(),
        "k2".to_string(),
        "k3".to_string(),
    ];
    header.extend((0..NUM_BANDS).map(|b| format!("E{}", b)));
    wtr.write_record(&header)?;

    for (i, point) in path_data.points.iter().enumerate() {
        let mut record = vec![
            i.to_string(),
            format!("{:.6}", point.distance),
            format!("{:.6}", point.k[0]),
            format!("{:.6}", point.k[1]),
            format!("{:.6}", point.k[2]),
        ];
        record.extend(point.energies.iter().map(|e| format!("{:.10}", e)));
        wtr.write_record(&record)?;
    }

    wtr.flush().map_err(|e| TetraDosError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::kpath::BandPoint;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("tetra_dos_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_write_dos_format() {
        let samples = DosSamples {
            energies: vec![-1.5, 0.25],
            values: vec![0.0, 0.123456789012],
        };
        let path = temp_path("format.dos");
        write_dos_values(&path, &samples).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "E\tDOS");
        assert_eq!(lines[1], "-1.5000000000\t0.0000000000");
        assert_eq!(lines[2], "0.2500000000\t0.1234567890");
        assert_eq!(lines.len(), 3);

        let parsed = read_dos_values(&path).unwrap();
        assert_eq!(parsed.energies, vec![-1.5, 0.25]);
        assert!((parsed.values[1] - 0.123456789).abs() < 1e-12);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_write_dos_unwritable_path() {
        let samples = DosSamples {
            energies: vec![0.0, 1.0],
            values: vec![0.0, 0.0],
        };
        let path = temp_path("missing_dir").join("out.dos");
        let err = write_dos_values(&path, &samples).unwrap_err();
        assert!(matches!(err, TetraDosError::FileWriteError { .. }));
    }

    #[test]
    fn test_parse_dos_rejects_garbage() {
        let content = "E\tDOS\n0.1\t0.2\nnot-a-number\t0.3\n";
        let err = parse_dos_content(content, "bad.dos").unwrap_err();
        assert!(err.to_string().contains("line 3"));

        let content = "E\tDOS\n0.1 0.2\n";
        assert!(parse_dos_content(content, "spaces.dos").is_err());
    }

    #[test]
    fn test_write_band_csv() {
        let path_data = BandPath {
            labels: vec![("Γ".to_string(), 0.0)],
            points: vec![BandPoint {
                k: [0.0, 0.0, 0.0],
                distance: 0.0,
                energies: [-1.0, -0.5, 0.5, 1.0],
            }],
        };
        let path = temp_path("bands.csv");
        write_band_csv(&path_data, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("index,distance,k1,k2,k3,E0,E1,E2,E3"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("0,0.000000,0.000000"));
        assert!(row.ends_with("1.0000000000"));

        fs::remove_file(&path).ok();
    }
}
