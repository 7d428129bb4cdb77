//! # sweep 子命令实现
//!
//! 从 CSV 读取多组模型参数，为每组参数并行计算并写出 DOS 文件。
//!
//! ## 功能
//! - 列名与 `PhysicalEnvironment` 的 serde 名称一致，多余列忽略
//! - 可选 `label` 列决定输出文件名，否则为 `row_NNN.dat`
//! - 重名时追加 `_row_NNN`，保证每组参数写入不同文件
//! - 已存在的输出默认跳过（`--overwrite` 覆盖）
//! - 单行失败不影响其他行，最后汇总报告
//!
//! ## 依赖关系
//! - 使用 `cli/sweep.rs` 定义的 SweepArgs
//! - 使用 `batch/` 模块进行并行处理
//! - 使用 `dos/` 模块计算与导出

use crate::batch::{BatchResult, BatchRunner, ProcessResult};
use crate::cli::sweep::SweepArgs;
use crate::dos::{self, export, find_gaps};
use crate::error::{Result, TetraDosError};
use crate::models::PhysicalEnvironment;
use crate::utils::output;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// 一组扫描参数
#[derive(Debug, Clone)]
pub struct ParameterSet {
    /// 输出文件名（不含扩展名）
    pub name: String,
    /// 模型参数（尚未校验）
    pub env: PhysicalEnvironment,
}

/// 扫描配置
struct SweepConfig {
    output_dir: PathBuf,
    n: usize,
    num_dos: usize,
    overwrite: bool,
}

/// 执行参数扫描
pub fn execute(args: SweepArgs) -> Result<()> {
    output::print_header("DOS Parameter Sweep");

    if !args.params.exists() {
        return Err(TetraDosError::FileNotFound {
            path: args.params.display().to_string(),
        });
    }

    let sets = load_parameter_sets(&args.params)?;
    if sets.is_empty() {
        output::print_warning(&format!(
            "No parameter sets found in '{}'",
            args.params.display()
        ));
        return Ok(());
    }

    output::print_info(&format!(
        "{} parameter set(s), n = {}, {} energy samples",
        sets.len(),
        args.n,
        args.num_dos
    ));

    fs::create_dir_all(&args.output).map_err(|e| TetraDosError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let config = SweepConfig {
        output_dir: args.output.clone(),
        n: args.n,
        num_dos: args.num_dos,
        overwrite: args.overwrite,
    };

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Using {} thread(s)", runner.jobs()));
    let result = runner.run(&sets, |set| process_parameter_set(set, &config))?;

    report_result(&result);
    Ok(())
}

/// 打印逐行结果与汇总
fn report_result(result: &BatchResult) {
    for msg in &result.completed {
        output::print_success(msg);
    }
    for reason in &result.skips {
        output::print_info(&format!("Skipped: {}", reason));
    }

    output::print_separator();
    output::print_done(&format!(
        "Sweep complete: {} of {} succeeded, {} skipped, {} failed",
        result.success,
        result.total(),
        result.skipped,
        result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed parameter sets:");
        for (name, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", name, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }
}

/// 读取参数 CSV
pub fn load_parameter_sets(path: &Path) -> Result<Vec<ParameterSet>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let headers = rdr.headers()?.clone();
    let label_column = headers.iter().position(|h| h.trim() == "label");

    let mut sets = Vec::new();
    let mut used = HashSet::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let env: PhysicalEnvironment = record.deserialize(Some(&headers))?;

        let name = label_column
            .and_then(|col| record.get(col))
            .map(sanitize_label)
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| format!("row_{:03}", row + 1));

        let name = unique_name(name, row + 1, &mut used);
        sets.push(ParameterSet { name, env });
    }

    Ok(sets)
}

/// 已用过的名称追加 `_row_NNN`（仍冲突时再加序号），并登记结果
fn unique_name(name: String, row: usize, used: &mut HashSet<String>) -> String {
    if used.insert(name.clone()) {
        return name;
    }

    let base = format!("{}_row_{:03}", name, row);
    let mut candidate = base.clone();
    let mut suffix = 2;
    while !used.insert(candidate.clone()) {
        candidate = format!("{}_{}", base, suffix);
        suffix += 1;
    }
    candidate
}

/// 标签转为安全的文件名
fn sanitize_label(label: &str) -> String {
    label
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}

/// 处理单组参数
fn process_parameter_set(set: &ParameterSet, config: &SweepConfig) -> ProcessResult {
    let output_path = config.output_dir.join(format!("{}.dat", set.name));

    if output_path.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!(
            "'{}' already exists",
            output_path.display()
        ));
    }

    match compute_and_write(&set.env, config, &output_path) {
        Ok(summary) => ProcessResult::Success(summary),
        Err(e) => ProcessResult::Failed(set.name.clone(), e.to_string()),
    }
}

fn compute_and_write(
    env: &PhysicalEnvironment,
    config: &SweepConfig,
    output_path: &Path,
) -> Result<String> {
    env.validate()?;
    let samples = dos::dos_values(env, config.n, config.num_dos)?;
    export::write_dos_values(output_path, &samples)?;

    let gaps = find_gaps(&samples.values, &samples.energies);
    Ok(format!(
        "{}: ∫ DOS dE = {:.4}, {} gap(s)",
        output_path.display(),
        samples.integral(),
        gaps.len()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "label,Tae,Tce,Tbe,Tao,Tco,Tbo,EpsilonR,EpsilonM,M,W,Mu";

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tetra_dos_sweep_{}_{}", std::process::id(), name));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn config(output_dir: PathBuf, overwrite: bool) -> SweepConfig {
        SweepConfig {
            output_dir,
            n: 2,
            num_dos: 20,
            overwrite,
        }
    }

    #[test]
    fn test_load_parameter_sets() {
        let dir = temp_dir("load");
        let csv_path = dir.join("params.csv");
        let content = format!(
            "{}\nmetal,0.2,1.0,0.4,0.08,0.4,0.16,0.05,0.05,0.0,0.0,-2.0\n,0.2,1.0,0.4,0.08,0.4,0.16,0.05,0.05,1.0,1.0,-2.0\n",
            HEADER
        );
        fs::write(&csv_path, content).unwrap();

        let sets = load_parameter_sets(&csv_path).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, "metal");
        assert_eq!(sets[1].name, "row_002");
        assert!((sets[1].env.w - 1.0).abs() < 1e-12);
        assert!((sets[0].env.mu + 2.0).abs() < 1e-12);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_duplicate_labels_get_distinct_files() {
        let dir = temp_dir("duplicate");
        let csv_path = dir.join("params.csv");
        let content = format!(
            "{}\nsame,0.2,1.0,0.4,0.08,0.4,0.16,0.05,0.05,0.0,0.0,-2.0\nsame,0.2,1.0,0.4,0.08,0.4,0.16,0.05,0.05,1.0,1.0,-2.0\nrow_004,0.2,1.0,0.4,0.08,0.4,0.16,0.05,0.05,0.5,0.5,-2.0\n,0.2,1.0,0.4,0.08,0.4,0.16,0.05,0.05,0.2,0.2,-2.0\n",
            HEADER
        );
        fs::write(&csv_path, content).unwrap();

        let sets = load_parameter_sets(&csv_path).unwrap();
        let names: Vec<&str> = sets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["same", "same_row_002", "row_004", "row_004_row_004"]);

        let out_dir = dir.join("out");
        fs::create_dir_all(&out_dir).unwrap();
        let config = config(out_dir.clone(), false);
        let result = BatchRunner::new(2)
            .run(&sets, |set| process_parameter_set(set, &config))
            .unwrap();

        assert_eq!(result.success, 4);
        assert_eq!(result.completed.len(), 4);
        let files = fs::read_dir(&out_dir).unwrap().count();
        assert_eq!(files, 4);

        let first = export::read_dos_values(&out_dir.join("same.dat")).unwrap();
        let second = export::read_dos_values(&out_dir.join("same_row_002.dat")).unwrap();
        assert_ne!(first, second);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unique_name_suffixes() {
        let mut used = HashSet::new();
        assert_eq!(unique_name("a".to_string(), 1, &mut used), "a");
        assert_eq!(unique_name("a_row_003".to_string(), 2, &mut used), "a_row_003");
        assert_eq!(unique_name("a".to_string(), 3, &mut used), "a_row_003_2");
    }

    #[test]
    fn test_load_rejects_missing_column() {
        let dir = temp_dir("missing");
        let csv_path = dir.join("params.csv");
        fs::write(&csv_path, "Tae,Tce\n0.1,0.2\n").unwrap();

        assert!(matches!(
            load_parameter_sets(&csv_path),
            Err(TetraDosError::CsvError(_))
        ));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_process_writes_then_skips() {
        let dir = temp_dir("process");
        let set = ParameterSet {
            name: "ref".to_string(),
            env: PhysicalEnvironment::new(0.2, 1.0, 0.4, 0.08, 0.4, 0.16, 0.05, 0.05, 1.0, 1.0, -2.0)
                .unwrap(),
        };

        let first = process_parameter_set(&set, &config(dir.clone(), false));
        assert!(matches!(first, ProcessResult::Success(_)));
        assert!(dir.join("ref.dat").exists());

        let second = process_parameter_set(&set, &config(dir.clone(), false));
        assert!(matches!(second, ProcessResult::Skipped(_)));

        let third = process_parameter_set(&set, &config(dir.clone(), true));
        assert!(matches!(third, ProcessResult::Success(_)));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_row_fails_alone() {
        let dir = temp_dir("invalid");
        let mut env =
            PhysicalEnvironment::new(0.2, 1.0, 0.4, 0.08, 0.4, 0.16, 0.05, 0.05, 1.0, 1.0, -2.0)
                .unwrap();
        env.tbe = f64::NAN;
        let set = ParameterSet {
            name: "bad".to_string(),
            env,
        };

        match process_parameter_set(&set, &config(dir.clone(), false)) {
            ProcessResult::Failed(name, err) => {
                assert_eq!(name, "bad");
                assert!(err.contains("Tbe"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!dir.join("bad.dat").exists());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_sanitize_label() {
        assert_eq!(sanitize_label(" a/b c "), "a_b_c");
        assert_eq!(sanitize_label("W=0.5"), "W=0.5");
    }
}
