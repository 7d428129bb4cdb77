//! # 批量执行器
//!
//! 在固定大小的 rayon 线程池中执行计算任务。
//!
//! ## 功能
//! - `--jobs` 线程数控制（0 表示全部 CPU）
//! - 参数扫描的并行执行与进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/dos.rs`, `commands/bands.rs`, `commands/sweep.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{Result, TetraDosError};
use crate::utils::progress;

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 单个任务处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    /// 处理成功
    Success(String),
    /// 跳过（如输出文件已存在）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (任务名, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 跳过数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
    /// 成功任务的消息，按输入顺序
    pub completed: Vec<String>,
    /// 跳过原因，按输入顺序
    pub skips: Vec<String>,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(msg) => {
                self.success += 1;
                self.completed.push(msg);
            }
            ProcessResult::Skipped(reason) => {
                self.skipped += 1;
                self.skips.push(reason);
            }
            ProcessResult::Failed(name, err) => {
                self.failed += 1;
                self.failures.push((name, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行线程数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器，`jobs == 0` 时使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    /// 实际使用的线程数
    pub fn jobs(&self) -> usize {
        self.jobs
    }

    fn build_pool(&self) -> Result<rayon::ThreadPool> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| TetraDosError::Other(format!("Failed to build thread pool: {}", e)))
    }

    /// 在线程池内执行单个计算（其内部的 rayon 并行使用该线程池）
    pub fn install<R, OP>(&self, op: OP) -> Result<R>
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        Ok(self.build_pool()?.install(op))
    }

    /// 并行处理任务列表，结果按输入顺序合并
    pub fn run<T, F>(&self, items: &[T], processor: F) -> Result<BatchResult>
    where
        T: Sync,
        F: Fn(&T) -> ProcessResult + Sync + Send,
    {
        let pool = self.build_pool()?;
        let pb = progress::create_progress_bar(items.len() as u64, "Computing");
        let failed_count = AtomicUsize::new(0);

        let results: Vec<ProcessResult> = pool.install(|| {
            items
                .par_iter()
                .map(|item| {
                    let result = processor(item);

                    if let ProcessResult::Failed(_, _) = &result {
                        let failed = failed_count.fetch_add(1, Ordering::Relaxed) + 1;
                        pb.set_message(format!("Computing ({} failed)", failed));
                    }

                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        // 汇总结果
        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_jobs_uses_all_cpus() {
        assert_eq!(BatchRunner::new(0).jobs(), num_cpus::get());
        assert_eq!(BatchRunner::new(3).jobs(), 3);
    }

    #[test]
    fn test_install_uses_pool_size() {
        let runner = BatchRunner::new(2);
        let threads = runner.install(rayon::current_num_threads).unwrap();
        assert_eq!(threads, 2);
    }

    #[test]
    fn test_run_collects_results() {
        let runner = BatchRunner::new(2);
        let items: Vec<i32> = (0..10).collect();

        let result = runner
            .run(&items, |&x| match x % 3 {
                0 => ProcessResult::Success(x.to_string()),
                1 => ProcessResult::Skipped(x.to_string()),
                _ => ProcessResult::Failed(x.to_string(), "odd one out".to_string()),
            })
            .unwrap();

        assert_eq!(result.total(), 10);
        assert_eq!(result.success, 4);
        assert_eq!(result.skipped, 3);
        assert_eq!(result.failed, 3);
        assert_eq!(result.failures[0].0, "2");
        assert_eq!(result.completed, vec!["0", "3", "6", "9"]);
        assert_eq!(result.skips, vec!["1", "4", "7"]);
    }
}
