//! # 能隙检测
//!
//! 在 DOS 曲线中寻找态密度为零的能量区间。
//!
//! ## 依赖关系
//! - 被 `commands/dos.rs`, `commands/plot.rs`, `commands/sweep.rs` 调用
//! - 被 `dos/plot.rs` 用于标注能隙

/// 判定 DOS 为零的阈值
pub const ZERO_DOS_TOLERANCE: f64 = 1e-12;

/// 能隙区间 [start, stop)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gap {
    /// 第一个零 DOS 能量
    pub start: f64,
    /// 之后第一个非零 DOS 能量
    pub stop: f64,
}

impl Gap {
    /// 能隙宽度
    pub fn width(&self) -> f64 {
        self.stop - self.start
    }
}

/// 寻找能隙
///
/// 只报告位于两段非零 DOS 之间的零值区间：
/// 最低能带以下和最高能带以上的零值不算能隙。
pub fn find_gaps(values: &[f64], energies: &[f64]) -> Vec<Gap> {
    let mut gaps = Vec::new();
    let mut seen_states = false;
    let mut gap_start: Option<f64> = None;

    for (&dos, &e) in values.iter().zip(energies) {
        let zero = dos.abs() < ZERO_DOS_TOLERANCE;

        match gap_start {
            None if seen_states && zero => gap_start = Some(e),
            Some(start) if !zero => {
                gaps.push(Gap { start, stop: e });
                gap_start = None;
            }
            _ => {}
        }

        if !zero {
            seen_states = true;
        }
    }

    gaps
}
