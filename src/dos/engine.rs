//! # DOS 积分引擎
//!
//! 四面体方法布里渊区积分，由能带能量回调函数得到态密度。
//!
//! ## 接口约定
//! - 调用方提供回调 `energy_fn(k, out)`：k 为倒格子分数坐标，
//!   `out` 长度为能带数，写入升序能量
//! - 引擎负责生成能量网格：在所有能带能量的最小值与最大值之间均匀取 `num_dos` 个点
//! - 回调可能被多个线程并发调用，必须可重入
//!
//! ## 算法概述
//! 1. 在 n³ 网格点上并行求能带能量（rayon）
//! 2. 每个子立方体剖分为 6 个四面体
//! 3. 按固定顺序累加每个四面体、每条能带的线性插值 DOS
//!
//! ## 依赖关系
//! - 被 `commands/dos.rs`, `commands/sweep.rs` 调用
//! - 使用 `dos/tetrahedra.rs` 的网格与四面体 DOS
//! - 使用 `physics/bands.rs` 作为模型回调

use crate::dos::tetrahedra::{tetra_dos, Mesh};
use crate::error::{Result, TetraDosError};
use crate::models::{cubic_reciprocal, Momentum, PhysicalEnvironment, ReciprocalMatrix};
use crate::physics::{BandEnergyProvider, NUM_BANDS};

use rayon::prelude::*;

/// DOS 计算结果：能量网格与对应的态密度
#[derive(Debug, Clone, PartialEq)]
pub struct DosSamples {
    /// 能量（升序）
    pub energies: Vec<f64>,
    /// 态密度（非负）
    pub values: Vec<f64>,
}

impl DosSamples {
    /// 采样点数
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// (E, D(E)) 迭代器
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.energies.iter().copied().zip(self.values.iter().copied())
    }

    /// 梯形积分 ∫ D(E) dE，应接近能带数
    pub fn integral(&self) -> f64 {
        self.energies
            .windows(2)
            .zip(self.values.windows(2))
            .map(|(e, d)| 0.5 * (d[0] + d[1]) * (e[1] - e[0]))
            .sum()
    }

    /// 最大 DOS 及其能量
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.iter()
            .fold(None, |best: Option<(f64, f64)>, (e, d)| match best {
                Some((_, best_d)) if best_d >= d => best,
                _ => Some((e, d)),
            })
    }
}

/// DOS 积分引擎
pub trait DosEngine {
    /// 计算 DOS
    ///
    /// - `energy_fn`: 能带能量回调，写入 `num_bands` 个升序能量
    /// - `n`: 每个方向的网格点数（共 n³ 个 k 点）
    /// - `recip`: 倒格矢矩阵
    /// - `num_dos`: 输出的能量点数
    fn dos_values<F>(
        &self,
        energy_fn: F,
        n: usize,
        num_bands: usize,
        recip: &ReciprocalMatrix,
        num_dos: usize,
    ) -> Result<DosSamples>
    where
        F: Fn(&Momentum, &mut [f64]) -> Result<()> + Sync;
}

/// 线性四面体方法
#[derive(Debug, Clone, Copy, Default)]
pub struct TetrahedronEngine;

impl DosEngine for TetrahedronEngine {
    fn dos_values<F>(
        &self,
        energy_fn: F,
        n: usize,
        num_bands: usize,
        recip: &ReciprocalMatrix,
        num_dos: usize,
    ) -> Result<DosSamples>
    where
        F: Fn(&Momentum, &mut [f64]) -> Result<()> + Sync,
    {
        let mesh = Mesh::new(n)?;
        if num_bands == 0 {
            return Err(TetraDosError::InvalidArgument(
                "number of bands must be at least 1".to_string(),
            ));
        }
        if num_dos < 2 {
            return Err(TetraDosError::InvalidArgument(format!(
                "number of DOS samples must be at least 2, got {}",
                num_dos
            )));
        }

        let len = mesh.num_points().checked_mul(num_bands).ok_or_else(|| {
            TetraDosError::InvalidArgument(format!(
                "{} k-points x {} bands exceeds the addressable size",
                mesh.num_points(),
                num_bands
            ))
        })?;

        // 网格点能带能量，按 [点][能带] 平铺
        let mut band_energies = vec![0.0; len];
        band_energies
            .par_chunks_mut(num_bands)
            .enumerate()
            .try_for_each(|(index, out)| energy_fn(&mesh.point(index), out))?;

        if let Some(bad) = band_energies.iter().position(|e| !e.is_finite()) {
            return Err(TetraDosError::Other(format!(
                "band energy {} at k = {:?} is not finite",
                band_energies[bad],
                mesh.point(bad / num_bands)
            )));
        }

        let e_min = band_energies.iter().copied().fold(f64::INFINITY, f64::min);
        let e_max = band_energies
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        let step = (e_max - e_min) / (num_dos - 1) as f64;
        let energies: Vec<f64> = (0..num_dos).map(|i| e_min + i as f64 * step).collect();
        let mut values = vec![0.0; num_dos];

        // 所有能带完全平坦时 DOS 为 δ 函数，无法在网格上表示
        if step <= 0.0 {
            return Ok(DosSamples { energies, values });
        }

        let weight = mesh.tetra_weight();
        let mut corners = [0.0; 4];

        for tetra in mesh.tetrahedra(recip) {
            for band in 0..num_bands {
                for (corner, &vertex) in corners.iter_mut().zip(&tetra) {
                    *corner = band_energies[vertex * num_bands + band];
                }
                corners.sort_by(|a, b| a.total_cmp(b));

                if corners[3] <= corners[0] {
                    continue;
                }

                let (lo, hi) = grid_range(&corners, e_min, step, num_dos);
                for (value, &e) in values[lo..hi].iter_mut().zip(&energies[lo..hi]) {
                    *value += weight * tetra_dos(e, &corners);
                }
            }
        }

        Ok(DosSamples { energies, values })
    }
}

/// 四面体能量范围 [E1, E4) 覆盖的能量网格下标（略为放宽）
fn grid_range(corners: &[f64; 4], e_min: f64, step: f64, num_dos: usize) -> (usize, usize) {
    let lo = ((corners[0] - e_min) / step).ceil() as isize - 1;
    let hi = ((corners[3] - e_min) / step).floor() as isize + 2;
    let hi = (hi.max(0) as usize).min(num_dos);
    let lo = (lo.max(0) as usize).min(hi);
    (lo, hi)
}

/// 四能带模型的 DOS：简单立方格子 a = 1，n³ 个 k 点，`num_dos` 个能量点
pub fn dos_values(env: &PhysicalEnvironment, n: usize, num_dos: usize) -> Result<DosSamples> {
    let recip = cubic_reciprocal(1.0)?;
    let provider = BandEnergyProvider::new(env);

    TetrahedronEngine.dos_values(
        |k: &Momentum, out: &mut [f64]| provider.fill(k, out),
        n,
        NUM_BANDS,
        &recip,
        num_dos,
    )
}
