//! # 能带能量
//!
//! 将哈密顿量构造与厄米本征值分解组合，给出按升序排列的能带能量。
//! 作为回调函数提供给 DOS 积分引擎。
//!
//! ## 线程安全
//! `BandEnergyProvider` 只持有参数环境的只读引用，
//! 每次调用都在栈上构造独立的矩阵，可以被 rayon 并发调用。
//!
//! ## 依赖关系
//! - 被 `dos/engine.rs`, `physics/kpath.rs` 使用
//! - 使用 `physics/hamiltonian.rs` 构造 H(k)
//! - 使用 `nalgebra::SymmetricEigen` 求解厄米本征值

use crate::error::{Result, TetraDosError};
use crate::models::{Momentum, PhysicalEnvironment};
use crate::physics::hamiltonian::el_hamiltonian_recip;
use crate::physics::NUM_BANDS;

use nalgebra::SymmetricEigen;

/// 单个 k 点的能带能量（升序）
pub type BandEnergies = [f64; NUM_BANDS];

/// 本征值求解的收敛阈值
const EIGEN_EPS: f64 = f64::EPSILON;

/// 本征值求解的最大迭代次数
const EIGEN_MAX_ITER: usize = 1000;

/// 能带能量提供者，绑定一个固定的参数环境
#[derive(Debug, Clone, Copy)]
pub struct BandEnergyProvider<'a> {
    env: &'a PhysicalEnvironment,
}

impl<'a> BandEnergyProvider<'a> {
    /// 创建绑定到参数环境的提供者
    pub fn new(env: &'a PhysicalEnvironment) -> Self {
        Self { env }
    }

    /// 计算 k 点（倒格子分数坐标）的能带能量
    pub fn energies_at(&self, k: &Momentum) -> Result<BandEnergies> {
        let h = el_hamiltonian_recip(self.env, k);

        let eigen = SymmetricEigen::try_new(h, EIGEN_EPS, EIGEN_MAX_ITER)
            .ok_or(TetraDosError::EigenNonConvergence { k: *k })?;

        let mut energies = [0.0; NUM_BANDS];
        energies.copy_from_slice(eigen.eigenvalues.as_slice());
        energies.sort_by(|a, b| a.total_cmp(b));

        Ok(energies)
    }

    /// 将能带能量写入引擎提供的缓冲区
    pub fn fill(&self, k: &Momentum, out: &mut [f64]) -> Result<()> {
        if out.len() != NUM_BANDS {
            return Err(TetraDosError::InvalidArgument(format!(
                "band buffer has length {}, expected {}",
                out.len(),
                NUM_BANDS
            )));
        }
        out.copy_from_slice(&self.energies_at(k)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    fn env_with(tae: f64, tce: f64, tbe: f64, tao: f64, tco: f64, tbo: f64) -> PhysicalEnvironment {
        PhysicalEnvironment::new(tae, tce, tbe, tao, tco, tbo, 0.05, 0.05, 1.0, 1.0, -2.0).unwrap()
    }

    fn reference_env() -> PhysicalEnvironment {
        env_with(0.2, 1.0, 0.4, 0.08, 0.4, 0.16)
    }

    #[test]
    fn test_energies_sorted() {
        let env = reference_env();
        let provider = BandEnergyProvider::new(&env);

        for i in 0..6 {
            for j in 0..6 {
                let k = [i as f64 / 6.0, j as f64 / 6.0 - 0.5, 0.3];
                let energies = provider.energies_at(&k).unwrap();
                assert_eq!(energies.len(), NUM_BANDS);
                for w in energies.windows(2) {
                    assert!(w[0] <= w[1], "not sorted at k = {:?}: {:?}", k, energies);
                }
            }
        }
    }

    #[test]
    fn test_zero_hopping_collapses_to_onsite() {
        let env = env_with(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let provider = BandEnergyProvider::new(&env);
        let energies = provider.energies_at(&[0.0, 0.0, 0.0]).unwrap();

        let ident = env.onsite();
        for e in energies {
            assert!((e - ident).abs() < 1e-10, "{} != {}", e, ident);
        }
    }

    #[test]
    fn test_axis_hopping_splits_into_pairs() {
        let env = env_with(0.3, 0.7, 0.0, 0.0, 0.0, 0.0);
        let provider = BandEnergyProvider::new(&env);
        let energies = provider.energies_at(&[0.0, 0.0, 0.0]).unwrap();

        // EpsAE(0) = -2 (2 Tae + Tce)
        let split: f64 = 2.0 * (2.0 * 0.3 + 0.7);
        let ident = env.onsite();
        let expected = [ident - split, ident - split, ident + split, ident + split];
        for (e, x) in energies.iter().zip(expected.iter()) {
            assert!((e - x).abs() < 1e-10, "{:?} != {:?}", energies, expected);
        }
    }

    #[test]
    fn test_trace_is_conserved() {
        // Tr H = 4 ident，与 k 无关
        let env = reference_env();
        let provider = BandEnergyProvider::new(&env);
        let energies = provider.energies_at(&[0.17, 0.42, -0.33]).unwrap();

        let sum: f64 = energies.iter().sum();
        assert!((sum - 4.0 * env.onsite()).abs() < 1e-9);
    }

    #[test]
    fn test_fill_checks_buffer_length() {
        let env = reference_env();
        let provider = BandEnergyProvider::new(&env);

        let mut short = [0.0; 3];
        assert!(provider.fill(&[0.0, 0.0, 0.0], &mut short).is_err());

        let mut buf = [0.0; NUM_BANDS];
        provider.fill(&[0.1, 0.2, 0.3], &mut buf).unwrap();
        assert_eq!(buf, provider.energies_at(&[0.1, 0.2, 0.3]).unwrap());
    }

    #[test]
    fn test_concurrent_calls_match_serial() {
        let env = reference_env();
        let provider = BandEnergyProvider::new(&env);
        let ks: Vec<Momentum> = (0..64)
            .map(|i| [(i % 4) as f64 / 4.0, ((i / 4) % 4) as f64 / 4.0, (i / 16) as f64 / 4.0])
            .collect();

        let serial: Vec<BandEnergies> = ks
            .iter()
            .map(|k| provider.energies_at(k).unwrap())
            .collect();
        let parallel: Vec<BandEnergies> = ks
            .par_iter()
            .map(|k| provider.energies_at(k).unwrap())
            .collect();

        assert_eq!(serial, parallel);
    }
}
