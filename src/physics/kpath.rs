//! # 高对称路径能带
//!
//! 沿简单立方布里渊区的高对称路径 Γ-X-M-Γ-R-X-M-R 计算能带。
//!
//! ## 依赖关系
//! - 被 `commands/bands.rs` 调用
//! - 使用 `physics/bands.rs` 的 BandEnergyProvider
//! - 使用 `models/lattice.rs` 计算路径长度

use crate::error::{Result, TetraDosError};
use crate::models::lattice::{norm, to_cartesian};
use crate::models::{Momentum, PhysicalEnvironment, ReciprocalMatrix};
use crate::physics::{BandEnergies, BandEnergyProvider};

use rayon::prelude::*;

/// 高对称点（倒格子分数坐标）
pub const GAMMA: Momentum = [0.0, 0.0, 0.0];
pub const X: Momentum = [0.0, 0.5, 0.0];
pub const M: Momentum = [0.5, 0.5, 0.0];
pub const R: Momentum = [0.5, 0.5, 0.5];

/// 路径上的一个 k 点
#[derive(Debug, Clone)]
pub struct BandPoint {
    /// 分数坐标
    pub k: Momentum,
    /// 沿路径的累计笛卡尔距离
    pub distance: f64,
    /// 能带能量（升序）
    pub energies: BandEnergies,
}

/// 沿高对称路径的能带
#[derive(Debug, Clone)]
pub struct BandPath {
    /// 高对称点标签及其路径距离
    pub labels: Vec<(String, f64)>,
    /// 路径上的所有 k 点
    pub points: Vec<BandPoint>,
}

/// 简单立方布里渊区的标准路径
pub fn sc_kpath() -> Vec<(&'static str, Momentum)> {
    vec![
        ("Γ", GAMMA),
        ("X", X),
        ("M", M),
        ("Γ", GAMMA),
        ("R", R),
        ("X", X),
        ("M", M),
        ("R", R),
    ]
}

/// 在相邻高对称点之间线性插值
///
/// 每段包含 `points_per_panel` 个点；除第一段外不重复段起点。
pub fn interpolate_kpoints(
    kpath: &[(&str, Momentum)],
    points_per_panel: usize,
) -> Result<Vec<Momentum>> {
    if points_per_panel < 2 {
        return Err(TetraDosError::InvalidArgument(format!(
            "points per panel must be at least 2, got {}",
            points_per_panel
        )));
    }

    let mut interpolated = Vec::new();
    for (panel, pair) in kpath.windows(2).enumerate() {
        let start = pair[0].1;
        let stop = pair[1].1;
        let denom = (points_per_panel - 1) as f64;

        let first = if panel == 0 { 0 } else { 1 };
        for j in first..points_per_panel {
            let t = j as f64 / denom;
            interpolated.push([
                start[0] + t * (stop[0] - start[0]),
                start[1] + t * (stop[1] - start[1]),
                start[2] + t * (stop[2] - start[2]),
            ]);
        }
    }

    Ok(interpolated)
}

/// 沿标准路径计算能带
pub fn band_structure(
    env: &PhysicalEnvironment,
    recip: &ReciprocalMatrix,
    points_per_panel: usize,
) -> Result<BandPath> {
    let kpath = sc_kpath();
    let kpoints = interpolate_kpoints(&kpath, points_per_panel)?;

    let provider = BandEnergyProvider::new(env);
    let energies: Vec<BandEnergies> = kpoints
        .par_iter()
        .map(|k| provider.energies_at(k))
        .collect::<Result<_>>()?;

    let distances = cumulative_distances(&kpoints, recip);

    let labels = kpath
        .iter()
        .enumerate()
        .map(|(panel, (name, _))| {
            let index = panel * (points_per_panel - 1);
            (name.to_string(), distances[index])
        })
        .collect();

    let points = kpoints
        .into_iter()
        .zip(distances)
        .zip(energies)
        .map(|((k, distance), energies)| BandPoint {
            k,
            distance,
            energies,
        })
        .collect();

    Ok(BandPath { labels, points })
}

/// 累计路径长度
fn cumulative_distances(kpoints: &[Momentum], recip: &ReciprocalMatrix) -> Vec<f64> {
    let mut distances = Vec::with_capacity(kpoints.len());
    let mut total = 0.0;
    for (i, k) in kpoints.iter().enumerate() {
        if i > 0 {
            let prev = &kpoints[i - 1];
            let delta = [k[0] - prev[0], k[1] - prev[1], k[2] - prev[2]];
            total += norm(&to_cartesian(&delta, recip));
        }
        distances.push(total);
    }
    distances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cubic_reciprocal;
    use std::f64::consts::PI;

    #[test]
    fn test_interpolate_no_duplicates() {
        let kpath = sc_kpath();
        let points = interpolate_kpoints(&kpath, 3).unwrap();

        // 1 + 7 * (3 - 1)
        assert_eq!(points.len(), 15);
        assert_eq!(points[0], GAMMA);
        assert_eq!(points[1], [0.0, 0.25, 0.0]);
        assert_eq!(points[2], X);
        assert_eq!(*points.last().unwrap(), R);

        for w in points.windows(2) {
            assert_ne!(w[0], w[1]);
        }
    }

    #[test]
    fn test_interpolate_rejects_single_point() {
        assert!(interpolate_kpoints(&sc_kpath(), 1).is_err());
    }

    #[test]
    fn test_band_structure_labels() {
        let env = PhysicalEnvironment::new(0.2, 1.0, 0.4, 0.08, 0.4, 0.16, 0.05, 0.05, 1.0, 1.0, -2.0)
            .unwrap();
        let recip = cubic_reciprocal(1.0).unwrap();
        let path = band_structure(&env, &recip, 5).unwrap();

        assert_eq!(path.points.len(), 29);
        assert_eq!(path.labels.len(), 8);
        assert_eq!(path.labels[0].0, "Γ");
        assert!(path.labels[0].1.abs() < 1e-12);

        // Γ-X 长度为 π
        assert!((path.labels[1].1 - PI).abs() < 1e-10);

        let total = path.points.last().unwrap().distance;
        assert!((path.labels[7].1 - total).abs() < 1e-12);

        for point in &path.points {
            for w in point.energies.windows(2) {
                assert!(w[0] <= w[1]);
            }
        }
    }
}
