//! # 四面体剖分
//!
//! 布里渊区 n×n×n 子网格及其四面体剖分，和单个四面体的线性插值 DOS。
//!
//! ## 算法概述
//! 1. 子网格点 k = (i/n, j/n, l/n)，周期性回绕
//! 2. 每个子立方体沿最短主对角线剖分为 6 个四面体
//! 3. 四面体内能量线性插值，DOS 为分段二次函数
//!
//! ## 参考
//! - P. E. Blöchl, O. Jepsen, O. K. Andersen, Phys. Rev. B 49, 16223 (1994)
//!
//! ## 依赖关系
//! - 被 `dos/engine.rs` 调用
//! - 使用 `models/lattice.rs` 计算对角线长度

use crate::error::{Result, TetraDosError};
use crate::models::lattice::{norm, to_cartesian};
use crate::models::{Momentum, ReciprocalMatrix};

/// 以 0-7 对角线为公共边的 6 个四面体（顶点编号 c = ix + 2 iy + 4 iz）
const BASE_TETRAHEDRA: [[usize; 4]; 6] = [
    [0, 1, 3, 7],
    [0, 1, 5, 7],
    [0, 2, 3, 7],
    [0, 2, 6, 7],
    [0, 4, 5, 7],
    [0, 4, 6, 7],
];

/// 子立方体顶点偏移
fn corner_offset(corner: usize) -> [usize; 3] {
    [corner & 1, (corner >> 1) & 1, (corner >> 2) & 1]
}

/// 选择最短主对角线的起点顶点（0..4），其终点为 `start ^ 7`
///
/// 长度相同时取编号最小者。
pub fn shortest_diagonal_start(recip: &ReciprocalMatrix) -> usize {
    let mut best = 0;
    let mut best_len = f64::INFINITY;

    for start in 0..4 {
        let from = corner_offset(start);
        let to = corner_offset(start ^ 7);
        let delta = [
            to[0] as f64 - from[0] as f64,
            to[1] as f64 - from[1] as f64,
            to[2] as f64 - from[2] as f64,
        ];
        let len = norm(&to_cartesian(&delta, recip));
        if len < best_len - 1e-12 {
            best = start;
            best_len = len;
        }
    }

    best
}

/// 子立方体内的 6 个四面体（顶点编号）
///
/// 以 `start` 异或变换基本剖分，相当于沿相应坐标轴镜像。
pub fn cell_tetrahedra(recip: &ReciprocalMatrix) -> [[usize; 4]; 6] {
    let start = shortest_diagonal_start(recip);
    let mut tetras = BASE_TETRAHEDRA;
    for tetra in tetras.iter_mut() {
        for corner in tetra.iter_mut() {
            *corner ^= start;
        }
    }
    tetras
}

/// 布里渊区子网格
#[derive(Debug, Clone, Copy)]
pub struct Mesh {
    /// 每个方向的网格点数
    n: usize,
}

impl Mesh {
    /// 创建 n×n×n 网格
    ///
    /// 要求 n ≥ 1 且四面体总数 6n³ 不超出 `usize`，之后的下标运算不会溢出。
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(TetraDosError::InvalidArgument(
                "BZ grid resolution n must be at least 1".to_string(),
            ));
        }
        n.checked_mul(n)
            .and_then(|n2| n2.checked_mul(n))
            .and_then(|n3| n3.checked_mul(6))
            .ok_or_else(|| {
                TetraDosError::InvalidArgument(format!("BZ grid resolution n = {} is too large", n))
            })?;
        Ok(Self { n })
    }

    /// 网格点总数 n³
    pub fn num_points(&self) -> usize {
        self.n * self.n * self.n
    }

    /// 四面体总数 6n³
    pub fn num_tetrahedra(&self) -> usize {
        6 * self.num_points()
    }

    /// 每个四面体占布里渊区的体积分数
    pub fn tetra_weight(&self) -> f64 {
        1.0 / self.num_tetrahedra() as f64
    }

    /// 网格坐标 → 线性下标（周期性回绕）
    pub fn index(&self, i: usize, j: usize, l: usize) -> usize {
        let n = self.n;
        ((i % n) * n + (j % n)) * n + (l % n)
    }

    /// 线性下标 → 分数坐标 k
    pub fn point(&self, index: usize) -> Momentum {
        let n = self.n;
        let i = index / (n * n);
        let j = (index / n) % n;
        let l = index % n;
        [i as f64 / n as f64, j as f64 / n as f64, l as f64 / n as f64]
    }

    /// 全部四面体，元素为网格点线性下标
    pub fn tetrahedra(&self, recip: &ReciprocalMatrix) -> Vec<[usize; 4]> {
        let cell = cell_tetrahedra(recip);
        let n = self.n;
        let mut all = Vec::with_capacity(self.num_tetrahedra());

        for i in 0..n {
            for j in 0..n {
                for l in 0..n {
                    for tetra in &cell {
                        let mut vertices = [0; 4];
                        for (v, &corner) in vertices.iter_mut().zip(tetra) {
                            let off = corner_offset(corner);
                            *v = self.index(i + off[0], j + off[1], l + off[2]);
                        }
                        all.push(vertices);
                    }
                }
            }
        }

        all
    }
}

/// 单个四面体的 DOS（归一化到积分为 1）
///
/// `corners` 为升序排列的顶点能量 E1 <= E2 <= E3 <= E4。
pub fn tetra_dos(e: f64, corners: &[f64; 4]) -> f64 {
    let [e1, e2, e3, e4] = *corners;

    let value = if e1 <= e && e < e2 {
        3.0 * (e - e1).powi(2) / ((e2 - e1) * (e3 - e1) * (e4 - e1))
    } else if e2 <= e && e < e3 {
        let x = e - e2;
        let e21 = e2 - e1;
        let e31 = e3 - e1;
        let e41 = e4 - e1;
        let e32 = e3 - e2;
        let e42 = e4 - e2;
        (3.0 * e21 + 6.0 * x - 3.0 * (e31 + e42) * x * x / (e32 * e42)) / (e31 * e41)
    } else if e3 <= e && e < e4 {
        3.0 * (e4 - e).powi(2) / ((e4 - e1) * (e4 - e2) * (e4 - e3))
    } else {
        0.0
    };

    // 舍入误差可能产生极小的负值
    value.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cubic_reciprocal;

    fn tetra_volume(tetra: &[usize; 4]) -> f64 {
        let p: Vec<[f64; 3]> = tetra
            .iter()
            .map(|&c| {
                let o = corner_offset(c);
                [o[0] as f64, o[1] as f64, o[2] as f64]
            })
            .collect();
        let a = [p[1][0] - p[0][0], p[1][1] - p[0][1], p[1][2] - p[0][2]];
        let b = [p[2][0] - p[0][0], p[2][1] - p[0][1], p[2][2] - p[0][2]];
        let c = [p[3][0] - p[0][0], p[3][1] - p[0][1], p[3][2] - p[0][2]];
        let det = a[0] * (b[1] * c[2] - b[2] * c[1]) - a[1] * (b[0] * c[2] - b[2] * c[0])
            + a[2] * (b[0] * c[1] - b[1] * c[0]);
        det.abs() / 6.0
    }

    #[test]
    fn test_cell_tetrahedra_fill_cube() {
        let recip = cubic_reciprocal(1.0).unwrap();
        let tetras = cell_tetrahedra(&recip);

        let total: f64 = tetras.iter().map(tetra_volume).sum();
        assert!((total - 1.0).abs() < 1e-12);

        for tetra in &tetras {
            assert!((tetra_volume(tetra) - 1.0 / 6.0).abs() < 1e-12);
            assert!(tetra.contains(&0) && tetra.contains(&7));
        }
    }

    #[test]
    fn test_shortest_diagonal_skewed_lattice() {
        // b1 与 b2 夹角较小时，2-5 对角线 (b1 - b2 + b3) 最短
        let recip = [[1.0, 0.0, 0.0], [0.9, 0.3, 0.0], [0.0, 0.1, 1.0]];
        let start = shortest_diagonal_start(&recip);
        assert_eq!(start, 2);

        for tetra in cell_tetrahedra(&recip) {
            assert!(tetra.contains(&2) && tetra.contains(&5));
        }
    }

    #[test]
    fn test_mesh_index_wraps() {
        let mesh = Mesh::new(4).unwrap();
        assert_eq!(mesh.num_points(), 64);
        assert_eq!(mesh.index(4, 0, 0), mesh.index(0, 0, 0));
        assert_eq!(mesh.index(1, 2, 3), 16 + 8 + 3);
        assert_eq!(mesh.point(mesh.index(1, 2, 3)), [0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_mesh_rejects_zero_and_overflow() {
        assert!(matches!(Mesh::new(0), Err(TetraDosError::InvalidArgument(_))));
        assert!(matches!(
            Mesh::new(3_000_000),
            Err(TetraDosError::InvalidArgument(_))
        ));
        assert!(matches!(
            Mesh::new(usize::MAX / 2),
            Err(TetraDosError::InvalidArgument(_))
        ));
        assert_eq!(Mesh::new(100).unwrap().num_tetrahedra(), 6_000_000);
    }

    #[test]
    fn test_mesh_tetrahedra_count() {
        let recip = cubic_reciprocal(1.0).unwrap();
        let mesh = Mesh::new(3).unwrap();
        let tetras = mesh.tetrahedra(&recip);

        assert_eq!(tetras.len(), 6 * 27);
        assert!(tetras.iter().flatten().all(|&v| v < 27));
        assert!((mesh.tetra_weight() * tetras.len() as f64 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tetra_dos_normalized() {
        let corners = [-1.0, -0.2, 0.5, 2.0];
        let steps = 200_000;
        let (lo, hi) = (-1.5, 2.5);
        let h = (hi - lo) / steps as f64;

        let integral: f64 = (0..steps)
            .map(|i| tetra_dos(lo + (i as f64 + 0.5) * h, &corners) * h)
            .sum();
        assert!((integral - 1.0).abs() < 1e-6, "integral = {}", integral);
    }

    #[test]
    fn test_tetra_dos_continuous() {
        let corners = [-1.0, -0.2, 0.5, 2.0];
        let eps = 1e-9;
        for &e in &corners[1..3] {
            let below = tetra_dos(e - eps, &corners);
            let above = tetra_dos(e + eps, &corners);
            assert!((below - above).abs() < 1e-6);
        }
        assert_eq!(tetra_dos(-1.0, &corners), 0.0);
        assert_eq!(tetra_dos(2.0, &corners), 0.0);
        assert_eq!(tetra_dos(3.0, &corners), 0.0);
    }

    #[test]
    fn test_tetra_dos_degenerate_corners() {
        let flat = [0.3, 0.3, 0.3, 0.3];
        assert_eq!(tetra_dos(0.3, &flat), 0.0);

        let pair = [0.0, 0.0, 1.0, 1.0];
        for e in [0.0, 0.25, 0.5, 0.75] {
            let d = tetra_dos(e, &pair);
            assert!(d.is_finite() && d >= 0.0);
        }
    }
}
