//! # 倒格子
//!
//! 简单立方直接格子的倒格矢矩阵，以及分数坐标与笛卡尔坐标的换算。
//!
//! ## 依赖关系
//! - 被 `dos/tetrahedra.rs`（选择最短主对角线）和 `physics/kpath.rs` 使用
//! - 无外部模块依赖

use crate::error::{Result, TetraDosError};

use std::f64::consts::PI;

/// k 矢量，分数坐标或按晶格常数缩放的笛卡尔坐标
pub type Momentum = [f64; 3];

/// 倒格矢矩阵，行向量为 b1, b2, b3
pub type ReciprocalMatrix = [[f64; 3]; 3];

/// 简单立方格子的倒格矢矩阵：对角元 2π/a
pub fn cubic_reciprocal(a: f64) -> Result<ReciprocalMatrix> {
    if !a.is_finite() || a <= 0.0 {
        return Err(TetraDosError::InvalidParameter {
            name: "lattice_constant".to_string(),
            reason: format!("must be finite and positive, got {}", a),
        });
    }

    let mut recip = [[0.0; 3]; 3];
    for (i, row) in recip.iter_mut().enumerate() {
        row[i] = 2.0 * PI / a;
    }
    Ok(recip)
}

/// 分数坐标转笛卡尔坐标: k = k1 b1 + k2 b2 + k3 b3
pub fn to_cartesian(k: &Momentum, recip: &ReciprocalMatrix) -> [f64; 3] {
    [
        k[0] * recip[0][0] + k[1] * recip[1][0] + k[2] * recip[2][0],
        k[0] * recip[0][1] + k[1] * recip[1][1] + k[2] * recip[2][1],
        k[0] * recip[0][2] + k[1] * recip[1][2] + k[2] * recip[2][2],
    ]
}

/// 向量长度
pub fn norm(v: &[f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}
