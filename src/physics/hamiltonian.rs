//! # 电子哈密顿量
//!
//! 构造四能带模型在 k 点的 4x4 厄米哈密顿量 H(k)。
//!
//! ## 基矢
//! 子格与宇称组合 {A+, A-, B+, B-}。
//!
//! ## 算法概述
//! 1. 计算结构因子 EpsAE, EpsBE, EpsAO, EpsBO（k 的函数）
//! 2. 计算 EpsBE(k + Q)，Q = (π, π, π) 为反铁磁序矢量
//! 3. 计算体对角线跳跃相位 e^{±iφ}，φ = (kx + ky + kz) / 2
//! 4. 直接填写下三角，上三角由 H(i,j) = conj(H(j,i)) 得到
//!
//! ## 依赖关系
//! - 被 `physics/bands.rs` 调用
//! - 使用 `models/environment.rs` 的 PhysicalEnvironment
//! - 使用 `nalgebra` 矩阵和 `num-complex` 复数

use crate::models::{Momentum, PhysicalEnvironment};
use crate::physics::NUM_BANDS;

use nalgebra::Matrix4;
use num_complex::Complex64;
use std::f64::consts::PI;

/// 4x4 复厄米哈密顿量
pub type Hamiltonian = Matrix4<Complex64>;

/// 反铁磁序矢量 Q = (π, π, π)
const Q: Momentum = [PI, PI, PI];

/// 倒格子基矢下的 H(k)
///
/// k = (k1, k2, k3) 对应笛卡尔表示 k1 b1 + k2 b2 + k3 b3。
pub fn el_hamiltonian_recip(env: &PhysicalEnvironment, k: &Momentum) -> Hamiltonian {
    let scaled = [2.0 * PI * k[0], 2.0 * PI * k[1], 2.0 * PI * k[2]];
    el_hamiltonian(env, &scaled)
}

/// 按晶格常数缩放的笛卡尔坐标下的 H(k)
///
/// k = (a kx, a ky, c kz)，每个分量以 [-π, π) 为周期。
pub fn el_hamiltonian(env: &PhysicalEnvironment, k: &Momentum) -> Hamiltonian {
    let eps_ae = epsilon_ae(env, k);
    let eps_be = epsilon_be(env, k);
    let eps_ao = epsilon_ao(env, k);
    let eps_bo = epsilon_bo(env, k);

    let kq = [k[0] + Q[0], k[1] + Q[1], k[2] + Q[2]];
    let eps_be_kq = epsilon_be(env, &kq);

    let eikd = Complex64::from_polar(1.0, (k[0] + k[1] + k[2]) / 2.0);
    let emikd = eikd.conj();

    let ident = Complex64::new(env.onsite(), 0.0);
    let i = Complex64::i();

    let mut h = Hamiltonian::zeros();

    h[(0, 0)] = eps_ae + ident;

    h[(1, 0)] = eps_ao * 2.0;
    h[(1, 1)] = -eps_ae + ident;

    h[(2, 0)] = eps_be * emikd;
    h[(2, 1)] = eps_bo.conj() * emikd;
    h[(2, 2)] = eps_ae + ident;

    h[(3, 0)] = -eps_bo.conj() * emikd;
    h[(3, 1)] = i * eps_be_kq * emikd;
    h[(3, 2)] = eps_ao * 2.0;
    h[(3, 3)] = -eps_ae + ident;

    for row in 0..NUM_BANDS {
        for col in (row + 1)..NUM_BANDS {
            h[(row, col)] = h[(col, row)].conj();
        }
    }

    h
}

/// 立方轴，偶对称 (k, p; k, p)
pub fn epsilon_ae(env: &PhysicalEnvironment, k: &Momentum) -> Complex64 {
    let rp = -2.0 * (env.tae * (k[0].cos() + k[1].cos()) + env.tce * k[2].cos());
    Complex64::new(rp, 0.0)
}

/// 体对角线，偶对称 (k, p; k, pbar)
pub fn epsilon_be(env: &PhysicalEnvironment, k: &Momentum) -> Complex64 {
    let rp = -8.0 * env.tbe * half_cos_product(k);
    Complex64::new(rp, 0.0)
}

/// 立方轴，奇对称 (k, p; k+Q, p)
pub fn epsilon_ao(env: &PhysicalEnvironment, k: &Momentum) -> Complex64 {
    let ip = -2.0 * env.m * (env.tao * (k[0].sin() + k[1].sin()) + env.tco * k[2].sin());
    Complex64::new(0.0, ip)
}

/// 体对角线，奇对称 (k, p; k+Q, pbar)
pub fn epsilon_bo(env: &PhysicalEnvironment, k: &Momentum) -> Complex64 {
    let rp = -8.0 * env.m * env.tbo * half_cos_product(k);
    let ip = 8.0 * env.m * env.tbo * half_sin_product(k);
    Complex64::new(rp, ip)
}

fn half_cos_product(k: &Momentum) -> f64 {
    (k[0] / 2.0).cos() * (k[1] / 2.0).cos() * (k[2] / 2.0).cos()
}

fn half_sin_product(k: &Momentum) -> f64 {
    (k[0] / 2.0).sin() * (k[1] / 2.0).sin() * (k[2] / 2.0).sin()
}
