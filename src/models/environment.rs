//! # 物理参数环境
//!
//! 四能带紧束缚模型的全部物理参数：跳跃积分、序参量、在位能和化学势。
//! 构造后只读，在所有 k 点计算之间共享。
//!
//! ## 依赖关系
//! - 被 `physics/`, `dos/`, `commands/` 使用
//! - 使用 `serde` 支持 sweep CSV 的逐行读取

use crate::error::{Result, TetraDosError};

use serde::{Deserialize, Serialize};

/// 物理参数环境
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalEnvironment {
    /// 偶对称跳跃积分：立方轴 a 方向
    #[serde(rename = "Tae")]
    pub tae: f64,
    /// 偶对称跳跃积分：立方轴 c 方向
    #[serde(rename = "Tce")]
    pub tce: f64,
    /// 偶对称跳跃积分：体对角线
    #[serde(rename = "Tbe")]
    pub tbe: f64,

    /// 奇对称跳跃积分：立方轴 a 方向
    #[serde(rename = "Tao")]
    pub tao: f64,
    /// 奇对称跳跃积分：立方轴 c 方向
    #[serde(rename = "Tco")]
    pub tco: f64,
    /// 奇对称跳跃积分：体对角线
    #[serde(rename = "Tbo")]
    pub tbo: f64,

    /// R 相在位能
    #[serde(rename = "EpsilonR")]
    pub epsilon_r: f64,
    /// M 相在位能
    #[serde(rename = "EpsilonM")]
    pub epsilon_m: f64,

    /// 序参量 <S>
    #[serde(rename = "M")]
    pub m: f64,
    /// 序参量 <S^2>
    #[serde(rename = "W")]
    pub w: f64,
    /// 化学势
    #[serde(rename = "Mu")]
    pub mu: f64,
}

impl PhysicalEnvironment {
    /// 创建并校验参数环境
    ///
    /// 参数顺序与命令行位置参数一致：
    /// `Tae Tce Tbe Tao Tco Tbo EpsilonR EpsilonM M W Mu`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tae: f64,
        tce: f64,
        tbe: f64,
        tao: f64,
        tco: f64,
        tbo: f64,
        epsilon_r: f64,
        epsilon_m: f64,
        m: f64,
        w: f64,
        mu: f64,
    ) -> Result<Self> {
        let env = PhysicalEnvironment {
            tae,
            tce,
            tbe,
            tao,
            tco,
            tbo,
            epsilon_r,
            epsilon_m,
            m,
            w,
            mu,
        };
        env.validate()?;
        Ok(env)
    }

    /// 校验所有参数均为有限值
    ///
    /// 不检查物理取值范围：非物理的序参量同样给出数值上良定义的结果。
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.named_values() {
            if !value.is_finite() {
                return Err(TetraDosError::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("must be a finite number, got {}", value),
                });
            }
        }
        Ok(())
    }

    /// 在位项 (1 - W) EpsilonR + W EpsilonM - Mu
    pub fn onsite(&self) -> f64 {
        (1.0 - self.w) * self.epsilon_r + self.w * self.epsilon_m - self.mu
    }

    /// 参数名与取值列表（用于校验和终端表格）
    pub fn named_values(&self) -> [(&'static str, f64); 11] {
        [
            ("Tae", self.tae),
            ("Tce", self.tce),
            ("Tbe", self.tbe),
            ("Tao", self.tao),
            ("Tco", self.tco),
            ("Tbo", self.tbo),
            ("EpsilonR", self.epsilon_r),
            ("EpsilonM", self.epsilon_m),
            ("M", self.m),
            ("W", self.w),
            ("Mu", self.mu),
        ]
    }
}
