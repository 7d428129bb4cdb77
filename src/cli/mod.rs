//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `dos`: 四面体方法 DOS 计算（位置参数顺序沿用原命令行工具）
//! - `bands`: 高对称路径能带
//! - `plot`: 重新绘制已写出的 DOS 文件
//! - `sweep`: 从 CSV 读取多组参数批量计算 DOS
//!
//! 首个参数不是子命令时按 `dos` 解析，`tetra-dos OUT n num_dos Tae ... Mu`
//! 与 `tetra-dos dos OUT n num_dos Tae ... Mu` 等价。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: dos, bands, plot, sweep

pub mod bands;
pub mod dos;
pub mod plot;
pub mod sweep;

use crate::error::Result;
use crate::models::PhysicalEnvironment;

use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;

/// 子命令名以及 clap 内置的帮助、版本参数
const KNOWN_COMMANDS: [&str; 9] = [
    "dos", "bands", "plot", "sweep", "help", "-h", "--help", "-V", "--version",
];

/// 默认子命令
const DEFAULT_COMMAND: &str = "dos";

/// tetra-dos - VO2 四能带模型的四面体方法态密度
#[derive(Parser, Debug)]
#[command(name = "tetra-dos")]
#[command(author)]
#[command(version)]
#[command(about = "Tetrahedron-method density of states for a four-band VO2 tight-binding model", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// 解析进程参数，缺省子命令时补上 `dos`
    pub fn parse_with_default() -> Self {
        Self::parse_from(with_default_command(std::env::args_os()))
    }
}

/// 首个参数不是已知子命令时插入 `dos`
///
/// `args` 含程序名。没有任何参数时保持原样，由 clap 报告缺少子命令。
pub fn with_default_command<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let needs_default = args
        .get(1)
        .map(|first| {
            first
                .to_str()
                .map_or(true, |s| !KNOWN_COMMANDS.iter().any(|known| *known == s))
        })
        .unwrap_or(false);

    if needs_default {
        args.insert(1, OsString::from(DEFAULT_COMMAND));
    }
    args
}

/// 可用的子命令
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the density of states and write it as a tab-separated file
    Dos(dos::DosArgs),

    /// Compute band energies along the Γ-X-M-Γ-R-X-M-R path
    Bands(bands::BandsArgs),

    /// Re-render a DOS file as an image and report its gaps
    Plot(plot::PlotArgs),

    /// Compute one DOS file per parameter set listed in a CSV file
    Sweep(sweep::SweepArgs),
}

// ─────────────────────────────────────────────────────────────
// 模型参数（dos 与 bands 共用的位置参数）
// ─────────────────────────────────────────────────────────────

/// 四能带模型的 11 个物理参数
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Even-parity hopping along the a axis
    #[arg(value_name = "Tae", allow_negative_numbers = true)]
    pub tae: f64,

    /// Even-parity hopping along the c axis
    #[arg(value_name = "Tce", allow_negative_numbers = true)]
    pub tce: f64,

    /// Even-parity body-diagonal hopping
    #[arg(value_name = "Tbe", allow_negative_numbers = true)]
    pub tbe: f64,

    /// Odd-parity hopping along the a axis
    #[arg(value_name = "Tao", allow_negative_numbers = true)]
    pub tao: f64,

    /// Odd-parity hopping along the c axis
    #[arg(value_name = "Tco", allow_negative_numbers = true)]
    pub tco: f64,

    /// Odd-parity body-diagonal hopping
    #[arg(value_name = "Tbo", allow_negative_numbers = true)]
    pub tbo: f64,

    /// On-site energy of the rutile (R) phase
    #[arg(value_name = "EpsilonR", allow_negative_numbers = true)]
    pub epsilon_r: f64,

    /// On-site energy of the monoclinic (M) phase
    #[arg(value_name = "EpsilonM", allow_negative_numbers = true)]
    pub epsilon_m: f64,

    /// Order parameter <S>
    #[arg(value_name = "M", allow_negative_numbers = true)]
    pub m: f64,

    /// Order parameter <S^2>
    #[arg(value_name = "W", allow_negative_numbers = true)]
    pub w: f64,

    /// Chemical potential
    #[arg(value_name = "Mu", allow_negative_numbers = true)]
    pub mu: f64,
}

impl ModelArgs {
    /// 转换为校验后的参数环境
    pub fn environment(&self) -> Result<PhysicalEnvironment> {
        PhysicalEnvironment::new(
            self.tae,
            self.tce,
            self.tbe,
            self.tao,
            self.tco,
            self.tbo,
            self.epsilon_r,
            self.epsilon_m,
            self.m,
            self.w,
            self.mu,
        )
    }
}
