//! # 态密度计算模块
//!
//! 四面体方法 DOS 积分、能隙检测、数据导出与绘图。
//!
//! ## 子模块
//! - `tetrahedra`: 布里渊区网格与四面体剖分
//! - `engine`: DOS 积分引擎
//! - `gaps`: 能隙检测
//! - `export`: DOS 文件与能带 CSV 读写
//! - `plot`: 图表生成
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `batch/` 使用
//! - 使用 `physics/` 的能带回调

pub mod engine;
pub mod export;
pub mod gaps;
pub mod plot;
pub mod tetrahedra;

pub use engine::{dos_values, DosSamples};
pub use gaps::{find_gaps, Gap};
