//! # wdag-align
//!
//! 以加权有向无环图（编辑图）上的最高权路径求三条蛋白序列的多序列比对。
//!
//! 流程：
//!
//! - **打分**：BLOSUM62 替换得分、固定 gap 罚分、三元 sum-of-pairs
//! - **构图**：由三条序列枚举完整编辑图，写出文本图描述
//! - **求解**：加载图描述，按拓扑序动态规划求最高权路径并回溯
//!
//! ## 快速示例
//!
//! ```rust,no_run
//! use wdag_align::align::{align_sequences, AlignOpt, PathOutcome};
//!
//! let report = align_sequences([b"HEAGAWGHEE", b"PAWHEAE", b"WHEAE"], AlignOpt::default()).unwrap();
//! if let PathOutcome::Found { score, path, .. } = &report.outcome {
//!     println!("score {} over {} columns", score, path.len());
//! }
//! ```
//!
//! ## 模块说明
//!
//! - [`util`] — BLOSUM62 打分矩阵
//! - [`io`] — FASTA 读取、图描述格式的读写
//! - [`graph`] — WDAG 的内存表示与最高权路径
//! - [`align`] — 编辑图构建、结果报告与完整流程

pub mod error;
pub mod io;
pub mod util;
pub mod graph;
pub mod align;

pub use error::{Error, Result};
