//! 三序列编辑图的构建。
//!
//! 顶点 `(i,j,k)` 表示三条序列分别已消耗 i、j、k 个残基；边表示同时
//! 消耗每条序列 0 或 1 个残基，标签就是对应的比对列（未前进的序列用 gap）。
//! 顶点按 i、j、k 嵌套升序输出，这一顺序同时是拓扑序。

use std::fmt;
use std::io::Write;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::io::graph_file::{GraphWriter, VertexTag};
use crate::util::blosum62::{self, GAP};

/// 每条序列是否前进：单条 (1)(2)(3)，两两 (1,2)(2,3)(1,3)，三条一起
const MOVES: [[bool; 3]; 7] = [
    [true, false, false],
    [false, true, false],
    [false, false, true],
    [true, true, false],
    [false, true, true],
    [true, false, true],
    [true, true, true],
];

/// 顶点坐标，显示为 `i,j,k`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord(pub [usize; 3]);

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.0[0], self.0[1], self.0[2])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEdge {
    pub column: [u8; 3],
    pub from: Coord,
    pub to: Coord,
    pub weight: i32,
}

impl EditEdge {
    pub fn label(&self) -> String {
        self.column.iter().map(|&b| b as char).collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EditGraphOpt {
    /// 将 `0,0,0` 标记为 START、`n1,n2,n3` 标记为 END（全局比对）
    pub anchored: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditGraphSummary {
    pub vertices: usize,
    pub edges: usize,
}

/// 按嵌套升序（i 最外层，k 最内层）枚举全部顶点坐标
pub fn vertex_coords(lens: [usize; 3]) -> impl Iterator<Item = Coord> {
    (0..=lens[0]).flat_map(move |i| {
        (0..=lens[1]).flat_map(move |j| (0..=lens[2]).map(move |k| Coord([i, j, k])))
    })
}

/// 从顶点 `at` 出发的全部边。
///
/// - 三条序列都未耗尽：7 条边
/// - 恰有一条耗尽：只前进另外两条的 3 条边
/// - 两条及以上耗尽：没有出边
pub fn edges_from(seqs: [&[u8]; 3], at: Coord) -> Result<Vec<EditEdge>> {
    let pos = at.0;
    let open: [bool; 3] = std::array::from_fn(|d| pos[d] < seqs[d].len());
    let exhausted = open.iter().filter(|&&o| !o).count();
    if exhausted >= 2 {
        return Ok(Vec::new());
    }

    let mut out = Vec::with_capacity(if exhausted == 0 { 7 } else { 3 });
    for mv in MOVES {
        if (0..3).any(|d| mv[d] && !open[d]) {
            continue;
        }
        let column: [u8; 3] = std::array::from_fn(|d| if mv[d] { seqs[d][pos[d]] } else { GAP });
        let to: [usize; 3] = std::array::from_fn(|d| pos[d] + usize::from(mv[d]));
        let weight = blosum62::sum_of_pairs(column[0], column[1], column[2])?;
        out.push(EditEdge {
            column,
            from: at,
            to: Coord(to),
            weight,
        });
    }
    Ok(out)
}

fn slab_edges(seqs: [&[u8]; 3], i: usize) -> Result<Vec<EditEdge>> {
    let mut out = Vec::new();
    for j in 0..=seqs[1].len() {
        for k in 0..=seqs[2].len() {
            out.extend(edges_from(seqs, Coord([i, j, k]))?);
        }
    }
    Ok(out)
}

/// 构建全部边。每个 i 切片相互独立，在 rayon 线程池上并行计算后按 i 顺序拼接，
/// 结果与顺序枚举完全一致。
pub fn build_edges(seqs: [&[u8]; 3]) -> Result<Vec<EditEdge>> {
    let slabs: Vec<Vec<EditEdge>> = (0..=seqs[0].len())
        .into_par_iter()
        .map(|i| slab_edges(seqs, i))
        .collect::<Result<_>>()?;
    Ok(slabs.into_iter().flatten().collect())
}

/// 校验三条序列都只包含 BLOSUM62 字母表中的残基
pub fn validate_sequences(seqs: [&[u8]; 3]) -> Result<()> {
    for (n, seq) in seqs.iter().enumerate() {
        if let Some((position, symbol)) = blosum62::first_invalid(seq) {
            return Err(Error::InvalidResidue {
                sequence: n + 1,
                position,
                symbol: symbol as char,
            });
        }
    }
    Ok(())
}

/// 写出三序列编辑图：先全部顶点，再全部边
pub fn write_edit_graph<W: Write>(
    w: &mut GraphWriter<W>,
    seqs: [&[u8]; 3],
    opt: EditGraphOpt,
) -> Result<EditGraphSummary> {
    validate_sequences(seqs)?;
    let lens = [seqs[0].len(), seqs[1].len(), seqs[2].len()];
    let origin = Coord([0, 0, 0]);
    let corner = Coord(lens);

    let edges = build_edges(seqs)?;

    let mut vertices = 0usize;
    for c in vertex_coords(lens) {
        let tag = match opt.anchored {
            // 三条都为空时起点与终点重合，只保留 START
            true if c == origin => Some(VertexTag::Start),
            true if c == corner => Some(VertexTag::End),
            _ => None,
        };
        w.vertex(c, tag)?;
        vertices += 1;
    }
    for e in &edges {
        w.edge(e.label(), e.from, e.to, e.weight)?;
    }

    log::debug!(
        "edit graph {}x{}x{}: {} vertices, {} edges",
        lens[0],
        lens[1],
        lens[2],
        vertices,
        edges.len()
    );
    Ok(EditGraphSummary {
        vertices,
        edges: edges.len(),
    })
}
