//! 加权有向无环图（WDAG）。
//!
//! 顶点与边分别存放在两个 arena 中，相互之间用下标引用：
//! - 边持有起止顶点的 [`VertexId`]
//! - 顶点持有最优入边的 [`EdgeId`]（仅用于回溯路径）
//!
//! 顶点在 arena 中的位置就是描述文件里的声明顺序，也是最高权路径
//! 动态规划所使用的拓扑序。加载时会校验每条边都从较早的顶点指向较晚的顶点。

pub mod path;

use std::collections::{BTreeMap, HashMap};
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::io::graph_file::{parse_line, GraphLine, VertexTag};

pub type VertexId = usize;
pub type EdgeId = usize;

#[derive(Debug, Clone)]
pub struct Vertex {
    pub label: String,
    /// 以该顶点结尾的最优路径得分；`None` 表示尚无合法路径到达
    pub weight: Option<f64>,
    pub best_incoming: Option<EdgeId>,
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub label: String,
    pub weight: f64,
    pub start: VertexId,
    pub end: VertexId,
}

#[derive(Debug, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    by_label: HashMap<String, VertexId>,
    /// 每个顶点的关联边（入边与出边混存）
    incident: Vec<Vec<EdgeId>>,
    start: Option<VertexId>,
    end: Option<VertexId>,
    /// 每种边标签第一次出现时的权重
    label_weights: BTreeMap<String, f64>,
    /// 每种边标签出现的次数
    label_counts: BTreeMap<String, usize>,
    /// 最近一次遍历得到的最优终点
    best: Option<VertexId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从图描述文本加载。任何结构错误都会中止加载。
    pub fn load<R: BufRead>(reader: R) -> Result<Self> {
        let mut g = Self::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            match parse_line(&line, line_no)? {
                Some(GraphLine::Vertex { label, tag }) => g.add_vertex(label, tag, line_no)?,
                Some(GraphLine::Edge {
                    label,
                    start,
                    end,
                    weight,
                }) => {
                    let s = g.resolve(start, line_no)?;
                    let e = g.resolve(end, line_no)?;
                    if s >= e {
                        return Err(Error::malformed(
                            line_no,
                            format!("edge {start} -> {end} does not follow vertex order"),
                        ));
                    }
                    g.add_edge(label, s, e, weight);
                }
                None => {}
            }
        }
        log::debug!(
            "graph loaded: {} vertices, {} edges, {} edge labels",
            g.vertices.len(),
            g.edges.len(),
            g.label_counts.len()
        );
        Ok(g)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let fh = std::fs::File::open(path)?;
        Self::load(std::io::BufReader::new(fh))
    }

    fn add_vertex(&mut self, label: &str, tag: Option<VertexTag>, line_no: usize) -> Result<()> {
        let id = self.vertices.len();
        if self.by_label.contains_key(label) {
            return Err(Error::malformed(line_no, format!("duplicate vertex '{label}'")));
        }
        match tag {
            Some(VertexTag::Start) if self.start.is_some() => {
                return Err(Error::malformed(line_no, "more than one START vertex"));
            }
            Some(VertexTag::End) if self.end.is_some() => {
                return Err(Error::malformed(line_no, "more than one END vertex"));
            }
            Some(VertexTag::Start) => self.start = Some(id),
            Some(VertexTag::End) => self.end = Some(id),
            None => {}
        }
        self.vertices.push(Vertex {
            label: label.to_string(),
            weight: None,
            best_incoming: None,
        });
        self.by_label.insert(label.to_string(), id);
        self.incident.push(Vec::new());
        Ok(())
    }

    fn add_edge(&mut self, label: &str, start: VertexId, end: VertexId, weight: f64) {
        let id = self.edges.len();
        self.edges.push(Edge {
            label: label.to_string(),
            weight,
            start,
            end,
        });
        self.incident[start].push(id);
        self.incident[end].push(id);

        self.label_weights.entry(label.to_string()).or_insert(weight);
        *self.label_counts.entry(label.to_string()).or_insert(0) += 1;
    }

    fn resolve(&self, label: &str, line_no: usize) -> Result<VertexId> {
        self.by_label
            .get(label)
            .copied()
            .ok_or_else(|| Error::malformed(line_no, format!("edge references undeclared vertex '{label}'")))
    }

    /// 每条边的起点都排在终点之前
    pub fn is_topologically_ordered(&self) -> bool {
        self.edges.iter().all(|e| e.start < e.end)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id]
    }

    pub fn vertex_id(&self, label: &str) -> Option<VertexId> {
        self.by_label.get(label).copied()
    }

    pub fn incident_edges(&self, v: VertexId) -> &[EdgeId] {
        &self.incident[v]
    }

    /// 以 `v` 为终点的边
    pub fn incoming(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.incident[v].iter().copied().filter(move |&e| self.edges[e].end == v)
    }

    /// 以 `v` 为起点的边
    pub fn outgoing(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.incident[v].iter().copied().filter(move |&e| self.edges[e].start == v)
    }

    pub fn start_vertex(&self) -> Option<VertexId> {
        self.start
    }

    pub fn end_vertex(&self) -> Option<VertexId> {
        self.end
    }

    pub fn is_start_constrained(&self) -> bool {
        self.start.is_some()
    }

    pub fn is_end_constrained(&self) -> bool {
        self.end.is_some()
    }

    /// 每种边标签首次出现时的权重，按标签排序
    pub fn edge_weights(&self) -> &BTreeMap<String, f64> {
        &self.label_weights
    }

    /// 每种边标签的出现次数，按标签排序
    pub fn edge_frequencies(&self) -> &BTreeMap<String, usize> {
        &self.label_counts
    }
}

impl FromStr for Graph {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::load(s.as_bytes())
    }
}
