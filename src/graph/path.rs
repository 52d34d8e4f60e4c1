//! 最高权路径：按顶点声明顺序（拓扑序）单遍动态规划，再沿最优入边回溯。

use super::{EdgeId, Graph, VertexId};

/// 一次遍历得到的最高权路径
#[derive(Debug, Clone, PartialEq)]
pub struct HighestWeightPath {
    pub score: f64,
    pub start: VertexId,
    pub end: VertexId,
    /// 从起点到终点依次经过的边
    pub edges: Vec<EdgeId>,
}

impl Graph {
    /// 计算最高权路径，返回最优终点。
    ///
    /// - 无起点约束时，每个顶点都可以作为平凡路径（权重 0）的起点；
    ///   有起点约束时，起点之前的顶点全部跳过，只有起点本身取 0。
    /// - 入边的前驱尚未到达时跳过该边。
    /// - 有终点约束时，扫描到终点即停止，结果只能是终点（若其可达）。
    /// - 无终点约束时，取权重严格最大的、已到达的顶点；并列时取较早者。
    ///
    /// 每次调用前都会清空上一次遍历的状态，因此重复调用结果一致。
    pub fn find_highest_weight_path(&mut self) -> Option<VertexId> {
        self.reset_traversal();
        log::debug!(
            "highest weight path over {} vertices (start constrained: {}, end constrained: {})",
            self.vertices.len(),
            self.is_start_constrained(),
            self.is_end_constrained()
        );

        let mut start_found = false;
        let mut best: Option<VertexId> = None;

        for v in 0..self.vertices.len() {
            match self.start {
                Some(s) if !start_found => {
                    if v != s {
                        continue;
                    }
                    start_found = true;
                    self.vertices[v].weight = Some(0.0);
                }
                Some(_) => {}
                None => self.vertices[v].weight = Some(0.0),
            }

            for &e in &self.incident[v] {
                let edge = &self.edges[e];
                if edge.end != v {
                    continue;
                }
                let Some(from) = self.vertices[edge.start].weight else {
                    continue;
                };
                let candidate = from + edge.weight;
                let here = &mut self.vertices[v];
                if here.weight.map_or(true, |w| candidate > w) {
                    here.weight = Some(candidate);
                    here.best_incoming = Some(e);
                }
            }

            if let Some(end) = self.end {
                if v == end {
                    best = self.vertices[v].weight.map(|_| v);
                    break;
                }
                continue;
            }

            if let Some(w) = self.vertices[v].weight {
                let better = match best {
                    None => true,
                    Some(b) => self.vertices[b].weight.map_or(true, |bw| w > bw),
                };
                if better {
                    best = Some(v);
                }
            }
        }

        if best.is_none() && !self.vertices.is_empty() {
            log::debug!("no vertex qualifies as path end");
        }
        self.best = best;
        best
    }

    fn reset_traversal(&mut self) {
        for v in &mut self.vertices {
            v.weight = None;
            v.best_incoming = None;
        }
        self.best = None;
    }

    /// 最近一次遍历得到的最优终点
    pub fn best_vertex(&self) -> Option<VertexId> {
        self.best
    }

    pub fn best_score(&self) -> Option<f64> {
        self.best.and_then(|v| self.vertices[v].weight)
    }

    /// 沿最优入边回溯到没有入边记录的顶点，即路径起点
    pub fn path_start(&self) -> Option<VertexId> {
        let mut v = self.best?;
        while let Some(e) = self.vertices[v].best_incoming {
            v = self.edges[e].start;
        }
        Some(v)
    }

    /// 最优路径上的边，按起点到终点排列
    pub fn path_edges(&self) -> Vec<EdgeId> {
        let mut out = Vec::new();
        let mut cur = self.best;
        while let Some(v) = cur {
            match self.vertices[v].best_incoming {
                Some(e) => {
                    out.push(e);
                    cur = Some(self.edges[e].start);
                }
                None => cur = None,
            }
        }
        out.reverse();
        out
    }

    pub fn path_labels(&self) -> Vec<&str> {
        self.path_edges()
            .into_iter()
            .map(|e| self.edges[e].label.as_str())
            .collect()
    }

    pub fn best_path(&self) -> Option<HighestWeightPath> {
        let end = self.best?;
        Some(HighestWeightPath {
            score: self.vertices[end].weight?,
            start: self.path_start()?,
            end,
            edges: self.path_edges(),
        })
    }
}
