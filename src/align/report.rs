use std::collections::BTreeMap;
use std::fmt;

use crate::graph::Graph;

/// 最高权路径的结果
#[derive(Debug, Clone, PartialEq)]
pub enum PathOutcome {
    Found {
        score: f64,
        start: String,
        end: String,
        /// 路径上的边标签（比对列），从起点到终点
        path: Vec<String>,
    },
    /// 图中没有满足约束的终点，不是错误
    NotFound,
}

/// 一次比对的完整报告：边标签统计与最高权路径
#[derive(Debug, Clone, PartialEq)]
pub struct PathReport {
    pub source: String,
    pub edge_weights: BTreeMap<String, f64>,
    pub edge_frequencies: BTreeMap<String, usize>,
    pub outcome: PathOutcome,
}

impl PathReport {
    /// 从已经完成遍历的图中提取结果
    pub fn from_graph(source: impl Into<String>, g: &Graph) -> Self {
        let outcome = match g.best_path() {
            Some(p) => PathOutcome::Found {
                score: p.score,
                start: g.vertex(p.start).label.clone(),
                end: g.vertex(p.end).label.clone(),
                path: p.edges.iter().map(|&e| g.edge(e).label.clone()).collect(),
            },
            None => PathOutcome::NotFound,
        };
        Self {
            source: source.into(),
            edge_weights: g.edge_weights().clone(),
            edge_frequencies: g.edge_frequencies().clone(),
            outcome,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self.outcome, PathOutcome::Found { .. })
    }

    pub fn score(&self) -> Option<f64> {
        match &self.outcome {
            PathOutcome::Found { score, .. } => Some(*score),
            PathOutcome::NotFound => None,
        }
    }

    /// 三行比对文本：路径上每列依次拼接成三条带 gap 的序列
    pub fn alignment_rows(&self) -> Option<[String; 3]> {
        let PathOutcome::Found { path, .. } = &self.outcome else {
            return None;
        };
        let mut rows: [String; 3] = Default::default();
        for column in path {
            if column.len() != 3 {
                return None;
            }
            for (row, ch) in rows.iter_mut().zip(column.chars()) {
                row.push(ch);
            }
        }
        Some(rows)
    }
}

fn join_table<V: fmt::Display>(table: &BTreeMap<String, V>) -> String {
    table
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(", ")
}

fn result_line(f: &mut fmt::Formatter<'_>, kind: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(f, "    <result type=\"{}\">{}</result>", kind, value)
}

impl fmt::Display for PathReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  <results file=\"{}\">", self.source)?;
        result_line(f, "edge_weights", join_table(&self.edge_weights))?;
        result_line(f, "edge_histogram", join_table(&self.edge_frequencies))?;
        match &self.outcome {
            PathOutcome::NotFound => result_line(f, "path", "No Path Found!")?,
            PathOutcome::Found {
                score,
                start,
                end,
                path,
            } => {
                result_line(f, "score", score)?;
                result_line(f, "beginning_vertex", start)?;
                result_line(f, "end_vertex", end)?;
                result_line(f, "path", path.join(" "))?;
                if let Some(rows) = self.alignment_rows() {
                    writeln!(f, "    <result type=\"alignment\">")?;
                    for row in &rows {
                        writeln!(f, "      {}", row)?;
                    }
                    writeln!(f, "    </result>")?;
                }
            }
        }
        writeln!(f, "  </results>")
    }
}
