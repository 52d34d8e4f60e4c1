//! 加权有向无环图的文本描述格式。
//!
//! ```text
//! # 注释行（忽略）
//! V <label> [START|END]
//! E <label> <start-label> <end-label> <weight>
//! ```
//!
//! 顶点行的出现顺序就是遍历使用的拓扑序；边只能引用已经声明过的顶点。

use std::fmt::Display;
use std::io::Write;

use crate::error::{Error, Result};

/// 路径约束标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexTag {
    Start,
    End,
}

impl VertexTag {
    pub fn as_str(self) -> &'static str {
        match self {
            VertexTag::Start => "START",
            VertexTag::End => "END",
        }
    }
}

/// 解析后的一行记录，借用原始行文本
#[derive(Debug, Clone, PartialEq)]
pub enum GraphLine<'a> {
    Vertex {
        label: &'a str,
        tag: Option<VertexTag>,
    },
    Edge {
        label: &'a str,
        start: &'a str,
        end: &'a str,
        weight: f64,
    },
}

/// 解析一行。空行与 `#` 注释行返回 `Ok(None)`。
/// `line_no` 从 1 开始，仅用于错误信息。
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<GraphLine<'_>>> {
    let line = line.trim_end();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split_ascii_whitespace();
    let kind = fields.next().unwrap_or_default();
    let mut field = |name: &str| {
        fields
            .next()
            .ok_or_else(|| Error::malformed(line_no, format!("missing {name}")))
    };

    let record = match kind {
        "V" => {
            let label = field("vertex label")?;
            let tag = match field("tag") {
                Err(_) => None,
                Ok("START") => Some(VertexTag::Start),
                Ok("END") => Some(VertexTag::End),
                Ok(other) => {
                    return Err(Error::malformed(line_no, format!("unknown vertex tag '{other}'")));
                }
            };
            GraphLine::Vertex { label, tag }
        }
        "E" => {
            let label = field("edge label")?;
            let start = field("start vertex")?;
            let end = field("end vertex")?;
            let raw = field("edge weight")?;
            let weight: f64 = raw
                .parse()
                .map_err(|_| Error::malformed(line_no, format!("invalid edge weight '{raw}'")))?;
            if !weight.is_finite() {
                return Err(Error::malformed(line_no, format!("non-finite edge weight '{raw}'")));
            }
            GraphLine::Edge {
                label,
                start,
                end,
                weight,
            }
        }
        other => {
            return Err(Error::malformed(line_no, format!("unknown record type '{other}'")));
        }
    };

    if let Some(extra) = fields.next() {
        return Err(Error::malformed(line_no, format!("unexpected trailing field '{extra}'")));
    }
    Ok(Some(record))
}

/// 图描述写出器
pub struct GraphWriter<W: Write> {
    out: W,
}

impl<W: Write> GraphWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn comment(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "# {}", text)?;
        Ok(())
    }

    pub fn vertex(&mut self, label: impl Display, tag: Option<VertexTag>) -> Result<()> {
        match tag {
            Some(t) => writeln!(self.out, "V {} {}", label, t.as_str())?,
            None => writeln!(self.out, "V {}", label)?,
        }
        Ok(())
    }

    pub fn edge(
        &mut self,
        label: impl Display,
        start: impl Display,
        end: impl Display,
        weight: impl Display,
    ) -> Result<()> {
        writeln!(self.out, "E {} {} {} {}", label, start, end, weight)?;
        Ok(())
    }

    pub fn into_inner(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
