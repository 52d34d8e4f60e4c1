pub mod edit_graph;
pub mod report;

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::graph::Graph;
use crate::io::fasta::{read_first_record, FastaRecord};
use crate::io::graph_file::GraphWriter;

pub use edit_graph::{EditGraphOpt, EditGraphSummary};
pub use report::{PathOutcome, PathReport};

#[derive(Clone, Copy, Debug, Default)]
pub struct AlignOpt {
    /// 强制路径从 `0,0,0` 开始、在 `n1,n2,n3` 结束
    pub anchored: bool,
}

impl AlignOpt {
    fn graph_opt(self) -> EditGraphOpt {
        EditGraphOpt {
            anchored: self.anchored,
        }
    }
}

/// 与输入文件名对应的默认图文件名：`<fa1>_<fa2>_<fa3>.graph.txt`
pub fn default_graph_path(fastas: [&Path; 3]) -> PathBuf {
    let names: Vec<String> = fastas
        .iter()
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string())
        })
        .collect();
    PathBuf::from(format!("{}.graph.txt", names.join("_")))
}

fn read_inputs(fastas: [&Path; 3]) -> Result<[FastaRecord; 3]> {
    let [a, b, c] = fastas;
    let recs = [read_first_record(a)?, read_first_record(b)?, read_first_record(c)?];
    for (p, r) in fastas.iter().zip(&recs) {
        log::info!("{}: '{}' ({} residues)", p.display(), r.id, r.seq.len());
    }
    Ok(recs)
}

fn write_graph<W: Write>(
    out: W,
    names: &[String; 3],
    recs: &[FastaRecord; 3],
    opt: AlignOpt,
) -> Result<(W, EditGraphSummary)> {
    let mut w = GraphWriter::new(out);
    w.comment(&format!("wdag-align {} edit graph", env!("CARGO_PKG_VERSION")))?;
    w.comment(&format!("created: {}", chrono::Utc::now().to_rfc3339()))?;
    for (name, rec) in names.iter().zip(recs) {
        w.comment(&format!("sequence: {} {} len={}", name, rec.id, rec.seq.len()))?;
    }
    let seqs = [recs[0].seq.as_slice(), recs[1].seq.as_slice(), recs[2].seq.as_slice()];
    let summary = edit_graph::write_edit_graph(&mut w, seqs, opt.graph_opt())?;
    Ok((w.into_inner()?, summary))
}

fn display_names(fastas: [&Path; 3]) -> [String; 3] {
    fastas.map(|p| p.display().to_string())
}

/// 由三个 FASTA 文件生成图描述文件
pub fn build_graph_file(fastas: [&Path; 3], graph_path: &Path, opt: AlignOpt) -> Result<EditGraphSummary> {
    let recs = read_inputs(fastas)?;
    let t0 = Instant::now();
    let fh = std::fs::File::create(graph_path)
        .with_context(|| format!("cannot create graph file '{}'", graph_path.display()))?;
    let (_, summary) = write_graph(std::io::BufWriter::new(fh), &display_names(fastas), &recs, opt)
        .with_context(|| format!("cannot build graph file '{}'", graph_path.display()))?;
    log::info!(
        "graph file {}: {} vertices, {} edges ({:.2?})",
        graph_path.display(),
        summary.vertices,
        summary.edges,
        t0.elapsed()
    );
    Ok(summary)
}

/// 加载图并求解，返回报告
pub fn solve_graph(source: &str, mut g: Graph) -> PathReport {
    let t0 = Instant::now();
    g.find_highest_weight_path();
    let report = PathReport::from_graph(source, &g);
    match report.score() {
        Some(score) => log::info!("highest weight path score {} ({:.2?})", score, t0.elapsed()),
        None => log::warn!("{}: no path satisfies the graph constraints", source),
    }
    report
}

pub fn solve_graph_file(graph_path: &Path) -> Result<PathReport> {
    let g = Graph::from_file(graph_path)
        .with_context(|| format!("cannot load graph file '{}'", graph_path.display()))?;
    log::info!(
        "graph {}: {} vertices, {} edges",
        graph_path.display(),
        g.vertex_count(),
        g.edge_count()
    );
    Ok(solve_graph(&graph_path.display().to_string(), g))
}

/// 不落盘的完整流程：三条序列 -> 图描述（内存）-> 最高权路径
pub fn align_sequences(seqs: [&[u8]; 3], opt: AlignOpt) -> Result<PathReport> {
    let mut w = GraphWriter::new(Vec::new());
    edit_graph::write_edit_graph(&mut w, seqs, opt.graph_opt())?;
    let text = w.into_inner()?;
    let g = Graph::load(text.as_slice())?;
    Ok(solve_graph("<memory>", g))
}

/// 三个 FASTA 文件的完整比对流程。
///
/// 给出 `graph_path` 时图描述写入该文件再读回，否则只在内存中流转。
pub fn align_fasta_files(
    fastas: [&Path; 3],
    graph_path: Option<&Path>,
    out_path: Option<&Path>,
    opt: AlignOpt,
) -> Result<PathReport> {
    let report = match graph_path {
        Some(gp) => {
            build_graph_file(fastas, gp, opt)?;
            solve_graph_file(gp)?
        }
        None => {
            let recs = read_inputs(fastas)?;
            let (text, summary) = write_graph(Vec::new(), &display_names(fastas), &recs, opt)?;
            log::info!("edit graph: {} vertices, {} edges", summary.vertices, summary.edges);
            let g = Graph::load(text.as_slice())?;
            solve_graph("<memory>", g)
        }
    };
    write_report(&report, out_path)?;
    Ok(report)
}

pub fn write_report(report: &PathReport, out_path: Option<&Path>) -> Result<()> {
    let mut out: Box<dyn Write> = if let Some(p) = out_path {
        let fh = std::fs::File::create(p)
            .with_context(|| format!("cannot create output '{}'", p.display()))?;
        Box::new(std::io::BufWriter::new(fh))
    } else {
        Box::new(std::io::BufWriter::new(std::io::stdout()))
    };
    write!(out, "{}", report)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_graph_name_uses_file_names() {
        let p = default_graph_path([Path::new("data/a.fa"), Path::new("b.fa"), Path::new("/tmp/c.fna")]);
        assert_eq!(p, PathBuf::from("a.fa_b.fa_c.fna.graph.txt"));
    }

    #[test]
    fn identical_sequences_align_without_gaps() {
        let r = align_sequences([b"AC", b"AC", b"AC"], AlignOpt::default()).unwrap();
        assert_eq!(
            r.outcome,
            PathOutcome::Found {
                score: 39.0,
                start: "0,0,0".into(),
                end: "2,2,2".into(),
                path: vec!["AAA".into(), "CCC".into()],
            }
        );
    }

    #[test]
    fn invalid_residue_fails_the_pipeline() {
        let err = align_sequences([b"AC", b"AJ", b"AC"], AlignOpt::default()).unwrap_err();
        assert!(err.to_string().contains("invalid residue"));
    }
}
