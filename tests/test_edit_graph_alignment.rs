use std::path::PathBuf;

use wdag_align::align::edit_graph::{write_edit_graph, EditGraphOpt};
use wdag_align::align::{self, AlignOpt, PathOutcome, PathReport};
use wdag_align::graph::Graph;
use wdag_align::io::graph_file::GraphWriter;
use wdag_align::util::blosum62::{self, GAP};

fn describe(seqs: [&[u8]; 3], anchored: bool) -> String {
    let mut w = GraphWriter::new(Vec::new());
    write_edit_graph(&mut w, seqs, EditGraphOpt { anchored }).unwrap();
    String::from_utf8(w.into_inner().unwrap()).unwrap()
}

fn solve(text: &str) -> Graph {
    let mut g: Graph = text.parse().unwrap();
    g.find_highest_weight_path();
    g
}

fn found(report: &PathReport) -> (f64, &str, &str, Vec<&str>) {
    match &report.outcome {
        PathOutcome::Found {
            score,
            start,
            end,
            path,
        } => (*score, start.as_str(), end.as_str(), path.iter().map(String::as_str).collect()),
        PathOutcome::NotFound => panic!("expected a path"),
    }
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("wdag_it_{}_{}", std::process::id(), name))
}

#[test]
fn identical_sequences_use_three_full_columns() {
    let g = solve(&describe([b"AC", b"AC", b"AC"], false));
    let report = PathReport::from_graph("ac", &g);
    let (score, start, end, path) = found(&report);

    let aa = blosum62::score(b'A', b'A').unwrap();
    let cc = blosum62::score(b'C', b'C').unwrap();
    assert_eq!(score, f64::from(3 * aa + 3 * cc));
    assert_eq!(score, 39.0);
    assert_eq!(start, "0,0,0");
    assert_eq!(end, "2,2,2");
    assert_eq!(path, vec!["AAA", "CCC"]);
}

#[test]
fn empty_third_sequence_reduces_to_pairwise() {
    let text = describe([b"WC", b"WC", b""], true);
    for line in text.lines().filter(|l| l.starts_with("E ")) {
        let label = line.split(' ').nth(1).unwrap();
        assert_eq!(label.as_bytes()[2], GAP, "{}", line);
    }

    let g = solve(&text);
    let report = PathReport::from_graph("pairwise", &g);
    let (score, start, end, path) = found(&report);
    let pair = |a: u8, b: u8| blosum62::score(a, b).unwrap() + 2 * blosum62::gap_cost();
    assert_eq!(score, f64::from(pair(b'W', b'W') + pair(b'C', b'C')));
    assert_eq!(start, "0,0,0");
    assert_eq!(end, "2,2,0");
    assert_eq!(path, vec!["WW-", "CC-"]);

    // 无约束时每一列都为负，最优是起点上的平凡路径
    let g = solve(&describe([b"WC", b"WC", b""], false));
    assert_eq!(g.best_score(), Some(0.0));
    assert!(g.path_edges().is_empty());
}

#[test]
fn anchors_override_a_better_local_path() {
    let seqs: [&[u8]; 3] = [b"AW", b"CW", b"W"];

    let free = PathReport::from_graph("free", &solve(&describe(seqs, false)));
    let (score, start, end, path) = found(&free);
    assert_eq!(score, 33.0);
    assert_eq!(start, "1,1,0");
    assert_eq!(end, "2,2,1");
    assert_eq!(path, vec!["WWW"]);

    let anchored = PathReport::from_graph("anchored", &solve(&describe(seqs, true)));
    let (score, start, end, path) = found(&anchored);
    assert_eq!(score, 21.0);
    assert_eq!(start, "0,0,0");
    assert_eq!(end, "2,2,1");
    assert_eq!(path, vec!["AC-", "WWW"]);
}

#[test]
fn empty_description_reports_no_path() {
    let report = align::solve_graph("empty", "".parse().unwrap());
    assert_eq!(report.outcome, PathOutcome::NotFound);
    assert!(report.to_string().contains("No Path Found!"));
}

#[test]
fn unreachable_anchor_reports_no_path() {
    // 起点 (0,0,0) 已有两条序列耗尽，没有出边，终点 (1,0,0) 不可达
    let report = align::align_sequences([b"A", b"", b""], AlignOpt { anchored: true }).unwrap();
    assert_eq!(report.outcome, PathOutcome::NotFound);
}

#[test]
fn anchored_path_avoids_dead_boundary_vertices() {
    // (1,1,0) 与 (0,2,0) 都有两条序列耗尽，唯一的全局路径经过 (0,1,0)
    let report = align::align_sequences([b"A", b"CW", b""], AlignOpt { anchored: true }).unwrap();
    let (score, start, end, path) = found(&report);
    assert_eq!(score, -27.0);
    assert_eq!(start, "0,0,0");
    assert_eq!(end, "1,2,0");
    assert_eq!(path, vec!["-C-", "AW-"]);
}

#[test]
fn traversal_is_idempotent_on_a_real_graph() {
    let mut g: Graph = describe([b"HEAGAWGHEE", b"PAWHEAE", b"WHEAE"], false).parse().unwrap();
    let first = g.find_highest_weight_path();
    let path = g.best_path();
    assert!(path.is_some());
    assert_eq!(g.find_highest_weight_path(), first);
    assert_eq!(g.best_path(), path);
}

#[test]
fn removing_off_path_edges_keeps_the_score() {
    let text = describe([b"MKVL", b"MKL", b"KVL"], false);
    let g = solve(&text);
    let best = g.best_score().unwrap();
    let on_path: std::collections::HashSet<(String, String)> = g
        .path_edges()
        .into_iter()
        .map(|e| {
            let e = g.edge(e);
            (g.vertex(e.start).label.clone(), g.vertex(e.end).label.clone())
        })
        .collect();

    let edge_lines: Vec<&str> = text.lines().filter(|l| l.starts_with("E ")).collect();
    let mut checked = 0;
    // 同一对顶点之间至多一条边，因此边行文本唯一
    for victim in edge_lines.iter().step_by(7) {
        let fields: Vec<&str> = victim.split(' ').collect();
        if on_path.contains(&(fields[2].to_string(), fields[3].to_string())) {
            continue;
        }
        let pruned: String = text
            .lines()
            .filter(|l| l != victim)
            .map(|l| format!("{}\n", l))
            .collect();
        let g2 = solve(&pruned);
        assert_eq!(g2.edge_count(), g.edge_count() - 1);
        assert_eq!(g2.best_score(), Some(best), "removed {}", victim);
        checked += 1;
    }
    assert!(checked > 5);
}

#[test]
fn fasta_files_through_graph_file() {
    let fa: Vec<PathBuf> = ["a.fa", "b.fa", "c.fa"].iter().map(|n| temp_path(n)).collect();
    std::fs::write(&fa[0], ">s1 first\nAC\n").unwrap();
    std::fs::write(&fa[1], ">s2\nA\nC\n").unwrap();
    std::fs::write(&fa[2], ">s3\nac\n").unwrap();
    let graph = temp_path("abc.graph.txt");
    let out = temp_path("abc.report.txt");
    let fastas = [fa[0].as_path(), fa[1].as_path(), fa[2].as_path()];

    let report =
        align::align_fasta_files(fastas, Some(&graph), Some(&out), AlignOpt::default()).unwrap();
    let (score, _, _, path) = found(&report);
    assert_eq!(score, 39.0);
    assert_eq!(path, vec!["AAA", "CCC"]);

    let text = std::fs::read_to_string(&graph).unwrap();
    assert!(text.starts_with("# wdag-align"));
    assert_eq!(text.lines().filter(|l| l.starts_with("V ")).count(), 27);

    let again = align::solve_graph_file(&graph).unwrap();
    assert_eq!(again.outcome, report.outcome);
    assert_eq!(again.edge_frequencies, report.edge_frequencies);

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("<result type=\"score\">39</result>"));
    assert!(written.contains("<result type=\"end_vertex\">2,2,2</result>"));

    let in_memory = align::align_fasta_files(fastas, None, Some(&out), AlignOpt::default()).unwrap();
    assert_eq!(in_memory.outcome, report.outcome);

    for p in fa.iter().chain([&graph, &out]) {
        std::fs::remove_file(p).unwrap();
    }
}

#[test]
fn edge_statistics_count_every_occurrence() {
    let g = solve(&describe([b"AA", b"A", b""], false));
    // 顶点 (0,0,0) 与 (1,0,0) 各有一条 "A--"，(2,0,0) 两条序列耗尽
    assert_eq!(g.edge_frequencies().get("A--"), Some(&2));
    assert_eq!(g.edge_frequencies().get("-A-"), Some(&2));
    assert_eq!(g.edge_frequencies().get("AA-"), Some(&2));
    assert_eq!(g.edge_weights().get("AA-"), Some(&-8.0));
}
