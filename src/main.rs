use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use wdag_align::align::{self, AlignOpt};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(
    name = "wdag-align",
    author,
    version,
    about = "Align three protein sequences as the highest weight path through an edit graph",
    arg_required_else_help = true
)]
struct Cli {
    /// Verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Three FASTA files; the first record of each is used
    #[arg(num_args = 3, required = true)]
    fasta: Vec<PathBuf>,
    /// Force the path to start at 0,0,0 and end at n1,n2,n3
    #[arg(long)]
    anchored: bool,
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    threads: usize,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the edit graph description for three sequences
    Build {
        #[command(flatten)]
        args: BuildArgs,
        /// Graph description path (default: <fa1>_<fa2>_<fa3>.graph.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Find the highest weight path of an existing graph description
    Path {
        /// Graph description file
        graph: PathBuf,
        /// Report path (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Build the edit graph and report the highest weight path
    Align {
        #[command(flatten)]
        args: BuildArgs,
        /// Also keep the graph description at this path
        #[arg(short, long)]
        graph: Option<PathBuf>,
        /// Report path (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    match cli.command {
        Commands::Build { args, output } => {
            init_threads(args.threads)?;
            let fastas = fasta_paths(&args.fasta)?;
            let graph = output.unwrap_or_else(|| align::default_graph_path(fastas));
            let summary = align::build_graph_file(fastas, &graph, opt_from(&args))?;
            println!("graph: {}", graph.display());
            println!("vertices: {}", summary.vertices);
            println!("edges: {}", summary.edges);
            Ok(())
        }
        Commands::Path { graph, out } => {
            let report = align::solve_graph_file(&graph)?;
            align::write_report(&report, out.as_deref())
        }
        Commands::Align { args, graph, out } => {
            init_threads(args.threads)?;
            let fastas = fasta_paths(&args.fasta)?;
            align::align_fasta_files(fastas, graph.as_deref(), out.as_deref(), opt_from(&args))?;
            Ok(())
        }
    }
}

fn opt_from(args: &BuildArgs) -> AlignOpt {
    AlignOpt {
        anchored: args.anchored,
    }
}

fn fasta_paths(paths: &[PathBuf]) -> Result<[&Path; 3]> {
    match paths {
        [a, b, c] => Ok([a.as_path(), b.as_path(), c.as_path()]),
        _ => anyhow::bail!("expected exactly three FASTA files, got {}", paths.len()),
    }
}

fn init_threads(threads: usize) -> Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build_global()
        .map_err(|e| anyhow::anyhow!("cannot configure thread pool: {}", e))
}
