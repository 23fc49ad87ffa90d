use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use headerscope::analysis::AnalysisSession;
use headerscope::export::{self, ExportFormat};
use headerscope::frontend::{Collector, HeaderSearchPath};
use headerscope::parser::compile_commands;

#[derive(Parser)]
#[command(name = "headerscope")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version = "0.1.0")]
#[command(about = "Include analyzer that reports missing and redundant headers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the include set of one translation unit
    Analyze {
        /// Source file of the translation unit
        file: PathBuf,

        /// Add a directory to the header search path (repeatable)
        #[arg(short = 'I', long = "include-dir", value_name = "DIR")]
        include_dirs: Vec<PathBuf>,

        /// Read the search path from a compilation database
        #[arg(long, value_name = "FILE")]
        compile_commands: Option<PathBuf>,

        /// Export the report instead of printing it (json, csv, markdown)
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<String>,

        /// Print the observed include tree before the report
        #[arg(long)]
        show_includes: bool,

        /// Print circular include chains before the report
        #[arg(long)]
        cycles: bool,
    },
    /// Show version information
    Version,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze {
            file,
            include_dirs,
            compile_commands,
            format,
            show_includes,
            cycles,
        }) => run_analyze(
            &file,
            include_dirs,
            compile_commands.as_deref(),
            format.as_deref(),
            show_includes,
            cycles,
        ),
        Some(Commands::Version) => {
            println!("headerscope v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => {
            println!("HeaderScope - Include Analyzer for C/C++");
            println!("Run 'headerscope analyze <file>' to analyze a translation unit");
            println!("Run 'headerscope --help' for more information");
            Ok(())
        }
    }
}

fn run_analyze(
    file: &Path,
    mut include_dirs: Vec<PathBuf>,
    database: Option<&Path>,
    format: Option<&str>,
    show_includes: bool,
    cycles: bool,
) -> Result<()> {
    let main_file = file
        .canonicalize()
        .with_context(|| format!("cannot resolve {}", file.display()))?;

    if let Some(db_path) = database {
        let commands = compile_commands::parse_file(db_path)
            .with_context(|| format!("cannot read {}", db_path.display()))?;
        compile_commands::validate(&commands)?;

        match compile_commands::find_for_file(&commands, &main_file) {
            Some(entry) => include_dirs.extend(entry.include_dirs()),
            None => bail!(
                "no compilation database entry for {}",
                main_file.display()
            ),
        }
    }

    let mut search = HeaderSearchPath::new(include_dirs);
    if let Some(root) = project_root(&main_file) {
        search = search.with_project_root(root);
    }

    let mut session = AnalysisSession::new(&main_file);
    let mut collector = Collector::new(search)?;
    collector
        .run(&mut session)
        .with_context(|| format!("analysis of {} failed", main_file.display()))?;

    if show_includes {
        print_include_tree(&session);
    }
    if cycles {
        print_cycles(&session);
    }

    let report = session.finish();
    match format {
        Some(format) => {
            let format: ExportFormat = format.parse().map_err(anyhow::Error::msg)?;
            let mut stdout = io::stdout().lock();
            export::export(format, &report, &mut stdout)?;
        }
        None => print!("{report}"),
    }

    Ok(())
}

/// The root for the last-resort header scan: the working directory when it
/// contains the main file, the main file's directory otherwise.
fn project_root(main_file: &Path) -> Option<PathBuf> {
    if let Ok(cwd) = std::env::current_dir() {
        if main_file.starts_with(&cwd) {
            return Some(cwd);
        }
    }
    main_file.parent().map(Path::to_path_buf)
}

fn print_include_tree(session: &AnalysisSession) {
    println!("Includes info:");
    let graph = session.include_graph();

    let mut files: Vec<&Path> = graph.files().collect();
    files.sort();

    for file in files {
        let includes = graph.direct_includes_of(file);
        if includes.is_empty() {
            continue;
        }

        println!("{}", file.display());
        for included in includes {
            println!("    {}", included.display());
        }
        println!();
    }
}

fn print_cycles(session: &AnalysisSession) {
    let cycles = session.include_graph().detect_cycles();

    if cycles.is_empty() {
        println!("No circular includes detected.");
        println!();
        return;
    }

    println!("Circular includes:");
    for (index, cycle) in cycles.iter().enumerate() {
        println!("{}. {}", index + 1, cycle.cycle_path());
    }
    println!();
}
