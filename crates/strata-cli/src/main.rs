use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use strata::{Edge, Graph, GridLayout, LayoutOptions, Node, Orchestrator, RankDir};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Layout(strata::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Layout(err) => write!(f, "layout failed: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<strata::Error> for CliError {
    fn from(value: strata::Error) -> Self {
        Self::Layout(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Stats,
}

/// Option overrides given on the command line. Unset fields keep the value from the input file.
#[derive(Debug, Default)]
struct Overrides {
    rankdir: Option<RankDir>,
    nodesep: Option<f64>,
    ranksep: Option<f64>,
    marginx: Option<f64>,
    marginy: Option<f64>,
    iterations: Option<usize>,
}

impl Overrides {
    fn apply(&self, options: &mut LayoutOptions) {
        if let Some(rankdir) = self.rankdir {
            options.rankdir = rankdir;
        }
        if let Some(v) = self.nodesep {
            options.nodesep = v;
        }
        if let Some(v) = self.ranksep {
            options.ranksep = v;
        }
        if let Some(v) = self.marginx {
            options.marginx = v;
        }
        if let Some(v) = self.marginy {
            options.marginy = v;
        }
        if let Some(v) = self.iterations {
            options.iterations = v;
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    verbose: bool,
    no_fallback: bool,
    overrides: Overrides,
}

/// The JSON snapshot read from the input file.
#[derive(Debug, Deserialize)]
struct Input {
    #[serde(default)]
    nodes: Vec<Node<Value>>,
    #[serde(default)]
    edges: Vec<Edge<Value>>,
    #[serde(default)]
    options: LayoutOptions,
}

fn usage() -> &'static str {
    "strata\n\
\n\
USAGE:\n\
  strata [layout] [--pretty] [--rankdir TB|BT|LR|RL] [--nodesep <n>] [--ranksep <n>] [--marginx <n>] [--marginy <n>] [--iterations <n>] [--no-fallback] [--verbose] [<path>|-]\n\
  strata stats [--pretty] [--no-fallback] [--verbose] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a JSON object `{\"nodes\": [...], \"edges\": [...], \"options\": {...}}`.\n\
  - Flags override the values in `options`.\n\
  - layout prints the layout result; stats prints only its diagnostics.\n\
  - Unless --no-fallback is given, a failed layered layout falls back to a grid.\n\
  - Warnings go to stderr; --verbose also prints per-stage debug output (RUST_LOG overrides).\n\
"
}

fn parse_value<T: std::str::FromStr>(value: Option<&String>) -> Result<T, CliError> {
    let Some(value) = value else {
        return Err(CliError::Usage(usage()));
    };
    value.parse::<T>().map_err(|_| CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "stats" => args.command = Command::Stats,
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--no-fallback" => args.no_fallback = true,
            "--rankdir" => args.overrides.rankdir = Some(parse_value(it.next())?),
            "--nodesep" => args.overrides.nodesep = Some(parse_value(it.next())?),
            "--ranksep" => args.overrides.ranksep = Some(parse_value(it.next())?),
            "--marginx" => args.overrides.marginx = Some(parse_value(it.next())?),
            "--marginy" => args.overrides.marginy = Some(parse_value(it.next())?),
            "--iterations" => args.overrides.iterations = Some(parse_value(it.next())?),
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "strata=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Ignore the error when a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let input: Input = serde_json::from_str(&text)?;

    let mut options = input.options;
    args.overrides.apply(&mut options);

    let graph = Graph {
        nodes: input.nodes,
        edges: input.edges,
    };
    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        rankdir = %options.rankdir,
        "read graph snapshot"
    );

    let mut orchestrator = Orchestrator::new(options);
    if !args.no_fallback {
        orchestrator = orchestrator.with_fallback(GridLayout);
    }
    let result = orchestrator.compute_layout(&graph)?;

    match args.command {
        Command::Layout => write_json(&result, args.pretty),
        Command::Stats => write_json(&result.diagnostics, args.pretty),
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_logging(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
