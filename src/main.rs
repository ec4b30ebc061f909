use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use draky_entrypoint::compose::{self, ComposeFile};
use draky_entrypoint::config::{self, Config};
use draky_entrypoint::runtime::{self, CliRuntime, Instruction};
use draky_entrypoint::service::AddonContext;
use draky_entrypoint::substitute::Substitutor;

#[derive(Parser)]
#[command(
    name = "draky-entrypoint",
    version,
    about = "Run an addon's entrypoint script ahead of each compose service's own startup command"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Container runtime command, e.g. `podman` or `sudo docker`.
    #[arg(long, global = true)]
    runtime: Option<String>,

    /// Project directory holding `.drakyep` and the compose file.
    #[arg(short = 'C', long, global = true, default_value = ".")]
    project_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite services so the wrapper script runs first.
    Rewrite(RewriteArgs),
    /// Print the ENTRYPOINT/CMD recovered from an image's build history.
    History(HistoryArgs),
    /// Check that the container runtime daemon is reachable.
    Check,
    /// Print the effective configuration.
    Config,
}

#[derive(Args)]
struct RewriteArgs {
    /// Compose file; discovered in the project directory when omitted.
    compose: Option<PathBuf>,

    /// Addon directory relative to the project-config root.
    #[arg(long)]
    addon_dir: Option<String>,

    /// Only rewrite these services (repeatable).
    #[arg(short, long = "service")]
    services: Vec<String>,

    /// Variable override used when resolving image names (KEY=VALUE, repeatable).
    #[arg(long = "set", value_name = "KEY=VALUE")]
    vars: Vec<String>,

    /// Write the result here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Yaml)]
    format: Format,

    /// Print a unified diff of the changes instead of the document.
    #[arg(long)]
    diff: bool,
}

#[derive(Args)]
struct HistoryArgs {
    image: String,

    /// Only print this instruction.
    #[arg(long, value_enum)]
    instruction: Option<InstructionArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum InstructionArg {
    Entrypoint,
    Cmd,
}

impl From<InstructionArg> for Instruction {
    fn from(arg: InstructionArg) -> Self {
        match arg {
            InstructionArg::Entrypoint => Instruction::Entrypoint,
            InstructionArg::Cmd => Instruction::Cmd,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut cfg = config::load(&cli.project_dir)?;
    if let Some(runtime) = cli.runtime {
        cfg.runtime = runtime;
    }

    match cli.command {
        Commands::Rewrite(args) => rewrite(&cli.project_dir, &cfg, args),
        Commands::History(args) => history(&cfg, args),
        Commands::Check => check(&cfg),
        Commands::Config => {
            print!("{}", serde_yaml::to_string(&cfg)?);
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn rewrite(project_dir: &Path, cfg: &Config, args: RewriteArgs) -> Result<()> {
    let runner = CliRuntime::parse(&cfg.runtime)?;
    let addon_dir = args
        .addon_dir
        .or_else(|| cfg.addon_dir.clone())
        .context("no addon directory: pass --addon-dir or set `addon_dir` in .drakyep")?;
    let addon = AddonContext::new(addon_dir);

    let path = compose::resolve_compose_path(
        project_dir,
        args.compose.as_deref(),
        cfg.compose.as_deref(),
        cfg.search_depth,
    )?;
    let mut doc = ComposeFile::load(&path)?;

    let known = doc.service_names();
    for name in &args.services {
        if !known.contains(name) {
            bail!("no service named `{name}` in {}", path.display());
        }
    }

    let mut substitutor = Substitutor::from_env();
    for pair in &args.vars {
        substitutor.set_pair(pair)?;
    }

    let before = render(&doc, args.format)?;
    let rewritten =
        doc.rewrite_services(&args.services, &addon, |raw| substitutor.apply(raw), &runner)?;
    let after = render(&doc, args.format)?;
    info!(count = rewritten.len(), services = ?rewritten, "rewrite finished");

    let body = if args.diff {
        compose::unified_diff(&before, &after, &compose::display_label(project_dir, &path))
    } else {
        after
    };

    match args.output {
        Some(out) => std::fs::write(&out, body)
            .with_context(|| format!("failed to write {}", out.display()))?,
        None => print!("{body}"),
    }
    Ok(())
}

fn render(doc: &ComposeFile, format: Format) -> Result<String> {
    match format {
        Format::Yaml => doc.to_yaml(),
        Format::Json => doc.to_json().map(|json| json + "\n"),
    }
}

fn history(cfg: &Config, args: HistoryArgs) -> Result<()> {
    let runner = CliRuntime::parse(&cfg.runtime)?;
    runtime::ensure_image(&runner, &args.image)?;

    let instructions = match args.instruction {
        Some(one) => vec![one.into()],
        None => vec![Instruction::Entrypoint, Instruction::Cmd],
    };
    for instruction in instructions {
        let values = runtime::extract(&runner, &args.image, instruction);
        println!("{}: {}", instruction.keyword(), serde_json::to_string(&values)?);
    }
    Ok(())
}

fn check(cfg: &Config) -> Result<()> {
    let runner = CliRuntime::parse(&cfg.runtime)?;
    runtime::ensure_daemon(&runner)?;
    println!("{} daemon is reachable", runner.program());
    Ok(())
}
