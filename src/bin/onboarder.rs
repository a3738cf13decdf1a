use std::{fs, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use onboarder::host::memory::MemoryDocument;
use onboarder::{
    FlowValidation, GenerateOpts, GenerateSession, ValidationMode, validate_flow,
};

#[derive(Parser, Debug)]
#[command(name = "onboarder", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a flow JSON file and print collected errors.
    Validate(ValidateArgs),
    /// Generate screens into the in-memory host and dump the node tree.
    Generate(GenerateArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input flow JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Proceed with the normalizable steps instead of rejecting on error.
    #[arg(long)]
    lenient: bool,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input flow JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path for the generated node tree (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Proceed with the normalizable steps instead of rejecting on error.
    #[arg(long)]
    lenient: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Generate(args) => cmd_generate(args),
    }
}

fn read_flow_json(path: &PathBuf) -> anyhow::Result<serde_json::Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read flow '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| "parse flow JSON")
}

fn mode(lenient: bool) -> ValidationMode {
    if lenient {
        ValidationMode::Lenient
    } else {
        ValidationMode::Strict
    }
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let raw = read_flow_json(&args.in_path)?;
    match validate_flow(&raw, mode(args.lenient)) {
        FlowValidation::Accepted { flow, errors } => {
            for error in &errors {
                eprintln!("{error}");
            }
            println!("ok: {} step(s)", flow.steps.len());
            Ok(())
        }
        FlowValidation::Rejected { errors } => {
            for error in &errors {
                eprintln!("{error}");
            }
            anyhow::bail!("flow rejected with {} error(s)", errors.len());
        }
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let text = fs::read_to_string(&args.in_path)
        .with_context(|| format!("read flow '{}'", args.in_path.display()))?;

    let opts = GenerateOpts {
        validation: mode(args.lenient),
        ..GenerateOpts::default()
    };
    let mut doc = MemoryDocument::new();
    let mut session = GenerateSession::new(opts);
    let report = session.generate(&mut doc, &text)?;

    for error in &report.errors {
        eprintln!("{error}");
    }
    eprintln!("generated {} step(s)", report.step_count);

    let tree = serde_json::to_string_pretty(&doc.page_tree())?;
    match args.out {
        Some(out) => fs::write(&out, tree)
            .with_context(|| format!("write tree '{}'", out.display()))?,
        None => println!("{tree}"),
    }
    Ok(())
}
