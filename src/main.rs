use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use colored::Colorize;
use depwalk::runner::ShellExecutor;
use depwalk::scanner::RealFs;
use depwalk::{DepwalkContext, cli::Cli, output, runner};
use std::io;
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e:#}", "Error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        print_completions(shell, &mut Cli::command());
        return Ok(());
    }

    output::set_verbosity(output::Verbosity::from_flags(cli.quiet, cli.verbose));
    init_tracing(cli.verbose);

    let ctx = DepwalkContext::new(cli.root.clone(), cli.config.clone(), cli.run_options())?;
    runner::execute(&ctx, &RealFs, &ShellExecutor)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "depwalk=debug" } else { "depwalk=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
