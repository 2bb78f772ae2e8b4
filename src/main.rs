use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;

use vim_jumplist::config::Config;
use vim_jumplist::history::JumpList;
use vim_jumplist::host::MemoryHost;
use vim_jumplist::input::ScriptRunner;

/// vim-jumplist - replay editor sessions against a jump list
#[derive(Parser)]
#[command(name = "vim-jumplist")]
#[command(version)]
#[command(about = "Replays a script of cursor moves, edits and jumps against a jump list", long_about = None)]
struct Cli {
    /// Script to run (omit to read commands from stdin)
    script: Option<PathBuf>,

    /// Config file (default: ~/.config/vim-jumplist/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Discard forward history when registering mid-history
    #[arg(short, long)]
    stack_mode: bool,

    /// Log every jump list operation to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load(),
    };

    let default_level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut jumps = JumpList::from_config(&config);
    if cli.stack_mode {
        jumps.set_stack_mode(true);
    }

    // The terminal picker needs a keyboard, which a piped script doesn't leave us
    let interactive = cli.script.is_some() && io::stdout().is_terminal();
    let mut runner = ScriptRunner::new(jumps, MemoryHost::new()).with_interactive(interactive);

    let reader: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (number, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read script")?;
        if let Err(e) = runner.run_line(&line, &mut out) {
            eprintln!("line {}: {}", number + 1, e);
        }
    }
    out.flush()?;

    Ok(())
}
