//! taskledger - interactive console for an in-memory task list.
//!
//! Reads one command per line from stdin. Nothing is persisted; the task
//! list lives for the lifetime of the process.

mod console;
mod display;
mod input;

use std::io::{self, BufRead, IsTerminal, Write};

use clap::Parser;
use taskledger_core::prelude::*;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::console::{Console, Flow};

#[derive(Debug, Parser)]
#[command(name = "taskledger", version, about = "In-memory task tracker console")]
struct Args {
    /// Days ahead covered by `upcoming` when no count is given.
    #[arg(long, env = "TASKLEDGER_HORIZON_DAYS", default_value_t = 7)]
    horizon_days: u32,

    /// Log filter used when RUST_LOG is not set (e.g. `debug`, `taskledger_core=info`).
    #[arg(long, env = "TASKLEDGER_LOG", default_value = "warn")]
    log_level: String,

    /// Print `list` and `view` output as JSON.
    #[arg(long)]
    json: bool,
}

fn init_tracing(default_filter: &str) {
    // Logs go to stderr so they never interleave with command output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = StoreConfig {
        upcoming_horizon_days: args.horizon_days,
    };
    info!(horizon_days = config.upcoming_horizon_days, "starting console");

    let store = TaskStore::with_config(SystemClock, config);
    let mut console = Console::new(store, io::stdout()).with_json(args.json);

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        console.help()?;
    }

    let mut input = stdin.lock();
    let mut line = String::new();
    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if console.execute(&line)? == Flow::Quit {
            break;
        }
    }

    info!(tasks = console.store().len(), "console closed");
    Ok(())
}
