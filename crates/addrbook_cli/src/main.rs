//! Interactive address book assistant.
//!
//! # Responsibility
//! - Parse process flags and start logging when requested.
//! - Run the read-eval-print loop over `addrbook_core::ContactService`.
//! - Save the book on `exit`/`close` and at end of input.
//!
//! Usage:
//!     addrbook --book ./address_book.sqlite3 --log-dir ./logs

mod commands;

use addrbook_core::{default_log_level, init_logging, ContactService, DEFAULT_HORIZON_DAYS};
use anyhow::{Context, Result};
use clap::Parser;
use commands::{execute, Flow};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "addrbook", about = "Contact book with upcoming birthday reminders")]
struct Args {
    /// Address book snapshot file
    #[arg(long, env = "ADDRBOOK_PATH", default_value = "address_book.sqlite3")]
    book: PathBuf,

    /// Directory for rolling log files; logging is off when omitted
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, default_value = default_log_level())]
    log_level: String,

    /// Days ahead considered by `upcoming_birthdays`
    #[arg(long, default_value_t = DEFAULT_HORIZON_DAYS)]
    horizon_days: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_dir) = &args.log_dir {
        let log_dir = if log_dir.is_absolute() {
            log_dir.clone()
        } else {
            std::env::current_dir()
                .context("Failed to resolve current directory")?
                .join(log_dir)
        };
        init_logging(&args.log_level, &log_dir).map_err(anyhow::Error::msg)?;
    }

    let mut service = ContactService::open(&args.book)
        .with_context(|| format!("Failed to load address book {}", args.book.display()))?;

    println!("Welcome to the assistant bot!");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Enter command: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read command")?;
        if execute(&mut service, &line, args.horizon_days) == Flow::Exit {
            break;
        }
    }

    service
        .save(&args.book)
        .with_context(|| format!("Failed to save address book {}", args.book.display()))?;
    println!("Good bye!");
    Ok(())
}
