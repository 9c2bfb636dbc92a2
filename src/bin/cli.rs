//! redpipe CLI Client
//!
//! Sends commands to a RESP server and prints the replies.
//!
//! With command words on the command line, one command is sent. Without,
//! commands are read from stdin (one per line), all queued before any I/O,
//! then resolved in order.

use std::io::{self, BufRead};
use std::process::ExitCode;

use clap::Parser;
use redpipe::{Command, Config, ReadPolicy, TcpConnection};
use tracing_subscriber::{fmt, EnvFilter};

/// redpipe CLI
#[derive(Parser, Debug)]
#[command(name = "redpipe-cli")]
#[command(about = "Pipelining command-line client for RESP servers")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "6379")]
    port: u16,

    /// Connect and send timeout in milliseconds (0 = none)
    #[arg(short, long, default_value = "0")]
    timeout_ms: u64,

    /// Only flush up to the command being read instead of the whole queue
    #[arg(long)]
    flush_exact: bool,

    /// Command and arguments; read commands from stdin when omitted
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

fn main() -> ExitCode {
    // Replies go to stdout, logs to stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,redpipe=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let policy = if args.flush_exact {
        ReadPolicy::FlushExact
    } else {
        ReadPolicy::FlushAll
    };

    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .connect_timeout_ms(args.timeout_ms)
        .send_timeout_ms(args.timeout_ms)
        .read_policy(policy)
        .build();

    let conn = match TcpConnection::connect(&config) {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to connect to {}: {}", config.addr(), e);
            return ExitCode::FAILURE;
        }
    };

    // Queue everything first; nothing is written until the first result read.
    let commands: Vec<Command> = if args.command.is_empty() {
        match read_stdin_commands(&conn) {
            Ok(commands) => commands,
            Err(e) => {
                tracing::error!("Failed to read commands from stdin: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        vec![conn.queue_command(&args.command)]
    };

    tracing::info!("Queued {} command(s)", commands.len());

    let mut status = ExitCode::SUCCESS;
    for command in &commands {
        match command.result() {
            Ok(value) => {
                if value.is_error() {
                    status = ExitCode::FAILURE;
                }
                println!("{}", value);
            }
            Err(e) => {
                tracing::error!("{:?} failed: {}", command.name(), e);
                return ExitCode::FAILURE;
            }
        }
    }

    if let Err(e) = conn.close() {
        tracing::error!("Error closing connection: {}", e);
        return ExitCode::FAILURE;
    }

    status
}

/// Queue one command per non-empty stdin line
fn read_stdin_commands(conn: &TcpConnection) -> io::Result<Vec<Command>> {
    let mut commands = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        commands.push(conn.queue_command(words));
    }
    Ok(commands)
}
