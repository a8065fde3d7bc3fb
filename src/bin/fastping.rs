use std::{io::Write, path::PathBuf, process::ExitCode, time::Duration};

use clap::{ArgAction, CommandFactory, Parser};
use fastping::{report::write_report, select_probe, Prober, ProberConfigBuilder, ResultOrder};
use tracing_subscriber::EnvFilter;

/// Ping hosts in parallel and report which of them responded
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Hosts to ping, e.g. www.example.com 192.168.0.1
    #[arg(value_name = "HOST")]
    hosts: Vec<String>,

    /// Seconds each ping may wait for a reply
    #[arg(short, long, value_name = "SECS", default_value_t = 5)]
    timeout: u64,

    /// Maximum number of pings running at the same time
    #[arg(short = 'j', long, value_name = "N")]
    max_in_flight: Option<usize>,

    /// List hosts in the order given instead of the order they finished
    #[arg(long)]
    sorted: bool,

    /// Stop waiting for a ping this many seconds after its timeout
    #[arg(long, value_name = "SECS")]
    deadline: Option<u64>,

    /// Path of the ping tool
    #[arg(long, value_name = "PATH")]
    ping: Option<PathBuf>,

    /// More log output on stderr, repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.hosts.is_empty() {
        write!(std::io::stderr().lock(), "{}", Args::command().render_long_help())?;
        return Ok(ExitCode::FAILURE);
    }

    let mut builder = ProberConfigBuilder::new().with_timeout(Duration::from_secs(args.timeout));
    if let Some(limit) = args.max_in_flight {
        builder = builder.with_max_in_flight(limit);
    }
    if args.sorted {
        builder = builder.with_order(ResultOrder::Input);
    }
    if let Some(grace) = args.deadline {
        builder = builder.with_hard_deadline(Duration::from_secs(grace));
    }
    let config = builder.build()?;

    let mut invoker = select_probe(std::env::consts::OS)?;
    if let Some(program) = args.ping {
        invoker = invoker.with_program(program);
    }

    let classification = Prober::new(invoker, config).probe_all(&args.hosts).await;
    write_report(&mut std::io::stdout().lock(), &classification)?;
    Ok(ExitCode::SUCCESS)
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
