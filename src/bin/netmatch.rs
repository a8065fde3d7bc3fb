use std::{io::Write, process::ExitCode};

use clap::{CommandFactory, Parser};
use fastping::subnet::netmatch;
use tracing_subscriber::EnvFilter;

/// Check whether an IPv4 address belongs to a network
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Address to check followed by the network, e.g. 192.168.0.1 192.168.0.0/24
    #[arg(value_name = "ADDR")]
    addresses: Vec<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let [ip, network] = args.addresses.as_slice() else {
        write!(std::io::stderr().lock(), "{}", Args::command().render_long_help())?;
        return Ok(ExitCode::FAILURE);
    };

    println!("{}", netmatch(ip, network)?);
    Ok(ExitCode::SUCCESS)
}
