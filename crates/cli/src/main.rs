use anyhow::Result;
use cargo_launch::{Cargo, CargoCommand, Launch};
use clap::Parser;

fn main() -> Result<()> {
    // Initialize tracing based on RUST_LOG env var
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    // `cargo launch ...` runs us as `cargo-launch launch ...`
    if args.get(1).map(String::as_str) == Some("launch") {
        let CargoCommand::Launch(launch) = Cargo::parse().command;
        launch.command.execute()
    } else {
        Launch::parse().command.execute()
    }
}
