use clap::Parser;
use devtask::Cli;

fn main() {
    // Initialize tracing based on RUST_LOG env var
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = cli.execute() {
        eprintln!("error: {err:#}");
        std::process::exit(devtask::exit_code(&err));
    }
}
