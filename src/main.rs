use clap::Parser;
use flight_telemetry::cli::{self, Args};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let json = args.json;
    let telemetry = cli::run(args).await?;

    if json {
        eprintln!("{}", telemetry.summary());
    } else {
        println!("{}", telemetry.summary());
    }
    Ok(())
}
