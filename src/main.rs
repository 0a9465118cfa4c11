use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "drip",
    about = "Dividend portfolio projection (monthly compounding, DRIP, flat-rate tax with allowance)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Project a saved portfolio document and print the year results as JSON
    Project { file: PathBuf },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port } => {
            if let Err(e) = drip::api::run_http_server(port).await {
                eprintln!("Server error: {e}");
                process::exit(1);
            }
        }
        Command::Project { file } => {
            let json = match std::fs::read_to_string(&file) {
                Ok(json) => json,
                Err(e) => {
                    eprintln!("Failed to read {}: {e}", file.display());
                    process::exit(1);
                }
            };
            match drip::api::project_document(&json) {
                Ok(output) => println!("{output}"),
                Err(msg) => {
                    eprintln!("{msg}");
                    process::exit(1);
                }
            }
        }
    }
}
