use std::env;

use anyhow::Result;
use frostdate_rs::{FrostClient, LocalLookup, RemoteLookup};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <zipcodes> [mode] [base_url]", args[0]);
        eprintln!("  zipcodes: comma-separated (e.g., 00601,55401)");
        eprintln!("  mode: local or remote (default: local)");
        eprintln!("  base_url: dataset host for remote mode (default: http://localhost:3000)");
        std::process::exit(1);
    }

    // Parse comma-separated ZIP codes
    let zips: Vec<String> = args[1]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if zips.is_empty() {
        eprintln!("Error: No ZIP codes provided");
        std::process::exit(1);
    }

    let mode = args.get(2).map(|s| s.as_str()).unwrap_or("local");

    match mode {
        "local" => {
            let widget = LocalLookup::builtin();
            for zip in &zips {
                widget.lookup(zip);
                println!("\n{}", render_plain(&widget.region().html()));
            }
        }
        "remote" => {
            let base_url = args
                .get(3)
                .map(|s| s.as_str())
                .unwrap_or("http://localhost:3000");
            let widget = RemoteLookup::new(FrostClient::new(base_url)?);
            for zip in &zips {
                // The region carries the user-facing message either way;
                // the cause only goes to stderr
                if let Err(err) = widget.lookup(zip).await {
                    eprintln!("Lookup for {} failed: {}", zip, err);
                }
                println!("\n{}", render_plain(&widget.region().html()));
            }
        }
        other => {
            eprintln!("Unknown mode: {}. Use local or remote.", other);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Strip the fragment markup for terminal display
fn render_plain(html: &str) -> String {
    html.replace("<br>", "")
}
