use clap::Parser;
use tracing_subscriber::EnvFilter;
use websweep::cli::args::{Cli, OutputFormat};
use websweep::core::engine::Engine;
use websweep::core::session::ScanStatus;
use websweep::reporting::{json, text};

const BANNER: &str = r#"
 ╔══════════════════════════════════════════════════════╗
 ║                                                      ║
 ║   ██╗    ██╗███████╗██████╗ ███████╗██╗    ██╗       ║
 ║   ██║    ██║██╔════╝██╔══██╗██╔════╝██║    ██║       ║
 ║   ██║ █╗ ██║█████╗  ██████╔╝███████╗██║ █╗ ██║       ║
 ║   ██║███╗██║██╔══╝  ██╔══██╗╚════██║██║███╗██║       ║
 ║   ╚███╔███╔╝███████╗██████╔╝███████║╚███╔███╔╝       ║
 ║    ╚══╝╚══╝ ╚══════╝╚═════╝ ╚══════╝ ╚══╝╚══╝        ║
 ║                                                      ║
 ║   websweep - SQL injection & XSS scanner             ║
 ║   Scan only targets you are authorized to test.      ║
 ║                                                      ║
 ╚══════════════════════════════════════════════════════╝
"#;

fn print_banner() {
    println!("\x1b[36m{}\x1b[0m", BANNER);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !cli.no_banner && !cli.quiet {
        print_banner();
    }

    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let engine = Engine::new(cli.scan_config(), cli.scan_kind())?;
    let (findings, status) = engine.scan(&cli.url).await;

    let report = match cli.format {
        OutputFormat::Json => json::render(&cli.url, &findings)?,
        OutputFormat::Text => text::render(&cli.url, &findings),
    };
    match &cli.output {
        Some(path) => {
            std::fs::write(path, &report)?;
            tracing::info!("report written to {}", path.display());
        }
        None => println!("{report}"),
    }

    if let ScanStatus::Failed(msg) = status {
        anyhow::bail!("scan failed: {msg}");
    }
    Ok(())
}
