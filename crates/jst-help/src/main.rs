//! jst-help CLI - renders JSTColorPicker Markdown docs into localized help
//! bundles.
//!
//! With no arguments every `*.md` file at the project root is rendered to
//! `JSTColorPicker/Help/<lang>.lproj/JSTColorPicker.html`.

mod error;
mod output;
mod render;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use output::Output;
use render::RenderArgs;

/// Render Markdown documentation into localized help pages.
#[derive(Parser)]
#[command(name = "jst-help", version, about)]
struct Cli {
    #[command(flatten)]
    args: RenderArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.args.verbose))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.args.execute() {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// --verbose enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    }
}
