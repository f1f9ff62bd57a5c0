use std::io::{self, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod config;
pub mod error;
pub mod http_probe;
pub mod prober;

use cli::Invocation;
use config::load_config;
use http_probe::report;
use prober::{RULE, TokenProber};

/// Diagnostics go to stderr so they never interleave with the report on stdout.
fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "tokenprobe=warn".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

/// Print the banner, then either the usage text or the full probe report.
/// Always completes normally; only a failing `out` is an error.
async fn execute<W: Write>(invocation: &Invocation, out: &mut W) -> io::Result<()> {
    writeln!(out, "JWT Token Tester")?;
    writeln!(out, "{RULE}")?;

    let Some(token) = invocation.token() else {
        return cli::write_usage(out);
    };

    let settings = match load_config(invocation.config.as_deref(), invocation.base_url.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("could not load settings: {e}");
            writeln!(out, "❌ Invalid configuration: {}", report(&e))?;
            return Ok(());
        }
    };

    let prober = match TokenProber::new(settings) {
        Ok(prober) => prober,
        Err(e) => {
            log::error!("could not build http client: {e}");
            writeln!(out, "❌ Could not build HTTP client: {}", report(&e))?;
            return Ok(());
        }
    };

    writeln!(out, "Target: {}\n", prober.settings().base_url)?;
    prober.run(token, invocation.user_id(), out).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    init_logging();

    let invocation = Invocation::parse();
    log::debug!("Parsed invocation (user id given: {})", invocation.user_id().is_some());

    let mut stdout = io::stdout();
    if let Err(e) = execute(&invocation, &mut stdout).await {
        log::error!("failed to write report: {e}");
    }
}
