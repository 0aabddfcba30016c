use anyhow::Context as _;
use bookcart_suite::{scenarios, SuiteArgs};
use clap::Parser;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = SuiteArgs::parse();

    if args.list {
        for scenario in scenarios::select(args.tag) {
            let tags: Vec<_> = scenario.tags.iter().map(ToString::to_string).collect();
            println!("{:<32} {}", scenario.name, tags.join(","));
        }
        return Ok(());
    }

    info!(base_url = %args.base_url, fixtures = %args.fixtures.display(), "running suite");
    let report = bookcart_suite::run_suite(&args)
        .with_context(|| format!("failed to start suite with fixtures {}", args.fixtures.display()))?;

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
    }

    for failure in report.failures() {
        error!(
            scenario = %failure.name,
            error = failure.error.as_deref().unwrap_or_default(),
            "scenario failed"
        );
    }
    println!(
        "{} passed, {} failed, {} total ({} ms)",
        report.passed, report.failed, report.total, report.duration_ms
    );

    if !report.all_passed() {
        std::process::exit(1);
    }
    Ok(())
}
