//! # tunekit - Main Entry Point
//!
//! Loads the requested modules, feeds them their options, lets their init
//! hooks negotiate the pipeline order, runs the pipeline and tears
//! everything down. The process exit code follows the classic tuning-tool
//! taxonomy so wrapper scripts can distinguish "nothing left to recommend"
//! from a hard failure.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};
use std::fs::File;
use std::io::BufWriter;

use tunekit::builtin::default_library;
use tunekit::cli::Args;
use tunekit::domain::{ResultCode, RunError};
use tunekit::export::RunReportExporter;
use tunekit::orchestrator::{Orchestrator, RunOutcome, RunReport};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            EXIT_ERROR
        }
    });
}

/// Process exit code for a result code, following the original numeric
/// taxonomy. The negative GNU-style codes (-1/-2) wrap to their u8 exit
/// values.
fn exit_code_for(code: ResultCode) -> i32 {
    match code {
        ResultCode::Success => EXIT_SUCCESS,
        ResultCode::Error => EXIT_ERROR,
        ResultCode::NoRecommendation => 2,
        ResultCode::NoPattern => 3,
        ResultCode::NoTransformation => 4,
        ResultCode::ForkError => 8,
        ResultCode::Undefined => 254,
        ResultCode::Failure => 255,
    }
}

fn run() -> Result<i32> {
    let args = Args::parse();

    if args.modules.is_empty() {
        bail!(
            "Missing required argument: --module\n\n\
             Usage:\n  \
             tunekit -m make                  Run the make module\n  \
             tunekit -m make -o make,target=all\n\n\
             Run 'tunekit --help' for more options"
        );
    }

    let mut orchestrator = Orchestrator::new(default_library());

    for name in &args.modules {
        orchestrator.load(name).with_context(|| format!("Failed to load module {name}"))?;
    }
    for raw in &args.options {
        let Some((name, option)) = raw.split_once(',') else {
            bail!("Malformed --option \"{raw}\": expected NAME,KEY=VALUE");
        };
        orchestrator
            .set_option(name, option)
            .with_context(|| format!("Failed to set option for module {name}"))?;
    }

    orchestrator.init_all().context("Module initialization failed")?;

    let (report, exit) = match orchestrator.run() {
        Ok(report) => {
            let exit = match &report.outcome {
                RunOutcome::Completed => EXIT_SUCCESS,
                RunOutcome::Stopped { module, phase, code } => {
                    if !args.quiet {
                        eprintln!("pipeline stopped at {module}/{phase} ({code:?})");
                    }
                    exit_code_for(*code)
                }
            };
            (Some(report), exit)
        }
        Err(RunError::StepFailed { module, phase, code }) => {
            eprintln!("error: step {module}/{phase} failed ({code:?})");
            (None, exit_code_for(code))
        }
        Err(err) => {
            teardown(&mut orchestrator);
            return Err(err).context("Pipeline execution failed");
        }
    };

    if let (Some(report), Some(path)) = (&report, &args.export) {
        export_report(&orchestrator, report, path)?;
        if !args.quiet {
            info!("run report written to {}", path.display());
        }
    }

    teardown(&mut orchestrator);
    Ok(exit)
}

fn export_report(
    orchestrator: &Orchestrator,
    report: &RunReport,
    path: &std::path::Path,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create report file {}", path.display()))?;
    RunReportExporter::new(orchestrator, report)
        .export(BufWriter::new(file))
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}

fn teardown(orchestrator: &mut Orchestrator) {
    for err in orchestrator.fini_all() {
        warn!("{err}");
    }
}
