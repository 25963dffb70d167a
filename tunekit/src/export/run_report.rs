//! JSON run-report writer.
//!
//! The document carries three sections: the run outcome, the executed steps
//! with their recorded result codes, and the registry of modules that took
//! part (name, version, final lifecycle status, capabilities).

use crate::domain::{ExportError, ModuleStatus, Phase, ResultCode};
use crate::orchestrator::{Orchestrator, RunOutcome, RunReport};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ReportDoc<'a> {
    outcome: &'a RunOutcome,
    steps: Vec<StepDoc<'a>>,
    modules: Vec<ModuleDoc<'a>>,
}

#[derive(Serialize)]
struct StepDoc<'a> {
    module: &'a str,
    phase: Phase,
    code: ResultCode,
}

#[derive(Serialize)]
struct ModuleDoc<'a> {
    name: &'a str,
    version: &'a str,
    status: ModuleStatus,
    phases: Vec<Phase>,
}

/// Writes a [`RunReport`] as pretty-printed JSON.
pub struct RunReportExporter<'a> {
    orchestrator: &'a Orchestrator,
    report: &'a RunReport,
}

impl<'a> RunReportExporter<'a> {
    #[must_use]
    pub fn new(orchestrator: &'a Orchestrator, report: &'a RunReport) -> Self {
        Self { orchestrator, report }
    }

    /// Serialize the report into `writer`.
    pub fn export<W: Write>(&self, mut writer: W) -> Result<(), ExportError> {
        let doc = ReportDoc {
            outcome: &self.report.outcome,
            steps: self
                .report
                .records
                .iter()
                .map(|r| StepDoc { module: &r.module, phase: r.phase, code: r.code })
                .collect(),
            modules: self
                .orchestrator
                .modules()
                .map(|m| ModuleDoc {
                    name: m.name,
                    version: m.version,
                    status: m.status,
                    phases: m.capabilities.iter().collect(),
                })
                .collect(),
        };
        serde_json::to_writer_pretty(&mut writer, &doc)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
