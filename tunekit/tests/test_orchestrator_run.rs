//! Execution driver behavior: lifecycle transitions, abort vs. stop
//! semantics, teardown collection and report export.

use tunekit::domain::{ModuleStatus, Phase, PhaseSet, ResultCode, RunError};
use tunekit::export::RunReportExporter;
use tunekit::library::{ModuleLibrary, StaticSource};
use tunekit::module::Module;
use tunekit::orchestrator::{InitContext, Orchestrator, RunOutcome};

/// Module with scripted result codes for each hook.
struct Scripted {
    phases: &'static [Phase],
    init_code: ResultCode,
    run_code: ResultCode,
    fini_code: ResultCode,
}

impl Scripted {
    fn ok(phases: &'static [Phase]) -> Self {
        Self {
            phases,
            init_code: ResultCode::Success,
            run_code: ResultCode::Success,
            fini_code: ResultCode::Success,
        }
    }
}

impl Module for Scripted {
    fn version(&self) -> &str {
        "1.0.0"
    }
    fn load(&mut self) -> ResultCode {
        ResultCode::Success
    }
    fn init(&mut self, _ctx: &mut InitContext<'_>) -> ResultCode {
        self.init_code
    }
    fn fini(&mut self) -> ResultCode {
        self.fini_code
    }
    fn capabilities(&self) -> PhaseSet {
        PhaseSet::of(self.phases)
    }
    fn run_phase(&mut self, _phase: Phase) -> ResultCode {
        self.run_code
    }
}

fn orchestrator_with<F>(register: F) -> Orchestrator
where
    F: FnOnce(&mut StaticSource),
{
    let mut source = StaticSource::new();
    register(&mut source);
    let mut library = ModuleLibrary::new();
    library.push_source(Box::new(source));
    Orchestrator::new(library)
}

#[test]
fn test_lifecycle_statuses_advance() {
    let mut orch = orchestrator_with(|s| {
        s.register("probe", || Box::new(Scripted::ok(&[Phase::Measure])));
    });
    orch.load("probe").unwrap();
    assert_eq!(orch.module_status("probe"), Some(ModuleStatus::Loaded));
    orch.init_all().unwrap();
    assert_eq!(orch.module_status("probe"), Some(ModuleStatus::Initialized));
    orch.run().unwrap();
    assert!(orch.fini_all().is_empty());
    assert_eq!(orch.module_status("probe"), Some(ModuleStatus::Finalized));
}

#[test]
fn test_init_failure_aborts_the_run() {
    let mut orch = orchestrator_with(|s| {
        s.register("good", || Box::new(Scripted::ok(&[Phase::Measure])));
        s.register("bad", || {
            Box::new(Scripted {
                init_code: ResultCode::Error,
                ..Scripted::ok(&[Phase::Analyze])
            })
        });
    });
    orch.load("good").unwrap();
    orch.load("bad").unwrap();
    let err = orch.init_all().unwrap_err();
    assert!(matches!(err, RunError::InitFailed { code: ResultCode::Error, .. }));
}

#[test]
fn test_run_requires_initialized_modules() {
    let mut orch = orchestrator_with(|s| {
        s.register("probe", || Box::new(Scripted::ok(&[Phase::Measure])));
    });
    orch.load("probe").unwrap();
    let err = orch.run().unwrap_err();
    assert!(matches!(err, RunError::NotInitialized { .. }));
}

#[test]
fn test_fatal_code_aborts_remaining_steps() {
    let mut orch = orchestrator_with(|s| {
        s.register("make", || {
            Box::new(Scripted { run_code: ResultCode::ForkError, ..Scripted::ok(&[Phase::Compile]) })
        });
        s.register("probe", || Box::new(Scripted::ok(&[Phase::Measure])));
    });
    orch.load("make").unwrap();
    orch.load("probe").unwrap();
    orch.init_all().unwrap();

    let err = orch.run().unwrap_err();
    assert!(matches!(
        err,
        RunError::StepFailed { phase: Phase::Compile, code: ResultCode::ForkError, .. }
    ));
    // The failing step's status is recorded; the skipped step never ran.
    assert_eq!(orch.pipeline().step(0).status(), ResultCode::ForkError);
    assert_eq!(orch.pipeline().step(1).status(), ResultCode::Undefined);
}

#[test]
fn test_informational_code_stops_with_partial_report() {
    let mut orch = orchestrator_with(|s| {
        s.register("recommender", || {
            Box::new(Scripted {
                run_code: ResultCode::NoRecommendation,
                ..Scripted::ok(&[Phase::Recommend])
            })
        });
        s.register("probe", || Box::new(Scripted::ok(&[Phase::Measure])));
    });
    // probe first, recommender second.
    orch.load("recommender").unwrap();
    orch.load("probe").unwrap();
    orch.init_all().unwrap();

    let report = orch.run().unwrap();
    assert_eq!(report.records.len(), 2);
    assert_eq!(
        report.outcome,
        RunOutcome::Stopped {
            module: "recommender".to_string(),
            phase: Phase::Recommend,
            code: ResultCode::NoRecommendation,
        }
    );
}

#[test]
fn test_fini_errors_are_collected_not_fatal() {
    let mut orch = orchestrator_with(|s| {
        s.register("flaky", || {
            Box::new(Scripted { fini_code: ResultCode::Error, ..Scripted::ok(&[Phase::Measure]) })
        });
        s.register("solid", || Box::new(Scripted::ok(&[Phase::Analyze])));
    });
    orch.load("flaky").unwrap();
    orch.load("solid").unwrap();
    orch.init_all().unwrap();
    orch.run().unwrap();

    let errors = orch.fini_all();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].name, "flaky");
    // The solid module still finalized.
    assert_eq!(orch.module_status("solid"), Some(ModuleStatus::Finalized));
    assert_eq!(orch.module_status("flaky"), Some(ModuleStatus::Initialized));
}

#[test]
fn test_report_export_round_trips_through_a_file() {
    let mut orch = orchestrator_with(|s| {
        s.register("probe", || Box::new(Scripted::ok(&[Phase::Measure, Phase::Analyze])));
    });
    orch.load("probe").unwrap();
    orch.init_all().unwrap();
    let report = orch.run().unwrap();

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("report.json");
    let file = std::fs::File::create(&path).expect("create report file");
    RunReportExporter::new(&orch, &report).export(file).expect("export report");

    let content = std::fs::read_to_string(&path).expect("read report back");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("valid JSON");
    assert_eq!(parsed["outcome"]["status"], "completed");
    assert_eq!(parsed["steps"].as_array().map(Vec::len), Some(2));
    assert_eq!(parsed["modules"][0]["name"], "probe");
    assert_eq!(parsed["modules"][0]["phases"][0], "measure");
}
