//! Compile-phase module that drives an external `make`.
//!
//! Options (all optional):
//! - `target=<name>`: make target, may be given more than once
//! - `directory=<path>`: passed as `make -C <path>`

use crate::domain::{Phase, PhaseSet, ResultCode};
use crate::module::Module;
use crate::orchestrator::InitContext;
use log::{debug, warn};
use std::process::Command;

#[derive(Default)]
pub struct MakeModule {
    targets: Vec<String>,
    directory: Option<String>,
}

impl MakeModule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arguments handed to `make`, in invocation order.
    fn make_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(dir) = &self.directory {
            args.push("-C".to_string());
            args.push(dir.clone());
        }
        args.extend(self.targets.iter().cloned());
        args
    }

    /// Parse one accumulated `--key=value` option.
    fn apply_option(&mut self, option: &str) -> ResultCode {
        let Some(body) = option.strip_prefix("--") else {
            warn!("make: malformed option [{option}]");
            return ResultCode::Error;
        };
        match body.split_once('=') {
            Some(("target", value)) => self.targets.push(value.to_string()),
            Some(("directory", value)) => self.directory = Some(value.to_string()),
            _ => {
                warn!("make: unknown option [{option}]");
                return ResultCode::Error;
            }
        }
        ResultCode::Success
    }
}

impl Module for MakeModule {
    fn version(&self) -> &str {
        "1.0.0"
    }

    fn load(&mut self) -> ResultCode {
        ResultCode::Success
    }

    fn init(&mut self, ctx: &mut InitContext<'_>) -> ResultCode {
        for option in ctx.options() {
            let code = self.apply_option(option);
            if !code.is_success() {
                return code;
            }
        }
        debug!("make: targets {:?}", self.targets);
        ResultCode::Success
    }

    fn fini(&mut self) -> ResultCode {
        ResultCode::Success
    }

    fn capabilities(&self) -> PhaseSet {
        PhaseSet::of(&[Phase::Compile])
    }

    fn run_phase(&mut self, phase: Phase) -> ResultCode {
        if phase != Phase::Compile {
            return ResultCode::Undefined;
        }
        let mut command = Command::new("make");
        command.args(self.make_args());
        debug!("make: running {command:?}");
        match command.status() {
            Err(err) => {
                warn!("make: cannot spawn ({err})");
                ResultCode::ForkError
            }
            Ok(status) if status.success() => ResultCode::Success,
            Ok(status) => {
                warn!("make: exited with {status}");
                ResultCode::Error
            }
        }
    }
}
