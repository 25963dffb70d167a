//! Closed value sets shared across the orchestrator.
//!
//! Phases, ordering relations and result codes form the vocabulary that
//! modules, the pipeline and the execution driver agree on. All of them are
//! closed enumerations; extending any of them is an API change, not a
//! runtime event.

use serde::Serialize;
use std::fmt;

/// One step kind of the tuning workflow.
///
/// The declaration order is the conceptual workflow order and is advisory
/// only: the execution order is whatever the pipeline holds after dependency
/// resolution. `Undefined` exists for wildcard phase references in
/// dependency declarations and for steps that never ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Compile,
    Instrument,
    Measure,
    Analyze,
    Recommend,
    Undefined,
}

impl Phase {
    /// The five real phases in workflow order.
    pub const WORKFLOW: [Phase; 5] = [
        Phase::Compile,
        Phase::Instrument,
        Phase::Measure,
        Phase::Analyze,
        Phase::Recommend,
    ];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Compile => "compile",
            Phase::Instrument => "instrument",
            Phase::Measure => "measure",
            Phase::Analyze => "analyze",
            Phase::Recommend => "recommend",
            Phase::Undefined => "undefined",
        };
        f.write_str(name)
    }
}

/// Capability bitmask over the five real phases.
///
/// Snapshotted from [`Module::capabilities`](crate::module::Module::capabilities)
/// once at registration; the orchestrator never re-queries a module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseSet(u8);

impl PhaseSet {
    pub const EMPTY: PhaseSet = PhaseSet(0);

    fn bit(phase: Phase) -> u8 {
        match phase {
            Phase::Compile => 1 << 0,
            Phase::Instrument => 1 << 1,
            Phase::Measure => 1 << 2,
            Phase::Analyze => 1 << 3,
            Phase::Recommend => 1 << 4,
            // No capability bit: a module cannot implement "undefined"
            Phase::Undefined => 0,
        }
    }

    /// Build a set from a phase list.
    #[must_use]
    pub fn of(phases: &[Phase]) -> Self {
        phases.iter().fold(Self::EMPTY, |set, &p| set.with(p))
    }

    #[must_use]
    pub fn with(self, phase: Phase) -> Self {
        PhaseSet(self.0 | Self::bit(phase))
    }

    #[must_use]
    pub fn contains(self, phase: Phase) -> bool {
        let bit = Self::bit(phase);
        bit != 0 && self.0 & bit != 0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the contained phases in workflow order.
    pub fn iter(self) -> impl Iterator<Item = Phase> {
        Phase::WORKFLOW.into_iter().filter(move |&p| self.contains(p))
    }
}

/// Lifecycle status of a registered module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    Loaded,
    Initialized,
    Finalized,
}

/// Relative-ordering relation accepted by
/// [`Orchestrator::requires`](crate::orchestrator::Orchestrator::requires).
///
/// Input to the dependency resolver only; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// The prerequisite's step must run before the dependent step.
    Before,
    /// The prerequisite's step must run after the dependent step.
    After,
    /// Existence check only; never mutates the pipeline.
    Available,
    /// The dependent step must be the first step of the pipeline.
    First,
    /// The dependent step must be the last step of the pipeline.
    Last,
    /// Duplicate the first step of the given phase right before the
    /// dependent step.
    CloneBefore,
    /// Duplicate the first step of the given phase right after the
    /// dependent step.
    CloneAfter,
}

/// Result taxonomy returned by module hooks and recorded on pipeline steps.
///
/// The numeric CLI exit codes derived from these follow the original
/// tuning-tool convention (success 0, general error 1, informational stops
/// 2-4, fork error 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultCode {
    /// Initial status of a step that has not run, and the answer of a
    /// module asked to run a phase it never implemented.
    Undefined,
    Failure,
    Success,
    Error,
    /// The recommender ran out of recommendations.
    NoRecommendation,
    /// No known pattern matched the analyzed code.
    NoPattern,
    /// No transformation could be applied.
    NoTransformation,
    /// An external helper process could not be spawned.
    ForkError,
}

impl ResultCode {
    #[must_use]
    pub fn is_success(self) -> bool {
        self == ResultCode::Success
    }

    /// Abort-worthy codes: the driver stops the pipeline and reports a hard
    /// failure. `Undefined` is included because a phase hook returning it
    /// means a phase ran that its module never implemented.
    #[must_use]
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            ResultCode::Failure | ResultCode::Error | ResultCode::ForkError | ResultCode::Undefined
        )
    }

    /// Negative-but-informational codes: the driver stops the pipeline but
    /// the run still produces a partial report.
    #[must_use]
    pub fn is_informational(self) -> bool {
        matches!(
            self,
            ResultCode::NoRecommendation | ResultCode::NoPattern | ResultCode::NoTransformation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_set_contains_registered_phases() {
        let set = PhaseSet::of(&[Phase::Measure, Phase::Analyze]);
        assert!(set.contains(Phase::Measure));
        assert!(set.contains(Phase::Analyze));
        assert!(!set.contains(Phase::Compile));
    }

    #[test]
    fn test_phase_set_ignores_undefined() {
        let set = PhaseSet::EMPTY.with(Phase::Undefined);
        assert!(set.is_empty());
        assert!(!set.contains(Phase::Undefined));
    }

    #[test]
    fn test_phase_set_iterates_in_workflow_order() {
        let set = PhaseSet::of(&[Phase::Recommend, Phase::Compile, Phase::Measure]);
        let phases: Vec<Phase> = set.iter().collect();
        assert_eq!(phases, vec![Phase::Compile, Phase::Measure, Phase::Recommend]);
    }

    #[test]
    fn test_result_code_classification() {
        assert!(ResultCode::Success.is_success());
        assert!(ResultCode::Error.is_fatal());
        assert!(ResultCode::ForkError.is_fatal());
        assert!(ResultCode::Undefined.is_fatal());
        assert!(ResultCode::NoRecommendation.is_informational());
        assert!(!ResultCode::NoPattern.is_fatal());
    }
}
