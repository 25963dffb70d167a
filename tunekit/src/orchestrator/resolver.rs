//! Declarative ordering constraints between module phases.
//!
//! Modules never see each other's registration order, which depends on who
//! requested which dependency first. [`Orchestrator::requires`] lets each
//! module declare, from its own `init`, where its steps must sit relative to
//! a prerequisite. The resolver is deliberately lazy: it mutates the
//! pipeline only when the current arrangement violates the constraint, so
//! any number of redundant calls converge without undoing a satisfied
//! constraint, and a repeated call is always a no-op.

use super::Orchestrator;
use crate::domain::{Order, Phase, ResolveError};
use log::{debug, warn};

/// What a `requires` call did to satisfy the constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The constraint already held; nothing changed.
    Unchanged,
    /// The dependent step was relocated.
    Moved,
    /// A fresh copy of the prerequisite step was inserted.
    Cloned,
    /// The named prerequisite is not registered and could not be loaded.
    /// Deliberately not an error: the calling module decides whether the
    /// missing dependency is fatal.
    DependencyUnavailable,
}

impl Orchestrator {
    /// Declare that module `a`'s phase `pa` needs the given relative
    /// position with respect to module `b`'s phase `pb`.
    ///
    /// `b == None` generalizes over whichever module owns the first step of
    /// phase `pb` (used for clone orders, `First`/`Last` anchors and
    /// wildcard availability checks).
    ///
    /// A prerequisite that is not registered yet is loaded and initialized
    /// on the spot; if that fails the call still succeeds and answers
    /// [`Resolution::DependencyUnavailable`].
    ///
    /// Must only be called before [`Orchestrator::run`] starts, normally
    /// from a module's `init` hook via
    /// [`InitContext::requires`](super::InitContext::requires).
    pub fn requires(
        &mut self,
        a: &str,
        pa: Phase,
        b: Option<&str>,
        pb: Phase,
        order: Order,
    ) -> Result<Resolution, ResolveError> {
        match order {
            Order::Before | Order::After if b.is_none() => {
                return Err(ResolveError::OrderNeedsModule { order });
            }
            Order::CloneBefore | Order::CloneAfter if b.is_some() => {
                return Err(ResolveError::OrderForbidsModule { order });
            }
            _ => {}
        }

        // Auto-dependency: inject a missing prerequisite mid-flight.
        if let Some(bname) = b {
            if !self.available(bname) {
                warn!("loading module {bname}, it is required by module {a}");
                if let Err(err) = self.load(bname) {
                    warn!("cannot load module {bname}, required by {a}: {err}");
                    return Ok(Resolution::DependencyUnavailable);
                }
                // The normal init walk already passed this module by, so
                // initialize it out of band.
                if let Err(err) = self.init_one(bname) {
                    warn!("cannot initialize module {bname}, required by {a}: {err}");
                    self.unload(bname);
                    return Ok(Resolution::DependencyUnavailable);
                }
            }
        }

        let sa = self.pipeline.position(a, pa);
        let sb = match b {
            Some(bname) => self.pipeline.position(bname, pb),
            None => self.pipeline.first_of_phase(pb),
        };

        let Some(xa) = sa else {
            return Err(ResolveError::PhaseNotAvailable {
                module: Some(a.to_string()),
                phase: pa,
            });
        };
        if b.is_some() && sb.is_none() {
            return Err(ResolveError::PhaseNotAvailable {
                module: b.map(str::to_string),
                phase: pb,
            });
        }

        let last = self.pipeline.len() - 1;
        let resolution = match (order, sb) {
            // b's step must come first; move a right behind it if not.
            (Order::Before, Some(xb)) => {
                if xb > xa {
                    debug!("reordering {a}/{pa}, it requires {}/{pb} first", b.unwrap_or("*"));
                    self.pipeline.move_after(xa, xb);
                    Resolution::Moved
                } else {
                    Resolution::Unchanged
                }
            }
            // b's step must come later; move a right in front of it if not.
            (Order::After, Some(xb)) => {
                if xb < xa {
                    debug!("reordering {a}/{pa}, it requires {}/{pb} after", b.unwrap_or("*"));
                    self.pipeline.move_before(xa, xb);
                    Resolution::Moved
                } else {
                    Resolution::Unchanged
                }
            }
            (Order::CloneBefore, Some(xb)) => {
                if xa > 0 && self.pipeline.step(xa - 1).phase() == pb {
                    Resolution::Unchanged
                } else {
                    debug!("cloning {pb} step in front of {a}/{pa}");
                    self.pipeline.clone_at(xb, xa);
                    Resolution::Cloned
                }
            }
            (Order::CloneAfter, Some(xb)) => {
                if xa < last && self.pipeline.step(xa + 1).phase() == pb {
                    Resolution::Unchanged
                } else {
                    debug!("cloning {pb} step behind {a}/{pa}");
                    self.pipeline.clone_at(xb, xa + 1);
                    Resolution::Cloned
                }
            }
            (Order::CloneBefore | Order::CloneAfter, None) => {
                return Err(ResolveError::PhaseNotAvailable { module: None, phase: pb });
            }
            (Order::First, _) => {
                if xa > 0 {
                    debug!("moving {a}/{pa} to the head of the pipeline");
                    self.pipeline.move_front(xa);
                    Resolution::Moved
                } else {
                    Resolution::Unchanged
                }
            }
            (Order::Last, _) => {
                if xa < last {
                    debug!("moving {a}/{pa} to the tail of the pipeline");
                    self.pipeline.move_back(xa);
                    Resolution::Moved
                } else {
                    Resolution::Unchanged
                }
            }
            (Order::Available, _) => Resolution::Unchanged,
            // Operand checks above guarantee b (and therefore sb, after
            // validation) for Before/After.
            (Order::Before | Order::After, None) => {
                return Err(ResolveError::OrderNeedsModule { order });
            }
        };
        Ok(resolution)
    }
}
