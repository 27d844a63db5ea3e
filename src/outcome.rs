//! Set outcome evaluation and the 1RM update it triggers.
//!
//! Per-set state machine:
//!
//! ```text
//! pending --(reps >= target)--> met
//! pending --(reps <  target)--> unmet
//! met     --(evaluate again)--> pending
//! unmet   --(evaluate again)--> pending
//! ```
//!
//! There is no direct edge between met and unmet.

use log::{debug, info};

use crate::config::EngineConfig;
use crate::domain::{LiftSession, OneRepMaxRecord, SetOutcome, SetRecord};
use crate::formulas::in_domain;

/// Evaluates a set against its target reps.
///
/// A pending set is decided by comparing reps to the target. A decided set
/// goes back to pending, which is how a mis-tap gets undone.
pub fn evaluate(set: &SetRecord, target_reps: u32) -> SetRecord {
    let outcome = match set.outcome {
        SetOutcome::Pending if set.reps >= target_reps => SetOutcome::Met,
        SetOutcome::Pending => SetOutcome::Unmet,
        SetOutcome::Met | SetOutcome::Unmet => SetOutcome::Pending,
    };
    set.with_outcome(outcome)
}

/// Result of evaluating one set inside a session.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeUpdate {
    pub session: LiftSession,
    pub record: OneRepMaxRecord,
    /// 1RM proposed by the set, when it turned met inside the formula domain.
    pub estimated_one_rm: Option<f64>,
    pub one_rm_raised: bool,
}

/// Applies [`evaluate`] to the set at `index` and propagates the result.
///
/// When the set transitions into met, carries weight, and its reps are in
/// 1..=36, a 1RM is estimated and written to the record if it beats the
/// stored value for the session's lift. Returns None if `index` is out of
/// range.
pub fn record_outcome(
    session: &LiftSession,
    index: usize,
    target_reps: u32,
    record: &OneRepMaxRecord,
    config: &EngineConfig,
) -> Option<OutcomeUpdate> {
    let set = session.sets().get(index)?;
    let evaluated = evaluate(set, target_reps);
    let session = session.replaced(index, evaluated)?;

    debug!(
        "{} set {}: {}/{} reps, {:?} -> {:?}",
        session.key,
        index + 1,
        evaluated.reps,
        target_reps,
        set.outcome,
        evaluated.outcome
    );

    let mut record = *record;
    let mut estimated_one_rm = None;
    let mut one_rm_raised = false;

    let became_met = set.outcome == SetOutcome::Pending && evaluated.outcome == SetOutcome::Met;
    if became_met && in_domain(evaluated.weight, evaluated.reps) {
        estimated_one_rm = config.formula.estimate(evaluated.weight, evaluated.reps);

        if let (Some(estimate), Some(lift)) = (estimated_one_rm, session.key.lift())
            && config.auto_raise_one_rm
        {
            let previous = record.get(lift);
            one_rm_raised = record.raise(lift, estimate);
            if one_rm_raised {
                info!("{} 1RM raised from {} to {}", lift, previous, estimate);
            }
        }
    }

    Some(OutcomeUpdate {
        session,
        record,
        estimated_one_rm,
        one_rm_raised,
    })
}

/// Evaluates every pending set of a session in order, then finalizes it.
///
/// Decided sets are left alone. Returns the stored session and the record
/// after all raises.
pub fn evaluate_session(
    session: &LiftSession,
    target_reps: u32,
    record: &OneRepMaxRecord,
    config: &EngineConfig,
) -> (LiftSession, OneRepMaxRecord) {
    let mut current = session.clone();
    let mut record = *record;

    for index in 0..session.sets().len() {
        if current.sets()[index].outcome.is_decided() {
            continue;
        }
        if let Some(update) = record_outcome(&current, index, target_reps, &record, config) {
            if let Some(estimate) = update.estimated_one_rm
                && !update.one_rm_raised
            {
                debug!("{} set {} estimates 1RM {}", current.key, index + 1, estimate);
            }
            current = update.session;
            record = update.record;
        }
    }

    (current.finalize(), record)
}
