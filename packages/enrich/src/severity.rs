//! Severity tier assignment.
//!
//! A record's tier comes from the first rule in [`SEVERITY_RULES`] whose
//! predicate matches. Records matching no rule are [`SeverityTier::Minor`].

use crash_map_crash_models::{CrashRecord, SeverityTier};

/// `MOST_SEVERE_INJURY` value for a fatal crash.
pub const FATAL_INJURY: &str = "FATAL";

/// `MOST_SEVERE_INJURY` value for an incapacitating injury.
pub const INCAPACITATING_INJURY: &str = "INCAPACITATING INJURY";

/// `DAMAGE` bracket counted as property damage.
pub const DAMAGE_OVER_THRESHOLD: &str = "OVER $1,500";

/// A severity rule: the tier assigned when the predicate matches.
pub type SeverityRule = (fn(&CrashRecord) -> bool, SeverityTier);

/// Ordered severity rules, most severe first.
pub const SEVERITY_RULES: &[SeverityRule] = &[
    (is_fatal, SeverityTier::Fatal),
    (is_incapacitating, SeverityTier::Severe),
    (has_injuries, SeverityTier::Injury),
    (is_damage_over_threshold, SeverityTier::PropertyDamage),
];

fn is_fatal(record: &CrashRecord) -> bool {
    record.most_severe_injury.as_deref() == Some(FATAL_INJURY)
}

fn is_incapacitating(record: &CrashRecord) -> bool {
    record.most_severe_injury.as_deref() == Some(INCAPACITATING_INJURY)
}

fn has_injuries(record: &CrashRecord) -> bool {
    record.injuries_total.is_some_and(|n| n > 0.0)
}

fn is_damage_over_threshold(record: &CrashRecord) -> bool {
    record.damage.as_deref() == Some(DAMAGE_OVER_THRESHOLD)
}

/// Assigns a severity tier to a crash record.
#[must_use]
pub fn classify(record: &CrashRecord) -> SeverityTier {
    SEVERITY_RULES
        .iter()
        .find(|(matches, _)| matches(record))
        .map_or(SeverityTier::Minor, |(_, tier)| *tier)
}
