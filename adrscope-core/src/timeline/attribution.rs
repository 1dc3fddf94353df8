use crate::timeline::types::{AdrDecision, Setting, Timestamp};

/// Answers "which data rate / tx power was in force at time t" from a
/// device's ascending ADR decision history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingAttributor {
    baseline: Setting,
}

impl SettingAttributor {
    pub fn new(baseline: Setting) -> Self {
        Self { baseline }
    }

    /// The setting of the most recent decision at or before `at`.
    ///
    /// Before the first decision (or with no decisions at all) the baseline
    /// applies. A decision never expires, so the last one holds forever.
    pub fn setting_at(&self, decisions: &[AdrDecision], at: Timestamp) -> Setting {
        let committed = decisions.partition_point(|decision| decision.at <= at);
        match committed.checked_sub(1) {
            Some(latest) => decisions[latest].setting,
            None => self.baseline,
        }
    }

    /// The setting a device ends the run with.
    pub fn final_setting(&self, decisions: &[AdrDecision]) -> Setting {
        decisions
            .last()
            .map_or(self.baseline, |decision| decision.setting)
    }
}

impl Default for SettingAttributor {
    fn default() -> Self {
        Self::new(Setting::BASELINE)
    }
}
