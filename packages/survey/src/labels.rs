//! LCSI code labeling.

use lcsi_survey_models::{StrategyLabel, StrategyLabelTable};

/// Maps a raw LCSI code to its label. Missing codes and codes outside the
/// table have no label.
#[must_use]
pub fn label_for(code: Option<i64>, table: &StrategyLabelTable) -> Option<StrategyLabel> {
    code.and_then(|code| table.label(code))
}

/// Whether a labeled household used an emergency strategy.
#[must_use]
pub const fn is_emergency(label: Option<StrategyLabel>) -> bool {
    matches!(label, Some(StrategyLabel::Emergency))
}
