//! Navigation target of the presentation layer.

use serde::{Deserialize, Serialize};

/// Which screen the presentation layer shows.
///
/// Mostly a navigation concern. It lives in the state because completed
/// operations switch it (create → proposals, analyze → analysis, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActiveView {
    #[default]
    Proposals,
    CreateDraft,
    Analysis,
    Recommendations,
}
