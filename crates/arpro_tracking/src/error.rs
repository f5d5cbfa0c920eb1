//! Error types для tracking/reconcile

use thiserror::Error;

use crate::tracking::MarkerChange;

/// Recoverable ошибка одного события в batch
///
/// Upstream (AR runtime) не под нашим контролем — такие события
/// логируются и пропускаются, остальной batch применяется.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// Updated/Removed для marker без созданного instance
    #[error("{kind} event for marker '{marker}' without a registered instance")]
    NotRegistered { marker: String, kind: MarkerChange },

    /// Indicator table ссылается на slot, для которого нет handle
    #[error("indicator slot {slot} for marker '{marker}' is not attached")]
    MissingIndicator { marker: String, slot: usize },
}

/// Ошибка загрузки TrackingConfig
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("template #{index} has an empty name")]
    EmptyTemplateName { index: usize },

    #[error("indicator binding #{index} has an empty marker name")]
    EmptyIndicatorMarker { index: usize },
}
