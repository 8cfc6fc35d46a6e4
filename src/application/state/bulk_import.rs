//! Bulk import of mother accounts.
//!
//! ```text
//! Idle ─Begin─▶ Loading ─Loaded(text)─▶ Validated ─Start─▶ Importing ─Finished─▶ Completed
//!                  │                                           │
//!                  └──────────────Failed(msg)──────────────────┴──▶ Failed
//! ```
//!
//! Input is one account per line, `email[,seat_limit[,notes]]`. Blank lines
//! and `#` comments are skipped. Only rows that pass validation are sent.

use std::collections::HashSet;

use validator::Validate;

use crate::application::client::ApiError;
use crate::application::dto::{BatchResult, MotherInput};
use crate::application::services::AdminService;

use super::Reducer;

/// Seat limit used when a line omits it
pub const DEFAULT_SEAT_LIMIT: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based line number in the pasted text
    pub line: usize,
    pub raw: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportPreview {
    pub valid: Vec<MotherInput>,
    pub rejected: Vec<RejectedLine>,
}

impl ImportPreview {
    pub fn can_import(&self) -> bool {
        !self.valid.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ImportPhase {
    #[default]
    Idle,
    Loading,
    Validated(ImportPreview),
    Importing {
        preview: ImportPreview,
    },
    Completed {
        preview: ImportPreview,
        result: BatchResult,
    },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportAction {
    Begin,
    Loaded(String),
    Start,
    Finished(BatchResult),
    Failed(String),
    Reset,
}

impl ImportPhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Validated(_) => "validated",
            Self::Importing { .. } => "importing",
            Self::Completed { .. } => "completed",
            Self::Failed(_) => "failed",
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Loading | Self::Importing { .. })
    }
}

impl Reducer for ImportPhase {
    type Action = ImportAction;

    fn reduce(&mut self, action: ImportAction) {
        let current = std::mem::take(self);
        *self = match (current, action) {
            (_, ImportAction::Reset) => Self::Idle,
            (
                Self::Idle | Self::Validated(_) | Self::Completed { .. } | Self::Failed(_),
                ImportAction::Begin,
            ) => Self::Loading,
            (Self::Loading, ImportAction::Loaded(text)) => {
                Self::Validated(parse_import(&text, DEFAULT_SEAT_LIMIT))
            }
            (Self::Validated(preview), ImportAction::Start) if preview.can_import() => {
                Self::Importing { preview }
            }
            (Self::Importing { preview }, ImportAction::Finished(result)) => {
                Self::Completed { preview, result }
            }
            (Self::Loading | Self::Importing { .. }, ImportAction::Failed(message)) => {
                Self::Failed(message)
            }
            (current, action) => {
                tracing::debug!(phase = current.name(), ?action, "Ignoring import action");
                current
            }
        };
    }
}

/// Parse and validate pasted import text.
pub fn parse_import(text: &str, default_seat_limit: u32) -> ImportPreview {
    let mut preview = ImportPreview::default();
    let mut seen = HashSet::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let reject = |reason: String| RejectedLine {
            line,
            raw: trimmed.to_string(),
            reason,
        };

        let mut fields = trimmed.splitn(3, ',').map(str::trim);
        let name = fields.next().unwrap_or_default().to_lowercase();

        let seat_limit = match fields.next().filter(|s| !s.is_empty()) {
            None => default_seat_limit,
            Some(value) => match value.parse::<u32>() {
                Ok(limit) => limit,
                Err(_) => {
                    preview
                        .rejected
                        .push(reject(format!("Seat limit '{}' is not a number", value)));
                    continue;
                }
            },
        };

        let notes = fields
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let input = MotherInput {
            name,
            seat_limit,
            group_id: None,
            notes,
        };

        if let Err(errors) = input.validate() {
            preview.rejected.push(reject(errors.to_string()));
            continue;
        }

        if !seen.insert(input.name.clone()) {
            preview
                .rejected
                .push(reject(format!("Duplicate account {}", input.name)));
            continue;
        }

        preview.valid.push(input);
    }

    preview
}

/// Drive a validated import through the backend.
pub async fn run_import(
    service: &dyn AdminService,
    phase: &mut ImportPhase,
) -> Result<BatchResult, ApiError> {
    if !matches!(phase, ImportPhase::Validated(_)) {
        return Err(ApiError::Invalid(format!(
            "Cannot start an import while {}",
            phase.name()
        )));
    }
    phase.reduce(ImportAction::Start);
    let items = match phase {
        ImportPhase::Importing { preview } => preview.valid.clone(),
        _ => return Err(ApiError::Invalid("Nothing valid to import".into())),
    };

    match service.import_mothers(items).await {
        Ok(result) => {
            phase.reduce(ImportAction::Finished(result.clone()));
            Ok(result)
        }
        Err(err) => {
            phase.reduce(ImportAction::Failed(err.user_message()));
            Err(err)
        }
    }
}
