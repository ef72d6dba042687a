//! Manual match edits

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::{MatchStatus, ReportTitle};

/// An edit a reviewer can make to one title's match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum MatchAction {
    /// Link the title to a knowledge-base entity
    Assign {
        #[serde(rename = "kbTitleId")]
        kb_title_id: String,
        #[serde(rename = "kbTitleName")]
        kb_title_name: String,
    },
    /// Mark the title as deliberately unmatched
    Ignore,
    /// Return an ignored title to the unmatched pool
    Unignore,
}

/// Discriminant of [`MatchAction`], used for menus and errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Assign,
    Ignore,
    Unignore,
}

/// Outcome tag carried by notifications (`action.edited`, `action.not-ignored`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTag {
    Edited,
    Ignored,
    Unignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot {action} a title that is {status}")]
pub struct IllegalAction {
    pub action: ActionKind,
    pub status: MatchStatus,
}

impl MatchAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            MatchAction::Assign { .. } => ActionKind::Assign,
            MatchAction::Ignore => ActionKind::Ignore,
            MatchAction::Unignore => ActionKind::Unignore,
        }
    }

    pub fn tag(&self) -> ActionTag {
        match self {
            MatchAction::Assign { .. } => ActionTag::Edited,
            MatchAction::Ignore => ActionTag::Ignored,
            MatchAction::Unignore => ActionTag::Unignored,
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ActionKind::Assign => "assign",
            ActionKind::Ignore => "ignore",
            ActionKind::Unignore => "unignore",
        };
        write!(f, "{}", label)
    }
}

impl ActionTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionTag::Edited => "edited",
            ActionTag::Ignored => "ignored",
            ActionTag::Unignored => "unignored",
        }
    }
}

/// Actions offered for a title in the given state.
///
/// Assigning is always possible; ignore and unignore toggle.
pub fn legal_actions(status: MatchStatus) -> &'static [ActionKind] {
    match status {
        MatchStatus::Matched | MatchStatus::Unmatched => &[ActionKind::Assign, ActionKind::Ignore],
        MatchStatus::Ignored => &[ActionKind::Assign, ActionKind::Unignore],
    }
}

/// Compute the edited copy of `title`; the input is left untouched.
pub fn apply_action(title: &ReportTitle, action: &MatchAction) -> Result<ReportTitle, IllegalAction> {
    let status = title.status();
    if !legal_actions(status).contains(&action.kind()) {
        return Err(IllegalAction {
            action: action.kind(),
            status,
        });
    }

    let mut edited = title.clone();
    match action {
        MatchAction::Assign {
            kb_title_id,
            kb_title_name,
        } => {
            edited.kb_manual_match = true;
            edited.kb_title_id = Some(kb_title_id.clone());
            edited.kb_title_name = Some(kb_title_name.clone());
        }
        MatchAction::Ignore => {
            edited.kb_manual_match = true;
            edited.kb_title_id = None;
            edited.kb_title_name = None;
        }
        MatchAction::Unignore => {
            edited.kb_manual_match = false;
        }
    }
    Ok(edited)
}
