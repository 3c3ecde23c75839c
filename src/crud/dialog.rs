use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FlowError;
use crate::records::RecordId;

/// Which modal is open, and for which record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "id")]
pub enum DialogState {
    #[default]
    Closed,
    Creating,
    Editing(RecordId),
    Viewing(RecordId),
    ConfirmingDelete(RecordId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "id")]
pub enum DialogAction {
    Add,
    Edit(RecordId),
    View(RecordId),
    Delete(RecordId),
    Submit,
    Confirm,
    Cancel,
    /// Click outside or escape.
    CloseAll,
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::Closed)
    }

    /// Record the open dialog is about, if any.
    pub fn subject(&self) -> Option<&RecordId> {
        match self {
            DialogState::Editing(id)
            | DialogState::Viewing(id)
            | DialogState::ConfirmingDelete(id) => Some(id),
            DialogState::Closed | DialogState::Creating => None,
        }
    }

    /// Whether a form draft belongs to this state.
    pub fn has_form(&self) -> bool {
        matches!(self, DialogState::Creating | DialogState::Editing(_))
    }

    pub fn reduce(&self, action: &DialogAction) -> Result<DialogState, FlowError> {
        use DialogAction as A;
        use DialogState as S;

        let next = match (self, action) {
            (_, A::CloseAll) => S::Closed,

            (S::Closed, A::Add) => S::Creating,
            (S::Closed, A::Edit(id)) => S::Editing(id.clone()),
            (S::Closed, A::View(id)) => S::Viewing(id.clone()),
            (S::Closed, A::Delete(id)) => S::ConfirmingDelete(id.clone()),

            (S::Creating, A::Submit | A::Cancel) => S::Closed,
            (S::Editing(_), A::Submit | A::Cancel) => S::Closed,
            (S::Viewing(_), A::Cancel) => S::Closed,
            (S::ConfirmingDelete(_), A::Confirm | A::Cancel) => S::Closed,

            (state, action) => {
                return Err(FlowError::InvalidTransition {
                    state: state.clone(),
                    action: action.clone(),
                })
            }
        };
        Ok(next)
    }
}

impl fmt::Display for DialogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogState::Closed => f.write_str("closed"),
            DialogState::Creating => f.write_str("creating"),
            DialogState::Editing(id) => write!(f, "editing {}", id),
            DialogState::Viewing(id) => write!(f, "viewing {}", id),
            DialogState::ConfirmingDelete(id) => write!(f, "confirming delete of {}", id),
        }
    }
}

impl fmt::Display for DialogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogAction::Add => f.write_str("add"),
            DialogAction::Edit(id) => write!(f, "edit {}", id),
            DialogAction::View(id) => write!(f, "view {}", id),
            DialogAction::Delete(id) => write!(f, "delete {}", id),
            DialogAction::Submit => f.write_str("submit"),
            DialogAction::Confirm => f.write_str("confirm"),
            DialogAction::Cancel => f.write_str("cancel"),
            DialogAction::CloseAll => f.write_str("close all"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> RecordId {
        RecordId::from("1")
    }

    #[test]
    fn opening_actions_only_from_closed() {
        let closed = DialogState::Closed;
        assert_eq!(closed.reduce(&DialogAction::Add).unwrap(), DialogState::Creating);
        assert_eq!(
            closed.reduce(&DialogAction::Edit(id())).unwrap(),
            DialogState::Editing(id())
        );
        assert_eq!(
            closed.reduce(&DialogAction::View(id())).unwrap(),
            DialogState::Viewing(id())
        );
        assert_eq!(
            closed.reduce(&DialogAction::Delete(id())).unwrap(),
            DialogState::ConfirmingDelete(id())
        );

        let err = DialogState::Creating
            .reduce(&DialogAction::Edit(id()))
            .unwrap_err();
        assert!(matches!(err, FlowError::InvalidTransition { .. }));
    }

    #[test]
    fn every_state_closes_on_close_all() {
        let states = [
            DialogState::Closed,
            DialogState::Creating,
            DialogState::Editing(id()),
            DialogState::Viewing(id()),
            DialogState::ConfirmingDelete(id()),
        ];
        for state in states {
            assert_eq!(state.reduce(&DialogAction::CloseAll).unwrap(), DialogState::Closed);
        }
    }

    #[test]
    fn viewing_has_no_submit() {
        let err = DialogState::Viewing(id())
            .reduce(&DialogAction::Submit)
            .unwrap_err();
        assert_eq!(err.to_string(), "cannot submit while viewing 1");
    }

    #[test]
    fn confirm_only_applies_to_delete() {
        assert!(DialogState::Editing(id()).reduce(&DialogAction::Confirm).is_err());
        assert_eq!(
            DialogState::ConfirmingDelete(id())
                .reduce(&DialogAction::Confirm)
                .unwrap(),
            DialogState::Closed
        );
    }

    #[test]
    fn subject_tracks_record_states() {
        assert_eq!(DialogState::Creating.subject(), None);
        assert_eq!(DialogState::ConfirmingDelete(id()).subject(), Some(&id()));
        assert!(DialogState::Editing(id()).has_form());
        assert!(!DialogState::Viewing(id()).has_form());
    }
}
