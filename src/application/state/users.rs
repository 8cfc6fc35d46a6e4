//! Users area: the invite table plus per-row busy markers.

use std::collections::BTreeSet;

use crate::domain::InviteRecord;

use super::{Reducer, TableAction, TableState};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsersState {
    pub invites: TableState<InviteRecord>,
    /// Rows with a resend/cancel/remove in flight
    pub busy: BTreeSet<i64>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UsersAction {
    Table(TableAction<InviteRecord>),
    RowBusy(i64),
    RowDone { id: i64, message: Option<String> },
    InviteUpdated(InviteRecord),
    Removed(i64),
}

impl UsersState {
    pub fn new(page_size: u32) -> Self {
        Self {
            invites: TableState::new(page_size),
            ..Default::default()
        }
    }

    pub fn is_busy(&self, id: i64) -> bool {
        self.busy.contains(&id)
    }
}

impl Reducer for UsersState {
    type Action = UsersAction;

    fn reduce(&mut self, action: UsersAction) {
        match action {
            UsersAction::Table(action) => self.invites.reduce(action),
            UsersAction::RowBusy(id) => {
                self.busy.insert(id);
            }
            UsersAction::RowDone { id, message } => {
                self.busy.remove(&id);
                if message.is_some() {
                    self.notice = message;
                }
            }
            UsersAction::InviteUpdated(invite) => {
                if let Some(row) = self.invites.items.iter_mut().find(|r| r.id == invite.id) {
                    *row = invite;
                }
            }
            UsersAction::Removed(id) => {
                let before = self.invites.items.len();
                self.invites.items.retain(|r| r.id != id);
                if self.invites.items.len() < before {
                    self.invites.total = self.invites.total.saturating_sub(1);
                }
                self.invites.selected.remove(&id);
                self.busy.remove(&id);
            }
        }
    }
}
