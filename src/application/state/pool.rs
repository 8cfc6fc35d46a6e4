//! Pool area: mother accounts, quota and SKU summaries.

use crate::domain::{MotherAccount, QuotaSnapshot, SkuSummary};

use super::{Reducer, TableAction, TableState};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolState {
    pub mothers: TableState<MotherAccount>,
    pub quota: Option<QuotaSnapshot>,
    pub skus: Vec<SkuSummary>,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PoolAction {
    Mothers(TableAction<MotherAccount>),
    QuotaLoaded(QuotaSnapshot),
    SkusLoaded(Vec<SkuSummary>),
    /// Created or updated; inserted at the top if not on the page
    MotherSaved(MotherAccount),
    MotherDeleted(i64),
    Failed(String),
}

impl PoolState {
    pub fn new(page_size: u32) -> Self {
        Self {
            mothers: TableState::new(page_size),
            ..Default::default()
        }
    }

    pub fn available_seats(&self) -> u64 {
        self.quota.as_ref().map_or(0, |q| q.available_seats)
    }
}

impl Reducer for PoolState {
    type Action = PoolAction;

    fn reduce(&mut self, action: PoolAction) {
        match action {
            PoolAction::Mothers(action) => self.mothers.reduce(action),
            PoolAction::QuotaLoaded(quota) => self.quota = Some(quota),
            PoolAction::SkusLoaded(skus) => self.skus = skus,
            PoolAction::MotherSaved(mother) => {
                match self.mothers.items.iter_mut().find(|m| m.id == mother.id) {
                    Some(row) => *row = mother,
                    None => {
                        self.mothers.items.insert(0, mother);
                        self.mothers.total += 1;
                    }
                }
                self.last_error = None;
            }
            PoolAction::MotherDeleted(id) => {
                let before = self.mothers.items.len();
                self.mothers.items.retain(|m| m.id != id);
                if self.mothers.items.len() < before {
                    self.mothers.total = self.mothers.total.saturating_sub(1);
                }
                self.mothers.selected.remove(&id);
            }
            PoolAction::Failed(message) => self.last_error = Some(message),
        }
    }
}
