//! Shared table slice used by every domain container.

use std::collections::BTreeSet;

use crate::domain::{PageQuery, Paginated};

use super::Reducer;

#[derive(Debug, Clone, PartialEq)]
pub struct TableState<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub query: PageQuery,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: BTreeSet<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableAction<T> {
    /// New query; page/filters changed
    QueryChanged(PageQuery),
    LoadStarted,
    Loaded(Paginated<T>),
    LoadFailed(String),
    ToggleSelected(i64),
    SelectAll(Vec<i64>),
    ClearSelection,
}

impl<T> TableState<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            query: PageQuery::new(1, page_size),
            loading: false,
            error: None,
            selected: BTreeSet::new(),
        }
    }

    pub fn selected_ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }
}

impl<T> Default for TableState<T> {
    fn default() -> Self {
        Self::new(crate::domain::DEFAULT_PAGE_SIZE)
    }
}

impl<T> Reducer for TableState<T> {
    type Action = TableAction<T>;

    fn reduce(&mut self, action: TableAction<T>) {
        match action {
            TableAction::QueryChanged(query) => {
                self.query = query;
                self.selected.clear();
            }
            TableAction::LoadStarted => {
                self.loading = true;
            }
            TableAction::Loaded(page) => {
                self.loading = false;
                self.error = None;
                self.total = page.pagination.total;
                self.query.page = page.pagination.page;
                self.items = page.items;
            }
            TableAction::LoadFailed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            TableAction::ToggleSelected(id) => {
                if !self.selected.remove(&id) {
                    self.selected.insert(id);
                }
            }
            TableAction::SelectAll(ids) => {
                self.selected = ids.into_iter().collect();
            }
            TableAction::ClearSelection => self.selected.clear(),
        }
    }
}
