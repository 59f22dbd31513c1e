use txc_model::Executor;

use crate::{
    filter::{StatusFilter, filter_executors},
    page::{PageInfo, paginate, pagination_info},
};

/// Rows per table page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Which surface of the console is active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum UiMode {
    /// Table only.
    #[default]
    Browsing,
    /// Settings form for an existing executor; the name is locked.
    EditingExisting { name: String },
    /// Blank settings form for a new executor.
    AddingNew,
    /// DLQ dialog for one executor.
    ViewingDlq { executor: String },
}

/// Everything the table rendering depends on.
#[derive(Clone, Debug)]
pub struct ConsoleState {
    pub page: usize,
    pub page_size: usize,
    pub filter: StatusFilter,
    pub query: String,
    pub mode: UiMode,
    pub executors: Vec<Executor>,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ConsoleState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            filter: StatusFilter::All,
            query: String::new(),
            mode: UiMode::Browsing,
            executors: Vec::new(),
        }
    }

    /// Executors passing the current filter and search.
    pub fn visible(&self) -> Vec<&Executor> {
        filter_executors(&self.executors, self.filter, &self.query)
    }

    pub fn page_info(&self) -> PageInfo {
        pagination_info(self.page, self.page_size, self.visible().len())
    }

    /// Rows of the current page.
    pub fn page_rows(&self) -> Vec<&Executor> {
        let visible = self.visible();
        let info = pagination_info(self.page, self.page_size, visible.len());
        paginate(&visible, &info).to_vec()
    }

    /// Pull `page` back into range after the list shrank.
    pub fn clamp_page(&mut self) {
        self.page = self.page_info().page;
    }
}
