//! Render-callback boundary between the controller and a concrete front end.
use std::io;

use txc_model::{Executor, ExecutorForm};

use crate::{page::PageInfo, state::ConsoleState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    /// Whether the row offers the DLQ action.
    pub dlq_enabled: bool,
}

impl From<&Executor> for TableRow {
    fn from(e: &Executor) -> Self {
        Self {
            id: e.id.clone(),
            name: e.name.clone(),
            enabled: e.enabled,
            dlq_enabled: e.dlq_enabled(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableView {
    pub rows: Vec<TableRow>,
    pub page: PageInfo,
}

impl TableView {
    pub fn from_state(state: &ConsoleState) -> Self {
        Self {
            rows: state.page_rows().into_iter().map(TableRow::from).collect(),
            page: state.page_info(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FormView<'a> {
    pub title: String,
    pub form: &'a ExecutorForm,
    /// Existing executors cannot be renamed.
    pub name_locked: bool,
    /// DLQ queue-name input is shown only while the DLQ is enabled.
    pub dlq_visible: bool,
    pub retry_preview: String,
}

impl<'a> FormView<'a> {
    pub fn new(form: &'a ExecutorForm, name_locked: bool) -> Self {
        let title = if name_locked {
            format!("Settings for {}", form.name)
        } else {
            "Add executor".to_string()
        };
        Self {
            title,
            form,
            name_locked,
            dlq_visible: form.dlq_enabled,
            retry_preview: form.retry_preview(),
        }
    }
}

/// Front end driven by [`crate::Console`].
///
/// Calls arrive one at a time from the controller; implementations only draw
/// and collect answers, they never call back into the controller.
pub trait View {
    fn render_table(&mut self, table: &TableView);

    /// Show or refresh the settings form.
    fn open_form(&mut self, form: &FormView<'_>);

    fn close_form(&mut self);

    fn open_dlq(&mut self, executor: &str);

    fn close_dlq(&mut self);

    /// Blocking notification.
    fn alert(&mut self, message: &str);

    /// Blocking yes/no question.
    fn confirm(&mut self, question: &str) -> bool;

    /// Hand a generated file to the user.
    fn save_file(&mut self, file_name: &str, contents: &str) -> io::Result<()>;
}
