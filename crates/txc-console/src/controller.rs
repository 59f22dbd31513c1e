//! Console controller: owns the UI state and drives a [`View`].
//!
//! Every operation runs to completion before the next one starts (`&mut self`),
//! so a slow response can never overwrite a newer interaction. Failures are
//! logged, shown through [`View::alert`] and returned; the UI mode is left as
//! it was.
use std::fmt::Display;

use tracing::{debug, error, info, instrument};
use txc_client::ExecutorApi;
use txc_model::{ExecutorForm, dlq_file_name};

use crate::{
    error::{ConsoleError, ConsoleResult},
    filter::StatusFilter,
    snake::to_snake_case,
    state::{ConsoleState, DEFAULT_PAGE_SIZE, UiMode},
    view::{FormView, TableView, View},
};

const CLEAR_DLQ_QUESTION: &str = "Are you sure you want to clear the DLQ?";

pub struct Console<A, V> {
    api: A,
    view: V,
    state: ConsoleState,
    form: Option<ExecutorForm>,
}

impl<A: ExecutorApi, V: View> Console<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self::with_page_size(api, view, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(api: A, view: V, page_size: usize) -> Self {
        Self {
            api,
            view,
            state: ConsoleState::new(page_size),
            form: None,
        }
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn mode(&self) -> &UiMode {
        &self.state.mode
    }

    pub fn form(&self) -> Option<&ExecutorForm> {
        self.form.as_ref()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    // ========================================================================
    // Table
    // ========================================================================

    /// Reload the executor list and redraw the table.
    ///
    /// On failure the table is drawn empty.
    #[instrument(level = "debug", skip_all)]
    pub async fn refresh(&mut self) -> ConsoleResult<()> {
        match self.api.fetch_executors().await {
            Ok(executors) => {
                debug!(count = executors.len(), "executors loaded");
                self.state.executors = executors;
                self.state.clamp_page();
                self.render_table();
                Ok(())
            }
            Err(e) => {
                self.state.executors.clear();
                self.state.page = 1;
                self.render_table();
                Err(self.fail("Failed to load executors", e))
            }
        }
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.state.filter = filter;
        self.state.page = 1;
        self.render_table();
    }

    /// Case-insensitive name search; resets to the first page.
    pub fn set_search(&mut self, query: &str) {
        self.state.query = query.to_lowercase();
        self.state.page = 1;
        self.render_table();
    }

    /// Jump to `page`, clamped to the available range.
    pub fn go_to_page(&mut self, page: usize) {
        self.state.page = page;
        self.state.clamp_page();
        self.render_table();
    }

    /// Returns `false` when already on the last page.
    pub fn next_page(&mut self) -> bool {
        if !self.state.page_info().has_next {
            return false;
        }
        self.state.page += 1;
        self.render_table();
        true
    }

    /// Returns `false` when already on the first page.
    pub fn prev_page(&mut self) -> bool {
        if !self.state.page_info().has_prev {
            return false;
        }
        self.state.page -= 1;
        self.render_table();
        true
    }

    // ========================================================================
    // Settings form
    // ========================================================================

    /// Load `name` and open its settings with the name locked.
    #[instrument(level = "debug", skip(self))]
    pub async fn open_executor(&mut self, name: &str) -> ConsoleResult<()> {
        let loaded = match self.api.get_executor(name).await {
            Ok(executor) => ExecutorForm::from_executor(&executor).map_err(ConsoleError::from),
            Err(e) => Err(e.into()),
        };
        let form = match loaded {
            Ok(form) => form,
            Err(e) => return Err(self.fail("Failed to load executor settings", e)),
        };

        self.leave_dlq();
        self.state.mode = UiMode::EditingExisting {
            name: name.to_string(),
        };
        self.form = Some(form);
        self.render_form();
        Ok(())
    }

    /// Open a blank form with an editable name.
    pub fn open_new(&mut self) {
        self.leave_dlq();
        self.state.mode = UiMode::AddingNew;
        self.form = Some(ExecutorForm::blank());
        self.render_form();
    }

    /// Name typed by the user, snake-cased as it arrives.
    pub fn set_name_input(&mut self, raw: &str) -> ConsoleResult<()> {
        if matches!(self.state.mode, UiMode::EditingExisting { .. }) {
            return Err(ConsoleError::NameLocked);
        }
        let form = self.form.as_mut().ok_or(ConsoleError::NoForm)?;
        form.name = to_snake_case(raw);
        self.render_form();
        Ok(())
    }

    /// Edit the open form and redraw it with a fresh retry preview.
    ///
    /// The name of an existing executor is restored after `edit` runs.
    pub fn form_mut<F>(&mut self, edit: F) -> ConsoleResult<()>
    where
        F: FnOnce(&mut ExecutorForm),
    {
        let form = self.form.as_mut().ok_or(ConsoleError::NoForm)?;
        edit(form);
        if let UiMode::EditingExisting { name } = &self.state.mode {
            form.name.clone_from(name);
        }
        self.render_form();
        Ok(())
    }

    /// Retry preview of the open form.
    pub fn retry_preview(&self) -> Option<String> {
        self.form.as_ref().map(ExecutorForm::retry_preview)
    }

    /// Validate the form, then create or update depending on the mode.
    ///
    /// On success the form closes and the list reloads. On failure the form
    /// stays open.
    #[instrument(level = "debug", skip_all)]
    pub async fn save(&mut self) -> ConsoleResult<()> {
        let Some(form) = self.form.as_ref() else {
            return Err(ConsoleError::NoForm);
        };
        let mut config = match form.to_config() {
            Ok(config) => config,
            Err(e) => return Err(self.fail("Failed to save executor settings", e)),
        };

        let saved = match &self.state.mode {
            UiMode::EditingExisting { name } => {
                config.name.clone_from(name);
                self.api.update_executor(name, &config).await
            }
            UiMode::AddingNew => self.api.create_executor(&config).await,
            _ => return Err(ConsoleError::NoForm),
        };

        match saved {
            Ok(executor) => {
                info!(executor = %executor.name, "executor settings saved");
                self.view.alert("Settings saved successfully");
                self.close_form();
                // The save went through; a failed reload is reported on its own.
                let _ = self.refresh().await;
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to save executor settings", e)),
        }
    }

    /// Discard the form without saving.
    pub fn cancel(&mut self) {
        if self.form.is_some() {
            self.close_form();
        }
    }

    fn close_form(&mut self) {
        self.form = None;
        self.state.mode = UiMode::Browsing;
        self.view.close_form();
    }

    // ========================================================================
    // Executor removal
    // ========================================================================

    /// Delete `name` after confirmation. Returns `false` if the user declined.
    #[instrument(level = "debug", skip(self))]
    pub async fn delete_executor(&mut self, name: &str) -> ConsoleResult<bool> {
        let question = format!("Are you sure you want to delete executor {name}?");
        if !self.view.confirm(&question) {
            debug!("delete declined");
            return Ok(false);
        }
        if let Err(e) = self.api.delete_executor(name).await {
            return Err(self.fail("Failed to delete executor", e));
        }

        info!(executor = %name, "executor deleted");
        self.view.alert("Executor deleted successfully");
        let _ = self.refresh().await;
        Ok(true)
    }

    // ========================================================================
    // Dead-letter queue
    // ========================================================================

    pub fn open_dlq(&mut self, executor: &str) {
        if self.form.is_some() {
            self.close_form();
        }
        self.state.mode = UiMode::ViewingDlq {
            executor: executor.to_string(),
        };
        self.view.open_dlq(executor);
    }

    pub fn close_dlq(&mut self) {
        if self.leave_dlq() {
            self.state.mode = UiMode::Browsing;
        }
    }

    /// Tell the view to drop the DLQ dialog if one is open.
    fn leave_dlq(&mut self) -> bool {
        let open = matches!(self.state.mode, UiMode::ViewingDlq { .. });
        if open {
            self.view.close_dlq();
        }
        open
    }

    /// Fetch the selected DLQ and hand it to the view as `{name}_dlq.json`.
    ///
    /// Returns the file name.
    #[instrument(level = "debug", skip_all)]
    pub async fn download_dlq(&mut self) -> ConsoleResult<String> {
        let executor = self.dlq_executor()?;
        let file_name = dlq_file_name(&executor);

        let written = match self.api.get_dlq_tasks(&executor).await {
            Ok(tasks) => serde_json::to_string_pretty(&tasks)
                .map_err(ConsoleError::from)
                .and_then(|body| {
                    self.view
                        .save_file(&file_name, &body)
                        .map_err(ConsoleError::from)
                }),
            Err(e) => Err(e.into()),
        };

        match written {
            Ok(()) => {
                info!(%executor, file = %file_name, "dlq downloaded");
                Ok(file_name)
            }
            Err(e) => Err(self.fail("Failed to download DLQ tasks", e)),
        }
    }

    /// Clear the selected DLQ after confirmation.
    ///
    /// Declining issues no request and returns `false`. On success the DLQ
    /// dialog closes; on failure it stays open.
    #[instrument(level = "debug", skip_all)]
    pub async fn clear_dlq(&mut self) -> ConsoleResult<bool> {
        let executor = self.dlq_executor()?;
        if !self.view.confirm(CLEAR_DLQ_QUESTION) {
            debug!(%executor, "dlq clear declined");
            return Ok(false);
        }
        if let Err(e) = self.api.clear_dlq(&executor).await {
            return Err(self.fail("Failed to clear DLQ", e));
        }

        info!(%executor, "dlq cleared");
        self.close_dlq();
        self.view.alert("DLQ cleared successfully");
        Ok(true)
    }

    fn dlq_executor(&self) -> ConsoleResult<String> {
        match &self.state.mode {
            UiMode::ViewingDlq { executor } => Ok(executor.clone()),
            _ => Err(ConsoleError::NoDlqSelected),
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    fn render_table(&mut self) {
        let table = TableView::from_state(&self.state);
        self.view.render_table(&table);
    }

    fn render_form(&mut self) {
        if let Some(form) = &self.form {
            let locked = matches!(self.state.mode, UiMode::EditingExisting { .. });
            self.view.open_form(&FormView::new(form, locked));
        }
    }

    /// Log and alert `context: err`, handing the error back to the caller.
    fn fail<E>(&mut self, context: &str, err: E) -> ConsoleError
    where
        E: Into<ConsoleError> + Display,
    {
        error!(error = %err, "{context}");
        self.view.alert(&format!("{context}: {err}"));
        err.into()
    }
}
