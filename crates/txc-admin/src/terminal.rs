//! Plain-text [`View`] for the command line.
//!
//! Table and form renders are kept until [`TerminalView::present`] so that a
//! command prints only its final screen. Alerts and prompts go to stderr
//! immediately.
use std::{
    fmt::Write as _,
    fs,
    io::{self, BufRead, Stderr, StdinLock, Stdout, Write},
    path::PathBuf,
};

use tracing::{debug, warn};
use txc_console::{FormView, TableView, View};

pub struct TerminalView<O = Stdout, E = Stderr, I = StdinLock<'static>> {
    out: O,
    err: E,
    input: I,
    download_dir: PathBuf,
    assume_yes: bool,
    table: Option<String>,
    form: Option<String>,
}

impl TerminalView {
    pub fn stdio(download_dir: PathBuf) -> Self {
        Self::new(io::stdout(), io::stderr(), io::stdin().lock(), download_dir)
    }
}

impl<O: Write, E: Write, I: BufRead> TerminalView<O, E, I> {
    pub fn new(out: O, err: E, input: I, download_dir: PathBuf) -> Self {
        Self {
            out,
            err,
            input,
            download_dir,
            assume_yes: false,
            table: None,
            form: None,
        }
    }

    /// Answer every confirmation with yes.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    pub fn set_download_dir(&mut self, dir: PathBuf) {
        self.download_dir = dir;
    }

    /// Print the last table and the open form, if any.
    pub fn present(&mut self) -> io::Result<()> {
        if let Some(table) = &self.table {
            self.out.write_all(table.as_bytes())?;
        }
        if let Some(form) = &self.form {
            self.out.write_all(form.as_bytes())?;
        }
        self.out.flush()
    }

    fn say(&mut self, line: &str) {
        if let Err(e) = writeln!(self.err, "{line}") {
            warn!(error = %e, "failed to write to stderr");
        }
    }
}

impl<O: Write, E: Write, I: BufRead> View for TerminalView<O, E, I> {
    fn render_table(&mut self, table: &TableView) {
        self.table = Some(table_text(table));
    }

    fn open_form(&mut self, form: &FormView<'_>) {
        self.form = Some(form_text(form));
    }

    fn close_form(&mut self) {
        self.form = None;
    }

    fn open_dlq(&mut self, executor: &str) {
        debug!(executor, "dlq selected");
    }

    fn close_dlq(&mut self) {}

    fn alert(&mut self, message: &str) {
        self.say(message);
    }

    fn confirm(&mut self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        if write!(self.err, "{question} [y/N] ").and_then(|_| self.err.flush()).is_err() {
            return false;
        }
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                warn!(error = %e, "failed to read confirmation");
                false
            }
        }
    }

    fn save_file(&mut self, file_name: &str, contents: &str) -> io::Result<()> {
        fs::create_dir_all(&self.download_dir)?;
        let path = self.download_dir.join(file_name);
        fs::write(&path, contents)?;
        writeln!(self.out, "wrote {}", path.display())
    }
}

pub fn table_text(table: &TableView) -> String {
    let mut text = String::new();
    if table.rows.is_empty() {
        text.push_str("No executors found\n");
        return text;
    }

    let name_w = table.rows.iter().map(|r| r.name.len()).max().unwrap_or(0).max(4);
    let id_w = table.rows.iter().map(|r| r.id.len()).max().unwrap_or(0).max(2);

    let _ = writeln!(text, "{:<name_w$}  {:<id_w$}  {:<8}  DLQ", "NAME", "ID", "STATUS");
    for row in &table.rows {
        let status = if row.enabled { "enabled" } else { "disabled" };
        let dlq = if row.dlq_enabled { "yes" } else { "-" };
        let _ = writeln!(text, "{:<name_w$}  {:<id_w$}  {status:<8}  {dlq}", row.name, row.id);
    }

    let page = &table.page;
    let _ = writeln!(
        text,
        "Showing {}-{} of {} (page {}/{})",
        page.start,
        page.end,
        page.total,
        page.page,
        page.last_page()
    );
    text
}

pub fn form_text(view: &FormView<'_>) -> String {
    let form = view.form;
    let mut text = String::new();

    let _ = writeln!(text, "{}", view.title);
    let _ = writeln!(text, "  name:           {}", form.name);
    let _ = writeln!(text, "  enabled:        {}", if form.enabled { "yes" } else { "no" });
    let _ = writeln!(text, "  retry type:     {}", form.retry_type);
    let max = if form.max_attempts.trim().is_empty() {
        "unlimited"
    } else {
        form.max_attempts.as_str()
    };
    let _ = writeln!(text, "  max attempts:   {max}");
    let _ = writeln!(text, "  interval (ms):  {}", form.interval_ms);
    if view.dlq_visible {
        let _ = writeln!(text, "  dlq:            enabled (queue: {})", form.dlq_queue_name);
    } else {
        let _ = writeln!(text, "  dlq:            disabled");
    }
    let _ = writeln!(text, "  write concern:  {}", form.write_concern);
    let _ = writeln!(text, "  {}", view.retry_preview);
    text
}
