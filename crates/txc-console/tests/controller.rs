use std::{
    collections::VecDeque,
    io,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde_json::{Value, json};
use txc_client::{ClientError, ClientResult, ExecutorApi};
use txc_console::{Console, ConsoleError, FormView, StatusFilter, TableView, UiMode, View};
use txc_model::{
    DlqConfig, Executor, ExecutorConfig, RetryKind, RetryPolicy, WriteConcern, WriteConcernLevel,
};

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Backend {
    executors: Vec<Executor>,
    dlq: Value,
    calls: Vec<String>,
    fail_next: Option<ClientError>,
}

#[derive(Clone, Default)]
struct FakeApi(Arc<Mutex<Backend>>);

impl FakeApi {
    fn with(executors: Vec<Executor>) -> Self {
        let api = Self::default();
        api.0.lock().unwrap().executors = executors;
        api
    }

    fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().calls.clone()
    }

    fn fail_next(&self, status: u16, body: &str) {
        self.0.lock().unwrap().fail_next = Some(ClientError::Status {
            status,
            body: body.into(),
        });
    }

    fn record(&self, call: String) -> ClientResult<std::sync::MutexGuard<'_, Backend>> {
        let mut b = self.0.lock().unwrap();
        b.calls.push(call);
        match b.fail_next.take() {
            Some(e) => Err(e),
            None => Ok(b),
        }
    }
}

fn not_found(name: &str) -> ClientError {
    ClientError::Status {
        status: 404,
        body: format!("executor {name} not found"),
    }
}

#[async_trait]
impl ExecutorApi for FakeApi {
    async fn fetch_executors(&self) -> ClientResult<Vec<Executor>> {
        Ok(self.record("list".into())?.executors.clone())
    }

    async fn create_executor(&self, config: &ExecutorConfig) -> ClientResult<Executor> {
        let mut b = self.record(format!("create {}", config.name))?;
        let executor = executor_with(config.clone(), b.executors.len());
        b.executors.push(executor.clone());
        Ok(executor)
    }

    async fn update_executor(&self, name: &str, config: &ExecutorConfig) -> ClientResult<Executor> {
        let mut b = self.record(format!("update {name}"))?;
        let slot = b
            .executors
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| not_found(name))?;
        slot.enabled = config.enabled;
        slot.config = Some(config.clone());
        Ok(slot.clone())
    }

    async fn get_executor(&self, name: &str) -> ClientResult<Executor> {
        let b = self.record(format!("get {name}"))?;
        b.executors
            .iter()
            .find(|e| e.name == name)
            .cloned()
            .ok_or_else(|| not_found(name))
    }

    async fn delete_executor(&self, name: &str) -> ClientResult<Value> {
        let mut b = self.record(format!("delete {name}"))?;
        b.executors.retain(|e| e.name != name);
        Ok(Value::Null)
    }

    async fn get_dlq_tasks(&self, name: &str) -> ClientResult<Value> {
        Ok(self.record(format!("get_dlq {name}"))?.dlq.clone())
    }

    async fn clear_dlq(&self, name: &str) -> ClientResult<Value> {
        let mut b = self.record(format!("clear_dlq {name}"))?;
        b.dlq = json!([]);
        Ok(Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Table(Vec<String>),
    Form { title: String, name: String, locked: bool, dlq_visible: bool },
    CloseForm,
    OpenDlq(String),
    CloseDlq,
    Alert(String),
    Confirm(String),
    Saved(String, String),
}

#[derive(Default)]
struct RecordingView {
    events: Vec<Event>,
    answers: VecDeque<bool>,
}

impl RecordingView {
    fn answering(answers: &[bool]) -> Self {
        Self {
            events: Vec::new(),
            answers: answers.iter().copied().collect(),
        }
    }

    fn alerts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Alert(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    fn last_table(&self) -> Option<&Vec<String>> {
        self.events.iter().rev().find_map(|e| match e {
            Event::Table(names) => Some(names),
            _ => None,
        })
    }
}

impl View for RecordingView {
    fn render_table(&mut self, table: &TableView) {
        self.events
            .push(Event::Table(table.rows.iter().map(|r| r.name.clone()).collect()));
    }

    fn open_form(&mut self, form: &FormView<'_>) {
        self.events.push(Event::Form {
            title: form.title.clone(),
            name: form.form.name.clone(),
            locked: form.name_locked,
            dlq_visible: form.dlq_visible,
        });
    }

    fn close_form(&mut self) {
        self.events.push(Event::CloseForm);
    }

    fn open_dlq(&mut self, executor: &str) {
        self.events.push(Event::OpenDlq(executor.into()));
    }

    fn close_dlq(&mut self) {
        self.events.push(Event::CloseDlq);
    }

    fn alert(&mut self, message: &str) {
        self.events.push(Event::Alert(message.into()));
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.events.push(Event::Confirm(question.into()));
        self.answers.pop_front().unwrap_or(false)
    }

    fn save_file(&mut self, file_name: &str, contents: &str) -> io::Result<()> {
        self.events
            .push(Event::Saved(file_name.into(), contents.into()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn config(name: &str, enabled: bool, dlq: bool) -> ExecutorConfig {
    ExecutorConfig {
        name: name.into(),
        enabled,
        write_concern: Some(WriteConcern::from(WriteConcernLevel::Majority)),
        retry_policy: Some(RetryPolicy::new(
            RetryKind::Linear,
            3,
            std::time::Duration::from_secs(2),
        )),
        dlq_config: Some(if dlq {
            DlqConfig::enabled(format!("{name}_dlq"))
        } else {
            DlqConfig::disabled()
        }),
    }
}

fn executor_with(config: ExecutorConfig, id: usize) -> Executor {
    Executor {
        id: format!("id-{id}"),
        name: config.name.clone(),
        enabled: config.enabled,
        config: Some(config),
        created_at: None,
        updated_at: None,
    }
}

fn fleet(n: usize) -> Vec<Executor> {
    (0..n)
        .map(|i| executor_with(config(&format!("worker_{i:02}"), i % 3 != 0, i % 2 == 0), i))
        .collect()
}

async fn console(
    executors: Vec<Executor>,
    answers: &[bool],
) -> (Console<FakeApi, RecordingView>, FakeApi) {
    let api = FakeApi::with(executors);
    let mut console = Console::new(api.clone(), RecordingView::answering(answers));
    console.refresh().await.unwrap();
    (console, api)
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refresh_renders_first_page() {
    let (console, _) = console(fleet(45), &[]).await;

    let table = console.view().last_table().unwrap();
    assert_eq!(table.len(), 20);
    assert_eq!(table[0], "worker_00");

    let info = console.state().page_info();
    assert_eq!((info.start, info.end, info.total), (1, 20, 45));
    assert!(!info.has_prev && info.has_next);
}

#[tokio::test]
async fn paging_stops_at_the_edges() {
    let (mut console, _) = console(fleet(45), &[]).await;

    assert!(!console.prev_page());
    assert!(console.next_page());
    assert!(console.next_page());
    assert!(!console.next_page());

    let info = console.state().page_info();
    assert_eq!((info.page, info.start, info.end), (3, 41, 45));
    assert_eq!(console.view().last_table().unwrap().len(), 5);
}

#[tokio::test]
async fn filter_and_search_reset_to_first_page() {
    let (mut console, _) = console(fleet(45), &[]).await;
    console.next_page();

    console.set_status_filter(StatusFilter::Disabled);
    assert_eq!(console.state().page, 1);
    // Every third worker is disabled: 0, 3, .., 42.
    assert_eq!(console.view().last_table().unwrap().len(), 15);
    assert!(!console.next_page());

    console.set_search("WORKER_1");
    assert_eq!(console.state().page, 1);
    assert_eq!(
        console.view().last_table().unwrap(),
        &vec!["worker_12".to_string(), "worker_15".into(), "worker_18".into()]
    );
}

#[tokio::test]
async fn failed_list_alerts_and_renders_empty_table() {
    let api = FakeApi::with(fleet(3));
    api.fail_next(503, "unavailable");
    let mut console = Console::new(api, RecordingView::default());

    let err = console.refresh().await.unwrap_err();

    assert!(matches!(err, ConsoleError::Client(ClientError::Status { status: 503, .. })));
    assert_eq!(console.view().alerts(), ["Failed to load executors: 503 unavailable"]);
    assert!(console.view().last_table().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Settings form
// ---------------------------------------------------------------------------

#[tokio::test]
async fn edit_existing_locks_name_and_updates_by_name() {
    let (mut console, api) = console(fleet(2), &[]).await;

    console.open_executor("worker_01").await.unwrap();
    assert_eq!(
        console.mode(),
        &UiMode::EditingExisting {
            name: "worker_01".into()
        }
    );
    let form = console.form().unwrap();
    assert_eq!(form.retry_type, "linear");
    assert_eq!(form.max_attempts, "3");
    assert_eq!(form.interval_ms, "2000");
    assert_eq!(form.write_concern, "majority");

    assert!(matches!(
        console.set_name_input("renamed"),
        Err(ConsoleError::NameLocked)
    ));
    console
        .form_mut(|f| {
            f.name = "sneaky".into();
            f.retry_type = "exponential".into();
            f.max_attempts.clear();
        })
        .unwrap();
    assert_eq!(console.form().unwrap().name, "worker_01");

    console.save().await.unwrap();

    assert_eq!(api.calls(), ["list", "get worker_01", "update worker_01", "list"]);
    assert_eq!(console.mode(), &UiMode::Browsing);
    assert!(console.form().is_none());
    assert!(console.view().alerts().contains(&"Settings saved successfully"));

    let stored = api.0.lock().unwrap().executors[1].clone();
    let retry = stored.config.unwrap().retry_policy.unwrap();
    assert_eq!(retry.kind, RetryKind::Exponential);
    assert!(retry.is_unlimited());
}

#[tokio::test]
async fn add_new_snake_cases_name_and_creates() {
    let (mut console, api) = console(Vec::new(), &[]).await;

    console.open_new();
    assert_eq!(console.mode(), &UiMode::AddingNew);
    console.set_name_input("Payment Processor (EU)").unwrap();
    assert_eq!(console.form().unwrap().name, "payment_processor_eu");

    console
        .form_mut(|f| {
            f.dlq_enabled = true;
            f.dlq_queue_name = "payments_dlq".into();
        })
        .unwrap();
    assert!(matches!(
        console.view().events.last(),
        Some(Event::Form { locked: false, dlq_visible: true, .. })
    ));

    console.save().await.unwrap();

    assert_eq!(api.calls(), ["list", "create payment_processor_eu", "list"]);
    assert_eq!(
        console.view().last_table().unwrap(),
        &vec!["payment_processor_eu".to_string()]
    );
}

#[tokio::test]
async fn invalid_form_is_not_sent_and_stays_open() {
    let (mut console, api) = console(Vec::new(), &[]).await;
    console.open_new();
    console
        .form_mut(|f| {
            f.name = "x".into();
            f.interval_ms = "0".into();
        })
        .unwrap();

    let err = console.save().await.unwrap_err();

    assert!(matches!(err, ConsoleError::Model(_)));
    assert_eq!(api.calls(), ["list"]);
    assert_eq!(console.mode(), &UiMode::AddingNew);
    assert!(console.view().alerts()[0].starts_with("Failed to save executor settings: "));
}

#[tokio::test]
async fn failed_update_keeps_drawer_open() {
    let (mut console, api) = console(fleet(1), &[]).await;
    console.open_executor("worker_00").await.unwrap();
    api.fail_next(500, "write failed");

    console.save().await.unwrap_err();

    assert_eq!(
        console.mode(),
        &UiMode::EditingExisting {
            name: "worker_00".into()
        }
    );
    assert!(console.form().is_some());
    assert_eq!(
        console.view().alerts(),
        ["Failed to save executor settings: 500 write failed"]
    );
}

#[tokio::test]
async fn missing_executor_keeps_browsing() {
    let (mut console, _) = console(fleet(1), &[]).await;

    console.open_executor("ghost").await.unwrap_err();

    assert_eq!(console.mode(), &UiMode::Browsing);
    assert_eq!(
        console.view().alerts(),
        ["Failed to load executor settings: 404 executor ghost not found"]
    );
}

#[tokio::test]
async fn cancel_discards_form() {
    let (mut console, api) = console(fleet(1), &[]).await;
    console.open_new();
    console.set_name_input("draft").unwrap();

    console.cancel();

    assert_eq!(console.mode(), &UiMode::Browsing);
    assert!(console.form().is_none());
    assert_eq!(console.view().events.last(), Some(&Event::CloseForm));
    assert_eq!(api.calls(), ["list"]);
}

#[tokio::test]
async fn preview_follows_form_edits() {
    let (mut console, _) = console(Vec::new(), &[]).await;
    assert!(console.retry_preview().is_none());

    console.open_new();
    console
        .form_mut(|f| {
            f.retry_type = "linear".into();
            f.max_attempts = "4".into();
            f.interval_ms = "500".into();
        })
        .unwrap();

    let preview = console.retry_preview().unwrap();
    assert!(preview.contains("500ms"));
    assert!(preview.contains("Up to 4 attempts"));
}

// ---------------------------------------------------------------------------
// Dead-letter queue
// ---------------------------------------------------------------------------

#[tokio::test]
async fn declined_clear_issues_no_request() {
    let (mut console, api) = console(fleet(1), &[false]).await;
    console.open_dlq("worker_00");

    let cleared = console.clear_dlq().await.unwrap();

    assert!(!cleared);
    assert_eq!(api.calls(), ["list"]);
    assert_eq!(
        console.mode(),
        &UiMode::ViewingDlq {
            executor: "worker_00".into()
        }
    );
}

#[tokio::test]
async fn opening_a_form_closes_the_dlq_dialog() {
    let (mut console, _) = console(fleet(2), &[]).await;
    let closes = |c: &Console<FakeApi, RecordingView>| {
        c.view().events.iter().filter(|e| **e == Event::CloseDlq).count()
    };

    console.open_dlq("worker_00");
    console.open_new();
    assert_eq!(closes(&console), 1);
    assert_eq!(console.mode(), &UiMode::AddingNew);

    console.cancel();
    console.open_dlq("worker_00");
    console.open_executor("worker_01").await.unwrap();
    assert_eq!(closes(&console), 2);

    console.close_dlq();
    assert_eq!(closes(&console), 2);
}

#[tokio::test]
async fn failed_open_keeps_the_dlq_dialog() {
    let (mut console, _) = console(fleet(1), &[]).await;
    console.open_dlq("worker_00");

    console.open_executor("ghost").await.unwrap_err();

    assert!(matches!(console.mode(), UiMode::ViewingDlq { .. }));
    assert!(!console.view().events.contains(&Event::CloseDlq));
}

#[tokio::test]
async fn confirmed_clear_closes_dialog() {
    let (mut console, api) = console(fleet(1), &[true]).await;
    console.open_dlq("worker_00");

    assert!(console.clear_dlq().await.unwrap());

    assert_eq!(api.calls(), ["list", "clear_dlq worker_00"]);
    assert_eq!(console.mode(), &UiMode::Browsing);
    let tail: Vec<_> = console.view().events.iter().rev().take(3).cloned().collect();
    assert_eq!(
        tail,
        [
            Event::Alert("DLQ cleared successfully".into()),
            Event::CloseDlq,
            Event::Confirm("Are you sure you want to clear the DLQ?".into()),
        ]
    );
}

#[tokio::test]
async fn failed_clear_keeps_dialog_open() {
    let (mut console, api) = console(fleet(1), &[true]).await;
    console.open_dlq("worker_00");
    api.fail_next(500, "");

    console.clear_dlq().await.unwrap_err();

    assert!(matches!(console.mode(), UiMode::ViewingDlq { .. }));
    assert_eq!(console.view().alerts(), ["Failed to clear DLQ: 500 "]);
}

#[tokio::test]
async fn download_saves_pretty_json_named_after_executor() {
    let (mut console, api) = console(fleet(1), &[]).await;
    api.0.lock().unwrap().dlq = json!([{ "taskId": "t1", "attempts": 5 }]);
    console.open_dlq("worker_00");

    let file = console.download_dlq().await.unwrap();

    assert_eq!(file, "worker_00_dlq.json");
    let Some(Event::Saved(name, body)) = console.view().events.last() else {
        panic!("nothing saved");
    };
    assert_eq!(name, "worker_00_dlq.json");
    assert!(body.contains('\n'));
    assert_eq!(
        serde_json::from_str::<Value>(body).unwrap(),
        json!([{ "taskId": "t1", "attempts": 5 }])
    );
}

#[tokio::test]
async fn dlq_actions_need_a_selected_executor() {
    let (mut console, api) = console(fleet(1), &[true]).await;

    assert!(matches!(
        console.download_dlq().await,
        Err(ConsoleError::NoDlqSelected)
    ));
    assert!(matches!(
        console.clear_dlq().await,
        Err(ConsoleError::NoDlqSelected)
    ));
    assert_eq!(api.calls(), ["list"]);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_requires_confirmation() {
    let (mut console, api) = console(fleet(2), &[false, true]).await;

    assert!(!console.delete_executor("worker_00").await.unwrap());
    assert_eq!(api.calls(), ["list"]);

    assert!(console.delete_executor("worker_00").await.unwrap());
    assert_eq!(api.calls(), ["list", "delete worker_00", "list"]);
    assert_eq!(
        console.view().last_table().unwrap(),
        &vec!["worker_01".to_string()]
    );
}
