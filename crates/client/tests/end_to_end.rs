//! 업로드, 목록, 상세 화면 흐름 통합 테스트 (wiremock 백엔드)

use std::sync::Arc;

use serde_json::json;
use solaudit_client::messages;
use solaudit_client::{
    ClientConfig, ClientConfigBuilder, ContractUpload, DeleteOutcome, HttpReportStore,
    Notifications, ReportDetailView, ReportHistory, ReportService, Route, UploadForm,
    UploadWorkflow,
};
use solaudit_core::types::ReportId;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    server: MockServer,
    config: ClientConfig,
    store: Arc<HttpReportStore>,
    notes: Notifications,
}

impl Harness {
    async fn start() -> Self {
        let server = MockServer::start().await;
        let config = ClientConfigBuilder::new()
            .base_url(server.uri())
            .build()
            .unwrap();
        let store = Arc::new(HttpReportStore::new(&config).unwrap());
        Self {
            server,
            config,
            store,
            notes: Notifications::new(),
        }
    }

    fn upload_form(&self) -> UploadForm<HttpReportStore> {
        let workflow = UploadWorkflow::new(self.store.clone(), &self.config);
        UploadForm::new(workflow, Arc::new(self.notes.clone()))
    }

    fn history(&self) -> ReportHistory<HttpReportStore> {
        ReportHistory::new(
            ReportService::new(self.store.clone()),
            &self.config,
            Arc::new(self.notes.clone()),
        )
    }

    fn detail(&self, id: u64) -> ReportDetailView<HttpReportStore> {
        ReportDetailView::new(
            ReportService::new(self.store.clone()),
            ReportId::new(id),
            Arc::new(self.notes.clone()),
        )
    }

    async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }
}

fn summary_json(id: u64, name: &str, date: &str) -> serde_json::Value {
    json!({
        "report_id": id,
        "contract_name": name,
        "submission_date": date,
        "submission_time": "09:15 AM",
        "number_of_vulnerabilities": 1
    })
}

#[tokio::test]
async fn non_sol_upload_never_reaches_backend() {
    let harness = Harness::start().await;
    let mut form = harness.upload_form();
    form.select(ContractUpload::new("README.md", b"# hi".to_vec()));

    assert_eq!(form.submit().await, None);
    assert_eq!(form.error(), Some(messages::INVALID_EXTENSION));
    assert_eq!(harness.request_count().await, 0);
    assert!(harness.notes.snapshot().is_empty());
}

#[tokio::test]
async fn accepted_upload_navigates_to_new_report() {
    let harness = Harness::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_contract"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "report_id": 42 })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let mut form = harness.upload_form();
    form.select(ContractUpload::new("Token.sol", b"contract Token {}".to_vec()));

    let route = form.submit().await;
    assert_eq!(route, Some(Route::ReportDetail(ReportId::new(42))));
    assert_eq!(route.map(|r| r.path()), Some("/reports/42".to_owned()));
    assert!(!form.is_loading());

    let sent = harness.notes.snapshot();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].message, messages::UPLOAD_SUCCEEDED);
}

#[tokio::test]
async fn unprocessable_upload_stays_on_form() {
    let harness = Harness::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_contract"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&harness.server)
        .await;

    let mut form = harness.upload_form();
    form.select(ContractUpload::new("Token.sol", vec![0xff, 0xfe]));

    assert_eq!(form.submit().await, None);
    assert_eq!(form.error(), Some(messages::INVALID_ENCODING));
}

#[tokio::test]
async fn deleting_from_list_removes_row_without_reload() {
    let harness = Harness::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            summary_json(41, "Token.sol", "01-02-2024"),
            summary_json(42, "Vault.sol", "02-02-2024"),
        ])))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/reports/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Report deleted successfully"
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let mut history = harness.history();
    history.refresh().await;
    let ids: Vec<u64> = history.rows().iter().map(|r| r.report_id.get()).collect();
    assert_eq!(ids, vec![42, 41]);

    assert_eq!(history.delete(ReportId::new(42)).await, DeleteOutcome::Deleted);
    let ids: Vec<u64> = history.rows().iter().map(|r| r.report_id.get()).collect();
    assert_eq!(ids, vec![41]);

    let sent = harness.notes.snapshot();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].message, messages::REPORT_DELETED);
}

#[tokio::test]
async fn empty_backend_shows_no_reports_yet() {
    let harness = Harness::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detail": "No reports found"
        })))
        .mount(&harness.server)
        .await;

    let mut history = harness.history();
    history.refresh().await;
    assert_eq!(history.error(), Some(messages::NO_REPORTS_YET));
    assert!(history.rows().is_empty());
}

#[tokio::test]
async fn missing_report_detail_has_no_delete_control() {
    let harness = Harness::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detail": "Report not found"
        })))
        .mount(&harness.server)
        .await;

    let mut view = harness.detail(404);
    view.load().await;

    assert_eq!(view.error(), Some(messages::REPORT_NOT_FOUND));
    assert!(view.error().is_some_and(|m| m.starts_with("No reports found")));
    assert!(!view.shows_delete_control());
    assert!(view.document().is_none());
}

#[tokio::test]
async fn detail_delete_redirects_to_history() {
    let harness = Harness::start().await;
    let mut body = summary_json(9, "Auction.sol", "05-05-2024");
    body["number_of_vulnerabilities"] = json!(0);
    body["vulnerabilities_details"] = json!([]);
    Mock::given(method("GET"))
        .and(path("/reports/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&harness.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/reports/9"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&harness.server)
        .await;

    let mut view = harness.detail(9);
    view.load().await;
    let text = view.document().unwrap().to_string();
    assert!(text.contains(messages::NO_VULNERABILITIES));

    assert_eq!(view.delete().await, Some(Route::Reports));
    let sent = harness.notes.snapshot();
    assert!(sent[0].persistent);
}

#[tokio::test]
async fn unreachable_backend_shows_connectivity_message() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = ClientConfigBuilder::new()
        .base_url(format!("http://127.0.0.1:{port}"))
        .build()
        .unwrap();
    let store = Arc::new(HttpReportStore::new(&config).unwrap());

    let mut history = ReportHistory::new(
        ReportService::new(store.clone()),
        &config,
        Arc::new(Notifications::new()),
    );
    history.refresh().await;
    assert_eq!(history.error(), Some(messages::CONNECTIVITY));

    let workflow = UploadWorkflow::new(store, &config);
    let mut form = UploadForm::new(workflow, Arc::new(Notifications::new()));
    form.select(ContractUpload::new("Token.sol", Vec::new()));
    form.submit().await;
    assert_eq!(form.error(), Some(messages::CONNECTIVITY));
}
