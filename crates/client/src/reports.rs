//! 리포트 조회/삭제 오케스트레이션과 목록 화면 상태
//!
//! [`ReportService`]는 저장소 호출을 감싸고 로그/메트릭을 남깁니다.
//! [`ReportHistory`]는 목록 화면이 소유하는 상태입니다:
//! 받아 온 리포트 목록, 검색/정렬 입력, 에러 문구, 로딩 플래그, 요청 세대.

use std::sync::Arc;

use metrics::counter;
use solaudit_core::metrics::REPORTS_DELETED_TOTAL;
use solaudit_core::types::{ReportDetail, ReportId, ReportSummary};
use tracing::{debug, error, info, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::generation::{RequestGeneration, RequestTicket};
use crate::loading::LoadingFlag;
use crate::messages;
use crate::notify::{Notification, Notifier};
use crate::search::SearchControls;
use crate::transport::ReportStore;

/// 저장소 호출 래퍼
pub struct ReportService<S: ReportStore> {
    store: Arc<S>,
}

impl<S: ReportStore> Clone for ReportService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ReportStore> ReportService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// 전체 리포트 목록
    pub async fn list_all(&self) -> Result<Vec<ReportSummary>, ClientError> {
        let reports = self.store.list_reports().await?;
        debug!(count = reports.len(), "reports fetched");
        Ok(reports)
    }

    /// 리포트 한 건
    pub async fn get_one(&self, id: ReportId) -> Result<ReportDetail, ClientError> {
        let detail = self.store.get_report(id).await?;
        debug!(
            report_id = %id,
            vulnerabilities = detail.summary.number_of_vulnerabilities,
            "report fetched"
        );
        Ok(detail)
    }

    /// 리포트를 삭제합니다.
    pub async fn delete_one(&self, id: ReportId) -> Result<(), ClientError> {
        self.store.delete_report(id).await?;
        counter!(REPORTS_DELETED_TOTAL).increment(1);
        info!(report_id = %id, "report deleted");
        Ok(())
    }
}

/// 목록 화면이 보관하는 리포트 모음
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportCollection {
    Loaded(Vec<ReportSummary>),
    /// 아직 받지 못했거나 조회에 실패함
    Unavailable,
}

/// 삭제 요청 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// 실패는 로그로만 남고 목록은 그대로입니다.
    Failed,
    /// 더 새로운 요청이 시작되어 결과를 버림
    Stale,
}

/// 리포트 목록 화면 상태
pub struct ReportHistory<S: ReportStore> {
    service: ReportService<S>,
    notifier: Arc<dyn Notifier>,
    pub controls: SearchControls,
    collection: ReportCollection,
    error: Option<&'static str>,
    loading: LoadingFlag,
    list_generation: RequestGeneration,
    delete_generation: RequestGeneration,
    /// 진행 중인 조회가 시작된 뒤 삭제에 성공한 리포트
    deleted_since_refresh: Vec<ReportId>,
}

impl<S: ReportStore> ReportHistory<S> {
    /// 검색/정렬 입력은 설정의 기본값으로 시작합니다.
    pub fn new(service: ReportService<S>, config: &ClientConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            controls: SearchControls::new(config.sort_field, config.sort_order),
            collection: ReportCollection::Unavailable,
            error: None,
            loading: LoadingFlag::new(),
            list_generation: RequestGeneration::new(),
            delete_generation: RequestGeneration::new(),
            deleted_since_refresh: Vec::new(),
        }
    }

    pub fn collection(&self) -> &ReportCollection {
        &self.collection
    }

    /// 표시할 에러 문구
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// 목록을 다시 받아 옵니다.
    pub async fn refresh(&mut self) -> bool {
        let ticket = self.begin_refresh();
        let result = {
            let _guard = self.loading.begin();
            self.service.list_all().await
        };
        self.apply_refresh(ticket, result)
    }

    /// 새 조회를 시작합니다. 이전에 발급된 조회 티켓은 모두 무효가 됩니다.
    pub fn begin_refresh(&mut self) -> RequestTicket {
        self.deleted_since_refresh.clear();
        self.list_generation.begin()
    }

    /// 조회 결과를 반영합니다. 오래된 티켓의 결과는 버리고 `false`를 돌려줍니다.
    ///
    /// 조회 도중 삭제된 리포트는 응답에 남아 있어도 제외합니다.
    pub fn apply_refresh(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<ReportSummary>, ClientError>,
    ) -> bool {
        if !self.list_generation.is_current(ticket) {
            debug!(generation = ticket.generation(), "discarding stale report list");
            return false;
        }
        match result {
            Ok(mut reports) => {
                reports.retain(|r| !self.deleted_since_refresh.contains(&r.report_id));
                self.collection = ReportCollection::Loaded(reports);
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch reports");
                self.collection = ReportCollection::Unavailable;
                self.error = Some(messages::list_failure(&e));
            }
        }
        true
    }

    /// 리포트를 삭제하고, 성공하면 목록에서 바로 제거합니다 (다시 조회하지 않음).
    pub async fn delete(&mut self, id: ReportId) -> DeleteOutcome {
        let ticket = self.begin_delete();
        let result = {
            let _guard = self.loading.begin();
            self.service.delete_one(id).await
        };
        self.apply_delete(ticket, id, result)
    }

    /// 새 삭제를 시작합니다. 이전 삭제 티켓만 무효가 되고 진행 중인 조회는 유지됩니다.
    pub fn begin_delete(&mut self) -> RequestTicket {
        self.delete_generation.begin()
    }

    /// 삭제 결과를 반영합니다.
    pub fn apply_delete(
        &mut self,
        ticket: RequestTicket,
        id: ReportId,
        result: Result<(), ClientError>,
    ) -> DeleteOutcome {
        if !self.delete_generation.is_current(ticket) {
            debug!(report_id = %id, "discarding stale delete result");
            return DeleteOutcome::Stale;
        }
        match result {
            Ok(()) => {
                self.deleted_since_refresh.push(id);
                if let ReportCollection::Loaded(reports) = &mut self.collection {
                    reports.retain(|r| r.report_id != id);
                }
                self.notifier
                    .notify(Notification::success(messages::REPORT_DELETED));
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!(report_id = %id, error = %e, "failed to delete report");
                DeleteOutcome::Failed
            }
        }
    }

    /// 현재 검색/정렬 입력을 적용한 행 목록. 목록이 없으면 빈 목록입니다.
    pub fn rows(&self) -> Vec<ReportSummary> {
        match &self.collection {
            ReportCollection::Loaded(reports) => self.controls.apply(reports),
            ReportCollection::Unavailable => Vec::new(),
        }
    }

    /// 표 대신 보여 줄 문구
    pub fn empty_message(&self) -> Option<&'static str> {
        if let Some(message) = self.error {
            return Some(message);
        }
        match &self.collection {
            ReportCollection::Loaded(_) if self.rows().is_empty() => {
                Some(messages::NO_MATCHING_REPORTS)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notifications;
    use crate::transport::{MockFailure, MockReportStore};
    use solaudit_core::types::{SortField, SortOrder};

    fn summary(id: u64, name: &str, date: &str) -> ReportSummary {
        ReportSummary {
            report_id: ReportId::new(id),
            contract_name: name.to_owned(),
            submission_date: date.to_owned(),
            submission_time: "10:00 AM".to_owned(),
            number_of_vulnerabilities: 1,
        }
    }

    fn sample() -> Vec<ReportSummary> {
        vec![
            summary(41, "Token.sol", "01-01-2024"),
            summary(42, "Vault.sol", "02-01-2024"),
            summary(43, "Auction.sol", "03-01-2024"),
        ]
    }

    fn ids(rows: &[ReportSummary]) -> Vec<u64> {
        rows.iter().map(|r| r.report_id.get()).collect()
    }

    fn history(store: MockReportStore) -> (ReportHistory<MockReportStore>, Arc<MockReportStore>, Notifications) {
        let store = Arc::new(store);
        let notes = Notifications::new();
        let history = ReportHistory::new(
            ReportService::new(store.clone()),
            &ClientConfig::default(),
            Arc::new(notes.clone()),
        );
        (history, store, notes)
    }

    #[tokio::test]
    async fn refresh_loads_newest_first() {
        let (mut history, store, _) = history(MockReportStore::new().with_reports(sample()));
        assert!(history.refresh().await);

        assert_eq!(store.list_calls(), 1);
        assert_eq!(ids(&history.rows()), vec![43, 42, 41]);
        assert_eq!(history.error(), None);
        assert_eq!(history.empty_message(), None);
        assert!(!history.is_loading());
    }

    #[tokio::test]
    async fn loading_flag_observed_during_refresh() {
        let store = Arc::new(MockReportStore::new());
        let mut history = ReportHistory::new(
            ReportService::new(store.clone()),
            &ClientConfig::default(),
            Arc::new(Notifications::new()),
        );
        let store = Arc::new(MockReportStore::new().observing(history.loading()));
        history.service = ReportService::new(store.clone());

        history.refresh().await;
        assert_eq!(store.loading_seen(), vec![true]);
        assert!(!history.is_loading());
    }

    #[tokio::test]
    async fn not_found_means_no_reports_yet() {
        let (mut history, _, _) = history(MockReportStore::new().failing_with(MockFailure::NotFound));
        history.refresh().await;

        assert_eq!(history.error(), Some(messages::NO_REPORTS_YET));
        assert_eq!(history.collection(), &ReportCollection::Unavailable);
        assert!(history.rows().is_empty());
        assert!(!history.is_loading());
    }

    #[tokio::test]
    async fn connectivity_and_other_failures() {
        let (mut history, _, _) =
            history(MockReportStore::new().failing_with(MockFailure::Connectivity));
        history.refresh().await;
        assert_eq!(history.error(), Some(messages::CONNECTIVITY));

        let (mut history, _, _) = history_with_status(500);
        history.refresh().await;
        assert_eq!(history.error(), Some(messages::FETCH_FAILED));
    }

    fn history_with_status(status: u16) -> (ReportHistory<MockReportStore>, Arc<MockReportStore>, Notifications) {
        history(MockReportStore::new().failing_with(MockFailure::Status(
            status,
            Some("server detail is not shown on list".to_owned()),
        )))
    }

    #[tokio::test]
    async fn controls_filter_and_sort_rows() {
        let (mut history, _, _) = history(MockReportStore::new().with_reports(sample()));
        history.refresh().await;

        history.controls.set_query("SOL");
        history.controls.select_field(SortField::ContractName);
        history.controls.select_order(SortOrder::Asc);
        assert_eq!(ids(&history.rows()), vec![43, 41, 42]);

        history.controls.set_query("nothing matches");
        assert!(history.rows().is_empty());
        assert_eq!(history.empty_message(), Some(messages::NO_MATCHING_REPORTS));
    }

    #[tokio::test]
    async fn configured_sort_defaults_apply() {
        let store = Arc::new(MockReportStore::new().with_reports(sample()));
        let config = ClientConfig {
            sort_field: SortField::ContractName,
            sort_order: SortOrder::Asc,
            ..ClientConfig::default()
        };
        let mut history = ReportHistory::new(
            ReportService::new(store),
            &config,
            Arc::new(Notifications::new()),
        );
        history.refresh().await;
        assert_eq!(ids(&history.rows()), vec![43, 41, 42]);
    }

    #[tokio::test]
    async fn delete_removes_row_without_refetch() {
        let (mut history, store, notes) = history(MockReportStore::new().with_reports(sample()));
        history.refresh().await;

        assert_eq!(history.delete(ReportId::new(42)).await, DeleteOutcome::Deleted);
        assert_eq!(ids(&history.rows()), vec![43, 41]);
        assert_eq!(store.list_calls(), 1);
        assert_eq!(store.delete_calls(), 1);

        let sent = notes.snapshot();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message, messages::REPORT_DELETED);
        assert!(!sent[0].persistent);
    }

    #[tokio::test]
    async fn failed_delete_keeps_row_and_stays_silent() {
        let (mut history, _, notes) = history(
            MockReportStore::new()
                .with_reports(sample())
                .failing_delete_with(MockFailure::Status(500, None)),
        );
        history.refresh().await;

        assert_eq!(history.delete(ReportId::new(42)).await, DeleteOutcome::Failed);
        assert_eq!(ids(&history.rows()), vec![43, 42, 41]);
        assert_eq!(history.error(), None);
        assert!(notes.snapshot().is_empty());
        assert!(!history.is_loading());
    }

    #[test]
    fn stale_list_response_is_discarded() {
        let (mut history, _, _) = history(MockReportStore::new());
        let first = history.begin_refresh();
        let second = history.begin_refresh();

        assert!(history.apply_refresh(second, Ok(sample())));
        assert!(!history.apply_refresh(first, Ok(Vec::new())));
        assert_eq!(history.rows().len(), 3);

        // 오래된 실패 응답도 상태를 덮어쓰지 않음
        assert!(!history.apply_refresh(first, Err(ClientError::Connectivity("reset".into()))));
        assert_eq!(history.error(), None);
    }

    #[test]
    fn list_in_flight_during_delete_still_applies_without_deleted_row() {
        let (mut history, _, notes) = history(MockReportStore::new());
        let list_ticket = history.begin_refresh();
        let delete_ticket = history.begin_delete();

        let outcome = history.apply_delete(delete_ticket, ReportId::new(42), Ok(()));
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(notes.snapshot().len(), 1);

        assert!(history.apply_refresh(list_ticket, Ok(sample())));
        assert_eq!(ids(&history.rows()), vec![43, 41]);
        assert_eq!(history.error(), None);
        assert_eq!(history.empty_message(), None);
    }

    #[test]
    fn newer_delete_invalidates_older_delete() {
        let (mut history, _, notes) = history(MockReportStore::new());
        let list_ticket = history.begin_refresh();
        assert!(history.apply_refresh(list_ticket, Ok(sample())));

        let first = history.begin_delete();
        let second = history.begin_delete();
        assert_eq!(
            history.apply_delete(second, ReportId::new(43), Ok(())),
            DeleteOutcome::Deleted
        );
        assert_eq!(
            history.apply_delete(first, ReportId::new(41), Ok(())),
            DeleteOutcome::Stale
        );
        assert_eq!(ids(&history.rows()), vec![42, 41]);
        assert_eq!(notes.snapshot().len(), 1);
    }

    #[test]
    fn unavailable_collection_yields_no_rows() {
        let (history, _, _) = history(MockReportStore::new());
        assert!(history.rows().is_empty());
        assert_eq!(history.empty_message(), None);
    }

    #[tokio::test]
    async fn service_get_one_propagates_not_found() {
        let store = Arc::new(MockReportStore::new());
        let service = ReportService::new(store.clone());
        let err = service.get_one(ReportId::new(9)).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(store.get_calls(), 1);
    }
}
