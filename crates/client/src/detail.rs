//! 리포트 상세 화면 상태와 렌더러
//!
//! [`ReportDetailView`]는 리포트 한 건을 받아 오고 삭제하며,
//! [`ReportDetailView::document`]는 받아 온 리포트를 터미널에 출력할
//! [`DetailDocument`]로 바꿉니다.

use std::fmt;
use std::sync::Arc;

use solaudit_core::types::{ReportDetail, ReportId, Vulnerability, VulnerabilityResult};
use tracing::{debug, error, warn};

use crate::error::ClientError;
use crate::generation::{RequestGeneration, RequestTicket};
use crate::loading::LoadingFlag;
use crate::markup::{self, LineBreaks, LinkPolicy};
use crate::messages;
use crate::notify::{Notification, Notifier};
use crate::reports::ReportService;
use crate::route::Route;
use crate::transport::ReportStore;

const FIELD_INDENT: &str = "  ";

/// 이름과 값 한 쌍
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

impl DetailField {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// 분석 결과 한 건
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultBlock {
    pub heading: String,
    pub fields: Vec<DetailField>,
}

/// 취약점 한 건
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VulnerabilityBlock {
    pub heading: String,
    pub fields: Vec<DetailField>,
    pub results: Vec<ResultBlock>,
}

/// 출력용 상세 리포트
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailDocument {
    pub title: String,
    pub summary: Vec<DetailField>,
    pub no_vulnerabilities: bool,
    pub vulnerabilities: Vec<VulnerabilityBlock>,
}

impl DetailDocument {
    pub const SUMMARY_HEADING: &'static str = "Report Details";
    pub const FINDINGS_HEADING: &'static str = "Detected Vulnerability Details";

    /// 리포트를 출력용 문서로 변환합니다.
    pub fn from_report(report: &ReportDetail) -> Self {
        let summary = &report.summary;
        Self {
            title: format!("Detail Report {}", summary.report_id),
            summary: vec![
                DetailField::new("Contract Name", summary.contract_name.as_str()),
                DetailField::new("Submission Date", summary.submission_date.as_str()),
                DetailField::new("Submission Time", summary.submission_time.as_str()),
                DetailField::new(
                    "Number of vulnerabilities",
                    summary.number_of_vulnerabilities.to_string(),
                ),
            ],
            no_vulnerabilities: report.has_no_vulnerabilities(),
            vulnerabilities: report
                .vulnerabilities_details
                .iter()
                .enumerate()
                .map(|(i, v)| vulnerability_block(i + 1, v))
                .collect(),
        }
    }
}

fn metadata(text: &str) -> String {
    markup::render(text, LinkPolicy::Clickable, LineBreaks::Soft)
}

fn vulnerability_block(number: usize, v: &Vulnerability) -> VulnerabilityBlock {
    VulnerabilityBlock {
        heading: format!("Vulnerability {number} ({})", v.result_label()),
        fields: vec![
            DetailField::new("Vulnerability type", metadata(&v.vulnerability_type)),
            DetailField::new("Impact level", metadata(&v.impact)),
            DetailField::new("Confidence level", metadata(&v.confidence)),
            DetailField::new("Description", metadata(&v.description)),
            DetailField::new("Recommendation", metadata(&v.recommendation)),
        ],
        results: v
            .results
            .iter()
            .enumerate()
            .map(|(i, r)| result_block(i + 1, r))
            .collect(),
    }
}

fn result_block(number: usize, r: &VulnerabilityResult) -> ResultBlock {
    ResultBlock {
        heading: format!("Result {number}:"),
        fields: vec![
            DetailField::new(
                "Description",
                markup::render(&r.description, LinkPolicy::Disabled, LineBreaks::Hard),
            ),
            DetailField::new("Location", r.location.as_str()),
        ],
    }
}

fn write_field(f: &mut fmt::Formatter<'_>, indent: &str, field: &DetailField) -> fmt::Result {
    if !field.value.contains('\n') {
        return writeln!(f, "{indent}{}: {}", field.label, field.value);
    }
    writeln!(f, "{indent}{}:", field.label)?;
    for line in field.value.lines() {
        if line.is_empty() {
            writeln!(f)?;
        } else {
            writeln!(f, "{indent}{FIELD_INDENT}{line}")?;
        }
    }
    Ok(())
}

impl fmt::Display for DetailDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f)?;
        writeln!(f, "{}", Self::SUMMARY_HEADING)?;
        for field in &self.summary {
            write_field(f, FIELD_INDENT, field)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", Self::FINDINGS_HEADING)?;
        if self.no_vulnerabilities {
            writeln!(f, "{}", messages::NO_VULNERABILITIES)?;
        }

        let nested = FIELD_INDENT.repeat(2);
        let deepest = FIELD_INDENT.repeat(3);
        for block in &self.vulnerabilities {
            writeln!(f)?;
            writeln!(f, "{}", block.heading)?;
            for field in &block.fields {
                write_field(f, FIELD_INDENT, field)?;
            }
            writeln!(f, "{FIELD_INDENT}Results:")?;
            for result in &block.results {
                writeln!(f, "{nested}{}", result.heading)?;
                for field in &result.fields {
                    write_field(f, &deepest, field)?;
                }
            }
        }
        Ok(())
    }
}

/// 리포트 상세 화면 상태
pub struct ReportDetailView<S: ReportStore> {
    service: ReportService<S>,
    notifier: Arc<dyn Notifier>,
    id: ReportId,
    loading: LoadingFlag,
    report: Option<ReportDetail>,
    no_vulnerabilities: bool,
    error: Option<&'static str>,
    generation: RequestGeneration,
}

impl<S: ReportStore> ReportDetailView<S> {
    /// 로딩 중 상태로 시작합니다.
    pub fn new(service: ReportService<S>, id: ReportId, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            id,
            loading: LoadingFlag::started(),
            report: None,
            no_vulnerabilities: false,
            error: None,
            generation: RequestGeneration::new(),
        }
    }

    pub fn id(&self) -> ReportId {
        self.id
    }

    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn report(&self) -> Option<&ReportDetail> {
        self.report.as_ref()
    }

    pub fn has_no_vulnerabilities(&self) -> bool {
        self.no_vulnerabilities
    }

    /// 표시할 에러 문구. 에러 화면에는 항상 홈 링크가 함께 나옵니다.
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// 삭제 버튼은 에러가 없을 때만 보입니다.
    pub fn shows_delete_control(&self) -> bool {
        self.error.is_none()
    }

    /// 리포트를 받아 옵니다.
    pub async fn load(&mut self) -> bool {
        let ticket = self.begin_load();
        let result = {
            let _guard = self.loading.begin();
            self.service.get_one(self.id).await
        };
        self.apply_load(ticket, result)
    }

    /// 새 조회를 시작합니다.
    ///
    /// 직접 요청을 보내는 호출자는 응답을 기다리는 동안 [`Self::loading`]의 가드를 보관합니다.
    pub fn begin_load(&mut self) -> RequestTicket {
        self.generation.begin()
    }

    /// 조회 결과를 반영합니다. 오래된 티켓의 결과는 버립니다.
    pub fn apply_load(
        &mut self,
        ticket: RequestTicket,
        result: Result<ReportDetail, ClientError>,
    ) -> bool {
        if !self.generation.is_current(ticket) {
            debug!(report_id = %self.id, "discarding stale report detail");
            return false;
        }
        match result {
            Ok(report) => {
                self.no_vulnerabilities = report.has_no_vulnerabilities();
                self.report = Some(report);
                self.error = None;
            }
            Err(e) => {
                warn!(report_id = %self.id, error = %e, "failed to fetch report");
                self.report = None;
                self.no_vulnerabilities = false;
                self.error = Some(messages::detail_failure(&e));
            }
        }
        true
    }

    /// 리포트를 삭제합니다. 성공하면 목록 화면으로 이동합니다.
    ///
    /// 이동 후에도 보이도록 성공 알림은 persistent로 띄웁니다.
    /// 실패는 로그로만 남깁니다.
    pub async fn delete(&mut self) -> Option<Route> {
        match self.service.delete_one(self.id).await {
            Ok(()) => {
                self.notifier
                    .notify(Notification::success(messages::REPORT_DELETED).persistent());
                Some(Route::Reports)
            }
            Err(e) => {
                error!(report_id = %self.id, error = %e, "failed to delete report");
                None
            }
        }
    }

    /// 로딩이 끝났고 에러가 없을 때의 출력 문서
    pub fn document(&self) -> Option<DetailDocument> {
        if self.is_loading() || self.error.is_some() {
            return None;
        }
        self.report.as_ref().map(DetailDocument::from_report)
    }
}
