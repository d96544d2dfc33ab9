//! 리포트 조회 엔진 — 검색어 필터링과 정렬
//!
//! [`view`]는 전체 리포트 목록과 (검색어, 정렬 키, 정렬 방향)을 받아
//! 새로 정렬된 목록을 돌려주는 순수 함수입니다. 입력은 변경하지 않습니다.
//!
//! # 정렬 규칙
//!
//! - `submission_date`: 제출 날짜와 시각을 합친 시점으로 비교합니다.
//!   해석할 수 없는 시점은 가장 오래된 것으로 취급합니다. 시점이 같으면
//!   방향과 관계없이 `report_id`가 큰 쪽이 먼저 옵니다.
//! - `contract_name`, `number_of_vulnerabilities`: 문자열로 바꾼 값을
//!   대소문자 구분 없이 사전순 비교한 뒤 방향을 적용합니다.

use std::cmp::Ordering;

use solaudit_core::types::{ReportSummary, SortField, SortOrder};

/// 검색어가 검색 대상 필드 중 하나의 부분 문자열인지 확인합니다.
///
/// 검색 대상: `report_id`, `contract_name`, `number_of_vulnerabilities`,
/// `submission_date`, `submission_time`. 빈 검색어는 모든 리포트와 일치합니다.
pub fn matches_query(report: &ReportSummary, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    report.report_id.to_string().contains(&needle)
        || report.contract_name.to_lowercase().contains(&needle)
        || report.number_of_vulnerabilities.to_string().contains(&needle)
        || report.submission_date.to_lowercase().contains(&needle)
        || report.submission_time.to_lowercase().contains(&needle)
}

/// 두 리포트의 정렬 순서를 결정합니다.
pub fn compare(a: &ReportSummary, b: &ReportSummary, field: SortField, order: SortOrder) -> Ordering {
    match field {
        SortField::SubmissionDate => {
            // None < Some(_) 이므로 해석 불가 시점은 가장 오래된 것으로 정렬됩니다.
            let by_instant = order.apply(a.submitted_at().cmp(&b.submitted_at()));
            by_instant.then_with(|| b.report_id.cmp(&a.report_id))
        }
        SortField::ContractName => order.apply(cmp_folded(&a.contract_name, &b.contract_name)),
        SortField::NumberOfVulnerabilities => order.apply(cmp_folded(
            &a.number_of_vulnerabilities.to_string(),
            &b.number_of_vulnerabilities.to_string(),
        )),
    }
}

fn cmp_folded(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// 필터링 후 정렬한 새 목록을 돌려줍니다.
///
/// 정렬은 안정 정렬이므로 비교 결과가 같은 리포트는 원래 순서를 유지합니다.
pub fn view(
    reports: &[ReportSummary],
    query: &str,
    field: SortField,
    order: SortOrder,
) -> Vec<ReportSummary> {
    let mut rows: Vec<ReportSummary> = reports
        .iter()
        .filter(|r| matches_query(r, query))
        .cloned()
        .collect();
    rows.sort_by(|a, b| compare(a, b, field, order));
    rows
}
