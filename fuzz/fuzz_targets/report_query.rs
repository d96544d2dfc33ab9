#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use solaudit_client::query;
use solaudit_core::types::{ReportId, ReportSummary, SortField, SortOrder};

/// 퍼저용 리포트 행
#[derive(Arbitrary, Debug)]
struct FuzzReport {
    id: u64,
    contract_name: String,
    submission_date: String,
    submission_time: String,
    number_of_vulnerabilities: u32,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    /// 리포트 목록 (최대 64개로 제한)
    reports: Vec<FuzzReport>,
    query: String,
    field: u8,
    ascending: bool,
}

fuzz_target!(|input: FuzzInput| {
    let reports: Vec<ReportSummary> = input
        .reports
        .into_iter()
        .take(64)
        .map(|r| ReportSummary {
            report_id: ReportId::new(r.id),
            contract_name: r.contract_name,
            submission_date: r.submission_date,
            submission_time: r.submission_time,
            number_of_vulnerabilities: r.number_of_vulnerabilities,
        })
        .collect();

    let field = SortField::ALL[usize::from(input.field) % SortField::ALL.len()];
    let order = if input.ascending {
        SortOrder::Asc
    } else {
        SortOrder::Desc
    };

    let rows = query::view(&reports, &input.query, field, order);

    // 결과는 입력의 부분집합이고 모든 행이 검색어와 일치해야 함
    assert!(rows.len() <= reports.len());
    assert!(rows.iter().all(|r| query::matches_query(r, &input.query)));
});
