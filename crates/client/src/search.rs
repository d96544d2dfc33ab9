//! 검색/정렬 컨트롤 상태
//!
//! 목록 화면의 검색어, 정렬 키, 정렬 방향, 정렬 메뉴 열림 여부를 보관합니다.
//! 메뉴는 명시적인 열림/닫힘 상태를 가지며, 메뉴 바깥과 상호작용하면 닫힙니다.

use solaudit_core::types::{ReportSummary, SortField, SortOrder};

use crate::query;

/// 정렬 메뉴 열림 상태
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortMenu {
    open: bool,
}

impl SortMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// 메뉴 버튼을 눌렀을 때
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// 메뉴 영역 바깥과 상호작용했을 때
    pub fn close_on_outside_interaction(&mut self) {
        self.open = false;
    }
}

/// 목록 화면의 검색/정렬 입력
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchControls {
    pub query: String,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub menu: SortMenu,
}

impl Default for SearchControls {
    /// 빈 검색어, 제출일 내림차순
    fn default() -> Self {
        Self::new(SortField::default(), SortOrder::default())
    }
}

impl SearchControls {
    pub fn new(sort_field: SortField, sort_order: SortOrder) -> Self {
        Self {
            query: String::new(),
            sort_field,
            sort_order,
            menu: SortMenu::default(),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// 메뉴에서 정렬 키를 고르면 메뉴가 닫힙니다.
    pub fn select_field(&mut self, field: SortField) {
        self.sort_field = field;
        self.menu.close_on_outside_interaction();
    }

    /// 메뉴에서 정렬 방향을 고르면 메뉴가 닫힙니다.
    pub fn select_order(&mut self, order: SortOrder) {
        self.sort_order = order;
        self.menu.close_on_outside_interaction();
    }

    /// 현재 입력으로 목록을 조회합니다.
    pub fn apply(&self, reports: &[ReportSummary]) -> Vec<ReportSummary> {
        query::view(reports, &self.query, self.sort_field, self.sort_order)
    }
}
