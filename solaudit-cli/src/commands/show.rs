//! `solaudit show` command handler

use std::io::Write;

use serde::Serialize;

use solaudit_client::{DetailDocument, ReportDetailView};
use solaudit_core::types::{ReportDetail, ReportId};

use crate::cli::ShowArgs;
use crate::context::AppContext;
use crate::error::CliError;
use crate::output::Render;

/// Execute the `show` command.
pub async fn execute(args: ShowArgs, ctx: &AppContext) -> Result<(), CliError> {
    show_report(args.id, ctx).await
}

/// Load and render one report (the `/reports/<id>` page).
pub async fn show_report(id: ReportId, ctx: &AppContext) -> Result<(), CliError> {
    let mut view = ReportDetailView::new(ctx.service.clone(), id, ctx.notifier.clone());
    view.load().await;

    if let Some(message) = view.error() {
        return Err(CliError::from_page_message(message));
    }
    let (Some(report), Some(document)) = (view.report(), view.document()) else {
        return Err(CliError::Command(format!("report {id} is not available")));
    };

    ctx.writer.render(&ReportPage {
        report: report.clone(),
        document,
    })?;
    Ok(())
}

/// Report detail output.
///
/// JSON output is the report as returned by the service; text output is the
/// rendered document.
#[derive(Serialize)]
pub struct ReportPage {
    #[serde(flatten)]
    pub report: ReportDetail,
    #[serde(skip)]
    pub document: DetailDocument,
}

impl Render for ReportPage {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        write!(w, "{}", self.document)
    }
}
