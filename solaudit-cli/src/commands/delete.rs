//! `solaudit delete` command handler

use std::io::Write;

use serde::Serialize;

use solaudit_client::ReportDetailView;
use solaudit_core::types::ReportId;

use crate::cli::DeleteArgs;
use crate::context::AppContext;
use crate::error::CliError;
use crate::output::Render;

/// Execute the `delete` command.
///
/// A failed delete is only logged by the page; the command still exits non-zero.
pub async fn execute(args: DeleteArgs, ctx: &AppContext) -> Result<(), CliError> {
    let mut view = ReportDetailView::new(ctx.service.clone(), args.id, ctx.notifier.clone());
    match view.delete().await {
        Some(route) => {
            ctx.writer.render(&DeleteReceipt {
                report_id: args.id,
                redirect: route.path(),
            })?;
            Ok(())
        }
        None => Err(CliError::Command(format!("report {} was not deleted", args.id))),
    }
}

/// Deleted report and the page to continue on.
#[derive(Serialize)]
pub struct DeleteReceipt {
    pub report_id: ReportId,
    pub redirect: String,
}

impl Render for DeleteReceipt {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Report {} deleted, continue at {}", self.report_id, self.redirect)
    }
}
