//! `solaudit reports` command handler

use std::io::Write;

use serde::Serialize;

use solaudit_client::{DeleteOutcome, ReportHistory};
use solaudit_core::types::{ReportSummary, SortField, SortOrder};

use crate::cli::ReportsArgs;
use crate::context::AppContext;
use crate::error::CliError;
use crate::output::Render;

/// Execute the `reports` command (the `/reports` page).
pub async fn execute(args: ReportsArgs, ctx: &AppContext) -> Result<(), CliError> {
    let mut history = ReportHistory::new(ctx.service.clone(), &ctx.client, ctx.notifier.clone());
    history.refresh().await;
    if let Some(message) = history.error() {
        return Err(CliError::from_page_message(message));
    }

    if let Some(query) = args.query {
        history.controls.set_query(query);
    }
    if let Some(field) = args.sort_by {
        history.controls.select_field(field);
    }
    if let Some(order) = args.order {
        history.controls.select_order(order);
    }

    let failed_delete = match args.delete {
        Some(id) => match history.delete(id).await {
            DeleteOutcome::Failed => Some(id),
            DeleteOutcome::Deleted | DeleteOutcome::Stale => None,
        },
        None => None,
    };

    ctx.writer.render(&ReportListing::from_history(&history))?;

    match failed_delete {
        Some(id) => Err(CliError::Command(format!("report {id} was not deleted"))),
        None => Ok(()),
    }
}

/// Report list output.
#[derive(Serialize)]
pub struct ReportListing {
    pub query: String,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub reports: Vec<ReportSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ReportListing {
    pub fn from_history<S: solaudit_client::ReportStore>(history: &ReportHistory<S>) -> Self {
        Self {
            query: history.controls.query.clone(),
            sort_field: history.controls.sort_field,
            sort_order: history.controls.sort_order,
            reports: history.rows(),
            message: history.empty_message().map(str::to_owned),
        }
    }
}

impl Render for ReportListing {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        write!(
            w,
            "Reports sorted by {} ({})",
            self.sort_field.label().bold(),
            self.sort_order
        )?;
        if !self.query.is_empty() {
            write!(w, ", matching '{}'", self.query)?;
        }
        writeln!(w)?;
        writeln!(w)?;

        if self.reports.is_empty() {
            if let Some(message) = &self.message {
                writeln!(w, "{message}")?;
            }
            return Ok(());
        }

        let name_width = self
            .reports
            .iter()
            .map(|r| r.contract_name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Contract Name".len());

        writeln!(
            w,
            "{:<8} {:<name_width$} {:<12} {:<10} {:>15}",
            "ID", "Contract Name", "Date", "Time", "Vulnerabilities"
        )?;
        writeln!(w, "{}", "-".repeat(8 + name_width + 12 + 10 + 15 + 4))?;
        for r in &self.reports {
            let count = r.number_of_vulnerabilities.to_string();
            let count = if r.number_of_vulnerabilities == 0 {
                count.green()
            } else {
                count.red()
            };
            writeln!(
                w,
                "{:<8} {:<name_width$} {:<12} {:<10} {:>15}",
                r.report_id.to_string(),
                r.contract_name,
                r.submission_date,
                r.submission_time,
                count
            )?;
        }
        Ok(())
    }
}
