//! `solaudit open` command handler
//!
//! Resolves a page path and shows the same output as the matching command.

use std::io::Write;

use serde::Serialize;

use solaudit_client::Route;

use crate::cli::{OpenArgs, ReportsArgs};
use crate::commands::{reports, show};
use crate::context::AppContext;
use crate::error::CliError;
use crate::output::Render;

/// Execute the `open` command.
pub async fn execute(args: OpenArgs, ctx: &AppContext) -> Result<(), CliError> {
    navigate(Route::parse(&args.path), ctx).await
}

/// Display a page.
pub async fn navigate(route: Route, ctx: &AppContext) -> Result<(), CliError> {
    match route {
        Route::Home => {
            ctx.writer.render(&StaticPage::home(&ctx.client.allowed_extensions))?;
            Ok(())
        }
        Route::About => {
            ctx.writer.render(&StaticPage::about())?;
            Ok(())
        }
        Route::Reports => reports::execute(ReportsArgs::default(), ctx).await,
        Route::ReportDetail(id) => show::show_report(id, ctx).await,
        Route::NotFound(path) => Err(CliError::NotFound(format!("Page not found: {path}"))),
    }
}

/// A page without backend data.
#[derive(Serialize)]
pub struct StaticPage {
    pub route: String,
    pub title: String,
    pub body: Vec<String>,
}

impl StaticPage {
    pub fn home(allowed_extensions: &[String]) -> Self {
        let extensions = allowed_extensions
            .iter()
            .map(|e| format!(".{}", e.trim_start_matches('.')))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            route: Route::Home.path(),
            title: "Smart Contract Audit".to_owned(),
            body: vec![
                format!("Upload a contract ({extensions}) to audit it:"),
                "  solaudit upload <FILE>".to_owned(),
                String::new(),
                "Browse previous audit reports:".to_owned(),
                format!("  solaudit open {}", Route::Reports),
            ],
        }
    }

    pub fn about() -> Self {
        Self {
            route: Route::About.path(),
            title: "About".to_owned(),
            body: vec![
                "Smart Contract Auditing".to_owned(),
                "Solaudit analyses Solidity contracts for known vulnerability patterns".to_owned(),
                "and keeps a searchable history of every audit report.".to_owned(),
            ],
        }
    }
}

impl Render for StaticPage {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "{}", self.title.bold())?;
        writeln!(w)?;
        for line in &self.body {
            writeln!(w, "{line}")?;
        }
        Ok(())
    }
}
