//! `solaudit upload` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use solaudit_client::{ClientError, Route, UploadForm, UploadWorkflow, messages};

use crate::cli::UploadArgs;
use crate::commands::show;
use crate::context::AppContext;
use crate::error::CliError;
use crate::output::Render;

/// Execute the `upload` command.
///
/// The file name is checked before the file is read.
/// On success the new report is displayed, as if navigating to its page.
pub async fn execute(args: UploadArgs, ctx: &AppContext) -> Result<(), CliError> {
    let workflow = UploadWorkflow::new(ctx.store(), &ctx.client);
    let upload = match workflow.read_checked(&args.file).await {
        Ok(upload) => upload,
        Err(ClientError::Validation(e)) => {
            return Err(CliError::from_page_message(&messages::validation(&e)));
        }
        Err(e) => return Err(e.into()),
    };
    info!(path = %args.file.display(), size = upload.len(), "contract selected");

    let mut form = UploadForm::new(workflow, ctx.notifier.clone());
    form.select(upload);

    match form.submit().await {
        Some(Route::ReportDetail(id)) if !args.no_open => show::show_report(id, ctx).await,
        Some(route) => {
            ctx.writer.render(&UploadOutcome {
                route: route.path(),
            })?;
            Ok(())
        }
        None => Err(CliError::from_page_message(
            form.error().unwrap_or(messages::UPLOAD_FAILED),
        )),
    }
}

/// Where the uploaded report can be found.
#[derive(Serialize)]
pub struct UploadOutcome {
    pub route: String,
}

impl Render for UploadOutcome {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "{}", self.route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use solaudit_core::config::SolauditConfig;

    fn context() -> AppContext {
        let mut config = SolauditConfig::default();
        config.backend.base_url = "http://127.0.0.1:9".to_owned();
        AppContext::new(&config, OutputFormat::Json).expect("context should build")
    }

    #[tokio::test]
    async fn test_wrong_extension_is_validation_even_if_missing() {
        let args = UploadArgs {
            file: "/nonexistent/notes.txt".into(),
            no_open: false,
        };
        let err = execute(args, &context()).await.expect_err("upload should be rejected");
        assert_eq!(err.exit_code(), 5);
        assert_eq!(err.to_string(), messages::INVALID_EXTENSION);
    }

    #[tokio::test]
    async fn test_missing_sol_file_is_io_error() {
        let args = UploadArgs {
            file: "/nonexistent/Token.sol".into(),
            no_open: false,
        };
        let err = execute(args, &context()).await.expect_err("missing file should fail");
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn test_upload_outcome_render_text() {
        let outcome = UploadOutcome {
            route: Route::ReportDetail(42.into()).path(),
        };
        let mut buffer = Vec::new();
        outcome.render_text(&mut buffer).expect("rendering should succeed");
        assert_eq!(String::from_utf8(buffer).expect("valid UTF-8"), "/reports/42\n");
    }
}
