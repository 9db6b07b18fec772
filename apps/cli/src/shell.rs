//! Application shell — the state machine behind the upload workflow:
//! `Landing → FileSelected → Processing → ResultShown | ErrorShown`.
//!
//! The shell owns all mutable UI state. Network work happens outside the
//! shell (`run_job`) against an immutable job handle, and its outcome is
//! applied through a run token so a completion that lands after `reset`
//! cannot write stale state.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::encoder::encode_file;
use crate::errors::{AppError, GENERIC_PROCESSING_MSG};
use crate::extraction::extract_resume;
use crate::gemini::GeminiClient;
use crate::models::resume::ResumeRecord;

pub const INVALID_FILE_MSG: &str = "Please upload a valid PDF file.";
pub const NO_FILE_MSG: &str = "Please select a LinkedIn PDF profile first.";

const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    Landing,
    FileSelected,
    Processing,
    ResultShown,
    ErrorShown,
}

/// A file chosen at the input boundary, tagged with its MIME type.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
    pub mime: String,
}

impl SelectedFile {
    /// Builds a selection from a filesystem path, inferring the MIME type
    /// from the extension — the only type signal a path-based input
    /// boundary carries.
    pub fn from_path(path: &Path) -> Self {
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        SelectedFile {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.to_path_buf(),
            mime: if is_pdf { PDF_MIME } else { "application/octet-stream" }.to_string(),
        }
    }
}

/// Token identifying one processing run. A completion is applied only if
/// its token still matches the shell; `reset` invalidates all outstanding
/// tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunToken(u64);

/// Handle for an in-flight run: everything `run_job` needs, detached from
/// the shell so the shell stays free to take user actions meanwhile.
#[derive(Debug, Clone)]
pub struct ProcessingJob {
    pub token: RunToken,
    pub path: PathBuf,
}

#[derive(Debug, Default)]
pub struct AppShell {
    file: Option<SelectedFile>,
    record: Option<ResumeRecord>,
    error: Option<String>,
    processing: bool,
    run_id: u64,
}

impl AppShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ShellState {
        if self.record.is_some() {
            ShellState::ResultShown
        } else if self.processing {
            ShellState::Processing
        } else if self.error.is_some() {
            ShellState::ErrorShown
        } else if self.file.is_some() {
            ShellState::FileSelected
        } else {
            ShellState::Landing
        }
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn record(&self) -> Option<&ResumeRecord> {
        self.record.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Accepts a file selection. Anything other than `application/pdf` is
    /// rejected with the fixed validation message and clears the selection.
    pub fn select_file(&mut self, file: SelectedFile) {
        if file.mime != PDF_MIME {
            self.error = Some(INVALID_FILE_MSG.to_string());
            self.file = None;
            return;
        }
        self.file = Some(file);
        self.error = None;
    }

    /// Starts a processing run for the selected file. With no file selected
    /// this surfaces the fixed validation message and issues no job.
    pub fn begin_processing(&mut self) -> Option<ProcessingJob> {
        let Some(file) = &self.file else {
            self.error = Some(NO_FILE_MSG.to_string());
            return None;
        };
        self.processing = true;
        self.error = None;
        Some(ProcessingJob {
            token: RunToken(self.run_id),
            path: file.path.clone(),
        })
    }

    /// Applies a run outcome. A stale token (the shell was reset while the
    /// run was in flight) is dropped without touching current state. The
    /// selected file is retained on error so the user can re-submit.
    pub fn finish_processing(
        &mut self,
        token: RunToken,
        result: Result<ResumeRecord, AppError>,
    ) {
        if token != RunToken(self.run_id) {
            debug!("Dropping stale processing result (token {:?})", token);
            return;
        }
        self.processing = false;
        match result {
            Ok(record) => {
                self.record = Some(record);
                self.error = None;
            }
            Err(e) => {
                let message = e.to_string();
                self.error = Some(if message.is_empty() {
                    GENERIC_PROCESSING_MSG.to_string()
                } else {
                    message
                });
            }
        }
    }

    /// Explicit reset: clears file, record and error together, returns to
    /// `Landing`, and invalidates any outstanding run token.
    pub fn reset(&mut self) {
        self.file = None;
        self.record = None;
        self.error = None;
        self.processing = false;
        self.run_id += 1;
    }

    /// Convenience driver: begin, run to completion, apply. The CLI uses
    /// this; tests exercise the three phases separately where interleaving
    /// matters.
    pub async fn process(&mut self, client: &GeminiClient) {
        if let Some(job) = self.begin_processing() {
            let result = run_job(&job, client).await;
            self.finish_processing(job.token, result);
        }
    }
}

/// Encode then extract, strictly sequential. Free of shell state so the
/// shell can keep responding while this is in flight.
pub async fn run_job(job: &ProcessingJob, client: &GeminiClient) -> Result<ResumeRecord, AppError> {
    let encoded = encode_file(&job.path).await?;
    extract_resume(client, &encoded).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EXTRACTION_FAILED_MSG;
    use crate::render::render_html;
    use httpmock::prelude::*;
    use std::io::Write;

    fn pdf_file(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    fn mock_client(server: &MockServer) -> GeminiClient {
        GeminiClient::new("test-key".to_string(), server.base_url())
    }

    fn minimal_record_body() -> serde_json::Value {
        serde_json::json!({
            "candidates": [{"content": {"parts": [
                {"text": r#"{"fullName":"Jane Doe","experience":[],"skills":[]}"#}
            ]}}]
        })
    }

    #[test]
    fn test_selecting_pdf_transitions_to_file_selected() {
        let mut shell = AppShell::new();
        assert_eq!(shell.state(), ShellState::Landing);

        shell.select_file(SelectedFile::from_path(Path::new("profile.pdf")));
        assert_eq!(shell.state(), ShellState::FileSelected);
        assert!(shell.error().is_none());
    }

    #[test]
    fn test_mime_inference_is_case_insensitive() {
        let file = SelectedFile::from_path(Path::new("Profile.PDF"));
        assert_eq!(file.mime, "application/pdf");
    }

    #[test]
    fn test_selecting_non_pdf_rejects_and_keeps_no_file() {
        let mut shell = AppShell::new();
        shell.select_file(SelectedFile::from_path(Path::new("notes.txt")));

        assert_eq!(shell.state(), ShellState::ErrorShown);
        assert_eq!(shell.error(), Some(INVALID_FILE_MSG));
        assert!(shell.file().is_none());
    }

    #[test]
    fn test_valid_selection_clears_previous_error() {
        let mut shell = AppShell::new();
        shell.select_file(SelectedFile::from_path(Path::new("notes.txt")));
        shell.select_file(SelectedFile::from_path(Path::new("profile.pdf")));

        assert_eq!(shell.state(), ShellState::FileSelected);
        assert!(shell.error().is_none());
    }

    #[test]
    fn test_processing_without_file_surfaces_message_and_stays_put() {
        let mut shell = AppShell::new();
        assert!(shell.begin_processing().is_none());
        assert_eq!(shell.error(), Some(NO_FILE_MSG));
        assert_eq!(shell.state(), ShellState::ErrorShown);
        assert!(shell.file().is_none());
    }

    // End-to-end scenario 1: a .txt selection never reaches the API.
    #[tokio::test]
    async fn test_e2e_txt_selection_makes_no_api_call() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST);
            then.status(200).json_body(minimal_record_body());
        });

        let mut shell = AppShell::new();
        shell.select_file(SelectedFile::from_path(Path::new("resume.txt")));
        assert_eq!(shell.error(), Some(INVALID_FILE_MSG));

        // Even if the user mashes the submit action, no request goes out.
        shell.process(&mock_client(&server)).await;
        assert_eq!(shell.error(), Some(NO_FILE_MSG));
        mock.assert_hits(0);
    }

    // End-to-end scenario 2: minimal record renders with empty sections.
    #[tokio::test]
    async fn test_e2e_minimal_record_processes_and_renders() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200).json_body(minimal_record_body());
        });
        let file = pdf_file(b"%PDF-1.4");

        let mut shell = AppShell::new();
        shell.select_file(SelectedFile::from_path(file.path()));
        shell.process(&mock_client(&server)).await;

        assert_eq!(shell.state(), ShellState::ResultShown);
        let html = render_html(shell.record().unwrap());
        assert!(html.contains("<h1>JANE DOE</h1>"));
        assert!(html.contains("Work Experience"));
        assert!(!html.contains("Professional Summary"));
        assert!(!html.contains("Certifications"));
    }

    // End-to-end scenario 3: network failure shows the fixed extraction
    // message and retains the selected file.
    #[tokio::test]
    async fn test_e2e_network_error_keeps_file_and_shows_message() {
        let file = pdf_file(b"%PDF-1.4");
        // Nothing listens here; the call fails at the transport level.
        let client = GeminiClient::new("test-key".to_string(), "http://127.0.0.1:1".to_string());

        let mut shell = AppShell::new();
        shell.select_file(SelectedFile::from_path(file.path()));
        shell.process(&client).await;

        assert_eq!(shell.state(), ShellState::ErrorShown);
        assert_eq!(shell.error(), Some(EXTRACTION_FAILED_MSG));
        assert!(shell.file().is_some());
    }

    // End-to-end scenario 4: reset clears file, record and error together.
    #[tokio::test]
    async fn test_e2e_reset_after_result_returns_to_landing() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200).json_body(minimal_record_body());
        });
        let file = pdf_file(b"%PDF-1.4");

        let mut shell = AppShell::new();
        shell.select_file(SelectedFile::from_path(file.path()));
        shell.process(&mock_client(&server)).await;
        assert_eq!(shell.state(), ShellState::ResultShown);

        shell.reset();
        assert_eq!(shell.state(), ShellState::Landing);
        assert!(shell.file().is_none());
        assert!(shell.record().is_none());
        assert!(shell.error().is_none());
    }

    #[tokio::test]
    async fn test_unreadable_file_error_retains_selection() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST);
            then.status(200).json_body(minimal_record_body());
        });

        let mut shell = AppShell::new();
        shell.select_file(SelectedFile::from_path(Path::new("/nonexistent/profile.pdf")));
        shell.process(&mock_client(&server)).await;

        assert_eq!(shell.state(), ShellState::ErrorShown);
        assert!(shell.error().unwrap().starts_with("Failed to read"));
        assert!(shell.file().is_some());
        // Read failure happens before the service is ever contacted.
        mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_stale_completion_after_reset_is_dropped() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200).json_body(minimal_record_body());
        });
        let file = pdf_file(b"%PDF-1.4");
        let client = mock_client(&server);

        let mut shell = AppShell::new();
        shell.select_file(SelectedFile::from_path(file.path()));
        let job = shell.begin_processing().unwrap();
        assert_eq!(shell.state(), ShellState::Processing);
        let result = run_job(&job, &client).await;

        // The user resets while the run is still outstanding.
        shell.reset();
        shell.finish_processing(job.token, result);

        assert_eq!(shell.state(), ShellState::Landing);
        assert!(shell.record().is_none());
        assert!(shell.error().is_none());
    }
}
