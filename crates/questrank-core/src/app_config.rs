use std::path::PathBuf;

/// Process-wide runtime settings, loaded once at startup from the
/// environment (see [`crate::config::load_app_config`]) and passed by
/// reference into the components that need them. Nothing reads ambient
/// global state after this is built.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Filter file with the skip-list, date window, and location buckets.
    pub filters_path: PathBuf,
    /// Where the rendered text report is written.
    pub output_path: PathBuf,
    /// Google Sheets document id of the roster sheet.
    pub roster_file_id: String,
    /// Worksheet gid within the roster document.
    pub roster_sheet_gid: String,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    pub max_concurrent_fetches: usize,
    /// Mask email local parts in the rendered report.
    pub hide_emails: bool,
}
