use crate::error::RosterError;

/// Builds the CSV export URL for a published Google Sheets roster.
#[must_use]
pub fn export_url(file_id: &str, gid: &str) -> String {
    format!(
        "https://docs.google.com/feeds/download/spreadsheets/Export\
         ?key={file_id}&exportFormat=csv&gid={gid}"
    )
}

/// Downloads the roster sheet as CSV text from `url`.
///
/// # Errors
///
/// - [`RosterError::UnexpectedStatus`] — any non-2xx status.
/// - [`RosterError::Http`] — transport failure or timeout.
pub async fn download_roster_from(
    client: &reqwest::Client,
    url: &str,
) -> Result<String, RosterError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(RosterError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }
    Ok(response.text().await?)
}
