use crate::dashboard::Dashboard;
use crate::model::CoachRow;
use crate::report::DashboardReport;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::mpsc as std_mpsc;
use std::sync::OnceLock;
use std::time::Duration;

// Clipboard worker channel, started on first copy
static CLIPBOARD_SENDER: OnceLock<std_mpsc::Sender<String>> = OnceLock::new();

/// Absolute path in the current directory for a timestamped export file.
fn export_path(kind: &str, ext: &str) -> Result<PathBuf> {
    let stamp = crate::report::file_stamp(crate::report::now_local());
    let current_dir = std::env::current_dir().context("get current directory")?;
    Ok(current_dir.join(format!("coach-plus-minus-{kind}-{stamp}.{ext}")))
}

/// Export the current table view as CSV into the working directory.
pub fn export_table_csv(rows: &[CoachRow]) -> Result<PathBuf> {
    let path = export_path("table", "csv")?;
    crate::export::export_csv(&path, rows)?;
    Ok(path)
}

/// Export every current view as a JSON report into the working directory.
pub fn export_report_json(dash: &Dashboard) -> Result<PathBuf> {
    let path = export_path("report", "json")?;
    crate::export::export_json(&path, &DashboardReport::new(dash))?;
    Ok(path)
}

/// Start the clipboard worker if needed.
/// Each copy keeps its clipboard handle alive for a while so that clipboard
/// managers on Linux get a chance to read the contents.
fn clipboard_sender() -> &'static std_mpsc::Sender<String> {
    CLIPBOARD_SENDER.get_or_init(|| {
        let (tx, rx) = std_mpsc::channel::<String>();
        std::thread::spawn(move || {
            use arboard::Clipboard;

            for text in rx {
                match Clipboard::new() {
                    Ok(mut clipboard) => {
                        if let Err(e) = clipboard.set_text(&text) {
                            tracing::warn!(error = %e, "clipboard write failed");
                            continue;
                        }
                        std::thread::sleep(Duration::from_secs(2));
                    }
                    Err(e) => tracing::warn!(error = %e, "clipboard unavailable"),
                }
            }
        });
        tx
    })
}

/// Queue `text` for the clipboard without blocking the UI loop.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    clipboard_sender()
        .send(text.to_string())
        .map_err(|_| anyhow::anyhow!("Clipboard manager channel closed"))
}
