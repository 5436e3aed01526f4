// refmart-core/src/application/report.rs

use std::path::Path;

use tracing::info;

use crate::domain::quality::QualityIssue;
use crate::error::RefmartError;
use crate::infrastructure::fs::atomic_write;

/// Report schema, stable across runs. The header is always present so
/// consumers never have to distinguish "no issues" from "no file".
pub const REPORT_COLUMNS: [&str; 5] = ["Category", "Rule", "Failed_Rows", "Severity", "Details"];

/// Renders the ordered issue list as CSV text (header always included).
pub fn render_report(issues: &[QualityIssue]) -> Result<String, RefmartError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(REPORT_COLUMNS)?;

    for issue in issues {
        writer.write_record([
            issue.category.as_str(),
            issue.rule,
            &issue.failed_rows.to_string(),
            issue.severity.as_str(),
            &issue.details,
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RefmartError::InternalError(format!("Report buffer: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| RefmartError::InternalError(format!("Report is not UTF-8: {e}")))
}

/// Persists the report, unconditionally replacing any prior one. The write
/// goes through a temp file and an atomic rename, so a failure leaves the
/// previous report intact rather than a truncated file.
pub fn write_report(path: &Path, issues: &[QualityIssue]) -> Result<(), RefmartError> {
    let content = render_report(issues)?;
    atomic_write(path, &content)?;
    info!(path = %path.display(), issues = issues.len(), "Quality report persisted");
    Ok(())
}
