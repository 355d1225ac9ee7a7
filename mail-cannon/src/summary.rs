use std::fs;
use std::path::{Path, PathBuf};

use mail_cannon_core::{MailCannonError, RunSummary};

use crate::logging::{FILE_STAMP, output_err};

/// Write `summary` as pretty JSON into `dir`, named after its timestamp.
///
/// # Errors
/// Returns [`MailCannonError::Output`] if the file cannot be written.
pub fn write_summary(dir: &Path, summary: &RunSummary) -> Result<PathBuf, MailCannonError> {
    let path = dir.join(format!(
        "mail_cannon_{}_results.json",
        summary.run_at.format(FILE_STAMP)
    ));
    let text = serde_json::to_string_pretty(summary)
        .map_err(|e| MailCannonError::Output(e.to_string()))?;
    fs::write(&path, text).map_err(|e| output_err(&path, &e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mail_cannon_core::RunResult;
    use serde_json::json;

    #[test]
    fn file_is_named_after_run_time_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let run_at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 5).unwrap();
        let summary = RunSummary::new(
            run_at,
            "orders.csv",
            vec![RunResult::success(2, "a@x.io", json!({"id": "ord_1"}))],
        );

        let path = write_summary(dir.path(), &summary).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "mail_cannon_20261019_083005_results.json"
        );
        let back: RunSummary = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, summary);
    }
}
