use anyhow::{Context, Result};
use shared_types::AnalysisResult;

pub(super) fn render(result: &AnalysisResult) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(result).context("Failed to serialize report")?;
    bytes.push(b'\n');
    Ok(bytes)
}
