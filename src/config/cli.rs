use crate::domain::envelope::SkillResponse;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// Reads a request event saved as JSON.
pub fn read_event(path: &Path) -> Result<serde_json::Value> {
    let data = fs::read_to_string(path)?;
    let event = serde_json::from_str(&data)?;
    Ok(event)
}

pub fn render_response(response: &SkillResponse) -> Result<String> {
    Ok(serde_json::to_string_pretty(response)?)
}
