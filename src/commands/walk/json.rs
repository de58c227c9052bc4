use super::WalkResult;
use dagwalk_core::error::Result;

/// Output in JSON format
pub fn output_json(result: &WalkResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}
