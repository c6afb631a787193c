use anyhow::Result;
use cargo_launch_core::ParsedArguments;

pub fn classify_command(tokens: &[String]) -> Result<()> {
    let parsed = ParsedArguments::classify(tokens);
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}
