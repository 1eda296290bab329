//! Binary to output the JSON Schema for the work items config file

use work_items_runtime::Config;

fn main() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);

    Ok(())
}
