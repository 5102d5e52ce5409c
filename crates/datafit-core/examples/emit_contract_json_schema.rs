use datafit_core::{QualityConfig, QualityDescriptor, QualityResult};
use schemars::schema_for;

fn main() {
    let schemas = serde_json::json!({
        "descriptor": schema_for!(QualityDescriptor),
        "result": schema_for!(QualityResult),
        "config": schema_for!(QualityConfig),
    });
    let json = serde_json::to_string_pretty(&schemas).expect("serialize json schema");
    println!("{json}");
}
