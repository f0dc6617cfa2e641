mod common;

use common::{path_str, TestEnv};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

fn load_schema(name: &str) -> Value {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let raw = fs::read_to_string(root.join("docs/contracts").join(name)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn validate(schema_name: &str, data: &Value) {
    let schema = load_schema(schema_name);
    let validator = JSONSchema::compile(&schema).expect("compile schema");
    let msgs: Vec<String> = match validator.validate(data) {
        Ok(()) => return,
        Err(errors) => errors.map(|e| e.to_string()).collect(),
    };
    panic!("schema validation failed: {}", msgs.join(" | "));
}

#[test]
fn adjust_output_matches_contract() {
    let env = TestEnv::new();
    let input = env.write("manifest.txt", "12.5\n\n0.001\n7.25\n");

    let out = env.run_json(&["adjust", "--total", "3.1", "--input", path_str(&input)]);
    validate("adjust.schema.json", &out);

    let out = env.run_json(&["adjust", "--total", "40", "10", "10", "10"]);
    validate("adjust.schema.json", &out);

    let sheet = env.write("load.csv", "Item,GrossMassKg\nA,10\nB,10\n");
    let out = env.run_json(&["adjust", "--total", "20.001", "-i", path_str(&sheet), "--output"]);
    assert!(out["data"]["output"].is_string());
    validate("adjust.schema.json", &out);
}

#[test]
fn check_output_matches_contract() {
    let env = TestEnv::new();

    let out = env.run_json(&["check", "--total", "0.002", "10", "10", "10"]);
    validate("check.schema.json", &out);

    let out = env.run_json(&["check", "--total", "25.5", "10", "10", "10"]);
    validate("check.schema.json", &out);
}

#[test]
fn error_output_matches_contract() {
    let env = TestEnv::new();

    let out = env.run_json_failure(&["adjust", "--total", "0.001", "1", "2"]);
    validate("error.schema.json", &out);

    let bad = env.write("bad.json", r#"[1, "x"]"#);
    let out = env.run_json_failure(&["adjust", "--total", "3", "--input", path_str(&bad)]);
    validate("error.schema.json", &out);

    let empty = env.write("empty.json", "[null, \"\"]");
    let out = env.run_json_failure(&["check", "--total", "3", "--input", path_str(&empty)]);
    assert_eq!(out["error"]["kind"], "no_rows_found");
    validate("error.schema.json", &out);

    let sheet = env.write("nomass.csv", "Item,NetMassKg\nA,1\n");
    let out = env.run_json_failure(&["adjust", "--total", "3", "--input", path_str(&sheet)]);
    assert_eq!(out["error"]["kind"], "column_not_found");
    validate("error.schema.json", &out);
}
