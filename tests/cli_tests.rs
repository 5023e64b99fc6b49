use std::fs;
use std::process::Command;

fn write_routes(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("routes.yaml");
    fs::write(
        &path,
        r#"
routes:
  - method: GET
    template: /v1/articles/{value=data2/symbol/**}
    handler: get_symbol
  - method: GET
    template: /v1/articles
    handler: list_articles
"#,
    )
    .unwrap();
    path
}

fn protorest() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_protorest"));
    cmd.env("PROTOREST_LOG_LEVEL", "error");
    cmd
}

#[test]
fn test_cli_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let routes = write_routes(&dir);

    let output = protorest()
        .arg("resolve")
        .arg("--routes")
        .arg(&routes)
        .arg("GET")
        .arg("/v1/articles/data2/symbol")
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["handler"], "get_symbol");
    assert_eq!(json["values"]["value"], "data2/symbol");
}

#[test]
fn test_cli_resolve_not_found_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let routes = write_routes(&dir);

    let output = protorest()
        .arg("resolve")
        .arg("--routes")
        .arg(&routes)
        .arg("POST")
        .arg("/v1/articles")
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no route matched POST /v1/articles"));
}

#[test]
fn test_cli_check() {
    let dir = tempfile::tempdir().unwrap();
    let routes = write_routes(&dir);

    let status = protorest()
        .arg("check")
        .arg("--routes")
        .arg(&routes)
        .status()
        .expect("run cli");
    assert!(status.success());
}

#[test]
fn test_cli_compile_invalid_template() {
    let output = protorest()
        .arg("compile")
        .arg("/ /")
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid url segment format"));
}
