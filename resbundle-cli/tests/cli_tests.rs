use indoc::indoc;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn resbundle_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("resbundle"))
}

fn write(path: &Path, text: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn strings(root: &Path, module: &str, values_dir: &str) -> std::path::PathBuf {
    root.join(module)
        .join("src/main/res")
        .join(values_dir)
        .join("strings.xml")
}

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(
        &strings(temp.path(), "app", "values"),
        indoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <resources>
                <!-- Launcher label -->
                <string name="app_name">Notes</string>
                <string name="build_id" translatable="false">42</string>
            </resources>
        "#},
    );
    write(
        &strings(temp.path(), "search", "values"),
        indoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <resources>
                <string name="hint">Search notes</string>
            </resources>
        "#},
    );
    fs::create_dir_all(temp.path().join("i18n")).unwrap();
    temp
}

#[test]
fn test_both_modes_is_a_usage_error() {
    let temp = project();
    let output = resbundle_cmd()
        .current_dir(temp.path())
        .args(["--extract", "--split"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("You can specify either --split or --extract."));
    assert!(!strings(temp.path(), "i18n", "values").exists());
}

#[test]
fn test_no_mode_is_a_usage_error() {
    let temp = project();
    let output = resbundle_cmd().current_dir(temp.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please specify either --split or --extract."));
}

#[test]
fn test_extract_from_project_root() {
    let temp = project();
    let output = resbundle_cmd()
        .current_dir(temp.path())
        .arg("--extract")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let combined = fs::read_to_string(strings(temp.path(), "i18n", "values")).unwrap();
    assert!(combined.contains("<!-- Launcher label -->"));
    assert!(combined.contains("<string name=\"app.app_name\">Notes</string>"));
    assert!(combined.contains("<string name=\"search.hint\">Search notes</string>"));
    assert!(!combined.contains("build_id"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Extracted 2 entries from 2 modules"));
}

#[test]
fn test_extract_from_inside_aggregation_module() {
    let temp = project();
    let output = resbundle_cmd()
        .current_dir(temp.path().join("i18n"))
        .arg("--extract")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(strings(temp.path(), "i18n", "values").exists());
}

#[test]
fn test_split_writes_module_translations() {
    let temp = project();
    write(
        &strings(temp.path(), "i18n", "values-de"),
        indoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <resources>
                <!-- Launcher label -->
                <string name="app.app_name">Notizen</string>
                <string name="search.hint">Notizen durchsuchen</string>
            </resources>
        "#},
    );

    let output = resbundle_cmd()
        .args(["--split", "--root", temp.path().to_str().unwrap()])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let app = fs::read_to_string(strings(temp.path(), "app", "values-de")).unwrap();
    assert_eq!(
        app,
        concat!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
            "<resources>\n",
            "\t<!-- Launcher label -->\n",
            "\t<string name=\"app_name\">Notizen</string>\n",
            "</resources>\n",
        )
    );
    let search = fs::read_to_string(strings(temp.path(), "search", "values-de")).unwrap();
    assert!(search.contains("<string name=\"hint\">Notizen durchsuchen</string>"));
}

#[test]
fn test_split_malformed_key_fails() {
    let temp = project();
    write(
        &strings(temp.path(), "i18n", "values-de"),
        r#"<resources><string name="app_name">Notizen</string></resources>"#,
    );
    let output = resbundle_cmd()
        .args(["--split", "--root", temp.path().to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("malformed key `app_name`"));
}

#[test]
fn test_split_language_filter_and_report() {
    let temp = project();
    for dir in ["values-de", "values-pt-rBR"] {
        write(
            &strings(temp.path(), "i18n", dir),
            r#"<resources><string name="app.app_name">X</string></resources>"#,
        );
    }
    let report = temp.path().join("split.json");
    let output = resbundle_cmd()
        .current_dir(temp.path())
        .args(["--split", "--lang", "pt-rBR", "--report"])
        .arg(&report)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(strings(temp.path(), "app", "values-pt-rBR").exists());
    assert!(!strings(temp.path(), "app", "values-de").exists());

    let json = fs::read_to_string(&report).unwrap();
    assert!(json.contains("\"directory\": \"values-pt-rBR\""));
    assert!(json.contains("\"language\": \"pt-BR\""));
}

#[test]
fn test_config_file_sets_aggregation_module() {
    let temp = TempDir::new().unwrap();
    write(
        &strings(temp.path(), "core", "values"),
        r#"<resources><string name="ok">OK</string></resources>"#,
    );
    fs::write(
        temp.path().join("resbundle.toml"),
        "aggregation_module = \"I18N\"\nindent = \"    \"\n",
    )
    .unwrap();

    let output = resbundle_cmd()
        .current_dir(temp.path())
        .arg("--extract")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let combined = fs::read_to_string(strings(temp.path(), "I18N", "values")).unwrap();
    assert!(combined.contains("\n    <string name=\"core.ok\">OK</string>\n"));
}

#[test]
fn test_invalid_config_fails() {
    let temp = project();
    fs::write(temp.path().join("resbundle.toml"), "indent = 4\n").unwrap();
    let output = resbundle_cmd()
        .current_dir(temp.path())
        .arg("--extract")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid config"));
}

#[test]
fn test_dropped_root_attribute_is_reported() {
    let temp = project();
    write(
        &strings(temp.path(), "search", "values"),
        r#"<resources xmlns:tools="http://schemas.android.com/tools" tools:ignore="MissingTranslation"><string name="hint">Search</string></resources>"#,
    );
    let output = resbundle_cmd()
        .current_dir(temp.path())
        .env_remove("RUST_LOG")
        .args(["--extract", "--quiet"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("dropping non-namespace root attribute"));
    assert!(stderr.contains("tools:ignore"));
}

#[test]
fn test_config_root_is_relative_to_config_file() {
    let temp = project();
    let elsewhere = TempDir::new().unwrap();
    let config = temp.path().join("build/resbundle.toml");
    write(&config, "root = \"..\"\n");

    let output = resbundle_cmd()
        .current_dir(elsewhere.path())
        .arg("--extract")
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(strings(temp.path(), "i18n", "values").exists());
    assert!(!strings(elsewhere.path(), "i18n", "values").exists());
}
