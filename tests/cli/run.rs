use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, stderr, stdout};

fn setup_project(test: &CliTest) -> Result<()> {
    test.write_file(
        ".glotsyncrc.json",
        r#"{
            "locales": ["en", "de", "fr"],
            "defaultLocale": "en",
            "folder": "locales"
        }"#,
    )?;
    test.write_file(
        "locales/en.json",
        r#"{
  "greeting": "Hello {name}",
  "nav": {
    "home": "Home"
  }
}"#,
    )
}

#[test]
fn test_run_without_project_id_is_a_no_op() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    assert_cmd_snapshot!(test.run_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    No projectId configured, skipping translation

    ----- stderr -----
    ");
    assert!(!test.root().join("locales/de.json").exists());
    assert!(!test.root().join("locales/__cached__.json").exists());
    Ok(())
}

#[test]
fn test_run_dry_run_lists_changed_keys() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    assert_cmd_snapshot!(test.run_command().args(["--dry-run", "--project-id", "demo"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    No cache found, translating all 2 key(s)
      ~ greeting
      ~ nav.home
    Run without --dry-run to translate into de, fr.

    ----- stderr -----
    ");

    assert!(!test.root().join("locales/__cached__.json").exists());
    assert!(!test.root().join("locales/de.json").exists());
    Ok(())
}

#[test]
fn test_run_dry_run_after_sync_reports_no_changes() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;
    test.write_file("locales/__cached__.json", &test.read_file("locales/en.json")?)?;

    assert_cmd_snapshot!(test.run_command().args(["--dry-run", "--project-id", "demo"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    No changes since last sync

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_run_project_id_from_env() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    let output = test
        .run_command()
        .arg("--dry-run")
        .env("GLOTSYNC_PROJECT_ID", "demo")
        .output()?;

    assert!(output.status.success());
    assert!(!stdout(&output).contains("No projectId configured"));
    Ok(())
}

#[test]
fn test_run_missing_source_does_not_fail_build() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".glotsyncrc.json", r#"{ "projectId": "demo" }"#)?;

    let output = test.run_command().output()?;

    assert!(output.status.success());
    assert!(stderr(&output).contains("Cannot read default locale file"));
    assert!(test.root().join("src/locales").is_dir());
    Ok(())
}

#[test]
fn test_run_with_invalid_config_exits_with_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".glotsyncrc.json", r#"{ "locales": ["../etc"] }"#)?;

    assert_cmd_snapshot!(test.run_command(), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Invalid locale in 'locales': "../etc"
    "#);
    Ok(())
}

#[test]
fn test_cli_overrides_config_file() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;
    test.write_file("i18n/de.json", r#"{ "title": "Titel" }"#)?;

    assert_cmd_snapshot!(test.run_command().args([
        "--dry-run",
        "--project-id",
        "demo",
        "--folder",
        "i18n",
        "--default-locale",
        "de",
        "--locales",
        "de,es",
    ]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    No cache found, translating all 1 key(s)
      ~ title
    Run without --dry-run to translate into es.

    ----- stderr -----
    ");
    Ok(())
}
