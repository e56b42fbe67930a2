use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_check_reports_missing_keys() -> Result<()> {
    let test = CliTest::with_file(
        "app/views/home.blade.php",
        r#"<div>
    @lang('default.farewell')
</div>
"#,
    )?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "default.farewell"  missing-key
      --> ./app/views/home.blade.php:2:5
      |
    2 |     @lang('default.farewell')
      |     ^
      = note: not in locale "en"

    ✘ 1 missing key in locale "en" (1 usage)

    ----- stderr -----
    "#);

    assert!(!test.root().join("lang").exists());

    Ok(())
}

#[test]
fn test_check_counts_keys_and_usages() -> Result<()> {
    let test = CliTest::with_file(
        "app/controllers/A.php",
        "<?php\ntrans('default.a');\ntrans('default.a');\ntrans('default.b.c');\n",
    )?;

    let output = test.check_command().output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stdout.contains("2 missing keys in locale \"en\" (3 usages)"),
        "{stdout}"
    );
    assert_eq!(stdout.matches("missing-key").count(), 3);

    Ok(())
}

#[test]
fn test_check_clean_project() -> Result<()> {
    let test = CliTest::with_file(
        "app/controllers/A.php",
        "<?php\nreturn trans('default.greeting');\n",
    )?;
    test.write_file("lang/en/default.json", r#"{"greeting": ""}"#)?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - no missing keys in locale "en"

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_check_nested_catalog_presence() -> Result<()> {
    let test = CliTest::with_file(
        "app/controllers/A.php",
        "<?php\ntrans('messages.nav.home'); trans('messages.title');\n",
    )?;
    test.write_file(
        "lang/en/messages.json",
        r#"{"nav": {"home": "Home"}, "title": ""}"#,
    )?;

    let output = test.check_command().output()?;
    assert!(output.status.success());

    Ok(())
}

#[test]
fn test_check_lang_root_override() -> Result<()> {
    let test = CliTest::with_file(
        "app/controllers/A.php",
        "<?php\nreturn trans('default.greeting');\n",
    )?;
    test.write_file("translations/en/default.json", r#"{"greeting": "Hi"}"#)?;

    let output = test
        .check_command()
        .args(["--lang-root", "translations"])
        .output()?;
    assert!(output.status.success());

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(1));

    Ok(())
}

#[test]
fn test_check_invalid_config() -> Result<()> {
    let test = CliTest::project()?;
    test.write_file(".transcollect.json", r#"{"ignores": ["[invalid"]}"#)?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.starts_with("Error: "), "{stderr}");
    assert!(stderr.contains("ignores"), "{stderr}");

    Ok(())
}

#[test]
fn test_check_missing_scan_directory_warns() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.check_command().output()?;

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(
        stderr.contains("Scan directory does not exist"),
        "{stderr}"
    );

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    for command in ["collect", "check", "init"] {
        assert!(stdout.contains(command), "{stdout}");
    }

    Ok(())
}
