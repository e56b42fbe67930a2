use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

use crate::CliTest;

const HOME_CONTROLLER: &str = r#"<?php

class HomeController extends BaseController {

    public function index()
    {
        return View::make('home')->with('title', trans('default.greeting'));
    }

}
"#;

const HOME_VIEW: &str = r#"<div class="footer">
    @lang('default.farewell')
</div>
"#;

#[test]
fn test_collect_adds_missing_keys() -> Result<()> {
    let test = CliTest::with_file("app/controllers/HomeController.php", HOME_CONTROLLER)?;
    test.write_file("app/views/home.blade.php", HOME_VIEW)?;

    assert_cmd_snapshot!(test.collect_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Updated file: ./lang/en/default.json

    ----- stderr -----
    ");

    assert_eq!(
        test.read_file("lang/en/default.json")?,
        "{\n  \"greeting\": \"\",\n  \"farewell\": \"\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_collect_preserves_existing_values() -> Result<()> {
    let test = CliTest::with_file("app/controllers/HomeController.php", HOME_CONTROLLER)?;
    test.write_file("app/views/home.blade.php", HOME_VIEW)?;
    test.write_file("lang/en/default.json", r#"{"greeting": "hello"}"#)?;

    let output = test.collect_command().output()?;
    assert!(output.status.success());

    assert_eq!(
        test.read_json("lang/en/default.json")?,
        json!({"greeting": "hello", "farewell": ""})
    );

    Ok(())
}

#[test]
fn test_collect_decodes_escaped_quotes() -> Result<()> {
    let test = CliTest::with_file(
        "app/controllers/QuoteController.php",
        r#"<?php
echo trans('default.it\'s here');
echo trans("default.she said \"hi\"");
"#,
    )?;

    let output = test.collect_command().output()?;
    assert!(output.status.success());

    assert_eq!(
        test.read_json("lang/en/default.json")?,
        json!({"it's here": "", "she said \"hi\"": ""})
    );

    Ok(())
}

#[test]
fn test_collect_all_call_forms() -> Result<()> {
    let test = CliTest::with_file(
        "app/views/list.blade.php",
        r#"<h1>{{ trans('default.title') }}</h1>
<p>{{ trans_choice('default.apples', count($apples)) }}</p>
<p>@lang('messages.welcome', ['name' => $user->name])</p>
<p>@choice('messages.items', $count)</p>
<p>{{ Lang::get('messages.nav.home') }}</p>
<p>{{ \Lang::choice('messages.nav.items', 2) }}</p>
<p>{{ __('default.short') }}</p>
<p>{{ trans('ungrouped') }} {{ trans($dynamic) }}</p>
"#,
    )?;

    let output = test.collect_command().output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert_eq!(
        test.read_json("lang/en/default.json")?,
        json!({"title": "", "apples": "", "short": ""})
    );
    assert_eq!(
        test.read_json("lang/en/messages.json")?,
        json!({
            "welcome": "",
            "items": "",
            "nav": {"home": "", "items": ""}
        })
    );

    Ok(())
}

#[test]
fn test_collect_nested_calls() -> Result<()> {
    let test = CliTest::with_file(
        "app/controllers/NestedController.php",
        r#"<?php
$text = trans('default.outer', ['inner' => trans('default.inner', ['deep' => Lang::get('default.deepest')])]);
"#,
    )?;

    test.collect_command().output()?;

    assert_eq!(
        test.read_json("lang/en/default.json")?,
        json!({"outer": "", "inner": "", "deepest": ""})
    );

    Ok(())
}

#[test]
fn test_collect_is_idempotent() -> Result<()> {
    let test = CliTest::with_file("app/controllers/HomeController.php", HOME_CONTROLLER)?;

    test.collect_command().output()?;
    let first = test.read_file("lang/en/default.json")?;

    let output = test.collect_command().output()?;
    assert!(output.status.success());
    assert_eq!(test.read_file("lang/en/default.json")?, first);
    assert!(String::from_utf8(output.stdout)?.contains("no missing keys"));

    Ok(())
}

#[test]
fn test_collect_nothing_missing() -> Result<()> {
    let test = CliTest::with_file("app/controllers/HomeController.php", HOME_CONTROLLER)?;
    test.write_file("lang/en/default.json", r#"{"greeting": "Hello"}"#)?;

    assert_cmd_snapshot!(test.collect_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - no missing keys in locale "en"

    ----- stderr -----
    "#);

    assert_eq!(
        test.read_file("lang/en/default.json")?,
        r#"{"greeting": "Hello"}"#
    );

    Ok(())
}

#[test]
fn test_collect_locale_override() -> Result<()> {
    let test = CliTest::with_file("app/controllers/HomeController.php", HOME_CONTROLLER)?;

    let output = test.collect_command().args(["--locale", "vi"]).output()?;
    assert!(output.status.success());

    assert!(test.root().join("lang/vi/default.json").exists());
    assert!(!test.root().join("lang/en").exists());

    Ok(())
}

#[test]
fn test_collect_lang_root_from_config() -> Result<()> {
    let test = CliTest::with_file("src/Http/HomeController.php", HOME_CONTROLLER)?;
    test.write_file(
        ".transcollect.json",
        r#"{
            "locale": "fr",
            "langRoot": "resources/lang",
            "controllersDir": "src/Http",
            "viewsDir": "resources/views"
        }"#,
    )?;
    test.write_file("resources/views/home.blade.php", HOME_VIEW)?;

    let output = test.collect_command().output()?;
    assert!(output.status.success());

    assert_eq!(
        test.read_json("resources/lang/fr/default.json")?,
        json!({"greeting": "", "farewell": ""})
    );

    Ok(())
}

#[test]
fn test_collect_respects_ignores() -> Result<()> {
    let test = CliTest::with_file("app/controllers/HomeController.php", HOME_CONTROLLER)?;
    test.write_file(
        "app/views/generated/cache.php",
        "<?php echo trans('default.generated');",
    )?;
    test.write_file(".transcollect.json", r#"{"ignores": ["**/generated/**"]}"#)?;

    test.collect_command().output()?;

    assert_eq!(
        test.read_json("lang/en/default.json")?,
        json!({"greeting": ""})
    );

    Ok(())
}

#[test]
fn test_collect_unterminated_literal_is_error() -> Result<()> {
    let test = CliTest::with_file(
        "app/controllers/BrokenController.php",
        "<?php\necho trans('default.oops);\n",
    )?;

    let output = test.collect_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("BrokenController.php:2:12"), "{stderr}");
    assert!(stderr.contains("unterminated string literal"), "{stderr}");
    assert!(!test.root().join("lang").exists());

    Ok(())
}

#[test]
fn test_collect_empty_locale_is_error() -> Result<()> {
    let test = CliTest::with_file("app/controllers/HomeController.php", HOME_CONTROLLER)?;
    test.write_file(".transcollect.json", r#"{"locale": ""}"#)?;

    assert_cmd_snapshot!(test.collect_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: There is no locale specified in this application.
    ");

    Ok(())
}

#[test]
fn test_collect_invalid_catalog_is_error() -> Result<()> {
    let test = CliTest::with_file("app/controllers/HomeController.php", HOME_CONTROLLER)?;
    test.write_file("lang/en/default.json", "[1, 2, 3]")?;

    let output = test.collect_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(test.read_file("lang/en/default.json")?, "[1, 2, 3]");

    Ok(())
}

#[test]
fn test_collect_ignores_quotes_in_comments() -> Result<()> {
    let test = CliTest::with_file(
        "app/controllers/HomeController.php",
        r#"<?php
// Don't forget the greeting
# it's the farewell too
/* Isn't this
   a block comment? */
echo trans('default.greeting');
echo trans('default.farewell'); // trans('default.commented')
"#,
    )?;

    let output = test.collect_command().output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert_eq!(
        test.read_json("lang/en/default.json")?,
        json!({"greeting": "", "farewell": ""})
    );

    Ok(())
}

#[test]
fn test_collect_lang_root_relative_to_project_root() -> Result<()> {
    let test = CliTest::with_file("app/controllers/HomeController.php", HOME_CONTROLLER)?;
    let elsewhere = TempDir::new()?;

    let output = test
        .collect_command()
        .current_dir(elsewhere.path())
        .arg("--root")
        .arg(test.root())
        .args(["--lang-root", "lang"])
        .output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert_eq!(
        test.read_json("lang/en/default.json")?,
        json!({"greeting": ""})
    );
    assert!(!elsewhere.path().join("lang").exists());

    Ok(())
}

#[test]
fn test_collect_skips_keys_blocked_by_existing_leaf() -> Result<()> {
    let test = CliTest::with_file(
        "app/controllers/NavController.php",
        "<?php\necho trans('default.nav.home');\n",
    )?;
    test.write_file("lang/en/default.json", r#"{"nav":"Navigation"}"#)?;

    let output = test.collect_command().output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(!stdout.contains("Updated file:"), "{stdout}");
    assert_eq!(
        test.read_file("lang/en/default.json")?,
        r#"{"nav":"Navigation"}"#
    );

    Ok(())
}

#[test]
fn test_collect_rejects_path_like_groups() -> Result<()> {
    let test = CliTest::with_file(
        "app/controllers/EvilController.php",
        "<?php\necho trans('a/../../escape.key');\necho trans('default.ok');\n",
    )?;

    let output = test.collect_command().output()?;
    assert!(output.status.success());

    assert_eq!(test.read_json("lang/en/default.json")?, json!({"ok": ""}));
    assert!(!test.root().join("escape.json").exists());
    assert!(!test.root().join("lang/escape.json").exists());

    Ok(())
}
