use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;

fn temp_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn split_stdin_as_simple_listing() {
    let mut cmd = cargo_bin_cmd!("chatmark");
    cmd.args(["split", "--format", "simple"])
        .write_stdin("ping <!here> ```<b>```\n");

    cmd.assert()
        .success()
        .stdout("text: \"ping \"\ngroup_mention: here\ntext: \" \"\npre: \"<b>\"\n");
}

#[test]
fn split_file_as_json() {
    let message = temp_file(".txt", "see <#C024BE7LR|general>\n");
    let mut cmd = cargo_bin_cmd!("chatmark");
    cmd.arg("split").arg(message.path()).arg("--compact");

    cmd.assert().success().stdout(
        predicate::str::contains(r#""kind":"channel""#)
            .and(predicate::str::contains(r#""value":"C024BE7LR""#))
            .and(predicate::str::contains(r#""human":"general""#)),
    );
}

#[test]
fn dangling_bracket_fails_cleanly() {
    let mut cmd = cargo_bin_cmd!("chatmark");
    cmd.arg("split").write_stdin("a <b");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Parse error").and(predicate::str::contains("byte 2")));
}

#[test]
fn error_position_counts_text_before_fences() {
    let mut cmd = cargo_bin_cmd!("chatmark");
    cmd.arg("split").write_stdin("```x``` <b");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("'<' at byte 8"));
}

#[test]
fn strict_rejects_open_fence() {
    let mut cmd = cargo_bin_cmd!("chatmark");
    cmd.args(["split", "--strict"]).write_stdin("```open");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unterminated code fence"));

    let mut cmd = cargo_bin_cmd!("chatmark");
    cmd.arg("split").write_stdin("```open");
    cmd.assert().success();
}

#[test]
fn item_reports_kind_value_and_label() {
    let mut cmd = cargo_bin_cmd!("chatmark");
    cmd.args(["item", "<http://ciccio|link>", "--format", "simple"]);
    cmd.assert()
        .success()
        .stdout("kind: other\nvalue: http://ciccio\nhuman: link\n");
}

#[test]
fn item_rejects_unbracketed_text() {
    let mut cmd = cargo_bin_cmd!("chatmark");
    cmd.args(["item", "@ciccio"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid special item"));
}

#[test]
fn correct_prints_sed_expression() {
    let mut cmd = cargo_bin_cmd!("chatmark");
    cmd.args(["correct", "a b c", "a x c"]);
    cmd.assert().success().stdout("s/b/x/\n");

    let mut cmd = cargo_bin_cmd!("chatmark");
    cmd.args(["correct", "same", "same"]);
    cmd.assert().success().stdout("");
}

#[test]
fn config_file_sets_format_and_unescaping() {
    let config = temp_file(
        ".toml",
        "[output]\nformat = \"simple\"\n\n[parsing]\nunescape_entities = true\n",
    );
    let mut cmd = cargo_bin_cmd!("chatmark");
    cmd.arg("--config")
        .arg(config.path())
        .arg("split")
        .write_stdin("1 &lt; 2");

    cmd.assert().success().stdout("text: \"1 < 2\"\n");
}

#[test]
fn missing_config_file_is_reported() {
    let mut cmd = cargo_bin_cmd!("chatmark");
    cmd.args(["--config", "/nonexistent/chatmark.toml", "split"])
        .write_stdin("x");
    cmd.assert()
        .failure()
        .stderr(predicate::str::starts_with("Configuration error"));
}
