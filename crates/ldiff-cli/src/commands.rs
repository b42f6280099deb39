use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use ldiff_diff::{diff_snapshots_with, ChangeScript};
use ldiff_parser::parse_snapshot_with;
use ldiff_types::EntrySnapshot;
use serde_json::json;
use tracing::{debug, info};

use crate::cli::*;
use crate::config::LdiffConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => LdiffConfig::load(path)?,
        None => LdiffConfig::default(),
    };
    match cli.command {
        Command::Diff(args) => cmd_diff(args, config, &cli.format),
        Command::Check(args) => cmd_check(args, config, &cli.format),
    }
}

fn load_snapshot(path: &Path, config: &LdiffConfig) -> anyhow::Result<EntrySnapshot> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read input file {}", path.display()))?;
    let snapshot = parse_snapshot_with(&text, &config.parser)
        .with_context(|| format!("could not parse {}", path.display()))?;
    Ok(snapshot)
}

fn render(script: &ChangeScript, format: &OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(script.to_ldif()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(script)? + "\n"),
    }
}

fn cmd_diff(args: DiffArgs, config: LdiffConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let config = config.with_overrides(&args.policy);

    let current = load_snapshot(&args.current, &config)?;
    let target = load_snapshot(&args.new, &config)?;

    if args.debug {
        debug!(path = %args.current.display(), "current snapshot:\n{current}");
        debug!(path = %args.new.display(), "new snapshot:\n{target}");
    }

    let script = diff_snapshots_with(&target, &current, &config.diff);
    let rendered = render(&script, format)?;

    match &args.output {
        Some(path) => fs::write(path, &rendered)
            .with_context(|| format!("could not write {}", path.display()))?,
        None => std::io::stdout()
            .write_all(rendered.as_bytes())
            .context("could not write to stdout")?,
    }
    info!(changes = script.len(), "change script written");

    if args.stat {
        print_stat(&script);
    }
    Ok(())
}

fn print_stat(script: &ChangeScript) {
    if script.is_empty() {
        eprintln!("{} Snapshots are equivalent.", "✓".green().bold());
        return;
    }
    eprintln!(
        "{} entries to add, {} to delete, {} to modify",
        script.additions().to_string().green(),
        script.deletions().to_string().red(),
        script.modifications().to_string().yellow(),
    );
}

fn cmd_check(args: CheckArgs, config: LdiffConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let config = config.with_overrides(&args.policy);
    let mut failures = 0usize;
    let mut report = Vec::new();

    for path in &args.files {
        match load_snapshot(path, &config) {
            Ok(snapshot) => {
                if matches!(format, OutputFormat::Text) {
                    println!("{} {}: {} entries", "✓".green().bold(), path.display(), snapshot.len());
                }
                report.push(json!({ "file": path.display().to_string(), "entries": snapshot.len() }));
            }
            Err(e) => {
                failures += 1;
                if matches!(format, OutputFormat::Text) {
                    println!("{} {}: {:#}", "✗".red().bold(), path.display(), e);
                }
                report.push(json!({ "file": path.display().to_string(), "error": format!("{e:#}") }));
            }
        }
    }

    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    if failures > 0 {
        bail!("{failures} of {} files failed to parse", args.files.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn write(dir: &Path, name: &str, contents: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path.display().to_string()
    }

    fn run(args: &[&str]) -> anyhow::Result<()> {
        run_command(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn diff_writes_ldif_to_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let current = write(dir.path(), "current.ldif", "dn: a\ncn: X\n\n");
        let new = write(dir.path(), "new.ldif", "dn: a\ncn: Y\n\n");
        let out = dir.path().join("out.ldif");

        run(&["ldiff", "diff", "--current", &current, "--new", &new, "-o", out.to_str().unwrap()]).unwrap();

        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "dn: a\nchangetype: modify\n-\ndelete: cn\ncn: X\n-\nadd: cn\ncn: Y\n\n"
        );
    }

    #[test]
    fn diff_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let current = write(dir.path(), "current.ldif", "");
        let new = write(dir.path(), "new.ldif", "dn: b\nobjectClass: top\n");
        let out = dir.path().join("out.json");

        run(&["ldiff", "--format", "json", "diff", "--current", &current, "--new", &new, "-o", out.to_str().unwrap()]).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(value["changes"][0]["changetype"], "add");
        assert_eq!(value["changes"][0]["dn"], "b");
    }

    #[test]
    fn diff_applies_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = write(dir.path(), "ldiff.toml", "[diff]\nattribute_case = \"insensitive\"\n");
        let current = write(dir.path(), "current.ldif", "dn: a\nobjectclass: top\n");
        let new = write(dir.path(), "new.ldif", "dn: a\nobjectClass: top\n");
        let out = dir.path().join("out.ldif");

        run(&["ldiff", "--config", &config, "diff", "--current", &current, "--new", &new, "-o", out.to_str().unwrap()]).unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap(), "");
    }

    #[test]
    fn diff_fails_on_malformed_input() {
        let dir = tempfile::tempdir().unwrap();
        let current = write(dir.path(), "current.ldif", "foo\n");
        let new = write(dir.path(), "new.ldif", "dn: a\n");
        let out = dir.path().join("out.ldif");

        let err = run(&["ldiff", "diff", "--current", &current, "--new", &new, "-o", out.to_str().unwrap()]).unwrap_err();

        assert!(format!("{err:#}").contains("malformed line"));
        assert!(!out.exists());
    }

    #[test]
    fn diff_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let new = write(dir.path(), "new.ldif", "dn: a\n");
        let missing = dir.path().join("nope.ldif");

        let err = run(&["ldiff", "diff", "--current", missing.to_str().unwrap(), "--new", &new]).unwrap_err();

        assert!(err.to_string().contains("could not read input file"));
    }

    #[test]
    fn check_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(dir.path(), "good.ldif", "dn: a\n");
        let bad = write(dir.path(), "bad.ldif", "dn: a\ndn: b\n");

        assert!(run(&["ldiff", "check", &good]).is_ok());
        let err = run(&["ldiff", "check", &good, &bad]).unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 files failed to parse");
    }

    #[test]
    fn check_honours_policy_override() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "orphan.ldif", "cn: orphan\n\ndn: a\n");

        assert!(run(&["ldiff", "check", &file]).is_err());
        assert!(run(&["ldiff", "check", "--missing-dn", "skip", &file]).is_ok());
    }
}
