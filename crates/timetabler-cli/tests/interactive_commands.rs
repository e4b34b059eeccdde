//! The interactive commands need a terminal. Under the test harness stdout
//! is a pipe, which exercises the checks that run before the TUI starts.

use anyhow::Result;
use predicates::prelude::*;
use timetabler_testing::{TestWorld, fixtures};

#[test]
fn test_open_missing_file_fails_before_terminal_check() -> Result<()> {
    let world = TestWorld::new();
    let path = world.data_dir().join("missing.json");

    let result = world.run(&["open", path.to_str().unwrap()])?;
    assert_eq!(result.code(), Some(2));
    assert!(result.stderr().contains("Failed to open"));
    Ok(())
}

#[test]
fn test_open_invalid_file() -> Result<()> {
    let world = TestWorld::new();
    let path = world.write_document("broken.json", &fixtures::dangling_subject_document())?;

    let result = world.run(&["open", path.to_str().unwrap()])?;
    assert_eq!(result.code(), Some(2));
    Ok(())
}

#[test]
fn test_open_valid_file_without_terminal() -> Result<()> {
    let world = TestWorld::new();
    let path = world.write_document("year_10.json", &fixtures::sample_document())?;

    let result = world.run(&["open", path.to_str().unwrap()])?;
    assert_eq!(result.code(), Some(3));
    assert!(result.stderr().contains("not a terminal"));
    assert!(!result.stdout().contains("Goodbye."));
    Ok(())
}

#[test]
fn test_launcher_and_wizard_without_terminal() -> Result<()> {
    let world = TestWorld::new();
    for args in [&[][..], &["new"][..]] {
        #[allow(deprecated)]
        let mut cmd = assert_cmd::Command::cargo_bin("timetabler")?;
        world.configure_command(&mut cmd);
        cmd.args(args);
        cmd.assert()
            .code(3)
            .stderr(predicate::str::contains("Standard output is not a terminal"));
    }
    Ok(())
}

#[test]
fn test_log_file_is_written_to_workspace() -> Result<()> {
    let world = TestWorld::new();
    world.write_document("year_10.json", &fixtures::sample_document())?;

    let result = world.run(&["list", "--log-level", "debug"])?;
    assert!(result.success());

    let log = std::fs::read_to_string(world.workspace().join("timetabler.log"))?;
    assert!(log.contains("listing timetables"));
    Ok(())
}

#[test]
fn test_help_lists_commands() -> Result<()> {
    let world = TestWorld::new();
    let result = world.run(&["--help"])?;
    assert!(result.success());
    for command in ["open", "new", "list", "validate", "--workspace", "--data-dir"] {
        assert!(result.stdout().contains(command), "missing {command}");
    }
    Ok(())
}
