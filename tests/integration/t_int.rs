// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests for the t-int subcommand.

use tempfile::TempDir;

use crate::*;

#[test]
fn test_t_int() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("result.toml");

    let cmd = atlast_sc()
        .args([
            "t-int",
            "--sensitivity",
            "1mJy",
            "--output",
            &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "{stderr}");
    assert!(stdout.contains("to reach a sensitivity of 1 mJy"), "{stdout}");
    assert!(!stdout.contains("Warnings"), "{stdout}");

    let contents = std::fs::read_to_string(&output).unwrap();
    let value: toml::Value = toml::from_str(&contents).unwrap();
    assert_eq!(value["calculated"].as_str(), Some("t_int"));
    assert_eq!(
        value["inputs"]["user_input"]["sensitivity"]["unit"].as_str(),
        Some("mJy")
    );
}

#[test]
fn test_unreachable_sensitivity_is_not_stored() {
    let cmd = atlast_sc()
        .args(["t-int", "--sensitivity", "0.5uJy"])
        .ok();
    // A calculated value out of range is only a warning.
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(
        stdout.contains("is outside of the permitted range for parameter 't_int'"),
        "{stdout}"
    );
    assert!(stdout.contains("Warnings"), "{stdout}");
    assert!(stdout.contains("The calculated t_int of"), "{stdout}");
    assert!(
        stdout.contains("The reported inputs keep t_int: 100 s"),
        "{stdout}"
    );
    // The stored integration time is untouched.
    assert!(stdout.contains("t_int: 100 s"), "{stdout}");
}

#[test]
fn test_zero_sensitivity_is_an_error() {
    let cmd = atlast_sc().args(["t-int", "--sensitivity", "0"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("Parameter 'sensitivity' must be within (0 mJy, inf)"),
        "{stderr}"
    );
}
