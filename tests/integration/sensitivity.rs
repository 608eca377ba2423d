// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests for the sensitivity subcommand.

use indoc::indoc;
use serde_json::Value;
use tempfile::TempDir;

use crate::*;

#[test]
fn test_defaults() {
    let cmd = atlast_sc().arg("sensitivity").ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "{stderr}");
    assert!(stdout.contains("mJy after 100 s of integration"), "{stdout}");
    assert!(stdout.contains("SEFD"), "{stdout}");
    assert!(stdout.contains("atlast-sc sensitivity complete."), "{stdout}");
}

#[test]
fn test_wide_band_with_output() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("result.json");

    let cmd = atlast_sc()
        .args([
            "sensitivity",
            "--bandwidth",
            "7.5GHz",
            "--t-int",
            "1h",
            "--output",
            &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("uJy after 1 h of integration"), "{stdout}");

    let contents = std::fs::read_to_string(&output).unwrap();
    let value: Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(value["calculated"], "sensitivity");
    assert_eq!(value["result"]["unit"], "uJy");
    assert_eq!(value["inputs"]["user_input"]["t_int"]["unit"], "h");
    assert_eq!(value["inputs"]["user_input"]["bandwidth"]["value"], 7.5);
    assert_eq!(value["finetune"], false);
}

#[test]
fn test_arguments_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let args_file = write_file_in_dir(
        "args.toml",
        tmp_dir.path(),
        indoc! {r#"
            [user_input]
            obs_freq = { value = 230, unit = "GHz" }
            t_int = { value = 10, unit = "min" }

            [instrument_setup]
            dish_radius = { value = 20, unit = "m" }
        "#},
    );
    let output = tmp_dir.path().join("result.yaml");

    let cmd = atlast_sc()
        .args([
            "sensitivity",
            &format!("{}", args_file.display()),
            // Flags beat the file.
            "--t-int",
            "20min",
            "-o",
            &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("after 20 min of integration"), "{stdout}");
    assert!(stdout.contains("obs_freq: 230 GHz"), "{stdout}");
    assert!(stdout.contains("dish_radius: 20 m"), "{stdout}");

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(contents.contains("calculated: sensitivity"), "{contents}");
}

#[test]
fn test_finetune_and_instrument() {
    let cmd = atlast_sc()
        .args([
            "--finetune",
            "--instrument",
            "FINER",
            "sensitivity",
            "--obs-freq",
            "150GHz",
            "--bandwidth",
            "16GHz",
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("T_rx: 45.00 K"), "{stdout}");
    assert!(!stdout.contains("doesn't cover"), "{stdout}");
}

#[test]
fn test_instrument_that_does_not_cover_the_band() {
    let cmd = atlast_sc()
        .args(["--instrument", "finer", "sensitivity"])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(
        stdout.contains("The instrument 'finer' doesn't cover an observing frequency of 100 GHz"),
        "{stdout}"
    );
}

#[test]
fn test_invalid_inputs() {
    let cmd = atlast_sc().args(["sensitivity", "--n-pol", "3"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("Parameter 'n_pol' must be one of {1, 2}, but got 3."),
        "{stderr}"
    );

    let cmd = atlast_sc()
        .args(["sensitivity", "--elevation", "10deg"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Parameter 'elevation' must be within"), "{stderr}");

    let cmd = atlast_sc()
        .args(["sensitivity", "--obs-freq", "100 parsecs"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("100 parsecs"), "{stderr}");
}

#[test]
fn test_unknown_parameter_in_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let args_file = write_file_in_dir(
        "args.json",
        tmp_dir.path(),
        indoc! {r#"
            {
                "user_input": {
                    "foo": { "value": 1 }
                }
            }
        "#},
    );

    let cmd = atlast_sc()
        .args(["sensitivity", &format!("{}", args_file.display())])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("\"foo\" is not a valid user input parameter"),
        "{stderr}"
    );
}
