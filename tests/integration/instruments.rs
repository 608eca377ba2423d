// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests for the instruments subcommand.

use indoc::indoc;
use tempfile::TempDir;

use crate::*;

#[test]
fn test_applicable_instruments() {
    let cmd = atlast_sc()
        .args(["instruments", "--obs-freq", "300GHz", "--bandwidth", "16GHz"])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("finer"), "{stdout}");
    assert!(stdout.contains("sepia"), "{stdout}");
    assert!(!stdout.contains("tifuun"), "{stdout}");
}

#[test]
fn test_no_applicable_instruments() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let args_file = write_file_in_dir(
        "args.yaml",
        tmp_dir.path(),
        indoc! {r#"
            user_input:
              obs_freq:
                value: 40
                unit: GHz
        "#},
    );
    let output = tmp_dir.path().join("instruments.json");

    let cmd = atlast_sc()
        .args([
            "instruments",
            &format!("{}", args_file.display()),
            "--output",
            &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("No instruments cover"), "{stdout}");

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(value["instruments"], serde_json::json!([]));
    assert_eq!(value["obs_freq"]["value"], 40.0);
}

#[test]
fn test_list_all_coverage() {
    let cmd = atlast_sc().args(["instruments", "--all"]).ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Instrument coverage"), "{stdout}");
    assert!(stdout.contains("gltcam"), "{stdout}");
    assert!(stdout.contains("frequencies: (120, 360) GHz"), "{stdout}");
    assert!(
        stdout.contains("frequencies: (163, 211), (272, 376), (600, 722) GHz"),
        "{stdout}"
    );
    assert!(stdout.contains("bandwidths: (10, 1000) MHz"), "{stdout}");
}
