// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod instruments;
mod sensitivity;
mod t_int;

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
    process::Output,
    str::from_utf8,
};

use assert_cmd::{output::OutputError, Command};

fn atlast_sc() -> Command {
    Command::cargo_bin("atlast-sc").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

fn make_file_in_dir<T: AsRef<Path>, U: AsRef<Path>>(filename: T, dir: U) -> (PathBuf, File) {
    let path = dir.as_ref().join(filename);
    let f = File::create(&path).expect("couldn't make file");
    (path, f)
}

/// Write `contents` to a new file in `dir` and return its path.
fn write_file_in_dir<T: AsRef<Path>, U: AsRef<Path>>(filename: T, dir: U, contents: &str) -> PathBuf {
    let (path, mut f) = make_file_in_dir(filename, dir);
    f.write_all(contents.as_bytes())
        .expect("couldn't write to file");
    path
}

#[test]
fn test_no_subcommand_prints_help() {
    let cmd = atlast_sc().ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("sensitivity"), "{stderr}");
    assert!(stderr.contains("t-int"), "{stderr}");
}

#[test]
fn test_unknown_instrument() {
    let cmd = atlast_sc()
        .args(["--instrument", "alma", "sensitivity"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Unrecognised instrument 'alma'"), "{stderr}");
    assert!(stderr.contains("finer, sepia"), "{stderr}");
}
