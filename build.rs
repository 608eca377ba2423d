// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{env, path::PathBuf};

// Use the "built" crate to generate some useful build-time information,
// including the git hash and compiler version. Which information is collected
// is controlled by the crate's features in Cargo.toml.
fn write_built(out_dir: PathBuf) {
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not defined!"));
    built::write_built_file_with_opts(Some(&manifest_dir), &out_dir.join("built.rs"))
        .expect("Failed to acquire build-time information");
}

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR env. variable not defined!"));
    write_built(out_dir);
}
