// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

use std::env;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = env::var("OUT_DIR")?;

    // Fetched with `cargo run -p client-generator -- fetch`
    let spec_path = "../../../openapi-specs/external/assets-api.json";

    assert!(Path::new(spec_path).exists(), "{spec_path} does not exist!");
    println!("cargo:rerun-if-changed={}", spec_path);

    // Same repairs and settings as runtime regeneration
    let (openapi, report) = client_generator::generate::load_patched(Path::new(spec_path))?;
    for line in &report.applied {
        eprintln!("patched {}: {}", spec_path, line);
    }

    let settings = client_generator::generation_settings();
    let tokens = progenitor::Generator::new(&settings).generate_tokens(&openapi)?;
    std::fs::write(
        format!("{}/{}", out_dir, client_generator::GENERATED_FILE),
        tokens.to_string(),
    )?;

    Ok(())
}
