// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

// Allow expect/unwrap in tests - they provide clear panic messages on failure
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

fn checked_in_spec() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../openapi-specs/external/assets-api.json")
}

#[test]
fn test_checked_in_spec_only_needs_server_repair() {
    let (_, report) = client_generator::generate::load_patched(&checked_in_spec())
        .expect("load checked-in spec");

    assert_eq!(report.applied.len(), 1, "unexpected repairs:\n{}", report);
    assert!(report.applied[0].contains("server"));
}

#[test]
fn test_generate_client_writes_operations() {
    let out_dir = tempfile::tempdir().expect("temp dir");

    let out = client_generator::generate_client(&checked_in_spec(), out_dir.path())
        .expect("generate client");

    assert_eq!(out, out_dir.path().join(client_generator::GENERATED_FILE));
    let source = std::fs::read_to_string(&out).expect("read generated client");
    assert!(source.starts_with("// Generated by client-generator"));
    assert!(source.contains("pub struct Client"));
    for method in [
        "fn list_object_schemas",
        "fn list_object_types",
        "fn get_object",
        "fn create_object",
        "fn update_object",
        "fn delete_object",
        "fn search_objects",
        "fn get_object_history",
    ] {
        assert!(source.contains(method), "generated client lacks {}", method);
    }
}

#[test]
fn test_generate_client_missing_spec() {
    let out_dir = tempfile::tempdir().expect("temp dir");
    let err = client_generator::generate_client(&out_dir.path().join("nope.json"), out_dir.path())
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}
