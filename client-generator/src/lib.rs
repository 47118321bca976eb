// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Assets API client generator
//!
//! The pipeline that turns Atlassian's published Assets OpenAPI document into
//! the Rust client compiled into `assets-client`:
//!
//! 1. [`fetch`] downloads the document and stores it under `openapi-specs/`
//! 2. [`patch`] repairs the parts of the document progenitor cannot digest
//! 3. [`generate`] runs progenitor and writes the client source
//!
//! `assets-client/build.rs` uses [`patch`] and [`generate::generation_settings`]
//! directly, so the build-time client and a runtime regeneration always agree.

pub mod fetch;
pub mod generate;
pub mod patch;

pub use fetch::{DEFAULT_SPEC_URL, fetch_spec};
pub use generate::{GENERATED_FILE, generate_client, generate_source, generation_settings};
pub use patch::PatchReport;
