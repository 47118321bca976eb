// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Repairs for the published Assets OpenAPI document
//!
//! Atlassian's document is written for its own generators and trips up
//! progenitor in a handful of known ways. Each rule here fixes one of them
//! and records what it touched, so `client-generator patch` can show the
//! diff in prose. Every rule is idempotent: patching a patched document is
//! a no-op with an empty report.

use openapiv3::{OpenAPI, Operation, Parameter, PathItem, ReferenceOr, StatusCode};
use std::collections::HashSet;
use std::fmt;

/// Human-readable record of the repairs made to a document
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PatchReport {
    pub applied: Vec<String>,
}

impl PatchReport {
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    fn note(&mut self, message: String) {
        tracing::debug!("{}", message);
        self.applied.push(message);
    }
}

impl fmt::Display for PatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.applied {
            writeln!(f, "- {}", line)?;
        }
        Ok(())
    }
}

/// Apply every repair, in order.
pub fn apply(openapi: &mut OpenAPI) -> PatchReport {
    let mut report = PatchReport::default();
    strip_servers(openapi, &mut report);
    fill_operation_ids(openapi, &mut report);
    dedupe_operation_ids(openapi, &mut report);
    require_path_parameters(openapi, &mut report);
    single_success_response(openapi, &mut report);
    report
}

/// The base URL is chosen at runtime (workspace-scoped or legacy), so the
/// templated `servers` entries only get in the way.
fn strip_servers(openapi: &mut OpenAPI, report: &mut PatchReport) {
    if !openapi.servers.is_empty() {
        report.note(format!(
            "removed {} top-level server entr{}",
            openapi.servers.len(),
            if openapi.servers.len() == 1 { "y" } else { "ies" }
        ));
        openapi.servers.clear();
    }

    for (path, item) in path_items_mut(openapi) {
        if !item.servers.is_empty() {
            item.servers.clear();
            report.note(format!("removed server entries from {}", path));
        }
        for (method, op) in operations_mut(item) {
            if !op.servers.is_empty() {
                op.servers.clear();
                report.note(format!("removed server entries from {} {}", method, path));
            }
        }
    }
}

/// progenitor names builder methods after `operationId` and refuses
/// operations without one.
fn fill_operation_ids(openapi: &mut OpenAPI, report: &mut PatchReport) {
    for (path, item) in path_items_mut(openapi) {
        for (method, op) in operations_mut(item) {
            let missing = op.operation_id.as_deref().is_none_or(|id| id.trim().is_empty());
            if missing {
                let id = synthesized_operation_id(method, &path);
                report.note(format!("set operationId of {} {} to {}", method, path, id));
                op.operation_id = Some(id);
            }
        }
    }
}

fn dedupe_operation_ids(openapi: &mut OpenAPI, report: &mut PatchReport) {
    let all: HashSet<String> = path_items_mut(openapi)
        .flat_map(|(_, item)| operations_mut(item).filter_map(|(_, op)| op.operation_id.clone()))
        .collect();

    let mut seen: HashSet<String> = HashSet::new();
    for (path, item) in path_items_mut(openapi) {
        for (method, op) in operations_mut(item) {
            let Some(id) = op.operation_id.clone() else {
                continue;
            };
            if seen.insert(id.clone()) {
                continue;
            }

            let mut n = 2;
            let renamed = loop {
                let candidate = format!("{}_{}", id, n);
                if !all.contains(&candidate) && !seen.contains(&candidate) {
                    break candidate;
                }
                n += 1;
            };
            report.note(format!(
                "renamed duplicate operationId {} on {} {} to {}",
                id, method, path, renamed
            ));
            seen.insert(renamed.clone());
            op.operation_id = Some(renamed);
        }
    }
}

/// OpenAPI requires path parameters to be `required: true`; the published
/// document omits the flag on several of them.
fn require_path_parameters(openapi: &mut OpenAPI, report: &mut PatchReport) {
    for (path, item) in path_items_mut(openapi) {
        for param in item.parameters.iter_mut() {
            if let ReferenceOr::Item(Parameter::Path { parameter_data, .. }) = param
                && !parameter_data.required
            {
                parameter_data.required = true;
                report.note(format!(
                    "marked path parameter {} of {} as required",
                    parameter_data.name, path
                ));
            }
        }
        for (method, op) in operations_mut(item) {
            for param in op.parameters.iter_mut() {
                if let ReferenceOr::Item(Parameter::Path { parameter_data, .. }) = param
                    && !parameter_data.required
                {
                    parameter_data.required = true;
                    report.note(format!(
                        "marked path parameter {} of {} {} as required",
                        parameter_data.name, method, path
                    ));
                }
            }
        }
    }
}

/// progenitor 0.13 asserts `response_types.len() <= 1` while generating a
/// method; keep the first success response that carries a body.
fn single_success_response(openapi: &mut OpenAPI, report: &mut PatchReport) {
    for (path, item) in path_items_mut(openapi) {
        for (method, op) in operations_mut(item) {
            let success: Vec<StatusCode> = op
                .responses
                .responses
                .keys()
                .filter(|code| is_success(code))
                .cloned()
                .collect();
            if success.len() <= 1 {
                continue;
            }

            let keep = success
                .iter()
                .find(|code| {
                    matches!(
                        op.responses.responses.get(*code),
                        Some(ReferenceOr::Item(response)) if !response.content.is_empty()
                    )
                })
                .or_else(|| success.first())
                .cloned();
            let Some(keep) = keep else {
                continue;
            };

            op.responses
                .responses
                .retain(|code, _| !is_success(code) || *code == keep);
            report.note(format!(
                "kept only the {} response of {} {} (dropped {})",
                status_label(&keep),
                method,
                path,
                success
                    .iter()
                    .filter(|code| **code != keep)
                    .map(status_label)
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
    }
}

fn is_success(code: &StatusCode) -> bool {
    match code {
        StatusCode::Code(n) => (200..300).contains(n),
        StatusCode::Range(n) => *n == 2,
    }
}

fn status_label(code: &StatusCode) -> String {
    match code {
        StatusCode::Code(n) => n.to_string(),
        StatusCode::Range(n) => format!("{}XX", n),
    }
}

/// `get /object/{id}/history` becomes `get_object_id_history`.
fn synthesized_operation_id(method: &str, path: &str) -> String {
    let slug = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment
                .trim_start_matches('{')
                .trim_end_matches('}')
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("_");

    if slug.is_empty() {
        method.to_string()
    } else {
        format!("{}_{}", method, slug)
    }
}

fn path_items_mut(openapi: &mut OpenAPI) -> impl Iterator<Item = (String, &mut PathItem)> {
    openapi.paths.paths.iter_mut().filter_map(|(path, item)| match item {
        ReferenceOr::Item(item) => Some((path.clone(), item)),
        ReferenceOr::Reference { .. } => None,
    })
}

fn operations_mut(item: &mut PathItem) -> impl Iterator<Item = (&'static str, &mut Operation)> {
    [
        ("get", item.get.as_mut()),
        ("put", item.put.as_mut()),
        ("post", item.post.as_mut()),
        ("delete", item.delete.as_mut()),
        ("options", item.options.as_mut()),
        ("head", item.head.as_mut()),
        ("patch", item.patch.as_mut()),
        ("trace", item.trace.as_mut()),
    ]
    .into_iter()
    .filter_map(|(method, op)| op.map(|op| (method, op)))
}
