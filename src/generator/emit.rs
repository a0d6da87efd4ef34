use anyhow::{bail, Context};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::compile::{compile_struct, method_rule_lit, to_snake_case, StructValidator};
use super::templates::{render_dispatchers, render_validators, ApiSurface, RouteData};
use crate::source::{load_source, scan_file, ScanOutcome};

/// Fixed preamble of every generated file. Generated code resolves its
/// runtime types from this crate and serializes results via `serde_json`.
const HEADER: &str = "\
// Code generated by apigen. DO NOT EDIT.

use apigen::dispatcher::{dispatch, ApiRequest, ApiResponse, MethodRule, Params, Route};
use apigen::validator::{FieldRule, RuleKind, ValidationError};
";

/// Run the whole pipeline for one source file: load, scan, compile, render,
/// write.
///
/// Both rendering passes complete in memory before anything is written, so
/// a fatal error never leaves a partial output file behind.
pub fn generate(source: &Path, output: &Path) -> anyhow::Result<()> {
    let file = load_source(source)?;
    let outcome = scan_file(&file)?;
    let surfaces = outcome.methods.len();
    let validators = outcome.structs.len();
    let rendered = render_output(&outcome)?;
    fs::write(output, rendered)
        .with_context(|| format!("failed to write generated code to {output:?}"))?;
    println!("✅ Generated {surfaces} dispatcher(s) and {validators} validator(s) → {output:?}");
    Ok(())
}

/// Render both passes into the final output text.
///
/// Receivers render in lexicographic order; routes sort by URL then
/// declaration order; structs render in lexicographic name order with fields
/// in declaration order. Identical input therefore always yields identical
/// bytes.
pub fn render_output(outcome: &ScanOutcome) -> anyhow::Result<String> {
    let mut validators = outcome
        .structs
        .iter()
        .map(compile_struct)
        .collect::<anyhow::Result<Vec<StructValidator>>>()?;
    validators.sort_by(|a, b| a.struct_name.cmp(&b.struct_name));
    let validated: BTreeSet<&str> = validators.iter().map(|s| s.struct_name.as_str()).collect();

    let mut surfaces = Vec::new();
    for (receiver, methods) in &outcome.methods {
        let mut methods = methods.clone();
        methods.sort_by(|a, b| a.url.cmp(&b.url).then(a.decl_index.cmp(&b.decl_index)));
        let mut routes = Vec::new();
        for method in &methods {
            if !validated.contains(method.arg_type.as_str()) {
                bail!(
                    "method `{receiver}::{}`: argument struct `{}` carries no apivalidator fields",
                    method.target,
                    method.arg_type
                );
            }
            routes.push(RouteData {
                url: method.url.clone(),
                auth: method.auth,
                method_lit: method_rule_lit(method.method),
                target: method.target.clone(),
                validate_fn: format!("validate_{}", to_snake_case(&method.arg_type)),
            });
        }
        debug!(receiver = %receiver, routes = routes.len(), "compiled api surface");
        surfaces.push(ApiSurface {
            receiver: receiver.clone(),
            routes,
        });
    }

    let dispatchers = render_dispatchers(surfaces)?;
    let validator_fns = render_validators(validators)?;
    Ok(format!("{HEADER}{dispatchers}{validator_fns}"))
}
