use anyhow::Context;
use askama::Template;

use super::compile::StructValidator;

/// One registered URL as the dispatch template renders it.
#[derive(Debug, Clone)]
pub struct RouteData {
    pub url: String,
    pub auth: bool,
    pub method_lit: &'static str,
    /// Business method the generated closure invokes.
    pub target: String,
    /// Generated validator the closure populates the argument struct with.
    pub validate_fn: String,
}

/// All routes grouped under one receiver type.
#[derive(Debug, Clone)]
pub struct ApiSurface {
    pub receiver: String,
    pub routes: Vec<RouteData>,
}

/// Template data for the dispatch wrapper pass.
#[derive(Template)]
#[template(path = "dispatch.rs.txt", escape = "none")]
pub struct DispatchTemplateData {
    pub surfaces: Vec<ApiSurface>,
}

/// Template data for the validator function pass.
#[derive(Template)]
#[template(path = "validator.rs.txt", escape = "none")]
pub struct ValidatorTemplateData {
    pub structs: Vec<StructValidator>,
}

pub fn render_dispatchers(surfaces: Vec<ApiSurface>) -> anyhow::Result<String> {
    DispatchTemplateData { surfaces }
        .render()
        .context("failed to render dispatch template")
}

pub fn render_validators(structs: Vec<StructValidator>) -> anyhow::Result<String> {
    ValidatorTemplateData { structs }
        .render()
        .context("failed to render validator template")
}
