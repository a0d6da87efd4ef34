use anyhow::{bail, Context};
use std::collections::BTreeSet;

use crate::dispatcher::MethodRule;
use crate::source::{RawField, TaggedStruct};
use crate::validator::RuleKind;

/// One field's compiled rule, carried to the validator template.
///
/// Everything the template interpolates is pre-rendered here as Rust source
/// text, so the template itself stays free of formatting logic.
#[derive(Debug, Clone)]
pub struct CompiledField {
    pub field_name: String,
    pub param: String,
    pub required: bool,
    pub kind_lit: &'static str,
    pub accessor: &'static str,
    pub default_lit: String,
    pub min_lit: String,
    pub max_lit: String,
    pub allowed_lit: String,
}

/// Compiled validator mapping for one tagged struct.
#[derive(Debug, Clone)]
pub struct StructValidator {
    pub struct_name: String,
    pub fn_name: String,
    pub fields: Vec<CompiledField>,
}

/// Compile one tagged struct into its validator mapping.
///
/// Fields keep declaration order. A parameter name claimed by two fields of
/// the same struct is a fatal error.
pub fn compile_struct(tagged: &TaggedStruct) -> anyhow::Result<StructValidator> {
    let mut fields = Vec::new();
    let mut seen = BTreeSet::new();
    for raw in &tagged.fields {
        let Some(compiled) = compile_field(&tagged.name, raw)? else {
            continue;
        };
        if !seen.insert(compiled.param.clone()) {
            bail!(
                "struct `{}`: parameter name \"{}\" is claimed by more than one field",
                tagged.name,
                compiled.param
            );
        }
        fields.push(compiled);
    }
    Ok(StructValidator {
        fn_name: format!("validate_{}", to_snake_case(&tagged.name)),
        struct_name: tagged.name.clone(),
        fields,
    })
}

/// Compile one tagged field, or `None` for a bare marker with no clauses.
fn compile_field(owner: &str, raw: &RawField) -> anyhow::Result<Option<CompiledField>> {
    if raw.tag.trim().is_empty() {
        return Ok(None);
    }
    let kind = match raw.ty.as_str() {
        "String" => RuleKind::Str,
        "i64" => RuleKind::Int,
        _ => bail!(
            "field `{owner}.{}` has unsupported declared type; validators support String and i64 only",
            raw.name
        ),
    };

    let mut param = raw.name.to_lowercase();
    let mut required = false;
    let mut default = None;
    let mut min = None;
    let mut max = None;
    let mut allowed: Vec<String> = Vec::new();

    for clause in raw.tag.split(',') {
        let clause = clause.trim();
        if clause == "required" {
            required = true;
            continue;
        }
        if clause.matches('=').count() != 1 {
            bail!(
                "field `{owner}.{}`: clause \"{clause}\" must be `required` or a single `key=value` pair",
                raw.name
            );
        }
        let (key, value) = clause
            .split_once('=')
            .context("clause has no separator")?;
        match key {
            "paramname" => param = value.to_string(),
            "default" => default = Some(value.to_string()),
            "min" => {
                min = Some(value.parse::<i64>().with_context(|| {
                    format!("field `{owner}.{}`: min bound \"{value}\" is not an integer", raw.name)
                })?)
            }
            "max" => {
                max = Some(value.parse::<i64>().with_context(|| {
                    format!("field `{owner}.{}`: max bound \"{value}\" is not an integer", raw.name)
                })?)
            }
            "enum" => allowed = value.split('|').map(str::to_string).collect(),
            other => bail!("unknown validator \"{other}\" on field `{owner}.{}`", raw.name),
        }
    }

    let (kind_lit, accessor) = match kind {
        RuleKind::Str => ("RuleKind::Str", "string_value"),
        RuleKind::Int => ("RuleKind::Int", "int_value"),
    };
    Ok(Some(CompiledField {
        field_name: raw.name.clone(),
        param,
        required,
        kind_lit,
        accessor,
        default_lit: match &default {
            Some(v) => format!("Some({v:?})"),
            None => "None".to_string(),
        },
        min_lit: option_i64_lit(min),
        max_lit: option_i64_lit(max),
        allowed_lit: if allowed.is_empty() {
            "&[]".to_string()
        } else {
            let items: Vec<String> = allowed.iter().map(|v| format!("{v:?}")).collect();
            format!("&[{}]", items.join(", "))
        },
    }))
}

fn option_i64_lit(value: Option<i64>) -> String {
    match value {
        Some(n) => format!("Some({n})"),
        None => "None".to_string(),
    }
}

/// Rust source literal for a route's verb constraint.
pub fn method_rule_lit(rule: MethodRule) -> &'static str {
    match rule {
        MethodRule::Any => "MethodRule::Any",
        MethodRule::Get => "MethodRule::Get",
        MethodRule::Post => "MethodRule::Post",
    }
}

/// `CreateParams` → `create_params`; used for validator function names.
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
