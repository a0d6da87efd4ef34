#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::source::{parse_source, scan_file, RawField, TaggedStruct};

fn raw_field(name: &str, ty: &str, tag: &str) -> RawField {
    RawField {
        name: name.to_string(),
        ty: ty.to_string(),
        tag: tag.to_string(),
    }
}

fn tagged(name: &str, fields: Vec<RawField>) -> TaggedStruct {
    TaggedStruct {
        name: name.to_string(),
        fields,
    }
}

#[test]
fn test_to_snake_case() {
    assert_eq!(to_snake_case("ProfileParams"), "profile_params");
    assert_eq!(to_snake_case("OtherCreateParams"), "other_create_params");
    assert_eq!(to_snake_case("User"), "user");
    assert_eq!(to_snake_case(""), "");
}

#[test]
fn test_compile_full_clause_grammar() {
    let sv = compile_struct(&tagged(
        "CreateParams",
        vec![
            raw_field("login", "String", "required, min=10"),
            raw_field("name", "String", "paramname=full_name"),
            raw_field("status", "String", "enum=user|moderator|admin, default=user"),
            raw_field("age", "i64", "min=0, max=128"),
        ],
    ))
    .unwrap();

    assert_eq!(sv.fn_name, "validate_create_params");
    assert_eq!(sv.fields.len(), 4);

    let login = &sv.fields[0];
    assert!(login.required);
    assert_eq!(login.param, "login");
    assert_eq!(login.min_lit, "Some(10)");
    assert_eq!(login.max_lit, "None");
    assert_eq!(login.accessor, "string_value");

    let name = &sv.fields[1];
    assert_eq!(name.param, "full_name");
    assert!(!name.required);

    let status = &sv.fields[2];
    assert_eq!(status.default_lit, "Some(\"user\")");
    assert_eq!(status.allowed_lit, "&[\"user\", \"moderator\", \"admin\"]");

    let age = &sv.fields[3];
    assert_eq!(age.kind_lit, "RuleKind::Int");
    assert_eq!(age.accessor, "int_value");
    assert_eq!(age.min_lit, "Some(0)");
    assert_eq!(age.max_lit, "Some(128)");
}

#[test]
fn test_param_name_defaults_to_lowercased_field() {
    let sv = compile_struct(&tagged(
        "Params",
        vec![raw_field("Login", "String", "required")],
    ))
    .unwrap();
    assert_eq!(sv.fields[0].param, "login");
}

#[test]
fn test_short_tag_compiles_to_no_rules() {
    let sv = compile_struct(&tagged("Params", vec![raw_field("login", "String", "")])).unwrap();
    assert!(sv.fields.is_empty());
    let sv = compile_struct(&tagged("Params", vec![raw_field("login", "String", "   ")])).unwrap();
    assert!(sv.fields.is_empty());
}

#[test]
fn test_unknown_validator_key_is_fatal() {
    let err = compile_struct(&tagged(
        "Params",
        vec![raw_field("login", "String", "pattern=abc")],
    ))
    .unwrap_err();
    assert!(err.to_string().contains("unknown validator"), "{err}");
}

#[test]
fn test_clause_without_separator_is_fatal() {
    let err = compile_struct(&tagged(
        "Params",
        vec![raw_field("login", "String", "mandatory")],
    ))
    .unwrap_err();
    assert!(err.to_string().contains("key=value"), "{err}");
}

#[test]
fn test_clause_with_two_separators_is_fatal() {
    assert!(compile_struct(&tagged(
        "Params",
        vec![raw_field("login", "String", "default=a=b")],
    ))
    .is_err());
}

#[test]
fn test_non_integer_bound_is_fatal() {
    let err = compile_struct(&tagged(
        "Params",
        vec![raw_field("age", "i64", "min=ten")],
    ))
    .unwrap_err();
    assert!(err.to_string().contains("not an integer"), "{err}");
}

#[test]
fn test_unsupported_field_type_is_fatal() {
    let err = compile_struct(&tagged(
        "Params",
        vec![raw_field("flag", "bool", "required")],
    ))
    .unwrap_err();
    assert!(err.to_string().contains("unsupported declared type"), "{err}");
}

#[test]
fn test_duplicate_param_name_is_fatal() {
    let err = compile_struct(&tagged(
        "Params",
        vec![
            raw_field("login", "String", "required"),
            raw_field("user", "String", "paramname=login"),
        ],
    ))
    .unwrap_err();
    assert!(err.to_string().contains("more than one field"), "{err}");
}

const FIXTURE: &str = r#"
pub struct MyApi;

#[derive(Default)]
pub struct ProfileParams {
    #[apivalidator("required")]
    pub login: String,
}

impl MyApi {
    /// apigen:api {"url": "/user/profile", "auth": false}
    pub fn profile(&self, params: ProfileParams) -> Result<u64, ApiError> {
        Ok(1)
    }
}
"#;

#[test]
fn test_render_output_contains_both_passes() {
    let file = parse_source(FIXTURE).unwrap();
    let outcome = scan_file(&file).unwrap();
    let text = render_output(&outcome).unwrap();

    assert!(text.starts_with("// Code generated by apigen. DO NOT EDIT."));
    assert!(text.contains("impl MyApi {"));
    assert!(text.contains("pub fn serve_http(&self, req: &ApiRequest) -> ApiResponse"));
    assert!(text.contains("url: \"/user/profile\""));
    assert!(text.contains("method: MethodRule::Any"));
    assert!(text.contains("validate_profile_params(params)?"));
    assert!(text.contains("pub fn validate_profile_params(params: &Params)"));
    assert!(text.contains("required: true"));
}

#[test]
fn test_render_output_is_deterministic() {
    let file = parse_source(FIXTURE).unwrap();
    let outcome = scan_file(&file).unwrap();
    let first = render_output(&outcome).unwrap();
    let second = render_output(&outcome).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_method_without_validated_arg_struct_is_fatal() {
    let src = r#"
pub struct MyApi;
pub struct Unvalidated {
    pub login: String,
}
impl MyApi {
    /// apigen:api {"url": "/x"}
    pub fn x(&self, params: Unvalidated) -> Result<u64, ApiError> {
        Ok(1)
    }
}
"#;
    let file = parse_source(src).unwrap();
    let outcome = scan_file(&file).unwrap();
    let err = render_output(&outcome).unwrap_err();
    assert!(err.to_string().contains("no apivalidator fields"), "{err}");
}
