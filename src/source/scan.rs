use anyhow::{bail, Context};
use std::collections::BTreeMap;
use syn::{Attribute, Expr, ExprLit, FnArg, ImplItem, Item, Lit, Meta, Type};

use super::types::{AnnotatedMethod, MethodAnnotation, RawField, TaggedStruct};
use crate::dispatcher::MethodRule;

/// Marker token that flags a method doc comment for dispatch generation.
pub const API_MARKER: &str = "apigen:api";
/// Field attribute that flags a struct field for validator generation.
pub const VALIDATOR_ATTR: &str = "apivalidator";

/// Everything the scanner recognized in one source file.
///
/// Methods are grouped by receiver type; the `BTreeMap` fixes the receiver
/// iteration order so emission is reproducible.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub methods: BTreeMap<String, Vec<AnnotatedMethod>>,
    pub structs: Vec<TaggedStruct>,
}

/// Classify every top-level item of the parsed file.
///
/// Items matching neither annotation rule are ignored without diagnostic;
/// a marker on a declaration the generator cannot wire up is a fatal error.
pub fn scan_file(file: &syn::File) -> anyhow::Result<ScanOutcome> {
    let mut outcome = ScanOutcome::default();
    for (index, item) in file.items.iter().enumerate() {
        match item {
            Item::Impl(item_impl) => scan_impl(item_impl, index, &mut outcome.methods)?,
            Item::Fn(item_fn) => {
                if doc_text(&item_fn.attrs).contains(API_MARKER) {
                    bail!(
                        "function `{}` carries {API_MARKER} but has no receiver; \
                         annotated methods must live in an impl block",
                        item_fn.sig.ident
                    );
                }
            }
            Item::Struct(item_struct) => {
                if let Some(tagged) = scan_struct(item_struct)? {
                    outcome.structs.push(tagged);
                }
            }
            _ => {}
        }
    }
    Ok(outcome)
}

fn scan_impl(
    item_impl: &syn::ItemImpl,
    index: usize,
    methods: &mut BTreeMap<String, Vec<AnnotatedMethod>>,
) -> anyhow::Result<()> {
    for impl_item in &item_impl.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        let doc = doc_text(&method.attrs);
        if !doc.contains(API_MARKER) {
            continue;
        }
        let name = method.sig.ident.to_string();
        let Some(receiver) = type_ident(&item_impl.self_ty) else {
            bail!("method `{name}` is annotated but its impl target is not a plain named type");
        };
        let Some(FnArg::Receiver(recv)) = method.sig.inputs.first() else {
            bail!("method `{receiver}::{name}` is annotated but takes no self receiver");
        };
        if recv.reference.is_none() {
            bail!("method `{receiver}::{name}`: receiver must be taken by reference");
        }
        let arg_type = single_arg_type(method).with_context(|| {
            format!("method `{receiver}::{name}` must take exactly one named argument struct")
        })?;
        let annotation = extract_annotation(&doc)
            .with_context(|| format!("method `{receiver}::{name}`: malformed {API_MARKER} payload"))?;
        let rule = parse_method_rule(&annotation.method)
            .with_context(|| format!("method `{receiver}::{name}`"))?;
        methods.entry(receiver.clone()).or_default().push(AnnotatedMethod {
            receiver,
            url: annotation.url,
            auth: annotation.auth,
            method: rule,
            target: name,
            arg_type,
            decl_index: index,
        });
    }
    Ok(())
}

fn scan_struct(item: &syn::ItemStruct) -> anyhow::Result<Option<TaggedStruct>> {
    let syn::Fields::Named(named) = &item.fields else {
        return Ok(None);
    };
    let mut fields = Vec::new();
    for field in &named.named {
        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident(VALIDATOR_ATTR)) else {
            continue;
        };
        let Some(ident) = &field.ident else {
            continue;
        };
        let tag = validator_tag(attr)
            .with_context(|| format!("field `{}.{}`", item.ident, ident))?;
        fields.push(RawField {
            name: ident.to_string(),
            ty: type_ident(&field.ty).unwrap_or_default(),
            tag,
        });
    }
    if fields.is_empty() {
        return Ok(None);
    }
    Ok(Some(TaggedStruct {
        name: item.ident.to_string(),
        fields,
    }))
}

/// Doc comment text of a declaration, one line per `#[doc]` attribute.
fn doc_text(attrs: &[Attribute]) -> String {
    let mut lines = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let Meta::NameValue(nv) = &attr.meta {
            if let Expr::Lit(ExprLit { lit: Lit::Str(text), .. }) = &nv.value {
                lines.push(text.value());
            }
        }
    }
    lines.join("\n")
}

/// Identifier of a bare single-segment path type, e.g. `MyApi` or `i64`.
fn type_ident(ty: &Type) -> Option<String> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() || path.path.segments.len() != 1 {
        return None;
    }
    let segment = path.path.segments.first()?;
    if !segment.arguments.is_empty() {
        return None;
    }
    Some(segment.ident.to_string())
}

fn single_arg_type(method: &syn::ImplItemFn) -> anyhow::Result<String> {
    let mut args = method.sig.inputs.iter().skip(1);
    match (args.next(), args.next()) {
        (Some(FnArg::Typed(arg)), None) => {
            type_ident(&arg.ty).context("argument must be a named struct type")
        }
        _ => bail!("expected exactly one argument after the receiver"),
    }
}

fn extract_annotation(doc: &str) -> anyhow::Result<MethodAnnotation> {
    let payload = doc.replace(API_MARKER, "");
    serde_json::from_str(payload.trim())
        .context("payload is not a valid {url, auth, method} literal")
}

fn parse_method_rule(verb: &str) -> anyhow::Result<MethodRule> {
    match verb {
        "" => Ok(MethodRule::Any),
        "GET" => Ok(MethodRule::Get),
        "POST" => Ok(MethodRule::Post),
        other => bail!("unsupported method \"{other}\" in annotation; expected \"\", \"GET\" or \"POST\""),
    }
}

fn validator_tag(attr: &Attribute) -> anyhow::Result<String> {
    match &attr.meta {
        // Bare `#[apivalidator]`: the field is marked but compiles to no rules.
        Meta::Path(_) => Ok(String::new()),
        Meta::List(_) => {
            let lit: syn::LitStr = attr
                .parse_args()
                .context("apivalidator payload must be a string literal")?;
            Ok(lit.value())
        }
        Meta::NameValue(_) => {
            bail!("apivalidator payload must be parenthesized: #[apivalidator(\"...\")]")
        }
    }
}
