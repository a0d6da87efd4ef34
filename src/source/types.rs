use serde::Deserialize;

use crate::dispatcher::MethodRule;

/// Payload of one `apigen:api` doc annotation, as written in the source.
///
/// `auth` and `method` are optional in the grammar; an empty method means
/// any verb is accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct MethodAnnotation {
    pub url: String,
    #[serde(default)]
    pub auth: bool,
    #[serde(default)]
    pub method: String,
}

/// One annotated method, resolved against its surrounding `impl` block.
#[derive(Debug, Clone)]
pub struct AnnotatedMethod {
    /// Self type of the `impl` block; grouping key for one API surface.
    pub receiver: String,
    pub url: String,
    pub auth: bool,
    pub method: MethodRule,
    /// Identifier of the business method the wrapper invokes.
    pub target: String,
    /// Identifier of the argument struct populated by validation.
    pub arg_type: String,
    /// Position among the file's top-level items; sort tiebreaker.
    pub decl_index: usize,
}

/// One field of a tagged struct, with its raw tag text.
///
/// The declared type is kept verbatim; the compile step decides whether it
/// is a supported kind.
#[derive(Debug, Clone)]
pub struct RawField {
    pub name: String,
    pub ty: String,
    pub tag: String,
}

/// A struct that carries at least one `apivalidator` field marker.
#[derive(Debug, Clone)]
pub struct TaggedStruct {
    pub name: String,
    pub fields: Vec<RawField>,
}
