//! Field rule records and their request-time evaluation.
//!
//! The generator compiles every `apivalidator` tag into one [`FieldRule`]
//! literal embedded in the emitted source. Evaluation is a pure function of
//! the rule and the raw request parameters, so generated validators are safe
//! under concurrent invocation.
//!
//! Checks run in a fixed order and stop at the first failure: presence and
//! default substitution, integer coercion, min bound, max bound, enum
//! membership. Exactly one error message is produced per request.

use thiserror::Error;

use crate::dispatcher::Params;

/// First failing rule for a request, carrying the client-facing message.
///
/// The `must me not empty` wording is a compatibility contract with existing
/// consumers; do not correct it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

/// Value space a rule checks against: string length bounds vs integer value
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Str,
    Int,
}

/// Compiled constraint for one tagged field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub param: &'static str,
    pub kind: RuleKind,
    pub required: bool,
    pub default: Option<&'static str>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub allowed: &'static [&'static str],
}

impl FieldRule {
    /// Raw value after default substitution. Absent and empty values are
    /// both treated as missing, as classic form decoding cannot tell them
    /// apart.
    fn raw_value<'a>(&self, params: &'a Params) -> Option<&'a str> {
        params
            .get(self.param)
            .filter(|v| !v.is_empty())
            .or(self.default)
            .filter(|v| !v.is_empty())
    }

    fn fail(&self, rest: &str) -> ValidationError {
        ValidationError(format!("{} {}", self.param, rest))
    }

    fn check_allowed(&self, raw: &str) -> Result<(), ValidationError> {
        if !self.allowed.is_empty() && !self.allowed.contains(&raw) {
            return Err(self.fail(&format!("must be one of [{}]", self.allowed.join(", "))));
        }
        Ok(())
    }

    /// Evaluate a `Str` rule, yielding the accepted value.
    ///
    /// A missing optional value passes with the empty string and skips all
    /// further checks.
    pub fn string_value(&self, params: &Params) -> Result<String, ValidationError> {
        let Some(raw) = self.raw_value(params) else {
            if self.required {
                return Err(self.fail("must me not empty"));
            }
            return Ok(String::new());
        };
        if let Some(min) = self.min {
            if (raw.len() as i64) < min {
                return Err(self.fail(&format!("len must be >= {min}")));
            }
        }
        if let Some(max) = self.max {
            if (raw.len() as i64) > max {
                return Err(self.fail(&format!("len must be <= {max}")));
            }
        }
        self.check_allowed(raw)?;
        Ok(raw.to_string())
    }

    /// Evaluate an `Int` rule, yielding the coerced value.
    ///
    /// A missing optional value passes with zero and skips all further
    /// checks.
    pub fn int_value(&self, params: &Params) -> Result<i64, ValidationError> {
        let Some(raw) = self.raw_value(params) else {
            if self.required {
                return Err(self.fail("must me not empty"));
            }
            return Ok(0);
        };
        let value: i64 = raw.parse().map_err(|_| self.fail("must be int"))?;
        if let Some(min) = self.min {
            if value < min {
                return Err(self.fail(&format!("must be >= {min}")));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(self.fail(&format!("must be <= {max}")));
            }
        }
        self.check_allowed(raw)?;
        Ok(value)
    }
}
