//! Type representations in the AST

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two value types of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Int,
    Boolean,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Boolean => write!(f, "boolean"),
        }
    }
}

/// Function/procedure parameter, written `["int", "a"]` in node programs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Type, String)", into = "(Type, String)")]
pub struct Param {
    pub ty: Type,
    pub name: String,
}

impl Param {
    pub fn new(ty: Type, name: impl Into<String>) -> Self {
        Self { ty, name: name.into() }
    }
}

impl From<(Type, String)> for Param {
    fn from((ty, name): (Type, String)) -> Self {
        Self { ty, name }
    }
}

impl From<Param> for (Type, String) {
    fn from(param: Param) -> Self {
        (param.ty, param.name)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)
    }
}
