//! Abstract Syntax Tree definitions
//!
//! Programs reach the analyzer as an ordered list of [`Item`]s built by an
//! external parser. The same shapes are (de)serialized as JSON node programs:
//! every node is an object whose `"kind"` field names its variant.

mod types;
mod expr;
mod stmt;
mod decl;

pub use types::*;
pub use expr::*;
pub use stmt::*;
pub use decl::*;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::common::CompileResult;

/// Top-level element of a program
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Item {
    Decl(Decl),
    Stmt(Stmt),
}

impl Item {
    pub fn line(&self) -> Option<u32> {
        match self {
            Item::Decl(decl) => decl.line(),
            Item::Stmt(stmt) => stmt.line(),
        }
    }
}

impl From<Decl> for Item {
    fn from(decl: Decl) -> Self {
        Item::Decl(decl)
    }
}

impl From<Stmt> for Item {
    fn from(stmt: Stmt) -> Self {
        Item::Stmt(stmt)
    }
}

// A top-level `vardecl` is a global declaration; every other non-declaration
// kind is read as a statement.
impl<'de> Deserialize<'de> for Item {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value
            .get("kind")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| D::Error::missing_field("kind"))?;

        if Decl::KINDS.contains(&kind) {
            Decl::deserialize(value).map(Item::Decl).map_err(D::Error::custom)
        } else {
            Stmt::deserialize(value).map(Item::Stmt).map_err(D::Error::custom)
        }
    }
}

/// A complete program
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    pub items: Vec<Item>,
}

impl Program {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Load a node program from its JSON form
    pub fn from_json(text: &str) -> CompileResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_pretty(&self) -> CompileResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
