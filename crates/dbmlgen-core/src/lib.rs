//! Core contracts for dbmlgen.
//!
//! This crate defines the DBML document model and the parser that builds it
//! from schema text. Everything downstream treats the document as read-only.

pub mod error;
pub mod parser;
pub mod schema;

pub use error::{Error, Result};
pub use parser::{parse_dbml, parse_dbml_reader};
pub use schema::{
    Column, ColumnSettings, DbmlDocument, DefaultValue, Enum, EnumValue, Index, IndexPart,
    InlineRef, Project, Ref, RefEndpoint, Relation, Table, TableGroup,
};
