//! DBML-to-Rust model and query generator.
//!
//! The adapter layer ([`adapter`]) exposes parsed tables through descriptor
//! traits, applying the naming, type-resolution and tag policies. The
//! [`engine`] snapshots those descriptors and renders a `model/` and
//! `query/` tree of Rust sources targeting sqlx.

pub mod adapter;
pub mod context;
pub mod engine;
pub mod errors;
pub mod model;
pub mod naming;
pub mod output;
pub mod render;
pub mod types;

pub use adapter::{DbmlField, DbmlObject, ModelField, ModelObject, build_tag};
pub use context::TypeContext;
pub use engine::{DbmlSource, GenerationResult, Generator, MANIFEST_FILE};
pub use errors::GenerationError;
pub use model::{
    Dialect, EnumSpec, FieldSpec, GenerateMode, GenerateOptions, GeneratedFile,
    GenerationManifest, ModelSpec,
};
pub use naming::{camel_name, underscore_name};
pub use types::{HostType, TypeMap};
