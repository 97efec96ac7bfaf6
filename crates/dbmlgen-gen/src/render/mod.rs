//! Rust source rendering for generated models and queries.

pub mod model;
pub mod query;

use crate::model::{FieldSpec, GenerateOptions};

pub use model::{render_enums, render_model, render_model_mod};
pub use query::{render_query, render_query_mod};

/// Header placed at the top of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by dbmlgen. DO NOT EDIT.";

/// Line-oriented source buffer with four-space indentation.
#[derive(Debug, Default)]
pub(crate) struct SourceBuilder {
    buf: String,
    depth: usize,
}

impl SourceBuilder {
    pub(crate) fn new() -> Self {
        let mut builder = Self::default();
        builder.line(GENERATED_HEADER);
        builder.blank();
        builder
    }

    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buf.push_str("    ");
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        if !self.buf.is_empty() && !self.buf.ends_with("\n\n") {
            self.buf.push('\n');
        }
    }

    pub(crate) fn doc(&mut self, text: &str) {
        for line in text.lines() {
            if line.trim().is_empty() {
                self.line("///");
            } else {
                self.line(format!("/// {}", line.trim_end()));
            }
        }
    }

    pub(crate) fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.depth += 1;
    }

    pub(crate) fn close(&mut self, text: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    pub(crate) fn finish(mut self) -> String {
        while self.buf.ends_with("\n\n") {
            self.buf.pop();
        }
        self.buf
    }
}

/// Rust string literal for `value`.
pub(crate) fn literal(value: &str) -> String {
    format!("{value:?}")
}

/// Field type as written in the struct, honoring `field_nullable`.
pub(crate) fn field_type(field: &FieldSpec, options: &GenerateOptions) -> String {
    let base = field.field_type.rust_type();
    if options.field_nullable && field.nullable {
        format!("Option<{base}>")
    } else {
        base.to_string()
    }
}
