use super::{Code, Diagnostic, Span};
use crate::error::AllocError;

impl DiagnosticBuilder {
    pub fn new(span: impl Into<Span>) -> Self {
        Self {
            span: span.into(),
            additional_spans: Vec::new(),
        }
    }

    pub fn add_additional_span(&mut self, span: impl Into<Span>, message: Option<String>) {
        self.additional_spans.push((span.into(), message));
    }

    fn build_custom(self, code: Code, message: String) -> Diagnostic {
        Diagnostic {
            code,
            message,
            main_span: (self.span, None),
            additional_spans: self.additional_spans,
        }
    }

    pub fn build_unknown_command(self, command: &str) -> Diagnostic {
        self.build_custom(Code::UnknownCommand, format!("unknown command: {command}"))
    }

    pub fn build_wrong_arity(self, command: &str, expected: &str, found: usize) -> Diagnostic {
        let msg = format!("`{command}` takes {expected}, but {found} given");
        self.build_custom(Code::WrongArity, msg)
    }

    pub fn build_invalid_number(self, text: &str) -> Diagnostic {
        let msg = format!("invalid number: {text}");
        self.build_custom(Code::InvalidNumber, msg)
    }

    pub fn build_unknown_node(self, reference: &str) -> Diagnostic {
        self.build_custom(Code::UnknownNode, format!("there is no node {reference}"))
    }

    pub fn build_ambiguous_node(self, label: &str, count: usize) -> Diagnostic {
        let msg = format!("{count} nodes are labelled {label}, refer to one by its id instead");
        self.build_custom(Code::AmbiguousNode, msg)
    }

    pub fn build_import_failed(self, path: &str, error: &dyn std::fmt::Display) -> Diagnostic {
        let msg = format!("could not import {path}: {error}");
        self.build_custom(Code::ImportFailed, msg)
    }

    /// Reports a command the allocator refused.
    pub fn build_alloc_error(self, error: &AllocError) -> Diagnostic {
        self.build_custom(error.code(), error.to_string())
    }
}

pub struct DiagnosticBuilder {
    span: Span,
    additional_spans: Vec<(Span, Option<String>)>,
}
