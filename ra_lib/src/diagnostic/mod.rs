pub mod builder;

use std::{
    collections::LinkedList,
    fmt::{Debug, Display},
};

pub use builder::DiagnosticBuilder;

/// A byte range in a command script.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    start: usize,
    length: usize,
}

impl From<std::ops::Range<usize>> for Span {
    fn from(value: std::ops::Range<usize>) -> Self {
        Self {
            start: value.start,
            length: value.len(),
        }
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(val: Span) -> Self {
        val.start..val.excl_end()
    }
}

impl Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.excl_end())
    }
}

impl Span {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn excl_end(&self) -> usize {
        self.start + self.length
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The smallest span covering both `self` and `other`.
    pub fn join(&self, other: Span) -> Span {
        let start = self.start.min(other.start);
        let end = self.excl_end().max(other.excl_end());
        Span::from(start..end)
    }
}

// WARNING: Don't change the order of these (Error codes will change)
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    /// This is an internal code that should never be used for actual diagnostics.
    Unspecified = 0,
    UnknownCommand,
    WrongArity,
    InvalidNumber,
    UnknownNode,
    AmbiguousNode,
    ImportFailed,
    Selection,
    Precoloured,
    NonPrecolouredRemain,
    MoveRelated,
    NotMoveRelated,
    SignificantDegree,
    InsignificantDegree,
    Interference,
    Heuristic,
    NoColourAvailable,
    SelfLoop,
}

impl Code {
    /// Get a unique numeric code for this `Code`
    fn as_code(&self) -> u32 {
        *self as u32
    }

    /// The codes of diagnostics that don't stop a script: a refused command leaves the session
    /// as it was, so the next command can simply be issued.
    pub const RECOVERABLE: [Code; 14] = [
        Code::UnknownNode,
        Code::AmbiguousNode,
        Code::ImportFailed,
        Code::Selection,
        Code::Precoloured,
        Code::NonPrecolouredRemain,
        Code::MoveRelated,
        Code::NotMoveRelated,
        Code::SignificantDegree,
        Code::InsignificantDegree,
        Code::Interference,
        Code::Heuristic,
        Code::NoColourAvailable,
        Code::SelfLoop,
    ];
}

impl Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:0>4x}", self.as_code())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    code: Code,
    message: String,
    main_span: (Span, Option<String>),
    additional_spans: Vec<(Span, Option<String>)>,
}

impl Diagnostic {
    pub fn code(&self) -> &Code {
        &self.code
    }

    pub fn message(&self) -> &String {
        &self.message
    }

    pub fn main_span(&self) -> &Span {
        &self.main_span.0
    }

    pub fn main_span_message(&self) -> Option<&String> {
        self.main_span.1.as_ref()
    }

    pub fn additional_spans(&self) -> impl Iterator<Item = (&Span, Option<&String>)> {
        self.additional_spans.iter().map(|(s, m)| (s, m.as_ref()))
    }

    pub fn additional_spans_len(&self) -> usize {
        self.additional_spans.len()
    }
}

/// Specifies the possibles types of diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// For recoverable diagnostics, e.g. a refused allocator command.
    Rec,
    /// For non-recoverable diagnostics, e.g. a malformed script.
    Err,
}

/// A result combining a value with aggregated diagnostics.
///
/// Can be in one of three states:
/// - _ok_: The result contains a value and has no diagnostics. Corresponds to `Result::Ok`.
/// - _rec_: recoverable: The result contains a (recovered) value and has only diagnostics of the
///   kind [`DiagnosticKind::Rec`].
/// - _err_: non-recoverable: The result does not contain a value and has at least one diagnostic of
///   the kind [`DiagnosticKind::Err`].
///
/// It is guaranteed that the result will never be completely empty (i.e. no value nor diagnostics).
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult<T> {
    value: Option<T>,
    diagnostics: LinkedList<(DiagnosticKind, Diagnostic)>,
}

impl<T> AggregateResult<T> {
    /// Creates an `AggregateResult` in an _ok_ state containing the specified value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ra_lib::diagnostic::*;
    /// let res = AggregateResult::new_ok(2);
    ///
    /// assert!(res.is_ok());
    /// assert_eq!(res.value(), Some(&2));
    /// assert!(res.diagnostics().next().is_none());
    /// ```
    pub fn new_ok(value: T) -> Self {
        Self {
            value: Some(value),
            diagnostics: LinkedList::new(),
        }
    }

    /// Creates an `AggregateResult` in an _err_ state containing the specified diagnostic.
    ///
    /// The diagnostic will be given the kind [`DiagnosticKind::Err`].
    pub fn new_err(diagnostic: Diagnostic) -> Self {
        Self {
            value: None,
            diagnostics: LinkedList::from([(DiagnosticKind::Err, diagnostic)]),
        }
    }

    /// Returns `true` if the result is in an _ok_ state.
    pub fn is_ok(&self) -> bool {
        self.value.is_some() && self.diagnostics.is_empty()
    }

    /// Returns `true` if the result is in a _rec_ state.
    pub fn is_rec(&self) -> bool {
        self.value.is_some() && !self.diagnostics.is_empty()
    }

    /// Returns `true` if the result is in an _err_ state.
    pub fn is_err(&self) -> bool {
        self.value.is_none()
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    /// Returns an iterator over the diagnostics for _rec_ and _err_ results.
    pub fn diagnostics(&self) -> impl Iterator<Item = (DiagnosticKind, &Diagnostic)> {
        self.diagnostics.iter().map(|(dt, d)| (*dt, d))
    }

    /// Adds a recoverable diagnostic to the result.
    ///
    /// An _ok_ result will become a _rec_ result.
    pub fn add_rec_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics
            .push_back((DiagnosticKind::Rec, diagnostic));
    }

    /// Adds a non-recoverable diagnostic to the result.
    ///
    /// The result will become an _err_ result, dropping a contained value.
    pub fn add_err(&mut self, diagnostic: Diagnostic) {
        self.value = None;
        self.diagnostics
            .push_back((DiagnosticKind::Err, diagnostic));
    }

    /// Runs the predicate for all recoverable diagnostics, turning the diagnostics where the
    /// predicate returns `true` into an error. This will also make the `AggregateResult` itself
    /// an _err_.
    pub fn upgrade_diagnostics<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&Diagnostic) -> bool,
    {
        for (kind, diagnostic) in &mut self.diagnostics {
            if *kind == DiagnosticKind::Err {
                continue;
            }
            if predicate(diagnostic) {
                *kind = DiagnosticKind::Err;
                self.value = None;
            }
        }
    }

    /// Maps an `AggregateResult<T>` to `AggregateResult<U>` by applying a function to a
    /// contained value, leaving diagnostics untouched.
    #[must_use]
    pub fn map<U, F>(self, op: F) -> AggregateResult<U>
    where
        F: FnOnce(T) -> U,
    {
        AggregateResult {
            value: self.value.map(op),
            diagnostics: self.diagnostics,
        }
    }

    /// Calls `op` if the result has a value, aggregating the diagnostics of `self` with the result
    /// returned by `op`.
    ///
    /// The value of `self` will always be discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ra_lib::diagnostic::*;
    /// # let diagnostic = DiagnosticBuilder::new(0..1).build_unknown_command("x");
    /// let ok = AggregateResult::new_ok(1).and_then(|v| AggregateResult::new_ok(v + 1));
    /// assert_eq!(ok.value(), Some(&2));
    ///
    /// let err = AggregateResult::<u8>::new_err(diagnostic).and_then(|v| AggregateResult::new_ok(v));
    /// assert!(err.is_err());
    /// ```
    #[must_use]
    pub fn and_then<U, F>(mut self, op: F) -> AggregateResult<U>
    where
        F: FnOnce(T) -> AggregateResult<U>,
    {
        match self.value {
            Some(t) => {
                let mut other = op(t);
                self.diagnostics.append(&mut other.diagnostics);
                other.diagnostics = self.diagnostics;
                other
            }
            None => AggregateResult {
                value: None,
                diagnostics: self.diagnostics,
            },
        }
    }
}
