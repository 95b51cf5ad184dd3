// Copyright 2026 The Arbor Developers

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Diagnostics collected during a compilation.
//!
//! Passes report into a shared `Diagnostics` sink and keep going whenever they can, so one compilation reports every problem it can detect. Code is only generated when no error (as opposed to warning) was reported.

use crate::identifier::*;
use std::cell::RefCell;
use std::fmt::{Formatter, Display, Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity
{
  Error,
  Warning
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticKind
{
  GrammarSyntax,
  UndefinedRule,
  DuplicateRule,
  UndeclaredToken,
  DuplicateAttribute,
  UnreachableAttribute,
  AttributeTypeConflict,
  LeftRecursion,
  NullableRepeat,
  InvalidCodeFragment,
  Ambiguity,
  UnusedRule,
  UnknownOption
}

impl DiagnosticKind
{
  pub fn severity(self) -> Severity {
    use self::DiagnosticKind::*;
    match self {
      Ambiguity | UnusedRule | UnknownOption => Severity::Warning,
      _ => Severity::Error
    }
  }

  pub fn is_fatal(self) -> bool {
    self.severity() == Severity::Error
  }

  pub fn name(self) -> &'static str {
    use self::DiagnosticKind::*;
    match self {
      GrammarSyntax => "GrammarSyntaxError",
      UndefinedRule => "UndefinedRuleError",
      DuplicateRule => "DuplicateRuleError",
      UndeclaredToken => "UndeclaredTokenError",
      DuplicateAttribute => "DuplicateAttributeError",
      UnreachableAttribute => "UnreachableAttributeError",
      AttributeTypeConflict => "AttributeTypeConflict",
      LeftRecursion => "LeftRecursionError",
      NullableRepeat => "NullableRepeatError",
      InvalidCodeFragment => "InvalidCodeFragment",
      Ambiguity => "AmbiguityWarning",
      UnusedRule => "UnusedRuleWarning",
      UnknownOption => "UnknownOptionWarning"
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic
{
  pub kind: DiagnosticKind,
  pub span: Span,
  pub message: String,
  /// Secondary locations, e.g. the previous definition of a duplicated rule.
  pub notes: Vec<(Span, String)>
}

impl Diagnostic
{
  pub fn new(kind: DiagnosticKind, span: Span, message: String) -> Diagnostic {
    Diagnostic {
      kind,
      span,
      message,
      notes: vec![]
    }
  }

  pub fn with_note(mut self, span: Span, note: String) -> Diagnostic {
    self.notes.push((span, note));
    self
  }

  pub fn severity(&self) -> Severity {
    self.kind.severity()
  }

  pub fn is_fatal(&self) -> bool {
    self.kind.is_fatal()
  }
}

impl Display for Diagnostic
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    let level = match self.severity() {
      Severity::Error => "error",
      Severity::Warning => "warning"
    };
    write!(formatter, "{}: {}[{}]: {}", self.span, level, self.kind.name(), self.message)?;
    for (span, note) in &self.notes {
      write!(formatter, "\n  {}: note: {}", span, note)?;
    }
    Ok(())
  }
}

#[derive(Default)]
pub struct Diagnostics
{
  list: RefCell<Vec<Diagnostic>>
}

impl Diagnostics
{
  pub fn new() -> Diagnostics {
    Diagnostics::default()
  }

  pub fn push(&self, diagnostic: Diagnostic) {
    match diagnostic.severity() {
      Severity::Error => tracing::debug!(%diagnostic, "error reported"),
      Severity::Warning => tracing::debug!(%diagnostic, "warning reported")
    }
    self.list.borrow_mut().push(diagnostic);
  }

  pub fn span_err(&self, kind: DiagnosticKind, span: Span, msg: String) {
    debug_assert!(kind.is_fatal(), "`{}` is not an error.", kind.name());
    self.push(Diagnostic::new(kind, span, msg));
  }

  pub fn span_warn(&self, kind: DiagnosticKind, span: Span, msg: String) {
    debug_assert!(!kind.is_fatal(), "`{}` is not a warning.", kind.name());
    self.push(Diagnostic::new(kind, span, msg));
  }

  /// The first element of `errors` is the error and the other ones are notes.
  pub fn multi_locations_err(&self, kind: DiagnosticKind, errors: Vec<(Span, String)>) {
    let mut errors = errors.into_iter();
    if let Some((span, msg)) = errors.next() {
      let diagnostic = errors.fold(Diagnostic::new(kind, span, msg),
        |diagnostic, (span, note)| diagnostic.with_note(span, note));
      self.push(diagnostic);
    }
  }

  pub fn has_errors(&self) -> bool {
    self.error_count() > 0
  }

  pub fn error_count(&self) -> usize {
    self.list.borrow().iter().filter(|d| d.is_fatal()).count()
  }

  pub fn len(&self) -> usize {
    self.list.borrow().len()
  }

  /// Diagnostics sorted by position, in reporting order for a same position.
  pub fn into_vec(self) -> Vec<Diagnostic> {
    let mut list = self.list.into_inner();
    list.sort_by_key(|d| d.span);
    list
  }
}
