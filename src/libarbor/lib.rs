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

//! This is the developer documentation of Arbor, a tree-grammar compiler. A tree grammar describes the shape of an abstract syntax tree together with actions and predicates written in Rust, Arbor compiles it into mutually recursive matching procedures walking such trees.
//!
//! The compilation goes through three stages chained with the `Partial` monad: the front end parses the grammar text (`front`), the middle end checks it, computes its decision points and plans the resolution of remote attributes (`middle`), and the back end generates the Rust module (`back`). Every problem is reported in a `Diagnostics` sink and code is only generated if no error was reported.
//!
//! ```ignore
//! let compilation = arbor::compile(r#"
//!   tree grammar calc;
//!   tokens { PLUS, INT }
//!   pub expr : #(PLUS expr expr) | INT ;
//! "#);
//! assert!(compilation.is_success());
//! ```

mod visitor;
mod identifier;
mod diagnostic;
mod options;
mod ast;
mod front;
mod middle;
mod back;

pub use crate::identifier::Span;
pub use crate::diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use crate::options::{Options, PrintLevel};
pub use crate::ast::{Grammar, Rule, Alternative, Attribute, Expression, SubruleKind, CodeFragment};
pub use crate::middle::lookahead::decision::{DecisionPoint, DecisionSite, DecisionKind, Resolution};
pub use crate::middle::lookahead::set::LookaheadSet;
pub use crate::middle::scope::{ScopePlan, AttributeResolution};

use crate::diagnostic::Diagnostics;
use partial::Partial;

/// Result of a compilation: the generated module if no error was reported, and every diagnostic sorted by position.
#[derive(Clone, Debug)]
pub struct Compilation
{
  pub code: Option<String>,
  pub diagnostics: Vec<Diagnostic>
}

impl Compilation
{
  pub fn is_success(&self) -> bool {
    self.code.is_some()
  }

  pub fn errors(&self) -> impl Iterator<Item=&Diagnostic> {
    self.diagnostics.iter().filter(|d| d.is_fatal())
  }

  pub fn warnings(&self) -> impl Iterator<Item=&Diagnostic> {
    self.diagnostics.iter().filter(|d| !d.is_fatal())
  }
}

pub fn compile(source: &str) -> Compilation {
  compile_with(source, Options::default())
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn compile_with(source: &str, options: Options) -> Compilation {
  let cx = Diagnostics::new();
  let code = analyse_source(&cx, source, options)
    .and_next(|grammar| back::compile(&cx, grammar));
  let code = match code {
    Partial::Value(code) if !cx.has_errors() => Some(code),
    _ => None
  };
  tracing::debug!(success = code.is_some(), diagnostics = cx.len(), "compilation finished");
  Compilation {
    code,
    diagnostics: cx.into_vec()
  }
}

/// Runs the front and middle ends only, the annotated grammar is returned if no error was reported.
pub fn analyse(source: &str, options: Options) -> (Option<Grammar>, Vec<Diagnostic>) {
  let cx = Diagnostics::new();
  let grammar = match analyse_source(&cx, source, options) {
    Partial::Value(grammar) if !cx.has_errors() => Some(grammar),
    _ => None
  };
  (grammar, cx.into_vec())
}

fn analyse_source(cx: &Diagnostics, source: &str, options: Options) -> Partial<Grammar> {
  front::parse(cx, source)
    .and_then(|fgrammar| middle::analyse_grammar(cx, fgrammar, options))
}

#[cfg(test)]
mod test {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_compile_calc() {
    let compilation = compile(r#"
      tree grammar calc;
      tokens { PLUS, STAR, INT }
      pub expr : #(PLUS expr expr) | #(STAR expr expr) | INT ;
    "#);
    assert!(compilation.is_success(), "{:?}", compilation.diagnostics);
    assert_eq!(compilation.warnings().count(), 0);
    let code = compilation.code.unwrap();
    assert!(code.starts_with("pub mod calc"), "{}", code);
  }

  #[test]
  fn test_errors_withhold_code() {
    let compilation = compile(r#"
      tokens { A }
      pub a : b ;
    "#);
    assert!(!compilation.is_success());
    assert_eq!(compilation.errors().next().map(|d| d.kind), Some(DiagnosticKind::UndefinedRule));
  }

  #[test]
  fn test_warnings_do_not_withhold_code() {
    let compilation = compile(r#"
      tokens { A, B }
      pub s : A B | A ;
      unused : B ;
    "#);
    assert!(compilation.is_success());
    let warnings: Vec<DiagnosticKind> = compilation.warnings().map(|d| d.kind).collect();
    assert_eq!(warnings, vec![DiagnosticKind::Ambiguity, DiagnosticKind::UnusedRule]);
  }

  #[test]
  fn test_syntax_errors_do_not_hide_other_errors() {
    let compilation = compile(r#"
      tokens { A }
      pub a : (A ;
      b : c ;
      d : A ;
      d : A ;
    "#);
    assert!(!compilation.is_success());
    let kinds: Vec<DiagnosticKind> = compilation.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![DiagnosticKind::GrammarSyntax, DiagnosticKind::UndefinedRule, DiagnosticKind::DuplicateRule]);
  }

  #[test]
  fn test_malformed_rules_are_still_declared() {
    let compilation = compile(r#"
      tokens { A }
      pub a : b ;
      b [x: i32] : (A ;
      c : A { @x += 1; } ;
    "#);
    let kinds: Vec<DiagnosticKind> = compilation.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![DiagnosticKind::GrammarSyntax]);
    assert!(compilation.code.is_none());
  }

  #[test]
  fn test_analyse() {
    let (grammar, diagnostics) = analyse(r#"
      tokens { A, B }
      pub s [x: i32] : (A { @x += 1; })* B ;
    "#, Options::default());
    let grammar = grammar.unwrap();
    assert!(diagnostics.is_empty());
    assert_eq!(grammar.decisions.len(), 1);
    assert_eq!(grammar.decisions[0].kind, DecisionKind::Star);
    assert!(grammar.scope_plan.resolve(0, "x").is_some());
  }
}
