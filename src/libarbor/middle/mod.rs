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

//! The `analysis` module checks the grammar as written and builds the IR, `lookahead` computes the decision points and `scope` plans the resolution of remote attributes.

use crate::ast::*;
use crate::diagnostic::*;
use crate::front::ast::FGrammar;

pub mod analysis;
pub mod lookahead;
pub mod scope;

/// A grammar with malformed rules is still checked but its attributes are not resolved, the missing declarations would make references look unreachable.
#[tracing::instrument(level = "debug", skip_all, fields(grammar = %fgrammar.name))]
pub fn analyse_grammar(cx: &Diagnostics, fgrammar: FGrammar, options: Options) -> Partial<Grammar> {
  let malformed = fgrammar.is_malformed();
  Partial::Value(fgrammar)
    .and_then(|grammar| at_least_one_rule_declared(cx, grammar))
    .and_then(|grammar| analysis::analyse(cx, grammar, options))
    .and_then(|grammar| lookahead::predict(cx, grammar))
    .and_then(|grammar| if malformed { Partial::Fake(grammar) } else { scope::resolve_attributes(cx, grammar) })
}

fn at_least_one_rule_declared(cx: &Diagnostics, fgrammar: FGrammar) -> Partial<FGrammar> {
  if fgrammar.rules.is_empty() && fgrammar.is_malformed() {
    Partial::Nothing
  }
  else if fgrammar.rules.is_empty() {
    cx.span_err(DiagnosticKind::GrammarSyntax, fgrammar.name.span(),
      format!("at least one rule must be declared"));
    Partial::Nothing
  }
  else {
    Partial::Value(fgrammar)
  }
}

#[cfg(test)]
pub mod test {
  use super::*;
  use crate::front;

  /// Analyses `source` and returns the grammar with every diagnostic reported.
  pub fn analysed_with_diagnostics(source: &str) -> (Grammar, Vec<Diagnostic>) {
    let cx = Diagnostics::new();
    let grammar = front::parse(&cx, source)
      .and_next(|fgrammar| analyse_grammar(&cx, fgrammar, Options::default()));
    match grammar {
      Partial::Value(grammar) => (grammar, cx.into_vec()),
      _ => {
        let diagnostics: Vec<String> = cx.into_vec().iter().map(|d| d.to_string()).collect();
        panic!("the grammar should be well-formed:\n{}", diagnostics.join("\n"))
      }
    }
  }

  pub fn analysed(source: &str) -> Grammar {
    analysed_with_diagnostics(source).0
  }

  /// The errors reported when analysing `source`, warnings excluded.
  pub fn analyse_errors(source: &str) -> Vec<Diagnostic> {
    let cx = Diagnostics::new();
    let _ = front::parse(&cx, source)
      .and_then(|fgrammar| analyse_grammar(&cx, fgrammar, Options::default()));
    let errors: Vec<Diagnostic> = cx.into_vec().into_iter().filter(|d| d.is_fatal()).collect();
    assert!(!errors.is_empty(), "the grammar should be rejected");
    errors
  }

  #[test]
  fn test_no_rule() {
    let errors = analyse_errors("tree grammar empty; tokens { A }");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, DiagnosticKind::GrammarSyntax);
  }
}
