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

use crate::ast::*;
use crate::diagnostic::*;
use crate::front::ast::FGrammar;
use crate::visitor::*;
use partial::Partial::*;

/// Rule references must name a rule of the grammar and node labels must be declared in `tokens`.
pub struct UndeclaredSymbol<'a>
{
  cx: &'a Diagnostics,
  grammar: &'a FGrammar,
  has_undeclared: bool
}

impl<'a> UndeclaredSymbol<'a>
{
  pub fn analyse(cx: &'a Diagnostics, grammar: FGrammar) -> Partial<FGrammar> {
    if UndeclaredSymbol::has_undeclared(cx, &grammar) {
      Fake(grammar)
    }
    else {
      Value(grammar)
    }
  }

  fn has_undeclared(cx: &Diagnostics, grammar: &FGrammar) -> bool {
    let mut analyser = UndeclaredSymbol {
      cx,
      grammar,
      has_undeclared: false
    };
    for rule in &grammar.rules {
      walk_alternatives(&mut analyser, &rule.alternatives);
    }
    analyser.has_undeclared
  }

  fn check_token(&mut self, this: usize, token: &Ident) {
    if !self.grammar.tokens.contains(token) {
      self.cx.span_err(DiagnosticKind::UndeclaredToken, self.grammar.exprs_info[this].span,
        format!("undeclared token `{}`: node labels must be listed in the `tokens` block", token));
      self.has_undeclared = true;
    }
  }
}

impl<'a> ExprByIndex for UndeclaredSymbol<'a>
{
  fn expr_by_index(&self, index: usize) -> Expression {
    self.grammar.expr_by_index(index)
  }
}

impl<'a> Visitor<()> for UndeclaredSymbol<'a>
{
  unit_visitor_impl!(subrule);

  fn visit_node_match(&mut self, this: usize, label: &Ident, children: Vec<usize>) {
    self.check_token(this, label);
    walk_exprs(self, children);
  }

  fn visit_token_match(&mut self, this: usize, token: &Ident) {
    self.check_token(this, token);
  }

  fn visit_rule_ref(&mut self, this: usize, rule: &Ident, _args: Option<CodeFragment>) {
    let declared = self.grammar.rules.iter().any(|r| &r.name == rule)
      || self.grammar.malformed_rules.contains(rule);
    if !declared {
      self.cx.span_err(DiagnosticKind::UndefinedRule, self.grammar.exprs_info[this].span,
        format!("undefined rule `{}`", rule));
      self.has_undeclared = true;
    }
  }
}
