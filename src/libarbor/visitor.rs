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

#![macro_use]

use std::default::Default;
use crate::ast::*;
use crate::ast::Expression::*;

pub trait Visitor<R: Default> : ExprByIndex
{
  fn visit_expr(&mut self, this: usize) -> R {
    walk_expr(self, this)
  }

  fn visit_node_match(&mut self, _this: usize, _label: &Ident, children: Vec<usize>) -> R;
  fn visit_subrule(&mut self, _this: usize, _kind: SubruleKind, alternatives: Vec<Alternative>) -> R;

  fn visit_token_match(&mut self, _this: usize, _token: &Ident) -> R { R::default() }
  fn visit_wildcard(&mut self, _this: usize) -> R { R::default() }
  fn visit_rule_ref(&mut self, _this: usize, _rule: &Ident, _args: Option<CodeFragment>) -> R { R::default() }
  fn visit_semantic_action(&mut self, _this: usize, _action: CodeFragment) -> R { R::default() }
  fn visit_predicate(&mut self, _this: usize, _predicate: CodeFragment) -> R { R::default() }

  fn visit_alternative(&mut self, alternative: &Alternative) -> Vec<R> {
    walk_exprs(self, alternative.elements.clone())
  }
}

/// We need this macro for factorizing the code since we can not specialize a trait on specific type parameter (we would need to specialize on `()` here).
macro_rules! unit_visitor_impl {
  (node_match) => (
    fn visit_node_match(&mut self, _this: usize, _label: &Ident, children: Vec<usize>) -> () {
      walk_exprs(self, children);
    }
  );
  (subrule) => (
    fn visit_subrule(&mut self, _this: usize, _kind: SubruleKind, alternatives: Vec<Alternative>) -> () {
      walk_alternatives(self, &alternatives);
    }
  );
}

pub fn walk_expr<R: Default, V: ?Sized>(visitor: &mut V, this: usize) -> R where
  V: Visitor<R>
{
  match visitor.expr_by_index(this) {
    NodeMatch(label, children) => {
      visitor.visit_node_match(this, &label, children)
    }
    TokenMatch(token) => {
      visitor.visit_token_match(this, &token)
    }
    Wildcard => {
      visitor.visit_wildcard(this)
    }
    RuleRef(rule, args) => {
      visitor.visit_rule_ref(this, &rule, args)
    }
    Subrule(kind, alternatives) => {
      visitor.visit_subrule(this, kind, alternatives)
    }
    SemanticAction(action) => {
      visitor.visit_semantic_action(this, action)
    }
    Predicate(predicate) => {
      visitor.visit_predicate(this, predicate)
    }
  }
}

pub fn walk_exprs<R: Default, V: ?Sized>(visitor: &mut V, exprs: Vec<usize>) -> Vec<R> where
  V: Visitor<R>
{
  exprs.into_iter().map(|expr| visitor.visit_expr(expr)).collect()
}

pub fn walk_alternatives<R: Default, V: ?Sized>(visitor: &mut V, alternatives: &[Alternative]) -> Vec<Vec<R>> where
  V: Visitor<R>
{
  alternatives.iter().map(|alt| visitor.visit_alternative(alt)).collect()
}
