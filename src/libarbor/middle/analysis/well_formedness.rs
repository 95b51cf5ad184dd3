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

//! A walk must consume a node of its sibling list before invoking a rule again and before repeating a subrule, otherwise the generated matcher loops forever.

use crate::ast::*;
use crate::ast::Expression::*;
use crate::diagnostic::*;
use crate::middle::lookahead::first::FirstSets;
use crate::visitor::*;
use std::collections::{BTreeSet, HashSet};

pub struct WellFormedness<'a>
{
  cx: &'a Diagnostics,
  grammar: &'a Grammar,
  first: FirstSets,
  /// `left_calls[r]`: rules that `r` can invoke before consuming a node.
  left_calls: Vec<BTreeSet<usize>>,
  recursion_path: Vec<usize>,
  explored: Vec<bool>,
  well_formed: bool,
  // Cycles and repetitions already reported, to avoid multi-reporting.
  reported_cycles: HashSet<BTreeSet<usize>>,
  reported_repeats: HashSet<usize>
}

impl<'a> WellFormedness<'a>
{
  pub fn analyse(cx: &'a Diagnostics, grammar: Grammar) -> Partial<Grammar> {
    if WellFormedness::is_well_formed(cx, &grammar) {
      Partial::Value(grammar)
    }
    else {
      Partial::Fake(grammar)
    }
  }

  fn is_well_formed(cx: &Diagnostics, grammar: &Grammar) -> bool {
    let mut analyser = WellFormedness::new(cx, grammar);
    for rule in 0..grammar.rules.len() {
      analyser.visit_rule(rule);
    }
    for rule in &grammar.rules {
      walk_alternatives(&mut analyser, &rule.alternatives);
    }
    analyser.well_formed
  }

  fn new(cx: &'a Diagnostics, grammar: &'a Grammar) -> Self {
    let first = FirstSets::compute(grammar);
    let left_calls = grammar.rules.iter()
      .map(|rule| {
        let mut calls = BTreeSet::new();
        for alternative in &rule.alternatives {
          collect_left_calls(grammar, &first, &alternative.elements, &mut calls);
        }
        calls
      })
      .collect();
    WellFormedness {
      cx,
      grammar,
      first,
      left_calls,
      recursion_path: vec![],
      explored: vec![false; grammar.rules.len()],
      well_formed: true,
      reported_cycles: HashSet::new(),
      reported_repeats: HashSet::new()
    }
  }

  fn visit_rule(&mut self, rule: usize) {
    if let Some(pos) = self.recursion_path.iter().position(|&r| r == rule) {
      let cycle = self.recursion_path[pos..].to_vec();
      self.error_left_recursion(cycle);
    }
    else if !self.explored[rule] {
      self.recursion_path.push(rule);
      for callee in self.left_calls[rule].clone() {
        self.visit_rule(callee);
      }
      self.recursion_path.pop();
      self.explored[rule] = true;
    }
  }

  fn error_left_recursion(&mut self, cycle: Vec<usize>) {
    self.well_formed = false;
    if self.reported_cycles.insert(cycle.iter().cloned().collect()) {
      let rule = &self.grammar.rules[cycle[0]];
      let path: Vec<String> = cycle.iter().map(|&r| self.grammar.rules[r].name.to_string()).collect();
      self.cx.span_err(DiagnosticKind::LeftRecursion, rule.name.span(), format!(
        "left recursion is not supported: the following rule cycle does not consume \
        any node and would loop forever\n\
        Detected cycle: {}\n\
        Solution: rewrite one of the incriminated rules such that it matches at least \
        one node before invoking the next one. Usually, left recursion is rewritten with \
        a repetition (`e*` or `e+`).",
        display_path_cycle(&path)));
    }
  }

  fn error_loop_repeat(&mut self, this: usize, kind: SubruleKind, alternative: usize) {
    self.well_formed = false;
    if self.reported_repeats.insert(this) {
      self.cx.span_err(DiagnosticKind::NullableRepeat, self.grammar.expr_span(this), format!(
        "infinite loop detected: the repetition `{}` never stops because its {} can match \
        without consuming a node\n\
        Solution: rewrite the subrule such that every alternative matches at least one node \
        or get rid of the repetition.",
        kind.suffix(), Branch::Alternative(alternative)));
    }
  }
}

/// Collects the rules that `elements` can invoke before consuming a node.
fn collect_left_calls(grammar: &Grammar, first: &FirstSets, elements: &[usize], calls: &mut BTreeSet<usize>) {
  for &expr in elements {
    match &grammar.exprs[expr] {
      RuleRef(rule, _) => {
        calls.extend(grammar.rule_index(rule.as_str()));
      }
      Subrule(_, alternatives) => {
        for alternative in alternatives {
          collect_left_calls(grammar, first, &alternative.elements, calls);
        }
      }
      _ => ()
    }
    if !first.expr(grammar, expr).nullable {
      break;
    }
  }
}

pub fn display_path_cycle(path: &[String]) -> String {
  let mut path_desc = String::new();
  for rule in path {
    path_desc.push_str(&format!("{} -> ", rule));
  }
  if let Some(start) = path.first() {
    path_desc.push_str(start);
  }
  path_desc
}

impl<'a> ExprByIndex for WellFormedness<'a>
{
  fn expr_by_index(&self, index: usize) -> Expression {
    self.grammar.expr_by_index(index)
  }
}

impl<'a> Visitor<()> for WellFormedness<'a>
{
  unit_visitor_impl!(node_match);

  fn visit_subrule(&mut self, this: usize, kind: SubruleKind, alternatives: Vec<Alternative>) {
    if kind.is_repeat() {
      let nullable = alternatives.iter()
        .position(|alt| self.first.sequence(self.grammar, &alt.elements).nullable);
      if let Some(alternative) = nullable {
        self.error_loop_repeat(this, kind, alternative);
      }
    }
    walk_alternatives(self, &alternatives);
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::middle::test::analyse_errors;

  #[test]
  fn test_left_recursion() {
    let errors = analyse_errors(r#"
      tokens { A, B, N }
      a : b A | #(N a) ;
      b : c? a | B ;
      c : A ;
    "#);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, DiagnosticKind::LeftRecursion);
    assert!(errors[0].message.contains("Detected cycle: a -> b -> a"), "{}", errors[0].message);
  }

  #[test]
  fn test_direct_left_recursion() {
    let errors = analyse_errors(r#"
      tokens { PLUS, INT }
      e : e PLUS INT | INT ;
    "#);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("Detected cycle: e -> e"));
  }

  #[test]
  fn test_nullable_repeat() {
    let errors = analyse_errors(r#"
      tokens { A, B }
      s : (A | x)* B (A?)+ ;
      x : { println!("empty"); } ;
    "#);
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.kind == DiagnosticKind::NullableRepeat));
    assert!(errors[0].message.contains("alternative 2"));
  }

  #[test]
  fn test_display_path_cycle() {
    let path = vec![String::from("a"), String::from("b")];
    assert_eq!(display_path_cycle(&path), "a -> b -> a");
  }
}
