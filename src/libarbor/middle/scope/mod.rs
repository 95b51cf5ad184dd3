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

//! Remote attribution: `@x` written in a rule `r` denotes the attribute `x` of the nearest active invocation declaring `x`, searching outward from the invocation of `r`.
//!
//! Every invocation of a rule declaring attributes pushes a frame on the chain of its caller. The chain is only known during a walk, so this pass proves statically that it always holds a declaration: every invocation path from an entry rule to `r` must go through a rule declaring `x`, or `r` declares `x` itself. The plan records the rules that can be the nearest declaration, they must agree on the type of `x`.

use crate::ast::*;
use crate::diagnostic::*;
use crate::visitor::*;
use self::call_graph::CallGraph;
use self::reference::*;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

pub mod reference;
pub mod call_graph;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeResolution
{
  /// Rules that can hold the nearest declaration, in rule order.
  pub declaring_rules: Vec<usize>,
  /// Normalized type text of the attribute.
  pub ty: String
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopePlan
{
  pub resolutions: BTreeMap<(usize, String), AttributeResolution>
}

impl ScopePlan
{
  pub fn resolve(&self, rule: usize, name: &str) -> Option<&AttributeResolution> {
    self.resolutions.get(&(rule, String::from(name)))
  }
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn resolve_attributes(cx: &Diagnostics, mut grammar: Grammar) -> Partial<Grammar> {
  let graph = CallGraph::build(&grammar);
  let entries = grammar.entry_rules();
  let mut plan = ScopePlan::default();
  let mut has_errors = false;
  for (rule, name, span) in referenced_attributes(&grammar) {
    match resolve(cx, &grammar, &graph, &entries, rule, &name, span) {
      Some(resolution) => {
        tracing::trace!(rule = %grammar.rules[rule].name, attribute = %name,
          declaring = ?resolution.declaring_rules, "attribute resolved");
        plan.resolutions.insert((rule, name), resolution);
      }
      None => has_errors = true
    }
  }
  tracing::debug!(resolutions = plan.resolutions.len(), "scope plan computed");
  grammar.scope_plan = plan;
  if has_errors {
    Partial::Fake(grammar)
  }
  else {
    Partial::Value(grammar)
  }
}

/// `(rule, attribute, first reference)` for every attribute referenced in a rule.
fn referenced_attributes(grammar: &Grammar) -> Vec<(usize, String, Span)> {
  let mut seen = BTreeMap::new();
  for (idx, rule) in grammar.rules.iter().enumerate() {
    for fragment in rule_fragments(grammar, rule) {
      for reference in scan_references(&fragment) {
        seen.entry((idx, reference.name)).or_insert(reference.span);
      }
    }
  }
  seen.into_iter().map(|((rule, name), span)| (rule, name, span)).collect()
}

/// Code fragments of a rule able to reference attributes: guards, actions, predicates and arguments.
pub fn rule_fragments(grammar: &Grammar, rule: &Rule) -> Vec<CodeFragment> {
  let mut collector = FragmentCollector {
    grammar,
    fragments: vec![]
  };
  collector.collect_guards(&rule.alternatives);
  walk_alternatives(&mut collector, &rule.alternatives);
  collector.fragments
}

struct FragmentCollector<'a>
{
  grammar: &'a Grammar,
  fragments: Vec<CodeFragment>
}

impl<'a> FragmentCollector<'a>
{
  fn collect_guards(&mut self, alternatives: &[Alternative]) {
    self.fragments.extend(alternatives.iter().filter_map(|alt| alt.guard.clone()));
  }
}

impl<'a> ExprByIndex for FragmentCollector<'a>
{
  fn expr_by_index(&self, index: usize) -> Expression {
    self.grammar.expr_by_index(index)
  }
}

impl<'a> Visitor<()> for FragmentCollector<'a>
{
  unit_visitor_impl!(node_match);

  fn visit_subrule(&mut self, _this: usize, _kind: SubruleKind, alternatives: Vec<Alternative>) {
    self.collect_guards(&alternatives);
    walk_alternatives(self, &alternatives);
  }

  fn visit_rule_ref(&mut self, _this: usize, _rule: &Ident, args: Option<CodeFragment>) {
    self.fragments.extend(args);
  }

  fn visit_semantic_action(&mut self, _this: usize, action: CodeFragment) {
    self.fragments.push(action);
  }

  fn visit_predicate(&mut self, _this: usize, predicate: CodeFragment) {
    self.fragments.push(predicate);
  }
}

fn resolve(cx: &Diagnostics, grammar: &Grammar, graph: &CallGraph, entries: &[usize],
  rule: usize, name: &str, span: Span) -> Option<AttributeResolution>
{
  let rules = &grammar.rules;
  if let Some(attribute) = rules[rule].attribute(name) {
    return Some(AttributeResolution {
      declaring_rules: vec![rule],
      ty: attribute.type_text()
    });
  }
  let undeclaring = |idx: usize| !rules[idx].declares(name);
  if let Some(path) = graph.path_avoiding(entries, rule, undeclaring) {
    let path: Vec<String> = path.into_iter().map(|idx| rules[idx].name.to_string()).collect();
    cx.span_err(DiagnosticKind::UnreachableAttribute, span, format!(
      "attribute `{}` referenced in rule `{}` is not always in scope: the invocation path `{}` \
      does not go through a rule declaring `{}`",
      name, rules[rule].name, path.join(" -> "), name));
    return None;
  }
  let declaring_rules = nearest_declaring_callers(grammar, graph, rule, name);
  if declaring_rules.is_empty() {
    cx.span_err(DiagnosticKind::UnreachableAttribute, span, format!(
      "attribute `{}` referenced in rule `{}` is not declared by `{}` nor by any rule invoking it",
      name, rules[rule].name, rules[rule].name));
    return None;
  }
  check_type_agreement(cx, grammar, rule, name, span, declaring_rules)
}

/// Declaring rules met first when walking the callers of `rule` outward.
fn nearest_declaring_callers(grammar: &Grammar, graph: &CallGraph, rule: usize, name: &str) -> Vec<usize> {
  let mut declaring = BTreeSet::new();
  let mut visited = BTreeSet::new();
  let mut queue = VecDeque::new();
  visited.insert(rule);
  queue.push_back(rule);
  while let Some(current) = queue.pop_front() {
    for &caller in &graph.callers[current] {
      if grammar.rules[caller].declares(name) {
        declaring.insert(caller);
      }
      else if visited.insert(caller) {
        queue.push_back(caller);
      }
    }
  }
  declaring.into_iter().collect()
}

fn check_type_agreement(cx: &Diagnostics, grammar: &Grammar, rule: usize, name: &str, span: Span,
  declaring_rules: Vec<usize>) -> Option<AttributeResolution>
{
  let declarations: Vec<&Attribute> = declaring_rules.iter()
    .filter_map(|&idx| grammar.rules[idx].attribute(name))
    .collect();
  let ty = declarations.first().map(|attr| attr.type_text()).unwrap_or_default();
  if declarations.iter().all(|attr| attr.type_text() == ty) {
    Some(AttributeResolution { declaring_rules, ty })
  }
  else {
    let mut errors = vec![(span, format!(
      "attribute `{}` referenced in rule `{}` can be declared with different types by its enclosing rules",
      name, grammar.rules[rule].name))];
    for (&idx, attr) in declaring_rules.iter().zip(declarations.iter()) {
      errors.push((attr.span(), format!("declared with type `{}` in rule `{}`",
        attr.type_text(), grammar.rules[idx].name)));
    }
    cx.multi_locations_err(DiagnosticKind::AttributeTypeConflict, errors);
    None
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::middle::test::{analysed, analyse_errors};

  #[test]
  fn test_remote_attribute_resolution() {
    let grammar = analysed(r#"
      tokens { BLOCK, VAR, FUN }
      pub prog : (block | fun)* ;
      block [depth: usize = 0] : #(BLOCK stat*) ;
      fun [depth: usize = 1] : #(FUN stat*) ;
      stat : VAR { @depth += 1; } | block ;
    "#);
    let stat = grammar.rule_index("stat").unwrap();
    let resolution = grammar.scope_plan.resolve(stat, "depth").unwrap();
    assert_eq!(resolution.declaring_rules, vec![1, 2]);
    assert_eq!(resolution.ty, "usize");
  }

  #[test]
  fn test_own_declaration() {
    let grammar = analysed(r#"
      tokens { A }
      s [n: u32] : A { @n += 1; } ;
    "#);
    assert_eq!(grammar.scope_plan.resolve(0, "n").map(|r| r.declaring_rules.clone()), Some(vec![0]));
  }

  #[test]
  fn test_path_avoiding_declaration() {
    let diagnostics = analyse_errors(r#"
      tokens { A, N }
      pub a : #(N c) | b ;
      b [x: i32 = 0] : c ;
      c : A { @x = 1; } ;
    "#);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnreachableAttribute);
    assert!(diagnostics[0].message.contains("`a -> c`"), "{}", diagnostics[0].message);
  }

  #[test]
  fn test_undeclared_attribute() {
    let diagnostics = analyse_errors(r#"
      tokens { A }
      a : b ;
      b : A { @missing.clear(); } ;
    "#);
    assert!(diagnostics.iter().any(|d| d.kind == DiagnosticKind::UnreachableAttribute));
  }

  #[test]
  fn test_type_conflict() {
    let diagnostics = analyse_errors(r#"
      tokens { A }
      pub a [x: i32] : c ;
      pub b [x: i64] : c ;
      c : A { @x += 1; } ;
    "#);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::AttributeTypeConflict);
    assert_eq!(diagnostics[0].notes.len(), 2);
  }
}
