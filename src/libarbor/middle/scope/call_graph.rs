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
use crate::visitor::*;
use std::collections::{BTreeSet, VecDeque};

/// Static invocation graph: `callees[r]` are the rules `r` can invoke.
pub struct CallGraph
{
  pub callees: Vec<BTreeSet<usize>>,
  pub callers: Vec<BTreeSet<usize>>
}

impl CallGraph
{
  pub fn build(grammar: &Grammar) -> CallGraph {
    let mut builder = CallGraphBuilder {
      grammar,
      current: 0,
      callees: vec![BTreeSet::new(); grammar.rules.len()]
    };
    for (idx, rule) in grammar.rules.iter().enumerate() {
      builder.current = idx;
      walk_alternatives(&mut builder, &rule.alternatives);
    }
    let callees = builder.callees;
    let mut callers = vec![BTreeSet::new(); grammar.rules.len()];
    for (caller, rule_callees) in callees.iter().enumerate() {
      for &callee in rule_callees {
        callers[callee].insert(caller);
      }
    }
    CallGraph { callees, callers }
  }

  /// Rules reachable from `roots`, the roots included.
  pub fn reachable_from(&self, roots: &[usize]) -> BTreeSet<usize> {
    let mut reached: BTreeSet<usize> = roots.iter().cloned().collect();
    let mut queue: VecDeque<usize> = roots.iter().cloned().collect();
    while let Some(rule) = queue.pop_front() {
      for &callee in &self.callees[rule] {
        if reached.insert(callee) {
          queue.push_back(callee);
        }
      }
    }
    reached
  }

  /// Shortest invocation path from one of `roots` to `target` only going through rules accepted by `through`, the endpoints included.
  pub fn path_avoiding<F>(&self, roots: &[usize], target: usize, through: F) -> Option<Vec<usize>> where
   F: Fn(usize) -> bool
  {
    let mut parent: Vec<Option<usize>> = vec![None; self.callees.len()];
    let mut visited = vec![false; self.callees.len()];
    let mut queue = VecDeque::new();
    for &root in roots.iter().filter(|&&root| through(root) || root == target) {
      visited[root] = true;
      queue.push_back(root);
    }
    while let Some(rule) = queue.pop_front() {
      if rule == target {
        let mut path = vec![rule];
        let mut current = rule;
        while let Some(previous) = parent[current] {
          path.push(previous);
          current = previous;
        }
        path.reverse();
        return Some(path);
      }
      for &callee in &self.callees[rule] {
        if !visited[callee] && (through(callee) || callee == target) {
          visited[callee] = true;
          parent[callee] = Some(rule);
          queue.push_back(callee);
        }
      }
    }
    None
  }
}

struct CallGraphBuilder<'a>
{
  grammar: &'a Grammar,
  current: usize,
  callees: Vec<BTreeSet<usize>>
}

impl<'a> ExprByIndex for CallGraphBuilder<'a>
{
  fn expr_by_index(&self, index: usize) -> Expression {
    self.grammar.expr_by_index(index)
  }
}

impl<'a> Visitor<()> for CallGraphBuilder<'a>
{
  unit_visitor_impl!(node_match);
  unit_visitor_impl!(subrule);

  fn visit_rule_ref(&mut self, _this: usize, rule: &Ident, _args: Option<CodeFragment>) {
    if let Some(callee) = self.grammar.rule_index(rule.as_str()) {
      self.callees[self.current].insert(callee);
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::middle::test::analysed;

  #[test]
  fn test_call_graph() {
    let grammar = analysed(r#"
      tokens { A, N }
      pub a : b #(N (c)*) ;
      b : A | c ;
      c : A ;
    "#);
    let graph = CallGraph::build(&grammar);
    assert_eq!(graph.callees[0], vec![1, 2].into_iter().collect());
    assert_eq!(graph.callers[2], vec![0, 1].into_iter().collect());
    assert_eq!(graph.reachable_from(&[1]), vec![1, 2].into_iter().collect());
    assert_eq!(graph.path_avoiding(&[0], 2, |rule| rule != 1), Some(vec![0, 2]));
    assert_eq!(graph.path_avoiding(&[0], 1, |rule| rule != 0), None);
  }
}
