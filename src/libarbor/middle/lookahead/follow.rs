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

//! FOLLOW sets of rules and of every expression occurrence.
//!
//! The children of a node match form their own sibling list, so what follows the last child is the end of that list. Entry rules are followed by the end of the root list.

use crate::ast::*;
use crate::ast::Expression::*;
use crate::middle::lookahead::set::*;
use crate::middle::lookahead::first::FirstSets;
use std::collections::HashMap;

pub struct FollowSets
{
  rules: Vec<LookaheadSet>,
  exprs: HashMap<usize, LookaheadSet>
}

impl FollowSets
{
  pub fn compute(grammar: &Grammar, first: &FirstSets) -> FollowSets {
    let mut follow = FollowSets {
      rules: vec![LookaheadSet::new(); grammar.rules.len()],
      exprs: HashMap::new()
    };
    for entry in grammar.entry_rules() {
      follow.rules[entry].end = true;
    }
    let mut updated = true;
    while updated {
      updated = false;
      follow.exprs.clear();
      for (idx, rule) in grammar.rules.iter().enumerate() {
        let rule_follow = follow.rules[idx].clone();
        for alt in &rule.alternatives {
          updated |= follow.sequence(grammar, first, &alt.elements, rule_follow.clone());
        }
      }
    }
    follow
  }

  pub fn rule(&self, rule: usize) -> &LookaheadSet {
    &self.rules[rule]
  }

  /// What can be seen right after the expression `expr` has been matched.
  pub fn expr(&self, expr: usize) -> LookaheadSet {
    self.exprs.get(&expr).cloned().unwrap_or_default()
  }

  fn sequence(&mut self, grammar: &Grammar, first: &FirstSets, elements: &[usize],
    follow: LookaheadSet) -> bool
  {
    let mut updated = false;
    let mut current = follow;
    for &element in elements.iter().rev() {
      self.exprs.entry(element).or_default().union_with(&current);
      updated |= self.inner(grammar, first, element, &current);
      current = first.expr(grammar, element).predict(&current);
    }
    updated
  }

  fn inner(&mut self, grammar: &Grammar, first: &FirstSets, expr: usize,
    follow: &LookaheadSet) -> bool
  {
    match &grammar.exprs[expr] {
      NodeMatch(_, children) => {
        self.sequence(grammar, first, children, LookaheadSet::end_of_children())
      }
      RuleRef(rule, _) => {
        match grammar.rule_index(rule.as_str()) {
          Some(idx) => self.rules[idx].union_with(follow),
          None => false
        }
      }
      Subrule(kind, alternatives) => {
        let mut inner_follow = follow.clone();
        if kind.is_repeat() {
          inner_follow.union_with(&first.alternatives(grammar, alternatives).set);
        }
        let mut updated = false;
        for alt in alternatives {
          updated |= self.sequence(grammar, first, &alt.elements, inner_follow.clone());
        }
        updated
      }
      _ => false
    }
  }
}
