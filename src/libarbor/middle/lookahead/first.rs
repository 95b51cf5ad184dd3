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

//! FIRST sets of rules, computed by fixpoint iteration.
//!
//! A node match, a token match and a wildcard consume exactly one node of the current sibling list, so the FIRST set of a sequence only looks at the roots of the nodes it matches. Actions and predicates consume nothing.

use crate::ast::*;
use crate::ast::Expression::*;
use crate::middle::lookahead::set::*;

pub struct FirstSets
{
  rules: Vec<FirstSet>
}

impl FirstSets
{
  pub fn compute(grammar: &Grammar) -> FirstSets {
    let mut first = FirstSets {
      rules: vec![FirstSet::consuming(LookaheadSet::new()); grammar.rules.len()]
    };
    let mut updated = true;
    while updated {
      updated = false;
      for (idx, rule) in grammar.rules.iter().enumerate() {
        let rule_first = first.alternatives(grammar, &rule.alternatives);
        let current = &mut first.rules[idx];
        if rule_first.nullable && !current.nullable {
          current.nullable = true;
          updated = true;
        }
        updated |= current.set.union_with(&rule_first.set);
      }
    }
    first
  }

  pub fn rule(&self, rule: usize) -> &FirstSet {
    &self.rules[rule]
  }

  pub fn expr(&self, grammar: &Grammar, expr: usize) -> FirstSet {
    match &grammar.exprs[expr] {
        NodeMatch(label, _)
      | TokenMatch(label) => FirstSet::consuming(LookaheadSet::label(label.as_str())),
      Wildcard => FirstSet::consuming(LookaheadSet::any_node()),
      RuleRef(rule, _) => {
        // Undefined rules are reported by the analysis, they are considered consuming.
        grammar.rule_index(rule.as_str())
          .map(|idx| self.rules[idx].clone())
          .unwrap_or_else(|| FirstSet::consuming(LookaheadSet::new()))
      }
      Subrule(kind, alternatives) => {
        let mut first = self.alternatives(grammar, alternatives);
        if *kind == SubruleKind::Optional || *kind == SubruleKind::Star {
          first.nullable = true;
        }
        first
      }
        SemanticAction(_)
      | Predicate(_) => FirstSet::empty()
    }
  }

  pub fn sequence(&self, grammar: &Grammar, elements: &[usize]) -> FirstSet {
    let mut first = FirstSet::empty();
    for &element in elements {
      if !first.nullable {
        break;
      }
      first = first.then(&self.expr(grammar, element));
    }
    first
  }

  pub fn alternatives(&self, grammar: &Grammar, alternatives: &[Alternative]) -> FirstSet {
    alternatives.iter()
      .map(|alt| self.sequence(grammar, &alt.elements))
      .fold(FirstSet::consuming(LookaheadSet::new()), |acc, first| acc.or(&first))
  }
}
