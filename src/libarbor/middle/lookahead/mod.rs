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

//! Lookahead analysis: every place where the walker must choose between several branches is a decision point, each branch being predicted by the label of the current node.
//!
//! Overlapping predictions are resolved by guards when one of the overlapping alternatives is guarded, otherwise by declaration order with an ambiguity warning. The continue branch of an optional or repeated subrule is tried before its exit.

use crate::ast::*;
use crate::diagnostic::*;
use crate::visitor::*;
use self::first::FirstSets;
use self::follow::FollowSets;
use self::set::*;

pub mod set;
pub mod first;
pub mod follow;
pub mod decision;

#[tracing::instrument(level = "debug", skip_all)]
pub fn predict(cx: &Diagnostics, mut grammar: Grammar) -> Partial<Grammar> {
  let first = FirstSets::compute(&grammar);
  let follow = FollowSets::compute(&grammar, &first);
  let decisions = DecisionBuilder::new(&grammar, &first, &follow).build();
  report_ambiguities(cx, &grammar, &decisions);
  print_decisions(&grammar, &first, &follow, &decisions);
  tracing::debug!(decisions = decisions.len(), "lookahead computed");
  grammar.decisions = decisions;
  Partial::Value(grammar)
}

struct DecisionBuilder<'a>
{
  grammar: &'a Grammar,
  first: &'a FirstSets,
  follow: &'a FollowSets,
  rule: usize,
  decisions: Vec<DecisionPoint>
}

impl<'a> DecisionBuilder<'a>
{
  fn new(grammar: &'a Grammar, first: &'a FirstSets, follow: &'a FollowSets) -> Self {
    DecisionBuilder {
      grammar,
      first,
      follow,
      rule: 0,
      decisions: vec![]
    }
  }

  fn build(mut self) -> Vec<DecisionPoint> {
    let grammar = self.grammar;
    for (idx, rule) in grammar.rules.iter().enumerate() {
      self.rule = idx;
      if needs_decision(&rule.alternatives) {
        let follow = self.follow.rule(idx).clone();
        self.push_decision(DecisionSite::Rule(idx), DecisionKind::Alternatives,
          rule.name.span(), &rule.alternatives, &follow, None);
      }
      walk_alternatives(&mut self, &rule.alternatives);
    }
    self.decisions
  }

  fn push_decision(&mut self, site: DecisionSite, kind: DecisionKind, span: Span,
    alternatives: &[Alternative], site_follow: &LookaheadSet, exit: Option<LookaheadSet>)
  {
    let candidates: Vec<Candidate> = alternatives.iter()
      .map(|alt| {
        let first = self.first.sequence(self.grammar, &alt.elements);
        Candidate {
          prediction: first.predict(site_follow),
          guarded: alt.is_guarded(),
          nullable: first.nullable
        }
      })
      .collect();
    let conflicts = conflicts(&candidates, exit.as_ref());
    let resolution =
      if conflicts.is_empty() { Resolution::Disjoint }
      else if conflicts.iter().all(|c| c.gated) { Resolution::PredicateGated }
      else { Resolution::DeclarationOrder };
    let decision = DecisionPoint {
      id: self.decisions.len(),
      site,
      kind,
      rule: self.rule,
      span,
      candidates,
      exit,
      conflicts,
      resolution
    };
    tracing::trace!(%decision, "decision point");
    self.decisions.push(decision);
  }
}

fn needs_decision(alternatives: &[Alternative]) -> bool {
  alternatives.len() >= 2 || alternatives.iter().any(Alternative::is_guarded)
}

fn conflicts(candidates: &[Candidate], exit: Option<&LookaheadSet>) -> Vec<Conflict> {
  let mut conflicts = vec![];
  for (i, first) in candidates.iter().enumerate() {
    for (j, second) in candidates.iter().enumerate().skip(i + 1) {
      let overlap = first.prediction.overlap(&second.prediction);
      if !overlap.is_empty() {
        conflicts.push(Conflict {
          first: Branch::Alternative(i),
          second: Branch::Alternative(j),
          overlap,
          gated: first.guarded || second.guarded
        });
      }
    }
    if let Some(exit) = exit {
      let overlap = first.prediction.overlap(exit);
      if !overlap.is_empty() {
        conflicts.push(Conflict {
          first: Branch::Alternative(i),
          second: Branch::Exit,
          overlap,
          gated: first.guarded
        });
      }
    }
  }
  conflicts
}

impl<'a> ExprByIndex for DecisionBuilder<'a>
{
  fn expr_by_index(&self, index: usize) -> Expression {
    self.grammar.expr_by_index(index)
  }
}

impl<'a> Visitor<()> for DecisionBuilder<'a>
{
  unit_visitor_impl!(node_match);

  fn visit_subrule(&mut self, this: usize, kind: SubruleKind, alternatives: Vec<Alternative>) {
    let follow = self.follow.expr(this);
    let span = self.grammar.expr_span(this);
    let site = DecisionSite::Subrule(this);
    match kind {
      SubruleKind::Block => {
        if needs_decision(&alternatives) {
          self.push_decision(site, DecisionKind::Alternatives, span, &alternatives, &follow, None);
        }
      }
      SubruleKind::Optional => {
        self.push_decision(site, DecisionKind::Optional, span, &alternatives, &follow, Some(follow.clone()));
      }
      SubruleKind::Star | SubruleKind::Plus => {
        let decision_kind = if kind == SubruleKind::Star { DecisionKind::Star } else { DecisionKind::Plus };
        let mut site_follow = follow.clone();
        site_follow.union_with(&self.first.alternatives(self.grammar, &alternatives).set);
        self.push_decision(site, decision_kind, span, &alternatives, &site_follow, Some(follow));
      }
    }
    walk_alternatives(self, &alternatives);
  }
}

fn report_ambiguities(cx: &Diagnostics, grammar: &Grammar, decisions: &[DecisionPoint]) {
  for decision in decisions {
    let rule = &grammar.rules[decision.rule].name;
    for conflict in decision.conflicts.iter().filter(|c| !c.gated) {
      let msg = match conflict.second {
        Branch::Exit => format!(
          "in rule `{}`, {} of the repeated or optional subrule and its exit are both predicted by {}, \
          the subrule continues (greedy)",
          rule, conflict.first, conflict.overlap),
        Branch::Alternative(_) => format!(
          "in rule `{}`, {} and {} are both predicted by {}, {} is always selected on these labels",
          rule, conflict.first, conflict.second, conflict.overlap, conflict.first)
      };
      cx.span_warn(DiagnosticKind::Ambiguity, decision.span, msg);
    }
  }
}

fn print_decisions(grammar: &Grammar, first: &FirstSets, follow: &FollowSets, decisions: &[DecisionPoint]) {
  let level = grammar.options.print_decisions;
  if level.debug() {
    for (idx, rule) in grammar.rules.iter().enumerate() {
      let first = first.rule(idx);
      tracing::info!("rule `{}`: FIRST {}{} FOLLOW {}", rule.name, first.set,
        if first.nullable { " (nullable)" } else { "" }, follow.rule(idx));
    }
  }
  if level.debug() || level.show() {
    for decision in decisions {
      tracing::info!("{} in rule `{}`", decision, grammar.rules[decision.rule].name);
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::middle::test::{analysed, analysed_with_diagnostics};

  #[test]
  fn test_disjoint_alternatives() {
    let grammar = analysed(r#"
      tokens { PLUS, STAR, INT }
      expr : #(PLUS expr expr) | #(STAR expr expr) | INT ;
    "#);
    assert_eq!(grammar.decisions.len(), 1);
    let decision = &grammar.decisions[0];
    assert_eq!(decision.site, DecisionSite::Rule(0));
    assert_eq!(decision.resolution, Resolution::Disjoint);
    assert_eq!(decision.viable().expected(), vec!["INT", "PLUS", "STAR"]);
  }

  #[test]
  fn test_ambiguity_resolved_by_declaration_order() {
    let (grammar, diagnostics) = analysed_with_diagnostics(r#"
      tokens { A, B }
      s : A B | A ;
    "#);
    let decision = &grammar.decisions[0];
    assert_eq!(decision.resolution, Resolution::DeclarationOrder);
    assert_eq!(decision.conflicts[0].overlap.expected(), vec!["A"]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::Ambiguity);
  }

  #[test]
  fn test_guarded_overlap_is_gated() {
    let (grammar, diagnostics) = analysed_with_diagnostics(r#"
      tokens { A }
      s [deep: bool = false] : {@deep}? A | A ;
    "#);
    assert_eq!(grammar.decisions[0].resolution, Resolution::PredicateGated);
    assert!(diagnostics.is_empty());
  }

  #[test]
  fn test_nullable_alternative_uses_follow() {
    let grammar = analysed(r#"
      tokens { A, B, N }
      s : #(N x) B ;
      x : A | ;
    "#);
    let decision = grammar.decision_of_rule(1).unwrap();
    assert_eq!(decision.candidates[1].prediction, LookaheadSet::end_of_children());
    assert!(decision.candidates[1].nullable);
    assert_eq!(decision.resolution, Resolution::Disjoint);
  }

  #[test]
  fn test_repetition_exit() {
    let (grammar, diagnostics) = analysed_with_diagnostics(r#"
      tokens { A, B }
      s : A* A | B+ ;
    "#);
    let star = grammar.decisions.iter().find(|d| d.kind == DecisionKind::Star).unwrap();
    assert_eq!(star.exit.as_ref().map(|e| e.expected()), Some(vec![String::from("A")]));
    assert_eq!(star.conflicts[0].second, Branch::Exit);
    let plus = grammar.decisions.iter().find(|d| d.kind == DecisionKind::Plus).unwrap();
    assert_eq!(plus.resolution, Resolution::Disjoint);
    assert_eq!(diagnostics.iter().filter(|d| d.kind == DiagnosticKind::Ambiguity).count(), 1);
  }

  #[test]
  fn test_prediction_is_idempotent() {
    let grammar = analysed(r#"
      tokens { A, B, C }
      s : (A | B)* C? | C ;
    "#);
    let before = grammar.decisions.clone();
    let cx = Diagnostics::new();
    let grammar = predict(&cx, grammar).unwrap();
    assert_eq!(before, grammar.decisions);
  }
}
