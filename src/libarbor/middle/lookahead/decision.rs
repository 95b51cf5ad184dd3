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

use crate::identifier::Span;
use crate::middle::lookahead::set::LookaheadSet;
use std::fmt::{Formatter, Display, Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DecisionSite
{
  /// The alternatives of a rule.
  Rule(usize),
  /// The subrule at this expression index.
  Subrule(usize)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecisionKind
{
  Alternatives,
  Optional,
  Star,
  Plus
}

impl DecisionKind
{
  pub fn has_exit(self) -> bool {
    self != DecisionKind::Alternatives
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate
{
  pub prediction: LookaheadSet,
  pub guarded: bool,
  pub nullable: bool
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Branch
{
  Alternative(usize),
  /// Leaving an optional or repeated subrule.
  Exit
}

impl Display for Branch
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    match *self {
      Branch::Alternative(idx) => write!(formatter, "alternative {}", idx + 1),
      Branch::Exit => formatter.write_str("exit")
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conflict
{
  pub first: Branch,
  pub second: Branch,
  pub overlap: LookaheadSet,
  /// A guarding predicate takes part in the conflict.
  pub gated: bool
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resolution
{
  Disjoint,
  PredicateGated,
  DeclarationOrder
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecisionPoint
{
  pub id: usize,
  pub site: DecisionSite,
  pub kind: DecisionKind,
  pub rule: usize,
  pub span: Span,
  /// One per alternative, in declaration order.
  pub candidates: Vec<Candidate>,
  /// What can follow an optional or repeated subrule.
  pub exit: Option<LookaheadSet>,
  pub conflicts: Vec<Conflict>,
  pub resolution: Resolution
}

impl DecisionPoint
{
  /// Every label predicting one of the candidates.
  pub fn viable(&self) -> LookaheadSet {
    self.candidates.iter()
      .fold(LookaheadSet::new(), |acc, candidate| acc.union(&candidate.prediction))
  }

  pub fn has_guards(&self) -> bool {
    self.candidates.iter().any(|candidate| candidate.guarded)
  }
}

impl Display for DecisionPoint
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    write!(formatter, "decision {} ({:?}, {:?}) at {}:", self.id, self.kind, self.resolution, self.span)?;
    for (idx, candidate) in self.candidates.iter().enumerate() {
      write!(formatter, " {} {}{}", Branch::Alternative(idx), candidate.prediction,
        if candidate.guarded { " if guard" } else { "" })?;
    }
    if let Some(exit) = &self.exit {
      write!(formatter, " exit {}", exit)?;
    }
    Ok(())
  }
}
