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

use std::collections::BTreeSet;
use std::fmt::{Formatter, Display, Error};

pub const ANY_NODE: &str = "<any node>";
pub const END_OF_CHILDREN: &str = "<end of children>";

/// What can be seen at the current position of a sibling list: a node with one of `labels`, any node if `any` is set, or the end of the list if `end` is set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LookaheadSet
{
  pub labels: BTreeSet<String>,
  pub any: bool,
  pub end: bool
}

impl LookaheadSet
{
  pub fn new() -> LookaheadSet {
    LookaheadSet::default()
  }

  pub fn label(label: &str) -> LookaheadSet {
    let mut set = LookaheadSet::new();
    set.labels.insert(String::from(label));
    set
  }

  pub fn any_node() -> LookaheadSet {
    LookaheadSet { any: true, ..LookaheadSet::default() }
  }

  pub fn end_of_children() -> LookaheadSet {
    LookaheadSet { end: true, ..LookaheadSet::default() }
  }

  pub fn is_empty(&self) -> bool {
    self.labels.is_empty() && !self.any && !self.end
  }

  /// Returns `true` if `self` changed.
  pub fn union_with(&mut self, other: &LookaheadSet) -> bool {
    let before = (self.labels.len(), self.any, self.end);
    self.labels.extend(other.labels.iter().cloned());
    self.any |= other.any;
    self.end |= other.end;
    before != (self.labels.len(), self.any, self.end)
  }

  pub fn union(&self, other: &LookaheadSet) -> LookaheadSet {
    let mut set = self.clone();
    set.union_with(other);
    set
  }

  /// What is accepted by both sets, a wildcard overlaps with every label but not with the end of the list.
  pub fn overlap(&self, other: &LookaheadSet) -> LookaheadSet {
    let mut labels: BTreeSet<String> = self.labels.intersection(&other.labels).cloned().collect();
    if self.any {
      labels.extend(other.labels.iter().cloned());
    }
    if other.any {
      labels.extend(self.labels.iter().cloned());
    }
    LookaheadSet {
      labels,
      any: self.any && other.any,
      end: self.end && other.end
    }
  }

  pub fn intersects(&self, other: &LookaheadSet) -> bool {
    !self.overlap(other).is_empty()
  }

  pub fn accepts_label(&self, label: &str) -> bool {
    self.any || self.labels.contains(label)
  }

  /// Names reported to the user when nothing in the set is found.
  pub fn expected(&self) -> Vec<String> {
    let mut expected: Vec<String> = self.labels.iter().cloned().collect();
    if self.any {
      expected.push(String::from(ANY_NODE));
    }
    if self.end {
      expected.push(String::from(END_OF_CHILDREN));
    }
    expected
  }
}

impl Display for LookaheadSet
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    write!(formatter, "{{{}}}", self.expected().join(", "))
  }
}

/// FIRST set of a sequence: the labels it can start with, and whether it can match without consuming a node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FirstSet
{
  pub set: LookaheadSet,
  pub nullable: bool
}

impl FirstSet
{
  pub fn empty() -> FirstSet {
    FirstSet { set: LookaheadSet::new(), nullable: true }
  }

  pub fn consuming(set: LookaheadSet) -> FirstSet {
    FirstSet { set, nullable: false }
  }

  /// FIRST of `self` followed by `next`.
  pub fn then(mut self, next: &FirstSet) -> FirstSet {
    if self.nullable {
      self.set.union_with(&next.set);
      self.nullable = next.nullable;
    }
    self
  }

  /// FIRST of the choice between `self` and `other`.
  pub fn or(mut self, other: &FirstSet) -> FirstSet {
    self.set.union_with(&other.set);
    self.nullable |= other.nullable;
    self
  }

  /// The prediction set of a candidate: its FIRST set extended by `follow` when it can match nothing.
  pub fn predict(&self, follow: &LookaheadSet) -> LookaheadSet {
    if self.nullable {
      self.set.union(follow)
    }
    else {
      self.set.clone()
    }
  }
}
