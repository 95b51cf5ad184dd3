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

use std::fmt::{Formatter, Display, Error};
use thiserror::Error;

/// Where a walk stopped: the index in the current sibling list and the label of the parent node (`None` at the root list).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Position
{
  pub parent: Option<String>,
  pub index: usize
}

impl Position
{
  pub fn new(parent: Option<String>, index: usize) -> Position {
    Position { parent, index }
  }
}

impl Display for Position
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    match self.parent {
      Some(ref parent) => write!(formatter, "child {} of `{}`", self.index, parent),
      None => write!(formatter, "root {}", self.index)
    }
  }
}

/// Errors raised by generated matching procedures. They abort the current walk only.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatchError
{
  #[error("{position}: rule `{rule}` expected {} but found {}", expected_desc(.expected), found_desc(.found))]
  StructuralMismatch {
    rule: &'static str,
    expected: Vec<&'static str>,
    found: Option<String>,
    position: Position
  },
  #[error("{position}: no viable alternative at decision {decision} of rule `{rule}` on {}", found_desc(.found))]
  NoViableAlternative {
    rule: &'static str,
    decision: usize,
    found: Option<String>,
    position: Position
  },
  #[error("{position}: predicate `{predicate}` of rule `{rule}` failed")]
  FailedPredicate {
    rule: &'static str,
    predicate: &'static str,
    position: Position
  },
  #[error("attribute `{name}` is not bound in any active frame")]
  UnboundAttribute {
    name: &'static str
  },
  #[error("rule `{rule}` exceeds the recursion depth limit of {limit}")]
  DepthLimit {
    rule: &'static str,
    limit: usize
  }
}

impl MatchError
{
  /// The rule in which the error was raised, if any.
  pub fn rule(&self) -> Option<&'static str> {
    use self::MatchError::*;
    match *self {
        StructuralMismatch { rule, .. }
      | NoViableAlternative { rule, .. }
      | FailedPredicate { rule, .. }
      | DepthLimit { rule, .. } => Some(rule),
      UnboundAttribute { .. } => None
    }
  }

  pub fn is_structural_mismatch(&self) -> bool {
    matches!(self, MatchError::StructuralMismatch { .. })
  }

  pub fn is_no_viable_alternative(&self) -> bool {
    matches!(self, MatchError::NoViableAlternative { .. })
  }
}

fn expected_desc(expected: &[&'static str]) -> String {
  let mut expected: Vec<&str> = expected.to_vec();
  expected.sort_unstable();
  expected.dedup();
  if expected.is_empty() {
    String::from("nothing")
  }
  else {
    expected.into_iter()
      .map(|label| format!("`{}`", label))
      .collect::<Vec<_>>()
      .join(" or ")
  }
}

fn found_desc(found: &Option<String>) -> String {
  match found {
    Some(label) => format!("`{}`", label),
    None => String::from(crate::END_OF_CHILDREN)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_mismatch_message() {
    let err = MatchError::StructuralMismatch {
      rule: "expr",
      expected: vec!["STAR", "PLUS", "STAR"],
      found: Some(String::from("MINUS")),
      position: Position::new(Some(String::from("PLUS")), 1)
    };
    assert_eq!(format!("{}", err),
      "child 1 of `PLUS`: rule `expr` expected `PLUS` or `STAR` but found `MINUS`");
    assert_eq!(err.rule(), Some("expr"));
    assert!(err.is_structural_mismatch());
  }

  #[test]
  fn test_end_of_children_message() {
    let err = MatchError::NoViableAlternative {
      rule: "stat",
      decision: 2,
      found: None,
      position: Position::default()
    };
    assert_eq!(format!("{}", err),
      "root 0: no viable alternative at decision 2 of rule `stat` on <end of children>");
  }
}
