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

use crate::cursor::Cursor;
use crate::tree::TreeNode;
use crate::match_error::MatchError;
use crate::{ANY_NODE, END_OF_CHILDREN};

/// Receives every error raised by a walk before it is propagated to the caller of the walk.
pub trait ErrorHandler
{
  fn report(&mut self, error: &MatchError) {
    tracing::debug!(%error, "tree walk aborted");
  }
}

/// The default handler: it only logs.
pub struct LogHandler;

impl ErrorHandler for LogHandler {}

/// Collects reported errors, mostly useful in tests.
#[derive(Default)]
pub struct CollectHandler
{
  pub errors: Vec<MatchError>
}

impl ErrorHandler for CollectHandler
{
  fn report(&mut self, error: &MatchError) {
    self.errors.push(error.clone());
  }
}

/// State of a walk shared by all the matching procedures it invokes.
pub struct Walker
{
  handler: Box<dyn ErrorHandler>,
  depth: usize,
  depth_limit: Option<usize>
}

impl Default for Walker
{
  fn default() -> Self {
    Walker::new()
  }
}

impl Walker
{
  pub fn new() -> Walker {
    Walker::with_handler(LogHandler)
  }

  pub fn with_handler<H>(handler: H) -> Walker where
   H: ErrorHandler + 'static
  {
    Walker {
      handler: Box::new(handler),
      depth: 0,
      depth_limit: None
    }
  }

  /// Rule invocations nested deeper than `limit` fail with `MatchError::DepthLimit`.
  pub fn with_depth_limit(mut self, limit: usize) -> Walker {
    self.depth_limit = Some(limit);
    self
  }

  pub fn depth(&self) -> usize {
    self.depth
  }

  pub fn enter(&mut self, rule: &'static str) -> Result<(), MatchError> {
    if let Some(limit) = self.depth_limit {
      if self.depth >= limit {
        return Err(self.report(MatchError::DepthLimit { rule, limit }));
      }
    }
    self.depth += 1;
    tracing::trace!(rule, depth = self.depth, "enter");
    Ok(())
  }

  pub fn exit(&mut self) {
    debug_assert!(self.depth > 0, "`exit` without a matching `enter`.");
    self.depth = self.depth.saturating_sub(1);
  }

  /// Consumes the current node if its label is `label`.
  pub fn expect<'t, N>(&mut self, cursor: &mut Cursor<'t, N>, rule: &'static str,
    label: &'static str) -> Result<&'t N, MatchError> where
   N: TreeNode
  {
    match cursor.peek() {
      Some(node) if node.label() == label => {
        cursor.bump();
        Ok(node)
      }
      _ => Err(self.mismatch(cursor, rule, &[label]))
    }
  }

  /// Consumes the current node whatever its label.
  pub fn wildcard<'t, N>(&mut self, cursor: &mut Cursor<'t, N>, rule: &'static str)
    -> Result<&'t N, MatchError> where
   N: TreeNode
  {
    match cursor.bump() {
      Some(node) => Ok(node),
      None => Err(self.mismatch(cursor, rule, &[ANY_NODE]))
    }
  }

  /// Succeeds if every node of the sibling list has been consumed.
  pub fn expect_end<N>(&mut self, cursor: &Cursor<'_, N>, rule: &'static str)
    -> Result<(), MatchError> where
   N: TreeNode
  {
    if cursor.is_at_end() {
      Ok(())
    }
    else {
      Err(self.mismatch(cursor, rule, &[END_OF_CHILDREN]))
    }
  }

  pub fn mismatch<N>(&mut self, cursor: &Cursor<'_, N>, rule: &'static str,
    expected: &[&'static str]) -> MatchError where
   N: TreeNode
  {
    self.report(MatchError::StructuralMismatch {
      rule,
      expected: expected.to_vec(),
      found: cursor.peek_label().map(String::from),
      position: cursor.position()
    })
  }

  pub fn no_viable_alternative<N>(&mut self, cursor: &Cursor<'_, N>, rule: &'static str,
    decision: usize) -> MatchError where
   N: TreeNode
  {
    self.report(MatchError::NoViableAlternative {
      rule,
      decision,
      found: cursor.peek_label().map(String::from),
      position: cursor.position()
    })
  }

  pub fn failed_predicate<N>(&mut self, cursor: &Cursor<'_, N>, rule: &'static str,
    predicate: &'static str) -> MatchError where
   N: TreeNode
  {
    self.report(MatchError::FailedPredicate {
      rule,
      predicate,
      position: cursor.position()
    })
  }

  fn report(&mut self, error: MatchError) -> MatchError {
    self.handler.report(&error);
    error
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::tree::Tree;
  use std::rc::Rc;
  use std::cell::RefCell;

  struct SharedHandler(Rc<RefCell<Vec<MatchError>>>);

  impl ErrorHandler for SharedHandler
  {
    fn report(&mut self, error: &MatchError) {
      self.0.borrow_mut().push(error.clone());
    }
  }

  #[test]
  fn test_expect_and_end() {
    let tree: Tree = "(PLUS (INT 3) (INT 4))".parse().unwrap();
    let mut walker = Walker::new();
    let mut root = Cursor::root(&tree);
    let plus = walker.expect(&mut root, "expr", "PLUS").unwrap();
    let mut children = Cursor::children(plus);
    assert_eq!(walker.expect(&mut children, "expr", "INT").unwrap().text(), "3");
    assert!(walker.expect_end(&children, "expr").is_err());
    assert_eq!(walker.wildcard(&mut children, "expr").unwrap().text(), "4");
    assert!(walker.expect_end(&children, "expr").is_ok());
    assert!(walker.wildcard(&mut children, "expr").is_err());
  }

  #[test]
  fn test_errors_are_reported_once() {
    let reported = Rc::new(RefCell::new(vec![]));
    let mut walker = Walker::with_handler(SharedHandler(reported.clone()));
    let tree: Tree = "(STAR)".parse().unwrap();
    let mut root = Cursor::root(&tree);
    let err = walker.expect(&mut root, "expr", "PLUS").unwrap_err();
    assert_eq!(err, MatchError::StructuralMismatch {
      rule: "expr",
      expected: vec!["PLUS"],
      found: Some(String::from("STAR")),
      position: crate::Position::new(None, 0)
    });
    assert_eq!(reported.borrow().len(), 1);
  }

  #[test]
  fn test_depth_limit() {
    let mut walker = Walker::with_handler(CollectHandler::default()).with_depth_limit(2);
    assert!(walker.enter("a").is_ok());
    assert!(walker.enter("a").is_ok());
    assert_eq!(walker.enter("a"), Err(MatchError::DepthLimit { rule: "a", limit: 2 }));
    walker.exit();
    assert_eq!(walker.depth(), 1);
    assert!(walker.enter("a").is_ok());
  }
}
