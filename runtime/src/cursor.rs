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

use crate::tree::TreeNode;
use crate::match_error::Position;

/// A cursor over a list of sibling nodes. Matching a node match descends with a fresh cursor over the children of the matched node, the parent cursor only moves past it.
pub struct Cursor<'t, N>
{
  siblings: &'t [N],
  index: usize,
  parent: Option<&'t N>
}

impl<'t, N> Cursor<'t, N> where
 N: TreeNode
{
  pub fn new(siblings: &'t [N]) -> Cursor<'t, N> {
    Cursor {
      siblings,
      index: 0,
      parent: None
    }
  }

  pub fn root(root: &'t N) -> Cursor<'t, N> {
    Cursor::new(std::slice::from_ref(root))
  }

  pub fn children(node: &'t N) -> Cursor<'t, N> {
    Cursor {
      siblings: node.children(),
      index: 0,
      parent: Some(node)
    }
  }

  #[inline]
  pub fn peek(&self) -> Option<&'t N> {
    self.siblings.get(self.index)
  }

  /// Label of the current node, `None` at the end of the sibling list.
  #[inline]
  pub fn peek_label(&self) -> Option<&'t str> {
    self.peek().map(|node| node.label())
  }

  #[inline]
  pub fn bump(&mut self) -> Option<&'t N> {
    let node = self.peek();
    if node.is_some() {
      self.index += 1;
    }
    node
  }

  pub fn is_at_end(&self) -> bool {
    self.index >= self.siblings.len()
  }

  pub fn remaining(&self) -> &'t [N] {
    &self.siblings[self.index.min(self.siblings.len())..]
  }

  pub fn parent(&self) -> Option<&'t N> {
    self.parent
  }

  pub fn position(&self) -> Position {
    Position::new(self.parent.map(|node| String::from(node.label())), self.index)
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::tree::Tree;

  #[test]
  fn test_cursor_moves_over_siblings() {
    let tree: Tree = "(PLUS (INT 3) (INT 4))".parse().unwrap();
    let mut root = Cursor::root(&tree);
    assert_eq!(root.peek_label(), Some("PLUS"));
    let plus = root.bump().unwrap();
    assert!(root.is_at_end());
    assert_eq!(root.bump(), None);

    let mut children = Cursor::children(plus);
    assert_eq!(children.position(), Position::new(Some(String::from("PLUS")), 0));
    assert_eq!(children.bump().map(|n| n.text()), Some("3"));
    assert_eq!(children.remaining().len(), 1);
    assert_eq!(children.position().index, 1);
    children.bump();
    assert_eq!(children.peek_label(), None);
    assert!(children.is_at_end());
  }
}
