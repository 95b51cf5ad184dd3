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

//! Invocation frames.
//!
//! Every walk owns a chain of frames starting at `Frame::root`. A matching procedure declaring attributes pushes a frame linked to the frame of its caller and the frame lives on the stack of the procedure: it is released when the procedure returns, whatever the exit path. Attribute lookup walks the chain outward and stops at the nearest frame holding the attribute.

use crate::match_error::MatchError;

pub struct Frame<'a, S>
{
  scope: S,
  parent: Option<&'a Frame<'a, S>>,
  depth: usize
}

impl<'a, S> Frame<'a, S>
{
  /// The bottom of a fresh chain, one per walk.
  pub fn root(scope: S) -> Frame<'a, S> {
    Frame {
      scope,
      parent: None,
      depth: 0
    }
  }

  /// A new frame whose caller is `self`.
  pub fn push<'b>(&'b self, scope: S) -> Frame<'b, S> {
    Frame {
      scope,
      parent: Some(self),
      depth: self.depth + 1
    }
  }

  pub fn scope(&self) -> &S {
    &self.scope
  }

  pub fn parent(&self) -> Option<&'a Frame<'a, S>> {
    self.parent
  }

  /// Number of frames between `self` and the root of its chain.
  pub fn depth(&self) -> usize {
    self.depth
  }

  /// Iterates from `self` to the root.
  pub fn ancestors(&self) -> Ancestors<'_, S> {
    Ancestors { next: Some(self) }
  }

  /// Finds the nearest frame for which `project` yields the attribute `name`.
  pub fn attribute<'s, T: ?Sized>(&'s self, name: &'static str,
    project: impl Fn(&'s S) -> Option<&'s T>) -> Result<&'s T, MatchError>
  {
    self.ancestors()
      .find_map(|frame| project(&frame.scope))
      .ok_or(MatchError::UnboundAttribute { name })
  }
}

pub struct Ancestors<'s, S>
{
  next: Option<&'s Frame<'s, S>>
}

impl<'s, S> Iterator for Ancestors<'s, S>
{
  type Item = &'s Frame<'s, S>;

  fn next(&mut self) -> Option<Self::Item> {
    let current = self.next?;
    self.next = current.parent;
    Some(current)
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use std::cell::RefCell;

  enum Scope
  {
    Root,
    Block(RefCell<u32>),
    Function(RefCell<String>)
  }

  fn depth_of<'s>(frame: &'s Frame<'_, Scope>) -> Result<&'s RefCell<u32>, MatchError> {
    frame.attribute("depth", |scope| match scope {
      Scope::Block(depth) => Some(depth),
      _ => None
    })
  }

  #[test]
  fn test_nearest_frame_wins() {
    let root = Frame::root(Scope::Root);
    let outer = root.push(Scope::Block(RefCell::new(1)));
    let function = outer.push(Scope::Function(RefCell::new(String::from("f"))));
    let inner = function.push(Scope::Block(RefCell::new(2)));
    assert_eq!(*depth_of(&inner).unwrap().borrow(), 2);
    assert_eq!(*depth_of(&function).unwrap().borrow(), 1);
    assert_eq!(inner.depth(), 3);
    assert_eq!(inner.ancestors().count(), 4);
  }

  #[test]
  fn test_frames_are_independent() {
    let root = Frame::root(Scope::Root);
    let outer = root.push(Scope::Block(RefCell::new(0)));
    {
      let inner = outer.push(Scope::Block(RefCell::new(0)));
      *depth_of(&inner).unwrap().borrow_mut() += 10;
      assert_eq!(*depth_of(&inner).unwrap().borrow(), 10);
    }
    assert_eq!(*depth_of(&outer).unwrap().borrow(), 0);
  }

  #[test]
  fn test_unbound_attribute() {
    let root = Frame::root(Scope::Root);
    let function = root.push(Scope::Function(RefCell::new(String::new())));
    assert_eq!(depth_of(&function).err(), Some(MatchError::UnboundAttribute { name: "depth" }));
    assert!(root.parent().is_none());
  }
}
