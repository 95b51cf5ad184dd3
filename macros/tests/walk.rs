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

use arbor_macros::tree_grammar;
use arbor_runtime::*;
use pretty_assertions::assert_eq;

tree_grammar!(r#"
  tree grammar calc;
  #![state(Vec<String>)]
  tokens { PLUS, STAR, INT }

  pub expr returns [value: i64] :
      #(PLUS { state.push(String::from("PLUS")); } a=expr b=expr) { value = a + b; }
    | #(STAR { state.push(String::from("STAR")); } a=expr b=expr) { value = a * b; }
    | i=INT { state.push(format!("INT {}", i.text())); value = i.text().parse().unwrap_or(0); }
    ;
"#);

fn tree(text: &str) -> Tree {
  text.parse().unwrap()
}

#[test]
fn test_actions_fire_in_declared_order() {
  let mut walker = Walker::new();
  let mut trace = vec![];
  let value = calc::walk_expr(&mut walker, &mut trace, &tree("(PLUS (INT 3) (STAR (INT 4) (INT 5)))"));
  assert_eq!(value, Ok(23));
  assert_eq!(trace, vec!["PLUS", "INT 3", "STAR", "INT 4", "INT 5"]);
  assert_eq!(walker.depth(), 0);
}

#[test]
fn test_extra_child_is_a_mismatch() {
  let mut trace = vec![];
  let err = calc::walk_expr(&mut Walker::new(), &mut trace, &tree("(PLUS (INT 1) (INT 2) (INT 3))")).unwrap_err();
  assert_eq!(err, MatchError::StructuralMismatch {
    rule: "expr",
    expected: vec![END_OF_CHILDREN],
    found: Some(String::from("INT")),
    position: Position::new(Some(String::from("PLUS")), 2)
  });
}

#[test]
fn test_missing_child_is_a_mismatch() {
  let mut trace = vec![];
  let err = calc::walk_expr(&mut Walker::new(), &mut trace, &tree("(STAR (INT 1))")).unwrap_err();
  assert!(err.is_structural_mismatch(), "{}", err);
  assert_eq!(err.rule(), Some("expr"));
  if let MatchError::StructuralMismatch { expected, found, .. } = err {
    assert_eq!(expected, vec!["INT", "PLUS", "STAR"]);
    assert_eq!(found, None);
  }
}

#[test]
fn test_unknown_label_is_a_mismatch() {
  let mut trace = vec![];
  let err = calc::walk_expr(&mut Walker::new(), &mut trace, &tree("(MINUS (INT 1) (INT 2))")).unwrap_err();
  assert!(err.is_structural_mismatch());
  assert!(trace.is_empty());
}

#[test]
fn test_depth_limit() {
  let mut trace = vec![];
  let deep = tree("(PLUS (INT 1) (PLUS (INT 2) (PLUS (INT 3) (INT 4))))");
  let mut walker = Walker::new().with_depth_limit(3);
  assert_eq!(calc::walk_expr(&mut walker, &mut trace, &deep),
    Err(MatchError::DepthLimit { rule: "expr", limit: 3 }));
  let mut walker = Walker::new().with_depth_limit(4);
  assert_eq!(calc::walk_expr(&mut walker, &mut trace, &deep), Ok(10));
}

#[test]
fn test_errors_reach_the_handler() {
  use std::cell::RefCell;
  use std::rc::Rc;

  struct Shared(Rc<RefCell<Vec<MatchError>>>);

  impl ErrorHandler for Shared
  {
    fn report(&mut self, error: &MatchError) {
      self.0.borrow_mut().push(error.clone());
    }
  }

  let reported = Rc::new(RefCell::new(vec![]));
  let mut walker = Walker::with_handler(Shared(reported.clone()));
  let mut trace = vec![];
  let err = calc::walk_expr(&mut walker, &mut trace, &tree("(MINUS)"));
  assert!(err.is_err());
  assert_eq!(reported.borrow().len(), 1);
}

#[test]
fn test_walking_a_subtree_from_the_host() {
  let root = tree("(STAR (INT 6) (INT 7))");
  let mut cursor = Cursor::children(&root);
  let frame = Frame::root(calc::Scope::Root);
  let mut trace = vec![];
  let mut walker = Walker::new();
  assert_eq!(calc::expr(&mut walker, &mut trace, &mut cursor, &frame), Ok(6));
  assert!(!cursor.is_at_end());
}
