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

const AMBIGUOUS: &str = r#"
  tree grammar ambiguous;
  #![state(Vec<&'static str>)]
  tokens { A }
  pub s : A { state.push("first"); } | A { state.push("second"); } ;
"#;

tree_grammar!(r#"
  tree grammar ambiguous;
  #![state(Vec<&'static str>)]
  tokens { A }
  pub s : A { state.push("first"); } | A { state.push("second"); } ;
"#);

tree_grammar!(r#"
  tree grammar calls;
  #![state(Vec<String>)]
  tokens { CALL, ID, ARGS }

  pub call returns [arity: usize] :
    #(CALL f=ID { state.push(f.text().to_string()); }
      #(ARGS ( arg { arity += 1; } )*)
      ( x=. { state.push(format!("extra {}", x.label())); } )?) ;

  arg : a=. { state.push(format!("arg {}", a.label())); } ;
"#);

tree_grammar!(r#"
  tree grammar lists;
  tokens { LIST, INT }

  pub list (scale: i64) returns [total: i64] :
    #(LIST ( v=item[scale] { total += v; } )+ ) ;

  item (scale: i64) returns [v: i64] :
    i=INT { v = scale * i.text().parse::<i64>().unwrap_or(0); } ;
"#);

tree_grammar!(r#"
  tree grammar bounded;
  tokens { LIST, INT }

  pub list [count: usize = 0] : #(LIST ( INT { @count += 1; } )*) {@count <= 2}? ;
"#);

fn tree(text: &str) -> Tree {
  text.parse().unwrap()
}

#[test]
fn test_first_alternative_wins_an_ambiguity() {
  let mut trace = vec![];
  assert_eq!(ambiguous::walk_s(&mut Walker::new(), &mut trace, &tree("A")), Ok(()));
  assert_eq!(trace, vec!["first"]);

  let compilation = arbor::compile(AMBIGUOUS);
  assert!(compilation.is_success());
  let warnings: Vec<_> = compilation.warnings().map(|d| d.kind).collect();
  assert_eq!(warnings, vec![arbor::DiagnosticKind::Ambiguity]);
}

#[test]
fn test_wildcards_and_optional_children() {
  let mut trace = vec![];
  let arity = calls::walk_call(&mut Walker::new(), &mut trace,
    &tree("(CALL (ID f) (ARGS (INT 1) (CALL (ID g) (ARGS))) NAMED)"));
  assert_eq!(arity, Ok(2));
  assert_eq!(trace, vec!["f", "arg INT", "arg CALL", "extra NAMED"]);

  let mut trace = vec![];
  let arity = calls::walk_call(&mut Walker::new(), &mut trace, &tree("(CALL (ID h) (ARGS))"));
  assert_eq!(arity, Ok(0));
  assert_eq!(trace, vec!["h"]);
}

#[test]
fn test_optional_child_is_at_most_one() {
  let mut trace = vec![];
  let err = calls::walk_call(&mut Walker::new(), &mut trace, &tree("(CALL (ID f) (ARGS) X Y)")).unwrap_err();
  assert_eq!(err, MatchError::StructuralMismatch {
    rule: "call",
    expected: vec![END_OF_CHILDREN],
    found: Some(String::from("Y")),
    position: Position::new(Some(String::from("CALL")), 3)
  });
}

#[test]
fn test_one_or_more_with_parameters() {
  let result = lists::walk_list(&mut Walker::new(), &mut (), &tree("(LIST (INT 1) (INT 2) (INT 3))"), 3);
  assert_eq!(result, Ok(18));

  let err = lists::walk_list(&mut Walker::new(), &mut (), &tree("(LIST)"), 3).unwrap_err();
  assert!(err.is_structural_mismatch(), "{}", err);
  if let MatchError::StructuralMismatch { rule, expected, found, .. } = err {
    assert_eq!(rule, "list");
    assert_eq!(expected, vec!["INT"]);
    assert_eq!(found, None);
  }
}

#[test]
fn test_validating_predicate() {
  assert_eq!(bounded::walk_list(&mut Walker::new(), &mut (), &tree("(LIST (INT 1) (INT 2))")), Ok(()));
  let err = bounded::walk_list(&mut Walker::new(), &mut (), &tree("(LIST (INT 1) (INT 2) (INT 3))"));
  assert_eq!(err, Err(MatchError::FailedPredicate {
    rule: "list",
    predicate: "@count <= 2",
    position: Position::new(None, 1)
  }));
}

#[test]
fn test_generation_is_deterministic() {
  let first = arbor::compile(AMBIGUOUS);
  let second = arbor::compile(AMBIGUOUS);
  assert!(first.code.is_some());
  assert_eq!(first.code, second.code);
}
