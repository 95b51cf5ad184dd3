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
  tree grammar nesting;
  #![state(Vec<u32>)]
  tokens { BLOCK, VAR }

  pub block [depth: u32 = 0] :
    #(BLOCK ( VAR { @depth += 1; state.push(@depth); } | block )* ) ;
"#);

tree_grammar!(r#"
  tree grammar loops;
  #![state(Vec<String>)]
  tokens { FUN, LOOP, BREAK }

  pub fun [in_loop: bool = false] : #(FUN stmt*) ;
  looping [in_loop: bool = true] : #(LOOP stmt*) ;

  stmt :
      {@in_loop}? BREAK { state.push(String::from("break")); }
    | BREAK { state.push(String::from("stray break")); }
    | looping
    ;
"#);

tree_grammar!(r#"
  tree grammar strict;
  tokens { FUN, LOOP, BREAK }

  pub fun [in_loop: bool = false] : #(FUN stmt*) ;
  looping [in_loop: bool = true] : #(LOOP stmt*) ;

  stmt : {@in_loop}? BREAK | looping ;
"#);

tree_grammar!(r#"
  tree grammar offsets;
  tokens { LIST, INT }

  pub list [base: i64 = 10] returns [sum: i64] :
    #(LIST ( v=item[@base] { sum += v; } )+ ) ;

  item (base: i64) returns [v: i64] :
    i=INT { v = base + i.text().parse::<i64>().unwrap_or(0); } ;
"#);

fn tree(text: &str) -> Tree {
  text.parse().unwrap()
}

#[test]
fn test_each_activation_owns_its_frame() {
  let mut seen = vec![];
  let result = nesting::walk_block(&mut Walker::new(), &mut seen, &tree("(BLOCK VAR (BLOCK VAR VAR) VAR)"));
  assert_eq!(result, Ok(()));
  assert_eq!(seen, vec![1, 1, 2, 2]);
}

#[test]
fn test_guard_reads_the_nearest_frame() {
  let mut trace = vec![];
  let result = loops::walk_fun(&mut Walker::new(), &mut trace, &tree("(FUN BREAK (LOOP BREAK))"));
  assert_eq!(result, Ok(()));
  assert_eq!(trace, vec!["stray break", "break"]);
}

#[test]
fn test_guard_in_nested_loops() {
  let mut trace = vec![];
  let result = loops::walk_fun(&mut Walker::new(), &mut trace,
    &tree("(FUN (LOOP (LOOP BREAK) BREAK) BREAK)"));
  assert_eq!(result, Ok(()));
  assert_eq!(trace, vec!["break", "break", "stray break"]);
}

#[test]
fn test_failing_guards_are_no_viable_alternative() {
  let err = strict::walk_fun(&mut Walker::new(), &mut (), &tree("(FUN BREAK)")).unwrap_err();
  assert!(err.is_no_viable_alternative(), "{}", err);
  assert_eq!(err.rule(), Some("stmt"));
  assert!(strict::walk_fun(&mut Walker::new(), &mut (), &tree("(FUN (LOOP BREAK BREAK))")).is_ok());
}

#[test]
fn test_arguments_read_attributes() {
  let result = offsets::walk_list(&mut Walker::new(), &mut (), &tree("(LIST (INT 1) (INT 2))"));
  assert_eq!(result, Ok(23));
}

#[test]
fn test_frame_lookup_from_the_host() {
  let frame = Frame::root(nesting::Scope::Root);
  let err = frame.attribute("depth", |scope| match scope {
    nesting::Scope::Block(s) => Some(&s.depth),
    _ => None
  });
  assert_eq!(err.err(), Some(MatchError::UnboundAttribute { name: "depth" }));
  let block = frame.push(nesting::Scope::Block(nesting::BlockScope { depth: std::cell::RefCell::new(7) }));
  let depth = block.attribute("depth", |scope| match scope {
    nesting::Scope::Block(s) => Some(&s.depth),
    _ => None
  });
  assert_eq!(depth.map(|cell| *cell.borrow()), Ok(7));
}

#[test]
fn test_entry_procedures_bind_their_own_attributes() {
  let root = tree("(FUN (LOOP BREAK) BREAK)");
  let mut cursor = Cursor::root(&root);
  let frame = Frame::root(loops::Scope::Root);
  let mut trace = vec![];
  assert_eq!(loops::fun(&mut Walker::new(), &mut trace, &mut cursor, &frame), Ok(()));
  assert_eq!(trace, vec!["break", "stray break"]);
  assert!(cursor.is_at_end());
}
