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

use crate::ast::*;
use crate::diagnostic::*;
use crate::middle::scope::call_graph::CallGraph;

/// Warns about the rules that no entry rule can invoke. They are still compiled.
pub fn unused_rule(cx: &Diagnostics, grammar: Grammar) -> Grammar {
  let entries = grammar.entry_rules();
  let used = CallGraph::build(&grammar).reachable_from(&entries);
  for (idx, rule) in grammar.rules.iter().enumerate() {
    if !used.contains(&idx) {
      cx.span_warn(DiagnosticKind::UnusedRule, rule.span(),
        format!("rule `{}` is never used: no entry rule can invoke it", rule.name));
    }
  }
  grammar
}

#[cfg(test)]
mod test {
  use crate::diagnostic::*;
  use crate::middle::test::analysed_with_diagnostics;

  #[test]
  fn test_unused_rule() {
    let (_, diagnostics) = analysed_with_diagnostics(r#"
      tokens { A, B }
      pub a : b ;
      b : A ;
      c : B ;
      pub d : B ;
    "#);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnusedRule);
    assert_eq!(diagnostics[0].message, "rule `c` is never used: no entry rule can invoke it");
  }
}
