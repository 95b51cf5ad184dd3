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
use crate::front::ast::{FGrammar, FOption};

/// Builds the IR from the grammar as written, the grammar options being merged into `options`.
pub fn decorate_with_options(cx: &Diagnostics, fgrammar: FGrammar, options: Options) -> Grammar {
  let mut grammar = Grammar {
    name: fgrammar.name,
    options,
    tokens: fgrammar.tokens,
    prelude: fgrammar.prelude,
    rules: fgrammar.rules,
    exprs: fgrammar.exprs,
    exprs_info: fgrammar.exprs_info,
    decisions: vec![],
    scope_plan: ScopePlan::default()
  };
  for option in fgrammar.options {
    merge_grammar_option(cx, &mut grammar.options, option);
  }
  grammar
}

fn warn_ignore_option(cx: &Diagnostics, span: Span, msg: String) {
  cx.span_warn(DiagnosticKind::UnknownOption, span, msg);
}

fn merge_grammar_option(cx: &Diagnostics, options: &mut Options, option: FOption) {
  let name = option.name.as_str();
  let span = option.span();
  if name == "state" {
    match &option.args {
      Some(ty) if !ty.trimmed().is_empty() => {
        options.state_type = Some(normalize_type_text(&ty.text));
      }
      _ => warn_ignore_option(cx, span,
        format!("option `state` expects the type of the walk state, e.g. `#![state(Vec<String>)]`: it will be ignored."))
    }
    return;
  }
  let level = match name {
    "debug_code" | "debug_decisions" => PrintLevel::Debug,
    "show_code" | "show_decisions" => PrintLevel::Show,
    _ => {
      warn_ignore_option(cx, span, format!("unknown option `{}`: it will be ignored.", name));
      return;
    }
  };
  if let Some(args) = &option.args {
    warn_ignore_option(cx, args.span, format!("option `{}` takes no argument: they will be ignored.", name));
  }
  if name.ends_with("_code") {
    options.print_code = options.print_code.merge(level);
  }
  else {
    options.print_decisions = options.print_decisions.merge(level);
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::middle::test::analysed_with_diagnostics;

  #[test]
  fn test_grammar_options() {
    let (grammar, diagnostics) = analysed_with_diagnostics(r#"
      tree grammar calc;
      #![show_code]
      #![debug_decisions]
      #![state(Vec < i64 >)]
      #![optimize]
      tokens { A }
      a : A ;
    "#);
    assert_eq!(grammar.options.print_code, PrintLevel::Show);
    assert_eq!(grammar.options.print_decisions, PrintLevel::Debug);
    assert_eq!(grammar.options.state_type, Some(String::from("Vec < i64 >")));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnknownOption);
    assert_eq!(diagnostics[0].message, "unknown option `optimize`: it will be ignored.");
  }

  #[test]
  fn test_api_options_are_merged() {
    let cx = Diagnostics::new();
    let mut fgrammar = FGrammar::new();
    fgrammar.options.push(FOption { name: Ident::new("show_code", Span::default()), args: None });
    let options = Options::new()
      .with_print_code(PrintLevel::Debug)
      .with_state_type("u32");
    let grammar = decorate_with_options(&cx, fgrammar, options);
    assert_eq!(grammar.options.print_code, PrintLevel::Debug);
    assert_eq!(grammar.options.state_type, Some(String::from("u32")));
    assert_eq!(cx.len(), 0);
  }
}
