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

//! Checks the Rust fragments that the generated code embeds in a syntactic position: types, initializers, parameters and the prelude. Names of rules, attributes, parameters and labels become Rust identifiers so they cannot be keywords nor clash with the names of the generated code.
//!
//! Actions, predicates and arguments are only checked for stray `@` here, and for lexing when the code is generated.

use crate::ast::*;
use crate::diagnostic::*;
use crate::middle::scope::rule_fragments;
use crate::middle::scope::reference::{scan_references, stray_markers};
use partial::Partial::*;
use syn::parse::Parser;
use syn::punctuated::Punctuated;

/// Names bound by the generated procedures.
pub const RESERVED_NAMES: [&str; 7] = ["walker", "state", "cursor", "frame", "la", "result", "root"];

pub fn validate_fragments(cx: &Diagnostics, mut grammar: Grammar) -> Partial<Grammar> {
  let mut validator = FragmentValidator { cx, is_valid: true };
  validator.identifier(&grammar.name, "a grammar");
  validator.state_type(&grammar);
  for prelude in &grammar.prelude {
    validator.prelude(prelude);
  }
  for rule in &mut grammar.rules {
    validator.identifier(&rule.name, "a rule");
    for attribute in &rule.attributes {
      validator.attribute(attribute, "attribute");
    }
    if let Some(returns) = &rule.returns {
      validator.attribute(returns, "return value");
    }
    if let Some(params) = &rule.params {
      rule.param_names = validator.params(&rule.name, params);
    }
  }
  for rule in &grammar.rules {
    for fragment in rule_fragments(&grammar, rule) {
      validator.markers(&fragment);
    }
  }
  for info in &grammar.exprs_info {
    if let Some(label) = &info.label {
      validator.identifier(label, "a label");
    }
  }
  if validator.is_valid {
    Value(grammar)
  }
  else {
    Fake(grammar)
  }
}

struct FragmentValidator<'a>
{
  cx: &'a Diagnostics,
  is_valid: bool
}

impl<'a> FragmentValidator<'a>
{
  fn err(&mut self, span: Span, msg: String) {
    self.cx.span_err(DiagnosticKind::InvalidCodeFragment, span, msg);
    self.is_valid = false;
  }

  fn identifier(&mut self, ident: &Ident, what: &str) {
    self.name(ident.as_str(), ident.span(), what);
  }

  fn name(&mut self, name: &str, span: Span, what: &str) {
    if syn::parse_str::<syn::Ident>(name).is_err() {
      self.err(span, format!("`{}` is a Rust keyword and cannot be used as {} name", name, what));
    }
    else if RESERVED_NAMES.contains(&name) || name.starts_with("__") {
      self.err(span, format!("`{}` is reserved by the generated code and cannot be used as {} name", name, what));
    }
  }

  fn markers(&mut self, fragment: &CodeFragment) {
    for span in stray_markers(fragment) {
      self.err(span, format!("`@` must be directly followed by an attribute name in `{}`", fragment));
    }
  }

  fn state_type(&mut self, grammar: &Grammar) {
    if let Some(ty) = &grammar.options.state_type {
      if let Err(err) = syn::parse_str::<syn::Type>(ty) {
        self.err(grammar.name.span(), format!("invalid state type `{}`: {}", ty, err));
      }
    }
  }

  fn prelude(&mut self, prelude: &CodeFragment) {
    if let Err(err) = syn::parse_file(&prelude.text) {
      self.err(prelude.span, format!("invalid prelude: {}", err));
    }
  }

  fn attribute(&mut self, attribute: &Attribute, what: &str) {
    self.identifier(&attribute.name, if what == "attribute" { "an attribute" } else { "a return value" });
    if let Err(err) = syn::parse_str::<syn::Type>(&attribute.ty.text) {
      self.err(attribute.ty.span, format!("invalid type of {} `{}`: {}", what, attribute.name, err));
    }
    if let Some(init) = &attribute.init {
      if let Some(reference) = scan_references(init).first() {
        self.err(reference.span, format!(
          "the initializer of {} `{}` cannot reference the attribute `{}`",
          what, attribute.name, reference.name));
      }
      else if let Err(err) = syn::parse_str::<syn::Expr>(&init.text) {
        self.err(init.span, format!("invalid initializer of {} `{}`: {}", what, attribute.name, err));
      }
    }
  }

  /// Returns the names bound by the parameters of `rule`.
  fn params(&mut self, rule: &Ident, params: &CodeFragment) -> Vec<String> {
    let parser = Punctuated::<syn::FnArg, syn::Token![,]>::parse_terminated;
    let args = match parser.parse_str(&params.text) {
      Ok(args) => args,
      Err(err) => {
        self.err(params.span, format!("invalid parameters of rule `{}`: {}", rule, err));
        return vec![];
      }
    };
    let mut names = vec![];
    for arg in args {
      match arg {
        syn::FnArg::Typed(syn::PatType { pat, .. }) => {
          match *pat {
            syn::Pat::Ident(syn::PatIdent { ident, by_ref: None, subpat: None, .. }) => {
              let name = ident.to_string();
              self.name(&name, params.span, "a parameter");
              names.push(name);
            }
            _ => self.err(params.span, format!(
              "parameters of rule `{}` must be simple names such as `depth: usize`", rule))
          }
        }
        syn::FnArg::Receiver(_) => {
          self.err(params.span, format!("rule `{}` cannot take `self` as parameter", rule));
        }
      }
    }
    names
  }
}

#[cfg(test)]
mod test {
  use crate::diagnostic::*;
  use crate::middle::test::{analysed, analyse_errors};

  #[test]
  fn test_param_names() {
    let grammar = analysed(r#"
      tokens { A }
      pub a : b[1, "x"] ;
      b (mut depth: usize, name: &str) : A ;
    "#);
    assert_eq!(grammar.rules[1].param_names, vec![String::from("depth"), String::from("name")]);
  }

  #[test]
  fn test_invalid_fragments() {
    let errors = analyse_errors(r#"
      tokens { A }
      prelude { struct; }
      pub a [x: 3, y: i32 = @x.len()] : b[0] ;
      b ((x, y): (i32, i32)) : A ;
    "#);
    let kinds: Vec<DiagnosticKind> = errors.iter().map(|e| e.kind).collect();
    assert!(kinds.iter().all(|&k| k == DiagnosticKind::InvalidCodeFragment), "{:?}", errors);
    assert_eq!(errors.len(), 4);
  }

  #[test]
  fn test_stray_attribute_marker() {
    let errors = analyse_errors(r#"
      tokens { A }
      pub a [x: i32] : A { @ x += 1; let _ = match @x { n @ 1..=5 => n, _ => 0 }; } ;
    "#);
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert_eq!(errors[0].kind, DiagnosticKind::InvalidCodeFragment);
    assert!(errors[0].message.contains("directly followed"));
  }

  #[test]
  fn test_reserved_names() {
    let errors = analyse_errors(r#"
      tokens { A }
      match : cursor=A ;
    "#);
    assert_eq!(errors.len(), 2);
    assert!(errors[0].message.contains("keyword"));
    assert!(errors[1].message.contains("reserved"));
  }
}
