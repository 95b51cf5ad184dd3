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

//! Code fragments of the grammar inside the generated code.
//!
//! A fragment referencing attributes is preceded by one guard per attribute, borrowed from the nearest frame declaring it. Guards are locals of the block wrapping the fragment and are released as soon as it ends.

use crate::ast::*;
use crate::diagnostic::*;
use crate::back::context::Context;
use crate::back::name_factory::*;
use crate::middle::scope::reference::*;
use proc_macro2::TokenStream;
use quote::{quote, format_ident};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access
{
  /// Actions can modify attributes.
  Exclusive,
  /// Guards, validating predicates and arguments.
  Shared
}

impl<'a> Context<'a>
{
  /// Tokens of `text`, the rewritten text of `fragment`.
  pub fn lex(&self, fragment: &CodeFragment, text: &str) -> TokenStream {
    match TokenStream::from_str(text) {
      Ok(tokens) => tokens,
      Err(err) => {
        self.cx().span_err(DiagnosticKind::InvalidCodeFragment, fragment.span,
          format!("code fragment `{}` is not made of Rust tokens: {:?}", fragment, err));
        TokenStream::new()
      }
    }
  }

  /// Returns the guards of the attributes referenced in `fragment` and its text with every `@name` rewritten to its guard binding.
  pub fn bind_attributes(&self, fragment: &CodeFragment, access: Access) -> (TokenStream, String) {
    let mut names: Vec<String> = vec![];
    for reference in scan_references(fragment) {
      if !names.contains(&reference.name) {
        names.push(reference.name);
      }
    }
    let guards: TokenStream = names.iter()
      .map(|name| self.attribute_guard(fragment, name, access))
      .collect();
    let text = rewrite_references(fragment, attribute_binding_text);
    (guards, text)
  }

  /// A block evaluating the predicate `fragment` to a `bool`.
  pub fn predicate_condition(&self, fragment: &CodeFragment) -> TokenStream {
    let (guards, text) = self.bind_attributes(fragment, Access::Shared);
    let predicate = self.lex(fragment, &text);
    quote!({
      #guards
      let __pass: bool = { #predicate };
      __pass
    })
  }

  fn attribute_guard(&self, fragment: &CodeFragment, name: &str, access: Access) -> TokenStream {
    let lookup = self.attribute_lookup(fragment, name);
    let guard = guard_name(name);
    let binding = attribute_binding_name(name);
    match access {
      Access::Exclusive => quote! {
        let mut #guard = #lookup.borrow_mut();
        let #binding = &mut *#guard;
      },
      Access::Shared => quote! {
        let #guard = #lookup.borrow();
        let #binding = &*#guard;
      }
    }
  }

  /// Finds the `RefCell` of the attribute `name` in the nearest frame declaring it.
  fn attribute_lookup(&self, fragment: &CodeFragment, name: &str) -> TokenStream {
    let field = format_ident!("{}", name);
    let declaring_rules = self.grammar().scope_plan.resolve(self.rule_idx(), name)
      .map(|resolution| resolution.declaring_rules.clone())
      .unwrap_or_default();
    let variants: Vec<&syn::Ident> = declaring_rules.iter()
      .filter_map(|&rule| self.scope_names().variant(rule))
      .collect();
    if variants.is_empty() {
      self.cx().span_err(DiagnosticKind::UnreachableAttribute, fragment.span,
        format!("attribute `{}` referenced in rule `{}` has no declaring rule", name, self.rule_name()));
    }
    quote! {
      frame.attribute(#name, |scope| match scope {
        #(Scope::#variants(s) => Some(&s.#field),)*
        _ => None
      })?
    }
  }
}
