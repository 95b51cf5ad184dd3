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

//! Names of the items and locals of the generated module.
//!
//! Locals introduced by the generator start with `__` so they never clash with labels, the analysis rejects user names with this prefix.

use crate::ast::*;
use quote::format_ident;
use std::collections::HashSet;

pub struct NameFactory
{
  uid: usize
}

impl NameFactory
{
  pub fn new() -> NameFactory {
    NameFactory {
      uid: 0
    }
  }

  pub fn next_cursor_name(&mut self) -> syn::Ident {
    format_ident!("__cursor_{}", self.next_uid())
  }

  pub fn next_node_name(&mut self) -> syn::Ident {
    format_ident!("__node_{}", self.next_uid())
  }

  pub fn next_counter_name(&mut self) -> syn::Ident {
    format_ident!("__matched_{}", self.next_uid())
  }

  pub fn next_arg_name(&mut self) -> syn::Ident {
    format_ident!("__arg_{}", self.next_uid())
  }

  fn next_uid(&mut self) -> usize {
    self.uid += 1;
    self.uid
  }
}

pub fn rust_ident(ident: &Ident) -> syn::Ident {
  format_ident!("{}", ident.as_str())
}

pub fn rule_fn_name(rule: &Rule) -> syn::Ident {
  rust_ident(&rule.name)
}

pub fn alternatives_fn_name(rule: &Rule) -> syn::Ident {
  format_ident!("{}_alternatives", rule.name.as_str())
}

pub fn walk_fn_name(rule: &Rule) -> syn::Ident {
  format_ident!("walk_{}", rule.name.as_str())
}

/// `RefMut` or `Ref` holding the attribute `name` while a fragment runs.
pub fn guard_name(name: &str) -> syn::Ident {
  format_ident!("__guard_{}", name)
}

/// The reference `@name` is rewritten to.
pub fn attribute_binding_name(name: &str) -> syn::Ident {
  format_ident!("__attr_{}", name)
}

pub fn attribute_binding_text(name: &str) -> String {
  format!("(*{})", attribute_binding_name(name))
}

/// Variants of the `Scope` enum: one per rule declaring attributes, named after the rule in camel case.
pub struct ScopeNames
{
  variants: Vec<Option<syn::Ident>>
}

impl ScopeNames
{
  pub fn new(grammar: &Grammar) -> ScopeNames {
    let mut taken: HashSet<String> = HashSet::new();
    taken.insert(String::from("Root"));
    let variants = grammar.rules.iter().enumerate()
      .map(|(idx, rule)| {
        if rule.attributes.is_empty() {
          return None;
        }
        let mut name = camel_case(rule.name.as_str());
        if !taken.insert(name.clone()) {
          name = format!("{}{}", name, idx);
          taken.insert(name.clone());
        }
        Some(format_ident!("{}", name))
      })
      .collect();
    ScopeNames { variants }
  }

  pub fn variant(&self, rule: usize) -> Option<&syn::Ident> {
    self.variants[rule].as_ref()
  }

  pub fn struct_name(&self, rule: usize) -> Option<syn::Ident> {
    self.variant(rule).map(|variant| format_ident!("{}Scope", variant))
  }
}

/// `binary_expr` becomes `BinaryExpr`.
pub fn camel_case(name: &str) -> String {
  let mut camel = String::with_capacity(name.len());
  let mut upper = true;
  for c in name.chars() {
    if c == '_' {
      upper = true;
    }
    else if upper {
      camel.extend(c.to_uppercase());
      upper = false;
    }
    else {
      camel.push(c);
    }
  }
  if camel.is_empty() {
    camel.push('R');
  }
  camel
}
