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

pub use crate::back::continuation::*;
use crate::ast::*;
use crate::diagnostic::*;
use crate::back::compiler::expr_compiler;
use crate::back::name_factory::*;
use proc_macro2::TokenStream;

/// Compilation state of one rule.
pub struct Context<'a>
{
  cx: &'a Diagnostics,
  grammar: &'a Grammar,
  scope_names: &'a ScopeNames,
  rule: usize,
  cursor: syn::Ident,
  name_factory: NameFactory
}

impl<'a> Context<'a>
{
  pub fn new(cx: &'a Diagnostics, grammar: &'a Grammar, scope_names: &'a ScopeNames, rule: usize) -> Self {
    Context {
      cx,
      grammar,
      scope_names,
      rule,
      cursor: quote::format_ident!("cursor"),
      name_factory: NameFactory::new()
    }
  }

  pub fn cx(&self) -> &'a Diagnostics {
    self.cx
  }

  pub fn grammar(&self) -> &'a Grammar {
    self.grammar
  }

  pub fn scope_names(&self) -> &'a ScopeNames {
    self.scope_names
  }

  pub fn rule_idx(&self) -> usize {
    self.rule
  }

  pub fn rule(&self) -> &'a Rule {
    &self.grammar.rules[self.rule]
  }

  /// Name of the rule as reported in match errors.
  pub fn rule_name(&self) -> &'a str {
    self.rule().name.as_str()
  }

  /// The cursor over the sibling list currently matched, always a `&mut Cursor`.
  pub fn cursor(&self) -> syn::Ident {
    self.cursor.clone()
  }

  /// Runs `f` with `cursor` as the current cursor.
  pub fn with_cursor<F, R>(&mut self, cursor: syn::Ident, f: F) -> R where
   F: FnOnce(&mut Context<'a>) -> R
  {
    let outer = std::mem::replace(&mut self.cursor, cursor);
    let result = f(self);
    self.cursor = outer;
    result
  }

  pub fn compile(&mut self, idx: usize, success: TokenStream) -> TokenStream {
    let compiler = expr_compiler(self.grammar, idx);
    compiler.compile_expr(self, Continuation::new(success))
  }

  pub fn compile_sequence(&mut self, elements: &[usize], continuation: Continuation) -> TokenStream {
    elements.iter()
      .rev()
      .fold(continuation, |continuation, &idx| continuation.compile_success(self, idx))
      .unwrap_success()
  }

  /// `let label = expr;` if the expression `idx` is labelled, `expr;` otherwise.
  pub fn bind(&self, idx: usize, expr: TokenStream) -> TokenStream {
    match self.grammar.expr_label(idx) {
      Some(label) => {
        let label = rust_ident(label);
        quote::quote!(let #label = #expr;)
      }
      None => quote::quote!(#expr;)
    }
  }

  pub fn next_cursor_name(&mut self) -> syn::Ident {
    self.name_factory.next_cursor_name()
  }

  pub fn next_node_name(&mut self) -> syn::Ident {
    self.name_factory.next_node_name()
  }

  pub fn next_counter_name(&mut self) -> syn::Ident {
    self.name_factory.next_counter_name()
  }

  pub fn next_arg_name(&mut self) -> syn::Ident {
    self.name_factory.next_arg_name()
  }
}
