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
use crate::back::code_printer::*;
use crate::back::context::Context;
use crate::back::compiler::rule::*;
use crate::back::name_factory::*;
use proc_macro2::TokenStream;
use quote::quote;

pub struct GrammarCompiler<'a>
{
  cx: &'a Diagnostics,
  grammar: &'a Grammar,
  scope_names: ScopeNames
}

impl<'a> GrammarCompiler<'a>
{
  pub fn compile(cx: &'a Diagnostics, grammar: &'a Grammar) -> Partial<String> {
    let errors = cx.error_count();
    let compiler = GrammarCompiler::new(cx, grammar);
    let module = compiler.compile_grammar_module();
    if cx.error_count() > errors {
      return Partial::Nothing;
    }
    print_code(grammar, &module);
    Partial::Value(module.to_string())
  }

  fn new(cx: &'a Diagnostics, grammar: &'a Grammar) -> GrammarCompiler<'a> {
    GrammarCompiler {
      cx,
      grammar,
      scope_names: ScopeNames::new(grammar)
    }
  }

  fn compile_grammar_module(&self) -> TokenStream {
    let grammar_name = rust_ident(&self.grammar.name);
    let prelude = self.compile_prelude();
    let state = self.compile_state_type();
    let scope = self.compile_scope();
    let rules = self.compile_rules();
    quote! {
      pub mod #grammar_name
      {
        #![allow(unused_mut, unused_variables, unused_imports, unused_braces, unused_parens,
          dead_code, unreachable_code, non_snake_case, redundant_semicolons, clippy::all)]
        use ::arbor_runtime::{Cursor, Frame, MatchError, TreeNode, Walker};
        use ::std::cell::RefCell;

        #(#prelude)*

        pub type State = #state;

        #scope

        #(#rules)*
      }
    }
  }

  fn compile_prelude(&self) -> Vec<TokenStream> {
    let context = self.context(0);
    self.grammar.prelude.iter()
      .map(|prelude| context.lex(prelude, &prelude.text))
      .collect()
  }

  fn compile_state_type(&self) -> TokenStream {
    match &self.grammar.options.state_type {
      Some(ty) => {
        let fragment = CodeFragment::new(ty.clone(), self.grammar.name.span());
        self.context(0).lex(&fragment, ty)
      }
      None => quote!(())
    }
  }

  /// The `Scope` enum stored in frames, one variant per rule declaring attributes, every attribute in a `RefCell` of its declared type.
  fn compile_scope(&self) -> TokenStream {
    let context = self.context(0);
    let mut variants = vec![];
    let mut structs = vec![];
    for (idx, rule) in self.grammar.rules.iter().enumerate() {
      if let (Some(variant), Some(name)) = (self.scope_names.variant(idx), self.scope_names.struct_name(idx)) {
        let fields = rule.attributes.iter().map(|attr| rust_ident(&attr.name));
        let types = rule.attributes.iter().map(|attr| context.lex(&attr.ty, &attr.ty.text));
        variants.push(quote!(#variant(#name)));
        structs.push(quote! {
          pub struct #name
          {
            #(pub #fields: RefCell<#types>),*
          }
        });
      }
    }
    quote! {
      pub enum Scope
      {
        Root,
        #(#variants),*
      }

      #(#structs)*
    }
  }

  fn compile_rules(&self) -> Vec<TokenStream> {
    let entries = self.grammar.entry_rules();
    (0..self.grammar.rules.len())
      .flat_map(|idx| RuleCompiler::compile(self.context(idx), entries.contains(&idx)))
      .collect()
  }

  fn context(&self, rule: usize) -> Context<'_> {
    Context::new(self.cx, self.grammar, &self.scope_names, rule)
  }
}
