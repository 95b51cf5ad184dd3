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

use crate::back::compiler::*;
use crate::back::fragment::Access;
use crate::back::name_factory::rust_ident;
use crate::diagnostic::DiagnosticKind;
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;

/// Invocation of a rule. Arguments referencing attributes are evaluated before the call so the attributes are not borrowed while the callee runs.
pub struct NonTerminalCompiler
{
  expr_idx: usize,
  rule: Ident,
  args: Option<CodeFragment>
}

impl NonTerminalCompiler
{
  pub fn new(expr_idx: usize, rule: Ident, args: Option<CodeFragment>) -> NonTerminalCompiler {
    NonTerminalCompiler {
      expr_idx, rule, args
    }
  }

  /// Statements evaluating the arguments, and the arguments passed to the rule.
  fn compile_args(&self, context: &mut Context) -> (TokenStream, Vec<TokenStream>) {
    let args = match &self.args {
      Some(args) => args,
      None => return (TokenStream::new(), vec![])
    };
    let (guards, text) = context.bind_attributes(args, Access::Shared);
    let parser = Punctuated::<syn::Expr, syn::Token![,]>::parse_terminated;
    let exprs: Vec<syn::Expr> = match parser.parse_str(&text) {
      Ok(exprs) => exprs.into_iter().collect(),
      Err(err) => {
        context.cx().span_err(DiagnosticKind::InvalidCodeFragment, args.span,
          format!("invalid arguments of rule `{}`: {}", self.rule, err));
        return (TokenStream::new(), vec![]);
      }
    };
    if guards.is_empty() {
      (TokenStream::new(), exprs.into_iter().map(|expr| quote!(#expr)).collect())
    }
    else {
      let names: Vec<syn::Ident> = exprs.iter().map(|_| context.next_arg_name()).collect();
      let eval = quote! {
        let (#(#names),*) = {
          #guards
          (#(#exprs),*)
        };
      };
      (eval, names.into_iter().map(|name| quote!(#name)).collect())
    }
  }
}

impl CompileExpr for NonTerminalCompiler
{
  fn compile_expr(&self, context: &mut Context, continuation: Continuation) -> TokenStream {
    let cursor = context.cursor();
    let rule = rust_ident(&self.rule);
    let (eval, args) = self.compile_args(context);
    let call = context.bind(self.expr_idx,
      quote!(#rule(walker, state, #cursor, frame #(, #args)*)?));
    continuation
      .map_success(|success| quote! {
        #eval
        #call
        #success
      })
      .unwrap_success()
  }
}
