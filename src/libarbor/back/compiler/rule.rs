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
use crate::back::compiler::decision::DecisionCompiler;
use crate::back::name_factory::*;
use quote::quote;

/// Compiles a rule into its matching procedure, the function holding its alternatives and, for entry rules, its walk function.
pub struct RuleCompiler<'a>
{
  context: Context<'a>,
  rule: &'a Rule
}

impl<'a> RuleCompiler<'a>
{
  pub fn compile(context: Context<'a>, entry: bool) -> Vec<TokenStream> {
    let rule = context.rule();
    let mut compiler = RuleCompiler { context, rule };
    let mut items = vec![
      compiler.compile_procedure(entry),
      compiler.compile_alternatives()
    ];
    if entry {
      items.push(compiler.compile_walk());
    }
    items
  }

  /// Only entry procedures are public: attribute references are proven bound on the paths starting at entry rules.
  fn compile_procedure(&self, entry: bool) -> TokenStream {
    let name = rule_fn_name(self.rule);
    let alternatives = alternatives_fn_name(self.rule);
    let rule_name = self.rule.name.as_str();
    let params = self.params();
    let args = self.args();
    let ret = self.return_type();
    let (push_frame, frame) = match self.push_frame() {
      Some(push) => (push, quote!(&frame)),
      None => (TokenStream::new(), quote!(frame))
    };
    let visibility = if entry { quote!(pub) } else { TokenStream::new() };
    quote! {
      #visibility fn #name<'t, N: TreeNode>(walker: &mut Walker, state: &mut State, cursor: &mut Cursor<'t, N>,
        frame: &Frame<'_, Scope> #params) -> Result<#ret, MatchError>
      {
        walker.enter(#rule_name)?;
        #push_frame
        let result = #alternatives(walker, state, cursor, #frame #args);
        walker.exit();
        result
      }
    }
  }

  /// The frame of a rule declaring attributes, every attribute is initialised when the rule is entered.
  fn push_frame(&self) -> Option<TokenStream> {
    let scope_names = self.context.scope_names();
    let rule_idx = self.context.rule_idx();
    let variant = scope_names.variant(rule_idx)?;
    let scope = scope_names.struct_name(rule_idx)?;
    let fields = self.rule.attributes.iter().map(|attr| rust_ident(&attr.name));
    let inits = self.rule.attributes.iter().map(|attr| self.initializer(attr));
    Some(quote! {
      let frame = frame.push(Scope::#variant(#scope {
        #(#fields: RefCell::new(#inits)),*
      }));
    })
  }

  fn compile_alternatives(&mut self) -> TokenStream {
    let name = alternatives_fn_name(self.rule);
    let params = self.params();
    let ret = self.return_type();
    let (declare_return, return_value) = match &self.rule.returns {
      Some(returns) => {
        let value = rust_ident(&returns.name);
        let ty = self.context.lex(&returns.ty, &returns.ty.text);
        let init = self.initializer(returns);
        (quote!(let mut #value: #ty = #init;), quote!(#value))
      }
      None => (TokenStream::new(), quote!(()))
    };
    let grammar = self.context.grammar();
    let body = match grammar.decision_of_rule(self.context.rule_idx()) {
      Some(decision) => {
        let decision = DecisionCompiler::new(decision, &self.rule.alternatives);
        let error = decision.error(&self.context);
        let dispatch = decision.dispatch(&mut self.context, Some(error));
        quote!({ #dispatch })
      }
      None => {
        let rule = self.rule;
        let sequences: Vec<TokenStream> = rule.alternatives.iter()
          .map(|alt| self.context.compile_sequence(&alt.elements, Continuation::empty()))
          .collect();
        quote!(#(#sequences)*)
      }
    };
    quote! {
      fn #name<'t, N: TreeNode>(walker: &mut Walker, state: &mut State, cursor: &mut Cursor<'t, N>,
        frame: &Frame<'_, Scope> #params) -> Result<#ret, MatchError>
      {
        #declare_return
        #body
        Ok(#return_value)
      }
    }
  }

  fn compile_walk(&self) -> TokenStream {
    let name = walk_fn_name(self.rule);
    let rule = rule_fn_name(self.rule);
    let rule_name = self.rule.name.as_str();
    let params = self.params();
    let args = self.args();
    let ret = self.return_type();
    quote! {
      pub fn #name<N: TreeNode>(walker: &mut Walker, state: &mut State, root: &N #params)
        -> Result<#ret, MatchError>
      {
        let frame = Frame::root(Scope::Root);
        let mut cursor = Cursor::root(root);
        let result = #rule(walker, state, &mut cursor, &frame #args)?;
        walker.expect_end(&cursor, #rule_name)?;
        Ok(result)
      }
    }
  }

  /// `, params` as declared by the rule.
  fn params(&self) -> TokenStream {
    match &self.rule.params {
      Some(params) => {
        let params = self.context.lex(params, &params.text);
        quote!(, #params)
      }
      None => TokenStream::new()
    }
  }

  /// `, names` forwarding the parameters.
  fn args(&self) -> TokenStream {
    let names = self.rule.param_names.iter().map(|name| quote::format_ident!("{}", name));
    quote!(#(, #names)*)
  }

  fn return_type(&self) -> TokenStream {
    match &self.rule.returns {
      Some(returns) => self.context.lex(&returns.ty, &returns.ty.text),
      None => quote!(())
    }
  }

  fn initializer(&self, attribute: &Attribute) -> TokenStream {
    match &attribute.init {
      Some(init) => self.context.lex(init, &init.text),
      None => quote!(::std::default::Default::default())
    }
  }
}
