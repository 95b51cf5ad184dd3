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

pub use crate::ast::*;

pub const DEFAULT_GRAMMAR_NAME: &str = "tree_grammar";

/// `#![name(args)]`
#[derive(Clone, Debug)]
pub struct FOption
{
  pub name: Ident,
  pub args: Option<CodeFragment>
}

impl ItemIdent for FOption
{
  fn ident(&self) -> Ident {
    self.name.clone()
  }
}

impl ItemSpan for FOption
{
  fn span(&self) -> Span {
    self.name.span()
  }
}

/// The grammar as written, before any analysis.
pub struct FGrammar
{
  pub name: Ident,
  pub options: Vec<FOption>,
  pub tokens: Vec<Ident>,
  pub prelude: Vec<CodeFragment>,
  pub rules: Vec<Rule>,
  /// Rules whose declaration has a syntax error, they are left out of `rules`.
  pub malformed_rules: Vec<Ident>,
  pub exprs: Vec<Expression>,
  pub exprs_info: Vec<ExprInfo>
}

impl FGrammar
{
  pub fn new() -> FGrammar {
    FGrammar {
      name: Ident::new(DEFAULT_GRAMMAR_NAME, Span::default()),
      options: vec![],
      tokens: vec![],
      prelude: vec![],
      rules: vec![],
      malformed_rules: vec![],
      exprs: vec![],
      exprs_info: vec![]
    }
  }

  pub fn alloc_expr(&mut self, span: Span, label: Option<Ident>, expr: Expression) -> usize {
    self.exprs.push(expr);
    self.exprs_info.push(ExprInfo::new(span, label));
    self.exprs.len() - 1
  }

  pub fn is_malformed(&self) -> bool {
    !self.malformed_rules.is_empty()
  }

  pub fn push_token(&mut self, token: Ident) {
    if !self.tokens.contains(&token) {
      self.tokens.push(token);
    }
  }
}

impl Default for FGrammar
{
  fn default() -> FGrammar {
    FGrammar::new()
  }
}

impl ExprByIndex for FGrammar
{
  fn expr_by_index(&self, index: usize) -> Expression {
    self.exprs[index].clone()
  }
}
