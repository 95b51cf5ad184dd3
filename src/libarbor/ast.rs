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

//! IR of a tree grammar shared across all the compiling steps.
//!
//! Expressions are stored in an arena (`Grammar::exprs`) and referenced by index. The analysis passes annotate the grammar with its decision points and its attribute scope plan, the back end only reads it.

pub use crate::identifier::*;
pub use crate::options::*;
pub use crate::middle::lookahead::decision::*;
pub use crate::middle::scope::ScopePlan;
pub use partial::Partial;

use std::fmt::{Formatter, Display, Error};

/// Verbatim Rust text embedded in the grammar. `span` is the position of the first character of `text`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeFragment
{
  pub text: String,
  pub span: Span
}

impl CodeFragment
{
  pub fn new(text: String, span: Span) -> CodeFragment {
    CodeFragment { text, span }
  }

  pub fn trimmed(&self) -> &str {
    self.text.trim()
  }

  /// Position of the byte `offset` of `text`.
  pub fn span_at(&self, offset: usize) -> Span {
    self.span.advance(&self.text[..offset.min(self.text.len())])
  }
}

impl Display for CodeFragment
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    formatter.write_str(self.trimmed())
  }
}

/// `name: ty = init`, either an attribute of a rule or its return value.
#[derive(Clone, Debug)]
pub struct Attribute
{
  pub name: Ident,
  pub ty: CodeFragment,
  pub init: Option<CodeFragment>
}

impl Attribute
{
  /// The type text with whitespaces normalized, used to compare declarations.
  pub fn type_text(&self) -> String {
    normalize_type_text(&self.ty.text)
  }
}

pub fn normalize_type_text(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl ItemIdent for Attribute
{
  fn ident(&self) -> Ident {
    self.name.clone()
  }
}

impl ItemSpan for Attribute
{
  fn span(&self) -> Span {
    self.name.span()
  }
}

#[derive(Clone, Debug)]
pub struct Alternative
{
  /// Predicate written first in the alternative.
  pub guard: Option<CodeFragment>,
  pub elements: Vec<usize>,
  pub span: Span
}

impl Alternative
{
  pub fn new(guard: Option<CodeFragment>, elements: Vec<usize>, span: Span) -> Alternative {
    Alternative { guard, elements, span }
  }

  pub fn is_guarded(&self) -> bool {
    self.guard.is_some()
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubruleKind
{
  Block, // ( a | b )
  Optional, // ( a )?
  Star, // ( a )*
  Plus // ( a )+
}

impl SubruleKind
{
  pub fn is_repeat(self) -> bool {
    self == SubruleKind::Star || self == SubruleKind::Plus
  }

  pub fn suffix(self) -> &'static str {
    use self::SubruleKind::*;
    match self {
      Block => "",
      Optional => "?",
      Star => "*",
      Plus => "+"
    }
  }
}

#[derive(Clone, Debug)]
pub enum Expression
{
  NodeMatch(Ident, Vec<usize>), // #(PLUS expr expr)
  TokenMatch(Ident), // INT
  Wildcard, // .
  RuleRef(Ident, Option<CodeFragment>), // expr[@depth + 1]
  Subrule(SubruleKind, Vec<Alternative>), // (a | b)*
  SemanticAction(CodeFragment), // { ... }
  Predicate(CodeFragment) // { ... }?
}

pub trait ExprByIndex
{
  fn expr_by_index(&self, index: usize) -> Expression;
}

#[derive(Clone, Debug)]
pub struct ExprInfo
{
  pub span: Span,
  /// `x=` binding the matched node or the return value of a rule.
  pub label: Option<Ident>
}

impl ExprInfo
{
  pub fn new(span: Span, label: Option<Ident>) -> ExprInfo {
    ExprInfo { span, label }
  }
}

#[derive(Clone, Debug)]
pub struct Rule
{
  pub name: Ident,
  pub public: bool,
  pub attributes: Vec<Attribute>,
  /// Rust function parameters, without the parentheses.
  pub params: Option<CodeFragment>,
  /// Names bound by `params`, filled by the analysis.
  pub param_names: Vec<String>,
  pub returns: Option<Attribute>,
  pub alternatives: Vec<Alternative>
}

impl Rule
{
  pub fn new(name: Ident) -> Rule {
    Rule {
      name,
      public: false,
      attributes: vec![],
      params: None,
      param_names: vec![],
      returns: None,
      alternatives: vec![]
    }
  }

  pub fn attribute(&self, name: &str) -> Option<&Attribute> {
    self.attributes.iter().find(|attr| attr.name.as_str() == name)
  }

  pub fn declares(&self, name: &str) -> bool {
    self.attribute(name).is_some()
  }
}

impl ItemIdent for Rule
{
  fn ident(&self) -> Ident {
    self.name.clone()
  }
}

impl ItemSpan for Rule
{
  fn span(&self) -> Span {
    self.name.span()
  }
}

pub struct Grammar
{
  pub name: Ident,
  pub options: Options,
  pub tokens: Vec<Ident>,
  pub prelude: Vec<CodeFragment>,
  pub rules: Vec<Rule>,
  pub exprs: Vec<Expression>,
  pub exprs_info: Vec<ExprInfo>,
  pub decisions: Vec<DecisionPoint>,
  pub scope_plan: ScopePlan
}

impl Grammar
{
  pub fn rule_index(&self, name: &str) -> Option<usize> {
    self.rules.iter().position(|rule| rule.name.as_str() == name)
  }

  /// Rules marked `pub`, or the first rule if none is.
  pub fn entry_rules(&self) -> Vec<usize> {
    let public: Vec<usize> = self.rules.iter().enumerate()
      .filter(|(_, rule)| rule.public)
      .map(|(idx, _)| idx)
      .collect();
    if public.is_empty() && !self.rules.is_empty() {
      vec![0]
    }
    else {
      public
    }
  }

  pub fn is_token(&self, name: &str) -> bool {
    self.tokens.iter().any(|token| token.as_str() == name)
  }

  pub fn decision_of_rule(&self, rule: usize) -> Option<&DecisionPoint> {
    self.decisions.iter().find(|d| d.site == DecisionSite::Rule(rule))
  }

  pub fn decision_of_expr(&self, expr: usize) -> Option<&DecisionPoint> {
    self.decisions.iter().find(|d| d.site == DecisionSite::Subrule(expr))
  }

  pub fn expr_span(&self, expr: usize) -> Span {
    self.exprs_info[expr].span
  }

  pub fn expr_label(&self, expr: usize) -> Option<&Ident> {
    self.exprs_info[expr].label.as_ref()
  }
}

impl ExprByIndex for Grammar
{
  fn expr_by_index(&self, index: usize) -> Expression {
    self.exprs[index].clone()
  }
}
