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

use crate::diagnostic::*;
use crate::front::ast::*;
use crate::front::ast::Expression::*;
use crate::front::scanner::*;

pub struct Parser<'a>
{
  scanner: Scanner<'a>,
  grammar: FGrammar,
  cx: &'a Diagnostics
}

impl<'a> Parser<'a>
{
  pub fn new(cx: &'a Diagnostics, source: &'a str) -> Parser<'a> {
    Parser {
      scanner: Scanner::new(source),
      grammar: FGrammar::new(),
      cx
    }
  }

  fn alloc_expr(&mut self, span: Span, label: Option<Ident>, expr: Expression) -> usize {
    self.grammar.alloc_expr(span, label, expr)
  }

  /// Parses the whole grammar, a syntax error is reported and the parser resumes after the next `;`.
  pub fn parse_grammar(mut self) -> Partial<FGrammar> {
    let mut has_errors = false;
    if let Err(err) = self.parse_header() {
      self.syntax_err(err);
      has_errors = true;
    }
    loop {
      match self.scanner.next_char() {
        Ok(None) => break,
        Ok(Some(_)) => {
          if let Err(err) = self.parse_item() {
            self.syntax_err(err);
            has_errors = true;
          }
        }
        Err(err) => {
          self.syntax_err(err);
          has_errors = true;
          break;
        }
      }
    }
    if has_errors {
      Partial::Fake(self.grammar)
    }
    else {
      Partial::Value(self.grammar)
    }
  }

  fn syntax_err(&mut self, err: SyntaxError) {
    self.cx.span_err(DiagnosticKind::GrammarSyntax, err.span, err.message);
    self.scanner.recover();
  }

  fn err<T>(&self, span: Span, msg: String) -> PResult<T> {
    Err(SyntaxError::new(span, msg))
  }

  fn is_keyword_ahead(&self, keyword: &str, next: char) -> bool {
    let mut ahead = self.scanner.clone();
    match ahead.ident() {
      Ok(Some(ident)) if ident.as_str() == keyword => {
        ahead.next_char().ok().flatten() == Some(next)
      }
      _ => false
    }
  }

  // `tree grammar NAME;`
  fn parse_header(&mut self) -> PResult<()> {
    let mut ahead = self.scanner.clone();
    match ahead.ident()? {
      Some(ref ident) if ident.as_str() == "tree" => (),
      _ => return Ok(())
    }
    self.scanner.ident()?;
    let keyword = self.scanner.expect_ident("`grammar`")?;
    if keyword.as_str() != "grammar" {
      return self.err(keyword.span(), format!("expected `grammar`, found `{}`", keyword));
    }
    self.grammar.name = self.scanner.expect_ident("the name of the grammar")?;
    self.scanner.expect(';')
  }

  fn parse_item(&mut self) -> PResult<()> {
    if self.scanner.next_char()? == Some('#') {
      self.parse_option()
    }
    else if self.is_keyword_ahead("tokens", '{') {
      self.parse_tokens()
    }
    else if self.is_keyword_ahead("prelude", '{') {
      self.parse_prelude()
    }
    else {
      match self.scanner.clone().ident()? {
        Some(_) => self.parse_rule(),
        None => {
          let found = self.scanner.describe_next();
          self.err(self.scanner.span(),
            format!("expected a rule, `tokens`, `prelude` or a grammar option, found {}", found))
        }
      }
    }
  }

  // `#![name]` or `#![name(args)]`
  fn parse_option(&mut self) -> PResult<()> {
    self.scanner.expect('#')?;
    self.scanner.expect('!')?;
    self.scanner.expect('[')?;
    let name = self.scanner.expect_ident("the name of a grammar option")?;
    let args =
      if self.scanner.eat('(')? {
        let args = self.scanner.fragment(&[')'], false)?;
        self.scanner.expect(')')?;
        Some(args)
      }
      else { None };
    self.scanner.expect(']')?;
    self.grammar.options.push(FOption { name, args });
    Ok(())
  }

  // `tokens { A, B }`
  fn parse_tokens(&mut self) -> PResult<()> {
    self.scanner.ident()?;
    self.scanner.expect('{')?;
    while !self.scanner.eat('}')? {
      let token = self.scanner.expect_ident("a token name")?;
      if !token.is_token_name() {
        return self.err(token.span(),
          format!("token `{}` must start with an uppercase letter", token));
      }
      self.grammar.push_token(token);
      if !self.scanner.eat(',')? {
        self.scanner.expect('}')?;
        break;
      }
    }
    Ok(())
  }

  // `prelude { items }`
  fn parse_prelude(&mut self) -> PResult<()> {
    self.scanner.ident()?;
    self.scanner.expect('{')?;
    let items = self.scanner.fragment(&['}'], false)?;
    self.scanner.expect('}')?;
    self.grammar.prelude.push(items);
    Ok(())
  }

  fn parse_rule(&mut self) -> PResult<()> {
    let mut name = self.scanner.expect_ident("a rule name")?;
    let mut public = false;
    if name.as_str() == "pub" {
      public = true;
      name = self.scanner.expect_ident("a rule name")?;
    }
    if name.is_token_name() {
      return self.err(name.span(),
        format!("rule `{}` must start with a lowercase letter or `_`, uppercase names denote tokens", name));
    }
    let mut rule = Rule::new(name.clone());
    rule.public = public;
    match self.parse_rule_body(&mut rule) {
      Ok(()) => {
        self.grammar.rules.push(rule);
        Ok(())
      }
      Err(err) => {
        self.grammar.malformed_rules.push(name);
        Err(err)
      }
    }
  }

  fn parse_rule_body(&mut self, rule: &mut Rule) -> PResult<()> {
    if self.scanner.eat('[')? {
      rule.attributes = self.parse_attributes()?;
    }
    if self.scanner.eat('(')? {
      let params = self.scanner.fragment(&[')'], false)?;
      self.scanner.expect(')')?;
      rule.params = Some(params);
    }
    if self.is_keyword_ahead("returns", '[') {
      self.scanner.ident()?;
      self.scanner.expect('[')?;
      rule.returns = Some(self.parse_attribute()?);
      self.scanner.expect(']')?;
    }
    self.scanner.expect(':')?;
    rule.alternatives = self.parse_alternatives(';')?;
    self.scanner.expect(';')
  }

  fn parse_attributes(&mut self) -> PResult<Vec<Attribute>> {
    let mut attributes = vec![];
    while !self.scanner.eat(']')? {
      attributes.push(self.parse_attribute()?);
      if !self.scanner.eat(',')? {
        self.scanner.expect(']')?;
        break;
      }
    }
    Ok(attributes)
  }

  // `name: Type = init`
  fn parse_attribute(&mut self) -> PResult<Attribute> {
    let name = self.scanner.expect_ident("an attribute name")?;
    if !self.scanner.eat(':')? {
      let span = self.scanner.span();
      return self.err(span, format!(
        "attribute `{}` needs a Rust type as in `[{}: i32]`, it is stored in a typed field of the rule frame",
        name, name));
    }
    let ty = self.scanner.fragment(&[',', '=', ']'], true)?;
    if ty.trimmed().is_empty() {
      return self.err(ty.span, format!("missing type of attribute `{}`", name));
    }
    let init =
      if self.scanner.eat('=')? {
        let init = self.scanner.fragment(&[',', ']'], false)?;
        if init.trimmed().is_empty() {
          return self.err(init.span, format!("missing initializer of attribute `{}`", name));
        }
        Some(init)
      }
      else { None };
    Ok(Attribute { name, ty, init })
  }

  fn parse_alternatives(&mut self, end: char) -> PResult<Vec<Alternative>> {
    let mut alternatives = vec![self.parse_alternative(end)?];
    while self.scanner.eat('|')? {
      alternatives.push(self.parse_alternative(end)?);
    }
    Ok(alternatives)
  }

  fn parse_alternative(&mut self, end: char) -> PResult<Alternative> {
    self.scanner.skip_trivia()?;
    let span = self.scanner.span();
    let mut guard = None;
    let mut elements = vec![];
    loop {
      match self.scanner.next_char()? {
        Some('|') => break,
        Some(c) if c == end => break,
        None => {
          return self.err(self.scanner.span(), format!("expected `{}`, found end of grammar", end));
        }
        Some('{') => {
          let (fragment, is_predicate) = self.parse_code_block()?;
          if is_predicate && elements.is_empty() && guard.is_none() {
            guard = Some(fragment);
          }
          else {
            let span = fragment.span;
            let expr = if is_predicate { Predicate(fragment) } else { SemanticAction(fragment) };
            elements.push(self.alloc_expr(span, None, expr));
          }
        }
        Some(_) => elements.push(self.parse_element()?)
      }
    }
    Ok(Alternative::new(guard, elements, span))
  }

  // `{ action }` or `{ predicate }?`
  fn parse_code_block(&mut self) -> PResult<(CodeFragment, bool)> {
    self.scanner.expect('{')?;
    let fragment = self.scanner.fragment(&['}'], false)?;
    self.scanner.expect('}')?;
    let is_predicate = self.scanner.eat('?')?;
    if fragment.trimmed().is_empty() {
      let what = if is_predicate { "predicate" } else { "action" };
      return self.err(fragment.span, format!("empty {}", what));
    }
    Ok((fragment, is_predicate))
  }

  fn parse_element(&mut self) -> PResult<usize> {
    self.scanner.skip_trivia()?;
    let span = self.scanner.span();
    let label = self.parse_label()?;
    let primary = self.parse_primary(span, label.clone())?;
    let kind = match self.scanner.next_char()? {
      Some('?') => SubruleKind::Optional,
      Some('*') => SubruleKind::Star,
      Some('+') => SubruleKind::Plus,
      _ => return Ok(primary)
    };
    let suffix_span = self.scanner.span();
    self.scanner.bump();
    if let Some(label) = label {
      return self.err(label.span(),
        format!("label `{}` cannot be attached to the repeated element ending at {}", label, suffix_span));
    }
    if let Subrule(SubruleKind::Block, alternatives) = &self.grammar.exprs[primary] {
      let alternatives = alternatives.clone();
      self.grammar.exprs[primary] = Subrule(kind, alternatives);
      Ok(primary)
    }
    else {
      let alternative = Alternative::new(None, vec![primary], span);
      Ok(self.alloc_expr(span, None, Subrule(kind, vec![alternative])))
    }
  }

  // `x=`
  fn parse_label(&mut self) -> PResult<Option<Ident>> {
    let mut ahead = self.scanner.clone();
    if let Some(label) = ahead.ident()? {
      if ahead.eat('=')? {
        self.scanner = ahead;
        if label.is_token_name() {
          return self.err(label.span(),
            format!("label `{}` must start with a lowercase letter or `_`", label));
        }
        return Ok(Some(label));
      }
    }
    Ok(None)
  }

  fn parse_primary(&mut self, span: Span, label: Option<Ident>) -> PResult<usize> {
    self.scanner.skip_trivia()?;
    let primary_span = self.scanner.span();
    match self.scanner.peek() {
      Some('#') => {
        self.scanner.bump();
        if self.scanner.peek() != Some('(') {
          return self.err(primary_span, format!("expected `#(` to start a node match"));
        }
        self.scanner.bump();
        let node = self.scanner.expect_ident("the label of the node")?;
        if !node.is_token_name() {
          return self.err(node.span(),
            format!("node label `{}` must be a token, it must start with an uppercase letter", node));
        }
        let children = self.parse_children()?;
        Ok(self.alloc_expr(span, label, NodeMatch(node, children)))
      }
      Some('.') => {
        self.scanner.bump();
        Ok(self.alloc_expr(span, label, Wildcard))
      }
      Some('(') => {
        self.scanner.bump();
        if let Some(label) = label {
          return self.err(label.span(), format!("label `{}` cannot be attached to a subrule", label));
        }
        let alternatives = self.parse_alternatives(')')?;
        self.scanner.expect(')')?;
        Ok(self.alloc_expr(span, None, Subrule(SubruleKind::Block, alternatives)))
      }
      Some(c) if is_ident_start(c) => {
        let name = self.scanner.expect_ident("a token or a rule")?;
        if name.is_token_name() {
          Ok(self.alloc_expr(span, label, TokenMatch(name)))
        }
        else {
          let args =
            if self.scanner.peek() == Some('[') {
              self.scanner.bump();
              let args = self.scanner.fragment(&[']'], false)?;
              self.scanner.expect(']')?;
              Some(args)
            }
            else { None };
          Ok(self.alloc_expr(span, label, RuleRef(name, args)))
        }
      }
      _ => {
        let found = self.scanner.describe_next();
        self.err(primary_span, format!("expected an element, found {}", found))
      }
    }
  }

  // Children of `#(LABEL ...)` up to the closing parenthesis.
  fn parse_children(&mut self) -> PResult<Vec<usize>> {
    let mut children = vec![];
    loop {
      match self.scanner.next_char()? {
        Some(')') => {
          self.scanner.bump();
          return Ok(children);
        }
        Some('{') => {
          let (fragment, is_predicate) = self.parse_code_block()?;
          let span = fragment.span;
          let expr = if is_predicate { Predicate(fragment) } else { SemanticAction(fragment) };
          children.push(self.alloc_expr(span, None, expr));
        }
        Some('|') => {
          return self.err(self.scanner.span(),
            format!("alternatives in a node match must be grouped in a subrule `( .. | .. )`"));
        }
        None => {
          return self.err(self.scanner.span(), format!("unclosed node match, expected `)`"));
        }
        Some(_) => children.push(self.parse_element()?)
      }
    }
  }
}
