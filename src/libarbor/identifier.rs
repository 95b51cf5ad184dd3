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

use std::cmp::Ordering;
use std::fmt::{Formatter, Display, Error};
use std::hash::{Hash, Hasher};

/// Position in the grammar source. Lines and columns start at 1, columns count characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span
{
  pub line: usize,
  pub column: usize,
  pub offset: usize
}

impl Span
{
  pub fn new(line: usize, column: usize, offset: usize) -> Span {
    Span { line, column, offset }
  }

  /// The position reached after reading `text` from `self`.
  pub fn advance(self, text: &str) -> Span {
    let mut span = self;
    for c in text.chars() {
      span.offset += c.len_utf8();
      if c == '\n' {
        span.line += 1;
        span.column = 1;
      }
      else {
        span.column += 1;
      }
    }
    span
  }
}

impl Default for Span
{
  fn default() -> Span {
    Span::new(1, 1, 0)
  }
}

impl Display for Span
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    write!(formatter, "{}:{}", self.line, self.column)
  }
}

/// An identifier of the grammar. Equality, hashing and ordering only consider the name.
#[derive(Clone, Debug)]
pub struct Ident
{
  name: String,
  span: Span
}

impl Ident
{
  pub fn new(name: &str, span: Span) -> Ident {
    Ident {
      name: String::from(name),
      span
    }
  }

  pub fn as_str(&self) -> &str {
    &self.name
  }

  pub fn span(&self) -> Span {
    self.span
  }

  /// Token names start with an uppercase letter, rule names with a lowercase letter or `_`.
  pub fn is_token_name(&self) -> bool {
    self.name.chars().next().map_or(false, char::is_uppercase)
  }
}

impl PartialEq for Ident
{
  fn eq(&self, other: &Ident) -> bool {
    self.name == other.name
  }
}

impl Eq for Ident {}

impl Hash for Ident
{
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.name.hash(state)
  }
}

impl PartialOrd for Ident
{
  fn partial_cmp(&self, other: &Ident) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Ident
{
  fn cmp(&self, other: &Ident) -> Ordering {
    self.name.cmp(&other.name)
  }
}

impl Display for Ident
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    formatter.write_str(&self.name)
  }
}

pub trait ItemIdent
{
  fn ident(&self) -> Ident;
}

pub trait ItemSpan
{
  fn span(&self) -> Span;
}

impl ItemIdent for Ident
{
  fn ident(&self) -> Ident {
    self.clone()
  }
}

impl ItemSpan for Ident
{
  fn span(&self) -> Span {
    self.span
  }
}

#[test]
fn span_advance() {
  let span = Span::new(3, 5, 10).advance("ab\ncd");
  assert_eq!(span, Span::new(4, 3, 15));
}

#[test]
fn ident_equality_ignores_span() {
  assert_eq!(Ident::new("expr", Span::new(1, 1, 0)), Ident::new("expr", Span::new(7, 2, 40)));
  assert!(Ident::new("INT", Span::default()).is_token_name());
  assert!(!Ident::new("_expr", Span::default()).is_token_name());
}
