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

//! Character level access to the grammar source.
//!
//! The grammar language embeds Rust code fragments, so the scanner does not tokenize: the parser asks for trivia skipping, identifiers, punctuation or a balanced code fragment depending on its position in the grammar.

use crate::ast::{Span, Ident, CodeFragment};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError
{
  pub span: Span,
  pub message: String
}

impl SyntaxError
{
  pub fn new(span: Span, message: String) -> SyntaxError {
    SyntaxError { span, message }
  }
}

pub type PResult<T> = Result<T, SyntaxError>;

pub fn is_ident_start(c: char) -> bool {
  c.is_alphabetic() || c == '_'
}

pub fn is_ident_char(c: char) -> bool {
  c.is_alphanumeric() || c == '_'
}

/// If a Rust string literal, char literal or comment starts at the byte `at` of `text`, returns the offset following it. Lifetimes are not literals.
pub fn skip_literal(text: &str, at: usize) -> Result<Option<usize>, &'static str> {
  let rest = &text[at..];
  if rest.starts_with("//") {
    return Ok(Some(rest.find('\n').map_or(text.len(), |end| at + end)));
  }
  if rest.starts_with("/*") {
    return skip_block_comment(text, at).map(Some);
  }
  let mut chars = rest.chars();
  match chars.next() {
    Some('"') => skip_string(text, at + 1).map(Some),
    Some('r') if starts_raw_string(text, at) => skip_raw_string(text, at).map(Some),
    Some('\'') => {
      match (chars.next(), chars.next()) {
        (Some('\\'), _) => {
          // Escaped char: `'\n'`, `'\''`, `'\u{41}'`.
          let body = at + 2;
          let escaped = text[body..].chars().next().map_or(0, char::len_utf8);
          text[body + escaped..].find('\'')
            .map(|end| Some(body + escaped + end + 1))
            .ok_or("unterminated character literal")
        }
        (Some(c), Some('\'')) => Ok(Some(at + 1 + c.len_utf8() + 1)),
        _ => Ok(None)
      }
    }
    _ => Ok(None)
  }
}

fn starts_raw_string(text: &str, at: usize) -> bool {
  let before = text[..at].chars().rev();
  let mut before = before.peekable();
  // `br"..."` is a raw byte string.
  if before.peek() == Some(&'b') {
    before.next();
  }
  if before.next().map_or(false, is_ident_char) {
    return false;
  }
  let after = text[at + 1..].trim_start_matches('#');
  after.starts_with('"')
}

fn skip_string(text: &str, mut at: usize) -> Result<usize, &'static str> {
  let mut chars = text[at..].chars();
  while let Some(c) = chars.next() {
    at += c.len_utf8();
    match c {
      '\\' => {
        if let Some(escaped) = chars.next() {
          at += escaped.len_utf8();
        }
      }
      '"' => return Ok(at),
      _ => ()
    }
  }
  Err("unterminated string literal")
}

fn skip_raw_string(text: &str, at: usize) -> Result<usize, &'static str> {
  let after_r = at + 1;
  let hashes = text[after_r..].chars().take_while(|&c| c == '#').count();
  let body = after_r + hashes + 1;
  let closing = format!("\"{}", "#".repeat(hashes));
  text[body..].find(&closing)
    .map(|end| body + end + closing.len())
    .ok_or("unterminated raw string literal")
}

fn skip_block_comment(text: &str, at: usize) -> Result<usize, &'static str> {
  let mut depth = 0;
  let mut i = at;
  while i < text.len() {
    let rest = &text[i..];
    if rest.starts_with("/*") {
      depth += 1;
      i += 2;
    }
    else if rest.starts_with("*/") {
      depth -= 1;
      i += 2;
      if depth == 0 {
        return Ok(i);
      }
    }
    else {
      i += rest.chars().next().map_or(1, char::len_utf8);
    }
  }
  Err("unterminated block comment")
}

fn closing_of(open: char) -> char {
  match open {
    '(' => ')',
    '[' => ']',
    _ => '}'
  }
}

#[derive(Clone)]
pub struct Scanner<'a>
{
  source: &'a str,
  pos: usize,
  span: Span
}

impl<'a> Scanner<'a>
{
  pub fn new(source: &'a str) -> Scanner<'a> {
    Scanner {
      source,
      pos: 0,
      span: Span::default()
    }
  }

  pub fn span(&self) -> Span {
    self.span
  }

  pub fn peek(&self) -> Option<char> {
    self.source[self.pos..].chars().next()
  }

  pub fn peek_nth(&self, n: usize) -> Option<char> {
    self.source[self.pos..].chars().nth(n)
  }

  pub fn bump(&mut self) -> Option<char> {
    let c = self.peek()?;
    self.advance_to(self.pos + c.len_utf8());
    Some(c)
  }

  fn advance_to(&mut self, offset: usize) {
    self.span = self.span.advance(&self.source[self.pos..offset]);
    self.pos = offset;
  }

  fn error<T>(&self, span: Span, message: &str) -> PResult<T> {
    Err(SyntaxError::new(span, String::from(message)))
  }

  /// Skips whitespaces and comments.
  pub fn skip_trivia(&mut self) -> PResult<()> {
    loop {
      match self.peek() {
        Some(c) if c.is_whitespace() => { self.bump(); }
        Some('/') if matches!(self.peek_nth(1), Some('/') | Some('*')) => {
          let span = self.span;
          match skip_literal(self.source, self.pos) {
            Ok(Some(end)) => self.advance_to(end),
            Ok(None) => return Ok(()),
            Err(msg) => return self.error(span, msg)
          }
        }
        _ => return Ok(())
      }
    }
  }

  /// Skips trivia and peeks the next significant character.
  pub fn next_char(&mut self) -> PResult<Option<char>> {
    self.skip_trivia()?;
    Ok(self.peek())
  }

  /// Skips trivia and consumes `c` if it is the next character.
  pub fn eat(&mut self, c: char) -> PResult<bool> {
    if self.next_char()? == Some(c) {
      self.bump();
      Ok(true)
    }
    else {
      Ok(false)
    }
  }

  pub fn expect(&mut self, c: char) -> PResult<()> {
    if self.eat(c)? {
      Ok(())
    }
    else {
      let found = self.describe_next();
      let span = self.span;
      Err(SyntaxError::new(span, format!("expected `{}`, found {}", c, found)))
    }
  }

  pub fn describe_next(&self) -> String {
    match self.peek() {
      Some(c) => format!("`{}`", c),
      None => String::from("end of grammar")
    }
  }

  /// Skips trivia and reads an identifier if there is one.
  pub fn ident(&mut self) -> PResult<Option<Ident>> {
    match self.next_char()? {
      Some(c) if is_ident_start(c) => {
        let span = self.span;
        let start = self.pos;
        let len = self.source[start..]
          .find(|c: char| !is_ident_char(c))
          .unwrap_or(self.source.len() - start);
        self.advance_to(start + len);
        Ok(Some(Ident::new(&self.source[start..start + len], span)))
      }
      _ => Ok(None)
    }
  }

  pub fn expect_ident(&mut self, what: &str) -> PResult<Ident> {
    match self.ident()? {
      Some(ident) => Ok(ident),
      None => {
        let found = self.describe_next();
        let span = self.span;
        Err(SyntaxError::new(span, format!("expected {}, found {}", what, found)))
      }
    }
  }

  /// Reads Rust text up to the first character of `stops` outside of any delimiter, the stop character is not consumed. When `angle` is set, `<` and `>` nest as in types.
  pub fn fragment(&mut self, stops: &[char], angle: bool) -> PResult<CodeFragment> {
    let start = self.pos;
    let start_span = self.span;
    let mut opened: Vec<(char, Span)> = vec![];
    let mut angles = 0usize;
    loop {
      let c = match self.peek() {
        Some(c) => c,
        None => {
          let (open, span) = opened.last().cloned().unwrap_or(('{', start_span));
          return Err(SyntaxError::new(span,
            format!("unclosed delimiter, expected `{}` before the end of grammar", closing_of(open))));
        }
      };
      let span = self.span;
      match skip_literal(self.source, self.pos) {
        Ok(Some(end)) => {
          self.advance_to(end);
          continue;
        }
        Ok(None) => (),
        Err(msg) => return self.error(span, msg)
      }
      if opened.is_empty() && angles == 0 && stops.contains(&c) {
        let text = String::from(&self.source[start..self.pos]);
        return Ok(CodeFragment::new(text, start_span));
      }
      match c {
        '(' | '[' | '{' => opened.push((c, span)),
        ')' | ']' | '}' => {
          match opened.pop() {
            Some((open, _)) if closing_of(open) == c => (),
            Some((open, open_span)) => {
              return Err(SyntaxError::new(span,
                format!("mismatched delimiter `{}`, the delimiter opened at {} expects `{}`",
                  c, open_span, closing_of(open))));
            }
            None => return Err(SyntaxError::new(span, format!("unbalanced delimiter `{}`", c)))
          }
        }
        '-' if self.peek_nth(1) == Some('>') => {
          self.bump();
        }
        '<' if angle && opened.is_empty() => angles += 1,
        '>' if angle && opened.is_empty() && angles > 0 => angles -= 1,
        _ => ()
      }
      self.bump();
    }
  }

  /// Skips everything up to and including the next `;` outside of a code block.
  pub fn recover(&mut self) {
    let mut depth = 0usize;
    while let Some(c) = self.peek() {
      if let Ok(Some(end)) = skip_literal(self.source, self.pos) {
        self.advance_to(end);
        continue;
      }
      self.bump();
      match c {
        '{' => depth += 1,
        '}' => depth = depth.saturating_sub(1),
        ';' if depth == 0 => return,
        _ => ()
      }
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_skip_literal() {
    let text = r##"a "b\"c" 'x' 'a r"q" r#"z"# // d"##;
    assert_eq!(skip_literal(text, 0), Ok(None));
    assert_eq!(skip_literal(text, 2), Ok(Some(8)));
    assert_eq!(skip_literal(text, 9), Ok(Some(12)));
    // Lifetime.
    assert_eq!(skip_literal(text, 13), Ok(None));
    assert_eq!(skip_literal(text, 16), Ok(Some(20)));
    assert_eq!(skip_literal(text, 21), Ok(Some(27)));
    assert_eq!(skip_literal(text, 28), Ok(Some(text.len())));
    assert_eq!(skip_literal("\"abc", 0), Err("unterminated string literal"));
    assert_eq!(skip_literal("/* a /* b */ c */d", 0), Ok(Some(17)));
    assert_eq!(skip_literal("'\\n'", 0), Ok(Some(4)));
  }

  #[test]
  fn test_fragment_balanced() {
    let mut scanner = Scanner::new("{ let x = \"}\"; f(a, { b }) }?");
    assert!(scanner.eat('{').unwrap());
    let fragment = scanner.fragment(&['}'], false).unwrap();
    assert_eq!(fragment.trimmed(), "let x = \"}\"; f(a, { b })");
    assert_eq!(fragment.span, Span::new(1, 2, 1));
    assert!(scanner.eat('}').unwrap());
    assert!(scanner.eat('?').unwrap());
    assert_eq!(scanner.peek(), None);
  }

  #[test]
  fn test_fragment_type_with_generics() {
    let mut scanner = Scanner::new("HashMap<String, Vec<u8>> = HashMap::new(), y: u8]");
    let ty = scanner.fragment(&[',', '=', ']'], true).unwrap();
    assert_eq!(ty.trimmed(), "HashMap<String, Vec<u8>>");
    assert!(scanner.eat('=').unwrap());
    let init = scanner.fragment(&[',', ']'], false).unwrap();
    assert_eq!(init.trimmed(), "HashMap::new()");
  }

  #[test]
  fn test_unbalanced_fragment() {
    let mut scanner = Scanner::new("f(a]}");
    let err = scanner.fragment(&['}'], false).unwrap_err();
    assert_eq!(err.span, Span::new(1, 4, 3));
    let mut scanner = Scanner::new("f(a");
    assert!(scanner.fragment(&['}'], false).is_err());
  }

  #[test]
  fn test_recover() {
    let mut scanner = Scanner::new("a : { x; } b ; c");
    scanner.recover();
    assert_eq!(scanner.ident().unwrap().map(|id| String::from(id.as_str())), Some(String::from("c")));
  }
}
