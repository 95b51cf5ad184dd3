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

//! Trees walked by generated procedures.

use std::fmt::{Formatter, Display, Error};
use std::str::FromStr;
use thiserror::Error;

/// Accessors required by generated code: the label is what grammars dispatch on, the text is the payload of a token (e.g. `3` for an `INT` node).
pub trait TreeNode: Sized
{
  fn label(&self) -> &str;
  fn text(&self) -> &str;
  fn children(&self) -> &[Self];
}

pub fn label_of<N: TreeNode>(node: &N) -> &str {
  node.label()
}

pub fn text_of<N: TreeNode>(node: &N) -> &str {
  node.text()
}

pub fn children_of<N: TreeNode>(node: &N) -> &[N] {
  node.children()
}

/// An owned labelled tree. Owning its children, it is acyclic by construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree
{
  label: String,
  text: String,
  children: Vec<Tree>
}

impl Tree
{
  pub fn leaf(label: &str, text: &str) -> Tree {
    Tree {
      label: String::from(label),
      text: String::from(text),
      children: vec![]
    }
  }

  pub fn node(label: &str, children: Vec<Tree>) -> Tree {
    Tree {
      label: String::from(label),
      text: String::new(),
      children
    }
  }

  pub fn with_text(mut self, text: &str) -> Tree {
    self.text = String::from(text);
    self
  }

  pub fn push(&mut self, child: Tree) {
    self.children.push(child);
  }

  /// Number of nodes in the tree, the root included.
  pub fn size(&self) -> usize {
    1 + self.children.iter().map(Tree::size).sum::<usize>()
  }
}

impl TreeNode for Tree
{
  fn label(&self) -> &str {
    &self.label
  }

  fn text(&self) -> &str {
    &self.text
  }

  fn children(&self) -> &[Tree] {
    &self.children
  }
}

impl Display for Tree
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    if self.children.is_empty() {
      if self.text.is_empty() {
        write!(formatter, "({})", self.label)
      }
      else if self.text == self.label {
        write!(formatter, "{}", self.label)
      }
      else {
        write!(formatter, "({} {})", self.label, quote_atom(&self.text))
      }
    }
    else {
      write!(formatter, "({}", self.label)?;
      for child in &self.children {
        write!(formatter, " {}", child)?;
      }
      write!(formatter, ")")
    }
  }
}

fn quote_atom(atom: &str) -> String {
  if is_label(atom) || atom.chars().any(|c| c.is_whitespace() || c == '(' || c == ')' || c == '"') {
    format!("{:?}", atom)
  }
  else {
    String::from(atom)
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TreeSyntaxError
{
  #[error("unexpected end of input")]
  UnexpectedEnd,
  #[error("unexpected `)` at offset {0}")]
  UnexpectedClose(usize),
  #[error("a node label is expected at offset {0}")]
  MissingLabel(usize),
  #[error("unterminated string starting at offset {0}")]
  UnterminatedString(usize),
  #[error("trailing input at offset {0}")]
  TrailingInput(usize)
}

/// Reads the s-expression notation of trees:
///
/// * `(LABEL child...)` is a node with children, a bare atom child `X` is the leaf `X` with text `X`;
/// * `(LABEL text)` is a leaf carrying `text` when `text` is quoted or does not start with an uppercase letter, as in `(INT 3)` or `(ID "Foo")`;
/// * `(LABEL X)` with `X` starting with an uppercase letter is a node with the single child `X`;
/// * `(LABEL)` is a leaf without text and a top-level bare atom `X` is the leaf `X` with text `X`.
impl FromStr for Tree
{
  type Err = TreeSyntaxError;

  fn from_str(input: &str) -> Result<Tree, TreeSyntaxError> {
    let mut reader = TreeReader::new(input);
    let tree = reader.read_tree()?;
    reader.skip_whitespace();
    match reader.peek() {
      None => Ok(tree),
      Some(_) => Err(TreeSyntaxError::TrailingInput(reader.offset))
    }
  }
}

enum Item
{
  Atom(String),
  Quoted(String),
  Tree(Tree)
}

/// Bare atoms starting with an uppercase letter are labels.
fn is_label(atom: &str) -> bool {
  atom.chars().next().map_or(false, |c| c.is_ascii_uppercase())
}

struct TreeReader<'a>
{
  input: &'a str,
  offset: usize
}

impl<'a> TreeReader<'a>
{
  fn new(input: &'a str) -> Self {
    TreeReader { input, offset: 0 }
  }

  fn peek(&self) -> Option<char> {
    self.input[self.offset..].chars().next()
  }

  fn bump(&mut self) -> Option<char> {
    let c = self.peek()?;
    self.offset += c.len_utf8();
    Some(c)
  }

  fn skip_whitespace(&mut self) {
    while self.peek().map_or(false, char::is_whitespace) {
      self.bump();
    }
  }

  fn read_tree(&mut self) -> Result<Tree, TreeSyntaxError> {
    match self.read_item()? {
      Item::Atom(atom) | Item::Quoted(atom) => Ok(Tree::leaf(&atom, &atom)),
      Item::Tree(tree) => Ok(tree)
    }
  }

  fn read_item(&mut self) -> Result<Item, TreeSyntaxError> {
    self.skip_whitespace();
    match self.peek() {
      None => Err(TreeSyntaxError::UnexpectedEnd),
      Some('(') => {
        self.bump();
        self.read_list().map(Item::Tree)
      }
      Some(')') => Err(TreeSyntaxError::UnexpectedClose(self.offset)),
      Some('"') => self.read_string().map(Item::Quoted),
      Some(_) => Ok(Item::Atom(self.read_atom()))
    }
  }

  fn read_list(&mut self) -> Result<Tree, TreeSyntaxError> {
    self.skip_whitespace();
    let label = match self.peek() {
      Some(c) if c != '(' && c != ')' && c != '"' => self.read_atom(),
      Some(_) => return Err(TreeSyntaxError::MissingLabel(self.offset)),
      None => return Err(TreeSyntaxError::UnexpectedEnd)
    };
    let mut items = vec![];
    loop {
      self.skip_whitespace();
      match self.peek() {
        None => return Err(TreeSyntaxError::UnexpectedEnd),
        Some(')') => {
          self.bump();
          break;
        }
        Some(_) => items.push(self.read_item()?)
      }
    }
    if items.len() == 1 {
      match items[0] {
        Item::Quoted(ref text) => return Ok(Tree::leaf(&label, text)),
        Item::Atom(ref text) if !is_label(text) => return Ok(Tree::leaf(&label, text)),
        _ => ()
      }
    }
    let children = items.into_iter()
      .map(|item| match item {
        Item::Atom(atom) | Item::Quoted(atom) => Tree::leaf(&atom, &atom),
        Item::Tree(tree) => tree
      })
      .collect();
    Ok(Tree::node(&label, children))
  }

  fn read_atom(&mut self) -> String {
    let start = self.offset;
    while let Some(c) = self.peek() {
      if c.is_whitespace() || c == '(' || c == ')' || c == '"' {
        break;
      }
      self.bump();
    }
    String::from(&self.input[start..self.offset])
  }

  fn read_string(&mut self) -> Result<String, TreeSyntaxError> {
    let start = self.offset;
    self.bump();
    let mut text = String::new();
    loop {
      match self.bump() {
        None => return Err(TreeSyntaxError::UnterminatedString(start)),
        Some('"') => return Ok(text),
        Some('\\') => match self.bump() {
          Some('n') => text.push('\n'),
          Some('t') => text.push('\t'),
          Some(c) => text.push(c),
          None => return Err(TreeSyntaxError::UnterminatedString(start))
        },
        Some(c) => text.push(c)
      }
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_read_expression_tree() {
    let tree: Tree = "(PLUS (INT 3) (STAR (INT 4) (INT 5)))".parse().unwrap();
    let expected = Tree::node("PLUS", vec![
      Tree::leaf("INT", "3"),
      Tree::node("STAR", vec![Tree::leaf("INT", "4"), Tree::leaf("INT", "5")])
    ]);
    assert_eq!(tree, expected);
    assert_eq!(tree.size(), 5);
    assert_eq!(label_of(&children_of(&tree)[1]), "STAR");
    assert_eq!(text_of(&children_of(&tree)[0]), "3");
  }

  #[test]
  fn test_bare_atoms_are_leaves() {
    let tree: Tree = "(BLOCK A (B) C)".parse().unwrap();
    assert_eq!(tree.children().len(), 3);
    assert_eq!(tree.children()[0], Tree::leaf("A", "A"));
    assert_eq!(tree.children()[1], Tree::leaf("B", ""));
    let leaf: Tree = "ID".parse().unwrap();
    assert_eq!(leaf, Tree::leaf("ID", "ID"));
  }

  #[test]
  fn test_single_label_is_a_child() {
    let tree: Tree = "(FUN BREAK)".parse().unwrap();
    assert_eq!(tree, Tree::node("FUN", vec![Tree::leaf("BREAK", "BREAK")]));
    let tree: Tree = "(ID x)".parse().unwrap();
    assert_eq!(tree, Tree::leaf("ID", "x"));
    let tree: Tree = r#"(ID "Foo")"#.parse().unwrap();
    assert_eq!(tree, Tree::leaf("ID", "Foo"));
    assert_eq!(format!("{}", tree), r#"(ID "Foo")"#);
    assert_eq!(format!("{}", Tree::node("LOOP", vec![Tree::leaf("BREAK", "BREAK")])), "(LOOP BREAK)");
  }

  #[test]
  fn test_quoted_text() {
    let tree: Tree = r#"(STRING "a (b) \"c\"")"#.parse().unwrap();
    assert_eq!(tree.text(), "a (b) \"c\"");
  }

  #[test]
  fn test_display_round_trip() {
    let source = "(PLUS (INT 3) (STAR (INT 4) (INT 5)))";
    let tree: Tree = source.parse().unwrap();
    assert_eq!(format!("{}", tree), source);
  }

  #[test]
  fn test_syntax_errors() {
    assert_eq!("(PLUS (INT 3)".parse::<Tree>(), Err(TreeSyntaxError::UnexpectedEnd));
    assert_eq!(")".parse::<Tree>(), Err(TreeSyntaxError::UnexpectedClose(0)));
    assert_eq!("(() A)".parse::<Tree>(), Err(TreeSyntaxError::MissingLabel(1)));
    assert_eq!("(A) (B)".parse::<Tree>(), Err(TreeSyntaxError::TrailingInput(4)));
    assert_eq!("(A \"b)".parse::<Tree>(), Err(TreeSyntaxError::UnterminatedString(3)));
  }
}
