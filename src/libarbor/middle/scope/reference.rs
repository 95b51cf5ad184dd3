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
use crate::front::scanner::{skip_literal, is_ident_start, is_ident_char};
use std::ops::Range;

/// An occurrence of `@name` in a code fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeRef
{
  pub name: String,
  /// Bytes of `@name` in the text of the fragment.
  pub range: Range<usize>,
  pub span: Span
}

enum Marker
{
  Reference(AttributeRef),
  /// `@` neither followed by a name nor binding a pattern.
  Stray(Span)
}

/// Locates the attribute references of a fragment. `@` must be directly followed by the name, string literals, char literals and comments are skipped.
pub fn scan_references(fragment: &CodeFragment) -> Vec<AttributeRef> {
  scan_markers(fragment).into_iter()
    .filter_map(|marker| match marker {
      Marker::Reference(reference) => Some(reference),
      Marker::Stray(_) => None
    })
    .collect()
}

/// Spans of the `@` that do not start a reference. A `@` preceded by a name is a Rust pattern binding such as `n @ 1..=5`.
pub fn stray_markers(fragment: &CodeFragment) -> Vec<Span> {
  scan_markers(fragment).into_iter()
    .filter_map(|marker| match marker {
      Marker::Stray(span) => Some(span),
      Marker::Reference(_) => None
    })
    .collect()
}

fn scan_markers(fragment: &CodeFragment) -> Vec<Marker> {
  let text = &fragment.text;
  let mut markers = vec![];
  let mut i = 0;
  while i < text.len() {
    match skip_literal(text, i) {
      Ok(Some(end)) => {
        i = end;
        continue;
      }
      Ok(None) => (),
      Err(_) => break
    }
    let rest = &text[i..];
    let mut chars = rest.chars();
    let c = chars.next().unwrap_or(' ');
    if c == '@' && chars.next().map_or(false, is_ident_start) {
      let len = rest[1..].find(|c: char| !is_ident_char(c)).unwrap_or(rest.len() - 1);
      markers.push(Marker::Reference(AttributeRef {
        name: String::from(&rest[1..1 + len]),
        range: i..i + 1 + len,
        span: fragment.span_at(i)
      }));
      i += 1 + len;
    }
    else {
      if c == '@' && !text[..i].trim_end().ends_with(is_ident_char) {
        markers.push(Marker::Stray(fragment.span_at(i)));
      }
      i += c.len_utf8();
    }
  }
  markers
}

/// Replaces every reference by `rename(name)`.
pub fn rewrite_references<F>(fragment: &CodeFragment, rename: F) -> String where
 F: Fn(&str) -> String
{
  let mut text = String::with_capacity(fragment.text.len());
  let mut last = 0;
  for reference in scan_references(fragment) {
    text.push_str(&fragment.text[last..reference.range.start]);
    text.push_str(&rename(&reference.name));
    last = reference.range.end;
  }
  text.push_str(&fragment.text[last..]);
  text
}

#[cfg(test)]
mod test {
  use super::*;

  fn fragment(text: &str) -> CodeFragment {
    CodeFragment::new(String::from(text), Span::new(2, 10, 20))
  }

  #[test]
  fn test_scan_references() {
    let refs = scan_references(&fragment(r#"@depth += 1; println!("@no {}", '@'); /* @no */ @x.push(@depth)"#));
    let names: Vec<&str> = refs.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["depth", "x", "depth"]);
    assert_eq!(refs[0].range, 0..6);
    assert_eq!(refs[0].span, Span::new(2, 10, 20));
  }

  #[test]
  fn test_pattern_binding_is_not_a_reference() {
    assert!(scan_references(&fragment("match n { x @ 1..=5 => (), _ => () }")).is_empty());
  }

  #[test]
  fn test_stray_markers() {
    let fragment = fragment("@ depth += 1; match n { x @ 1..=5 => '@', _ => @1 }");
    let strays = stray_markers(&fragment);
    assert_eq!(strays.len(), 2);
    assert_eq!(strays[0], fragment.span_at(0));
    assert!(scan_references(&fragment).is_empty());
  }

  #[test]
  fn test_rewrite_references() {
    let text = rewrite_references(&fragment("@depth < limit && @seen.is_empty()"),
      |name| format!("(*__attr_{})", name));
    assert_eq!(text, "(*__attr_depth) < limit && (*__attr_seen).is_empty()");
  }
}
