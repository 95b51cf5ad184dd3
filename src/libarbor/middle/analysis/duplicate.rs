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
use crate::front::ast::FGrammar;
use partial::Partial::*;
use std::collections::HashMap;
use std::mem;

/// Rejects rules defined twice. The first definition is kept so the analysis can go on.
pub fn rule_duplicate(cx: &Diagnostics, mut grammar: FGrammar) -> Partial<FGrammar> {
  let rules = mem::take(&mut grammar.rules);
  DuplicateItem::analyse(cx, rules.into_iter(), DiagnosticKind::DuplicateRule, "rule")
    .map(move |rules| { grammar.rules = rules; grammar })
}

/// Rejects attributes declared twice by a rule, the return value counting as an attribute of its rule.
pub fn attribute_duplicate(cx: &Diagnostics, mut grammar: FGrammar) -> Partial<FGrammar> {
  let mut has_duplicate = false;
  for rule in &mut grammar.rules {
    let attributes = mem::take(&mut rule.attributes);
    rule.attributes = match DuplicateItem::analyse(cx, attributes.into_iter(),
      DiagnosticKind::DuplicateAttribute, "attribute")
    {
      Value(attributes) => attributes,
      Fake(attributes) => {
        has_duplicate = true;
        attributes
      }
      Nothing => vec![]
    };
    if let Some(returns) = &rule.returns {
      if let Some(attribute) = rule.attribute(returns.name.as_str()) {
        cx.multi_locations_err(DiagnosticKind::DuplicateAttribute, vec![
          (returns.span(),
          format!("return value `{}` of rule `{}` has the same name as one of its attributes",
            returns.name, rule.name)),
          (attribute.span(),
          format!("attribute `{}` declared here", attribute.name))]);
        has_duplicate = true;
      }
    }
  }
  if has_duplicate {
    Fake(grammar)
  }
  else {
    Value(grammar)
  }
}

struct DuplicateItem<'a, Item>
{
  cx: &'a Diagnostics,
  items: Vec<Item>,
  index_of: HashMap<Ident, usize>,
  has_duplicate: bool,
  kind: DiagnosticKind,
  what_is_duplicated: &'static str
}

impl<'a, Item> DuplicateItem<'a, Item> where
 Item: ItemIdent + ItemSpan
{
  pub fn analyse<ItemIter>(cx: &'a Diagnostics, iter: ItemIter, kind: DiagnosticKind,
    item_kind: &'static str) -> Partial<Vec<Item>> where
   ItemIter: Iterator<Item=Item>
  {
    let (min_size, _) = iter.size_hint();
    DuplicateItem {
      cx,
      items: Vec::with_capacity(min_size),
      index_of: HashMap::with_capacity(min_size),
      has_duplicate: false,
      kind,
      what_is_duplicated: item_kind
    }.populate(iter)
     .make()
  }

  fn populate<ItemIter: Iterator<Item=Item>>(mut self, iter: ItemIter) -> DuplicateItem<'a, Item> {
    for item in iter {
      let ident = item.ident();
      match self.index_of.get(&ident) {
        Some(&pre) => {
          self.duplicate_items(&self.items[pre], item);
          self.has_duplicate = true;
        }
        None => {
          self.index_of.insert(ident, self.items.len());
          self.items.push(item);
        }
      }
    }
    self
  }

  fn duplicate_items(&self, pre: &Item, current: Item) {
    self.cx.multi_locations_err(self.kind, vec![
      (current.span(),
      format!("duplicate definition of {} with name `{}`", self.what_is_duplicated, current.ident())),
      (pre.span(),
      format!("previous definition of `{}` here", pre.ident()))]
    );
  }

  fn make(self) -> Partial<Vec<Item>> {
    if self.has_duplicate {
      Fake(self.items)
    }
    else {
      Value(self.items)
    }
  }
}
