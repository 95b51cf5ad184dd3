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

//! Dispatch at a decision point.
//!
//! Alternatives are tried in declaration order: an alternative is chosen if the label of the current node is in its prediction set and its guard, if any, holds. The chain is `if c1 { alt1 } else if c2 { alt2 } … else { fallback }`, a lookahead set with labels `A`, `B` and the end of the list is tested with `matches!(la, Some("A" | "B") | None)`.

use crate::back::compiler::*;
use crate::middle::lookahead::set::*;
use quote::quote;

pub struct DecisionCompiler<'d>
{
  decision: &'d DecisionPoint,
  alternatives: &'d [Alternative]
}

impl<'d> DecisionCompiler<'d>
{
  pub fn new(decision: &'d DecisionPoint, alternatives: &'d [Alternative]) -> DecisionCompiler<'d> {
    DecisionCompiler {
      decision, alternatives
    }
  }

  /// Peeks the current label and runs the first viable alternative, or `fallback` if none is.
  pub fn dispatch(&self, context: &mut Context, fallback: Option<TokenStream>) -> TokenStream {
    let cursor = context.cursor();
    let branches: Vec<TokenStream> = self.alternatives.iter().enumerate()
      .map(|(idx, alt)| {
        let condition = self.condition(context, idx, alt);
        let body = context.compile_sequence(&alt.elements, Continuation::empty());
        quote!(if #condition { #body })
      })
      .collect();
    let fallback = fallback.map(|fallback| quote!(else { #fallback }));
    quote! {
      let la = #cursor.peek_label();
      #(#branches)else*
      #fallback
    }
  }

  fn condition(&self, context: &Context, idx: usize, alt: &Alternative) -> TokenStream {
    let prediction = lookahead_test(&self.decision.candidates[idx].prediction);
    match &alt.guard {
      Some(guard) => {
        let guard = context.predicate_condition(guard);
        quote!(#prediction && (#guard))
      }
      None => prediction
    }
  }

  /// Error raised when no alternative is chosen: a structural mismatch if the label predicts nothing, otherwise every guard failed.
  pub fn error(&self, context: &Context) -> TokenStream {
    let cursor = context.cursor();
    let rule = context.rule_name();
    let viable = self.decision.viable();
    let expected = viable.expected();
    let mismatch = quote!(walker.mismatch(#cursor, #rule, &[#(#expected),*]));
    if self.decision.has_guards() {
      let id = self.decision.id;
      let in_prediction = lookahead_test(&viable);
      quote! {
        return Err(if #in_prediction {
          walker.no_viable_alternative(#cursor, #rule, #id)
        }
        else {
          #mismatch
        });
      }
    }
    else {
      quote!(return Err(#mismatch);)
    }
  }
}

/// A boolean expression testing the label `la` against `set`.
pub fn lookahead_test(set: &LookaheadSet) -> TokenStream {
  let mut patterns = vec![];
  if set.any {
    patterns.push(quote!(Some(_)));
  }
  else if !set.labels.is_empty() {
    let labels = set.labels.iter().map(String::as_str);
    patterns.push(quote!(Some(#(#labels)|*)));
  }
  if set.end {
    patterns.push(quote!(None));
  }
  if patterns.is_empty() {
    quote!(false)
  }
  else {
    quote!(::std::matches!(la, #(#patterns)|*))
  }
}
