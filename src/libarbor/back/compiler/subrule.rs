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
use quote::quote;

/// `( … )`, `( … )?`, `( … )*` and `( … )+`. The continue branch of a repetition is tried first, the loop exits when no alternative is viable.
pub struct SubruleCompiler
{
  expr_idx: usize,
  kind: SubruleKind,
  alternatives: Vec<Alternative>
}

impl SubruleCompiler
{
  pub fn new(expr_idx: usize, kind: SubruleKind, alternatives: Vec<Alternative>) -> SubruleCompiler {
    SubruleCompiler {
      expr_idx, kind, alternatives
    }
  }

  fn compile_decision(&self, context: &mut Context, decision: &DecisionPoint) -> TokenStream {
    let decision = DecisionCompiler::new(decision, &self.alternatives);
    match self.kind {
      SubruleKind::Block => {
        let error = decision.error(context);
        let dispatch = decision.dispatch(context, Some(error));
        quote!({ #dispatch })
      }
      SubruleKind::Optional => {
        let dispatch = decision.dispatch(context, None);
        quote!({ #dispatch })
      }
      SubruleKind::Star => {
        let dispatch = decision.dispatch(context, Some(quote!(break;)));
        quote!(loop { #dispatch })
      }
      SubruleKind::Plus => {
        let matched = context.next_counter_name();
        let error = decision.error(context);
        let dispatch = decision.dispatch(context, Some(quote! {
          if #matched > 0 {
            break;
          }
          #error
        }));
        quote!({
          let mut #matched = 0usize;
          loop {
            #dispatch
            #matched += 1;
          }
        })
      }
    }
  }
}

impl CompileExpr for SubruleCompiler
{
  fn compile_expr(&self, context: &mut Context, continuation: Continuation) -> TokenStream {
    let subrule = match context.grammar().decision_of_expr(self.expr_idx) {
      Some(decision) => self.compile_decision(context, decision),
      None => {
        let sequences: Vec<TokenStream> = self.alternatives.iter()
          .map(|alt| context.compile_sequence(&alt.elements, Continuation::empty()))
          .collect();
        quote!({ #(#sequences)* })
      }
    };
    continuation
      .map_success(|success| quote! {
        #subrule
        #success
      })
      .unwrap_success()
  }
}
