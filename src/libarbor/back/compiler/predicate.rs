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
use quote::quote;

/// A predicate in the middle of a sequence, the walk fails if it does not hold. Guards are compiled with the decision they take part in.
pub struct PredicateCompiler
{
  predicate: CodeFragment
}

impl PredicateCompiler
{
  pub fn new(predicate: CodeFragment) -> PredicateCompiler {
    PredicateCompiler {
      predicate
    }
  }
}

impl CompileExpr for PredicateCompiler
{
  fn compile_expr(&self, context: &mut Context, continuation: Continuation) -> TokenStream {
    let cursor = context.cursor();
    let rule = context.rule_name();
    let text = self.predicate.trimmed();
    let condition = context.predicate_condition(&self.predicate);
    continuation
      .map_success(|success| quote! {
        if !(#condition) {
          return Err(walker.failed_predicate(#cursor, #rule, #text));
        }
        #success
      })
      .unwrap_success()
  }
}
