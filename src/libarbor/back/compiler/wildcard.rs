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

pub struct WildcardCompiler
{
  expr_idx: usize
}

impl WildcardCompiler
{
  pub fn new(expr_idx: usize) -> WildcardCompiler {
    WildcardCompiler {
      expr_idx
    }
  }
}

impl CompileExpr for WildcardCompiler
{
  fn compile_expr(&self, context: &mut Context, continuation: Continuation) -> TokenStream {
    let cursor = context.cursor();
    let rule = context.rule_name();
    let any = context.bind(self.expr_idx, quote!(walker.wildcard(#cursor, #rule)?));
    continuation
      .map_success(|success| quote! {
        #any
        #success
      })
      .unwrap_success()
  }
}
