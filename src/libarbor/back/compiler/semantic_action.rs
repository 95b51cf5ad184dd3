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
use crate::back::fragment::Access;
use quote::quote;

pub struct SemanticActionCompiler
{
  action: CodeFragment
}

impl SemanticActionCompiler
{
  pub fn new(action: CodeFragment) -> SemanticActionCompiler {
    SemanticActionCompiler {
      action
    }
  }
}

impl CompileExpr for SemanticActionCompiler
{
  fn compile_expr(&self, context: &mut Context, continuation: Continuation) -> TokenStream {
    let (guards, text) = context.bind_attributes(&self.action, Access::Exclusive);
    let action = context.lex(&self.action, &text);
    continuation
      .map_success(|success| quote! {
        {
          #guards
          let _ = { #action };
        }
        #success
      })
      .unwrap_success()
  }
}
