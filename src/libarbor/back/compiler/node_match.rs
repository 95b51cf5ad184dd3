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

/// `#(LABEL children…)`: the node is consumed, then its children are matched with their own cursor which must be exhausted afterwards.
pub struct NodeMatchCompiler
{
  expr_idx: usize,
  label: Ident,
  children: Vec<usize>
}

impl NodeMatchCompiler
{
  pub fn new(expr_idx: usize, label: Ident, children: Vec<usize>) -> NodeMatchCompiler {
    NodeMatchCompiler {
      expr_idx, label, children
    }
  }
}

impl CompileExpr for NodeMatchCompiler
{
  fn compile_expr(&self, context: &mut Context, continuation: Continuation) -> TokenStream {
    let cursor = context.cursor();
    let rule = context.rule_name();
    let label = self.label.as_str();
    let node = context.next_node_name();
    let children_cursor = context.next_cursor_name();
    let bind_node = context.grammar().expr_label(self.expr_idx)
      .map(|name| {
        let name = crate::back::name_factory::rust_ident(name);
        quote!(let #name = #node;)
      });
    let success = continuation.unwrap_success();
    let exhausted = Continuation::new(quote! {
      walker.expect_end(#children_cursor, #rule)?;
      #success
    });
    let children = context.with_cursor(children_cursor.clone(),
      |context| context.compile_sequence(&self.children, exhausted));
    quote! {
      let #node = walker.expect(#cursor, #rule, #label)?;
      #bind_node
      let mut #children_cursor = Cursor::children(#node);
      let #children_cursor = &mut #children_cursor;
      #children
    }
  }
}
