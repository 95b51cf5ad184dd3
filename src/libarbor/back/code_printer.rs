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
use proc_macro2::TokenStream;
use quote::quote;

/// Logs the generated module if `print_code` asks for it: the whole module in debug mode, the signatures of its public functions otherwise.
pub fn print_code(grammar: &Grammar, grammar_module: &TokenStream) {
  let print_code = grammar.options.print_code;
  if print_code.debug() {
    tracing::info!(grammar = %grammar.name, "generated code:\n{}", grammar_module);
  }
  else if print_code.show() {
    match syn::parse2::<syn::ItemMod>(grammar_module.clone()) {
      Ok(module) => tracing::info!(grammar = %grammar.name, "generated API:\n{}", visible_api(&module)),
      Err(err) => tracing::warn!(grammar = %grammar.name, %err, "generated module cannot be printed")
    }
  }
}

fn visible_api(module: &syn::ItemMod) -> String {
  let mut api = format!("pub mod {} {{\n", module.ident);
  let items = module.content.as_ref().map(|(_, items)| items.as_slice()).unwrap_or(&[]);
  for item in items {
    if let syn::Item::Fn(function) = item {
      if let syn::Visibility::Public(_) = function.vis {
        let sig = &function.sig;
        api.push_str(&format!("  pub {};\n", quote!(#sig)));
      }
    }
  }
  api.push('}');
  api
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_visible_api() {
    let module: syn::ItemMod = syn::parse_quote! {
      pub mod calc {
        pub fn walk_expr<N: TreeNode>(root: &N) -> Result<(), MatchError> { Ok(()) }
        fn expr_alternatives() {}
      }
    };
    let api = visible_api(&module);
    assert!(api.starts_with("pub mod calc {\n  pub fn walk_expr"), "{}", api);
    assert!(!api.contains("expr_alternatives"));
  }
}
