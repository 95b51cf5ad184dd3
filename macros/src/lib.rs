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

//! `tree_grammar!` compiles a tree grammar at build time and expands to the generated module.
//!
//! ```ignore
//! arbor_macros::tree_grammar!(r#"
//!   tree grammar calc;
//!   tokens { PLUS, INT }
//!   pub expr : #(PLUS expr expr) | INT ;
//! "#);
//!
//! let tree: arbor_runtime::Tree = "(PLUS (INT 1) (INT 2))".parse().unwrap();
//! calc::walk_expr(&mut arbor_runtime::Walker::new(), &mut (), &tree).unwrap();
//! ```
//!
//! The crate using the macro must depend on `arbor_runtime`. Every error of the grammar becomes a `compile_error!`.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote_spanned;
use std::str::FromStr;
use syn::{parse_macro_input, LitStr};

#[proc_macro]
pub fn tree_grammar(input: TokenStream) -> TokenStream {
  let source = parse_macro_input!(input as LitStr);
  expand(&source).into()
}

fn expand(source: &LitStr) -> proc_macro2::TokenStream {
  let compilation = arbor::compile(&source.value());
  match compilation.code {
    Some(code) => {
      proc_macro2::TokenStream::from_str(&code)
        .unwrap_or_else(|err| compile_error(source.span(), format!("generated code is not valid Rust: {:?}", err)))
    }
    None => {
      compilation.errors()
        .map(|diagnostic| compile_error(source.span(), format!("grammar {}", diagnostic)))
        .collect()
    }
  }
}

fn compile_error(span: Span, msg: String) -> proc_macro2::TokenStream {
  quote_spanned!(span=> compile_error!(#msg);)
}
