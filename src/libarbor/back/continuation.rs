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

use crate::back::context::Context;
use proc_macro2::TokenStream;

/// The code running once an expression matched. Expressions are compiled right to left so every element knows what follows it, labels bound by an element stay in scope for the rest of its sequence.
pub struct Continuation
{
  success: TokenStream
}

impl Continuation
{
  pub fn new(success: TokenStream) -> Self {
    Continuation {
      success
    }
  }

  pub fn empty() -> Self {
    Continuation::new(TokenStream::new())
  }

  pub fn compile_success(self, context: &mut Context, idx: usize) -> Self {
    self.map_success(|success| context.compile(idx, success))
  }

  pub fn map_success<F>(mut self, f: F) -> Self where
   F: FnOnce(TokenStream) -> TokenStream
  {
    self.success = f(self.success);
    self
  }

  pub fn unwrap_success(self) -> TokenStream {
    self.success
  }
}
