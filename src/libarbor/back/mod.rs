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

//! The back end generates the module of matching procedures from the analysed grammar.

use crate::ast::*;
use crate::diagnostic::Diagnostics;

mod code_printer;
mod compiler;
mod context;
mod continuation;
mod fragment;
mod name_factory;

#[tracing::instrument(level = "debug", skip_all, fields(grammar = %grammar.name))]
pub fn compile(cx: &Diagnostics, grammar: Grammar) -> Partial<String> {
  let code = compiler::GrammarCompiler::compile(cx, &grammar);
  if let Partial::Value(code) = &code {
    tracing::debug!(bytes = code.len(), "code generated");
  }
  code
}
