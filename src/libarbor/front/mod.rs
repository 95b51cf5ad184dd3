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

//! The front end reads the grammar source into a `FGrammar`, the grammar as written.

use crate::diagnostic::Diagnostics;
use self::ast::*;

pub mod ast;
pub mod scanner;
pub mod parser;

#[tracing::instrument(level = "debug", skip_all)]
pub fn parse(cx: &Diagnostics, source: &str) -> Partial<FGrammar> {
  let grammar = parser::Parser::new(cx, source).parse_grammar();
  tracing::debug!(errors = cx.error_count(), "grammar parsed");
  grammar
}
