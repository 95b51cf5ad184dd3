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

mod grammar;
mod rule;
mod node_match;
mod token;
mod wildcard;
mod non_terminal;
mod subrule;
mod decision;
mod semantic_action;
mod predicate;

pub use crate::back::compiler::grammar::*;
pub use crate::back::context::*;
use crate::ast::*;
use crate::ast::Expression::*;
use crate::back::compiler::node_match::*;
use crate::back::compiler::token::*;
use crate::back::compiler::wildcard::*;
use crate::back::compiler::non_terminal::*;
use crate::back::compiler::subrule::*;
use crate::back::compiler::semantic_action::*;
use crate::back::compiler::predicate::*;
use proc_macro2::TokenStream;

pub trait CompileExpr
{
  fn compile_expr(&self, context: &mut Context, continuation: Continuation) -> TokenStream;
}

pub fn expr_compiler(grammar: &Grammar, idx: usize) -> Box<dyn CompileExpr> {
  match grammar.expr_by_index(idx) {
    NodeMatch(label, children) => Box::new(NodeMatchCompiler::new(idx, label, children)),
    TokenMatch(token) => Box::new(TokenMatchCompiler::new(idx, token)),
    Wildcard => Box::new(WildcardCompiler::new(idx)),
    RuleRef(rule, args) => Box::new(NonTerminalCompiler::new(idx, rule, args)),
    Subrule(kind, alternatives) => Box::new(SubruleCompiler::new(idx, kind, alternatives)),
    SemanticAction(action) => Box::new(SemanticActionCompiler::new(action)),
    Predicate(predicate) => Box::new(PredicateCompiler::new(predicate))
  }
}
