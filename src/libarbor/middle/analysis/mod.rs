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
use crate::diagnostic::*;
use crate::front::ast::FGrammar;
use self::duplicate::*;
use self::undeclared::*;
use self::attribute::*;
use self::rust_fragment::*;
use self::well_formedness::*;
use self::unused_rule::*;

mod duplicate;
mod undeclared;
mod attribute;
mod rust_fragment;
mod well_formedness;
mod unused_rule;

/// The unused rule lint is skipped when a rule is malformed, its callees would be reported.
pub fn analyse(cx: &Diagnostics, fgrammar: FGrammar, options: Options) -> Partial<Grammar> {
  let malformed = fgrammar.is_malformed();
  rule_duplicate(cx, fgrammar)
    .and_then(|fgrammar| attribute_duplicate(cx, fgrammar))
    .and_then(|fgrammar| UndeclaredSymbol::analyse(cx, fgrammar))
    .map(|fgrammar| decorate_with_options(cx, fgrammar, options))
    .and_then(|grammar| validate_fragments(cx, grammar))
    .and_then(|grammar| WellFormedness::analyse(cx, grammar))
    .map(|grammar| if malformed { grammar } else { unused_rule(cx, grammar) })
}
