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

use std::default::Default;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrintLevel
{
  Debug,
  Show,
  Nothing
}

impl PrintLevel
{
  pub fn merge(self, other: PrintLevel) -> PrintLevel {
    use self::PrintLevel::*;
    match (self, other) {
        (Nothing, Debug)
      | (Show, Debug)
      | (Debug, _) => Debug,
        (Nothing, Show)
      | (Show, _) => Show,
      _ => Nothing
    }
  }

  pub fn debug(self) -> bool {
    self == PrintLevel::Debug
  }

  pub fn show(self) -> bool {
    self == PrintLevel::Show
  }
}

impl Default for PrintLevel
{
  fn default() -> PrintLevel {
    PrintLevel::Nothing
  }
}

/// Compilation configuration. Grammar options (`#![show_code]`...) are merged into the options given to `compile_with`, the most verbose print level wins and a grammar `state` overrides the API one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options
{
  pub print_code: PrintLevel,
  pub print_decisions: PrintLevel,
  /// Rust type of the host state threaded through the walk, `()` when absent.
  pub state_type: Option<String>
}

impl Options
{
  pub fn new() -> Options {
    Options::default()
  }

  pub fn with_print_code(mut self, level: PrintLevel) -> Options {
    self.print_code = level;
    self
  }

  pub fn with_print_decisions(mut self, level: PrintLevel) -> Options {
    self.print_decisions = level;
    self
  }

  pub fn with_state_type(mut self, ty: &str) -> Options {
    self.state_type = Some(String::from(ty));
    self
  }
}

#[test]
fn print_level_merge() {
  use self::PrintLevel::*;
  assert_eq!(Nothing.merge(Show), Show);
  assert_eq!(Show.merge(Debug), Debug);
  assert_eq!(Debug.merge(Show), Debug);
  assert_eq!(Show.merge(Nothing), Show);
  assert_eq!(Nothing.merge(Nothing), Nothing);
}
