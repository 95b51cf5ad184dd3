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

//! Test framework for grammars that the compiler should accept or reject.
//! The grammars are in the directory `data/test/` at the root of this project, one directory per suite. Each suite has two directories:
//! * `run-pass`: every grammar compiles without errors.
//! * `run-fail`: every grammar is rejected with at least one error.
//! A grammar starting with `// expect: Name` lines must additionally report a diagnostic named `Name` (e.g. `AmbiguityWarning`).

use arbor::{Compilation, Diagnostic};

use std::fs::{read_dir, read_to_string};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use term::{color, StdoutTerminal, Terminal};
use crate::ExpectedResult::*;

#[test]
fn test_data_directory() {
  let data_path = Path::new("data/");
  if !data_path.is_dir() {
    panic!("`{}` is not a valid data directory.", data_path.display());
  }
  let mut test_engine = TestEngine::new(data_path.join("test"));
  test_engine.register("analysis");
  test_engine.register("scoping");
  test_engine.run();
}

struct TestEngine
{
  test_path: PathBuf,
  suites: Vec<String>,
  display: TestDisplay
}

impl TestEngine
{
  fn new(test_path: PathBuf) -> TestEngine {
    if !test_path.is_dir() {
      panic!("`{}` is not a valid grammar directory.", test_path.display());
    }
    TestEngine {
      test_path,
      suites: Vec::new(),
      display: TestDisplay::new()
    }
  }

  fn register(&mut self, suite: &str) {
    self.suites.push(String::from(suite));
  }

  fn run(&mut self) {
    self.display.title("    Arbor grammar tests suite");
    for suite in &self.suites {
      let suite_path = self.test_path.join(suite);
      self.display.info(format!("Start tests of the suite `{}`", suite));
      self.display.path(&suite_path);
      let mut test = Test { display: &mut self.display };
      test.test_directory(format!("Run and Pass tests of `{}`", suite),
        suite_path.join("run-pass"), Accepted);
      test.test_directory(format!("Run and Fail tests of `{}`", suite),
        suite_path.join("run-fail"), Rejected);
    }
    self.display.stats();
    self.display.panic_if_failure();
  }
}

#[derive(Clone, Copy, Debug)]
enum ExpectedResult
{
  Accepted,
  Rejected
}

struct Test<'a>
{
  display: &'a mut TestDisplay
}

impl<'a> Test<'a>
{
  fn test_directory(&mut self, start_msg: String, directory: PathBuf, expectation: ExpectedResult) {
    self.display.info(start_msg);
    let entries = match read_dir(&directory) {
      Ok(entries) => entries,
      Err(io_err) => {
        self.display.fs_error("Can't read the directory.", &directory, &io_err);
        return;
      }
    };
    let mut paths: Vec<PathBuf> = entries
      .filter_map(|entry| entry.ok().map(|entry| entry.path()))
      .filter(|path| path.extension().map_or(false, |ext| ext == "tg"))
      .collect();
    paths.sort();
    for path in paths {
      match read_to_string(&path) {
        Ok(source) => self.test_grammar(&source, expectation, &path),
        Err(io_err) => self.display.fs_error("Can't read the file.", &path, &io_err)
      }
    }
  }

  fn test_grammar(&mut self, source: &str, expectation: ExpectedResult, path: &Path) {
    let test_name = file_name(path);
    let compilation = arbor::compile(source);
    let missing: Vec<String> = expected_diagnostics(source).into_iter()
      .filter(|name| !compilation.diagnostics.iter().any(|d| d.kind.name() == name))
      .collect();
    let verdict = match expectation {
      Accepted => compilation.is_success(),
      Rejected => !compilation.is_success() && compilation.code.is_none()
    };
    if verdict && missing.is_empty() {
      self.display.success(test_name);
    }
    else {
      self.display.failure(path, test_name, expectation, &compilation, &missing);
    }
  }
}

/// Names listed in the leading `// expect: Name` lines.
fn expected_diagnostics(source: &str) -> Vec<String> {
  source.lines()
    .map(str::trim)
    .take_while(|line| line.starts_with("//"))
    .filter_map(|line| line.trim_start_matches('/').trim().strip_prefix("expect:"))
    .map(|name| String::from(name.trim()))
    .collect()
}

fn file_name(path: &Path) -> String {
  path.file_name()
    .map(|name| name.to_string_lossy().into_owned())
    .unwrap_or_default()
}

struct TestDisplay
{
  terminal: Option<Box<StdoutTerminal>>,
  num_success: u32,
  num_failure: u32,
  num_system_failure: u32
}

impl TestDisplay
{
  pub fn new() -> TestDisplay {
    TestDisplay {
      terminal: term::stdout(),
      num_success: 0,
      num_failure: 0,
      num_system_failure: 0
    }
  }

  pub fn title(&mut self, msg: &str) {
    self.write_header(color::CYAN, msg);
    self.write_msg("\n\n");
  }

  pub fn info(&mut self, msg: String) {
    self.write_line(color::CYAN, "\n[ info ] ", msg);
  }

  pub fn error(&mut self, msg: String) {
    self.write_line(color::RED, "  [ error ] ", msg);
  }

  pub fn path(&mut self, path: &Path) {
    self.write_line(color::CYAN, "  [ path ] ", format!("{}", path.display()));
  }

  pub fn stats(&mut self) {
    let system_failure_plural = if self.num_system_failure > 1 { "s" } else { "" };
    let msg = format!("{} passed, {} failed, {} system failure{}.",
      self.num_success, self.num_failure, self.num_system_failure,
      system_failure_plural);
    self.write_line(color::BLUE, "\n\n[ stats ] ", msg);
  }

  pub fn panic_if_failure(&self) {
    if self.num_failure > 0 || self.num_system_failure > 0 {
      panic!("{} grammar tests failed", self.num_failure + self.num_system_failure);
    }
  }

  pub fn failure(&mut self, path: &Path, test_name: String, expectation: ExpectedResult,
    compilation: &Compilation, missing: &[String])
  {
    self.num_failure += 1;
    self.write_line(color::RED, "[ failed ] ", test_name);
    self.path(path);
    self.expected(expectation);
    for name in missing {
      self.error(format!("missing diagnostic `{}`", name));
    }
    self.diagnostics(&compilation.diagnostics);
  }

  fn expected(&mut self, expectation: ExpectedResult) {
    let msg = match expectation {
      Accepted => "Accepted",
      Rejected => "Rejected"
    };
    self.write_line(color::CYAN, "  [ expected ] ", String::from(msg));
  }

  fn diagnostics(&mut self, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
      self.error(String::from("no diagnostic reported"));
    }
    for diagnostic in diagnostics {
      self.error(format!("{}", diagnostic));
    }
  }

  pub fn success(&mut self, test_name: String) {
    self.num_success += 1;
    self.write_line(color::GREEN, "[ passed ] ", test_name);
  }

  pub fn fs_error(&mut self, msg: &str, path: &Path, io_err: &io::Error) {
    self.system_failure(String::from(msg));
    self.path(path);
    self.error(format!("{}", io_err));
  }

  pub fn system_failure(&mut self, msg: String) {
    self.num_system_failure += 1;
    self.write_line(color::RED, "[ system error ] ", msg);
  }

  fn write_line(&mut self, color: color::Color, header: &str, msg: String) {
    self.write_header(color, header);
    self.write_msg(msg.as_str());
    self.write_msg("\n");
  }

  fn write_header(&mut self, color: color::Color, header: &str) {
    if let Some(terminal) = self.terminal.as_mut() {
      let _ = terminal.fg(color);
    }
    self.write_msg(header);
    if let Some(terminal) = self.terminal.as_mut() {
      let _ = terminal.reset();
    }
  }

  fn write_msg(&mut self, msg: &str) {
    match self.terminal.as_mut() {
      Some(terminal) => { let _ = write!(terminal, "{}", msg); }
      None => print!("{}", msg)
    }
  }
}
