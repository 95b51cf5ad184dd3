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

//! Runtime support of the tree walkers generated by Arbor.
//!
//! A generated matching procedure receives a `Walker` (error handlers and recursion accounting), the host `State`, a `Cursor` over the sibling list being matched and the `Frame` of its caller. Trees are accessed through the `TreeNode` trait, `Tree` is a ready-to-use implementation with an s-expression reader.

pub use tree::*;
pub use cursor::*;
pub use frame::*;
pub use walker::*;
pub use match_error::*;

pub mod tree;
pub mod cursor;
pub mod frame;
pub mod walker;
pub mod match_error;

/// Name reported in expected lists when the end of a sibling list is expected.
pub const END_OF_CHILDREN: &str = "<end of children>";
/// Name reported in expected lists when any node is accepted.
pub const ANY_NODE: &str = "<any node>";
