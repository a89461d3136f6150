// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

#![deny(warnings, missing_docs)]

//! Documentation for automaton api
//!
//! A deterministic finite automaton is read from text by
//! `dfa::reader::AutomatonReader` and run over input strings with
//! `dfa::core::Automaton::run`.

/// dfa api
pub mod dfa;
