// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

/// Default maximum number of symbols in an alphabet.
pub const DEFAULT_MAX_SYMBOLS: usize = 9;

/// Default maximum number of states of an automaton.
pub const DEFAULT_MAX_STATES: usize = 10;

/// Capacity bounds checked while an automaton is built.
///
/// The bounds are semantic limits: the automaton itself is stored in
/// dynamically sized containers, so raising them only costs memory.
///
/// # Examples
///
/// ```
/// extern crate automata;
///
/// use automata::dfa::limits::Limits;
///
/// fn main() {
///     let limits = Limits::default().max_states(64);
///     assert_eq!(limits.states(), 64);
///     assert_eq!(limits.symbols(), 9);
/// }
/// ```
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct Limits {
    max_symbols : usize,
    max_states  : usize,
}

impl Limits {
    /// Creates limits with the given alphabet and state bounds.
    pub fn new(max_symbols: usize, max_states: usize) -> Limits {
        Limits{max_symbols: max_symbols, max_states: max_states}
    }

    /// Replaces the maximum alphabet length.
    pub fn max_symbols(mut self, max_symbols: usize) -> Limits {
        self.max_symbols = max_symbols;
        self
    }

    /// Replaces the maximum number of states.
    pub fn max_states(mut self, max_states: usize) -> Limits {
        self.max_states = max_states;
        self
    }

    /// Maximum alphabet length.
    pub fn symbols(&self) -> usize {
        self.max_symbols
    }

    /// Maximum number of states, also the bound on the accepting state count.
    pub fn states(&self) -> usize {
        self.max_states
    }
}

impl Default for Limits {
    fn default() -> Limits {
        Limits::new(DEFAULT_MAX_SYMBOLS, DEFAULT_MAX_STATES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.symbols(), DEFAULT_MAX_SYMBOLS);
        assert_eq!(limits.states(), DEFAULT_MAX_STATES);
    }

    #[test]
    fn test_override_limits() {
        let limits = Limits::default().max_symbols(26).max_states(100);
        assert_eq!(limits, Limits::new(26, 100));
    }
}
