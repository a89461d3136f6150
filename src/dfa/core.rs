// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::BTreeSet;
use std::fmt;                          // Formatter, format!, Display, Debug, write!
use std::error;
use std::result;

use itertools::Itertools;              // join

use crate::dfa::limits::Limits;

/// The `BuildError` type.
#[derive(Debug,Clone,PartialEq,Eq)]
pub enum BuildError {
    /// The alphabet contains no symbol.
    EmptyAlphabet,
    /// The alphabet has `usize` symbols but at most `usize` are allowed.
    AlphabetTooLong(usize,usize),
    /// The symbol `char` appears twice in the alphabet.
    DuplicateSymbol(char),
    /// The alphabet is defined twice.
    DuplicatedAlphabet,
    /// The alphabet must be defined before the number of states.
    MissingAlphabet,
    /// The number of states is `usize` but must lie in `[1, usize]`.
    InvalidStateCount(usize,usize),
    /// The number of states is defined twice.
    DuplicatedStateCount,
    /// The number of states must be defined before the states are used.
    MissingStateCount,
    /// The accepting state `usize` is not a state of the automaton.
    InvalidAcceptState(usize),
    /// The symbol `char` does not belong to the alphabet.
    UnknownSymbol(char),
    /// The transition from state `usize` with symbol `char` goes to the
    /// state `usize` which does not exist.
    InvalidTransition(char,usize,usize),
    /// The transition from state `usize` with symbol `char` is defined twice.
    DuplicatedTransition(char,usize),
    /// No transition from state `usize` with symbol `char` is defined.
    MissingTransition(char,usize),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            BuildError::EmptyAlphabet => write!(f, "Empty alphabet."),
            BuildError::AlphabetTooLong(len,max) => write!(f, "Alphabet of {} symbols exceeds the maximum of {}.", len, max),
            BuildError::DuplicateSymbol(symb) => write!(f, "Symbol '{}' appears twice in the alphabet.", symb),
            BuildError::DuplicatedAlphabet => write!(f, "Duplicated alphabet."),
            BuildError::MissingAlphabet => write!(f, "Missing alphabet."),
            BuildError::InvalidStateCount(count,max) => write!(f, "Invalid number of states {} (expected 1 to {}).", count, max),
            BuildError::DuplicatedStateCount => write!(f, "Duplicated number of states."),
            BuildError::MissingStateCount => write!(f, "Missing number of states."),
            BuildError::InvalidAcceptState(state) => write!(f, "Accepting state {} does not exist.", state),
            BuildError::UnknownSymbol(symb) => write!(f, "Symbol '{}' is not in the alphabet.", symb),
            BuildError::InvalidTransition(symb,src,dest) => write!(f, "Transition ('{}',{}) targets unknown state {}.", symb, src, dest),
            BuildError::DuplicatedTransition(symb,src) => write!(f, "Duplicated transition ('{}',{}).", symb, src),
            BuildError::MissingTransition(symb,src) => write!(f, "Missing transition ('{}',{}).", symb, src),
        }
    }
}

impl error::Error for BuildError {}

/// Alias for result::Result<T,BuildError>.
pub type Result<T> = result::Result<T,BuildError>;

/// Outcome of running an automaton over an input string.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum Verdict {
    /// The input ends in an accepting state.
    Accepted,
    /// The input ends in a non-accepting state or contains an unknown symbol.
    Rejected,
}

impl Verdict {
    /// Returns `true` for `Verdict::Accepted`.
    pub fn is_accepted(&self) -> bool {
        *self == Verdict::Accepted
    }
}

impl From<bool> for Verdict {
    fn from(accepted: bool) -> Verdict {
        if accepted { Verdict::Accepted } else { Verdict::Rejected }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Verdict::Accepted => write!(f, "Accepted"),
            Verdict::Rejected => write!(f, "Rejected"),
        }
    }
}

/// An input symbol that does not belong to the alphabet.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct InvalidSymbol {
    /// The offending symbol.
    pub symbol   : char,
    /// Position of the symbol in the input, counted in chars.
    pub position : usize,
}

impl fmt::Display for InvalidSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Symbol '{}' at position {} is not in the alphabet.", self.symbol, self.position)
    }
}

impl error::Error for InvalidSymbol {}

/// The type `Automaton` represents a Deterministic Finite Automaton whose
/// start state is `0`. The transition function is total: the table holds one
/// valid target for every (state, symbol) pair, stored row by row.
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct Automaton {
    alphabet    : Vec<char>,
    state_count : usize,
    accepting   : BTreeSet<usize>,
    table       : Vec<usize>,
}

/// The `AutomatonBuilder` follows the builder pattern and validates every
/// piece of an `Automaton` as it is added. The builder is moved at each call
/// so it is necessary to bind to a new variable the return value for each
/// function of the builder.
///
/// The alphabet must be added first, then the number of states, then the
/// accepting states and transitions in any order.
///
/// # Errors
///
/// Return an error if a limit is exceeded, if a state or a symbol is unknown,
/// or if a transition is missing when the automaton is finalized.
///
/// # Examples
///
/// ```
/// extern crate automata;
///
/// use automata::dfa::core::*;
///
/// fn main() {
///     // words over {a,b} with an odd number of b
///     let dfa = AutomatonBuilder::new()
///         .add_alphabet("ab")
///         .add_states(2)
///         .add_final(1)
///         .add_transition('a', 0, 0)
///         .add_transition('b', 0, 1)
///         .add_transition('a', 1, 1)
///         .add_transition('b', 1, 0)
///         .finalize()
///         .unwrap();
///     assert_eq!(dfa.run("abab"), Verdict::Rejected);
///     assert_eq!(dfa.run("abbb"), Verdict::Accepted);
/// }
/// ```
///
/// ```
/// extern crate automata;
///
/// use automata::dfa::core::*;
///
/// fn main() {
///     let dfa = AutomatonBuilder::new()
///         .add_alphabet("ab")
///         .add_states(2)
///         .add_transition('a', 0, 1)
///         .finalize();
///     match dfa {
///         Err(BuildError::MissingTransition(symb,src)) => assert!((symb,src)==('b',0)),
///         _ => assert!(false),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct AutomatonBuilder {
    limits      : Limits,
    alphabet    : Vec<char>,
    state_count : Option<usize>,
    accepting   : BTreeSet<usize>,
    cells       : Vec<Option<usize>>,
}

/// AutomatonBuilding is the trait assiociated to the AutomatonBuilder type.
///
/// It is implemented both for the builder and for `Result<AutomatonBuilder>`
/// so that calls can be chained without unwrapping at each stage.
///
/// # Errors
///
/// If self contains a BuildError then each function should transfer this error.
pub trait AutomatonBuilding {
    /// Defines the alphabet, one symbol per char.
    ///
    /// # Errors
    ///
    /// Return `EmptyAlphabet`, `AlphabetTooLong`, `DuplicateSymbol` or
    /// `DuplicatedAlphabet`.
    fn add_alphabet(self, alphabet: &str) -> Result<AutomatonBuilder>;

    /// Defines the number of states. The alphabet must already be defined.
    ///
    /// # Errors
    ///
    /// Return `InvalidStateCount` if `count` is zero or above the limit.
    fn add_states(self, count: usize) -> Result<AutomatonBuilder>;

    /// Marks a state as accepting. Adding a state twice has no effect.
    fn add_final(self, state: usize) -> Result<AutomatonBuilder>;

    /// Adds the transition `src --symb--> dest`.
    ///
    /// # Errors
    ///
    /// Return a `DuplicatedTransition(symb,src)` if a transition with the same
    /// symb and src has already been inserted, even if the destination state
    /// is the same.
    fn add_transition(self, symb: char, src: usize, dest: usize) -> Result<AutomatonBuilder>;

    /// Finalize the building of the automaton.
    ///
    /// # Errors
    ///
    /// Return `MissingTransition` for the first (state, symbol) pair without
    /// a transition.
    fn finalize(self) -> result::Result<Automaton,BuildError>;
}

impl AutomatonBuilder {
    /// Creates a new AutomatonBuilder with the default limits.
    pub fn new() -> Result<AutomatonBuilder> {
        AutomatonBuilder::with_limits(Limits::default())
    }

    /// Creates a new AutomatonBuilder checked against `limits`.
    pub fn with_limits(limits: Limits) -> Result<AutomatonBuilder> {
        Ok(AutomatonBuilder{
            limits      : limits,
            alphabet    : Vec::new(),
            state_count : None,
            accepting   : BTreeSet::new(),
            cells       : Vec::new(),
        })
    }

    /// The limits the builder checks against.
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// The alphabet defined so far, empty until `add_alphabet` succeeds.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// The number of states, once defined.
    pub fn state_count(&self) -> Option<usize> {
        self.state_count
    }

    fn states(&self) -> Result<usize> {
        self.state_count.ok_or(BuildError::MissingStateCount)
    }
}

impl AutomatonBuilding for AutomatonBuilder {
    fn add_alphabet(self, alphabet: &str) -> Result<AutomatonBuilder> {
        Ok(self).add_alphabet(alphabet)
    }

    fn add_states(self, count: usize) -> Result<AutomatonBuilder> {
        Ok(self).add_states(count)
    }

    fn add_final(self, state: usize) -> Result<AutomatonBuilder> {
        Ok(self).add_final(state)
    }

    fn add_transition(self, symb: char, src: usize, dest: usize) -> Result<AutomatonBuilder> {
        Ok(self).add_transition(symb,src,dest)
    }

    fn finalize(self) -> result::Result<Automaton,BuildError> {
        Ok(self).finalize()
    }
}

impl AutomatonBuilding for Result<AutomatonBuilder> {
    fn add_alphabet(self, alphabet: &str) -> Result<AutomatonBuilder> {
        self.and_then(|mut dfa| {
            if !dfa.alphabet.is_empty() {
                return Err(BuildError::DuplicatedAlphabet);
            }
            let symbols: Vec<char> = alphabet.chars().collect();
            if symbols.is_empty() {
                return Err(BuildError::EmptyAlphabet);
            }
            if symbols.len() > dfa.limits.symbols() {
                return Err(BuildError::AlphabetTooLong(symbols.len(),dfa.limits.symbols()));
            }
            if let Some(symb) = symbols.iter().duplicates().next() {
                return Err(BuildError::DuplicateSymbol(*symb));
            }
            dfa.alphabet = symbols;
            Ok(dfa)
        })
    }

    fn add_states(self, count: usize) -> Result<AutomatonBuilder> {
        self.and_then(|mut dfa| {
            if dfa.alphabet.is_empty() {
                return Err(BuildError::MissingAlphabet);
            }
            if dfa.state_count.is_some() {
                return Err(BuildError::DuplicatedStateCount);
            }
            let invalid = BuildError::InvalidStateCount(count,dfa.limits.states());
            if count == 0 || count > dfa.limits.states() {
                return Err(invalid);
            }
            // the table is only grown as transitions arrive, never from the header
            count.checked_mul(dfa.alphabet.len()).ok_or(invalid)?;
            dfa.state_count = Some(count);
            Ok(dfa)
        })
    }

    fn add_final(self, state: usize) -> Result<AutomatonBuilder> {
        self.and_then(|mut dfa| {
            if state >= dfa.states()? {
                return Err(BuildError::InvalidAcceptState(state));
            }
            dfa.accepting.insert(state);
            Ok(dfa)
        })
    }

    fn add_transition(self, symb: char, src: usize, dest: usize) -> Result<AutomatonBuilder> {
        self.and_then(|mut dfa| {
            let count = dfa.states()?;
            let index = dfa.alphabet
                .iter()
                .position(|&c| c == symb)
                .ok_or(BuildError::UnknownSymbol(symb))?;
            if src >= count || dest >= count {
                return Err(BuildError::InvalidTransition(symb,src,dest));
            }
            let n = src * dfa.alphabet.len() + index;
            if n >= dfa.cells.len() {
                dfa.cells.resize(n + 1, None);
            }
            let cell = &mut dfa.cells[n];
            if cell.is_some() {
                return Err(BuildError::DuplicatedTransition(symb,src));
            }
            *cell = Some(dest);
            Ok(dfa)
        })
    }

    fn finalize(self) -> result::Result<Automaton,BuildError> {
        self.and_then(|dfa| {
            if dfa.alphabet.is_empty() {
                return Err(BuildError::MissingAlphabet);
            }
            let state_count = dfa.states()?;
            let width = dfa.alphabet.len();
            let table = (0..state_count * width)
                .map(|n| {
                    dfa.cells
                        .get(n)
                        .and_then(|&cell| cell)
                        .ok_or_else(|| BuildError::MissingTransition(dfa.alphabet[n % width],n / width))
                })
                .collect::<result::Result<Vec<usize>,BuildError>>()?;
            Ok(Automaton{
                alphabet    : dfa.alphabet,
                state_count : state_count,
                accepting   : dfa.accepting,
                table       : table,
            })
        })
    }
}

impl Automaton {
    /// The symbols of the automaton, in column order.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// The number of states; states are numbered from `0`.
    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// The accepting states, in increasing order.
    pub fn accepting_states(&self) -> &BTreeSet<usize> {
        &self.accepting
    }

    /// Test if `state` is an accepting state.
    pub fn is_accepting(&self, state: usize) -> bool {
        self.accepting.contains(&state)
    }

    /// Position of `symb` in the alphabet.
    pub fn symbol_index(&self, symb: char) -> Option<usize> {
        self.alphabet.iter().position(|&c| c == symb)
    }

    /// The state reached from `state` on the symbol at `index`, or `None`
    /// when either is out of range.
    pub fn target(&self, state: usize, index: usize) -> Option<usize> {
        if state >= self.state_count || index >= self.alphabet.len() {
            return None;
        }
        Some(self.table[state * self.alphabet.len() + index])
    }

    fn walk(&self, input: &str) -> result::Result<usize,InvalidSymbol> {
        let width = self.alphabet.len();
        input
            .chars()
            .enumerate()
            .try_fold(0, |state,(position,symbol)| {
                self.symbol_index(symbol)
                    .map(|index| self.table[state * width + index])
                    .ok_or(InvalidSymbol{symbol: symbol, position: position})
            })
    }

    /// Test if an input string is a word of the language defined by the
    /// automaton. A symbol outside the alphabet rejects the input.
    ///
    /// # Examples
    ///
    /// ```
    /// extern crate automata;
    ///
    /// use automata::dfa::reader::*;
    /// use automata::dfa::core::Verdict;
    ///
    /// fn main() {
    ///     // binary words ending with 1, 'a' is 0 and 'b' is 1
    ///     let dfa = AutomatonReader::new_from_string("ab\n2\n1 1\n0 1\n0 1").unwrap();
    ///     assert_eq!(dfa.run(""), Verdict::Rejected);
    ///     assert_eq!(dfa.run("a"), Verdict::Rejected);
    ///     assert_eq!(dfa.run("b"), Verdict::Accepted);
    ///     assert_eq!(dfa.run("ab"), Verdict::Accepted);
    ///     assert_eq!(dfa.run("abc"), Verdict::Rejected);
    /// }
    /// ```
    pub fn run(&self, input: &str) -> Verdict {
        self.run_strict(input).unwrap_or_else(|err| {
            log::debug!("rejecting input: {}", err);
            Verdict::Rejected
        })
    }

    /// Same as `run` but reports a symbol outside the alphabet as an error
    /// instead of a rejection.
    pub fn run_strict(&self, input: &str) -> result::Result<Verdict,InvalidSymbol> {
        let state = self.walk(input)?;
        log::trace!("input {:?} ends in state {}", input, state);
        Ok(Verdict::from(self.is_accepting(state)))
    }
}

/// Prints the automaton in the text format read by `AutomatonReader`.
impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.alphabet.iter().collect::<String>())?;
        writeln!(f, "{}", self.state_count)?;
        if self.accepting.is_empty() {
            writeln!(f, "0")?;
        } else {
            writeln!(f, "{} {}", self.accepting.len(), self.accepting.iter().join(" "))?;
        }
        for row in self.table.chunks(self.alphabet.len()) {
            writeln!(f, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
}
