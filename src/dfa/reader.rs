// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::io;                           // Error
use std::path::Path;
use std::fmt;                          // Formatter, format!, Display, Debug, write!
use std::error;
use std::fs;                           // read_to_string
use std::result;

use crate::dfa::core::{Automaton,AutomatonBuilder,AutomatonBuilding,BuildError};
use crate::dfa::limits::Limits;

/// Type `LoadError` describes the list of errors that can occur during
/// the parsing of an automaton file. Lines are numbered from 1.
#[derive(Debug)]
pub enum LoadError {
    /// Error `MalformedAlphabet` means the first line is missing, empty or
    /// contains white characters.
    MalformedAlphabet,
    /// Error `AlphabetTooLong` means the alphabet has `usize` symbols while
    /// at most `usize` are allowed.
    AlphabetTooLong(usize,usize),
    /// Error `DuplicateSymbol` means a symbol appears twice in the alphabet.
    DuplicateSymbol(char),
    /// Error `InvalidStateCount` means the number of states on the specified
    /// line is not a number, is zero or exceeds the maximum.
    InvalidStateCount(String,usize),
    /// Error `InvalidAcceptCount` means the number of accepting states on the
    /// specified line is not a number or exceeds the maximum.
    InvalidAcceptCount(String,usize),
    /// Error `InvalidAcceptState` means an accepting state on the specified
    /// line is not a number or is not a state of the automaton.
    InvalidAcceptState(String,usize),
    /// Error `InvalidTransition` means the target of the transition from
    /// `state` with `symbol` is not a number or is not a state.
    InvalidTransition {
        /// Source state of the transition.
        state  : usize,
        /// Symbol of the transition.
        symbol : char,
        /// The token read in place of the target.
        token  : String,
        /// Line of the token.
        line   : usize,
    },
    /// Error `TruncatedInput` means the text ended while the named field was
    /// expected.
    TruncatedInput(&'static str),
    /// Error `Build` encapsules any other error of the building process,
    /// with the line of the token that caused it or `0` when no token did.
    Build(BuildError,usize),
    /// Error `Io` is relative to the input errors (the file does not exist,
    /// the file can not be read,...).
    Io(io::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LoadError::MalformedAlphabet => write!(f, "Line 1: the alphabet is missing or contains white characters."),
            LoadError::AlphabetTooLong(len,max) => write!(f, "Line 1: alphabet of {} symbols exceeds the maximum of {}.", len, max),
            LoadError::DuplicateSymbol(symb) => write!(f, "Line 1: symbol '{}' appears twice in the alphabet.", symb),
            LoadError::InvalidStateCount(ref token,line) => write!(f, "Line {}: invalid number of states '{}'.", line, token),
            LoadError::InvalidAcceptCount(ref token,line) => write!(f, "Line {}: invalid number of accepting states '{}'.", line, token),
            LoadError::InvalidAcceptState(ref token,line) => write!(f, "Line {}: invalid accepting state '{}'.", line, token),
            LoadError::InvalidTransition{state,symbol,ref token,line} =>
                write!(f, "Line {}: invalid target '{}' for transition ('{}',{}).", line, token, symbol, state),
            LoadError::TruncatedInput(field) => write!(f, "Unexpected end of input, missing {}.", field),
            LoadError::Build(ref err,0) => write!(f, "{}", err),
            LoadError::Build(ref err,line) => write!(f, "Line {}: {}", line, err),
            LoadError::Io(ref err) => write!(f, "IO error: {}", err),
        }
    }
}

impl error::Error for LoadError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            LoadError::Io(ref err) => Some(err),
            LoadError::Build(ref err,_) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> LoadError {
        LoadError::Io(err)
    }
}

/// Alias for result::Result<T,LoadError>.
pub type Result<T> = result::Result<T,LoadError>;

/// Struct `AutomatonReader` builds an `Automaton` from a file or from a
/// `&str`, checking it against its `Limits`.
///
/// The text holds the alphabet on the first line, then white separated
/// numbers: the number of states, the number of accepting states followed
/// by the accepting states, and the transition table row by row.
#[derive(Debug,Clone,Copy,Default)]
pub struct AutomatonReader {
    limits : Limits,
}

impl AutomatonReader {
    /// Creates a reader that enforces `limits`.
    pub fn with_limits(limits: Limits) -> AutomatonReader {
        AutomatonReader{limits: limits}
    }

    /// Reads an automaton from a file with the default limits.
    ///
    /// # Description
    ///
    /// * `file_path` - The path to the file that contains the automaton.
    ///
    /// # Examples
    ///
    /// ```
    /// extern crate automata;
    ///
    /// use automata::dfa::reader::*;
    ///
    /// fn main() {
    ///     let dfa = AutomatonReader::new_from_file("dfa.txt");
    ///     match dfa {
    ///         Ok(dfa) => {
    ///            // Do stuff with the dfa
    ///         },
    ///         Err(e) => println!("{}", e),
    ///     }
    /// }
    /// ```
    pub fn new_from_file<P: AsRef<Path>>(file_path: P) -> Result<Automaton> {
        AutomatonReader::default().read_file(file_path)
    }

    /// Reads an automaton from a `&str` with the default limits.
    ///
    /// # Examples
    ///
    /// ```
    /// extern crate automata;
    ///
    /// use automata::dfa::reader::*;
    ///
    /// fn main() {
    ///     // words over {a,b} containing at least one a
    ///     let dfa =
    ///         "ab\n\
    ///          2\n\
    ///          1 1\n\
    ///          1 0\n\
    ///          1 1";
    ///     let dfa = AutomatonReader::new_from_string(dfa).unwrap();
    ///     assert!(dfa.run("bba").is_accepted());
    /// }
    /// ```
    pub fn new_from_string(dfa: &str) -> Result<Automaton> {
        AutomatonReader::default().read_string(dfa)
    }

    /// Reads an automaton from a file.
    pub fn read_file<P: AsRef<Path>>(&self, file_path: P) -> Result<Automaton> {
        log::info!("reading automaton from {}", file_path.as_ref().display());
        let contents = fs::read_to_string(file_path)?;
        self.read_string(&contents)
    }

    /// Reads an automaton from a `&str`.
    pub fn read_string(&self, dfa: &str) -> Result<Automaton> {
        let mut lines = dfa.lines();
        let builder = AutomatonReader::read_alphabet(AutomatonBuilder::with_limits(self.limits), lines.next())?;
        // numbers may span lines freely, only their line is kept for errors
        let mut tokens = lines
            .enumerate()
            .flat_map(|(nline,line)| line.split_whitespace().map(move |token| (nline+2,token)));
        let builder = AutomatonReader::read_states(builder, &mut tokens)?;
        let builder = AutomatonReader::read_finals(builder, &mut tokens)?;
        let builder = AutomatonReader::read_transitions(builder, &mut tokens)?;
        if let Some((nline,token)) = tokens.next() {
            log::warn!("line {}: ignoring trailing content starting with '{}'", nline, token);
        }
        // read_transitions filled every cell, so finalize only fails on a builder bug
        let dfa = builder.finalize().map_err(|e| LoadError::Build(e,0))?;
        log::debug!("read automaton with {} states over {} symbols", dfa.state_count(), dfa.alphabet().len());
        Ok(dfa)
    }

    fn next_token<'a>(tokens: &mut dyn Iterator<Item=(usize,&'a str)>, field: &'static str) -> Result<(usize,&'a str)> {
        tokens.next().ok_or(LoadError::TruncatedInput(field))
    }

    fn read_alphabet(dfa: result::Result<AutomatonBuilder,BuildError>, line: Option<&str>) -> Result<AutomatonBuilder> {
        let line = line.ok_or(LoadError::MalformedAlphabet)?;
        if line.is_empty() || line.chars().any(char::is_whitespace) {
            return Err(LoadError::MalformedAlphabet);
        }
        dfa.add_alphabet(line).map_err(|e| match e {
            BuildError::EmptyAlphabet => LoadError::MalformedAlphabet,
            BuildError::AlphabetTooLong(len,max) => LoadError::AlphabetTooLong(len,max),
            BuildError::DuplicateSymbol(symb) => LoadError::DuplicateSymbol(symb),
            e => LoadError::Build(e,1),
        })
    }

    fn read_states<'a>(dfa: AutomatonBuilder, tokens: &mut dyn Iterator<Item=(usize,&'a str)>) -> Result<AutomatonBuilder> {
        let (nline,token) = AutomatonReader::next_token(tokens, "the number of states")?;
        let count = token
            .parse::<usize>()
            .map_err(|_| LoadError::InvalidStateCount(token.to_owned(),nline))?;
        dfa.add_states(count).map_err(|e| match e {
            BuildError::InvalidStateCount(_,_) => LoadError::InvalidStateCount(token.to_owned(),nline),
            e => LoadError::Build(e,nline),
        })
    }

    fn read_finals<'a>(mut dfa: AutomatonBuilder, tokens: &mut dyn Iterator<Item=(usize,&'a str)>) -> Result<AutomatonBuilder> {
        let (nline,token) = AutomatonReader::next_token(tokens, "the number of accepting states")?;
        let count = token
            .parse::<usize>()
            .ok()
            .filter(|&count| count <= dfa.limits().states())
            .ok_or_else(|| LoadError::InvalidAcceptCount(token.to_owned(),nline))?;
        for _ in 0..count {
            let (nline,token) = AutomatonReader::next_token(tokens, "an accepting state")?;
            let invalid = || LoadError::InvalidAcceptState(token.to_owned(),nline);
            let state = token.parse::<usize>().map_err(|_| invalid())?;
            dfa = dfa.add_final(state).map_err(|e| match e {
                BuildError::InvalidAcceptState(_) => invalid(),
                e => LoadError::Build(e,nline),
            })?;
        }
        Ok(dfa)
    }

    fn read_transitions<'a>(mut dfa: AutomatonBuilder, tokens: &mut dyn Iterator<Item=(usize,&'a str)>) -> Result<AutomatonBuilder> {
        let alphabet = dfa.alphabet().to_vec();
        let count = dfa.state_count().unwrap_or(0);
        for state in 0..count {
            for &symbol in alphabet.iter() {
                let (nline,token) = AutomatonReader::next_token(tokens, "a transition")?;
                let invalid = || LoadError::InvalidTransition{state: state, symbol: symbol, token: token.to_owned(), line: nline};
                let dest = token.parse::<usize>().map_err(|_| invalid())?;
                dfa = dfa.add_transition(symbol, state, dest).map_err(|e| match e {
                    BuildError::InvalidTransition(_,_,_) => invalid(),
                    e => LoadError::Build(e,nline),
                })?;
            }
        }
        Ok(dfa)
    }
}
