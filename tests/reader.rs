extern crate automata;
extern crate tempfile;

use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::sync::Arc;

use automata::dfa::core::{InvalidSymbol,Verdict};
use automata::dfa::limits::Limits;
use automata::dfa::reader::{AutomatonReader,LoadError};

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

#[test]
fn test_binary_words_ending_with_one() {
    let dfa = AutomatonReader::new_from_file(data("ends_with_b.txt")).unwrap();
    let samples =
        vec![("", Verdict::Rejected),
             ("a", Verdict::Rejected),
             ("b", Verdict::Accepted),
             ("ab", Verdict::Accepted),
             ("ba", Verdict::Rejected),
             ("abbab", Verdict::Accepted),];
    for (input,expected_result) in samples {
        assert!(dfa.run(input) == expected_result, "input false for: \"{}\"", input);
    }
}

#[test]
fn test_row_major_table() {
    // row 0 is a->1 b->0, row 1 is a->1 b->1
    let dfa = AutomatonReader::new_from_file(data("contains_a.txt")).unwrap();
    assert_eq!(dfa.run(""), Verdict::Rejected);
    assert_eq!(dfa.run("a"), Verdict::Accepted);
    assert_eq!(dfa.run("b"), Verdict::Rejected);
    assert_eq!(dfa.run("ab"), Verdict::Accepted);
    assert_eq!(dfa.run("bbbb"), Verdict::Rejected);
}

#[test]
fn test_ab_star_c() {
    let dfa = AutomatonReader::new_from_file(data("ab_star_c.txt")).unwrap();
    let samples =
        vec![("ababac", false),
             ("ababc", true),
             ("", false),
             ("abc", true),
             ("c", true),
             ("ac", false),
             ("cc", false),
             ("ababababababababababababababababababababc", true),];
    for (input,expected_result) in samples {
        assert!(dfa.run(input).is_accepted() == expected_result, "input false for: \"{}\"", input);
    }
}

#[test]
fn test_too_many_states() {
    match AutomatonReader::new_from_file(data("too_many_states.txt")) {
        Err(LoadError::InvalidStateCount(token,line)) => assert_eq!((token.as_str(),line), ("11",2)),
        _ => assert!(false, "InvalidStateCount expected."),
    }
}

#[test]
fn test_accepting_state_equal_to_state_count() {
    match AutomatonReader::new_from_string("ab\n2\n1 2\n0 0\n0 0\n") {
        Err(LoadError::InvalidAcceptState(token,_)) => assert_eq!(token, "2"),
        _ => assert!(false, "InvalidAcceptState expected."),
    }
}

#[test]
fn test_unknown_symbol() {
    let dfa = AutomatonReader::new_from_file(data("ends_with_b.txt")).unwrap();
    assert_eq!(dfa.run("c"), Verdict::Rejected);
    assert_eq!(dfa.run("abbc"), Verdict::Rejected);
    assert_eq!(dfa.run_strict("c"), Err(InvalidSymbol{symbol: 'c', position: 0}));
}

#[test]
fn test_load_is_idempotent() {
    let first = AutomatonReader::new_from_file(data("ab_star_c.txt")).unwrap();
    let second = AutomatonReader::new_from_file(data("ab_star_c.txt")).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.alphabet(), second.alphabet());
    assert_eq!(first.accepting_states(), second.accepting_states());
}

#[test]
fn test_display_reads_back() {
    let dfa = AutomatonReader::new_from_file(data("ab_star_c.txt")).unwrap();
    let printed = dfa.to_string();
    assert_eq!(AutomatonReader::new_from_string(&printed).unwrap(), dfa);
}

#[test]
fn test_run_is_deterministic() {
    let dfa = AutomatonReader::new_from_file(data("ab_star_c.txt")).unwrap();
    for input in &["abc", "ababac", "", "xyz"] {
        let verdict = dfa.run(input);
        for _ in 0..8 {
            assert_eq!(dfa.run(input), verdict);
        }
    }
}

#[test]
fn test_shared_between_threads() {
    let dfa = Arc::new(AutomatonReader::new_from_file(data("ends_with_b.txt")).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|n| {
            let dfa = Arc::clone(&dfa);
            thread::spawn(move || dfa.run(&"ab".repeat(n + 1)))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Verdict::Accepted);
    }
}

#[test]
fn test_read_file_with_limits() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "abcdefghijkl\n1\n1 0\n").unwrap();
    writeln!(file, "0 0 0 0 0 0 0 0 0 0 0 0").unwrap();

    match AutomatonReader::new_from_file(file.path()) {
        Err(LoadError::AlphabetTooLong(len,max)) => assert_eq!((len,max), (12,9)),
        _ => assert!(false, "AlphabetTooLong expected."),
    }

    let reader = AutomatonReader::with_limits(Limits::default().max_symbols(12));
    let dfa = reader.read_file(file.path()).unwrap();
    assert_eq!(dfa.run("lkjihgfedcba"), Verdict::Accepted);
    assert_eq!(dfa.run("m"), Verdict::Rejected);
}
