extern crate automata;

use std::io::{BufRead,Write};          // fill_buf, flush, write!
use std::process::exit;

use clap::{value_parser,Arg,ArgAction,ArgMatches,Command};
use log::LevelFilter;

use automata::dfa::limits::{Limits,DEFAULT_MAX_STATES,DEFAULT_MAX_SYMBOLS};
use automata::dfa::reader::AutomatonReader;

const PROMPT: &str = "Input string: ";

fn cli() -> Command {
    Command::new("dfa")
        .about("Runs a deterministic finite automaton over an input string")
        .version(env!("CARGO_PKG_VERSION"))
        .after_help("The input string is the first word of the first line read on stdin. \
                     An empty line or an empty stdin is the empty string.")
        .arg(Arg::new("file").required(true).value_name("FILE")
             .help("File describing the automaton"))
        .arg(Arg::new("verbose").long("verbose").short('v').action(ArgAction::Count)
             .help("Prints verbose logs"))
        .arg(Arg::new("max-states").long("max-states").value_name("N").value_parser(value_parser!(usize))
             .help(format!("Maximum number of states [default: {}]", DEFAULT_MAX_STATES)))
        .arg(Arg::new("max-symbols").long("max-symbols").value_name("N").value_parser(value_parser!(usize))
             .help(format!("Maximum alphabet length [default: {}]", DEFAULT_MAX_SYMBOLS)))
        .arg(Arg::new("strict").long("strict").action(ArgAction::SetTrue)
             .help("Fails on symbols outside the alphabet instead of rejecting"))
        .arg(Arg::new("print").long("print").action(ArgAction::SetTrue)
             .help("Prints the automaton once loaded"))
}

fn limits_from(matches: &ArgMatches) -> Limits {
    let mut limits = Limits::default();
    if let Some(&max_states) = matches.get_one::<usize>("max-states") {
        limits = limits.max_states(max_states);
    }
    if let Some(&max_symbols) = matches.get_one::<usize>("max-symbols") {
        limits = limits.max_symbols(max_symbols);
    }
    limits
}

fn read_input(reader: &mut impl BufRead, writer: &mut impl Write) -> std::io::Result<String> {
    write!(writer, "{}", PROMPT)?;
    writer.flush()?;
    // rprompt reports a closed stdin as an error, it is the empty string here
    if reader.fill_buf()?.is_empty() {
        return Ok(String::new());
    }
    rprompt::read_reply_from_bufread(reader)
}

fn command_run(matches: &ArgMatches, reader: &mut impl BufRead, writer: &mut impl Write) -> std::result::Result<(),String> {
    let file = matches.get_one::<String>("file").ok_or_else(|| "missing automaton file".to_string())?;
    let limits = limits_from(matches);
    log::debug!("{:?}", limits);

    let dfa = AutomatonReader::with_limits(limits)
        .read_file(file)
        .map_err(|err| format!("{}: {}", file, err))?;
    if matches.get_flag("print") {
        write!(writer, "{}", dfa).map_err(|err| err.to_string())?;
    }

    let reply = read_input(reader, writer).map_err(|err| err.to_string())?;
    let input = reply.split_whitespace().next().unwrap_or("");
    log::info!("running automaton over {:?}", input);

    let verdict = if matches.get_flag("strict") {
        dfa.run_strict(input).map_err(|err| err.to_string())?
    } else {
        dfa.run(input)
    };
    writeln!(writer, "{}", verdict).map_err(|err| err.to_string())
}

fn main() {
    let matches = cli().get_matches();

    let log_level = match matches.get_count("verbose") {
        0 => LevelFilter::Off,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::builder().filter_level(log_level).init();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    if let Err(msg) = command_run(&matches, &mut stdin.lock(), &mut stdout.lock()) {
        log::error!("{}", msg);
        eprintln!("{}", msg);
        exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ENDS_WITH_B: &str = "ab\n2\n1 1\n0 1\n0 1\n";
    const EMPTY_WORD: &str = "ab\n2\n1 0\n1 0\n1 1\n";

    fn spec_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn run_with(args: &[&str], stdin: &str) -> (std::result::Result<(),String>,String) {
        let matches = cli().try_get_matches_from(args).unwrap();
        let mut reader = Cursor::new(stdin.as_bytes().to_vec());
        let mut writer = Vec::new();
        let result = command_run(&matches, &mut reader, &mut writer);
        (result, String::from_utf8(writer).unwrap())
    }

    #[test]
    fn test_cli_requires_exactly_one_file() {
        assert!(cli().try_get_matches_from(&["dfa"]).is_err());
        assert!(cli().try_get_matches_from(&["dfa", "a.txt", "b.txt"]).is_err());
        assert!(cli().try_get_matches_from(&["dfa", "a.txt"]).is_ok());
    }

    #[test]
    fn test_help_documents_empty_stdin() {
        let help = cli().render_long_help().to_string();
        let help = help.split_whitespace().collect::<Vec<_>>().join(" ");
        assert!(help.contains("An empty line or an empty stdin is the empty string."));
    }

    #[test]
    fn test_limits_from_arguments() {
        let matches = cli().try_get_matches_from(&["dfa", "a.txt", "--max-states", "32"]).unwrap();
        assert_eq!(limits_from(&matches), Limits::default().max_states(32));
    }

    #[test]
    fn test_accepted() {
        let file = spec_file(ENDS_WITH_B);
        let path = file.path().to_str().unwrap();
        let (result,output) = run_with(&["dfa", path], "aab\n");
        assert_eq!(result, Ok(()));
        assert_eq!(output, "Input string: Accepted\n");
    }

    #[test]
    fn test_rejected() {
        let file = spec_file(ENDS_WITH_B);
        let path = file.path().to_str().unwrap();
        let (result,output) = run_with(&["dfa", path], "  aba  trailing\n");
        assert_eq!(result, Ok(()));
        assert_eq!(output, "Input string: Rejected\n");
    }

    #[test]
    fn test_empty_line_is_empty_input() {
        let file = spec_file(EMPTY_WORD);
        let path = file.path().to_str().unwrap();
        let (result,output) = run_with(&["dfa", path], "\n");
        assert_eq!(result, Ok(()));
        assert_eq!(output, "Input string: Accepted\n");
    }

    #[test]
    fn test_empty_stdin_is_empty_input() {
        let file = spec_file(EMPTY_WORD);
        let path = file.path().to_str().unwrap();
        let (result,output) = run_with(&["dfa", path], "");
        assert_eq!(result, Ok(()));
        assert_eq!(output, "Input string: Accepted\n");

        let file = spec_file(ENDS_WITH_B);
        let path = file.path().to_str().unwrap();
        let (result,output) = run_with(&["dfa", path], "");
        assert_eq!(result, Ok(()));
        assert_eq!(output, "Input string: Rejected\n");
    }

    #[test]
    fn test_unknown_symbol() {
        let file = spec_file(ENDS_WITH_B);
        let path = file.path().to_str().unwrap();
        let (result,output) = run_with(&["dfa", path], "abc\n");
        assert_eq!(result, Ok(()));
        assert_eq!(output, "Input string: Rejected\n");

        let (result,_) = run_with(&["dfa", "--strict", path], "abc\n");
        assert!(result.unwrap_err().contains("'c' at position 2"));
    }

    #[test]
    fn test_print() {
        let file = spec_file(ENDS_WITH_B);
        let path = file.path().to_str().unwrap();
        let (result,output) = run_with(&["dfa", "--print", path], "b\n");
        assert_eq!(result, Ok(()));
        assert_eq!(output, format!("{}Input string: Accepted\n", ENDS_WITH_B));
    }

    #[test]
    fn test_invalid_file() {
        let file = spec_file("ab\n11\n0\n");
        let path = file.path().to_str().unwrap();
        let (result,output) = run_with(&["dfa", path], "b\n");
        assert!(result.unwrap_err().contains("invalid number of states '11'"));
        assert!(output.is_empty());

        let (result,_) = run_with(&["dfa", "--max-states", "11", path], "b\n");
        assert!(result.unwrap_err().contains("Unexpected end of input"));
    }

    #[test]
    fn test_missing_file() {
        let (result,_) = run_with(&["dfa", "/nonexistent/dfa.txt"], "b\n");
        assert!(result.unwrap_err().contains("IO error"));
    }
}
