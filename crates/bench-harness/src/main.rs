//! CLI entry point for the `corebench` timing harness.

use std::env;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use bench_harness::{
    run, setup_logger, BenchmarkCallbacks, CartridgeImage, HarnessError, RollingAverage,
    RunSummary, Session,
};
use console_core::{Configuration, ConstantTables, Region, TvStandard};
#[cfg(test)]
use proptest as _;
#[cfg(test)]
use tempfile as _;
use thiserror as _;
use tracing::{info, warn};
use tracing_subscriber as _;

const USAGE_TEXT: &str = "\
Usage: corebench <rom> <iterations> [options]

Arguments:
  <rom>          Cartridge image to benchmark
  <iterations>   Frames per timed batch (decimal, 0x hex or 0 octal)

Options:
  --batches <n>          Stop after n batches (default: run until killed)
  --tv <ntsc|pal>        Video standard (default: ntsc)
  --region <overseas|domestic>
                         Console region (default: overseas)
  -h, --help             Show this help message

Without --batches the run repeats until interrupted (Ctrl-C), which ends the
process with a non-zero exit status.

Environment:
  RUST_LOG               Diagnostic filter for stderr (default: warn)

Examples:
  corebench game.bin 100
  corebench game.bin 0x40 --batches 16 --tv pal
";

const MISSING_ARGUMENTS: &str = "must pass path to ROM file and number of iterations";

#[derive(Debug, PartialEq, Eq)]
struct RunArgs {
    rom: PathBuf,
    iterations: u64,
    batches: Option<u64>,
    configuration: Configuration,
    ignored: Vec<String>,
}

#[derive(Debug)]
enum ParseResult {
    Run(RunArgs),
    Help,
}

#[allow(clippy::while_let_on_iterator)]
fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut positionals: Vec<OsString> = Vec::new();
    let mut batches = None;
    let mut configuration = Configuration::default();
    let mut ignored = Vec::new();

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Ok(ParseResult::Help);
        }

        if arg == "--batches" {
            let value = option_value(&mut args, "--batches")?;
            let count = value
                .trim()
                .parse::<u64>()
                .map_err(|_| format!("invalid value for --batches: {value}"))?;
            if count == 0 {
                return Err("--batches must be at least 1".to_string());
            }
            batches = Some(count);
            continue;
        }

        if arg == "--tv" {
            let value = option_value(&mut args, "--tv")?;
            configuration.tv_standard = value
                .parse::<TvStandard>()
                .map_err(|error| error.to_string())?;
            continue;
        }

        if arg == "--region" {
            let value = option_value(&mut args, "--region")?;
            configuration.region = value.parse::<Region>().map_err(|error| error.to_string())?;
            continue;
        }

        if positionals.len() < 2 {
            positionals.push(arg);
            continue;
        }

        let text = arg.to_string_lossy().into_owned();
        if text.starts_with('-') {
            return Err(format!("unknown option: {text}"));
        }
        ignored.push(text);
    }

    let mut positionals = positionals.into_iter();
    let (Some(rom), Some(count)) = (positionals.next(), positionals.next()) else {
        return Err(MISSING_ARGUMENTS.to_string());
    };

    Ok(ParseResult::Run(RunArgs {
        rom: PathBuf::from(rom),
        iterations: parse_iteration_count(&count.to_string_lossy()),
        batches,
        configuration,
        ignored,
    }))
}

fn option_value(args: &mut impl Iterator<Item = OsString>, name: &str) -> Result<String, String> {
    args.next()
        .map(|value| value.to_string_lossy().into_owned())
        .ok_or_else(|| format!("missing value for {name}"))
}

/// Parses like C `strtoul(text, NULL, 0)`: leading whitespace, optional sign,
/// `0x` hex, leading-`0` octal or decimal, longest valid prefix. Text with no
/// digits yields 0, overflow saturates, and a minus sign negates modulo 2^64.
fn parse_iteration_count(text: &str) -> u64 {
    let text = text.trim_start();
    let (negative, text) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let bytes = text.as_bytes();
    let (radix, digits) = match bytes {
        [b'0', b'x' | b'X', next, ..] if next.is_ascii_hexdigit() => (16, &text[2..]),
        [b'0', ..] => (8, text),
        _ => (10, text),
    };

    let radix_wide = u64::from(radix);
    let parsed = digits
        .chars()
        .map_while(|c| c.to_digit(radix))
        .try_fold(0_u64, |value, digit| {
            value.checked_mul(radix_wide)?.checked_add(u64::from(digit))
        });

    let Some(value) = parsed else {
        return u64::MAX;
    };
    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

fn run_benchmark(args: &RunArgs) -> Result<RunSummary, HarnessError> {
    setup_logger()?;

    if !args.ignored.is_empty() {
        warn!(arguments = ?args.ignored, "ignoring extra arguments");
    }

    let cartridge = CartridgeImage::load(&args.rom)?;
    info!(
        rom = %args.rom.display(),
        bytes = cartridge.len(),
        iterations = args.iterations,
        tv = %args.configuration.tv_standard,
        region = %args.configuration.region,
        "loaded cartridge"
    );

    let constants = ConstantTables::new();
    let mut session = Session::new(
        &args.configuration,
        &constants,
        BenchmarkCallbacks::new(&cartridge),
    );
    let mut window = RollingAverage::new();
    let mut remaining = args.batches;
    let should_continue = move || {
        remaining.as_mut().is_none_or(|left| {
            *left -= 1;
            *left > 0
        })
    };

    let mut sink = io::stdout().lock();
    run(
        &mut session,
        args.iterations,
        &mut window,
        &mut sink,
        should_continue,
    )
    .map_err(|error| {
        warn!(%error, "report sink failed; stopping");
        HarnessError::Report(error)
    })
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            print!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Run(args)) => match run_benchmark(&args) {
            Ok(_) => 0,
            Err(error) => {
                eprintln!("error: {error}");
                1
            }
        },
        Err(error) => {
            eprintln!("error: {error}");
            eprint!("{USAGE_TEXT}");
            1
        }
    };

    std::process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::ffi::OsString;

    fn args(items: &[&str]) -> impl Iterator<Item = OsString> {
        items
            .iter()
            .map(OsString::from)
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn parses_the_two_positionals() {
        let result = parse_args(args(&["game.bin", "100"])).expect("valid args should parse");

        let ParseResult::Run(parsed) = result else {
            panic!("expected a run");
        };
        assert_eq!(
            parsed,
            RunArgs {
                rom: PathBuf::from("game.bin"),
                iterations: 100,
                batches: None,
                configuration: Configuration::default(),
                ignored: Vec::new(),
            }
        );
    }

    #[test]
    fn parses_options_in_any_position() {
        let result = parse_args(args(&[
            "--tv", "pal", "game.bin", "--batches", "3", "0x10", "--region", "domestic",
        ]))
        .expect("valid args should parse");

        let ParseResult::Run(parsed) = result else {
            panic!("expected a run");
        };
        assert_eq!(parsed.iterations, 16);
        assert_eq!(parsed.batches, Some(3));
        assert_eq!(parsed.configuration.tv_standard, TvStandard::Pal);
        assert_eq!(parsed.configuration.region, Region::Domestic);
    }

    #[rstest]
    #[case(&[])]
    #[case(&["game.bin"])]
    #[case(&["--batches", "2", "game.bin"])]
    fn missing_positionals_are_a_usage_error(#[case] items: &[&str]) {
        let error = parse_args(args(items)).expect_err("should fail");
        assert_eq!(error, MISSING_ARGUMENTS);
    }

    #[rstest]
    #[case(&["game.bin", "1", "--verbose"], "unknown option")]
    #[case(&["game.bin", "1", "--batches"], "missing value")]
    #[case(&["game.bin", "1", "--batches", "0"], "at least 1")]
    #[case(&["game.bin", "1", "--batches", "many"], "invalid value")]
    #[case(&["game.bin", "1", "--tv", "secam"], "unknown tv standard")]
    #[case(&["game.bin", "1", "--region", "mars"], "unknown region")]
    fn rejects_malformed_arguments(#[case] items: &[&str], #[case] fragment: &str) {
        let error = parse_args(args(items)).expect_err("should fail");
        assert!(error.contains(fragment), "{error}");
    }

    #[test]
    fn help_wins_over_everything() {
        let result = parse_args(args(&["game.bin", "-h", "--bogus"])).expect("help parses");
        assert!(matches!(result, ParseResult::Help));
    }

    #[rstest]
    #[case("-1", u64::MAX)]
    #[case("-abc", 0)]
    #[case("-", 0)]
    #[case("-x1", 0)]
    #[case("--", 0)]
    fn dash_prefixed_count_is_a_positional(#[case] count: &str, #[case] expected: u64) {
        let result = parse_args(args(&["game.bin", count])).expect("count should parse");

        let ParseResult::Run(parsed) = result else {
            panic!("expected a run");
        };
        assert_eq!(parsed.rom, PathBuf::from("game.bin"));
        assert_eq!(parsed.iterations, expected);
    }

    #[test]
    fn extra_positionals_are_ignored() {
        let result = parse_args(args(&["game.bin", "100", "extra", "--batches", "2", "more"]))
            .expect("extra arguments should not fail the run");

        let ParseResult::Run(parsed) = result else {
            panic!("expected a run");
        };
        assert_eq!(parsed.iterations, 100);
        assert_eq!(parsed.batches, Some(2));
        assert_eq!(parsed.ignored, vec!["extra".to_string(), "more".to_string()]);
    }

    #[rstest]
    #[case("100", 100)]
    #[case("  42", 42)]
    #[case("+7", 7)]
    #[case("0x1F", 31)]
    #[case("0X1f", 31)]
    #[case("017", 15)]
    #[case("0", 0)]
    #[case("089", 0)]
    #[case("0x", 0)]
    #[case("0xg", 0)]
    #[case("12abc", 12)]
    #[case("abc", 0)]
    #[case("", 0)]
    #[case("-1", u64::MAX)]
    #[case("-0", 0)]
    #[case("99999999999999999999999", u64::MAX)]
    fn iteration_count_follows_strtoul(#[case] text: &str, #[case] expected: u64) {
        assert_eq!(parse_iteration_count(text), expected);
    }
}
