use std::io::BufRead as _;
use std::{env, fs, process::ExitCode};

use sclisp::{ErrorCode, Interpreter};

/// A minimal host: reads a file (or stdin) one line at a time and evaluates
/// each non-blank line as a single top-level form (SPEC_FULL.md §10.1). No
/// paren-balancing input buffer or readline history — a line editor able to
/// accumulate a multi-line form before handing it to `eval_source` is a
/// separate concern the spec leaves to a collaborating tool (§1 Non-goals).
fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let source = match args.get(1) {
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                eprintln!("error reading {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => match read_stdin() {
            Ok(text) => text,
            Err(err) => {
                eprintln!("error reading stdin: {err}");
                return ExitCode::FAILURE;
            }
        },
    };

    let mut interp = Interpreter::with_default_host();
    let mut had_error = false;

    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        let code = interp.eval_source(line);
        if code == ErrorCode::Ok.as_code() {
            interp.print_repr();
        } else {
            had_error = true;
            eprintln!("{}", interp.errmsg().unwrap_or("error"));
        }
    }

    if had_error { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

fn read_stdin() -> std::io::Result<String> {
    let stdin = std::io::stdin();
    let mut text = String::new();
    for line in stdin.lock().lines() {
        text.push_str(&line?);
        text.push('\n');
    }
    Ok(text)
}
