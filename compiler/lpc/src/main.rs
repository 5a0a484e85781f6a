//! languageplay CLI.

use lp_eval::{Interpreter, Value};
use lpc::commands::{eval_source, format_result, lex_file, run_file, CliError};

fn main() {
    lpc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let outcome = match command.as_str() {
        "run" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: lp run <file>");
                std::process::exit(1);
            };
            run_file(&Interpreter::new(), path).map(|value| report(value.as_ref()))
        }
        "eval" => {
            if args.len() < 3 {
                eprintln!("Usage: lp eval <source>");
                std::process::exit(1);
            }
            let source = args[2..].join(" ");
            eval_source(&Interpreter::new(), &source).map(|value| report(value.as_ref()))
        }
        "lex" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: lp lex <file>");
                std::process::exit(1);
            };
            lex_file(path).map(|listing| print!("{listing}"))
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("lp {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(err) = outcome {
        report_error(&err);
        std::process::exit(1);
    }
}

fn report(value: Option<&Value>) {
    if let Some(value) = value {
        println!("{}", format_result(value));
    }
}

fn report_error(err: &CliError) {
    eprintln!("error: {err}");
    if let CliError::Eval { source, .. } = err {
        tracing::debug!(category = ?source.category(), "evaluation failed");
    }
}

fn print_usage() {
    println!("languageplay");
    println!();
    println!("Usage: lp <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>       Run a program");
    println!("  eval <source>    Run program text given on the command line");
    println!("  lex <file>       Print the token stream of a file");
    println!("  help             Show this message");
    println!("  version          Show version information");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=lp_eval=trace) to enable logging.");
}
