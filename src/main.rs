use std::{
    fs,
    io::{self, BufRead, Write},
    process::ExitCode,
};

use clap::Parser;
use shunt::{
    Config,
    Engine,
    Result,
    command::{Reply, dispatch},
    template,
};

/// shunt evaluates infix expressions with a configurable shunting-yard
/// engine. Without input it starts an interactive session.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells shunt to read the input from a file; every line is evaluated.
    #[arg(short, long)]
    file: bool,

    /// Treats the input as a template and expands its {expression}
    /// placeholders instead of evaluating it.
    #[arg(short, long)]
    template: bool,

    /// Characters that end an expression outside of string literals.
    #[arg(long)]
    terminators: Option<String>,

    /// Decimal separator accepted in number literals.
    #[arg(long)]
    decimal: Option<char>,

    /// Global cap on the number of arguments to any function.
    #[arg(long)]
    max_args: Option<usize>,

    /// An expression, or a file path together with --file.
    contents: Option<String>,
}

impl Args {
    fn config(&self) -> Config {
        let defaults = Config::default();
        Config { terminators: self.terminators.clone().unwrap_or(defaults.terminators),
                 decimal_separator: self.decimal.unwrap_or(defaults.decimal_separator),
                 max_arguments: self.max_args.unwrap_or(defaults.max_arguments),
                 ..defaults }
    }
}

fn main() -> ExitCode {
    shunt::init_tracing();
    let args = Args::parse();
    let engine = match Engine::standard_with(args.config()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        },
    };

    let result = match &args.contents {
        Some(contents) => run_batch(&engine, &args, contents),
        None => run_repl(&engine),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

/// Evaluates or expands the given input and prints the results.
fn run_batch(engine: &Engine, args: &Args, contents: &str) -> Result<()> {
    let source = if args.file {
        fs::read_to_string(contents)?
    } else {
        contents.to_string()
    };

    if args.template {
        println!("{}", template::expand(engine, &source)?);
        return Ok(());
    }

    for line in source.lines() {
        match dispatch(engine, line)? {
            Reply::Value(value) => println!("{value}"),
            Reply::Text(text) => println!("{text}"),
            Reply::Quit => break,
            Reply::Nothing => {},
        }
    }
    Ok(())
}

/// Reads lines from stdin until end of input or `:quit`. Errors are reported
/// and the session continues.
fn run_repl(engine: &Engine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match dispatch(engine, &line) {
            Ok(Reply::Value(value)) => writeln!(stdout, "{value}")?,
            Ok(Reply::Text(text)) => writeln!(stdout, "{text}")?,
            Ok(Reply::Quit) => break,
            Ok(Reply::Nothing) => {},
            Err(e) => eprintln!("{e}"),
        }
    }
    Ok(())
}
