use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;

use jlox as lox;

use clap::error::ErrorKind;
use clap::Parser as ClapParser;

use lox::error::Reporter;
use lox::interpreter::Interpreter;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a Lox script; omit it to start the interactive prompt
    script: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args: Cli = match Cli::try_parse() {
        Ok(args) => args,

        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                e.print()?;
                return Ok(());
            }

            _ => {
                println!("Usage: jlox [script]");
                std::process::exit(64);
            }
        },
    };

    match args.script {
        Some(filename) => run_file(&filename),

        None => run_prompt(),
    }
}

fn run_file(filename: &PathBuf) -> anyhow::Result<()> {
    let mut buf: Vec<u8> = Vec::new();
    let mut reader: BufReader<File> = BufReader::new(File::open(filename)?);
    reader.read_to_end(&mut buf)?;

    let source: String = String::from_utf8(buf)?;

    let mut stdout = io::stdout();
    let mut interpreter: Interpreter = Interpreter::new(&mut stdout);
    let mut reporter: Reporter = Reporter::new();

    lox::run(&source, &mut interpreter, &mut reporter);

    if reporter.had_error() {
        std::process::exit(65);
    }

    if reporter.had_runtime_error() {
        std::process::exit(70);
    }

    Ok(())
}

fn run_prompt() -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    let mut interpreter: Interpreter = Interpreter::new(&mut stdout);
    let mut reporter: Reporter = Reporter::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line: String = String::new();

        if io::stdin().read_line(&mut line)? == 0 {
            // EOF ends the session.
            return Ok(());
        }

        lox::run(&line, &mut interpreter, &mut reporter);

        // Keep the session alive after a bad line.
        reporter.reset_error();
    }
}
