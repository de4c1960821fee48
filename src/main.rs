use clap::{Parser as ClapParser, Subcommand};
use pnq_lang::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "pnq")]
#[command(about = "PNQ - A Polish-notation query language for matching and aggregating JSON")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and execute a query
    Check {
        /// The query to execute
        query: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't execute
        #[arg(long)]
        syntax_only: bool,
    },

    /// Gather key/value pairs out of an expression as JSON
    Collect {
        /// The expression to collect from
        query: String,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Reformat an expression to canonical text
    Fmt {
        /// The expression to reformat
        query: String,

        /// Print on a single line
        #[arg(short, long)]
        compact: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            query,
            input,
            pretty,
            syntax_only,
        } => run_check(query, input, pretty, syntax_only),
        Commands::Collect { query, pretty } => run_collect(&query, pretty),
        Commands::Fmt { query, compact } => run_fmt(&query, compact),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(
    query: String,
    input: Option<String>,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = CheckOptions {
        query,
        input,
        pretty,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(output) => print_json(&output, pretty),
    }
    Ok(())
}

fn run_collect(query: &str, pretty: bool) -> Result<(), CliError> {
    let output = cli::execute_collect(query)?;
    print_json(&output, pretty);
    Ok(())
}

fn run_fmt(query: &str, compact: bool) -> Result<(), CliError> {
    println!("{}", cli::execute_fmt(query, compact)?);
    Ok(())
}

fn print_json(output: &serde_json::Value, pretty: bool) {
    let json = if pretty {
        serde_json::to_string_pretty(output)
    } else {
        serde_json::to_string(output)
    }
    .unwrap();
    println!("{}", json);
}
