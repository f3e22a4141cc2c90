use std::io::{IsTerminal, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use ghost_shell::config::Config;
use ghost_shell::interpreter::types::DIAGNOSTIC_PREFIX;
use ghost_shell::logging::init_tracing;
use ghost_shell::parser::{Lexer, TokenType};
use ghost_shell::{ScriptRelay, Shell};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "ghost")]
#[command(about = "Run ghost command scripts")]
#[command(version)]
struct Cli {
    /// Execute the script from command line argument
    #[arg(short = 'c')]
    script: Option<String>,

    /// Output results as JSON (stdout, exitCode)
    #[arg(long = "json")]
    json: bool,

    /// Print the token stream instead of executing
    #[arg(long = "tokens")]
    tokens: bool,

    /// Treat each stdin line as a chat message for the relay
    #[arg(long = "relay")]
    relay: bool,

    /// Config file (default: /etc/ghost/config.toml, ~/.ghost/config.toml, ./ghost.toml)
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Script file to execute
    #[arg()]
    script_file: Option<String>,
}

fn die(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", DIAGNOSTIC_PREFIX, message);
    std::process::exit(1);
}

/// Print one `line:col KIND literal` row per token, then any lexer errors.
/// Returns the number of errors.
fn print_tokens(out: &mut impl Write, script: &str) -> std::io::Result<usize> {
    let (tokens, errors) = Lexer::new(script).tokenize();
    for token in &tokens {
        let literal = if token.is(TokenType::String) {
            token.literal.as_str()
        } else {
            ""
        };
        let row = format!("{} {} {}", token.pos, token.token_type, literal);
        writeln!(out, "{}", row.trim_end())?;
    }
    for error in &errors {
        writeln!(out, "{} {}", DIAGNOSTIC_PREFIX, error)?;
    }
    Ok(errors.len())
}

/// Interactive loop: one script per line until EOF.
fn repl(shell: &mut Shell, prompt: &str, tokens_only: bool) -> i32 {
    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("{}", prompt);
        if let Err(e) = std::io::stdout().flush() {
            eprintln!("{} {}", DIAGNOSTIC_PREFIX, e);
        }

        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("{} {}", DIAGNOSTIC_PREFIX, e);
                break;
            }
        }

        let mut stdout = std::io::stdout().lock();
        if tokens_only {
            if let Err(e) = print_tokens(&mut stdout, &line) {
                eprintln!("{} {}", DIAGNOSTIC_PREFIX, e);
            }
        } else {
            shell.exec(&mut stdout, &line);
        }
    }
    shell.status()
}

async fn relay_stdin(shell: Shell, prefix: &str) -> i32 {
    let relay = ScriptRelay::new(shell, prefix);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(message)) => {
                if let Some(reply) = relay.handle(&message).await {
                    print!("{}", reply);
                    if !reply.ends_with('\n') {
                        println!();
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                eprintln!("{} {}", DIAGNOSTIC_PREFIX, e);
                break;
            }
        }
    }
    relay.status().await
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path),
        None => Config::discover(),
    }
    .unwrap_or_else(|e| die(e));
    let mut shell = Shell::with_options(config.shell_options());

    if cli.relay {
        let status = relay_stdin(shell, &config.relay.prefix).await;
        std::process::exit(status);
    }

    // Determine script source: -c, file, stdin, or the interactive loop
    let script = if let Some(s) = cli.script {
        s
    } else if let Some(ref file) = cli.script_file {
        std::fs::read_to_string(file)
            .unwrap_or_else(|e| die(format!("cannot read script file {}: {}", file, e)))
    } else if std::io::stdin().is_terminal() {
        let status = repl(&mut shell, &config.shell.prompt, cli.tokens);
        std::process::exit(status);
    } else {
        let mut buf = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
            die(format!("cannot read stdin: {}", e));
        }
        buf
    };

    if cli.tokens {
        let mut stdout = std::io::stdout().lock();
        match print_tokens(&mut stdout, &script) {
            Ok(0) => std::process::exit(0),
            Ok(_) => std::process::exit(2),
            Err(e) => die(e),
        }
    }

    let result = shell.run(&script);

    if cli.json {
        println!(
            "{}",
            serde_json::json!({
                "stdout": result.stdout,
                "exitCode": result.exit_code,
            })
        );
    } else if !result.stdout.is_empty() {
        print!("{}", result.stdout);
    }

    std::process::exit(result.exit_code);
}
