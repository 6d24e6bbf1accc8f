mod debug_report;

use sanitor::Directive;
use std::io::{self, IsTerminal, Read};

const DEFAULT_RULES: &str = "xss";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let directive = Directive::parse(&config.rules);
    if directive.is_empty() {
        eprintln!("error: no recognized rules in '{}'", config.rules);
        std::process::exit(2);
    }

    if config.verbose {
        match run_steps(&config.input, &directive) {
            Ok(steps) => debug_report::print_run(&config.input, &steps, config.color),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    } else {
        match directive.apply(&config.input) {
            Ok(output) => println!("{output}"),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    }
}

/// Apply the directive one rule at a time so the report can show each
/// rule's contribution. The concatenation of steps equals one
/// `directive.apply` call, since every rule runs in registry order either
/// way.
fn run_steps(
    input: &str,
    directive: &Directive,
) -> Result<Vec<debug_report::RuleStep>, sanitor::SanitizeError> {
    let mut steps = Vec::new();
    let mut value = input.to_string();

    for name in directive.rule_names() {
        let single = Directive::parse(name);
        let after = single.apply(&value)?;
        steps.push(debug_report::RuleStep { rule: name, before: value, after: after.clone() });
        value = after;
    }

    Ok(steps)
}

struct CliConfig {
    input: String,
    rules: String,
    color: bool,
    verbose: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut rules = DEFAULT_RULES.to_string();
    let mut color = io::stdout().is_terminal();
    let mut verbose = false;
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("sanitor {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--verbose" | "-v" => verbose = true,
            "--rules" | "-r" => {
                let value = args.next().ok_or_else(|| "error: --rules expects a value".to_string())?;
                rules = value;
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--rules=") => {
                rules = arg.trim_start_matches("--rules=").to_string();
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, rules, color, verbose })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer.trim_end_matches('\n').to_string())
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "sanitor {version}

Rule-based string sanitization CLI.

Usage:
  sanitor [OPTIONS] [--] <input...>
  sanitor [OPTIONS] --input <text>

Options:
  -i, --input <text>         Input text to sanitize. If omitted, reads remaining
                             args or stdin when no args are provided.
  -r, --rules <directive>    Comma-separated rule list, applied in the engine's
                             fixed order. Recognized rules: html, xml,
                             html_escape, scripts, domain, url, uri, alpha,
                             alphanumeric, xss. Unknown names are ignored.
                             Default: {default_rules}
  -v, --verbose              Print a per-rule before/after trace instead of just
                             the result.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success.
  1  A rule rejected the input (for example an unparseable URL).
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        default_rules = DEFAULT_RULES
    )
}
