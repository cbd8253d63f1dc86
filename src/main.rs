// dragonlex: scanner, scope chain and recursive-descent front end with a stepping TUI

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use dragonlex::lexer::{Scanner, Token};
use dragonlex::parser::Parser;
use dragonlex::trace::ScanTrace;
use dragonlex::ui::panes::OutputLine;
use dragonlex::ui::App;

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [--tokens] <file>", program_name);
    eprintln!();
    eprintln!("Examples:");
    eprintln!(
        "  {} demos/blocks.txt          # Step through the scan of a block program",
        program_name
    );
    eprintln!(
        "  {} --tokens demos/expr.txt   # Print the token stream and exit",
        program_name
    );
}

/// Run the binder when the first token opens a block and the translator
/// otherwise.
fn parse_output(source: &str) -> Vec<OutputLine> {
    let mut is_block_program = false;
    let (partial, result) = match Parser::for_str(source) {
        Ok(mut parser) => {
            is_block_program = parser.lookahead() == Some(&Token::Punctuation('{'));
            let result = if is_block_program {
                parser.program().map(str::to_string)
            } else {
                parser.translate().map(str::to_string)
            };
            let partial = parser.output().to_string();
            (partial, result)
        }
        Err(e) => (String::new(), Err(e)),
    };

    let heading = if is_block_program {
        "Binder output:"
    } else {
        "Postfix translation:"
    };

    let mut lines = vec![OutputLine::Text(heading.to_string())];
    match result {
        Ok(text) => lines.push(OutputLine::Text(text)),
        Err(e) => {
            if !partial.is_empty() {
                lines.push(OutputLine::Text(partial));
            }
            lines.push(OutputLine::Error(e.to_string()));
        }
    }
    lines
}

/// Print every token with its line, stopping at the first lexical error.
fn dump_tokens(source: &str) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut scanner = Scanner::for_str(source);

    while let Some(token) = scanner.scan_token()? {
        writeln!(out, "{:4}  {:<12} {}", scanner.line(), token.kind_name(), token)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("dragonlex");

    let (tokens_only, input_file) = match args.get(1..).unwrap_or_default() {
        [flag, file] if flag == "--tokens" => (true, file),
        [file] if !file.starts_with("--") => (false, file),
        _ => {
            eprintln!("Error: No input file provided");
            eprintln!();
            print_usage(program_name);
            std::process::exit(1);
        }
    };

    if !Path::new(input_file).exists() {
        eprintln!("Error: File '{}' not found", input_file);
        print_usage(program_name);
        std::process::exit(1);
    }

    let source = fs::read_to_string(input_file)?;

    if tokens_only {
        if let Err(e) = dump_tokens(&source) {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    eprintln!("Scanning {}...", input_file);
    let trace = ScanTrace::record(&source);
    match trace.error() {
        Some(e) => eprintln!("{} (after {} tokens)", e, trace.len()),
        None => eprintln!(
            "Scanned {} tokens over {} line(s).",
            trace.len(),
            trace.final_line()
        ),
    }

    eprintln!("Parsing...");
    let output = parse_output(&source);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(trace, source, output);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_demo_with_leading_comment_runs_binder() {
        let source = fs::read_to_string("demos/blocks.txt").unwrap();
        assert_eq!(
            parse_output(&source),
            vec![
                OutputLine::Text("Binder output:".to_string()),
                OutputLine::Text("{ { x:int; y:bool; } x:int; y:char; }".to_string()),
            ]
        );
    }

    #[test]
    fn test_expression_runs_translator() {
        let lines = parse_output("// sum\n9 - 5 + 2");
        assert_eq!(
            lines,
            vec![
                OutputLine::Text("Postfix translation:".to_string()),
                OutputLine::Text("9 5 - 2 +".to_string()),
            ]
        );
    }

    #[test]
    fn test_lexical_error_before_first_token() {
        let lines = parse_output("/* open");
        assert_eq!(lines.len(), 2);
        assert!(matches!(&lines[1], OutputLine::Error(msg) if msg.contains("line 1")));
    }
}
