// stacktop: minimal stack-based bytecode interpreter

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use stacktop::interpreter::constants::{ADD, DEFAULT_SNAPSHOT_LIMIT, PUSH, SUBTRACT};
use stacktop::interpreter::engine::Interpreter;
use stacktop::program::Program;
use stacktop::ui::App;

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [--tui] [CODE...]", program_name);
    eprintln!();
    eprintln!("Each CODE is one element of the encoded program:");
    eprintln!("  {} = PUSH (followed by its operand), {} = ADD, {} = SUB", PUSH, ADD, SUBTRACT);
    eprintln!();
    eprintln!("Examples:");
    eprintln!(
        "  {} 0 3 0 4 1 0 5 2      # (3 + 4) - 5, prints stacktop: 2",
        program_name
    );
    eprintln!(
        "  {} --tui 0 10 0 3 2     # step through 10 - 3",
        program_name
    );
    eprintln!();
    eprintln!("Without CODE the program above is run.");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("stacktop");

    let mut use_tui = false;
    let mut code = Vec::new();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage(program_name);
                return Ok(());
            }
            "--tui" => use_tui = true,
            other => match other.parse::<i64>() {
                Ok(value) => code.push(value),
                Err(_) => {
                    eprintln!("Error: '{}' is not an integer", other);
                    eprintln!();
                    print_usage(program_name);
                    std::process::exit(1);
                }
            },
        }
    }

    if code.is_empty() {
        code = vec![PUSH, 3, PUSH, 4, ADD, PUSH, 5, SUBTRACT];
    }
    let program = Program::from(code);
    let interpreter = Interpreter::new();

    if !use_tui {
        match interpreter.execute(&program) {
            Ok(value) => println!("stacktop: {}", value),
            Err(e) => {
                eprintln!("Runtime error: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    eprintln!("Executing program...");
    let trace = interpreter.trace(&program, DEFAULT_SNAPSHOT_LIMIT);
    match &trace.outcome {
        Ok(value) => {
            eprintln!("Execution completed successfully: stacktop {}", value);
        }
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            eprintln!("Entering TUI with partial execution history...");
        }
    }
    eprintln!("Total snapshots: {}", trace.snapshots.len());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(trace, interpreter.stack_capacity());
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
