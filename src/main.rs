// Splicer: self-rewriting symbol-sequence interpreter with a step inspector

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;
use ratatui::{backend::CrosstermBackend, Terminal};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use splicer::interpreter::constants::{INDEX_CAPACITY, INDEX_STRIDE};
use splicer::interpreter::engine::{Engine, EngineConfig};
use splicer::memory::symbol::parse_symbols;
use splicer::ui::App;

#[derive(Parser)]
#[command(name = "splicer")]
#[command(about = "Run a self-rewriting I/C/F/P symbol program", long_about = None)]
struct Cli {
    /// File holding the initial feed
    input: PathBuf,

    /// Destination of the output stream
    output: PathBuf,

    /// Destination of the trace stream
    trace: PathBuf,

    /// Symbols placed in front of the input file contents
    #[arg(short, long, default_value = "")]
    prefix: String,

    /// Symbols between two samples of the chunked index
    #[arg(long, default_value_t = INDEX_STRIDE)]
    index_stride: usize,

    /// Largest feed offset the index can resolve
    #[arg(long, default_value_t = INDEX_CAPACITY)]
    index_capacity: usize,

    /// Stop after this many iterations
    #[arg(short, long)]
    max_iterations: Option<usize>,

    /// Step through the run in the terminal inspector
    #[arg(short, long)]
    inspect: bool,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // the inspector owns the terminal, so it runs without a logger
    if !cli.inspect {
        let level = match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;
    }

    let contents = match fs::read_to_string(&cli.input) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Error reading '{}': {}", cli.input.display(), e);
            process::exit(1);
        }
    };

    let text = format!("{}{}", cli.prefix, contents);
    let symbols = match parse_symbols(&text) {
        Ok(symbols) => symbols,
        Err(e) => {
            eprintln!("Error loading feed: {}", e);
            process::exit(1);
        }
    };

    let config = EngineConfig {
        index_stride: cli.index_stride,
        index_capacity: cli.index_capacity,
    };
    let output = BufWriter::new(File::create(&cli.output)?);
    let trace = BufWriter::new(File::create(&cli.trace)?);
    let mut engine = Engine::new(&symbols, output, trace, config)?;

    if cli.inspect {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let mut app = App::new(engine);
        let res = app.run(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        if let Err(err) = res {
            eprintln!("Error: {:?}", err);
        }
        engine = app.into_engine();
    } else {
        let result = match cli.max_iterations {
            Some(limit) => engine.run_steps(limit).map(|_| ()),
            None => engine.run().map(|_| ()),
        };
        if let Err(e) = result {
            eprintln!("Runtime error: {}", e);
            process::exit(2);
        }
        if !engine.is_finished() {
            warn!("Iteration limit reached; streams left unterminated");
        }
    }

    let stats = engine.stats();
    println!("iterations:   {}", stats.iterations);
    println!("rewrites:     {}", stats.rewrites);
    println!("aborts:       {}", stats.aborts);
    println!("feed length:  {}", engine.feed().len());
    println!("echoed:       {}", stats.echoed);
    if !engine.is_finished() {
        println!("(stopped before the feed ran out)");
    }

    Ok(())
}
