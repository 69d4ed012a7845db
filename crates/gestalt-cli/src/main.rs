//! Gestalt CLI - drive the structural editor from scripts or a REPL

mod script;

use std::fs;
use std::path::{Path, PathBuf};

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand};
use gestalt_editor::{Editor, EditorConfig};
use gestalt_lexicon::Catalog;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use script::{parse_command, parse_script, run_step};

#[derive(Parser)]
#[command(name = "gestalt")]
#[command(about = "Gesture-driven structural program editor", long_about = None)]
struct Cli {
    /// Editor configuration (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output profile, overriding the configuration
    #[arg(short, long, global = true)]
    profile: Option<String>,

    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the output profiles
    Profiles,
    /// Print the entry program
    New,
    /// Replay a pointer script and print the generated program
    Play {
        /// Script file (JSON array of steps)
        script: PathBuf,
        /// Write the generated program here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the final tree as JSON
        #[arg(long)]
        tree: bool,
    },
    /// Interactive session
    Repl,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Profiles => cmd_profiles(),
        Commands::New => {
            let editor = open_editor(cli.config.as_deref(), cli.profile.as_deref());
            print!("{}", editor.output());
        }
        Commands::Play { script, output, tree } => {
            let editor = open_editor(cli.config.as_deref(), cli.profile.as_deref());
            cmd_play(editor, &script, output, tree);
        }
        Commands::Repl => cmd_repl(open_editor(cli.config.as_deref(), cli.profile.as_deref())),
    }
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_editor(config: Option<&Path>, profile: Option<&str>) -> Editor {
    let mut config = match config {
        Some(path) => match EditorConfig::from_path(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => EditorConfig::default(),
    };
    if let Some(profile) = profile {
        config.profile = profile.to_string();
    }
    match Editor::new(config) {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_profiles() {
    for lexicon in Catalog::builtin().profiles() {
        let nesting = if lexicon.nested_functions { "nested functions" } else { "top-level functions only" };
        println!("  {:<12} {} ({})", lexicon.name, lexicon.title, nesting);
    }
}

fn cmd_play(mut editor: Editor, file: &Path, output: Option<PathBuf>, show_tree: bool) {
    let source = match fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", file.display(), e);
            std::process::exit(1);
        }
    };

    let steps = match parse_script(&source) {
        Ok(steps) => steps,
        Err(e) => {
            report_script_error(&source, file, &e);
            std::process::exit(1);
        }
    };

    for (i, step) in steps.iter().enumerate() {
        match run_step(&mut editor, step) {
            Ok(line) => println!("{:>3}  {}", i, line),
            Err(e) => {
                eprintln!("✗ step {}: {}", i, e);
                std::process::exit(1);
            }
        }
    }

    if show_tree {
        match serde_json::to_string_pretty(editor.tree()) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    match output {
        Some(path) => {
            if let Err(e) = fs::write(&path, editor.output()) {
                eprintln!("Error writing {}: {}", path.display(), e);
                std::process::exit(1);
            }
            println!("Wrote {} ({} profile)", path.display(), editor.profile());
        }
        None => {
            println!();
            print!("{}", editor.output());
        }
    }
}

fn cmd_repl(mut editor: Editor) {
    use rustyline::DefaultEditor;

    println!("Gestalt REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Type :help for help, :quit to exit");
    println!();

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Error: cannot start line editor: {}", e);
            std::process::exit(1);
        }
    };

    loop {
        let prompt = format!("gestalt[{}]> ", editor.profile());
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(_) => break,
        };
        let _ = rl.add_history_entry(&line);
        let trimmed = line.trim();

        match trimmed {
            "" => {}
            ":quit" | ":q" => break,
            ":help" | ":h" => {
                println!("Commands:");
                println!("  down <selector> [x y]   - Press on a node");
                println!("  move <x> <y>            - Drag");
                println!("  up <x> <y>              - Release");
                println!("  cancel | dismiss        - Abandon the gesture or close the picker");
                println!("  pick <i[.j...]>         - Choose from the open picker");
                println!("  apply <selector> <json> - Apply a payload directly");
                println!("  profile <name> | cycle  - Switch output profile");
                println!("  reset                   - Back to the entry program");
                println!("  :show                   - Print the generated program");
                println!("  :holes                  - List open holes");
                println!("  :tree                   - Print the tree as JSON");
                println!("  :quit                   - Exit REPL");
                println!("Selectors: hole:<role>[:n|last], literal[:n], operator[:n], param[:n], node:<id>");
            }
            ":show" => print!("{}", editor.output()),
            ":holes" => {
                for id in editor.tree().holes() {
                    if let Some(hole) = editor.tree().as_hole(id) {
                        let access = if editor.is_gesture_only(id) { "gesture" } else { "click" };
                        println!("  {:<6} {:<10} {:<6} {}", id.to_string(), hole.role.name(), hole.expected, access);
                    }
                }
            }
            ":tree" => match serde_json::to_string_pretty(editor.tree()) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Error: {}", e),
            },
            command => match parse_command(command) {
                Ok(step) => match run_step(&mut editor, &step) {
                    Ok(outcome) => println!("{}", outcome),
                    Err(e) => eprintln!("Error: {}", e),
                },
                Err(e) => println!("{}. Type :help for help.", e),
            },
        }
    }

    println!("Goodbye!");
}

fn report_script_error(source: &str, file: &Path, error: &serde_json::Error) {
    let name = file.to_string_lossy().to_string();
    let offset = byte_offset(source, error.line(), error.column());
    let result = Report::build(ReportKind::Error, name.clone(), offset)
        .with_message("invalid script")
        .with_label(
            Label::new((name.clone(), offset..offset + 1))
                .with_message(error.to_string())
                .with_color(Color::Red),
        )
        .finish()
        .eprint((name, Source::from(source)));
    if result.is_err() {
        eprintln!("{}: {}", file.display(), error);
    }
}

/// serde_json positions are 1-based line and column
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let start: usize = source.split_inclusive('\n').take(line.saturating_sub(1)).map(str::len).sum();
    (start + column.saturating_sub(1)).min(source.len().saturating_sub(1))
}
