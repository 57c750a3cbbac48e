//! REPL (Read-Eval-Print Loop)

use crate::config::{Config, Scoping};
use crate::error::{report_error, PsError};
use crate::interp::Interpreter;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use tracing::debug;

const PROMPT: &str = "PS> ";
const CONTINUATION_PROMPT: &str = "... ";
const HISTORY_FILE: &str = ".psip_history";

/// REPL state
pub struct Repl {
    editor: DefaultEditor,
    interpreter: Interpreter,
    history_path: Option<PathBuf>,
    /// Lines of a block that is still open
    pending: String,
}

impl Repl {
    pub fn new(config: Config) -> RlResult<Self> {
        let editor = DefaultEditor::new()?;
        let history_path = dirs_home().map(|h| h.join(HISTORY_FILE));

        let mut repl = Repl {
            editor,
            interpreter: Interpreter::with_config(config),
            history_path,
            pending: String::new(),
        };

        if let Some(ref path) = repl.history_path {
            let _ = repl.editor.load_history(path);
        }

        Ok(repl)
    }

    pub fn run(&mut self) -> RlResult<()> {
        println!("psip {}", env!("CARGO_PKG_VERSION"));
        match self.interpreter.config().scoping {
            Scoping::Dynamic => println!("Dynamic scoping is enabled."),
            Scoping::Lexical => println!("Lexical scoping is enabled (resolves dynamically)."),
        }
        println!("Type :help for help, :quit to exit.\n");

        loop {
            let prompt = if self.pending.is_empty() {
                PROMPT
            } else {
                CONTINUATION_PROMPT
            };
            match self.editor.readline(prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(line);

                    if self.pending.is_empty() && is_command(line) {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    self.eval_input(line);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    self.pending.clear();
                }
                Err(ReadlineError::Eof) => {
                    println!("Goodbye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_path {
            let _ = self.editor.save_history(path);
        }

        Ok(())
    }

    /// Handle a REPL command; returns `true` to exit
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            ":quit" | ":q" | ":exit" | "quit" => {
                println!("Goodbye!");
                true
            }
            ":help" | ":h" | ":?" => {
                print_help();
                false
            }
            ":stack" | ":s" => {
                println!("[{}]", self.interpreter.render_stack());
                false
            }
            ":names" => {
                println!("{}", self.interpreter.visible_names().join(" "));
                false
            }
            ":reset" => {
                let config = self.interpreter.config().clone();
                self.interpreter = Interpreter::with_config(config);
                println!("Interpreter reset.");
                false
            }
            ":clear" => {
                print!("\x1B[2J\x1B[1;1H");
                false
            }
            _ => {
                println!("Unknown command: {cmd}");
                println!("Type :help for help.");
                false
            }
        }
    }

    /// Evaluate a line; returns `true` while a block is left open
    fn eval_input(&mut self, line: &str) -> bool {
        self.pending.push_str(line);
        self.pending.push('\n');
        let source = std::mem::take(&mut self.pending);

        let result = self.interpreter.evaluate_source(&source);
        for text in self.interpreter.take_output() {
            println!("{text}");
        }
        match result {
            Ok(()) => {
                debug!(stack = %self.interpreter.render_stack(), "operand stack");
                false
            }
            Err(PsError::UnclosedBlock { .. }) => {
                self.pending = source;
                true
            }
            Err(err) => {
                let _ = report_error("<repl>", &source, &err);
                false
            }
        }
    }
}

fn is_command(line: &str) -> bool {
    line.starts_with(':') || line == "quit"
}

fn print_help() {
    println!("psip REPL commands:");
    println!("  :help, :h, :?   Show this help");
    println!("  :quit, :q       Exit the REPL (also: quit)");
    println!("  :stack, :s      Show the operand stack, bottom first");
    println!("  :names          List every name visible from the current scope");
    println!("  :reset          Start over with empty stacks");
    println!("  :clear          Clear the screen");
    println!();
    println!("Anything else is evaluated token by token, e.g.");
    println!("  /sq {{dup mul}} def 7 sq =");
    println!("A line that leaves a `{{` open continues on the next line.");
}

/// Get home directory
fn dirs_home() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}
