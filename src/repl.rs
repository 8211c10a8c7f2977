//! Line-oriented read-eval-print loop.
//!
//! The REPL is a thin consumer of the core: it parses commands and
//! operands, calls the calculator facade, and renders results and
//! typed failures. It is generic over its input and output streams so
//! tests can drive it with in-memory buffers.

use crate::config::CalculatorConfig;
use crate::core::{CalcError, Calculator};
use crate::persist;
use std::io::{self, BufRead, Write};

/// Interactive calculator session.
pub struct Repl {
    calc: Calculator,
    config: CalculatorConfig,
}

/// What a number prompt produced.
enum Prompted {
    Value(f64),
    Cancelled,
    Eof,
}

impl Repl {
    pub fn new(calc: Calculator, config: CalculatorConfig) -> Self {
        Self { calc, config }
    }

    /// The underlying calculator, for inspection after a session.
    pub fn calculator(&self) -> &Calculator {
        &self.calc
    }

    /// Run the loop until `exit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> io::Result<()> {
        writeln!(out, "Calculator started. Type 'help' for commands.")?;

        loop {
            write!(out, "\nEnter command: ")?;
            out.flush()?;

            let Some(line) = read_line(&mut input)? else {
                writeln!(out, "\nInput terminated. Exiting...")?;
                break;
            };
            let command = line.trim().to_lowercase();

            match command.as_str() {
                "" => continue,
                "help" => self.print_help(&mut out)?,
                "exit" => {
                    match persist::save_csv(&self.config.history_file, self.calc.snapshot()) {
                        Ok(()) => writeln!(out, "History saved successfully. Goodbye!")?,
                        Err(e) => {
                            writeln!(out, "Warning: Could not save history: {e}")?;
                            writeln!(out, "Goodbye!")?;
                        }
                    }
                    break;
                }
                "history" => self.print_history(&mut out)?,
                "clear" => {
                    self.calc.clear();
                    writeln!(out, "History cleared")?;
                }
                "undo" => match self.calc.undo() {
                    Ok(()) => writeln!(out, "Operation undone")?,
                    Err(CalcError::NothingToUndo) => writeln!(out, "Nothing to undo")?,
                    Err(e) => writeln!(out, "Error: {e}")?,
                },
                "redo" => match self.calc.redo() {
                    Ok(()) => writeln!(out, "Operation redone")?,
                    Err(CalcError::NothingToRedo) => writeln!(out, "Nothing to redo")?,
                    Err(e) => writeln!(out, "Error: {e}")?,
                },
                "save" => {
                    match persist::save_csv(&self.config.history_file, self.calc.snapshot()) {
                        Ok(()) => writeln!(out, "History saved successfully")?,
                        Err(e) => writeln!(out, "Error saving history: {e}")?,
                    }
                }
                "load" => {
                    match persist::load_csv(&self.config.history_file, self.calc.operations()) {
                        Ok(entries) => {
                            self.calc.load(entries);
                            writeln!(out, "History loaded successfully")?;
                        }
                        Err(e) => writeln!(out, "Error loading history: {e}")?,
                    }
                }
                name if self.calc.operations().contains(name) => {
                    let done = self.run_operation(name, &mut input, &mut out)?;
                    if done {
                        writeln!(out, "\nInput terminated. Exiting...")?;
                        break;
                    }
                }
                unknown => writeln!(
                    out,
                    "Unknown command: '{unknown}'. Type 'help' for available commands."
                )?,
            }

            for warning in self.calc.drain_warnings() {
                writeln!(out, "Warning: {warning}")?;
            }
        }
        Ok(())
    }

    /// Prompt for both operands and evaluate. Returns `true` on EOF.
    fn run_operation<R: BufRead, W: Write>(
        &mut self,
        name: &str,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<bool> {
        writeln!(out, "\nPerforming {name} operation:")?;
        writeln!(out, "Enter numbers (or 'cancel' to abort):")?;

        let a = match self.prompt_number(input, out, "First number: ")? {
            Prompted::Value(v) => v,
            Prompted::Cancelled => {
                writeln!(out, "Operation cancelled")?;
                return Ok(false);
            }
            Prompted::Eof => return Ok(true),
        };
        let b = match self.prompt_number(input, out, "Second number: ")? {
            Prompted::Value(v) => v,
            Prompted::Cancelled => {
                writeln!(out, "Operation cancelled")?;
                return Ok(false);
            }
            Prompted::Eof => return Ok(true),
        };

        match self.calc.evaluate(name, a, b) {
            Ok(entry) => {
                let result = entry.result;
                match name {
                    "percent" => writeln!(out, "\nResult: {result}%")?,
                    "modulus" => writeln!(out, "\nRemainder: {result}")?,
                    "int_divide" => writeln!(out, "\nInteger quotient: {result}")?,
                    "abs_diff" => writeln!(out, "\nAbsolute difference: {result}")?,
                    _ => writeln!(out, "\nResult: {result}")?,
                }
            }
            Err(e) => writeln!(out, "Error: {e}")?,
        }
        Ok(false)
    }

    fn prompt_number<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
        prompt: &str,
    ) -> io::Result<Prompted> {
        loop {
            write!(out, "{prompt}")?;
            out.flush()?;

            let Some(line) = read_line(input)? else {
                return Ok(Prompted::Eof);
            };
            let raw = line.trim();
            if raw.eq_ignore_ascii_case("cancel") {
                return Ok(Prompted::Cancelled);
            }

            match self.parse_operand(raw) {
                Ok(value) => return Ok(Prompted::Value(value)),
                Err(msg) => writeln!(out, "Error: {msg}")?,
            }
        }
    }

    fn parse_operand(&self, raw: &str) -> Result<f64, String> {
        let value: f64 = raw
            .parse()
            .map_err(|_| format!("invalid number format: {raw}"))?;
        if !value.is_finite() {
            return Err(format!("invalid number format: {raw}"));
        }
        if value.abs() > self.config.max_input_value {
            return Err(format!(
                "value exceeds maximum allowed: {}",
                self.config.max_input_value
            ));
        }
        Ok(value)
    }

    fn print_help<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\nAvailable commands:")?;
        writeln!(
            out,
            "  {} - Perform calculations",
            self.calc.operations().names().join(", ")
        )?;
        writeln!(out, "  history - Show calculation history")?;
        writeln!(out, "  clear - Clear calculation history")?;
        writeln!(out, "  undo - Undo the last calculation")?;
        writeln!(out, "  redo - Redo the last undone calculation")?;
        writeln!(out, "  save - Save calculation history to file")?;
        writeln!(out, "  load - Load calculation history from file")?;
        writeln!(out, "  help - Display this help message")?;
        writeln!(out, "  exit - Exit the calculator")?;
        Ok(())
    }

    fn print_history<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let entries = self.calc.snapshot();
        if entries.is_empty() {
            writeln!(out, "No calculations in history")?;
        } else {
            writeln!(out, "\nCalculation History:")?;
            for (i, entry) in entries.iter().enumerate() {
                writeln!(out, "{}. {entry}", i + 1)?;
            }
        }
        Ok(())
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}
