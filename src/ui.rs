use colored::Colorize;
use std::io::{self, ErrorKind, Write};
use tracing::debug;

/// Append-only sink for command output.
pub trait Ui: Send {
    fn say(&mut self, message: &str);
    fn ok(&mut self);
    /// Reports a failure: a `FAILED` line, then the message.
    fn failed(&mut self, message: &str);
    fn table_header(&mut self, line: &str) {
        self.say(line);
    }
}

#[derive(Debug, Default)]
pub struct TerminalUi;

impl TerminalUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for TerminalUi {
    fn say(&mut self, message: &str) {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        if let Err(e) = write_line(&mut lock, message) {
            debug!("Failed to write to stdout: {e}");
        }
    }

    fn ok(&mut self) {
        self.say(&"OK".green().bold().to_string());
    }

    fn failed(&mut self, message: &str) {
        self.say(&"FAILED".red().bold().to_string());
        self.say(message);
    }

    fn table_header(&mut self, line: &str) {
        self.say(&line.bold().to_string());
    }
}

/// A closed pipe (`cf stacks | head`) is not an error.
fn write_line(out: &mut impl Write, message: &str) -> io::Result<()> {
    match writeln!(out, "{message}") {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        result => result,
    }
}

/// Keeps every line in memory, one entry per line.
#[derive(Debug, Default)]
pub struct BufferUi {
    pub outputs: Vec<String>,
}

impl BufferUi {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Ui for BufferUi {
    fn say(&mut self, message: &str) {
        self.outputs
            .extend(message.split('\n').map(str::to_owned));
    }

    fn ok(&mut self) {
        self.say("OK");
    }

    fn failed(&mut self, message: &str) {
        self.say("FAILED");
        self.say(message);
    }
}

const COLUMN_SEPARATOR: &str = "   ";

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn print(&self, ui: &mut dyn Ui) {
        let widths = self.column_widths();
        ui.table_header(&Self::format_row(&self.headers, &widths));
        for row in &self.rows {
            ui.say(&Self::format_row(row, &widths));
        }
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(width) => *width = (*width).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }

    fn format_row(cells: &[String], widths: &[usize]) -> String {
        let line = cells
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(COLUMN_SEPARATOR);
        line.trim_end().to_owned()
    }
}
