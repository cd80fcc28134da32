//! Numbered interactive menu used when no task is given on the command line.

use std::io::{BufRead, Write};

use crate::yinbao::tools::error::{Result, ToolError};
use crate::yinbao::tools::model::Task;

/// What the operator picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Run(Task),
    Exit,
}

const ENTRIES: [(&str, MenuChoice); 6] = [
    ("1", MenuChoice::Run(Task::Clean)),
    ("2", MenuChoice::Run(Task::Images)),
    ("3", MenuChoice::Run(Task::Package)),
    ("4", MenuChoice::Run(Task::All)),
    ("5", MenuChoice::Run(Task::FixNames)),
    ("0", MenuChoice::Exit),
];

impl MenuChoice {
    /// Maps a menu key to a choice. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let key = input.trim();
        ENTRIES
            .iter()
            .find(|(entry, _)| *entry == key)
            .map(|(_, choice)| *choice)
            .ok_or_else(|| ToolError::InvalidChoice(key.to_string()))
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Run(Task::Clean) => "Clean product export",
            MenuChoice::Run(Task::Images) => "Download product images",
            MenuChoice::Run(Task::Package) => "Convert and validate package relations",
            MenuChoice::Run(Task::All) => "Run all (repair names, then convert)",
            MenuChoice::Run(Task::FixNames) => "Repair relation barcodes by product name",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// Writes the menu to `output` and reads one line from `input`.
///
/// End of input counts as an invalid choice.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<MenuChoice> {
    writeln!(output, "Select a task:")?;
    for (key, choice) in ENTRIES {
        writeln!(output, "  {key}) {}", choice.label())?;
    }
    write!(output, "> ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    MenuChoice::parse(&line)
}
