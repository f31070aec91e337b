use terminal_size::{terminal_size, Width};

use crate::api::Action;
use crate::constant::*;
use crate::model::{Nargs, Value};
use crate::parser::base::OptionSpec;
use crate::parser::interface::{ColumnRenderer, UserInterface, INDENT};

pub(crate) struct OptionParameter {
    option_strings: Vec<String>,
    grammar: String,
    required: bool,
    details: String,
}

impl OptionParameter {
    pub(crate) fn new(spec: &OptionSpec) -> Self {
        let metavar = spec.dest().to_ascii_uppercase();
        let grammar = if spec.action().takes_values() {
            match spec.nargs() {
                None => format!(" {metavar}"),
                Some(Nargs::Optional) => format!(" [{metavar}]"),
                Some(Nargs::Any) => format!(" [{metavar} ...]"),
                Some(Nargs::AtLeastOne) => format!(" {metavar} [{metavar} ...]"),
                Some(Nargs::Precisely(n)) => (0..n).map(|_| format!(" {metavar}")).collect(),
                Some(Nargs::Remainder) => " ...".to_string(),
            }
        } else {
            "".to_string()
        };

        let details = if spec.action() == Action::Help {
            HELP_MESSAGE.to_string()
        } else {
            let mut details = Vec::default();

            if spec.required() {
                details.push("required".to_string());
            }

            if let Some(value_type) = spec.value_type() {
                details.push(format!("type: {}", value_type.name()));
            }

            match spec.initial() {
                None | Some(Value::None) => {}
                Some(initial) => details.push(format!("default: {initial}")),
            };

            details.join(", ")
        };

        Self {
            option_strings: spec.option_strings().to_vec(),
            grammar,
            required: spec.required(),
            details,
        }
    }

    fn usage(&self) -> String {
        let option_string = self
            .option_strings
            .first()
            .map(String::as_str)
            .unwrap_or_default();

        if self.required {
            format!("{option_string}{}", self.grammar)
        } else {
            format!("[{option_string}{}]", self.grammar)
        }
    }

    fn flags(&self) -> String {
        self.option_strings
            .iter()
            .map(|option_string| format!("{option_string}{}", self.grammar))
            .collect::<Vec<String>>()
            .join(", ")
    }
}

pub(crate) struct Printer {
    description: Option<String>,
    options: Vec<OptionParameter>,
    terminal_width: Option<usize>,
}

impl Printer {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(None, &[OptionSpec::help()], None)
    }

    pub(crate) fn terminal(description: Option<String>, specs: &[OptionSpec]) -> Self {
        let terminal_width = terminal_size().map(|(Width(width), _)| width as usize);
        Self::new(description, specs, terminal_width)
    }

    pub(crate) fn new(
        description: Option<String>,
        specs: &[OptionSpec],
        terminal_width: Option<usize>,
    ) -> Self {
        Self {
            description,
            options: specs.iter().map(OptionParameter::new).collect(),
            terminal_width,
        }
    }

    pub(crate) fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub(crate) fn format_help(&self, program: &str) -> String {
        self.help_lines(program).join("\n")
    }

    pub(crate) fn print_help(&self, program: &str, user_interface: &(impl UserInterface + ?Sized)) {
        for line in self.help_lines(program) {
            user_interface.print(line);
        }
    }

    fn help_lines(&self, program: &str) -> Vec<String> {
        let summary: Vec<String> = self.options.iter().map(OptionParameter::usage).collect();
        let mut lines = vec![format!("usage: {program} {}", summary.join(" "))];

        if let Some(description) = &self.description {
            lines.push("".to_string());
            lines.push(description.clone());
        }

        let rows: Vec<(String, &str)> = self
            .options
            .iter()
            .map(|option| (option.flags(), option.details.as_str()))
            .collect();
        let left_column_width = rows
            .iter()
            .map(|(flags, _)| flags.chars().count())
            .max()
            .unwrap_or_default();
        let middle_column_width = rows
            .iter()
            .map(|(_, details)| details.chars().count() + INDENT)
            .max()
            .unwrap_or_default();
        let column_renderer =
            ColumnRenderer::guided(left_column_width, middle_column_width, self.terminal_width);

        lines.push("".to_string());
        lines.push("options:".to_string());

        for (flags, details) in rows {
            lines.extend(column_renderer.render(&flags, details));
        }

        lines
    }
}

/// The Cli tokens, with a caret pointing at the byte offset where parsing failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ErrorContext {
    offset: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    pub(crate) fn new(offset: usize, tokens: &[&str]) -> Self {
        Self {
            offset,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tokens_length: usize = self.tokens.iter().map(String::len).sum();
        let mut consumed = 0;
        // The tokens are joined by a space, which the offset doesn't account for.
        let mut separators = 0;

        for token in self.tokens.iter().take(self.tokens.len().saturating_sub(1)) {
            consumed += token.len();

            if consumed <= self.offset {
                separators += 1;
            }
        }

        write!(
            f,
            "{}\n{:width$}^",
            self.tokens.join(" "),
            "",
            width = std::cmp::min(self.offset, tokens_length.saturating_sub(1)) + separators
        )
    }
}
