pub mod create_admin;

use std::io;
use std::process::ExitCode;

use console::{Term, style};
use serde_json::Value;

use crate::errors::AppError;
use crate::validators::FieldValidator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    Info,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure,
}

impl From<CommandStatus> for ExitCode {
    fn from(status: CommandStatus) -> Self {
        match status {
            CommandStatus::Success => ExitCode::SUCCESS,
            CommandStatus::Failure => ExitCode::FAILURE,
        }
    }
}

/// Prompting and output for console commands.
pub trait Console {
    /// Ask a question; `None` when the answer is empty.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>>;

    fn write(&mut self, message: &str, output_type: OutputType) -> io::Result<()>;
}

/// Console backed by the process terminal.
pub struct TerminalConsole {
    term: Term,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        self.term.write_str(&style(question).cyan().to_string())?;
        let answer = self.term.read_line()?;
        let answer = answer.trim();
        Ok((!answer.is_empty()).then(|| answer.to_string()))
    }

    fn write(&mut self, message: &str, output_type: OutputType) -> io::Result<()> {
        let styled = match output_type {
            OutputType::Info => style(message).green(),
            OutputType::Error => style(message).red(),
        };
        self.term.write_str(&styled.to_string())
    }
}

/// How one command argument is resolved when it was not supplied.
#[derive(Debug, Clone)]
pub struct Argument<'a> {
    pub name: &'a str,
    pub question: Option<&'a str>,
    pub default_value: Option<String>,
    pub is_required: bool,
    pub error_output_type: OutputType,
    pub empty_value_error_message: Option<&'a str>,
}

impl<'a> Argument<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            question: None,
            default_value: None,
            is_required: true,
            error_output_type: OutputType::Error,
            empty_value_error_message: None,
        }
    }

    pub fn question(mut self, question: &'a str) -> Self {
        self.question = Some(question);
        self
    }

    pub fn optional(mut self) -> Self {
        self.is_required = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The argument is usable; `None` for an absent optional value.
    Accepted(Option<String>),
    /// Errors were already written to the console.
    Rejected,
}

/// Take the supplied value or prompt for it, then run `validator` on it.
pub fn get_or_ask_argument<C: Console + ?Sized>(
    console: &mut C,
    supplied: Option<String>,
    argument: &Argument<'_>,
    validator: Option<&mut FieldValidator>,
) -> Result<Resolution, AppError> {
    let value = match supplied {
        Some(value) => Some(value),
        None => {
            let question = argument
                .question
                .map(str::to_string)
                .unwrap_or_else(|| format!("Enter {}: ", argument.name));
            console
                .ask(&question)?
                .or_else(|| argument.default_value.clone())
        }
    };

    let Some(value) = value else {
        let optional = !argument.is_required
            || validator.as_ref().is_some_and(|v| !v.is_required());
        if optional {
            return Ok(Resolution::Accepted(argument.default_value.clone()));
        }
        let message = argument
            .empty_value_error_message
            .map(str::to_string)
            .unwrap_or_else(|| format!("Argument {} is required", argument.name));
        console.write(&message, argument.error_output_type)?;
        return Ok(Resolution::Rejected);
    };

    let Some(validator) = validator else {
        return Ok(Resolution::Accepted(Some(value)));
    };

    let mut candidate = Value::String(value);
    if !validator.validate(&mut candidate)? {
        console.write(
            &format!("Invalid {}:\n", argument.name),
            argument.error_output_type,
        )?;
        for error in validator.errors() {
            console.write(&format!("    {};\n", error), argument.error_output_type)?;
        }
        return Ok(Resolution::Rejected);
    }

    Ok(Resolution::Accepted(match candidate {
        Value::String(s) if s.is_empty() => argument.default_value.clone(),
        Value::String(s) => Some(s),
        Value::Null => argument.default_value.clone(),
        other => Some(other.to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::ScriptedConsole;

    #[test]
    fn supplied_value_skips_the_prompt() {
        let mut console = ScriptedConsole::new(vec![]);
        let resolution = get_or_ask_argument(
            &mut console,
            Some("admin@mail.com".into()),
            &Argument::new("email"),
            Some(&mut FieldValidator::email()),
        )
        .unwrap();

        assert_eq!(resolution, Resolution::Accepted(Some("admin@mail.com".into())));
        assert!(console.questions.is_empty());
    }

    #[test]
    fn missing_value_is_asked_for() {
        let mut console = ScriptedConsole::new(vec![Some("secret".into())]);
        let resolution = get_or_ask_argument(
            &mut console,
            None,
            &Argument::new("password").question("Password: "),
            Some(&mut FieldValidator::password()),
        )
        .unwrap();

        assert_eq!(resolution, Resolution::Accepted(Some("secret".into())));
        assert_eq!(console.questions, vec!["Password: ".to_string()]);
    }

    #[test]
    fn default_question_names_the_argument() {
        let mut console = ScriptedConsole::new(vec![None]);
        let _ = get_or_ask_argument(&mut console, None, &Argument::new("email"), None).unwrap();
        assert_eq!(console.questions, vec!["Enter email: ".to_string()]);
    }

    #[test]
    fn unanswered_required_argument_is_rejected() {
        let mut console = ScriptedConsole::new(vec![None]);
        let resolution =
            get_or_ask_argument(&mut console, None, &Argument::new("email"), None).unwrap();

        assert_eq!(resolution, Resolution::Rejected);
        assert!(console.output().contains("Argument email is required"));
    }

    #[test]
    fn unanswered_optional_argument_is_accepted() {
        let mut console = ScriptedConsole::new(vec![None]);
        let resolution = get_or_ask_argument(
            &mut console,
            None,
            &Argument::new("firstName"),
            Some(&mut FieldValidator::name()),
        )
        .unwrap();

        assert_eq!(resolution, Resolution::Accepted(None));
        assert!(console.output().is_empty());
    }

    #[test]
    fn validation_errors_are_listed() {
        let mut console = ScriptedConsole::new(vec![]);
        let resolution = get_or_ask_argument(
            &mut console,
            Some("pas".into()),
            &Argument::new("password"),
            Some(&mut FieldValidator::password()),
        )
        .unwrap();

        assert_eq!(resolution, Resolution::Rejected);
        let output = console.output();
        assert!(output.contains("Invalid password:\n"));
        assert!(output.contains("    This param length should be between 4 and 36;\n"));
    }
}
