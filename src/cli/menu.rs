//! Interactive menu: load a catalog, list courses, look up a course.
//!
//! Reads one answer per line from any `BufRead` and writes plain text to any
//! `Write`, so sessions can be scripted in tests.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::domain::CourseIndex;
use crate::infrastructure::{InfraError, InfraResult, ServiceContainer};

const MENU: &str = "  1. Load Data Structure.\n  2. Print Course List.\n  3. Print Course.\n  9. Exit\n";

/// One interactive session. The loaded index lives as long as the session.
pub struct Menu<'a, R, W> {
    container: &'a ServiceContainer,
    default_catalog: PathBuf,
    input: R,
    output: W,
    index: Option<CourseIndex>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(
        container: &'a ServiceContainer,
        default_catalog: PathBuf,
        input: R,
        output: W,
    ) -> Self {
        Self {
            container,
            default_catalog,
            input,
            output,
            index: None,
        }
    }

    /// Run until the user picks 9 or input ends.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> InfraResult<()> {
        self.say("Welcome to the course planner.\n")?;

        loop {
            self.say(MENU)?;
            let Some(choice) = self.ask("What would you like to do?")? else {
                break;
            };
            debug!("menu choice: {:?}", choice);

            match choice.as_str() {
                "1" => self.load()?,
                "2" => self.print_list()?,
                "3" => self.print_course()?,
                "9" => break,
                other => self.say(format!("{other} is not a valid option.\n"))?,
            }
        }

        self.say("Thank you for using course planner!")
    }

    fn load(&mut self) -> InfraResult<()> {
        let prompt = format!(
            "Enter the file path. - Default is '{}':",
            self.default_catalog.display()
        );
        let path = match self.ask(&prompt)? {
            Some(p) if !p.is_empty() => PathBuf::from(p),
            _ => self.default_catalog.clone(),
        };

        match self.container.catalog.load(&path) {
            Ok(index) => {
                self.index = Some(index);
                self.say(format!("CSV file {} loaded successfully.\n", path.display()))
            }
            Err(e) => self.say(format!("error: {e}\n")),
        }
    }

    fn print_list(&mut self) -> InfraResult<()> {
        let Some(index) = self.index.take() else {
            return self.say("No courses loaded. Choose option 1 first.\n");
        };
        let result = self.write_list(&index);
        self.index = Some(index);
        result
    }

    fn write_list(&mut self, index: &CourseIndex) -> InfraResult<()> {
        self.say("Here is a sample schedule:\n")?;
        let container = self.container;
        for course in container.catalog.list(index) {
            self.say(course)?;
        }
        self.say("")
    }

    fn print_course(&mut self) -> InfraResult<()> {
        if self.index.is_none() {
            return self.say("No courses loaded. Choose option 1 first.\n");
        }
        let query = self
            .ask("What course do you want to know about?")?
            .unwrap_or_default();

        let container = self.container;
        let catalog = &container.catalog;
        let message = match self.index.as_ref().and_then(|i| catalog.find(i, &query)) {
            Some(course) => format!("{}\n", course.details()),
            None => format!("Course number {} not found.\n", catalog.normalize(&query)),
        };
        self.say(message)
    }

    /// Prompt and read one trimmed line; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> InfraResult<Option<String>> {
        write!(self.output, "{prompt} ")
            .and_then(|_| self.output.flush())
            .map_err(|e| InfraError::io("write prompt", e))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| InfraError::io("read answer", e))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, text: impl Display) -> InfraResult<()> {
        writeln!(self.output, "{text}").map_err(|e| InfraError::io("write menu output", e))
    }
}
