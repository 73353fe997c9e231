//! Statement execution and parameter introspection.

use super::{unexpected, SqlNav};
use crate::{Command, Output, Result};
use sqlnav_core::{NavResult, ParamSpec, Parameters, Record, Verb};

impl SqlNav {
    /// Run `sql` at `path` and collect its rows.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let rows = nav.invoke("/people", "SELECT count(*) FROM people")?;
    /// ```
    pub fn invoke(&self, path: &str, sql: &str) -> Result<Vec<Record>> {
        match self.run(Command::invoke(path, sql))? {
            Output::Rows(rows) => Ok(rows),
            _ => Err(unexpected("Invoke")),
        }
    }

    /// Run `sql` at `path`, handing each row to `sink` as it is read.
    ///
    /// An error from `sink` stops the statement and is returned.
    pub fn invoke_with<F>(&self, path: &str, sql: &str, mut sink: F) -> Result<()>
    where
        F: FnMut(Record) -> NavResult<()>,
    {
        self.executor
            .invoke_with(path, Parameters::new().with("sql", sql), &mut sink)
    }

    /// Inputs `verb` accepts at `path`.
    pub fn parameters(&self, path: &str, verb: Verb) -> Result<Vec<ParamSpec>> {
        match self.run(Command::Parameters {
            path: path.to_string(),
            verb,
        })? {
            Output::Parameters(specs) => Ok(specs),
            _ => Err(unexpected("Parameters")),
        }
    }
}
