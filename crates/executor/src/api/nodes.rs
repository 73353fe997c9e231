//! Node operations: read, enumerate, create, update, remove, move.

use super::{unexpected, SqlNav};
use crate::{Command, Output, Result};
use sqlnav_core::{NodeValue, Parameters, Value};

impl SqlNav {
    // =========================================================================
    // Read
    // =========================================================================

    /// The node at `path`.
    pub fn get(&self, path: &str) -> Result<NodeValue> {
        match self.run(Command::get(path))? {
            Output::Items(mut items) if items.len() == 1 => Ok(items.remove(0)),
            _ => Err(unexpected("Get")),
        }
    }

    /// The nodes `filter` selects below `path`, or that a wildcard path
    /// matches.
    pub fn select(&self, path: &str, filter: Option<&str>) -> Result<Vec<NodeValue>> {
        match self.run(Command::Get {
            path: path.to_string(),
            filter: filter.map(str::to_string),
        })? {
            Output::Items(items) => Ok(items),
            _ => Err(unexpected("Get")),
        }
    }

    /// Children of the container at `path`.
    pub fn children(&self, path: &str, filter: Option<&str>, recurse: bool) -> Result<Vec<NodeValue>> {
        match self.run(Command::GetChildren {
            path: path.to_string(),
            filter: filter.map(str::to_string),
            recurse,
        })? {
            Output::Items(items) => Ok(items),
            _ => Err(unexpected("GetChildren")),
        }
    }

    /// Names of the children of the container at `path`.
    pub fn child_names(&self, path: &str) -> Result<Vec<String>> {
        match self.run(Command::GetChildNames {
            path: path.to_string(),
            filter: None,
        })? {
            Output::Names(names) => Ok(names),
            _ => Err(unexpected("GetChildNames")),
        }
    }

    /// True if `path` resolves.
    pub fn exists(&self, path: &str) -> Result<bool> {
        self.probe(Command::Exists {
            path: path.to_string(),
        })
    }

    /// True if the node at `path` is a container.
    pub fn is_container(&self, path: &str) -> Result<bool> {
        self.probe(Command::IsContainer {
            path: path.to_string(),
        })
    }

    /// True if the node at `path` has children right now.
    pub fn has_children(&self, path: &str) -> Result<bool> {
        self.probe(Command::HasChildren {
            path: path.to_string(),
        })
    }

    fn probe(&self, cmd: Command) -> Result<bool> {
        let name = cmd.name();
        match self.run(cmd)? {
            Output::Bool(b) => Ok(b),
            _ => Err(unexpected(name)),
        }
    }

    // =========================================================================
    // Write
    // =========================================================================

    /// Create a table with a DDL column list.
    pub fn create_table(&self, name: &str, columns: &str) -> Result<NodeValue> {
        self.create(&format!("\\{}", name), Some(Value::from(columns)), Parameters::new())
    }

    /// Create a row in the table at `path` from dynamic parameters.
    pub fn create_row(&self, path: &str, params: Parameters) -> Result<NodeValue> {
        self.create(path, None, params)
    }

    /// Create a node at `path`.
    pub fn create(&self, path: &str, value: Option<Value>, params: Parameters) -> Result<NodeValue> {
        match self.run(Command::Create {
            path: path.to_string(),
            value,
            params,
        })? {
            Output::Item(item) => Ok(item),
            _ => Err(unexpected("Create")),
        }
    }

    /// Update the node at `path`. Columns not supplied keep their values.
    pub fn set(&self, path: &str, value: Option<Value>, params: Parameters) -> Result<Vec<NodeValue>> {
        match self.run(Command::Set {
            path: path.to_string(),
            filter: None,
            value,
            params,
        })? {
            Output::Items(items) => Ok(items),
            _ => Err(unexpected("Set")),
        }
    }

    /// Remove the node at `path`. Returns the number of objects removed.
    pub fn remove(&self, path: &str) -> Result<u64> {
        match self.run(Command::Remove {
            path: path.to_string(),
            filter: None,
            recurse: false,
        })? {
            Output::Removed(n) => Ok(n),
            _ => Err(unexpected("Remove")),
        }
    }

    /// Rename the node at `path`.
    pub fn rename(&self, path: &str, new_name: &str) -> Result<NodeValue> {
        match self.run(Command::Rename {
            path: path.to_string(),
            new_name: new_name.to_string(),
        })? {
            Output::Item(item) => Ok(item),
            _ => Err(unexpected("Rename")),
        }
    }

    /// Copy the node at `path` into `destination`.
    pub fn copy(&self, path: &str, destination: &str) -> Result<Vec<NodeValue>> {
        match self.run(Command::Copy {
            path: path.to_string(),
            destination: destination.to_string(),
            recurse: false,
        })? {
            Output::Items(items) => Ok(items),
            _ => Err(unexpected("Copy")),
        }
    }

    /// Move the node at `path` into `destination`.
    pub fn move_item(&self, path: &str, destination: &str) -> Result<Vec<NodeValue>> {
        match self.run(Command::Move {
            path: path.to_string(),
            destination: destination.to_string(),
        })? {
            Output::Items(items) => Ok(items),
            _ => Err(unexpected("Move")),
        }
    }
}
