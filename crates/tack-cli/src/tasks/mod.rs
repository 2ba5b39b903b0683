//! The task set and the planner.
//!
//! Tasks are a closed set with declared prerequisites. Planning expands
//! prerequisites depth-first and keeps the first occurrence of each task, so
//! every task runs at most once, after everything it depends on.

mod runner;

use std::fmt;
use std::str::FromStr;

use crate::error::CliError;

pub use runner::{TaskContext, run_tasks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskName {
    Bundle,
    Watch,
}

impl TaskName {
    pub const ALL: [TaskName; 2] = [TaskName::Bundle, TaskName::Watch];

    /// Task run by `tack run` without arguments.
    pub const DEFAULT: TaskName = TaskName::Bundle;

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskName::Bundle => "bundle",
            TaskName::Watch => "watch",
        }
    }

    pub fn prerequisites(&self) -> &'static [TaskName] {
        match self {
            TaskName::Bundle => &[],
            TaskName::Watch => &[TaskName::Bundle],
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TaskName::Bundle => "Bundle the entry file into the output directory with a source map",
            TaskName::Watch => "Re-run bundle whenever a watched source file changes",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(TaskName::as_str).collect()
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskName {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|task| task.as_str() == s)
            .ok_or_else(|| CliError::UnknownTask(s.to_string()))
    }
}

/// Parse task names given on the command line.
pub fn parse_tasks<S: AsRef<str>>(names: &[S]) -> Result<Vec<TaskName>, CliError> {
    names.iter().map(|name| name.as_ref().parse()).collect()
}

/// Order `requested` tasks with their prerequisites first, each once.
///
/// An empty request plans the default task.
pub fn plan(requested: &[TaskName]) -> Vec<TaskName> {
    let mut ordered = Vec::new();

    if requested.is_empty() {
        visit(TaskName::DEFAULT, &mut ordered);
    } else {
        for &task in requested {
            visit(task, &mut ordered);
        }
    }

    ordered
}

fn visit(task: TaskName, ordered: &mut Vec<TaskName>) {
    if ordered.contains(&task) {
        return;
    }
    for &prerequisite in task.prerequisites() {
        visit(prerequisite, ordered);
    }
    ordered.push(task);
}
