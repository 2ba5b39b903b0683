//! `tack list`

use owo_colors::OwoColorize;

use crate::error::Result;
use crate::tasks::TaskName;
use crate::ui;

/// Print every task with its prerequisites and description to stdout.
pub fn execute() -> Result<()> {
    for task in TaskName::ALL {
        println!("{}", render(task, ui::color_enabled()));
    }
    Ok(())
}

fn render(task: TaskName, color: bool) -> String {
    let mut notes = Vec::new();
    if task == TaskName::DEFAULT {
        notes.push("default".to_string());
    }
    let prerequisites: Vec<&str> = task.prerequisites().iter().map(TaskName::as_str).collect();
    if !prerequisites.is_empty() {
        notes.push(format!("after: {}", prerequisites.join(", ")));
    }
    let notes = if notes.is_empty() {
        String::new()
    } else {
        format!(" ({})", notes.join("; "))
    };

    let name = format!("{:<8}", task.as_str());
    if color {
        format!("{}{}{}", name.bold(), task.description(), notes.dimmed())
    } else {
        format!("{}{}{}", name, task.description(), notes)
    }
}
