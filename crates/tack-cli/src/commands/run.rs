//! `tack run [TASK...]`

use crate::cli::{GlobalArgs, RunArgs};
use crate::commands::utils::project_root;
use crate::error::Result;
use crate::tasks::{TaskContext, parse_tasks, run_tasks};

/// Parse the task names, load the configuration and run the plan.
///
/// Task names are checked before anything is loaded, so a typo fails fast.
pub async fn execute(args: RunArgs, global: &GlobalArgs) -> Result<()> {
    let tasks = parse_tasks(args.tasks.as_slice())?;
    let root = project_root(global.cwd.as_deref())?;
    let ctx = TaskContext::load(&root, global.config.as_deref())?;

    run_tasks(&ctx, &tasks).await
}
