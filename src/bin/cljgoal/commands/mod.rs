//! Command implementations

pub mod classpath;
pub mod completions;
pub mod deps_edn;
pub mod executions;
pub mod run;

use anyhow::Result;

use cljgoal::core::goal_state::GoalState;
use cljgoal::core::project::Project;
use cljgoal::ops::goals::default_state;
use cljgoal::resolver::LocalRepository;
use cljgoal::util::{Config, GlobalContext};

/// Everything a goal command needs: the enclosing project, its merged
/// configuration and the default goal state derived from it.
pub struct Session {
    pub project: Project,
    pub config: Config,
    pub defaults: GoalState,
}

impl Session {
    /// Load the project enclosing the current directory.
    pub fn open() -> Result<Self> {
        let ctx = GlobalContext::new()?;
        let project = ctx.load_project()?;
        let config = ctx.load_config(&project);
        let defaults = default_state(&config);

        tracing::debug!("Using project {}", project.path().display());

        Ok(Session {
            project,
            config,
            defaults,
        })
    }

    /// Resolver over the configured local repository.
    pub fn resolver(&self) -> LocalRepository {
        let root = self.config.local_repository();
        tracing::debug!("Local repository: {}", root.display());
        LocalRepository::new(root, self.project.root())
    }
}
