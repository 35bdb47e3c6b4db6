//! Build system specialist: runs build targets through the shared runner.

use std::sync::Arc;

use async_trait::async_trait;

use nlmake_application::ports::{BuildRunnerPort, SpecialistPort};
use nlmake_domain::{AgentTask, Specialist, SpecialistOutcome};

use crate::specialists::render_command_output;

pub struct BuildSystemSpecialist {
    runner: Arc<dyn BuildRunnerPort>,
}

impl BuildSystemSpecialist {
    pub fn new(runner: Arc<dyn BuildRunnerPort>) -> Self {
        BuildSystemSpecialist { runner }
    }
}

#[async_trait]
impl SpecialistPort for BuildSystemSpecialist {
    fn specialist(&self) -> Specialist {
        Specialist::BuildSystem
    }

    fn mutates_state(&self) -> bool {
        true
    }

    async fn execute(&self, task: &AgentTask) -> SpecialistOutcome {
        let target = task.get_string("target").unwrap_or(task.goal.as_str());
        match self.runner.run_target(target).await {
            Ok(outcome) => {
                let output = render_command_output(&outcome);
                if outcome.success() {
                    SpecialistOutcome::success(output)
                } else {
                    SpecialistOutcome::failure(output)
                }
            }
            Err(e) => SpecialistOutcome::failure(e.to_string()),
        }
    }
}
