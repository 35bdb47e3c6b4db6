//! Specialist port and registry
//!
//! Each specialist handles one capability (terminal, coding, web, build
//! system, file system). The registry maps capabilities to implementations;
//! the manager dispatches through it and treats a missing entry as a
//! per-task failure, not a crash.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use nlmake_domain::{AgentTask, Specialist, SpecialistOutcome};

/// Port for one specialist capability.
///
/// `execute` is infallible at the type level: specialists report failure
/// through [`SpecialistOutcome`] so one bad task never aborts the run.
#[async_trait]
pub trait SpecialistPort: Send + Sync {
    /// The capability this specialist serves.
    fn specialist(&self) -> Specialist;

    /// Whether dispatching to this specialist can change system state.
    /// Mutating specialists sit behind the confirmation gate.
    fn mutates_state(&self) -> bool;

    async fn execute(&self, task: &AgentTask) -> SpecialistOutcome;
}

/// Capability-keyed table of specialists.
#[derive(Default)]
pub struct SpecialistRegistry {
    table: HashMap<Specialist, Arc<dyn SpecialistPort>>,
}

impl SpecialistRegistry {
    pub fn new() -> Self {
        SpecialistRegistry {
            table: HashMap::new(),
        }
    }

    pub fn register(mut self, port: Arc<dyn SpecialistPort>) -> Self {
        self.table.insert(port.specialist(), port);
        self
    }

    pub fn get(&self, specialist: Specialist) -> Option<&Arc<dyn SpecialistPort>> {
        self.table.get(&specialist)
    }

    /// Registered capabilities, in the canonical specialist order.
    pub fn available(&self) -> Vec<Specialist> {
        Specialist::all()
            .iter()
            .copied()
            .filter(|s| self.table.contains_key(s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoSpecialist(Specialist);

    #[async_trait]
    impl SpecialistPort for EchoSpecialist {
        fn specialist(&self) -> Specialist {
            self.0
        }

        fn mutates_state(&self) -> bool {
            false
        }

        async fn execute(&self, task: &AgentTask) -> SpecialistOutcome {
            SpecialistOutcome::success(task.goal.clone())
        }
    }

    #[test]
    fn test_registry_lookup() {
        let registry = SpecialistRegistry::new()
            .register(Arc::new(EchoSpecialist(Specialist::Web)))
            .register(Arc::new(EchoSpecialist(Specialist::Terminal)));
        assert!(registry.get(Specialist::Web).is_some());
        assert!(registry.get(Specialist::Coding).is_none());
        assert_eq!(
            registry.available(),
            vec![Specialist::Terminal, Specialist::Web]
        );
    }
}
