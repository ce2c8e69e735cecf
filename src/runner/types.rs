// Standard library
use std::collections::HashMap;
use std::sync::Arc;

// 3rd party crates
use tokio::sync::RwLock;
use tracing::debug;

// Project imports
use crate::task::types::RateLimitedTask;

// Current module imports
use super::errors::RegistryError;

/// Registry of task definitions, keyed by the stable qualified name
/// `namespace:name`. This is the view an embedding task runner consumes:
/// every registered entry is an ordinary schedulable unit of work.
#[derive(Default)]
pub struct TaskRegistry {
    tasks: RwLock<HashMap<String, Arc<RateLimitedTask>>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a task under its qualified name. Re-registering the same
    /// name is rejected so registered names stay stable.
    pub async fn register(&self, task: Arc<RateLimitedTask>) -> Result<(), RegistryError> {
        let name = task.qualified_name();
        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&name) {
            return Err(RegistryError::DuplicateTask(name));
        }
        debug!("Registered task '{}'", name);
        tasks.insert(name, task);
        Ok(())
    }

    /// Looks up a task by `(namespace, name)`.
    pub async fn get(&self, namespace: &str, name: &str) -> Option<Arc<RateLimitedTask>> {
        let qualified = format!("{}:{}", namespace, name);
        self.tasks.read().await.get(&qualified).cloned()
    }

    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}
