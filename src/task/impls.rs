// Standard library
use std::sync::Arc;

// 3rd party crates
use tokio::sync::OnceCell;
use tracing::{debug, info};

// Project imports
use crate::admission::{admit, Admission, BucketKey};
use crate::quota::{ConfigError, RateLimitSpec};
use crate::runner::errors::RegistryError;
use crate::runner::traits::RetryScheduler;
use crate::runner::types::TaskRegistry;
use crate::store::CounterStore;

// Current module imports
use super::errors::TaskError;
use super::traits::TaskBody;
use super::types::{Invocation, RateLimitedTask, TaskFactory, TaskOutcome};

impl RateLimitedTask {
    pub fn new(
        namespace: &str,
        name: &str,
        rate_limit: Option<String>,
        store: Arc<dyn CounterStore>,
        body: Box<dyn TaskBody>,
    ) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            rate_limit,
            parsed: OnceCell::new(),
            store,
            body,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The stable registry key: `namespace:name`.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.namespace, self.name)
    }

    /// The bound quota, parsed on first use and cached thereafter.
    async fn spec(&self) -> Result<&RateLimitSpec, ConfigError> {
        self.parsed
            .get_or_try_init(|| async {
                match self.rate_limit.as_deref() {
                    None => Err(ConfigError::MissingSpec),
                    Some(raw) => raw.parse::<RateLimitSpec>(),
                }
            })
            .await
    }

    /// Runs one invocation through admission control.
    ///
    /// The caller contract and the quota string are checked first, before
    /// any store access. An admitted call runs the body with the original
    /// arguments and propagates its result or error unchanged. A denied
    /// call never blocks: the exact invocation is handed to `scheduler`
    /// for re-invocation after the quota period and `Deferred` is returned
    /// with no result this cycle.
    pub async fn invoke(
        &self,
        invocation: Invocation,
        scheduler: &dyn RetryScheduler,
    ) -> Result<TaskOutcome, TaskError> {
        let client_id = invocation
            .client_id()
            .ok_or_else(|| TaskError::MissingClientId(self.qualified_name()))?;

        let spec = self.spec().await?;
        let key = BucketKey::new(&self.namespace, &self.name, &client_id);

        match admit(self.store.as_ref(), &key, spec.calls, spec.period_seconds).await? {
            Admission::Admitted => {
                debug!("Running task '{}' for client '{}'", self.name, client_id);
                let result = self
                    .body
                    .run(invocation.into_args())
                    .await
                    .map_err(TaskError::Body)?;
                Ok(TaskOutcome::Completed(result))
            }
            Admission::Denied {
                retry_after_seconds,
            } => {
                debug!(
                    "Deferring task '{}' for client '{}' by {}s",
                    self.name, client_id, retry_after_seconds
                );
                scheduler
                    .schedule_retry(&self.qualified_name(), invocation, retry_after_seconds)
                    .await?;
                Ok(TaskOutcome::Deferred {
                    countdown_seconds: retry_after_seconds,
                })
            }
        }
    }
}

impl TaskFactory {
    /// Creates a factory bound to `namespace` and `default_rate_limit`.
    /// Tasks registered through it share the given store handle and
    /// registry.
    pub fn new(
        namespace: &str,
        default_rate_limit: Option<String>,
        store: Arc<dyn CounterStore>,
        registry: Arc<TaskRegistry>,
    ) -> Self {
        Self {
            namespace: namespace.to_string(),
            default_rate_limit,
            store,
            registry,
        }
    }

    /// Builds a task definition for `body` under `name`, bound to this
    /// factory's namespace, and registers it.
    ///
    /// `rate_limit` overrides the factory default when given. Registering
    /// with neither is allowed; the missing quota only fails at first
    /// invocation, so late-bound configuration sources keep working.
    pub async fn register<B>(
        &self,
        name: &str,
        rate_limit: Option<&str>,
        body: B,
    ) -> Result<Arc<RateLimitedTask>, RegistryError>
    where
        B: TaskBody + 'static,
    {
        let limit: Option<String> = rate_limit
            .map(str::to_string)
            .or_else(|| self.default_rate_limit.clone());

        let task = Arc::new(RateLimitedTask::new(
            &self.namespace,
            name,
            limit,
            Arc::clone(&self.store),
            Box::new(body),
        ));
        self.registry.register(Arc::clone(&task)).await?;
        info!(
            "Registered rate-limited task '{}' ({})",
            task.qualified_name(),
            task.rate_limit.as_deref().unwrap_or("no limit configured"),
        );
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::{json, Value};
    use tokio::sync::Mutex;

    use crate::runner::errors::SchedulerError;
    use crate::store::{MemoryCounterStore, StoreError};
    use crate::task::traits::BodyError;

    use super::*;

    /// Counts every store operation, so tests can assert that contract and
    /// config failures happen before any store access.
    struct RecordingStore {
        inner: MemoryCounterStore,
        operations: AtomicUsize,
    }

    impl RecordingStore {
        fn new() -> Self {
            Self {
                inner: MemoryCounterStore::new(),
                operations: AtomicUsize::new(0),
            }
        }

        fn operation_count(&self) -> usize {
            self.operations.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CounterStore for RecordingStore {
        async fn get_and_decrement(&self, key: &str) -> Result<(Option<i64>, i64), StoreError> {
            self.operations.fetch_add(1, Ordering::SeqCst);
            self.inner.get_and_decrement(key).await
        }

        async fn set_with_expiry(
            &self,
            key: &str,
            value: i64,
            ttl_seconds: u64,
        ) -> Result<(), StoreError> {
            self.operations.fetch_add(1, Ordering::SeqCst);
            self.inner.set_with_expiry(key, value, ttl_seconds).await
        }

        async fn increment(&self, key: &str) -> Result<i64, StoreError> {
            self.operations.fetch_add(1, Ordering::SeqCst);
            self.inner.increment(key).await
        }
    }

    #[derive(Default)]
    struct RecordingScheduler {
        retries: Mutex<Vec<(String, Invocation, u64)>>,
    }

    #[async_trait]
    impl RetryScheduler for RecordingScheduler {
        async fn schedule_retry(
            &self,
            task: &str,
            invocation: Invocation,
            countdown_seconds: u64,
        ) -> Result<(), SchedulerError> {
            self.retries
                .lock()
                .await
                .push((task.to_string(), invocation, countdown_seconds));
            Ok(())
        }
    }

    async fn noop(_args: Vec<Value>) -> Result<Value, BodyError> {
        Ok(Value::Null)
    }

    fn noop_body() -> Box<dyn TaskBody> {
        Box::new(noop)
    }

    fn task_with(
        rate_limit: Option<&str>,
        store: Arc<dyn CounterStore>,
        body: Box<dyn TaskBody>,
    ) -> RateLimitedTask {
        RateLimitedTask::new(
            "hubspot",
            "sync_contacts",
            rate_limit.map(str::to_string),
            store,
            body,
        )
    }

    #[tokio::test]
    async fn missing_client_id_fails_before_any_store_access() {
        let store = Arc::new(RecordingStore::new());
        let task = task_with(
            Some("10/s"),
            store.clone() as Arc<dyn CounterStore>,
            noop_body(),
        );
        let scheduler = RecordingScheduler::default();

        let err = task
            .invoke(Invocation::new(vec![]), &scheduler)
            .await
            .unwrap_err();

        assert!(matches!(err, TaskError::MissingClientId(_)));
        assert_eq!(store.operation_count(), 0);
        assert!(scheduler.retries.lock().await.is_empty());
    }

    #[tokio::test]
    async fn malformed_rate_limit_fails_before_any_store_access() {
        let store = Arc::new(RecordingStore::new());
        let task = task_with(
            Some("10/x"),
            store.clone() as Arc<dyn CounterStore>,
            noop_body(),
        );
        let scheduler = RecordingScheduler::default();

        let err = task
            .invoke(Invocation::new(vec![json!("client-1")]), &scheduler)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TaskError::Config(ConfigError::InvalidPeriod(_))
        ));
        assert_eq!(store.operation_count(), 0);
    }

    #[tokio::test]
    async fn unconfigured_rate_limit_fails_at_first_invocation() {
        let store = Arc::new(RecordingStore::new());
        let task = task_with(None, store.clone() as Arc<dyn CounterStore>, noop_body());
        let scheduler = RecordingScheduler::default();

        let err = task
            .invoke(Invocation::new(vec![json!("client-1")]), &scheduler)
            .await
            .unwrap_err();

        assert!(matches!(err, TaskError::Config(ConfigError::MissingSpec)));
        assert_eq!(store.operation_count(), 0);
    }

    #[tokio::test]
    async fn admitted_invocation_runs_body_with_original_args() {
        let seen: Arc<Mutex<Option<Vec<Value>>>> = Arc::new(Mutex::new(None));
        let seen_by_body = Arc::clone(&seen);
        let body = move |args: Vec<Value>| {
            let seen = Arc::clone(&seen_by_body);
            async move {
                *seen.lock().await = Some(args);
                Ok::<Value, BodyError>(json!("done"))
            }
        };

        let store = Arc::new(MemoryCounterStore::new());
        let task = task_with(Some("10/s"), store, Box::new(body));
        let scheduler = RecordingScheduler::default();

        let outcome = task
            .invoke(
                Invocation::new(vec![json!("client-1"), json!(42)]),
                &scheduler,
            )
            .await
            .unwrap();

        assert_eq!(outcome, TaskOutcome::Completed(json!("done")));
        assert_eq!(
            seen.lock().await.as_deref(),
            Some(&[json!("client-1"), json!(42)][..])
        );
    }

    #[tokio::test]
    async fn denied_invocation_defers_without_running_body() {
        let runs = Arc::new(AtomicUsize::new(0));
        let runs_in_body = Arc::clone(&runs);
        let body = move |_args: Vec<Value>| {
            let runs = Arc::clone(&runs_in_body);
            async move {
                runs.fetch_add(1, Ordering::SeqCst);
                Ok::<Value, BodyError>(Value::Null)
            }
        };

        let store = Arc::new(MemoryCounterStore::new());
        let task = task_with(Some("1/m"), store, Box::new(body));
        let scheduler = RecordingScheduler::default();
        let invocation = Invocation::new(vec![json!("client-1"), json!("payload")]);

        let first = task.invoke(invocation.clone(), &scheduler).await.unwrap();
        assert_eq!(first, TaskOutcome::Completed(Value::Null));

        let second = task.invoke(invocation.clone(), &scheduler).await.unwrap();
        assert_eq!(
            second,
            TaskOutcome::Deferred {
                countdown_seconds: 60
            }
        );
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        let retries = scheduler.retries.lock().await;
        assert_eq!(
            retries.as_slice(),
            &[("hubspot:sync_contacts".to_string(), invocation, 60)]
        );
    }

    #[tokio::test]
    async fn body_error_passes_through_unchanged() {
        let body = |_args: Vec<Value>| async move {
            Err::<Value, BodyError>("upstream API returned 500".into())
        };

        let store = Arc::new(MemoryCounterStore::new());
        let task = task_with(Some("10/s"), store, Box::new(body));
        let scheduler = RecordingScheduler::default();

        let err = task
            .invoke(Invocation::new(vec![json!("client-1")]), &scheduler)
            .await
            .unwrap_err();

        match err {
            TaskError::Body(inner) => {
                assert_eq!(inner.to_string(), "upstream API returned 500")
            }
            other => panic!("expected body error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn clients_consume_independent_quotas() {
        let store = Arc::new(MemoryCounterStore::new());
        let task = task_with(Some("1/s"), store, noop_body());
        let scheduler = RecordingScheduler::default();

        let a = task
            .invoke(Invocation::new(vec![json!("client-a")]), &scheduler)
            .await
            .unwrap();
        let b = task
            .invoke(Invocation::new(vec![json!("client-b")]), &scheduler)
            .await
            .unwrap();

        assert!(matches!(a, TaskOutcome::Completed(_)));
        assert!(matches!(b, TaskOutcome::Completed(_)));
    }

    #[tokio::test]
    async fn numeric_client_ids_key_by_their_json_text() {
        let invocation = Invocation::new(vec![json!(7), json!("payload")]);
        assert_eq!(invocation.client_id().as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn factory_registers_under_namespace_and_name() {
        let store: Arc<dyn CounterStore> = Arc::new(MemoryCounterStore::new());
        let registry = Arc::new(TaskRegistry::new());
        let factory = TaskFactory::new(
            "hubspot",
            Some("10/s".to_string()),
            store,
            Arc::clone(&registry),
        );

        let task = factory
            .register("sync_contacts", None, noop)
            .await
            .unwrap();

        assert_eq!(task.qualified_name(), "hubspot:sync_contacts");
        assert!(registry.get("hubspot", "sync_contacts").await.is_some());
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn factory_rejects_duplicate_names() {
        let store: Arc<dyn CounterStore> = Arc::new(MemoryCounterStore::new());
        let registry = Arc::new(TaskRegistry::new());
        let factory = TaskFactory::new("hubspot", None, store, Arc::clone(&registry));

        factory
            .register("sync_contacts", Some("10/s"), noop)
            .await
            .unwrap();
        let err = factory
            .register("sync_contacts", Some("10/s"), noop)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            RegistryError::DuplicateTask("hubspot:sync_contacts".to_string())
        );
    }

    #[tokio::test]
    async fn override_rate_limit_wins_over_factory_default() {
        let store: Arc<dyn CounterStore> = Arc::new(MemoryCounterStore::new());
        let registry = Arc::new(TaskRegistry::new());
        let factory = TaskFactory::new(
            "hubspot",
            Some("100/s".to_string()),
            store,
            Arc::clone(&registry),
        );
        let scheduler = RecordingScheduler::default();

        let task = factory
            .register("export_deals", Some("1/h"), noop)
            .await
            .unwrap();

        let invocation = Invocation::new(vec![json!("client-1")]);
        let first = task.invoke(invocation.clone(), &scheduler).await.unwrap();
        let second = task.invoke(invocation, &scheduler).await.unwrap();

        assert!(matches!(first, TaskOutcome::Completed(_)));
        assert_eq!(
            second,
            TaskOutcome::Deferred {
                countdown_seconds: 3600
            }
        );
    }
}
