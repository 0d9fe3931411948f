use crate::client::Client;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::future::Future;
use std::time::Duration;
use utility::types::function::Function;
use utility::{Error, ResourceKind, Result};

pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_MAX_FETCH_FAILURES: usize = 3;

/// FunctionSource anything able to read a single function resource
#[async_trait]
pub trait FunctionSource: Sync {
    async fn fetch_function(&self, namespace: &str, name: &str) -> Result<Option<Function>>;
}

#[async_trait]
impl<'s> FunctionSource for Client<'s> {
    async fn fetch_function(&self, namespace: &str, name: &str) -> Result<Option<Function>> {
        self.get_function(namespace, name).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub poll_interval: Duration,
    /// consecutive transient failures tolerated before giving up
    pub max_fetch_failures: usize,
}

impl Default for WaitOptions {
    fn default() -> Self {
        WaitOptions {
            timeout: DEFAULT_WAIT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_fetch_failures: DEFAULT_MAX_FETCH_FAILURES,
        }
    }
}

/// Ready the observation that confirmed the deployment
#[derive(Debug, Clone, PartialEq)]
pub struct Ready {
    pub name: String,
    pub observed_at: DateTime<Utc>,
    pub polls: usize,
}

pub struct DeploymentWaiter<'a, S: FunctionSource + ?Sized> {
    source: &'a S,
    opts: WaitOptions,
}

impl<'a, S: FunctionSource + ?Sized> DeploymentWaiter<'a, S> {
    pub fn new(source: &'a S) -> DeploymentWaiter<'a, S> {
        DeploymentWaiter {
            source,
            opts: WaitOptions::default(),
        }
    }

    pub fn options(mut self, opts: WaitOptions) -> Self {
        self.opts = opts;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.opts.poll_interval = interval;
        self
    }

    pub fn max_fetch_failures(mut self, max: usize) -> Self {
        self.opts.max_fetch_failures = max;
        self
    }

    /// polls `name` until a ready condition written at or after `submitted_at` shows up,
    /// or until `timeout` has elapsed since `submitted_at`
    pub async fn wait(
        &self,
        namespace: &str,
        name: &str,
        submitted_at: DateTime<Utc>,
        timeout: Duration,
    ) -> Result<Ready> {
        let mut polls = 0;
        let mut failures = 0;

        loop {
            let remaining = match timeout.checked_sub(elapsed_since(submitted_at)) {
                Some(remaining) => remaining,
                None => return Err(timed_out(name, timeout)),
            };
            polls += 1;
            let fetched =
                match tokio::time::timeout(remaining, self.source.fetch_function(namespace, name))
                    .await
                {
                    Ok(fetched) => fetched,
                    Err(_) => {
                        debug!("reading function {} outlived the deadline", name);
                        return Err(timed_out(name, timeout));
                    }
                };
            match fetched {
                Ok(None) => {
                    return Err(Error::NotFound {
                        kind: ResourceKind::Function,
                        name: name.to_string(),
                    })
                }
                Ok(Some(function)) => {
                    failures = 0;
                    if let Some(observed_at) = ready_since(&function, submitted_at) {
                        return Ok(Ready {
                            name: name.to_string(),
                            observed_at,
                            polls,
                        });
                    }
                    debug!("function {} not ready yet (poll {})", name, polls);
                }
                Err(e) if e.is_transient() => {
                    failures += 1;
                    if failures >= self.opts.max_fetch_failures {
                        return Err(Error::Fetch {
                            kind: ResourceKind::Function,
                            attempts: failures,
                            reason: e.to_string(),
                        });
                    }
                    warn!(
                        "reading function {} failed ({}/{}): {}",
                        name, failures, self.opts.max_fetch_failures, e
                    );
                }
                Err(e) => return Err(e),
            }

            let remaining = match timeout.checked_sub(elapsed_since(submitted_at)) {
                Some(remaining) => remaining,
                None => return Err(timed_out(name, timeout)),
            };
            // wake up once more right after the deadline so the last state is observed
            let pause = self
                .opts
                .poll_interval
                .min(remaining + Duration::from_millis(1));
            tokio::time::sleep(pause).await;
        }
    }

    /// like `wait`, but gives up with `Error::Cancelled` as soon as `cancel` resolves
    pub async fn wait_or_cancel<C>(
        &self,
        namespace: &str,
        name: &str,
        submitted_at: DateTime<Utc>,
        timeout: Duration,
        cancel: C,
    ) -> Result<Ready>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            res = self.wait(namespace, name, submitted_at, timeout) => res,
            _ = cancel => Err(Error::Cancelled { name: name.to_string() }),
        }
    }
}

/// time of the ready condition when it is true and was written at or after
/// `submitted_at`, compared at whole second granularity
pub fn ready_since(function: &Function, submitted_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let condition = function.ready_condition()?;
    let observed_at = condition.updated_at()?;
    if observed_at >= truncate_to_seconds(submitted_at) && condition.is_true() {
        Some(observed_at)
    } else {
        None
    }
}

/// the control plane writes condition times with whole seconds only
pub fn truncate_to_seconds(time: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(time.timestamp(), 0).unwrap_or(time)
}

fn timed_out(name: &str, timeout: Duration) -> Error {
    Error::Timeout {
        name: name.to_string(),
        timeout,
    }
}

fn elapsed_since(submitted_at: DateTime<Utc>) -> Duration {
    (Utc::now() - submitted_at).to_std().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{SecondsFormat, TimeZone};
    use std::time::Instant;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use utility::types::function::{Condition, FunctionStatus, READY_CONDITION};

    /// answers with the scripted responses in order, then repeats the last one
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<Option<Function>>>>,
        last: Mutex<Option<Function>>,
        calls: Mutex<usize>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<Option<Function>>>) -> ScriptedSource {
            ScriptedSource {
                responses: Mutex::new(responses.into_iter().collect()),
                last: Mutex::new(None),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl FunctionSource for ScriptedSource {
        async fn fetch_function(&self, _namespace: &str, _name: &str) -> Result<Option<Function>> {
            *self.calls.lock().unwrap() += 1;
            let next = self.responses.lock().unwrap().pop_front();
            match next {
                Some(Ok(function)) => {
                    *self.last.lock().unwrap() = function.clone();
                    Ok(function)
                }
                Some(Err(e)) => Err(e),
                None => Ok(self.last.lock().unwrap().clone()),
            }
        }
    }

    fn function_with(ready: bool, updated_at: DateTime<Utc>) -> Function {
        Function {
            status: Some(FunctionStatus {
                conditions: vec![Condition {
                    condition_type: READY_CONDITION.into(),
                    status: if ready { "True" } else { "False" }.into(),
                    last_update_time: updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                    ..Default::default()
                }],
            }),
            ..Default::default()
        }
    }

    fn unavailable() -> Error {
        Error::Status {
            code: 503,
            message: "unavailable".into(),
        }
    }

    /// never answers within the deadlines used below
    struct SlowSource;

    #[async_trait]
    impl FunctionSource for SlowSource {
        async fn fetch_function(&self, _namespace: &str, _name: &str) -> Result<Option<Function>> {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Ok(Some(Function::default()))
        }
    }

    fn waiter(source: &ScriptedSource) -> DeploymentWaiter<ScriptedSource> {
        DeploymentWaiter::new(source)
            .poll_interval(Duration::from_millis(5))
            .max_fetch_failures(3)
    }

    #[tokio::test]
    async fn test_ready_after_stale_status() {
        let submitted_at = truncate_to_seconds(Utc::now());
        let stale = submitted_at - chrono::Duration::seconds(30);
        let source = ScriptedSource::new(vec![
            // ready, but from the previous generation
            Ok(Some(function_with(true, stale))),
            Ok(Some(function_with(false, submitted_at))),
            Ok(Some(function_with(true, submitted_at))),
        ]);

        let ready = waiter(&source)
            .wait("default", "hello", submitted_at, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(ready.name, "hello");
        assert_eq!(ready.polls, 3);
        assert_eq!(ready.observed_at.timestamp(), submitted_at.timestamp());
    }

    #[tokio::test]
    async fn test_sub_second_submission_is_compared_by_seconds() {
        let submitted_at = Utc::now();
        let same_second = truncate_to_seconds(submitted_at);
        let source = ScriptedSource::new(vec![Ok(Some(function_with(true, same_second)))]);

        let res = waiter(&source)
            .wait("default", "hello", submitted_at, Duration::from_secs(5))
            .await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn test_timeout_on_stale_status() {
        let submitted_at = Utc::now();
        let stale = submitted_at - chrono::Duration::seconds(30);
        let source = ScriptedSource::new(vec![Ok(Some(function_with(true, stale)))]);

        let res = waiter(&source)
            .wait("default", "hello", submitted_at, Duration::from_millis(50))
            .await;
        assert!(matches!(res, Err(Error::Timeout { .. })));
        assert!(source.calls() > 1);
    }

    #[tokio::test]
    async fn test_slow_read_does_not_outlive_timeout() {
        let started = Instant::now();
        let res = DeploymentWaiter::new(&SlowSource)
            .wait("default", "hello", Utc::now(), Duration::from_millis(100))
            .await;
        assert!(matches!(res, Err(Error::Timeout { .. })));
        assert!(
            started.elapsed() < Duration::from_secs(1),
            "waited {:?}",
            started.elapsed()
        );
    }

    #[tokio::test]
    async fn test_timeout_is_measured_from_submission() {
        // mid-second submission: a whole-second origin would end the wait early
        let submitted_at = Utc::now();
        let stale = submitted_at - chrono::Duration::seconds(30);
        let source = ScriptedSource::new(vec![Ok(Some(function_with(true, stale)))]);
        let started = Instant::now();

        let res = waiter(&source)
            .wait("default", "hello", submitted_at, Duration::from_millis(300))
            .await;
        assert!(matches!(res, Err(Error::Timeout { .. })));
        assert!(
            started.elapsed() >= Duration::from_millis(290),
            "waited {:?}",
            started.elapsed()
        );
    }

    #[tokio::test]
    async fn test_not_found() {
        let source = ScriptedSource::new(vec![Ok(None)]);
        let res = waiter(&source)
            .wait("default", "hello", Utc::now(), Duration::from_secs(5))
            .await;
        assert!(matches!(
            res,
            Err(Error::NotFound {
                kind: ResourceKind::Function,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried() {
        let submitted_at = truncate_to_seconds(Utc::now());
        let source = ScriptedSource::new(vec![
            Err(unavailable()),
            Err(unavailable()),
            Ok(Some(function_with(true, submitted_at))),
        ]);
        let res = waiter(&source)
            .wait("default", "hello", submitted_at, Duration::from_secs(5))
            .await;
        assert!(res.is_ok());
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_fetch_error_after_consecutive_failures() {
        let source = ScriptedSource::new(vec![
            Err(unavailable()),
            Err(unavailable()),
            Err(unavailable()),
        ]);
        let res = waiter(&source)
            .wait("default", "hello", Utc::now(), Duration::from_secs(5))
            .await;
        match res {
            Err(Error::Fetch { attempts, kind, .. }) => {
                assert_eq!(attempts, 3);
                assert_eq!(kind, ResourceKind::Function);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_permanent_failure_is_returned_at_once() {
        let source = ScriptedSource::new(vec![Err(Error::Status {
            code: 403,
            message: "forbidden".into(),
        })]);
        let res = waiter(&source)
            .wait("default", "hello", Utc::now(), Duration::from_secs(5))
            .await;
        assert!(matches!(res, Err(Error::Status { code: 403, .. })));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_cancel() {
        let submitted_at = Utc::now();
        let stale = submitted_at - chrono::Duration::seconds(30);
        let source = ScriptedSource::new(vec![Ok(Some(function_with(false, stale)))]);
        let res = waiter(&source)
            .wait_or_cancel(
                "default",
                "hello",
                submitted_at,
                Duration::from_secs(30),
                tokio::time::sleep(Duration::from_millis(20)),
            )
            .await;
        assert!(matches!(res, Err(Error::Cancelled { .. })));
    }

    #[test]
    fn test_ready_since() {
        let submitted_at = Utc::now();
        let later = submitted_at + chrono::Duration::seconds(2);
        assert!(ready_since(&function_with(true, later), submitted_at).is_some());
        assert!(ready_since(&function_with(false, later), submitted_at).is_none());
        assert!(ready_since(&Function::default(), submitted_at).is_none());
    }

    #[test]
    fn test_truncate_to_seconds() {
        let time = Utc.timestamp_opt(1504000805, 431_000_000).unwrap();
        let truncated = truncate_to_seconds(time);
        assert_eq!(truncated.timestamp(), 1504000805);
        assert_eq!(truncated.timestamp_subsec_nanos(), 0);
    }
}
