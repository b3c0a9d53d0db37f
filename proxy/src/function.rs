use crate::client::Client;
use crate::utils::{FUNCTIONS_PATH, FUNCTION_NAMESPACE_HEADER, PROJECT_NAME_HEADER};
use log::{info, trace};
use reqwest::Method;
use schema::{FunctionConfig, FunctionFilter, FunctionState, ResourceId};
use std::time::Duration;
use utility::{Error, Result};

/// time between two readiness checks while a function is deployed
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);
/// readiness checks made before giving up on a deployment
pub const POLL_ATTEMPTS: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PollSchedule {
    pub(crate) interval: Duration,
    pub(crate) attempts: usize,
    /// longest wait for the answer to one readiness check
    pub(crate) request_timeout: Duration,
}

impl Default for PollSchedule {
    fn default() -> Self {
        PollSchedule {
            interval: POLL_INTERVAL,
            attempts: POLL_ATTEMPTS,
            request_timeout: POLL_INTERVAL,
        }
    }
}

impl<'s> Client<'s> {
    /// lists the functions of a namespace, optionally of one project, or fetches one by name
    pub async fn get_functions(&self, filter: &FunctionFilter) -> Result<Vec<FunctionConfig>> {
        let mut headers = vec![(FUNCTION_NAMESPACE_HEADER, filter.id.namespace.as_str())];
        if let Some(project) = filter.project_name.as_deref() {
            headers.push((PROJECT_NAME_HEADER, project));
        }

        self.get_resources(FUNCTIONS_PATH, filter.id.name.as_deref(), &headers)
            .await
    }

    pub async fn delete_function(&self, id: &ResourceId) -> Result<()> {
        let name = id.required_name()?;
        let body = serde_json::to_string(&FunctionConfig::identity(name, id.namespace.as_str()))?;

        let req = self
            .new_request(Method::DELETE, FUNCTIONS_PATH, body)?
            .header(FUNCTION_NAMESPACE_HEADER, id.namespace.as_str())
            .build()?;
        self.do_checked_request(req).await?;
        Ok(())
    }

    /// CreateFunction deploys a function into a project and waits until the
    /// dashboard reports it ready.
    ///
    /// The create request itself must succeed. Afterwards the function is
    /// polled every POLL_INTERVAL, at most POLL_ATTEMPTS times; a failed
    /// poll, or one left unanswered for a whole interval, means the function
    /// is not visible yet. An `error` state ends the
    /// deployment with CreationFailed and an exhausted budget with Timeout.
    pub async fn create_function(
        &self,
        project_name: &str,
        config: &FunctionConfig,
    ) -> Result<FunctionConfig> {
        let mut config = config.clone();
        if config.metadata.name.is_empty() {
            return Err(Error::Validation("name must be specified".to_string()));
        }
        config.set_project(project_name);

        let body = serde_json::to_string(&config)?;
        let req = self
            .new_request(Method::POST, FUNCTIONS_PATH, body)?
            .header(FUNCTION_NAMESPACE_HEADER, config.metadata.namespace.as_str())
            .header(PROJECT_NAME_HEADER, project_name)
            .build()?;
        self.do_checked_request(req).await?;
        info!(
            "function {}.{} submitted, waiting for it to become ready",
            config.metadata.name, config.metadata.namespace
        );

        self.wait_function_ready(&config.metadata.name, &config.metadata.namespace)
            .await
    }

    async fn wait_function_ready(&self, name: &str, namespace: &str) -> Result<FunctionConfig> {
        let filter = FunctionFilter::from(ResourceId::named(name, namespace));

        for attempt in 1..=self.poll.attempts {
            let started = tokio::time::Instant::now();
            // an unanswered poll counts as a failed attempt
            let polled =
                tokio::time::timeout(self.poll.request_timeout, self.get_functions(&filter)).await;
            match polled {
                Ok(Ok(functions)) => match functions.into_iter().next() {
                    Some(function) if function.status.state.is_terminal() => {
                        if function.status.state == FunctionState::Ready {
                            return Ok(function);
                        }
                        return Err(Error::CreationFailed(function.status.message));
                    }
                    Some(function) => {
                        trace!("attempt {}: {} is {}", attempt, name, function.status.state)
                    }
                    None => trace!("attempt {}: {} not listed yet", attempt, name),
                },
                Ok(Err(e)) => trace!("attempt {}: {} not visible yet: {}", attempt, name, e),
                Err(_) => trace!(
                    "attempt {}: {} poll unanswered after {:?}",
                    attempt,
                    name,
                    self.poll.request_timeout
                ),
            }

            // attempts start one interval apart however long the check took
            if attempt < self.poll.attempts {
                tokio::time::sleep_until(started + self.poll.interval).await;
            }
        }

        Err(Error::Timeout {
            name: name.to_string(),
            attempts: self.poll.attempts,
        })
    }
}

#[cfg(test)]
mod test_create_function {
    use super::*;
    use crate::auth::NoAuth;
    use mockito::{mock, Matcher};
    use schema::function::PROJECT_NAME_LABEL;
    use std::net::TcpListener;
    use std::time::Instant;

    const FUNCTION_PATH: &str = "/api/functions/echo";

    fn function_body(state: &str, message: &str) -> String {
        serde_json::json!({
            "metadata": {"name": "echo", "namespace": "nuclio"},
            "spec": {"runtime": "python:3.9", "handler": "main:handler"},
            "status": {"state": state, "message": message}
        })
        .to_string()
    }

    fn echo() -> FunctionConfig {
        let mut func = FunctionConfig::identity("echo", "nuclio");
        func.spec.runtime = "python:3.9".into();
        func.spec.handler = "main:handler".into();
        func
    }

    fn fast_schedule() -> PollSchedule {
        PollSchedule {
            interval: Duration::from_millis(5),
            attempts: POLL_ATTEMPTS,
            request_timeout: POLL_INTERVAL,
        }
    }

    #[test]
    fn test_default_schedule() {
        let auth = NoAuth {};
        let client = Client::new(Box::new(&auth), "http://127.0.0.1:8070").unwrap();
        assert_eq!(client.poll.attempts, 60);
        assert_eq!(client.poll.interval, Duration::from_millis(1000));
        assert_eq!(client.poll.request_timeout, Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_create_function_polls_until_ready() {
        let create = mock("POST", FUNCTIONS_PATH)
            .match_header(PROJECT_NAME_HEADER, "demo")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "metadata": {"name": "echo", "labels": {PROJECT_NAME_LABEL: "demo"}}
            })))
            .with_status(202)
            .expect(1)
            .create();
        let missing = mock("GET", FUNCTION_PATH)
            .match_header(FUNCTION_NAMESPACE_HEADER, "nuclio")
            .with_status(404)
            .expect(2)
            .create();
        let pending = mock("GET", FUNCTION_PATH)
            .with_status(200)
            .with_body(function_body("building", ""))
            .expect(1)
            .create();
        let ready = mock("GET", FUNCTION_PATH)
            .with_status(200)
            .with_body(function_body("ready", ""))
            .expect(1)
            .create();

        let auth = NoAuth {};
        let mut client = Client::new(Box::new(&auth), &mockito::server_url()).unwrap();
        client.poll = fast_schedule();

        let res = client.create_function("demo", &echo()).await;
        let func = res.unwrap();
        assert_eq!(func.status.state, FunctionState::Ready);
        assert_eq!(func.metadata.name, "echo");

        create.assert();
        missing.assert();
        pending.assert();
        ready.assert();
    }

    #[tokio::test]
    async fn test_create_function_error_state_fails_fast() {
        let _create = mock("POST", FUNCTIONS_PATH).with_status(202).create();
        let failed = mock("GET", FUNCTION_PATH)
            .with_status(200)
            .with_body(function_body("error", "build failed"))
            .expect(1)
            .create();

        let auth = NoAuth {};
        let mut client = Client::new(Box::new(&auth), &mockito::server_url()).unwrap();
        client.poll = fast_schedule();

        let res = client.create_function("demo", &echo()).await;
        match res {
            Err(Error::CreationFailed(message)) => assert_eq!(message, "build failed"),
            other => panic!("expected CreationFailed, got {:?}", other),
        }
        failed.assert();
    }

    #[tokio::test]
    async fn test_create_function_times_out() {
        let _create = mock("POST", FUNCTIONS_PATH).with_status(202).create();
        let missing = mock("GET", FUNCTION_PATH)
            .with_status(404)
            .expect(POLL_ATTEMPTS)
            .create();

        let auth = NoAuth {};
        let mut client = Client::new(Box::new(&auth), &mockito::server_url()).unwrap();
        let schedule = fast_schedule();
        client.poll = schedule;

        let started = Instant::now();
        let res = client.create_function("demo", &echo()).await;
        let elapsed = started.elapsed();

        match res {
            Err(Error::Timeout { name, attempts }) => {
                assert_eq!(name, "echo");
                assert_eq!(attempts, 60);
            }
            other => panic!("expected Timeout, got {:?}", other),
        }
        assert!(elapsed >= schedule.interval * (POLL_ATTEMPTS as u32 - 1));
        missing.assert();
    }

    #[tokio::test]
    async fn test_wait_function_ready_times_out_on_unanswered_polls() {
        // accepts connections and never answers them
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let dashboard = format!("http://{}", listener.local_addr().unwrap());
        std::thread::spawn(move || {
            let mut held = vec![];
            for stream in listener.incoming() {
                held.push(stream);
            }
        });

        let auth = NoAuth {};
        let mut client = Client::new(Box::new(&auth), dashboard.as_str()).unwrap();
        client.poll = PollSchedule {
            interval: Duration::from_millis(5),
            attempts: 3,
            request_timeout: Duration::from_millis(20),
        };

        let res = tokio::time::timeout(
            Duration::from_secs(5),
            client.wait_function_ready("echo", "nuclio"),
        )
        .await
        .expect("polling must end within its budget");
        match res {
            Err(Error::Timeout { name, attempts }) => {
                assert_eq!(name, "echo");
                assert_eq!(attempts, 3);
            }
            other => panic!("expected Timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_function_create_failure_aborts() {
        let _create = mock("POST", FUNCTIONS_PATH)
            .with_status(500)
            .with_body("dashboard exploded")
            .create();
        let polled = mock("GET", FUNCTION_PATH).expect(0).create();

        let auth = NoAuth {};
        let mut client = Client::new(Box::new(&auth), &mockito::server_url()).unwrap();
        client.poll = fast_schedule();

        let res = client.create_function("demo", &echo()).await;
        match res {
            Err(Error::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "dashboard exploded");
            }
            other => panic!("expected Status, got {:?}", other),
        }
        polled.assert();
    }

    #[tokio::test]
    async fn test_create_function_requires_name() {
        let auth = NoAuth {};
        let client = Client::new(Box::new(&auth), "http://127.0.0.1:1").unwrap();

        let res = client
            .create_function("demo", &FunctionConfig::default())
            .await;
        assert!(matches!(res, Err(Error::Validation(_))));
    }
}
