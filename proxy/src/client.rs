use crate::function::PollSchedule;
use log::debug;
use reqwest::{Method, Url};
use utility::{Error, Result};

///an API client to perform all operations against a nuclio dashboard
pub struct Client<'s> {
    pub(crate) http_client: reqwest::Client,
    ///ClientAuth a type implementing ClientAuth interface for client authentication
    pub client_auth: Box<&'s dyn ClientAuth>,
    ///base url of the nuclio dashboard
    pub dashboard: Url,
    ///user agent for the client
    pub user_agent: Option<&'s str>,
    pub(crate) poll: PollSchedule,
}

///ClientAuth an interface for client authentication.
// to add authentication to the client implement this interface
pub trait ClientAuth {
    fn set(&self, req: &mut reqwest::RequestBuilder) -> Result<()>;
}

impl<'s> Client<'s> {
    /// initializes a new API client
    pub fn new(auth: Box<&'s dyn ClientAuth>, dashboard: &str) -> Result<Client<'s>> {
        let url = dashboard.trim_end_matches('/');
        let url = Url::parse(url)
            .map_err(|e| Error::Custom(format!("invalid dashboard url {}: {}", dashboard, e)))?;

        Ok(Client {
            http_client: reqwest::Client::new(),
            client_auth: auth,
            dashboard: url,
            user_agent: None,
            poll: PollSchedule::default(),
        })
    }

    ///create a new HTTP request with authentication, path is relative to the dashboard url
    pub fn new_request(
        &self,
        method: Method,
        path: &str,
        body: String,
    ) -> Result<reqwest::RequestBuilder> {
        // copy the dashboard url and append the path so that a dashboard
        // served under a sub path keeps its prefix
        let mut endpoint = self.dashboard.clone();
        let joined = format!(
            "{}/{}",
            endpoint.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        endpoint.set_path(joined.as_str());

        let mut req = self.http_client.request(method, endpoint);
        if let Some(agent) = self.user_agent {
            req = req.header("User-Agent", agent);
        }

        if !body.is_empty() {
            req = req.header("Content-Type", "application/json").body(body);
        }
        self.client_auth.set(&mut req)?;

        Ok(req)
    }

    ///perform an HTTP request
    pub(crate) async fn do_request(&self, req: reqwest::Request) -> Result<reqwest::Response> {
        debug!("{} {}", req.method(), req.url());
        let resp = self.http_client.execute(req).await?;
        debug!("{} answered {}", resp.url(), resp.status());
        Ok(resp)
    }

    ///perform an HTTP request and turn any non 2xx answer into an error carrying status and body
    pub(crate) async fn do_checked_request(
        &self,
        req: reqwest::Request,
    ) -> Result<reqwest::Response> {
        let resp = self.do_request(req).await?;
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(Error::Status { status, body })
        }
    }
}

#[test]
fn test_new_request_keeps_dashboard_prefix() {
    let auth = crate::auth::NoAuth {};
    let client = Client::new(Box::new(&auth), "http://127.0.0.1:8070/dashboard/").unwrap();

    let req = client
        .new_request(Method::GET, "/api/projects", "".into())
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        req.url().as_str(),
        "http://127.0.0.1:8070/dashboard/api/projects"
    );
    assert!(req.headers().get("Content-Type").is_none());
}

#[test]
fn test_new_request_with_body_is_json() {
    let auth = crate::auth::NoAuth {};
    let client = Client::new(Box::new(&auth), "http://127.0.0.1:8070").unwrap();

    let req = client
        .new_request(Method::POST, "api/functions", "{}".into())
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(req.url().as_str(), "http://127.0.0.1:8070/api/functions");
    assert_eq!(
        req.headers().get("Content-Type").unwrap(),
        "application/json"
    );
}
