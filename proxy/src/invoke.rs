use crate::client::Client;
use crate::utils::{
    FUNCTION_INVOCATIONS_PATH, FUNCTION_NAMESPACE_HEADER, FUNCTION_NAME_HEADER,
    INVOKE_VIA_HEADER, PATH_HEADER,
};
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Method;
use schema::{InvokeResult, InvokeVia, ResourceId};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use utility::{Error, Result};

///InvokeMethod the HTTP verbs a function can be invoked with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvokeMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl Default for InvokeMethod {
    fn default() -> Self {
        InvokeMethod::Get
    }
}

impl InvokeMethod {
    pub fn as_method(&self) -> Method {
        match self {
            InvokeMethod::Get => Method::GET,
            InvokeMethod::Post => Method::POST,
            InvokeMethod::Put => Method::PUT,
            InvokeMethod::Patch => Method::PATCH,
            InvokeMethod::Delete => Method::DELETE,
            InvokeMethod::Head => Method::HEAD,
            InvokeMethod::Options => Method::OPTIONS,
        }
    }

    /// only post, put and patch send the invocation body
    pub fn carries_body(&self) -> bool {
        match self {
            InvokeMethod::Post | InvokeMethod::Put | InvokeMethod::Patch => true,
            InvokeMethod::Get
            | InvokeMethod::Delete
            | InvokeMethod::Head
            | InvokeMethod::Options => false,
        }
    }
}

impl FromStr for InvokeMethod {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "get" => Ok(InvokeMethod::Get),
            "post" => Ok(InvokeMethod::Post),
            "put" => Ok(InvokeMethod::Put),
            "patch" => Ok(InvokeMethod::Patch),
            "delete" => Ok(InvokeMethod::Delete),
            "head" => Ok(InvokeMethod::Head),
            "options" => Ok(InvokeMethod::Options),
            other => Err(Error::Validation(format!(
                "the method must take one of these values (get, post, put, patch, delete, head, options), got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for InvokeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_method())
    }
}

///InvokeOptions everything about an invocation besides which function is called
#[derive(Debug, Clone, Default)]
pub struct InvokeOptions {
    pub method: InvokeMethod,
    pub body: Option<Vec<u8>>,
    pub headers: HashMap<String, String>,
    /// path inside the function, e.g. /status
    pub path: Option<String>,
    pub via: Option<InvokeVia>,
}

/// headers of an invocation request. caller headers come first so the
/// function identity always wins; a header that is not valid HTTP is a
/// validation error
pub fn build_invoke_headers(
    name: &str,
    namespace: &str,
    options: &InvokeOptions,
) -> Result<HashMap<String, String>> {
    let mut headers: HashMap<String, String> = HashMap::new();
    for (key, value) in &options.headers {
        check_header(key, value)?;
        headers.insert(key.to_ascii_lowercase(), value.clone());
    }
    if let Some(path) = &options.path {
        check_header(PATH_HEADER, path)?;
        headers.insert(PATH_HEADER.to_string(), path.clone());
    }
    headers.insert(
        INVOKE_VIA_HEADER.to_string(),
        options.via.unwrap_or_default().as_str().to_string(),
    );
    headers.insert(FUNCTION_NAME_HEADER.to_string(), name.to_string());
    headers.insert(FUNCTION_NAMESPACE_HEADER.to_string(), namespace.to_string());
    Ok(headers)
}

fn check_header(key: &str, value: &str) -> Result<()> {
    HeaderName::from_bytes(key.as_bytes())
        .map_err(|_| Error::Validation(format!("invalid header name {:?}", key)))?;
    HeaderValue::from_str(value)
        .map_err(|_| Error::Validation(format!("invalid value for header {}", key)))?;
    Ok(())
}

impl<'s> Client<'s> {
    /// InvokeFunction calls a deployed function through the dashboard and hands
    /// back its raw answer, whatever status or content type it has
    pub async fn invoke_function(
        &self,
        id: &ResourceId,
        options: &InvokeOptions,
    ) -> Result<InvokeResult> {
        let name = id.required_name()?;
        let headers = build_invoke_headers(name, id.namespace.as_str(), options)?;

        let mut req = self.new_request(
            options.method.as_method(),
            FUNCTION_INVOCATIONS_PATH,
            "".into(),
        )?;
        for (key, value) in &headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if options.method.carries_body() {
            if let Some(body) = &options.body {
                req = req.body(body.clone());
            }
        }

        let resp = self.do_request(req.build()?).await?;
        let status_code = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .map(|(key, value)| {
                (
                    key.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = resp.bytes().await?.to_vec();

        Ok(InvokeResult {
            status_code,
            headers,
            body,
        })
    }
}
