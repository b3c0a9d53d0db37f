use std::borrow::Cow;
use std::collections::HashMap;
use std::str::FromStr;
use utility::Error;

///InvokeVia how the dashboard reaches the function it invokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvokeVia {
    ExternalIp,
    LoadBalancer,
    DomainName,
}

impl Default for InvokeVia {
    fn default() -> Self {
        InvokeVia::ExternalIp
    }
}

impl InvokeVia {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvokeVia::ExternalIp => "external-ip",
            InvokeVia::LoadBalancer => "loadbalancer",
            InvokeVia::DomainName => "domain-name",
        }
    }
}

impl FromStr for InvokeVia {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "external-ip" => Ok(InvokeVia::ExternalIp),
            "loadbalancer" => Ok(InvokeVia::LoadBalancer),
            "domain-name" => Ok(InvokeVia::DomainName),
            other => Err(Error::Validation(format!(
                "invoke via must be one of external-ip, loadbalancer, domain-name, got {}",
                other
            ))),
        }
    }
}

///InvokeResult the raw answer of a function invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvokeResult {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl InvokeResult {
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
