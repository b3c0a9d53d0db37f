use crate::client::{Client, ClientAuth};
use reqwest::RequestBuilder;
use utility::{Error, Result};

///NoAuth for dashboards reachable without credentials, the usual local setup
#[derive(Clone, Debug, Default)]
pub struct NoAuth;

impl ClientAuth for NoAuth {
    fn set(&self, _req: &mut RequestBuilder) -> Result<()> {
        Ok(())
    }
}

///basic authentication type, for dashboards behind an authenticating proxy
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

///bearer token
pub struct BearerToken {
    token: String,
}

impl ClientAuth for BasicAuth {
    fn set(&self, req: &mut RequestBuilder) -> Result<()> {
        let req2 = req
            .try_clone()
            .ok_or_else(|| Error::Custom(format!("can't clone request :{:?}", req)))?;
        *req = req2.basic_auth(self.username.as_str(), Some(self.password.as_str()));
        Ok(())
    }
}

impl ClientAuth for BearerToken {
    fn set(&self, req: &mut RequestBuilder) -> Result<()> {
        let req2 = req
            .try_clone()
            .ok_or_else(|| Error::Custom(format!("can't clone request :{:?}", req)))?;
        *req = req2.header("Authorization", "Bearer ".to_string() + self.token.as_str());
        Ok(())
    }
}

pub enum ClientAuthE {
    NoAuth(NoAuth),
    BasicAuth(BasicAuth),
    BearerToken(BearerToken),
}

impl ClientAuthE {
    ///picks the authentication from the CLI flags, a token wins over a username
    pub fn new(username: &str, password: &str, token: &str) -> ClientAuthE {
        if !token.is_empty() {
            ClientAuthE::BearerToken(BearerToken {
                token: token.to_string(),
            })
        } else if !username.is_empty() {
            ClientAuthE::BasicAuth(BasicAuth {
                username: username.to_string(),
                password: password.to_string(),
            })
        } else {
            ClientAuthE::NoAuth(NoAuth)
        }
    }

    pub fn get_client(&self, dashboard: &str) -> Result<Client> {
        match self {
            ClientAuthE::NoAuth(none) => Client::new(Box::new(none), dashboard),
            ClientAuthE::BasicAuth(basic) => Client::new(Box::new(basic), dashboard),
            ClientAuthE::BearerToken(bearer) => Client::new(Box::new(bearer), dashboard),
        }
    }
}
