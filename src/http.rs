use reqwest::Url;
use std::fmt;

use crate::error::CustomError;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
        };
        f.write_str(name)
    }
}

impl TryFrom<&str> for Method {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, anyhow::Error> {
        match value {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            _ => Err(anyhow::anyhow!("Method not supported")),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

/// Base url of the API. Resource urls are built from path segments, each
/// percent-encoded, so identifiers never change the request's shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
}

impl Endpoint {
    pub fn parse(url: &str) -> Result<Self, CustomError> {
        let invalid = || CustomError::BaseUrlError(url.to_string());
        let base = Url::parse(url.trim()).map_err(|_| invalid())?;
        if !matches!(base.scheme(), "http" | "https")
            || base.cannot_be_a_base()
            || base.host_str().is_none_or(str::is_empty)
        {
            return Err(invalid());
        }
        Ok(Endpoint { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `/<prefix>/<collection>/`
    pub fn collection(&self, collection: &str) -> Result<Url, CustomError> {
        self.join(&[collection, ""])
    }

    /// `/<prefix>/<collection>/<id>`
    pub fn item(&self, collection: &str, id: &str) -> Result<Url, CustomError> {
        self.join(&[collection, id])
    }

    /// `/<prefix>/<collection>/<id>/<nested>/`
    pub fn nested(&self, collection: &str, id: &str, nested: &str) -> Result<Url, CustomError> {
        self.join(&[collection, id, nested, ""])
    }

    fn join(&self, segments: &[&str]) -> Result<Url, CustomError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| CustomError::BaseUrlError(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
