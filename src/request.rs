use serde::Serialize;

use crate::Result;

/// HTTP methods used by the revocation API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Description of one logical API call: method, path below the base URL and
/// optional JSON body.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
    method: Method,
    segments: Vec<String>,
    body: Option<serde_json::Value>,
}

impl RequestDescriptor {
    /// Builds a `GET` request for the given path segments.
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::Get, segments, None)
    }

    /// Builds a `POST` request with a JSON body.
    pub fn post<I, S, B>(segments: I, body: &B) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        Ok(Self::new(Method::Post, segments, Some(body)))
    }

    /// Builds a `DELETE` request for the given path segments.
    pub fn delete<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::Delete, segments, None)
    }

    fn new<I, S>(method: Method, segments: I, body: Option<serde_json::Value>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            body,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Unencoded path segments, joined onto the base URL by the executor.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Path as `/a/b/c`, for diagnostics.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}
