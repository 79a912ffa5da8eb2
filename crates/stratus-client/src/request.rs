//! Request descriptors.

use reqwest::Method;
use serde_json::Value;

use stratus_core::{resolve_template, TemplateError};

/// One operation's worth of request: method, path template, placeholder
/// values, and an optional JSON body.
///
/// Created per call and consumed by the exchange. The placeholder values
/// must cover the template's placeholders exactly; the `{+base_path}` slot
/// is filled in at resolution time from the endpoint configuration.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    template: &'static str,
    params: Vec<(&'static str, String)>,
    body: Option<String>,
}

impl RequestDescriptor {
    pub fn new(method: Method, template: &'static str) -> Self {
        Self {
            method,
            template,
            params: Vec::new(),
            body: None,
        }
    }

    /// Supply a placeholder value.
    pub fn param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn json_body(mut self, body: &Value) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Expand the template into a concrete, percent-encoded path.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] if the placeholder values and the
    /// template do not cover each other exactly.
    pub fn resolve(&self, base_path: &str) -> Result<String, TemplateError> {
        let mut params: Vec<(&str, &str)> = Vec::with_capacity(self.params.len() + 1);
        params.push(("base_path", base_path));
        params.extend(self.params.iter().map(|(name, value)| (*name, value.as_str())));
        resolve_template(self.template, &params)
    }
}
