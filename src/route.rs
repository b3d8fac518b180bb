//! Route resolution: HTTP verb plus concrete URL for a request
//!
//! Path templates name their placeholders in braces, e.g.
//! `customers/{customer_id}/cards/{card_id}`. Each placeholder is filled from
//! the encoded field with exactly that name, and the field is consumed so it
//! is not sent again as a query or body parameter.

use crate::form::{to_form_body, FormFields};
use crate::{GatewayError, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

/// Characters escaped when a field value is placed in a path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// HTTP verb a request is declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Delete,
}

impl Verb {
    /// The matching `http` method
    pub fn method(&self) -> http::Method {
        match self {
            Verb::Get => http::Method::GET,
            Verb::Post => http::Method::POST,
            Verb::Delete => http::Method::DELETE,
        }
    }

    /// Whether remaining fields travel in a form body rather than the query
    pub fn sends_body(&self) -> bool {
        matches!(self, Verb::Post)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request's verb, concrete path and the fields left after substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub verb: Verb,
    /// Path relative to the API base, placeholders substituted
    pub path: String,
    /// Fields not consumed by the path
    pub params: FormFields,
}

impl ResolvedRoute {
    /// Absolute URL under `base`; GET and DELETE carry the params as the query
    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.join(self.path.trim_start_matches('/')).map_err(|e| {
            GatewayError::validation(format!("Invalid path '{}': {}", self.path, e))
        })?;

        if !self.verb.sends_body() && !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(
                self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }

        Ok(url)
    }

    /// Form body for POST; `None` for verbs that use the query string
    pub fn body(&self) -> Option<String> {
        self.verb.sends_body().then(|| to_form_body(&self.params))
    }
}

/// Substitute placeholders in `template` from `fields`
pub fn resolve(template: &str, verb: Verb, mut fields: FormFields) -> Result<ResolvedRoute> {
    let mut path = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        path.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| {
            GatewayError::validation(format!("Unterminated placeholder in route {}", template))
        })?;

        let name = &after[..close];
        if name.is_empty() {
            return Err(GatewayError::validation(format!(
                "Empty placeholder in route {}",
                template
            )));
        }

        let position = fields
            .iter()
            .position(|(key, _)| key == name)
            .ok_or_else(|| GatewayError::missing_path_parameter(name, template))?;
        let (_, value) = fields.remove(position);
        if value.trim().is_empty() {
            return Err(GatewayError::missing_path_parameter(name, template));
        }

        path.extend(utf8_percent_encode(&value, PATH_SEGMENT));
        rest = &after[close + 1..];
    }
    path.push_str(rest);

    Ok(ResolvedRoute {
        verb,
        path,
        params: fields,
    })
}
