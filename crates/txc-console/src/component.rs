//! Static HTML fragments pulled into named containers of a page layout.
use std::collections::BTreeMap;

use reqwest::{Client, Url};
use tracing::{debug, error};

use crate::error::{ConsoleError, ConsoleResult};

/// Named containers and the markup currently held by each.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    containers: BTreeMap<String, String>,
}

impl Layout {
    /// Layout with empty `containers`.
    pub fn with_containers<I, S>(containers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            containers: containers
                .into_iter()
                .map(|c| (c.into(), String::new()))
                .collect(),
        }
    }

    pub fn contains(&self, container: &str) -> bool {
        self.containers.contains_key(container)
    }

    pub fn get(&self, container: &str) -> Option<&str> {
        self.containers.get(container).map(String::as_str)
    }

    fn set(&mut self, container: &str, html: String) -> ConsoleResult<()> {
        let slot = self
            .containers
            .get_mut(container)
            .ok_or_else(|| ConsoleError::UnknownContainer(container.to_string()))?;
        *slot = html;
        Ok(())
    }
}

/// Fetches fragments relative to a base URL.
#[derive(Clone, Debug)]
pub struct ComponentLoader {
    base: Url,
    http: Client,
}

impl ComponentLoader {
    pub fn new(base: &str) -> ConsoleResult<Self> {
        let base = Url::parse(base)
            .map_err(|e| ConsoleError::Component(format!("invalid base url {base}: {e}")))?;
        Ok(Self {
            base,
            http: Client::new(),
        })
    }

    /// Load `path` into `container`.
    ///
    /// On a failed fetch the container receives an inline error fragment and
    /// the error is returned. An unknown container is rejected before any
    /// request is made.
    pub async fn load(
        &self,
        layout: &mut Layout,
        container: &str,
        path: &str,
    ) -> ConsoleResult<()> {
        if !layout.contains(container) {
            return Err(ConsoleError::UnknownContainer(container.to_string()));
        }

        match self.fetch(path).await {
            Ok(html) => {
                debug!(container, path, bytes = html.len(), "component loaded");
                layout.set(container, html)
            }
            Err(e) => {
                error!(container, path, error = %e, "error loading component");
                layout.set(container, error_fragment(&e.to_string()))?;
                Err(e)
            }
        }
    }

    async fn fetch(&self, path: &str) -> ConsoleResult<String> {
        let url = self
            .base
            .join(path)
            .map_err(|e| ConsoleError::Component(format!("invalid component path {path}: {e}")))?;
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ConsoleError::Component(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ConsoleError::Component(format!(
                "Failed to load component: {}",
                status.as_u16()
            )));
        }
        resp.text()
            .await
            .map_err(|e| ConsoleError::Component(e.to_string()))
    }
}

/// Inline markup shown in place of a component that failed to load.
pub fn error_fragment(message: &str) -> String {
    format!(
        r#"<div class="component-error">Error loading component: {}</div>"#,
        escape_html(message)
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
