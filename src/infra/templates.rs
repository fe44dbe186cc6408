//! Page rendering with minijinja.

use std::path::Path;

use minijinja::{path_loader, Environment};
use serde_json::Value as JsonValue;

use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Page renderer trait: template identifier + context in, HTML out.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait PageRenderer: Send + Sync {
    fn render(&self, template: &str, context: &JsonValue) -> AppResult<String>;
}

/// Renders templates loaded lazily from a directory.
///
/// `.html` templates are auto-escaped; templates may `{% extends %}` each other.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    pub fn new(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(AppError::configuration(format!(
                "Templates directory not found: {}",
                dir.display()
            )));
        }

        let mut env = Environment::new();
        env.set_loader(path_loader(dir));

        Ok(Self { env })
    }
}

impl PageRenderer for TemplateRenderer {
    fn render(&self, template: &str, context: &JsonValue) -> AppResult<String> {
        let template = self.env.get_template(template)?;
        Ok(template.render(context)?)
    }
}
