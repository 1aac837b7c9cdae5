// vigie-core/src/infrastructure/render/jinja.rs

// Bridges the `.j2` template artifacts (kept in sync by the report patcher)
// and ad-hoc SQL parameter substitution back to renderable output.

use std::path::Path;

use minijinja::Environment;

use crate::application::ports::TemplateEngine;
use crate::error::VigieError;
use crate::infrastructure::error::InfrastructureError;

pub struct JinjaRenderer<'a> {
    env: Environment<'a>,
}

impl<'a> JinjaRenderer<'a> {
    pub fn new() -> Self {
        let mut env = Environment::new();

        // Basic filters the docs templates lean on
        env.add_filter("upper", |value: String| value.to_uppercase());
        env.add_filter("lower", |value: String| value.to_lowercase());

        Self { env }
    }

    /// Renderer whose templates are loaded from a directory (the `.j2`
    /// artifacts written by the patcher live there).
    pub fn with_template_dir(templates_dir: &Path) -> Self {
        let mut renderer = Self::new();
        renderer
            .env
            .set_loader(minijinja::path_loader(templates_dir));
        renderer
    }

    /// Render a named template from the configured directory.
    pub fn render_template(
        &self,
        name: &str,
        context: &serde_json::Value,
    ) -> Result<String, InfrastructureError> {
        let tmpl = self.env.get_template(name)?;
        tmpl.render(context).map_err(InfrastructureError::TemplateError)
    }
}

impl<'a> Default for JinjaRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> TemplateEngine for JinjaRenderer<'a> {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, VigieError> {
        self.env
            .render_str(template, context)
            .map_err(|e| VigieError::Infrastructure(InfrastructureError::TemplateError(e)))
    }
}
