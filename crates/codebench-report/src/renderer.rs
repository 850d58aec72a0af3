//! Template rendering for comparison reports.
//!
//! Uses Handlebars with HTML escaping disabled (the output is Markdown) and
//! a few custom helpers:
//! - fixed1: number with one decimal, `N/A` for anything else
//! - millis: whole milliseconds, `N/A` for anything else
//! - truncate: cut a string to a maximum number of characters
//! - default: fallback for null or missing values

use handlebars::{Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext};
use serde::Serialize;

use crate::templates::TemplatesFile;

/// Compiled renderer with registered helpers
pub struct ReportRenderer<'a> {
    handlebars: Handlebars<'a>,
    templates: TemplatesFile,
}

impl<'a> ReportRenderer<'a> {
    /// Compile every template in the file
    pub fn new(templates: TemplatesFile) -> Result<Self, String> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars.register_helper("fixed1", Box::new(Fixed1Helper));
        handlebars.register_helper("millis", Box::new(MillisHelper));
        handlebars.register_helper("truncate", Box::new(TruncateHelper));
        handlebars.register_helper("default", Box::new(DefaultHelper));

        for (name, template) in &templates.templates {
            handlebars
                .register_template_string(name, &template.template)
                .map_err(|e| format!("Template {} failed to compile: {}", name, e))?;
        }

        Ok(ReportRenderer { handlebars, templates })
    }

    /// Renderer over the built-in templates
    pub fn builtin() -> Result<Self, String> {
        Self::new(TemplatesFile::builtin()?)
    }

    pub fn load(path: &str) -> Result<Self, String> {
        Self::new(TemplatesFile::load(path)?)
    }

    /// Render a named template with data
    pub fn render<T: Serialize>(&self, template_name: &str, data: &T) -> Result<String, String> {
        if self.templates.get(template_name).is_none() {
            return Err(format!("Unknown template: {}", template_name));
        }
        self.handlebars
            .render(template_name, data)
            .map_err(|e| format!("Render error: {}", e))
    }

    pub fn list_templates(&self) -> Vec<&str> {
        self.templates.list_templates()
    }
}

// ============================================================================
// Custom Helpers
// ============================================================================

/// Format a number with one decimal (82.666 -> "82.7"), `N/A` otherwise
struct Fixed1Helper;

impl HelperDef for Fixed1Helper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        match h.param(0).and_then(|v| v.value().as_f64()) {
            Some(value) => out.write(&format!("{:.1}", value))?,
            None => out.write("N/A")?,
        }
        Ok(())
    }
}

/// Round a duration to whole milliseconds (1523.7 -> "1524")
struct MillisHelper;

impl HelperDef for MillisHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        match h.param(0).and_then(|v| v.value().as_f64()) {
            Some(value) => out.write(&format!("{:.0}", value))?,
            None => out.write("N/A")?,
        }
        Ok(())
    }
}

/// Truncate a string to max characters with ellipsis
struct TruncateHelper;

impl HelperDef for TruncateHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let text = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
        let max_len = h.param(1).and_then(|v| v.value().as_u64()).unwrap_or(100) as usize;

        match text.char_indices().nth(max_len) {
            Some((cut, _)) => {
                out.write(&text[..cut])?;
                out.write("...")?;
            }
            None => out.write(text)?,
        }
        Ok(())
    }
}

/// Default value helper
struct DefaultHelper;

impl HelperDef for DefaultHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let value = h.param(0).map(|v| v.value());
        let default = h.param(1).and_then(|v| v.value().as_str()).unwrap_or("");

        match value {
            Some(v) if !v.is_null() => match v.as_str() {
                Some(s) => out.write(s)?,
                None => out.write(&v.to_string())?,
            },
            _ => out.write(default)?,
        }
        Ok(())
    }
}
