//! HTML rendering through minijinja.
//!
//! Templates are embedded at compile time and parsed once at startup.

use minijinja::Environment;
use serde::Serialize;

use crate::http::error::AppError;

/// The template environment shared by all handlers.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("index.html", include_str!("../templates/index.html"))?;
        env.add_template("dashboard.html", include_str!("../templates/dashboard.html"))?;
        env.add_template("activity.html", include_str!("../templates/activity.html"))?;
        env.add_template(
            "branch_diffs.html",
            include_str!("../templates/branch_diffs.html"),
        )?;
        env.add_template(
            "branch_summary.html",
            include_str!("../templates/branch_summary.html"),
        )?;
        env.add_template("commit.html", include_str!("../templates/commit.html"))?;
        env.add_template("json.html", include_str!("../templates/json.html"))?;
        Ok(Self { env })
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, ctx: impl Serialize) -> Result<String, AppError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| AppError::Render(e.to_string()))?;
        template
            .render(ctx)
            .map_err(|e| AppError::Render(e.to_string()))
    }
}

/// Minimal HTML escaping for the one place that renders without the
/// template environment (the error response body).
pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn all_templates_parse() {
        let templates = Templates::new().unwrap();
        let html = templates
            .render("index.html", context! {})
            .unwrap();
        assert!(html.contains("/login"));
    }

    #[test]
    fn html_escape_neutralizes_markup() {
        assert_eq!(
            html_escape("<script>\"&'"),
            "&lt;script&gt;&quot;&amp;&#39;"
        );
    }
}
