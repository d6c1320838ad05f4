//! Template renderer.

use crate::mantis::{Issue, User};
use crate::templates::TemplateError;
use crate::users::UserSet;
use handlebars::{no_escape, Handlebars, Template};
use serde_json::{json, Value};
use std::path::Path;

/// Built-in issue body template.
///
/// Sections are separated by a blank line only when something precedes them.
pub const DEFAULT_ISSUE_BODY_TEMPLATE: &str = "{{description}}\
{{#if steps_to_reproduce}}{{#if description}}\n\n{{/if}}\
## Steps to reproduce\n\n{{steps_to_reproduce}}{{/if}}\
{{#if additional_information}}{{#if (or description steps_to_reproduce)}}\n\n{{/if}}\
## Additional information\n\n{{additional_information}}{{/if}}";

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs
}

/// Renders GitHub issue bodies from Mantis issues.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
    issue_template: String,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Creates a renderer using [`DEFAULT_ISSUE_BODY_TEMPLATE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
            issue_template: DEFAULT_ISSUE_BODY_TEMPLATE.to_string(),
        }
    }

    /// Creates a renderer using a custom issue body template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not compile.
    pub fn with_issue_template(template: &str) -> Result<Self, TemplateError> {
        Template::compile(template)?;
        Ok(Self {
            handlebars: create_handlebars_registry(),
            issue_template: template.to_string(),
        })
    }

    /// Creates a renderer from an issue body template file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not compile.
    pub fn from_template_file(path: &Path) -> Result<Self, TemplateError> {
        let template = std::fs::read_to_string(path).map_err(|e| TemplateError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::with_issue_template(&template)
    }

    /// Renders the markdown body for `issue`.
    ///
    /// Besides the text fields, templates can reference `id`, `summary`,
    /// `project`, `status`, `resolution`, `reporter` and `handler`. The
    /// `login` of a user is its substitute in `users`, or empty.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_issue_body(
        &self,
        issue: &Issue,
        users: &UserSet,
    ) -> Result<String, TemplateError> {
        let data = issue_data(issue, users);
        Ok(self
            .handlebars
            .render_template(&self.issue_template, &data)?)
    }
}

fn issue_data(issue: &Issue, users: &UserSet) -> Value {
    json!({
        "id": issue.id,
        "summary": issue.summary,
        "description": issue.description,
        "steps_to_reproduce": issue.steps_to_reproduce.as_deref().unwrap_or(""),
        "additional_information": issue.additional_information.as_deref().unwrap_or(""),
        "project": issue.project.name,
        "status": issue.status.name,
        "resolution": issue.resolution.as_ref().map_or("", |resolution| resolution.name.as_str()),
        "reporter": user_data(Some(&issue.reporter), users),
        "handler": user_data(issue.handler.as_ref(), users),
    })
}

fn user_data(user: Option<&User>, users: &UserSet) -> Value {
    match user {
        Some(user) => json!({
            "name": user.name,
            "real_name": user.real_name,
            "login": users.substitute_for(user.id).unwrap_or(""),
        }),
        None => json!({ "name": "", "real_name": "", "login": "" }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mantis::{CodeRef, Project};

    fn sample_issue() -> Issue {
        Issue {
            id: 42,
            summary: "Crash on save".to_string(),
            description: "The editor crashes.".to_string(),
            steps_to_reproduce: None,
            additional_information: None,
            status: CodeRef {
                id: 10,
                name: "new".to_string(),
            },
            resolution: None,
            reporter: User {
                id: 1,
                name: "alice".to_string(),
                real_name: "Alice".to_string(),
                email: String::new(),
                substitute: None,
            },
            handler: None,
            project: Project {
                id: 1,
                name: "Core".to_string(),
            },
            notes: Vec::new(),
        }
    }

    #[test]
    fn renders_description_only() {
        let body = TemplateRenderer::new()
            .render_issue_body(&sample_issue(), &UserSet::default())
            .unwrap();
        assert_eq!(body, "The editor crashes.");
    }

    #[test]
    fn renders_sections_in_fixed_order() {
        let mut issue = sample_issue();
        issue.steps_to_reproduce = Some("1. Open\n2. Save".to_string());
        issue.additional_information = Some("Since 2.0".to_string());

        let body = TemplateRenderer::new()
            .render_issue_body(&issue, &UserSet::default())
            .unwrap();

        assert_eq!(
            body,
            "The editor crashes.\n\n## Steps to reproduce\n\n1. Open\n2. Save\n\n## Additional information\n\nSince 2.0"
        );
    }

    #[test]
    fn renders_additional_information_without_steps() {
        let mut issue = sample_issue();
        issue.additional_information = Some("Since 2.0".to_string());

        let body = TemplateRenderer::new()
            .render_issue_body(&issue, &UserSet::default())
            .unwrap();

        assert_eq!(
            body,
            "The editor crashes.\n\n## Additional information\n\nSince 2.0"
        );
        assert!(!body.contains("Steps to reproduce"));
    }

    #[test]
    fn no_html_escaping() {
        let mut issue = sample_issue();
        issue.description = "<b>bold</b> & `code`".to_string();

        let body = TemplateRenderer::new()
            .render_issue_body(&issue, &UserSet::default())
            .unwrap();

        assert_eq!(body, "<b>bold</b> & `code`");
    }

    #[test]
    fn custom_template_sees_issue_metadata() {
        let renderer = TemplateRenderer::with_issue_template(
            "{{description}}\n\n_Mantis #{{id}} ({{project}}) by {{reporter.name}} / @{{reporter.login}}_",
        )
        .unwrap();
        let users: UserSet = [User {
            substitute: Some("alice-gh".to_string()),
            ..sample_issue().reporter
        }]
        .into_iter()
        .collect();

        let body = renderer.render_issue_body(&sample_issue(), &users).unwrap();

        assert_eq!(
            body,
            "The editor crashes.\n\n_Mantis #42 (Core) by alice / @alice-gh_"
        );
    }

    #[test]
    fn unsubstituted_users_render_empty_login() {
        let renderer =
            TemplateRenderer::with_issue_template("r=@{{reporter.login}} h=@{{handler.login}}")
                .unwrap();

        let body = renderer
            .render_issue_body(&sample_issue(), &UserSet::default())
            .unwrap();

        assert_eq!(body, "r=@ h=@");
    }

    #[test]
    fn sections_without_description_have_no_leading_separator() {
        let mut issue = sample_issue();
        issue.description = String::new();
        issue.steps_to_reproduce = Some("Click save".to_string());

        let body = TemplateRenderer::new()
            .render_issue_body(&issue, &UserSet::default())
            .unwrap();

        assert_eq!(body, "## Steps to reproduce\n\nClick save");
    }

    #[test]
    fn additional_information_alone_has_no_leading_separator() {
        let mut issue = sample_issue();
        issue.description = String::new();
        issue.additional_information = Some("Since 2.0".to_string());

        let body = TemplateRenderer::new()
            .render_issue_body(&issue, &UserSet::default())
            .unwrap();

        assert_eq!(body, "## Additional information\n\nSince 2.0");
    }

    #[test]
    fn leading_newlines_of_description_are_kept() {
        let mut issue = sample_issue();
        issue.description = "\n\n    indented log line".to_string();

        let body = TemplateRenderer::new()
            .render_issue_body(&issue, &UserSet::default())
            .unwrap();

        assert_eq!(body, "\n\n    indented log line");
    }

    #[test]
    fn invalid_custom_template_is_rejected() {
        let result = TemplateRenderer::with_issue_template("{{#if description}}unclosed");
        assert!(matches!(
            result,
            Err(TemplateError::RegistrationError(_))
        ));
    }
}
