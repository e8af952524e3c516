//! Prompt composition from a tool's templates and optional context.
//!
//! Sections, each present only when its input exists and the tool defines
//! the template, joined by a blank line:
//!
//! 1. system prompt
//! 2. Jira prompt with story fields substituted
//! 3. URL processing prompt
//! 4. file processing prompt plus the file list
//! 5. user template with `{content}` substituted
//!
//! Placeholders are substituted at their first occurrence only.

use crate::catalog::prompt_spec;
use crate::entities::{JiraStory, PromptContext, ToolPromptSpec, UrlInsight};

const SECTION_SEPARATOR: &str = "\n\n";

fn render_jira(template: &str, story: &JiraStory) -> String {
    template
        .replacen("{title}", &story.title, 1)
        .replacen("{description}", &story.description, 1)
        .replacen("{acceptanceCriteria}", &story.acceptance_criteria.join("\n"), 1)
}

fn compose(
    spec: &ToolPromptSpec,
    user_input: Option<&str>,
    jira: Option<&JiraStory>,
    url: Option<&UrlInsight>,
    file_names: &[String],
) -> String {
    let mut sections: Vec<String> = vec![spec.system_prompt.to_string()];

    if let (Some(story), Some(template)) = (jira, spec.jira_processing_prompt) {
        sections.push(render_jira(template, story));
    }

    if let (Some(_), Some(template)) = (url, spec.url_processing_prompt) {
        sections.push(template.to_string());
    }

    if let (false, Some(template)) = (file_names.is_empty(), spec.file_processing_prompt) {
        sections.push(format!(
            "{template}{SECTION_SEPARATOR}Files to analyze: {}",
            file_names.join(", ")
        ));
    }

    if let Some(input) = user_input.filter(|s| !s.is_empty()) {
        sections.push(spec.user_prompt_template.replacen("{content}", input, 1));
    }

    sections.join(SECTION_SEPARATOR)
}

/// Prompt for `tool_id`, or `None` when the tool is not in the catalog
pub fn compose_prompt(tool_id: &str, context: &PromptContext) -> Option<String> {
    let spec = prompt_spec(tool_id)?;
    Some(compose(
        spec,
        context.user_input.as_deref(),
        context.jira.as_ref(),
        context.url.as_ref(),
        &context.file_names,
    ))
}

/// Like [`compose_prompt`] but an unknown tool yields an empty string
pub fn build_prompt(
    tool_id: &str,
    user_input: Option<&str>,
    jira: Option<&JiraStory>,
    url: Option<&UrlInsight>,
    file_names: Option<&[String]>,
) -> String {
    match prompt_spec(tool_id) {
        Some(spec) => compose(spec, user_input, jira, url, file_names.unwrap_or_default()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story() -> JiraStory {
        JiraStory {
            id: "QA-7".into(),
            title: "Checkout".into(),
            description: "Pay with card".into(),
            acceptance_criteria: vec!["Card accepted".into(), "Receipt emailed".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_plain_prompt_is_system_plus_user() {
        let spec = prompt_spec("lighthouse").unwrap();
        let prompt = build_prompt("lighthouse", Some("https://shop.test"), None, None, None);
        let expected = format!(
            "{}\n\n{}",
            spec.system_prompt,
            spec.user_prompt_template.replace("{content}", "https://shop.test")
        );
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_unknown_tool() {
        assert_eq!(build_prompt("nope", Some("x"), None, None, None), "");
        assert!(compose_prompt("nope", &PromptContext::with_input("x")).is_none());
    }

    #[test]
    fn test_jira_section_substitution() {
        let prompt = build_prompt("test-generator", None, Some(&story()), None, None);
        assert!(prompt.contains("Generate test cases for the Jira story: Checkout"));
        assert!(prompt.contains("Description: Pay with card"));
        assert!(prompt.contains("Acceptance Criteria:\nCard accepted\nReceipt emailed"));
    }

    #[test]
    fn test_jira_ignored_for_tool_without_template() {
        let with = build_prompt("xpath-generator", Some("login button"), Some(&story()), None, None);
        let without = build_prompt("xpath-generator", Some("login button"), None, None, None);
        assert_eq!(with, without);
    }

    #[test]
    fn test_section_order() {
        let url = UrlInsight {
            url: "https://shop.test".into(),
            ..Default::default()
        };
        let files = vec!["spec.pdf".to_string(), "flows.md".to_string()];
        let prompt = build_prompt(
            "test-generator",
            Some("Guest checkout"),
            Some(&story()),
            Some(&url),
            Some(files.as_slice()),
        );

        let jira_at = prompt.find("Jira story: Checkout").unwrap();
        let url_at = prompt.find("Analyze the website at the provided URL").unwrap();
        let files_at = prompt.find("Files to analyze: spec.pdf, flows.md").unwrap();
        let user_at = prompt.find("Guest checkout").unwrap();
        assert!(jira_at < url_at && url_at < files_at && files_at < user_at);
    }

    #[test]
    fn test_empty_file_list_adds_nothing() {
        let none = build_prompt("json-analyzer", Some("{}"), None, None, None);
        let no_files: Vec<String> = Vec::new();
        let empty = build_prompt("json-analyzer", Some("{}"), None, None, Some(no_files.as_slice()));
        assert_eq!(none, empty);
        assert!(!empty.contains("Files to analyze"));
    }

    #[test]
    fn test_substitution_does_not_recurse() {
        let prompt = build_prompt("chatbot", Some("what is {content}?"), None, None, None);
        assert!(prompt.contains("QA Question: what is {content}?"));
    }

    #[test]
    fn test_compose_prompt_matches_build_prompt() {
        let ctx = PromptContext::with_input("Refund flow").jira(story());
        assert_eq!(
            compose_prompt("defect-analyzer", &ctx).unwrap(),
            build_prompt("defect-analyzer", Some("Refund flow"), Some(&story()), None, None)
        );
    }
}
