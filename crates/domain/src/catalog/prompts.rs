//! Prompt templates per tool

use crate::entities::ToolPromptSpec;

pub static PROMPTS: [ToolPromptSpec; 10] = [
    ToolPromptSpec {
        id: "test-generator",
        name: "Test Generator",
        system_prompt: "You are an expert QA engineer specialized in creating comprehensive test cases. Generate detailed, actionable test scenarios with clear steps, expected results, and edge cases.",
        user_prompt_template: "Generate comprehensive test cases for the following requirements:\n\n{content}\n\nInclude positive, negative, and edge case scenarios.",
        file_processing_prompt: Some("Analyze the uploaded files and generate test cases based on the requirements, user stories, or specifications found in the files."),
        url_processing_prompt: Some("Analyze the website at the provided URL and generate appropriate test cases for its functionality and user interface."),
        jira_processing_prompt: Some("Generate test cases for the Jira story: {title}\n\nDescription: {description}\n\nAcceptance Criteria:\n{acceptanceCriteria}"),
    },
    ToolPromptSpec {
        id: "ac-validator",
        name: "AC Validator",
        system_prompt: "You are an expert in acceptance criteria validation. Analyze acceptance criteria for completeness, clarity, testability, and adherence to best practices.",
        user_prompt_template: "Validate the following acceptance criteria for completeness and quality:\n\n{content}\n\nProvide specific feedback and improvement suggestions.",
        file_processing_prompt: Some("Extract and validate acceptance criteria from the uploaded files. Identify missing elements and suggest improvements."),
        url_processing_prompt: Some("Analyze the website functionality and suggest proper acceptance criteria that should be defined for this application."),
        jira_processing_prompt: Some("Validate the acceptance criteria for Jira story {title}:\n\n{acceptanceCriteria}\n\nCheck for completeness, clarity, and testability."),
    },
    ToolPromptSpec {
        id: "xpath-generator",
        name: "XPath Generator",
        system_prompt: "You are an expert in web automation and XPath generation. Create robust, maintainable XPath selectors for web elements.",
        user_prompt_template: "Generate XPath selectors for the following web elements or page description:\n\n{content}\n\nProvide multiple XPath options (absolute, relative, and robust selectors).",
        file_processing_prompt: Some("Analyze the uploaded HTML/XML files and generate appropriate XPath selectors for the elements found."),
        url_processing_prompt: Some("Analyze the website structure at the provided URL and generate XPath selectors for key interactive elements like buttons, forms, links, and navigation elements."),
        jira_processing_prompt: None,
    },
    ToolPromptSpec {
        id: "json-analyzer",
        name: "JSON Analyzer",
        system_prompt: "You are an expert in JSON structure analysis and validation. Analyze JSON data for structure, validity, performance implications, and potential issues.",
        user_prompt_template: "Analyze the following JSON structure:\n\n{content}\n\nProvide insights on structure, validation, potential issues, and optimization suggestions.",
        file_processing_prompt: Some("Analyze the uploaded JSON files for structure validity, data consistency, and potential issues."),
        url_processing_prompt: Some("Analyze JSON API responses from the provided URL endpoint and provide structure analysis and validation feedback."),
        jira_processing_prompt: None,
    },
    ToolPromptSpec {
        id: "ada-analyzer",
        name: "ADA Analyzer",
        system_prompt: "You are an accessibility expert specializing in ADA compliance analysis. Evaluate web content for accessibility issues and provide remediation guidance.",
        user_prompt_template: "Analyze the following content for ADA compliance:\n\n{content}\n\nIdentify accessibility issues and provide specific remediation steps.",
        file_processing_prompt: Some("Analyze uploaded files (HTML, CSS, images) for accessibility compliance issues and provide detailed remediation recommendations."),
        url_processing_prompt: Some("Perform a comprehensive ADA compliance analysis of the website at the provided URL. Check for WCAG 2.1 compliance issues including color contrast, keyboard navigation, screen reader compatibility, and semantic HTML structure."),
        jira_processing_prompt: None,
    },
    ToolPromptSpec {
        id: "lighthouse",
        name: "Lighthouse",
        system_prompt: "You are a web performance and quality expert. Analyze websites for performance, accessibility, best practices, and SEO using Lighthouse methodology.",
        user_prompt_template: "Perform a Lighthouse-style analysis on:\n\n{content}\n\nProvide performance metrics, accessibility scores, and optimization recommendations.",
        file_processing_prompt: Some("Analyze uploaded web files for performance optimization opportunities and best practices compliance."),
        url_processing_prompt: Some("Perform a comprehensive Lighthouse analysis of the website at the provided URL. Evaluate performance metrics (Core Web Vitals), accessibility, SEO, and best practices. Provide specific optimization recommendations."),
        jira_processing_prompt: None,
    },
    ToolPromptSpec {
        id: "chatbot",
        name: "QA Chatbot",
        system_prompt: "You are an intelligent QA assistant with expertise in testing methodologies, automation frameworks, and quality assurance best practices. Provide helpful, accurate answers to QA-related questions.",
        user_prompt_template: "QA Question: {content}\n\nProvide a comprehensive answer with practical examples and best practices.",
        file_processing_prompt: Some("Analyze the uploaded QA documentation or test files and answer questions or provide insights based on the content."),
        url_processing_prompt: Some("Analyze the website at the provided URL and answer QA-related questions about testing strategies, potential issues, or quality recommendations for this application."),
        jira_processing_prompt: None,
    },
    ToolPromptSpec {
        id: "defect-analyzer",
        name: "Defect Analyzer",
        system_prompt: "You are an expert in defect analysis and root cause investigation. Analyze defects to identify patterns, root causes, and prevention strategies.",
        user_prompt_template: "Analyze the following defect information:\n\n{content}\n\nProvide root cause analysis, impact assessment, and prevention recommendations.",
        file_processing_prompt: Some("Analyze uploaded defect reports, logs, or bug documentation to identify patterns and root causes."),
        url_processing_prompt: Some("Analyze the website for potential defect-prone areas and common issues that might occur in this type of application."),
        jira_processing_prompt: Some("Analyze the defect reported in Jira story {title}:\n\nDescription: {description}\n\nProvide root cause analysis and prevention strategies."),
    },
    ToolPromptSpec {
        id: "karate-script-writer",
        name: "Karate Script Writer",
        system_prompt: "You are an expert in Karate API testing framework. Generate comprehensive Karate test scripts for API testing scenarios.",
        user_prompt_template: "Generate Karate test scripts for:\n\n{content}\n\nInclude feature files with scenarios, background setup, and data validation.",
        file_processing_prompt: Some("Analyze uploaded API documentation or specifications and generate appropriate Karate test scripts."),
        url_processing_prompt: Some("Analyze the API endpoints available at the provided URL and generate comprehensive Karate test scripts for testing these APIs."),
        jira_processing_prompt: Some("Generate Karate test scripts for the API requirements in Jira story {title}:\n\n{description}\n\nAcceptance Criteria: {acceptanceCriteria}"),
    },
    ToolPromptSpec {
        id: "smartspec-script-writer",
        name: "SmartSpec Script Writer",
        system_prompt: "You are an expert in SmartSpec automation framework. Generate efficient SmartSpec automation scripts for web application testing.",
        user_prompt_template: "Generate SmartSpec automation scripts for:\n\n{content}\n\nInclude page objects, test scenarios, and data management.",
        file_processing_prompt: Some("Analyze uploaded requirements or specifications and generate appropriate SmartSpec automation scripts."),
        url_processing_prompt: Some("Analyze the web application at the provided URL and generate SmartSpec automation scripts for key user workflows and functionality testing."),
        jira_processing_prompt: Some("Generate SmartSpec automation scripts for Jira story {title}:\n\n{description}\n\nAcceptance Criteria: {acceptanceCriteria}"),
    },
];

pub fn prompt_spec(tool_id: &str) -> Option<&'static ToolPromptSpec> {
    PROMPTS.iter().find(|spec| spec.id == tool_id)
}
