use crate::entities::{ToolDescriptor, ToolIntegration};

pub static TOOLS: [ToolDescriptor; 10] = [
    ToolDescriptor {
        id: "test-generator",
        name: "Test Generator",
        description: "Generate comprehensive test cases using AI",
        integration: ToolIntegration::Jira,
    },
    ToolDescriptor {
        id: "ac-validator",
        name: "AC Validator",
        description: "Validate acceptance criteria completeness",
        integration: ToolIntegration::Jira,
    },
    ToolDescriptor {
        id: "xpath-generator",
        name: "XPath Generator",
        description: "Create reliable XPath selectors",
        integration: ToolIntegration::Url,
    },
    ToolDescriptor {
        id: "json-analyzer",
        name: "JSON Analyzer",
        description: "Analyze and validate JSON structures",
        integration: ToolIntegration::Url,
    },
    ToolDescriptor {
        id: "ada-analyzer",
        name: "ADA Analyzer",
        description: "Check accessibility compliance",
        integration: ToolIntegration::Url,
    },
    ToolDescriptor {
        id: "lighthouse",
        name: "Lighthouse",
        description: "Performance and quality insights",
        integration: ToolIntegration::Url,
    },
    ToolDescriptor {
        id: "chatbot",
        name: "QA Chatbot",
        description: "AI assistant for QA questions",
        integration: ToolIntegration::Chat,
    },
    ToolDescriptor {
        id: "defect-analyzer",
        name: "Defect Analyzer",
        description: "Identify root causes of defects",
        integration: ToolIntegration::Jira,
    },
    ToolDescriptor {
        id: "karate-script-writer",
        name: "Karate Script Writer",
        description: "Generate Karate API test scripts",
        integration: ToolIntegration::Jira,
    },
    ToolDescriptor {
        id: "smartspec-script-writer",
        name: "SmartSpec Script Writer",
        description: "Generate SmartSpec automation scripts",
        integration: ToolIntegration::Jira,
    },
];

pub fn find_tool(id: &str) -> Option<&'static ToolDescriptor> {
    TOOLS.iter().find(|tool| tool.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::prompt_spec;
    use crate::config::EndpointConfig;

    #[test]
    fn test_every_tool_has_prompts_and_endpoint() {
        for tool in TOOLS.iter() {
            let spec = prompt_spec(tool.id).expect("prompt spec");
            assert_eq!(spec.name, tool.name);
            assert!(EndpointConfig::tool_field(tool.id).is_some(), "{}", tool.id);
        }
    }

    #[test]
    fn test_jira_tools_define_jira_prompt() {
        for tool in TOOLS
            .iter()
            .filter(|t| t.integration == ToolIntegration::Jira)
        {
            let spec = prompt_spec(tool.id).unwrap();
            assert!(spec.jira_processing_prompt.is_some(), "{}", tool.id);
        }
    }
}
