//! Help & Support content

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqItem {
    pub question: &'static str,
    pub answer: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpResource {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactChannel {
    pub name: &'static str,
    pub detail: &'static str,
}

pub static FAQ: [FaqItem; 4] = [
    FaqItem {
        question: "How do I trigger a build pipeline?",
        answer: "Navigate to the Build Pipelines section, select your application, and click either 'Trigger QA Build' or 'Trigger PROD Build'.",
    },
    FaqItem {
        question: "What AI models power the QA tools?",
        answer: "Our QA tools use advanced language models specifically trained for quality assurance tasks, including test generation and defect analysis.",
    },
    FaqItem {
        question: "How often are endpoints monitored?",
        answer: "Endpoints are monitored every 30 seconds with real-time status updates displayed in the dashboard.",
    },
    FaqItem {
        question: "Can I customize the AI tool prompts?",
        answer: "Yes, you can customize prompts for each AI tool in the Settings section under 'AI Configuration'.",
    },
];

pub static RESOURCES: [HelpResource; 4] = [
    HelpResource {
        title: "User Documentation",
        description: "Complete guide to using all QA tools and features",
    },
    HelpResource {
        title: "Video Tutorials",
        description: "Step-by-step video guides for common workflows",
    },
    HelpResource {
        title: "API Reference",
        description: "Technical documentation for API integration",
    },
    HelpResource {
        title: "Live Chat Support",
        description: "Get instant help from our support team",
    },
];

pub static CONTACTS: [ContactChannel; 3] = [
    ContactChannel {
        name: "Email Support",
        detail: "qa-support@company.com",
    },
    ContactChannel {
        name: "Phone Support",
        detail: "1-800-QA-HELP",
    },
    ContactChannel {
        name: "Live Chat",
        detail: "Available 24/7",
    },
];

pub static QUICK_TIPS: [&str; 3] = [
    "Check the FAQ before contacting support",
    "Include screenshots for visual issues",
    "Mention your app version and terminal",
];
