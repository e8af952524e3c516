use crate::util;
use anyhow::Result;
use clap::Args;
use console::style;
use domain::catalog::{CONTACTS, FAQ, QUICK_TIPS, RESOURCES};

/// Frequently asked questions, resources and support contacts
#[derive(Debug, Args)]
pub struct FaqCommand {
    /// Only questions or answers containing this text
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

impl FaqCommand {
    pub fn execute(&self) -> Result<()> {
        let needle = self.search.as_deref().map(str::to_lowercase);
        let matching: Vec<_> = FAQ
            .iter()
            .filter(|item| match &needle {
                Some(needle) => {
                    item.question.to_lowercase().contains(needle)
                        || item.answer.to_lowercase().contains(needle)
                }
                None => true,
            })
            .collect();

        util::heading("Frequently Asked Questions");
        if matching.is_empty() {
            println!("  No questions match");
        }
        for item in matching {
            println!("  {} {}", style("Q:").bold(), style(item.question).bold());
            println!("     {}", item.answer);
        }

        if needle.is_some() {
            return Ok(());
        }

        println!();
        util::heading("Resources");
        for resource in RESOURCES.iter() {
            println!("  {} - {}", style(resource.title).bold(), resource.description);
        }

        println!();
        util::heading("Contact Support");
        for contact in CONTACTS.iter() {
            println!("  {:<14} {}", contact.name, contact.detail);
        }

        println!();
        util::heading("Quick Tips");
        for tip in QUICK_TIPS.iter() {
            println!("  • {tip}");
        }
        Ok(())
    }
}
