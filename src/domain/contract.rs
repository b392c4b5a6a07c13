//! Prompt assembly for the contract drafting assistant.
//!
//! Everything here is deterministic; the text generation call itself lives
//! behind [`crate::llm::TextGenerator`].

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// First line every generated contract must start with.
pub const CONTRACT_TITLE: &str = "SERVICE AGREEMENT";

/// Closing paragraph every generated contract must end with.
pub const CONTRACT_DISCLAIMER: &str = "This document was generated with the help of an AI \
assistant and does not constitute legal advice. Both parties should review it with a \
qualified attorney before signing.";

const SYSTEM_INSTRUCTIONS: &str = "\
You are a contract drafting assistant for event-service vendors.
You only help with service agreement contracts between a vendor and a client.
If the user asks about anything else, politely explain that you can only help \
with service agreements and steer the conversation back to the contract.

Before drafting, make sure you know:
- the legal names and contact details of the vendor and the client
- the services being provided
- the event date, time and location
- fees, deposit and payment schedule
- cancellation and refund policy
- liability and insurance terms
Ask for anything that is missing, one or two questions at a time.

When you produce a contract:
- start it with the exact title line";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

/// One entry of the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Vendor service details offered to the model as drafting context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceContext {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price_range: Option<String>,
}

/// Everything needed to assemble one prompt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftInput {
    pub prompt: String,
    pub history: Vec<ChatTurn>,
    pub services: Vec<ServiceContext>,
}

/// How closely a reply follows the required contract layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractFormat {
    /// Starts with the title and ends with the disclaimer.
    Complete,
    /// Starts with the title but the disclaimer is missing.
    Incomplete,
    /// A conversational reply rather than a contract.
    NotAContract,
}

/// Generated reply returned to the assistant page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftReply {
    pub text: String,
    pub contract_format: ContractFormat,
}

impl DraftReply {
    /// Wraps generated text; the text is kept as-is.
    pub fn new(text: String) -> Self {
        let contract_format = check_format(&text);
        Self {
            text,
            contract_format,
        }
    }
}

/// Builds the full prompt text sent to the model.
pub fn assemble_prompt(input: &DraftInput) -> String {
    let mut prompt = String::new();

    prompt.push_str(SYSTEM_INSTRUCTIONS);
    let _ = writeln!(prompt, " \"{CONTRACT_TITLE}\"");
    let _ = writeln!(
        prompt,
        "- end it with this disclaimer, word for word: \"{CONTRACT_DISCLAIMER}\""
    );

    if !input.services.is_empty() {
        prompt.push_str("\nThe vendor offers the following services:\n");
        for service in &input.services {
            let _ = writeln!(prompt, "\nService: {}", service.name);
            let _ = writeln!(prompt, "ID: {}", service.id);
            let _ = writeln!(prompt, "Description: {}", service.description);
            let _ = writeln!(prompt, "Category: {}", service.category);
            let _ = writeln!(
                prompt,
                "Price: {}",
                service.price_range.as_deref().unwrap_or("Not specified")
            );
        }
    }

    prompt.push_str("\nConversation:\n");
    for turn in &input.history {
        let _ = writeln!(prompt, "{}: {}", turn.role.label(), turn.content);
    }
    let _ = writeln!(prompt, "{}: {}", ChatRole::User.label(), input.prompt);
    let _ = write!(prompt, "{}:", ChatRole::Assistant.label());

    prompt
}

/// Classifies a generated reply without modifying it.
pub fn check_format(reply: &str) -> ContractFormat {
    let trimmed = reply.trim();
    let first_line = trimmed
        .lines()
        .next()
        .map(|l| l.trim().trim_matches(|c| c == '#' || c == '*').trim())
        .unwrap_or_default();

    if !first_line.eq_ignore_ascii_case(CONTRACT_TITLE) {
        return ContractFormat::NotAContract;
    }

    let tail = trimmed.trim_end_matches(|c: char| c == '*' || c == '_' || c.is_whitespace());
    if tail.ends_with(CONTRACT_DISCLAIMER) {
        ContractFormat::Complete
    } else {
        ContractFormat::Incomplete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> DraftInput {
        DraftInput {
            prompt: "Draft it please".to_string(),
            history: vec![
                ChatTurn {
                    role: ChatRole::User,
                    content: "I need a contract for a wedding".to_string(),
                },
                ChatTurn {
                    role: ChatRole::Assistant,
                    content: "What is the event date?".to_string(),
                },
            ],
            services: vec![ServiceContext {
                id: "7".to_string(),
                name: "Wedding DJ".to_string(),
                description: "Six hours of music".to_string(),
                category: "DJs".to_string(),
                price_range: None,
            }],
        }
    }

    #[test]
    fn assembly_is_deterministic() {
        let input = sample_input();
        assert_eq!(assemble_prompt(&input), assemble_prompt(&input));
    }

    #[test]
    fn orders_services_history_then_prompt() {
        let prompt = assemble_prompt(&sample_input());

        let service = prompt.find("Service: Wedding DJ").unwrap();
        let first_turn = prompt.find("User: I need a contract").unwrap();
        let second_turn = prompt.find("Assistant: What is the event date?").unwrap();
        let latest = prompt.find("User: Draft it please").unwrap();

        assert!(service < first_turn);
        assert!(first_turn < second_turn);
        assert!(second_turn < latest);
        assert!(prompt.ends_with("Assistant:"));
        assert!(prompt.contains("Price: Not specified"));
        assert!(prompt.contains(CONTRACT_TITLE));
        assert!(prompt.contains(CONTRACT_DISCLAIMER));
    }

    #[test]
    fn omits_service_block_without_services() {
        let mut input = sample_input();
        input.services.clear();
        let prompt = assemble_prompt(&input);

        assert!(!prompt.contains("The vendor offers the following services"));
    }

    #[test]
    fn classifies_replies() {
        let complete = format!("# {CONTRACT_TITLE}\n\n1. Parties...\n\n{CONTRACT_DISCLAIMER}\n");
        let incomplete = format!("{CONTRACT_TITLE}\n\n1. Parties...");
        let chat = "What date is the event?";

        assert_eq!(check_format(&complete), ContractFormat::Complete);
        assert_eq!(check_format(&incomplete), ContractFormat::Incomplete);
        assert_eq!(check_format(chat), ContractFormat::NotAContract);
    }
}
