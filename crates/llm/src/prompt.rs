//! Prompt building
//!
//! Constructs the recommendation prompt from the student profile, the
//! engine's match list, and the user's question.

use std::fmt;

use serde::{Deserialize, Serialize};

use scholarbot_core::{ScholarshipRecord, StudentProfile};

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Prompt builder for scholarship recommendations
pub struct PromptBuilder {
    messages: Vec<Message>,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Add the fixed system prompt: advisor role plus the exact response
    /// structure the markdown template downstream expects.
    pub fn system_prompt(mut self) -> Self {
        let system = r#"You are a scholarship advisor for students in India. Answer using the student profile and the matching scholarships provided.

Provide a detailed response following this exact structure for each scholarship:

### 🏆 [Scholarship Name]
- **Eligibility**:
  • Education requirement
  • Income criteria
  • Category criteria
  • Academic requirements

- **Benefits**:
  • Exact amount or range
  • Coverage details
  • Additional perks

- **Application Process**:
  • Application portal link
  • Step-by-step procedure
  • Important dates

- **Selection Criteria**:
  • Merit basis
  • Interview details (if any)
  • Documentation requirements

Important:
1. List only the most relevant scholarships (maximum 3) that perfectly match the student's profile
2. Use bullet points and emphasize important information in bold
3. Include direct application links when available
4. Do not include any '#' characters except in markdown headers
5. Keep the formatting clean and consistent"#;

        self.messages.push(Message::system(system));
        self
    }

    /// Add the engine's match list as context.
    pub fn with_matches(mut self, matches: &[ScholarshipRecord]) -> Self {
        if matches.is_empty() {
            return self;
        }

        let listing = matches
            .iter()
            .map(|record| {
                format!(
                    "- {} (education: {}; community: {}; income: {}; percentage: {})",
                    record.name,
                    or_unspecified(&record.education_qualification),
                    or_unspecified(&record.community),
                    or_unspecified(&record.income),
                    or_unspecified(&record.annual_percentage),
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        self.messages.push(Message::system(format!(
            "## Matching Scholarships\n{listing}\n\nPrefer these scholarships when they fit the question."
        )));
        self
    }

    /// Add the student profile block and the question as the user turn.
    pub fn question(mut self, profile: &StudentProfile, question: &str) -> Self {
        let income = profile
            .income()
            .map(|v| format!("₹{v}"))
            .unwrap_or_else(|| "Not provided".to_string());
        let percentage = profile
            .percentage()
            .map(|v| format!("{v}%"))
            .unwrap_or_else(|| "Not provided".to_string());

        let content = format!(
            "Based on the student profile:\n\
             Education Level: {}\n\
             Course: {}\n\
             Annual Income: {}\n\
             Category: {}\n\
             State: {}\n\
             Academic Score: {}\n\n\
             Question: {}",
            or_unspecified(&profile.education_level),
            or_unspecified(&profile.course),
            income,
            or_unspecified(&profile.category),
            or_unspecified(&profile.state),
            percentage,
            question,
        );

        self.messages.push(Message::user(content));
        self
    }

    /// Build final message list
    pub fn build(self) -> Vec<Message> {
        self.messages
    }

    /// Get message count
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn or_unspecified(value: &str) -> &str {
    if value.trim().is_empty() {
        "Not provided"
    } else {
        value
    }
}
