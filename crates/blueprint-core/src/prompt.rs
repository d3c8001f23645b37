//! Prompt assembly — turns a wizard answer-set into the instructions and
//! content sent to the generator. Pure and deterministic: the same answers
//! always produce byte-identical prompts.

use crate::types::{DocType, Feature, Priority, TechChoice, WizardData};
use serde::Serialize;

pub const AI_DECIDE_TEXT: &str = "Let AI decide the most suitable option";
pub const NOT_SPECIFIED: &str = "Not specified";
const NONE_SPECIFIED: &str = "- None specified";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    /// Role and output-format preamble.
    pub instructions: String,
    /// The rendered project context.
    pub content: String,
}

pub fn build_prompt(data: &WizardData, doc: DocType) -> Prompt {
    let instructions = match doc {
        DocType::Prd => PRD_INSTRUCTIONS,
        DocType::Tdd => TDD_INSTRUCTIONS,
    };
    Prompt {
        instructions: instructions.to_string(),
        content: format!(
            "Generate a {} for the following project:\n\n{}",
            doc.label(),
            render_context(data)
        ),
    }
}

/// How a single tech selection reads in the prompt.
pub fn format_tech(choice: &TechChoice) -> String {
    match choice {
        TechChoice::AiDecide => AI_DECIDE_TEXT.to_string(),
        TechChoice::Explicit(values) if !values.is_empty() => values.join(", "),
        _ => NOT_SPECIFIED.to_string(),
    }
}

fn or_not_specified(value: &str) -> &str {
    if value.is_empty() {
        NOT_SPECIFIED
    } else {
        value
    }
}

fn bullet_list<'a, I>(items: I) -> String
where
    I: Iterator<Item = (&'a str, &'a str)>,
{
    let lines: Vec<String> = items
        .map(|(name, desc)| format!("- **{name}**: {desc}"))
        .collect();
    if lines.is_empty() {
        NONE_SPECIFIED.to_string()
    } else {
        lines.join("\n")
    }
}

fn feature_list(data: &WizardData, priority: Priority) -> String {
    bullet_list(
        data.features
            .with_priority(priority)
            .map(|f: &Feature| (f.name.as_str(), f.description.as_str())),
    )
}

fn render_context(data: &WizardData) -> String {
    let basics = &data.basics;
    let design = &data.design;
    let mut out = String::new();

    out.push_str("## Project Information\n");
    out.push_str(&format!("- **Name**: {}\n", basics.name));
    out.push_str(&format!("- **Type**: {}\n", basics.app_type));
    out.push_str(&format!("- **Description**: {}\n", basics.description));
    out.push_str(&format!("- **Target Audience**: {}\n", basics.target_audience));
    out.push_str(&format!("- **Core Problem**: {}\n\n", basics.core_problem));

    out.push_str("## Features\n");
    out.push_str("### Must-Have\n");
    out.push_str(&feature_list(data, Priority::MustHave));
    out.push_str("\n\n### Nice-to-Have\n");
    out.push_str(&feature_list(data, Priority::NiceToHave));
    out.push_str("\n\n");

    out.push_str("## User Personas\n");
    out.push_str(&bullet_list(
        data.features
            .personas
            .iter()
            .map(|p| (p.name.as_str(), p.description.as_str())),
    ));
    out.push_str("\n\n");

    out.push_str("## User Flows\n");
    let flows: Vec<String> = data
        .features
        .user_flows
        .iter()
        .map(|f| format!("### {}\n{}", f.title, f.steps))
        .collect();
    if flows.is_empty() {
        out.push_str(NONE_SPECIFIED);
    } else {
        out.push_str(&flows.join("\n\n"));
    }
    out.push_str("\n\n");

    out.push_str("## Technical Preferences\n");
    for (label, choice) in data.tech.labelled() {
        out.push_str(&format!("- **{label}**: {}\n", format_tech(choice)));
    }
    out.push('\n');

    out.push_str("## Design & UX\n");
    out.push_str(&format!("- **UI Style**: {}\n", design.ui_style));
    out.push_str(&format!(
        "- **Responsive Requirements**: {}\n",
        or_not_specified(&design.responsive_requirements)
    ));
    out.push_str(&format!(
        "- **Accessibility**: {}\n",
        or_not_specified(&design.accessibility_needs)
    ));
    out.push_str(&format!(
        "- **Reference Apps**: {}",
        or_not_specified(&design.reference_apps)
    ));

    out.trim().to_string()
}

const PRD_INSTRUCTIONS: &str = "You are a senior product manager. Generate a comprehensive Product Requirements Document (PRD) in Markdown format. The document must be well-structured, detailed, and optimized for consumption by LLMs and developers.

Output the PRD using this exact structure:

# PRD: {App Name}
## Meta
- Type: {app type}
- Target Platform: {platforms}
- Generated: {current date}

## Problem Statement
## Target Users
## User Personas
## Feature Requirements
### Must Have
### Nice to Have
## User Flows
## Non-Functional Requirements
## Success Metrics
## Constraints & Assumptions

Be thorough, specific, and actionable. Fill in every section with meaningful content based on the provided project information. If information is missing, make reasonable assumptions and note them.";

const TDD_INSTRUCTIONS: &str = "You are a senior software architect. Generate a comprehensive Technical Design Document (TDD) in Markdown format. The document must be well-structured, detailed, and optimized for consumption by LLMs and developers.

Output the TDD using this exact structure:

# TDD: {App Name}
## Meta
- Type: {app type}
- Generated: {current date}

## System Architecture
## Tech Stack
### Frontend
### Backend
### Database
### Infrastructure
## Component Breakdown
## API Design
## Data Models
## Authentication & Authorization
## Third-Party Integrations
## Testing Strategy
## Deployment Plan
## File/Folder Structure
## Development Phases

Be thorough, specific, and actionable. Provide concrete technical decisions, code structure recommendations, and implementation details. If information is missing, make reasonable technical choices and explain the rationale.";
