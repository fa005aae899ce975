//! Prompt catalog.
//!
//! Each [`PromptType`] maps to one system template containing a single
//! [`DOCUMENT_PLACEHOLDER`]; every type shares the human template, which
//! contains a single [`QUESTION_PLACEHOLDER`]. Template bodies are static
//! assets compiled into the binary.

use std::str::FromStr;

use docqa_core::Error;
use serde::{Deserialize, Serialize};

pub const DOCUMENT_PLACEHOLDER: &str = "{document}";
pub const QUESTION_PLACEHOLDER: &str = "{question}";

const DEFAULT_SYSTEM: &str = include_str!("../prompts/default.md");
const DETAILED_SYSTEM: &str = include_str!("../prompts/detailed.md");
const CONCISE_SYSTEM: &str = include_str!("../prompts/concise.md");
const TECHNICAL_SYSTEM: &str = include_str!("../prompts/technical.md");
const HUMAN: &str = QUESTION_PLACEHOLDER;

/// Answer style selecting the system template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptType {
    #[default]
    Default,
    Detailed,
    Concise,
    Technical,
}

impl PromptType {
    pub const ALL: [PromptType; 4] = [
        PromptType::Default,
        PromptType::Detailed,
        PromptType::Concise,
        PromptType::Technical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Detailed => "detailed",
            Self::Concise => "concise",
            Self::Technical => "technical",
        }
    }

    /// Template pair for this prompt type.
    pub fn templates(&self) -> TemplatePair {
        let system = match self {
            Self::Default => DEFAULT_SYSTEM,
            Self::Detailed => DETAILED_SYSTEM,
            Self::Concise => CONCISE_SYSTEM,
            Self::Technical => TECHNICAL_SYSTEM,
        };
        TemplatePair { system, human: HUMAN }
    }
}

impl std::fmt::Display for PromptType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "detailed" => Ok(Self::Detailed),
            "concise" => Ok(Self::Concise),
            "technical" => Ok(Self::Technical),
            other => Err(Error::InvalidPromptType(other.to_string())),
        }
    }
}

/// System-role and human-role templates for one prompt type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplatePair {
    pub system: &'static str,
    pub human: &'static str,
}

/// Look up templates by tag. Unrecognized tags fall back to `default`.
pub fn resolve(tag: &str) -> TemplatePair {
    tag.parse::<PromptType>()
        .unwrap_or_default()
        .templates()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_has_one_placeholder_each() {
        for prompt_type in PromptType::ALL {
            let pair = resolve(prompt_type.as_str());
            assert_eq!(pair.system.matches(DOCUMENT_PLACEHOLDER).count(), 1, "{prompt_type}");
            assert_eq!(pair.human.matches(QUESTION_PLACEHOLDER).count(), 1, "{prompt_type}");
            assert!(!pair.system.contains(QUESTION_PLACEHOLDER));
        }
    }

    #[test]
    fn test_unknown_tag_falls_back_to_default() {
        let default = resolve("default");
        assert_eq!(resolve("bogus"), default);
        assert_eq!(resolve(""), default);
        assert_eq!(resolve("CONCISE"), default);
    }

    #[test]
    fn test_templates_are_distinct() {
        let concise = resolve("concise");
        assert_ne!(concise, resolve("default"));
        assert!(concise.system.contains("Maximum 3 sentences"));
        assert_ne!(resolve("technical"), resolve("detailed"));
    }

    #[test]
    fn test_parse_round_trip_and_rejects_unknown() {
        for prompt_type in PromptType::ALL {
            assert_eq!(prompt_type.as_str().parse::<PromptType>().unwrap(), prompt_type);
        }
        let err = "verbose".parse::<PromptType>().unwrap_err();
        assert!(matches!(err, Error::InvalidPromptType(ref t) if t == "verbose"));
    }
}
