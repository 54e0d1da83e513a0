//! Knowledge sections the bot can discuss.
//!
//! `Section` is the closed set of reference topics; three of them
//! (races, spells, classes) are backed by a similarity-searchable
//! document collection and are eligible for retrieval grounding.

use crate::content::texts;

/// A named knowledge section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Rules,
    Dice,
    Combat,
    Stats,
    Glossary,
    Races,
    Spells,
    Classes,
}

/// A retrieval-eligible knowledge domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RagDomain {
    Races,
    Spells,
    Classes,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Rules,
        Section::Dice,
        Section::Combat,
        Section::Stats,
        Section::Glossary,
        Section::Races,
        Section::Spells,
        Section::Classes,
    ];

    /// Tag used inside prompts and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Rules => "rules",
            Section::Dice => "dice",
            Section::Combat => "combat",
            Section::Stats => "stats",
            Section::Glossary => "glossary",
            Section::Races => "races",
            Section::Spells => "spells",
            Section::Classes => "classes",
        }
    }

    /// Parse a bot command like `/rules` or `/races@SomeBot`.
    pub fn from_command(command: &str) -> Option<Section> {
        let name = command
            .trim()
            .strip_prefix('/')?
            .split(['@', ' '])
            .next()
            .unwrap_or_default();
        match name {
            "rules" => Some(Section::Rules),
            "dice" => Some(Section::Dice),
            "combat" => Some(Section::Combat),
            "stats" => Some(Section::Stats),
            "glossary" => Some(Section::Glossary),
            "races" => Some(Section::Races),
            "spells" => Some(Section::Spells),
            "classes" => Some(Section::Classes),
            _ => None,
        }
    }

    /// The retrieval domain backing this section, if any.
    pub fn rag_domain(&self) -> Option<RagDomain> {
        match self {
            Section::Races => Some(RagDomain::Races),
            Section::Spells => Some(RagDomain::Spells),
            Section::Classes => Some(RagDomain::Classes),
            _ => None,
        }
    }

    /// Static text bound to the section when it becomes active.
    ///
    /// Retrieval-backed sections carry no pre-loaded content; their
    /// grounding is fetched per query instead.
    pub fn static_content(&self) -> &'static str {
        match self {
            Section::Rules => texts::RULES_TEXT,
            Section::Dice => texts::DICE_RULES_TEXT,
            Section::Combat => texts::COMBAT_RULES_TEXT,
            Section::Stats => texts::STATS_TEXT,
            Section::Glossary => texts::GLOSSARY_TEXT,
            Section::Races | Section::Spells | Section::Classes => "",
        }
    }
}

impl Default for Section {
    fn default() -> Self {
        Section::Rules
    }
}

impl RagDomain {
    pub const ALL: [RagDomain; 3] = [RagDomain::Races, RagDomain::Spells, RagDomain::Classes];

    pub fn as_str(&self) -> &'static str {
        match self {
            RagDomain::Races => "races",
            RagDomain::Spells => "spells",
            RagDomain::Classes => "classes",
        }
    }

    /// File stem of the persistent collection for this domain.
    pub fn collection_name(&self) -> &'static str {
        self.as_str()
    }
}
