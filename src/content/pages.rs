use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Card {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Challenge {
    pub label: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Briefing {
    pub category: String,
    pub title: String,
    pub summary: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Landing {
    pub challenge: Challenge,
    pub capabilities: Vec<Card>,
    pub briefings: Vec<Briefing>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub description: String,
    pub image: String,
}

/// A section under `/resources`. None of them has published entries yet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourceSection {
    pub slug: String,
    pub title: String,
    pub heading: String,
    pub description: String,
}

impl ResourceSection {
    pub fn href(&self) -> String {
        format!("/resources/{}", self.slug)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WhitepaperSection {
    pub heading: String,
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Whitepaper {
    pub title: String,
    pub subtitle: String,
    pub authors: String,
    pub date: String,
    #[serde(rename = "abstract")]
    pub summary: String,
    pub sections: Vec<WhitepaperSection>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TechnicalBlock {
    pub heading: String,
    pub body: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TechnicalSection {
    pub title: String,
    pub blocks: Vec<TechnicalBlock>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Technical {
    pub intro: String,
    pub sections: Vec<TechnicalSection>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SecurityPractice {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pages {
    pub landing: Landing,
    pub team: Vec<TeamMember>,
    pub resources: Vec<ResourceSection>,
    pub whitepaper: Whitepaper,
    pub technical: Technical,
    pub security: Vec<SecurityPractice>,
}
