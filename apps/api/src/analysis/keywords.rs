//! Keyword catalogue: the fixed term lists a CV is scored against.

use serde::Serialize;

pub const TECHNICAL_SKILLS: &[&str] = &["php", "laravel", "javascript", "html", "css", "mysql"];

pub const SOFT_SKILLS: &[&str] = &["teamwork", "communication", "leadership", "problem solving"];

pub const EDUCATION_MARKERS: &[&str] = &["bachelor", "master", "phd", "degree", "university"];

/// Spoken languages. Not consumed by any score yet.
pub const SPOKEN_LANGUAGES: &[&str] = &["english", "spanish", "french", "german", "chinese", "japanese"];

/// Terms that, together with the technical skills, indicate relevant experience.
pub const ROLE_INDICATORS: &[&str] = &["developer", "software", "web"];

/// Ordered, duplicate-free collection of lowercase terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeywordSet {
    terms: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = KeywordSet::default();
        for term in terms {
            set.insert(term.as_ref());
        }
        set
    }

    /// Inserts a term (lowercased, trimmed). Blank terms and repeats are ignored.
    pub fn insert(&mut self, term: &str) {
        let term = term.trim().to_lowercase();
        if !term.is_empty() && !self.terms.contains(&term) {
            self.terms.push(term);
        }
    }

    /// Left set's order first, then terms of `other` not already present.
    pub fn union(&self, other: &KeywordSet) -> KeywordSet {
        let mut merged = self.clone();
        for term in &other.terms {
            merged.insert(term);
        }
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

}

/// Every keyword set used by the analysis pipeline.
///
/// Built once at startup and shared read-only; a deployment can inject
/// its own catalogue instead of the default lists.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordCatalog {
    pub skills: KeywordSet,
    pub soft_skills: KeywordSet,
    pub education: KeywordSet,
    /// Carried for future scores; nothing reads it yet.
    #[allow(dead_code)]
    pub languages: KeywordSet,
    pub relevant_experience: KeywordSet,
}

impl KeywordCatalog {
    /// Builds a catalogue, deriving the relevant-experience set as
    /// `skills ∪ role_indicators`.
    pub fn new(
        skills: KeywordSet,
        soft_skills: KeywordSet,
        education: KeywordSet,
        languages: KeywordSet,
        role_indicators: &KeywordSet,
    ) -> Self {
        let relevant_experience = skills.union(role_indicators);
        Self {
            skills,
            soft_skills,
            education,
            languages,
            relevant_experience,
        }
    }
}

impl Default for KeywordCatalog {
    fn default() -> Self {
        Self::new(
            KeywordSet::new(TECHNICAL_SKILLS),
            KeywordSet::new(SOFT_SKILLS),
            KeywordSet::new(EDUCATION_MARKERS),
            KeywordSet::new(SPOKEN_LANGUAGES),
            &KeywordSet::new(ROLE_INDICATORS),
        )
    }
}
