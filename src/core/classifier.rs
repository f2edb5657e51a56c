use crate::domain::model::{ProductEntry, Role, Routine};
use crate::utils::error::{LbasiError, Result};

const DEFAULT_TRIGGERS: &[&str] = &[
    "레티놀", "비타민C", "아하", "바하", "AHA", "BHA", "필링", "스크럽", "미백", "주름", "고기능",
    "애시드", "L-AA",
];

const DEFAULT_STABILIZERS: &[&str] = &[
    "시카", "진정", "재생", "판테놀", "마데카", "리페어", "오일", "밤", "병풀", "알로에",
];

const DEFAULT_PRIMERS: &[&str] = &[
    "토너", "스킨", "로션", "세라마이드", "장벽", "보습", "수분", "히알루론산", "크림", "에센스",
];

/// Ordered substrings that identify one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    role: Role,
    keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            keywords: Vec::new(),
        }
    }

    pub fn with_keywords<I, S>(role: Role, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new(role);
        for keyword in keywords {
            set.push(keyword.as_ref());
        }
        set
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Appends a keyword. Blank and duplicate keywords are ignored; returns
    /// whether the set changed.
    pub fn push(&mut self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() || self.keywords.iter().any(|k| k == keyword) {
            return false;
        }
        self.keywords.push(keyword.to_string());
        true
    }

    pub fn clear(&mut self) {
        self.keywords.clear();
    }

    /// Case-sensitive substring containment, stopping at the first hit.
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}

/// The three keyword sets in match priority: Trigger, then Stabilizer, then Primer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCatalog {
    trigger: KeywordSet,
    stabilizer: KeywordSet,
    primer: KeywordSet,
}

impl Default for KeywordCatalog {
    fn default() -> Self {
        Self {
            trigger: KeywordSet::with_keywords(Role::Trigger, DEFAULT_TRIGGERS),
            stabilizer: KeywordSet::with_keywords(Role::Stabilizer, DEFAULT_STABILIZERS),
            primer: KeywordSet::with_keywords(Role::Primer, DEFAULT_PRIMERS),
        }
    }
}

impl KeywordCatalog {
    pub fn empty() -> Self {
        Self {
            trigger: KeywordSet::new(Role::Trigger),
            stabilizer: KeywordSet::new(Role::Stabilizer),
            primer: KeywordSet::new(Role::Primer),
        }
    }

    /// Sets in priority order.
    pub fn sets(&self) -> [&KeywordSet; 3] {
        [&self.trigger, &self.stabilizer, &self.primer]
    }

    pub fn set(&self, role: Role) -> Option<&KeywordSet> {
        match role {
            Role::Trigger => Some(&self.trigger),
            Role::Stabilizer => Some(&self.stabilizer),
            Role::Primer => Some(&self.primer),
            Role::Unknown => None,
        }
    }

    fn set_mut(&mut self, role: Role) -> Option<&mut KeywordSet> {
        match role {
            Role::Trigger => Some(&mut self.trigger),
            Role::Stabilizer => Some(&mut self.stabilizer),
            Role::Primer => Some(&mut self.primer),
            Role::Unknown => None,
        }
    }

    /// Appends a keyword at the lowest priority within its role.
    pub fn add_keyword(&mut self, role: Role, keyword: &str) -> Result<bool> {
        let set = self
            .set_mut(role)
            .ok_or_else(|| LbasiError::InvalidConfigValueError {
                field: "keywords".to_string(),
                value: role.name().to_string(),
                reason: "Unknown is the fallback role and takes no keywords".to_string(),
            })?;
        Ok(set.push(keyword))
    }

    pub fn clear_role(&mut self, role: Role) {
        if let Some(set) = self.set_mut(role) {
            set.clear();
        }
    }

    pub fn role_of(&self, text: &str) -> Role {
        self.sets()
            .into_iter()
            .find(|set| set.matches(text))
            .map(KeywordSet::role)
            .unwrap_or(Role::Unknown)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Classifier {
    catalog: KeywordCatalog,
    split_on_commas: bool,
}

impl Classifier {
    pub fn new(catalog: KeywordCatalog) -> Self {
        Self {
            catalog,
            split_on_commas: false,
        }
    }

    pub fn with_comma_splitting(mut self, enabled: bool) -> Self {
        self.split_on_commas = enabled;
        self
    }

    pub fn catalog(&self) -> &KeywordCatalog {
        &self.catalog
    }

    /// Splits a block of text into trimmed, non-empty product entries.
    pub fn normalize(&self, text: &str) -> Vec<ProductEntry> {
        let split_on_commas = self.split_on_commas;
        text.lines()
            .flat_map(|line| {
                line.split(move |c: char| split_on_commas && c == ',')
            })
            .filter_map(ProductEntry::new)
            .collect()
    }

    pub fn role_of(&self, text: &str) -> Role {
        self.catalog.role_of(text)
    }

    pub fn classify(&self, text: &str) -> Routine {
        self.classify_entries(&self.normalize(text))
    }

    /// Classifies entries that are already normalized, one bucket slot per entry.
    pub fn classify_entries(&self, entries: &[ProductEntry]) -> Routine {
        let mut routine = Routine::new();
        for entry in entries {
            let role = self.role_of(entry.as_str());
            tracing::debug!("Classified '{}' as {}", entry, role);
            routine.push(role, entry.clone());
        }
        routine
    }

    /// Classifies each entry on its own and merges the results in input order.
    pub fn classify_all<S: AsRef<str>>(&self, entries: &[S]) -> Routine {
        let mut routine = Routine::new();
        for entry in entries {
            routine.merge(self.classify(entry.as_ref()));
        }
        routine
    }

    /// Like [`Classifier::classify`], but an input with no products is an error.
    pub fn classify_submission(&self, text: &str) -> Result<Routine> {
        let routine = self.classify(text);
        if routine.is_empty() {
            return Err(LbasiError::EmptyInput);
        }
        Ok(routine)
    }
}
