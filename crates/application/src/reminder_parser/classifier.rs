//! Weighted keyword classification of reminder text
//!
//! Every category owns a keyword table. A keyword contributes its weight once
//! if it occurs anywhere in the lowercased text; contextual phrase rules then
//! add bonuses on top.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use domain::ReminderCategory;
use tracing::debug;

const EXAM_KEYWORDS: &[(&str, u32)] = &[
    ("exam", 3),
    ("examination", 3),
    ("test", 2),
    ("quiz", 2),
    ("midterm", 3),
    ("final", 3),
    ("assessment", 2),
    ("evaluation", 2),
    ("viva", 3),
    ("oral", 2),
    ("written", 1),
    ("hall", 2),
    ("room", 1),
    ("invigilator", 3),
    ("duration", 2),
    ("marks", 1),
];

const ASSIGNMENT_KEYWORDS: &[(&str, u32)] = &[
    ("assignment", 3),
    ("homework", 3),
    ("task", 2),
    ("submit", 2),
    ("submission", 2),
    ("due", 2),
    ("deadline", 3),
    ("upload", 2),
    ("file", 1),
    ("document", 1),
    ("pdf", 1),
    ("word", 1),
    ("plagiarism", 2),
    ("turnitin", 2),
    ("late", 2),
    ("penalty", 2),
    ("extension", 2),
    ("work", 1),
];

const PROJECT_KEYWORDS: &[(&str, u32)] = &[
    ("project", 4),
    ("presentation", 3),
    ("seminar", 3),
    ("thesis", 3),
    ("research", 3),
    ("report", 2),
    ("paper", 2),
    ("study", 1),
    ("analysis", 2),
    ("survey", 2),
    ("experiment", 2),
    ("data", 1),
    ("findings", 2),
    ("conclusion", 2),
    ("abstract", 2),
    ("bibliography", 2),
    ("references", 2),
    ("slides", 2),
    ("ppt", 2),
    ("powerpoint", 2),
    ("demo", 2),
    ("prototype", 2),
    ("implementation", 2),
];

const LAB_KEYWORDS: &[(&str, u32)] = &[
    ("lab", 4),
    ("laboratory", 4),
    ("labsheet", 3),
    ("practical", 3),
    ("observation", 2),
    ("apparatus", 2),
    ("record", 2),
    ("manual", 1),
    ("procedure", 1),
    ("specimen", 2),
    ("titration", 2),
    ("circuit", 1),
];

/// A contextual bonus: if any phrase occurs, `category` gains `bonus`
struct ContextRule {
    phrases: &'static [&'static str],
    category: ReminderCategory,
    bonus: u32,
}

/// Evaluated in order; every rule whose phrases occur fires.
const CONTEXT_RULES: &[ContextRule] = &[
    ContextRule {
        phrases: &["project submission"],
        category: ReminderCategory::Project,
        bonus: 10,
    },
    ContextRule {
        phrases: &[
            "group project",
            "team project",
            "final project",
            "project submission",
        ],
        category: ReminderCategory::Project,
        bonus: 6,
    },
    ContextRule {
        phrases: &["individual assignment", "personal task", "homework"],
        category: ReminderCategory::Assignment,
        bonus: 3,
    },
    ContextRule {
        phrases: &["final exam", "midterm exam", "entrance exam"],
        category: ReminderCategory::Exam,
        bonus: 5,
    },
    ContextRule {
        phrases: &["at", "hall", "room", "venue", "location"],
        category: ReminderCategory::Exam,
        bonus: 2,
    },
    ContextRule {
        phrases: &["before", "by", "deadline", "submit by"],
        category: ReminderCategory::Assignment,
        bonus: 2,
    },
    ContextRule {
        phrases: &["lab report", "practical", "experiment"],
        category: ReminderCategory::Lab,
        bonus: 3,
    },
    ContextRule {
        phrases: &["defense", "viva", "presentation"],
        category: ReminderCategory::Project,
        bonus: 3,
    },
    ContextRule {
        phrases: &["lab session", "lab work", "lab manual", "lab procedure"],
        category: ReminderCategory::Lab,
        bonus: 5,
    },
    ContextRule {
        phrases: &["chemistry lab", "physics lab", "biology lab", "computer lab"],
        category: ReminderCategory::Lab,
        bonus: 4,
    },
];

/// Keyword table plus a matcher over its keywords
struct KeywordTable {
    category: ReminderCategory,
    weights: &'static [(&'static str, u32)],
    matcher: AhoCorasick,
}

impl KeywordTable {
    fn build(category: ReminderCategory, weights: &'static [(&'static str, u32)]) -> Self {
        #[allow(clippy::expect_used)] // Infallible with valid static patterns
        let matcher = AhoCorasick::new(weights.iter().map(|(keyword, _)| *keyword))
            .expect("Failed to build keyword matcher");
        Self {
            category,
            weights,
            matcher,
        }
    }

    /// Sum of weights of the distinct keywords present in `text`
    fn score(&self, text: &str) -> u32 {
        let mut seen = vec![false; self.weights.len()];
        for m in self.matcher.find_overlapping_iter(text) {
            seen[m.pattern().as_usize()] = true;
        }
        self.weights
            .iter()
            .zip(seen)
            .filter_map(|((_, weight), present)| present.then_some(*weight))
            .sum()
    }
}

/// Pre-compiled keyword tables, one automaton per category
static KEYWORD_TABLES: LazyLock<[KeywordTable; 4]> = LazyLock::new(|| {
    [
        KeywordTable::build(ReminderCategory::Exam, EXAM_KEYWORDS),
        KeywordTable::build(ReminderCategory::Assignment, ASSIGNMENT_KEYWORDS),
        KeywordTable::build(ReminderCategory::Project, PROJECT_KEYWORDS),
        KeywordTable::build(ReminderCategory::Lab, LAB_KEYWORDS),
    ]
});

/// Per-category scores for a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryScores {
    pub exam: u32,
    pub assignment: u32,
    pub project: u32,
    pub lab: u32,
}

impl CategoryScores {
    /// Score of one category
    #[must_use]
    pub const fn get(&self, category: ReminderCategory) -> u32 {
        match category {
            ReminderCategory::Exam => self.exam,
            ReminderCategory::Assignment => self.assignment,
            ReminderCategory::Project => self.project,
            ReminderCategory::Lab => self.lab,
        }
    }

    fn add(&mut self, category: ReminderCategory, amount: u32) {
        let slot = match category {
            ReminderCategory::Exam => &mut self.exam,
            ReminderCategory::Assignment => &mut self.assignment,
            ReminderCategory::Project => &mut self.project,
            ReminderCategory::Lab => &mut self.lab,
        };
        *slot += amount;
    }

    /// Highest-scoring category
    ///
    /// Ties go to the category listed first in
    /// [`ReminderCategory::priority_order`]; all-zero scores fall back to
    /// `Assignment`.
    #[must_use]
    pub fn best(&self) -> ReminderCategory {
        let order = ReminderCategory::priority_order();
        let max = order.iter().map(|c| self.get(*c)).max().unwrap_or(0);
        if max == 0 {
            return ReminderCategory::Assignment;
        }
        order
            .into_iter()
            .find(|c| self.get(*c) == max)
            .unwrap_or(ReminderCategory::Assignment)
    }
}

/// Compute keyword and context scores for `text`
#[must_use]
pub fn score(text: &str) -> CategoryScores {
    let text = text.to_lowercase();
    let mut scores = CategoryScores::default();

    for table in KEYWORD_TABLES.iter() {
        scores.add(table.category, table.score(&text));
    }

    for rule in CONTEXT_RULES {
        if rule.phrases.iter().any(|phrase| text.contains(phrase)) {
            scores.add(rule.category, rule.bonus);
        }
    }

    scores
}

/// Classify reminder text into one category. Never fails.
#[must_use]
pub fn classify(text: &str) -> ReminderCategory {
    let scores = score(text);
    let category = scores.best();
    debug!(
        exam = scores.exam,
        assignment = scores.assignment,
        project = scores.project,
        lab = scores.lab,
        category = %category,
        "Classified reminder text"
    );
    category
}
