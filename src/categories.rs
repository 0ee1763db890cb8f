//! Keyword-based transaction categorization.
//!
//! Rules are an ordered list of `(keyword, category)` pairs. Positive amounts
//! are always income; otherwise the first rule whose keyword occurs in the
//! lower-cased description decides, and anything unmatched is miscellaneous.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{StatementParseError, StatementResult};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Shopping,
    Groceries,
    Dining,
    Transportation,
    Utilities,
    Housing,
    Entertainment,
    Health,
    Income,
    #[default]
    Miscellaneous,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Shopping,
        Category::Groceries,
        Category::Dining,
        Category::Transportation,
        Category::Utilities,
        Category::Housing,
        Category::Entertainment,
        Category::Health,
        Category::Income,
        Category::Miscellaneous,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Shopping => "Shopping",
            Category::Groceries => "Groceries",
            Category::Dining => "Dining",
            Category::Transportation => "Transportation",
            Category::Utilities => "Utilities",
            Category::Housing => "Housing",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Income => "Income",
            Category::Miscellaneous => "Miscellaneous",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = StatementParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| StatementParseError::InvalidRule(format!("unknown category {s:?}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    pub category: Category,
}

/// Ordered keyword table. Immutable once built; share it by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<KeywordRule>", into = "Vec<KeywordRule>")]
pub struct CategoryRules {
    rules: Vec<KeywordRule>,
}

impl CategoryRules {
    pub fn new<I, K>(rules: I) -> StatementResult<Self>
    where
        I: IntoIterator<Item = (K, Category)>,
        K: AsRef<str>,
    {
        let rules = rules
            .into_iter()
            .map(|(keyword, category)| {
                let keyword = keyword.as_ref().trim().to_lowercase();
                if keyword.is_empty() {
                    return Err(StatementParseError::InvalidRule(
                        "keyword must not be empty".to_string(),
                    ));
                }
                Ok(KeywordRule { keyword, category })
            })
            .collect::<StatementResult<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Load rules from a JSON array of `{"keyword": ..., "category": ...}`.
    pub fn from_json(json: &str) -> StatementResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Append a rule after the existing ones (lowest precedence).
    pub fn with_rule(self, keyword: &str, category: Category) -> StatementResult<Self> {
        let mut rules = self.rules;
        rules.extend(Self::new([(keyword, category)])?.rules);
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn categorize(&self, description: &str, amount: Decimal) -> Category {
        if amount > Decimal::ZERO {
            return Category::Income;
        }

        let desc = description.to_lowercase();
        self.rules
            .iter()
            .find(|rule| desc.contains(&rule.keyword))
            .map(|rule| rule.category)
            .unwrap_or_default()
    }
}

impl TryFrom<Vec<KeywordRule>> for CategoryRules {
    type Error = StatementParseError;

    fn try_from(rules: Vec<KeywordRule>) -> Result<Self, Self::Error> {
        Self::new(rules.into_iter().map(|r| (r.keyword, r.category)))
    }
}

impl From<CategoryRules> for Vec<KeywordRule> {
    fn from(rules: CategoryRules) -> Self {
        rules.rules
    }
}

const DEFAULT_RULES: &[(&str, Category)] = &[
    // Shopping
    ("amazon", Category::Shopping),
    ("walmart", Category::Shopping),
    ("target", Category::Shopping),
    ("ebay", Category::Shopping),
    ("store", Category::Shopping),
    ("shop", Category::Shopping),
    // Groceries
    ("grocery", Category::Groceries),
    ("supermarket", Category::Groceries),
    ("food", Category::Groceries),
    ("market", Category::Groceries),
    // Dining
    ("restaurant", Category::Dining),
    ("cafe", Category::Dining),
    ("coffee", Category::Dining),
    ("starbucks", Category::Dining),
    ("mcdonald", Category::Dining),
    ("burger", Category::Dining),
    ("pizza", Category::Dining),
    // Transportation
    ("gas", Category::Transportation),
    ("uber", Category::Transportation),
    ("lyft", Category::Transportation),
    ("taxi", Category::Transportation),
    ("transit", Category::Transportation),
    ("parking", Category::Transportation),
    ("auto", Category::Transportation),
    // Utilities ("gas bill" is shadowed by "gas" above)
    ("electric", Category::Utilities),
    ("water", Category::Utilities),
    ("gas bill", Category::Utilities),
    ("internet", Category::Utilities),
    ("phone", Category::Utilities),
    ("mobile", Category::Utilities),
    ("utility", Category::Utilities),
    // Housing
    ("rent", Category::Housing),
    ("mortgage", Category::Housing),
    ("apartment", Category::Housing),
    ("home", Category::Housing),
    // Entertainment
    ("movie", Category::Entertainment),
    ("netflix", Category::Entertainment),
    ("spotify", Category::Entertainment),
    ("hulu", Category::Entertainment),
    ("disney", Category::Entertainment),
    ("theater", Category::Entertainment),
    ("game", Category::Entertainment),
    // Health
    ("doctor", Category::Health),
    ("medical", Category::Health),
    ("pharmacy", Category::Health),
    ("hospital", Category::Health),
    ("clinic", Category::Health),
    ("dental", Category::Health),
    ("vision", Category::Health),
    // Income keywords only matter for zero/negative amounts, e.g. a reversed deposit
    ("salary", Category::Income),
    ("deposit", Category::Income),
    ("payroll", Category::Income),
    ("direct deposit", Category::Income),
    ("payment received", Category::Income),
    ("refund", Category::Income),
];

impl Default for CategoryRules {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES
                .iter()
                .map(|(keyword, category)| KeywordRule {
                    keyword: keyword.to_string(),
                    category: *category,
                })
                .collect(),
        }
    }
}
