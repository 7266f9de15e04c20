// src/models/category.rs

use std::fmt;
use std::str::FromStr;

use crate::error::QuizError;

/// The closed set of quiz subjects. Each has its own bank and attempt history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Java,
    C,
    Python,
    Gk,
}

impl Category {
    /// Every category, in listing order.
    pub const ALL: [Category; 4] = [Category::Java, Category::C, Category::Python, Category::Gk];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Java => "java",
            Category::C => "c",
            Category::Python => "python",
            Category::Gk => "gk",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a category name case-insensitively (`JAVA`, `Java` and `java` are the same).
impl FromStr for Category {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.to_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == folded)
            .ok_or(QuizError::InvalidCategory)
    }
}
