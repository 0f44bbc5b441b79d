use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Fish,
    Bugs,
    Birds,
}

impl Category {
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Fish => "Fish",
            Category::Bugs => "Bugs",
            Category::Birds => "Birds",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Fish => "fish",
            Category::Bugs => "bugs",
            Category::Birds => "birds",
        }
    }

    pub fn catalog_file(self) -> &'static str {
        match self {
            Category::Fish => "fish.json",
            Category::Bugs => "bugs.json",
            Category::Birds => "birds.json",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Category::Fish => 0,
            Category::Bugs => 1,
            Category::Birds => 2,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fish" => Some(Category::Fish),
            "bugs" => Some(Category::Bugs),
            "birds" => Some(Category::Birds),
            _ => None,
        }
    }
}

pub const ALL: [Category; 3] = [Category::Fish, Category::Bugs, Category::Birds];
