//! Builtin Category Definitions
//!
//! コード内で定義されるデフォルトカテゴリ。
//! すべてのユーザーで利用可能。宣言順が分類の優先順位となる。

use serde::{Deserialize, Serialize};

/// どのキーワードにもマッチしなかったときの予約カテゴリ名。
/// ユーザー定義不可（`CategoryRegistry::define`で拒否される）。
pub const FALLBACK_CATEGORY: &str = "Unsorted";

/// デフォルトカテゴリ定義
///
/// スライスの順序は分類時の照合順序そのもの。並び替え禁止。
pub const DEFAULT_CATEGORIES: &[BuiltinCategory] = &[
    BuiltinCategory {
        name: "Tasks",
        keywords: &["todo", "task", "remind", "reminder"],
    },
    BuiltinCategory {
        name: "Ideas",
        keywords: &["idea", "think", "brainstorm"],
    },
    BuiltinCategory {
        name: "Journal",
        keywords: &["feel", "today", "journal"],
    },
    BuiltinCategory {
        name: "Quotes",
        keywords: &["quote", "wisdom", "says"],
    },
];

/// デフォルトカテゴリの静的定義
#[derive(Debug, Clone)]
pub struct BuiltinCategory {
    /// カテゴリ名（一意識別子）
    pub name: &'static str,
    /// マッチ用キーワード（小文字、部分一致で照合）
    pub keywords: &'static [&'static str],
}

/// ランタイムカテゴリ定義
///
/// デフォルトまたはユーザーのカスタム定義から構築される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDef {
    /// カテゴリ名
    pub name: String,
    /// マッチ用キーワード（小文字・trim済み）
    pub keywords: Vec<String>,
}

impl From<&BuiltinCategory> for CategoryDef {
    fn from(builtin: &BuiltinCategory) -> Self {
        Self {
            name: builtin.name.to_string(),
            keywords: builtin.keywords.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_categories_exist() {
        assert_eq!(DEFAULT_CATEGORIES.len(), 4);
        assert!(DEFAULT_CATEGORIES.iter().any(|c| c.name == "Tasks"));
        assert!(DEFAULT_CATEGORIES.iter().any(|c| c.name == "Ideas"));
        assert!(DEFAULT_CATEGORIES.iter().any(|c| c.name == "Journal"));
        assert!(DEFAULT_CATEGORIES.iter().any(|c| c.name == "Quotes"));
    }

    #[test]
    fn test_default_order_is_declaration_order() {
        let names: Vec<_> = DEFAULT_CATEGORIES.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Tasks", "Ideas", "Journal", "Quotes"]);
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for cat in DEFAULT_CATEGORIES {
            for kw in cat.keywords {
                assert_eq!(*kw, kw.to_lowercase(), "keyword in {}", cat.name);
            }
        }
    }

    #[test]
    fn test_fallback_is_not_a_default() {
        assert!(DEFAULT_CATEGORIES
            .iter()
            .all(|c| c.name != FALLBACK_CATEGORY));
    }

    #[test]
    fn test_category_def_from_builtin() {
        let def = CategoryDef::from(&DEFAULT_CATEGORIES[0]);
        assert_eq!(def.name, "Tasks");
        assert_eq!(def.keywords, vec!["todo", "task", "remind", "reminder"]);
    }
}
