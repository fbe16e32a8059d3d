//! Category Registry
//!
//! デフォルトカテゴリとユーザーごとのカスタムカテゴリをマージして保持。
//! マージ結果の順序は分類の照合順序そのものであり、契約の一部。

use std::sync::Arc;

use crate::error::{BrainDumpError, Result};
use crate::store::Store;

use super::builtin::{CategoryDef, DEFAULT_CATEGORIES, FALLBACK_CATEGORY};

/// カテゴリレジストリ
///
/// デフォルトはプロセス起動時に固定。カスタムはユーザー単位でストアに永続化。
pub struct CategoryRegistry {
    defaults: Vec<CategoryDef>,
    store: Arc<Store>,
}

impl CategoryRegistry {
    pub fn new(store: Arc<Store>) -> Self {
        let defaults = DEFAULT_CATEGORIES.iter().map(CategoryDef::from).collect();
        Self { defaults, store }
    }

    /// マージ済みカテゴリ一覧を返す。
    ///
    /// 順序規約:
    /// 1. デフォルトカテゴリを宣言順で。カスタムが同名を定義している場合、
    ///    そのキーワードリストで上書き（union ではなく置換）。位置は不変。
    /// 2. 残りのカスタムカテゴリを定義順で。
    pub fn merged(&self, user: &str) -> Vec<CategoryDef> {
        let custom = self.store.custom_categories(user);
        let mut result = Vec::with_capacity(self.defaults.len() + custom.len());

        for def in &self.defaults {
            match custom.iter().find(|c| c.name == def.name) {
                Some(over) => result.push(over.clone()),
                None => result.push(def.clone()),
            }
        }
        for c in &custom {
            if !self.defaults.iter().any(|d| d.name == c.name) {
                result.push(c.clone());
            }
        }
        result
    }

    /// カスタムカテゴリを定義（insert or replace、常に成功＝冪等上書き）。
    ///
    /// 検証: 名前は非空、予約名`Unsorted`は拒否。キーワードは
    /// trim＋小文字化して空要素を除去した結果が非空であること。
    pub fn define(&self, user: &str, name: &str, keywords: &[String]) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BrainDumpError::InvalidCategory {
                reason: "category name must not be empty".to_string(),
            });
        }
        if name.eq_ignore_ascii_case(FALLBACK_CATEGORY) {
            return Err(BrainDumpError::InvalidCategory {
                reason: format!("'{FALLBACK_CATEGORY}' is reserved for unmatched notes"),
            });
        }

        let keywords: Vec<String> = keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return Err(BrainDumpError::InvalidCategory {
                reason: "at least one non-empty keyword is required".to_string(),
            });
        }

        self.store.upsert_category(
            user,
            CategoryDef {
                name: name.to_string(),
                keywords,
            },
        )
    }

    /// 表示用のカテゴリ名一覧（デフォルト名、カスタム名）。状態を変更しない。
    pub fn list(&self, user: &str) -> (Vec<String>, Vec<String>) {
        let defaults = self.defaults.iter().map(|d| d.name.clone()).collect();
        let custom = self
            .store
            .custom_categories(user)
            .into_iter()
            .map(|c| c.name)
            .collect();
        (defaults, custom)
    }

    /// `name`がユーザーから見えるカテゴリか（再割り当て時の防御的チェック用）。
    pub fn contains(&self, user: &str, name: &str) -> bool {
        self.merged(user).iter().any(|c| c.name == name)
    }
}
