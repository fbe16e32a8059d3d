//! Category Classifier
//!
//! テキストをマージ済みカテゴリ定義に基づいて分類する。

use std::sync::Arc;

use super::builtin::FALLBACK_CATEGORY;
use super::registry::CategoryRegistry;

/// キーワード分類器
///
/// 単一ラベル・先勝ち。`CategoryRegistry::merged`の順序で照合し、
/// いずれかのキーワードが本文の部分文字列であれば、そのカテゴリを返す。
/// スコアリングなし。マッチしなければ`Unsorted`。
pub struct Classifier {
    registry: Arc<CategoryRegistry>,
}

impl Classifier {
    pub fn new(registry: Arc<CategoryRegistry>) -> Self {
        Self { registry }
    }

    /// `text`を分類してカテゴリ名を返す。
    ///
    /// 照合は大文字小文字を区別しない（本文を小文字化、キーワードは
    /// 定義時に小文字化済み）。同じ本文が複数カテゴリにマッチし得るため、
    /// 照合順序がそのまま割り当て結果を決める。
    pub fn classify(&self, user: &str, text: &str) -> String {
        let text = text.to_lowercase();
        for cat in self.registry.merged(user) {
            if cat.keywords.iter().any(|kw| text.contains(kw.as_str())) {
                return cat.name;
            }
        }
        FALLBACK_CATEGORY.to_string()
    }
}
