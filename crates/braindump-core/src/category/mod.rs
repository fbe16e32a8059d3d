//! # Category Module
//!
//! 投稿されたテキストを意味的なカテゴリに分類する機能を提供する。
//!
//! ## 設計
//!
//! カテゴリは「名前＋キーワードリスト」の組。2層構造を持つ：
//!
//! - **デフォルト**: プロセス起動時に固定（Tasks / Ideas / Journal / Quotes）
//! - **カスタム**: ユーザーごとに定義可能、ストアに永続化
//!
//! 同名衝突時はカスタムのキーワードリストがデフォルトを上書きする
//! （置換であって結合ではない）。分類は先勝ちの部分文字列照合で、
//! 照合順序＝デフォルト宣言順→カスタム定義順。順序が割り当て結果を
//! 決めるため、この規約は契約として扱う。
//!
//! ## モジュール構成
//!
//! - `builtin`: デフォルトカテゴリ定義と予約フォールバック名
//! - `registry`: 2層マージとカスタム定義の検証
//! - `classifier`: 分類器
//!
//! ## 使用例
//!
//! ```rust
//! use std::sync::Arc;
//! use braindump_core::category::{CategoryRegistry, Classifier};
//! use braindump_core::store::Store;
//!
//! # let dir = tempfile::TempDir::new().unwrap();
//! let store = Arc::new(Store::open(dir.path()).unwrap());
//! let registry = Arc::new(CategoryRegistry::new(store));
//! let classifier = Classifier::new(registry.clone());
//!
//! assert_eq!(classifier.classify("alice", "todo buy milk"), "Tasks");
//! assert_eq!(classifier.classify("alice", "hello"), "Unsorted");
//! ```

mod builtin;
mod classifier;
mod registry;

// Re-exports
pub use builtin::{BuiltinCategory, CategoryDef, DEFAULT_CATEGORIES, FALLBACK_CATEGORY};
pub use classifier::Classifier;
pub use registry::CategoryRegistry;
