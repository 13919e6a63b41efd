//! Post-rental feedback left on an item.

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// A comment joined with its author's name and the commented item's name.
#[derive(Clone, FromRow, Debug)]
pub struct CommentRow {
    pub id: i64,
    pub text: String,
    pub created: NaiveDateTime,
    pub item_id: i64,
    pub item_name: String,
    pub author_name: String,
}

/// Minimal item reference carried by a comment.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ItemSummary {
    pub id: i64,
    pub name: String,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    pub created: NaiveDateTime,
    pub item: ItemSummary,
}

impl From<CommentRow> for CommentView {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            text: row.text,
            author_name: row.author_name,
            created: row.created,
            item: ItemSummary {
                id: row.item_id,
                name: row.item_name,
            },
        }
    }
}
