use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Result, WordgateError};

/// 收藏的单词
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteWord {
    pub id: String,
    pub word: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FavoriteWord {
    /// 创建新的收藏记录（生成 id，写入时间戳，单词去除首尾空白）
    pub fn new(word: Option<&str>) -> Result<Self> {
        let word = normalize_word(word)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            word,
            created_at: now,
            updated_at: now,
        })
    }
}

/// 校验并规范化单词：缺失或去除空白后为空均视为无效
pub fn normalize_word(word: Option<&str>) -> Result<String> {
    match word.map(str::trim) {
        Some(w) if !w.is_empty() => Ok(w.to_string()),
        _ => Err(WordgateError::validation("Word is required")),
    }
}

/// 校验记录 id
pub fn normalize_id(id: Option<&str>) -> Result<String> {
    match id.map(str::trim) {
        Some(i) if !i.is_empty() => Ok(i.to_string()),
        _ => Err(WordgateError::validation("Id of the word is required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_word() {
        let favorite = FavoriteWord::new(Some("  serendipity \n")).unwrap();

        assert_eq!(favorite.word, "serendipity");
        assert_eq!(favorite.created_at, favorite.updated_at);
        assert!(Uuid::parse_str(&favorite.id).is_ok());
    }

    #[test]
    fn test_new_rejects_missing_or_blank() {
        for input in [None, Some(""), Some("   ")] {
            let err = FavoriteWord::new(input).unwrap_err();
            assert_eq!(err, WordgateError::validation("Word is required"));
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let a = FavoriteWord::new(Some("same")).unwrap();
        let b = FavoriteWord::new(Some("same")).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id(Some(" abc ")).unwrap(), "abc");
        assert!(matches!(
            normalize_id(Some("")),
            Err(WordgateError::Validation(_))
        ));
        assert!(matches!(normalize_id(None), Err(WordgateError::Validation(_))));
    }

    #[test]
    fn test_serializes_camel_case() {
        let favorite = FavoriteWord::new(Some("hello")).unwrap();
        let json = serde_json::to_value(&favorite).unwrap();

        assert_eq!(json["word"], "hello");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
