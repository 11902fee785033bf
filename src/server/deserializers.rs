use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::catalog::QuizCategory;

// a page that is not a number counts as no page at all, so listing falls back to the first one
pub fn deserialize_lenient_page<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.trim().parse::<i64>().ok()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(i64),
    Text(String),
}

// previous question ids may come as numbers or as their string form
pub fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<IdRepr>>::deserialize(deserializer)?;
    values
        .unwrap_or_default()
        .into_iter()
        .map(|value| match value {
            IdRepr::Number(id) => Ok(id),
            IdRepr::Text(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| D::Error::custom(format!("Wrong value {text}, can not parse to i64"))),
        })
        .collect()
}

// `false`, `""`, an object without a usable id and the like all mean no category was picked
pub fn deserialize_lenient_quiz_category<'de, D>(
    deserializer: D,
) -> Result<Option<QuizCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct PageQuery {
        #[serde(default, deserialize_with = "deserialize_lenient_page")]
        page: Option<i64>,
    }

    #[derive(Deserialize)]
    struct Previous {
        #[serde(default, deserialize_with = "deserialize_ids")]
        ids: Vec<i64>,
    }

    #[test]
    fn page_parses_or_falls_back() {
        let q: PageQuery = serde_json::from_str(r#"{"page": "3"}"#).unwrap();
        assert_eq!(q.page, Some(3));
        let q: PageQuery = serde_json::from_str(r#"{"page": "abc"}"#).unwrap();
        assert_eq!(q.page, None);
        let q: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.page, None);
    }

    #[test]
    fn ids_accept_numbers_and_strings() {
        let p: Previous = serde_json::from_str(r#"{"ids": [1, "2", 3]}"#).unwrap();
        assert_eq!(p.ids, vec![1, 2, 3]);
        let p: Previous = serde_json::from_str(r#"{"ids": null}"#).unwrap();
        assert!(p.ids.is_empty());
        assert!(serde_json::from_str::<Previous>(r#"{"ids": ["x"]}"#).is_err());
    }

    #[derive(Deserialize)]
    struct Quiz {
        #[serde(default, deserialize_with = "deserialize_lenient_quiz_category")]
        quiz_category: Option<QuizCategory>,
    }

    #[test]
    fn unusable_quiz_category_is_none() {
        for body in [
            r#"{"quiz_category": false}"#,
            r#"{"quiz_category": ""}"#,
            r#"{"quiz_category": {}}"#,
            r#"{"quiz_category": {"id": null}}"#,
            r#"{"quiz_category": null}"#,
            "{}",
        ] {
            let quiz: Quiz = serde_json::from_str(body).unwrap();
            assert_eq!(quiz.quiz_category, None, "{body}");
        }

        let quiz: Quiz = serde_json::from_str(r#"{"quiz_category": {"id": "4"}}"#).unwrap();
        assert_eq!(quiz.quiz_category.map(|c| c.id), Some(4));
    }
}
