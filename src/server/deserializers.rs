use serde::de::Error;
use serde::{Deserialize, Deserializer};

// `?page=abc` falls back to the first page instead of rejecting the request
pub fn deserialize_lenient_page<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.trim().parse().ok()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

// the quiz page keeps ids it has seen either as numbers or as the strings it read from the DOM;
// null and a missing field both mean "nothing asked yet"
pub fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<RawId>>::deserialize(deserializer)?;
    raw.unwrap_or_default()
        .into_iter()
        .map(|id| match id {
            RawId::Number(n) => Ok(n),
            RawId::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| D::Error::custom(format!("Wrong value {s}, can not parse to i64"))),
        })
        .collect()
}
