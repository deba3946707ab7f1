use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A catalog entry. Read-only on the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "Title")]
    pub title: String,
    #[serde(default, alias = "Description", deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, alias = "Genre", deserialize_with = "null_as_default")]
    pub genre: Genre,
    #[serde(default, alias = "Director", deserialize_with = "null_as_default")]
    pub director: Director,
    #[serde(default, alias = "ImagePath", alias = "image_url")]
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(default, alias = "Name", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, alias = "Description", deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Director {
    #[serde(default, alias = "Name", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, alias = "Bio")]
    pub bio: Option<String>,
    #[serde(default, alias = "Birth", deserialize_with = "year")]
    pub birth_year: Option<i32>,
    #[serde(default, alias = "Death", deserialize_with = "year")]
    pub death_year: Option<i32>,
}

/// Result of a director lookup.
pub type DirectorInfo = Director;
/// Result of a genre lookup.
pub type GenreInfo = Genre;

/// A movie paired with the transient "is favorite" flag derived from the session.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieEntry {
    pub movie: Movie,
    pub is_favorite: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `1937`, `"1937"`, or a date string such as `"1937-11-30"`.
fn year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Some(Value::String(s)) => s.get(..4).and_then(|prefix| prefix.parse().ok()),
        _ => None,
    })
}
