//! listmonk API model types.

mod bounce;
mod campaign;
mod import;
mod list;
mod media;
mod subscriber;
mod template;
mod transactional;

pub use bounce::*;
pub use campaign::*;
pub use import::*;
pub use list::*;
pub use media::*;
pub use subscriber::*;
pub use template::*;
pub use transactional::*;

use serde::{Deserialize, Deserializer, Serialize};

/// Sort direction for search endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// `id=1&id=2` query used by bulk reads and deletes.
#[derive(Debug, Serialize)]
pub(crate) struct IdQuery<'a> {
    pub id: &'a [u64],
}

/// `{"ids": [...]}` body used by bulk writes.
#[derive(Debug, Serialize)]
pub(crate) struct IdBody<'a> {
    pub ids: &'a [u64],
}

/// listmonk sends `null` for empty arrays and maps; read those as empty.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_query_repeats_key() {
        let pairs = crate::query::encode(&IdQuery { id: &[4, 5] }).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("id".to_string(), "4".to_string()),
                ("id".to_string(), "5".to_string())
            ]
        );
    }

    #[test]
    fn sort_order_is_lowercase() {
        assert_eq!(serde_json::to_string(&SortOrder::Desc).unwrap(), "\"desc\"");
    }
}
