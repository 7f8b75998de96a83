//! Artist profile as served by the upstream catalogue API.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Date format the upstream uses for `firstAlbum` (`dd-mm-yyyy`).
const FIRST_ALBUM_FORMAT: &str = "%d-%m-%Y";

/// Every performance of one artist: location -> ordered dates.
pub type RelationsData = BTreeMap<String, Vec<String>>;

/// A music artist.
///
/// Decoded straight from the upstream JSON. `relations_data` is never part
/// of the upstream payload; it is attached once the relations document for
/// the artist has been fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: u32,
    pub image: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub members: Vec<String>,
    pub creation_date: i32,
    pub first_album: String,

    /// Cross-reference locators (opaque ids or URLs depending on deployment)
    pub locations: String,
    pub concert_dates: String,
    pub relations: String,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub relations_data: Option<RelationsData>,
}

/// The upstream sends `"members": null` on zeroed profiles.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Artist {
    /// Attach the relations document, consuming the bare profile.
    pub fn with_relations(mut self, relations: RelationsData) -> Self {
        self.relations_data = Some(relations);
        self
    }

    /// Parsed first album date, if the upstream string is well formed.
    pub fn first_album_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.first_album, FIRST_ALBUM_FORMAT).ok()
    }

    pub fn first_album_year(&self) -> Option<i32> {
        self.first_album_date().map(|d| d.year())
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}
