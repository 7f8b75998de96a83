//! Wire shapes that only exist on the upstream side.
//!
//! Artist profiles decode straight into [`Artist`](crate::domain::models::Artist);
//! only the relations envelope needs its own type.

use serde::Deserialize;

use crate::domain::models::RelationsData;

/// Body of `GET /relation/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationsDocument {
    #[serde(default)]
    pub id: u32,
    pub dates_locations: RelationsData,
}
