//! Command results

use nearstore_core::{CollectionInfo, PointId, PointRecord, SearchHit};
use serde::{Deserialize, Serialize};

/// Successful result of a [`Command`](crate::Command)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// No value (create, recreate)
    Unit,
    /// Yes/no answer (delete collection)
    Bool(bool),
    /// A count (upsert, delete, count, upload)
    Count(usize),
    /// Collection listing
    Collections(Vec<CollectionInfo>),
    /// One collection's info
    CollectionInfo(CollectionInfo),
    /// Ranked search hits
    Hits(Vec<SearchHit>),
    /// Points by id
    Points(Vec<PointRecord>),
    /// One scroll page
    Page {
        /// Points on this page
        points: Vec<PointRecord>,
        /// Offset for the next page, absent at the end
        next_offset: Option<PointId>,
    },
}
