use thiserror::Error;

/// Fatal faults raised while turning a traverse table into parcels.
///
/// Every variant aborts the whole run: one bad parcel invalidates the batch.
/// Join misses are not errors; see [`crate::JoinMiss`].
#[derive(Debug, Error)]
pub enum Error {
    /// A row carried a value that could not be used (bad number, incomplete leg).
    #[error("invalid {reason} for parcel {parcel}, beacon {beacon}")]
    MalformedInput {
        parcel: String,
        beacon: String,
        reason: String,
    },

    /// The first row of a parcel has no absolute coordinate to start from.
    #[error("no XY for starting point of parcel {parcel}")]
    MissingStart { parcel: String },

    /// A parcel id reappeared after another parcel had already started.
    #[error("parcel {parcel} is not contiguous; traverse rows must be grouped by parcel")]
    NonContiguousParcel { parcel: String },

    /// A closed ring is not a simple polygon with positive area.
    #[error("invalid parcel geometry for parcel {parcel}: {reason}")]
    InvalidGeometry { parcel: String, reason: String },

    /// A boundary layer or feature store could not be loaded.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The table had a header but no data rows.
    #[error("traverse table is empty or has no data rows")]
    EmptyInput,

    /// The worker thread ended without sending its terminal message.
    #[error("pipeline worker stopped without a result")]
    WorkerLost,

    /// The table does not have the fixed column layout.
    #[error("traverse table has {0} columns, expected {expected}", expected = crate::traverse::TRAVERSE_COLUMNS)]
    ColumnCount(usize),

    /// Reprojection could not be set up or applied.
    #[error("coordinate transform failed: {0}")]
    Transform(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] polars::error::PolarsError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "notify")]
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub(crate) fn malformed(parcel: &str, beacon: &str, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            parcel: parcel.to_string(),
            beacon: beacon.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_geometry(parcel: &str, reason: impl Into<String>) -> Self {
        Error::InvalidGeometry {
            parcel: parcel.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_parcel_and_beacon() {
        let err = Error::malformed("P001", "B002", "bearing/distance");
        assert_eq!(err.to_string(), "invalid bearing/distance for parcel P001, beacon B002");

        let err = Error::MissingStart { parcel: "P002".into() };
        assert_eq!(err.to_string(), "no XY for starting point of parcel P002");
    }

    #[test]
    fn geometry_message_names_parcel() {
        let err = Error::invalid_geometry("P009", "ring self-intersects");
        assert!(err.to_string().starts_with("invalid parcel geometry for parcel P009"));
    }
}
