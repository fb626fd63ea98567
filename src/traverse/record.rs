use crate::error::{Error, Result};

/// One row of the traverse table, kept as text until a component consumes it
/// so parse failures can name the parcel and beacon.
///
/// Empty strings are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraverseRecord {
    pub parcel_id: String,
    pub beacon_num: String,
    pub x: Option<String>,
    pub y: Option<String>,
    pub degrees: Option<String>,
    pub minutes: Option<String>,
    pub distance: Option<String>,
    pub offset: Option<String>,
}

/// Number of columns in the fixed table layout.
pub const TRAVERSE_COLUMNS: usize = 8;

#[inline]
fn field(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

impl TraverseRecord {
    /// Build a record from the positional columns
    /// `parcel_id, beacon_num, x, y, degrees, minutes, distance, offset`.
    /// Missing trailing columns are treated as empty.
    pub fn from_fields(fields: &[Option<&str>]) -> Self {
        let at = |i: usize| field(fields.get(i).copied().flatten());
        Self {
            parcel_id: at(0).unwrap_or_default(),
            beacon_num: at(1).unwrap_or_default(),
            x: at(2),
            y: at(3),
            degrees: at(4),
            minutes: at(5),
            distance: at(6),
            offset: at(7),
        }
    }

    /// Absolute fix: both X and Y are present.
    #[inline]
    pub fn has_xy(&self) -> bool { self.x.is_some() && self.y.is_some() }

    /// Complete polar leg: degrees, minutes and distance are all present.
    #[inline]
    pub fn has_leg(&self) -> bool {
        self.degrees.is_some() && self.minutes.is_some() && self.distance.is_some()
    }

    /// True when no coordinate or leg column carries anything.
    #[inline]
    pub fn is_offset_only(&self) -> bool {
        self.offset.is_some()
            && self.x.is_none() && self.y.is_none()
            && self.degrees.is_none() && self.minutes.is_none() && self.distance.is_none()
    }

    /// Parse a numeric column, naming this row on failure.
    pub(crate) fn number(&self, value: &str, what: &str) -> Result<f64> {
        value.parse::<f64>().ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::malformed(&self.parcel_id, &self.beacon_num, format!("{what} value '{value}'")))
    }

    /// The road offset carried by this row, if any.
    pub fn offset_value(&self) -> Result<Option<f64>> {
        self.offset.as_deref().map(|v| self.number(v, "offset")).transpose()
    }
}
