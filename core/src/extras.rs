//! Optional per-photo fields requested through the `extras` parameter.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Extra {
    License,
    DateUpload,
    DateTaken,
    OwnerName,
    IconServer,
    OriginalFormat,
    LastUpdate,
    Geo,
    Tags,
    MachineTags,
}

impl Extra {
    pub fn as_str(self) -> &'static str {
        match self {
            Extra::License => "license",
            Extra::DateUpload => "date_upload",
            Extra::DateTaken => "date_taken",
            Extra::OwnerName => "owner_name",
            Extra::IconServer => "icon_server",
            Extra::OriginalFormat => "original_format",
            Extra::LastUpdate => "last_update",
            Extra::Geo => "geo",
            Extra::Tags => "tags",
            Extra::MachineTags => "machine_tags",
        }
    }
}

pub const ALL_EXTRAS: [Extra; 10] = [
    Extra::License,
    Extra::DateUpload,
    Extra::DateTaken,
    Extra::OwnerName,
    Extra::IconServer,
    Extra::OriginalFormat,
    Extra::LastUpdate,
    Extra::Geo,
    Extra::Tags,
    Extra::MachineTags,
];

pub const MIN_EXTRAS: [Extra; 2] = [Extra::OriginalFormat, Extra::OwnerName];

/// Comma-joined value for the `extras` parameter, or `None` when empty.
///
/// Duplicates collapse and the order is the declaration order of [`Extra`],
/// so the same set always encodes (and signs) the same way.
pub fn encode(extras: &[Extra]) -> Option<String> {
    let set: BTreeSet<Extra> = extras.iter().copied().collect();
    if set.is_empty() {
        return None;
    }
    Some(set.into_iter().map(Extra::as_str).collect::<Vec<_>>().join(","))
}
