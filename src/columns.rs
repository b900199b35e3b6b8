//! Column role inference across heterogeneous spreadsheet layouts.
//!
//! Carriers hand-author their header rows, so the same semantic column shows
//! up as "Numéro Appelant", "NUMERO EMETTEUR", "Localisation ", and so on.
//! Headers are compared on a normalized form (lower-cased, diacritics
//! stripped) against a prioritized rule table.

use unicode_normalization::UnicodeNormalization;

/// Semantic roles a spreadsheet column can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Location,
    Imei,
    Caller,
    Called,
    Date,
    Duration,
}

#[derive(Debug)]
enum Pattern {
    Contains(&'static str),
    StartsWithAny(&'static [&'static str]),
}

impl Pattern {
    fn matches(&self, normalized: &str) -> bool {
        match self {
            Self::Contains(needle) => normalized.contains(needle),
            Self::StartsWithAny(prefixes) => prefixes.iter().any(|p| normalized.starts_with(p)),
        }
    }
}

/// Classification rules, evaluated top to bottom for each header; the first
/// hit classifies the column. The order is authoritative, not incidental:
/// roles share substrings ("date appel" vs "numero appelant", "duree" inside
/// composite headers), so reordering changes results.
const RULES: &[(Role, Pattern)] = &[
    (Role::Location, Pattern::Contains("localisation")),
    (Role::Imei, Pattern::Contains("imei")),
    (
        Role::Caller,
        Pattern::StartsWithAny(&["numero appelant", "numero emetteur"]),
    ),
    (
        Role::Called,
        Pattern::StartsWithAny(&["numero appele", "numero recepteur"]),
    ),
    (Role::Date, Pattern::Contains("date")),
    (Role::Duration, Pattern::Contains("duree")),
];

/// Column indices for each semantic role found in a header row
///
/// Missing roles are acceptable; absent columns simply yield empty or null
/// fields in every produced record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    /// Index of the location column
    pub location: Option<usize>,
    /// Index of the IMEI column
    pub imei: Option<usize>,
    /// Index of the caller-number column
    pub caller: Option<usize>,
    /// Index of the called-number column
    pub called: Option<usize>,
    /// Index of the date column
    pub date: Option<usize>,
    /// Index of the duration column
    pub duration: Option<usize>,
}

impl ColumnMap {
    fn assign(&mut self, role: Role, idx: usize) {
        match role {
            Role::Location => self.location = Some(idx),
            Role::Imei => self.imei = Some(idx),
            Role::Caller => self.caller = Some(idx),
            Role::Called => self.called = Some(idx),
            Role::Date => self.date = Some(idx),
            Role::Duration => self.duration = Some(idx),
        }
    }
}

/// Lower-case a header and strip diacritics so "Numéro Appelé" compares
/// equal to "numero appele".
#[must_use]
pub fn normalize_header(header: &str) -> String {
    header
        .nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Map a header row to semantic roles.
///
/// Each column gets at most one role (first matching rule wins for that
/// column); each role keeps the last column that matched it when duplicates
/// exist, since assignment is positional over the iteration.
#[must_use]
pub fn infer_columns(headers: &[String]) -> ColumnMap {
    let mut map = ColumnMap::default();
    for (idx, header) in headers.iter().enumerate() {
        let normalized = normalize_header(header);
        if let Some((role, _)) = RULES.iter().find(|(_, p)| p.matches(&normalized)) {
            map.assign(*role, idx);
        }
    }
    map
}
