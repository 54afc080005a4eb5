//! Country name to ISO 3166-1 alpha-2 code lookup.

use std::collections::HashMap;

/// Common ISO 3166-1 alpha-2 codes with their English short names.
const BUNDLED_COUNTRIES: &[(&str, &str)] = &[
    ("AE", "United Arab Emirates"),
    ("AR", "Argentina"),
    ("AT", "Austria"),
    ("AU", "Australia"),
    ("BD", "Bangladesh"),
    ("BE", "Belgium"),
    ("BG", "Bulgaria"),
    ("BR", "Brazil"),
    ("BY", "Belarus"),
    ("CA", "Canada"),
    ("CH", "Switzerland"),
    ("CL", "Chile"),
    ("CN", "China"),
    ("CO", "Colombia"),
    ("CY", "Cyprus"),
    ("CZ", "Czech Republic"),
    ("DE", "Germany"),
    ("DK", "Denmark"),
    ("DZ", "Algeria"),
    ("EE", "Estonia"),
    ("EG", "Egypt"),
    ("ES", "Spain"),
    ("FI", "Finland"),
    ("FR", "France"),
    ("GB", "United Kingdom (UK)"),
    ("GH", "Ghana"),
    ("GR", "Greece"),
    ("HK", "Hong Kong"),
    ("HR", "Croatia"),
    ("HU", "Hungary"),
    ("ID", "Indonesia"),
    ("IE", "Ireland"),
    ("IL", "Israel"),
    ("IN", "India"),
    ("IQ", "Iraq"),
    ("IR", "Iran"),
    ("IS", "Iceland"),
    ("IT", "Italy"),
    ("JM", "Jamaica"),
    ("JP", "Japan"),
    ("KE", "Kenya"),
    ("KR", "South Korea"),
    ("KZ", "Kazakhstan"),
    ("LK", "Sri Lanka"),
    ("LT", "Lithuania"),
    ("LU", "Luxembourg"),
    ("LV", "Latvia"),
    ("MA", "Morocco"),
    ("MT", "Malta"),
    ("MX", "Mexico"),
    ("MY", "Malaysia"),
    ("NG", "Nigeria"),
    ("NL", "Netherlands"),
    ("NO", "Norway"),
    ("NP", "Nepal"),
    ("NZ", "New Zealand"),
    ("PE", "Peru"),
    ("PH", "Philippines"),
    ("PK", "Pakistan"),
    ("PL", "Poland"),
    ("PT", "Portugal"),
    ("RO", "Romania"),
    ("RS", "Serbia"),
    ("RU", "Russia"),
    ("SA", "Saudi Arabia"),
    ("SE", "Sweden"),
    ("SG", "Singapore"),
    ("SI", "Slovenia"),
    ("SK", "Slovakia"),
    ("TH", "Thailand"),
    ("TR", "Turkey"),
    ("TW", "Taiwan"),
    ("UA", "Ukraine"),
    ("US", "United States (US)"),
    ("VE", "Venezuela"),
    ("VN", "Vietnam"),
    ("ZA", "South Africa"),
];

/// Maps human-readable country names to their codes.
///
/// Names are matched case-insensitively. Codes are returned lowercased so
/// they compare equal to a normalized address part holding the bare code.
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    by_name: HashMap<String, String>,
}

impl CountryTable {
    /// Build a table from `(code, name)` pairs.
    #[must_use]
    pub fn from_pairs<I, C, N>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, N)>,
        C: AsRef<str>,
        N: AsRef<str>,
    {
        let by_name = pairs
            .into_iter()
            .map(|(code, name)| {
                (
                    name.as_ref().trim().to_lowercase(),
                    code.as_ref().trim().to_lowercase(),
                )
            })
            .collect();
        Self { by_name }
    }

    /// The bundled table of common countries.
    #[must_use]
    pub fn bundled() -> Self {
        let mut table = Self::from_pairs(BUNDLED_COUNTRIES.iter().copied());
        // Store checkouts often send the short form without the suffix.
        table.insert("US", "United States");
        table.insert("GB", "United Kingdom");
        table
    }

    /// Add or replace one mapping.
    pub fn insert(&mut self, code: &str, name: &str) {
        self.by_name
            .insert(name.trim().to_lowercase(), code.trim().to_lowercase());
    }

    /// Lowercased code for `name`, if it is a known country name.
    #[must_use]
    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Normalize one address part: trimmed, lowercased, country names folded
    /// to their code.
    #[must_use]
    pub fn normalize_part(&self, part: &str) -> String {
        let lowered = part.trim().to_lowercase();
        match self.by_name.get(&lowered) {
            Some(code) => code.clone(),
            None => lowered,
        }
    }

    /// Number of known names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns true if no names are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
