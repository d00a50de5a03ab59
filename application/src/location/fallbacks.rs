use domain::point::Point;

/// State labels as the district layer abbreviates them.
const STATE_CODES: &[(&str, &str)] = &[
    ("Madhya Pradesh", "MP"),
    ("Tripura", "TR"),
    ("Odisha", "OD"),
    ("Telangana", "TS"),
];

/// Telangana shows up as TS or TG depending on the data load.
const TELANGANA_CODES: &[&str] = &["TS", "TG", "Telangana"];

/// Approximate state centres, used when the state layer has nothing.
const STATE_FALLBACK_CENTROIDS: &[(&str, Point)] = &[
    ("Telangana", Point::unchecked(79.0193, 18.1124)),
    ("Odisha", Point::unchecked(85.0985, 20.9517)),
    ("Madhya Pradesh", Point::unchecked(78.6569, 22.9734)),
    ("Tripura", Point::unchecked(91.9790, 23.9408)),
];

/// Approximate centre of India.
pub const GLOBAL_DEFAULT_POINT: Point = Point::unchecked(78.9629, 20.5937);

fn label_matches(label: &str, candidate: &str) -> bool {
    label.trim().eq_ignore_ascii_case(candidate)
}

#[must_use]
pub fn state_code(label: &str) -> Option<&'static str> {
    STATE_CODES
        .iter()
        .find(|(name, _)| label_matches(label, name))
        .map(|(_, code)| *code)
}

/// Codes to try for the district layer's `state` field, most likely first.
#[must_use]
pub fn district_state_codes(label: &str) -> Vec<String> {
    let label = label.trim();
    match state_code(label) {
        Some("TS") => TELANGANA_CODES.iter().map(ToString::to_string).collect(),
        Some(code) => vec![code.to_string(), label.to_string()],
        None => vec![label.to_string()],
    }
}

#[must_use]
pub fn static_fallback(label: &str) -> Option<Point> {
    STATE_FALLBACK_CENTROIDS
        .iter()
        .find(|(name, _)| label_matches(label, name))
        .map(|(_, point)| *point)
}
