//! `WHERE` expressions for the boundary services.
//!
//! The three layers were loaded at different times with different field
//! names, so each tier carries several variants tried in order. Every value
//! embedded in an expression goes through [`escape_literal`].

use super::fallbacks::district_state_codes;

/// Doubles single quotes so a value can sit inside a SQL string literal.
#[must_use]
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

#[must_use]
pub fn village_filters(state: &str, district: &str, village: &str) -> Vec<String> {
    let s = escape_literal(state);
    let d = escape_literal(district);
    let v = escape_literal(village);

    vec![
        format!(
            "UPPER(State)=UPPER('{s}') AND UPPER(District)=UPPER('{d}') AND UPPER(Name)=UPPER('{v}')"
        ),
        format!(
            "UPPER(ST_NM)=UPPER('{s}') AND UPPER(DIST_NM)=UPPER('{d}') AND UPPER(VILL_NM)=UPPER('{v}')"
        ),
        format!(
            "UPPER(State) LIKE UPPER('%{s}%') AND UPPER(District) LIKE UPPER('%{d}%') AND UPPER(Name) LIKE UPPER('%{v}%')"
        ),
    ]
}

#[must_use]
pub fn district_filters(state: &str, district: &str) -> Vec<String> {
    let d = escape_literal(district);
    let codes: Vec<String> = district_state_codes(state)
        .iter()
        .map(|code| escape_literal(code))
        .collect();

    let plain_codes = codes
        .iter()
        .map(|code| format!("'{code}'"))
        .collect::<Vec<_>>()
        .join(",");
    let upper_codes = codes
        .iter()
        .map(|code| format!("UPPER('{code}')"))
        .collect::<Vec<_>>()
        .join(",");

    vec![
        format!("UPPER(district)=UPPER('{d}') AND state IN ({plain_codes})"),
        format!("UPPER(District)=UPPER('{d}') AND UPPER(State) IN ({upper_codes})"),
        format!("UPPER(dtname)=UPPER('{d}')"),
    ]
}

#[must_use]
pub fn state_filters(state: &str) -> Vec<String> {
    let code = escape_literal(super::fallbacks::state_code(state).unwrap_or(state));
    let name = escape_literal(state);

    let mut filters = vec![format!("(State_Name='{code}' OR State_FSI='{name}')")];
    filters.extend(
        ["State_Name", "State_FSI", "STATE_NAME", "STATE", "stname", "st_nm"]
            .iter()
            .map(|field| format!("UPPER({field})=UPPER('{name}')")),
    );
    filters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_are_doubled_in_every_village_variant() {
        let filters = village_filters("Odisha", "Cuttack", "O'Brien Nagar");
        assert_eq!(filters.len(), 3);
        for filter in &filters {
            assert!(filter.contains("O''Brien Nagar"), "{filter}");
            assert!(!filter.contains("O'Brien"), "{filter}");
        }
        assert_eq!(
            filters.first().map(String::as_str),
            Some(
                "UPPER(State)=UPPER('Odisha') AND UPPER(District)=UPPER('Cuttack') AND UPPER(Name)=UPPER('O''Brien Nagar')"
            )
        );
        assert!(filters.get(2).is_some_and(|f| f.contains("LIKE UPPER('%O''Brien Nagar%')")));
    }

    #[test]
    fn district_variants_use_state_codes() {
        let filters = district_filters("Odisha", "Cuttack");
        assert_eq!(
            filters,
            vec![
                "UPPER(district)=UPPER('Cuttack') AND state IN ('OD','Odisha')".to_string(),
                "UPPER(District)=UPPER('Cuttack') AND UPPER(State) IN (UPPER('OD'),UPPER('Odisha'))"
                    .to_string(),
                "UPPER(dtname)=UPPER('Cuttack')".to_string(),
            ]
        );
    }

    #[test]
    fn telangana_tries_both_legacy_codes() {
        let filters = district_filters("Telangana", "Warangal");
        assert_eq!(
            filters.first().map(String::as_str),
            Some("UPPER(district)=UPPER('Warangal') AND state IN ('TS','TG','Telangana')")
        );
    }

    #[test]
    fn unmapped_state_uses_label_once() {
        let filters = district_filters("Kerala", "Idukki");
        assert_eq!(
            filters.first().map(String::as_str),
            Some("UPPER(district)=UPPER('Idukki') AND state IN ('Kerala')")
        );
    }

    #[test]
    fn state_tier_has_seven_variants() {
        let filters = state_filters("Madhya Pradesh");
        assert_eq!(filters.len(), 7);
        assert_eq!(
            filters.first().map(String::as_str),
            Some("(State_Name='MP' OR State_FSI='Madhya Pradesh')")
        );
        assert_eq!(
            filters.last().map(String::as_str),
            Some("UPPER(st_nm)=UPPER('Madhya Pradesh')")
        );
    }
}
