//! Entity-class and demonym rewriting for name concepts.

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// Known demonym → country names that the suffix rules get wrong.
static NATIONALITIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from_iter([
        ("Chinese", "China"),
        ("Balinese", "Bali"),
        ("French", "France"),
        ("Dutch", "Netherlands"),
        ("Irish", "Ireland"),
        ("Scottish", "Scotland"),
        ("Welsh", "Wales"),
        ("English", "England"),
        ("British", "Britain"),
        ("Finnish", "Finland"),
        ("Swedish", "Sweden"),
        ("Spanish", "Spain"),
        ("Somali", "Somalia"),
        ("Hawaiian", "Hawaii"),
        ("Brazilian", "Brazil"),
        ("Kentuckian", "Kentucky"),
        ("Italian", "Italy"),
        ("German", "Germany"),
        ("Norwegian", "Norway"),
        ("Belgian", "Belgium"),
        ("Washingtonian", "Washington"),
        ("Canadian", "Canada"),
    ])
});

/// Suffix rewrites applied in order when the table has no entry:
/// Iraqi → Iraq, Russian → Russia, Tennesseean → Tennessee,
/// Moldovan → Moldova, Japanese → Japan.
static SUFFIX_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"i$", ""),
        (r"ian$", "ia"),
        (r"([aeiouy])an$", "$1"),
        (r"an$", "a"),
        (r"ese$", ""),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (Regex::new(pattern).expect("hard-coded pattern"), replacement)
    })
    .collect()
});

fn demonym_to_country(name: &str) -> String {
    if let Some(country) = NATIONALITIES.get(name) {
        return (*country).to_string();
    }
    let mut name = name.to_string();
    for (rule, replacement) in SUFFIX_RULES.iter() {
        name = rule.replace(&name, *replacement).into_owned();
    }
    name
}

/// Rewrite an entity class and its name into AMR terms: corporations become
/// companies, nationalities become their country.
pub fn amrify(ne_class: &str, name: &str) -> (String, String) {
    match ne_class {
        "corporation" => ("company".to_string(), name.to_string()),
        "nationality" => ("country".to_string(), demonym_to_country(name)),
        _ => (ne_class.to_string(), name.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_wins_over_suffix_rules() {
        assert_eq!(demonym_to_country("French"), "France");
        assert_eq!(demonym_to_country("Dutch"), "Netherlands");
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(demonym_to_country("Iraqi"), "Iraq");
        assert_eq!(demonym_to_country("Russian"), "Russia");
        assert_eq!(demonym_to_country("Australian"), "Australia");
        assert_eq!(demonym_to_country("Tennesseean"), "Tennessee");
        assert_eq!(demonym_to_country("Moldovan"), "Moldova");
        assert_eq!(demonym_to_country("American"), "America");
        assert_eq!(demonym_to_country("Japanese"), "Japan");
    }

    #[test]
    fn test_amrify() {
        assert_eq!(
            amrify("corporation", "Consolidated Gold Fields PLC"),
            ("company".to_string(), "Consolidated Gold Fields PLC".to_string())
        );
        assert_eq!(
            amrify("nationality", "British"),
            ("country".to_string(), "Britain".to_string())
        );
        assert_eq!(
            amrify("person", "Rudolph Agnew"),
            ("person".to_string(), "Rudolph Agnew".to_string())
        );
    }
}
