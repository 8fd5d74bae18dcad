use super::*;

#[test]
fn specific_methods_by_keyword() {
    let cases = [
        ("Rencontre", MethodCategory::Encounter),
        ("Reset", MethodCategory::Reset),
        ("Reset du Légendaire", MethodCategory::Reset),
        ("Pêche (Super Canne)", MethodCategory::Encounter),
        ("Apparition Massive", MethodCategory::Encounter),
    ];
    for (name, expected) in cases {
        assert_eq!(classify_specific_method(name).category, expected, "'{}'", name);
    }
}

#[test]
fn specific_method_defaults_to_encounter() {
    let info = classify_specific_method("Combat Dynamax");
    assert_eq!(info.category, MethodCategory::Encounter);
    assert_eq!(info.description, "Méthode de rencontre");
}

#[test]
fn general_methods_prefer_longer_keywords() {
    let chroma = classify_general_method("Charme Chroma");
    assert_eq!(chroma.category, MethodCategory::General);
    assert_eq!(classify_general_method("Poké Radar").category, MethodCategory::Encounter);
    assert_eq!(classify_general_method("S.O.S").description, "Appel à l'aide");
    assert_eq!(classify_general_method("Masuda").category, MethodCategory::Breeding);
}

#[test]
fn general_method_defaults_to_general() {
    let info = classify_general_method("Bonus d'exploration");
    assert_eq!(info.category, MethodCategory::General);
    assert_eq!(info.description, "Méthode générale");
}

#[test]
fn fallback_scan_uses_whole_words() {
    let found = scan_general_methods("le calcul est fait avec la méthode masuda et le poké radar");
    assert_eq!(found, vec!["Masuda", "Poké Radar"]);
    assert!(scan_general_methods("rien à signaler").is_empty());
}

#[test]
fn fallback_table_has_eleven_methods() {
    assert_eq!(FALLBACK_GENERAL_METHODS.len(), 11);
}

#[test]
fn clean_method_name_expands_abbreviations() {
    assert_eq!(clean_method_name("App. M."), "Apparition Massive");
    assert_eq!(clean_method_name(" Rencontre "), "Rencontre");
}

#[test]
fn method_keywords_match_glued_text() {
    assert!(contains_method_keyword("RougeRencontre"));
    assert!(contains_method_keyword("Pêche"));
    assert!(!contains_method_keyword("Route 1"));
}

#[test]
fn refinement_markers() {
    assert!(has_refinement_marker("Rencontre niv. 28"));
    assert!(has_refinement_marker("Rencontre Repousse"));
    assert!(!has_refinement_marker("Rencontre"));
}

#[test]
fn breedability() {
    assert!(is_breedable("Pikachu"));
    assert!(!is_breedable("Métamorphe"));
    assert!(!is_breedable(" Mewtwo "));
}

#[test]
fn category_parse_and_display() {
    for &category in MethodCategory::all() {
        let parsed: MethodCategory = category.to_string().parse().unwrap();
        assert_eq!(parsed, category);
    }
    assert!("fishing".parse::<MethodCategory>().is_err());
    assert_eq!(
        serde_json::to_string(&MethodCategory::Breeding).unwrap(),
        "\"breeding\""
    );
}
