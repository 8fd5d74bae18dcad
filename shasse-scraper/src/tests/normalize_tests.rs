use super::*;
use shasse_core::MethodCategory;

fn cells(texts: &[&str]) -> Vec<RawCell> {
    texts.iter().map(|t| RawCell::text_only(t)).collect()
}

fn ctx(game: &str, method: &str) -> RowContext {
    RowContext {
        current_game: Some(game.to_string()),
        current_method: Some(method.to_string()),
    }
}

#[test]
fn four_cells_map_positionally() {
    let row = normalize(
        &cells(&["Écarlate", "Rencontre", "Zone Côtière", "30%"]),
        &RowContext::default(),
    )
    .unwrap();
    assert_eq!(row.game, "Écarlate");
    assert_eq!(row.method, "Rencontre");
    assert_eq!(row.location, "Zone Côtière");
    assert_eq!(row.probability, "30%");

    let record = row.into_record();
    assert_eq!(record.category, MethodCategory::Encounter);
}

#[test]
fn four_cells_expand_abbreviated_game() {
    let row = normalize(
        &cells(&["RF", "Reset", "Route 1", "1/4096"]),
        &RowContext::default(),
    )
    .unwrap();
    assert_eq!(row.game, "Rouge Feu");
    assert_eq!(row.probability, "1/4096");
}

#[test]
fn sprites_come_from_location_cell() {
    let row_cells = vec![
        RawCell::text_only("Rouge"),
        RawCell::text_only("Rencontre"),
        RawCell::new(
            "Route 1",
            r#"<td>Route 1 <img src="a.png" alt="Rattata"></td>"#,
        ),
        RawCell::text_only("20%"),
    ];
    let row = normalize(&row_cells, &RowContext::default()).unwrap();
    assert_eq!(row.sprites, vec!["Rattata"]);
}

#[test]
fn three_cells_with_game_first() {
    let row = normalize(
        &cells(&["Violet", "Surf", "Lac Sans-Fond"]),
        &RowContext::default(),
    )
    .unwrap();
    assert_eq!(row.game, "Violet");
    assert_eq!(row.method, "Surf");
    assert_eq!(row.location, "Lac Sans-Fond");
    assert_eq!(row.probability, "");
}

#[test]
fn three_cells_continuation_reuses_current_game() {
    let row = normalize(&cells(&["Pêche", "Route 12", "5%"]), &ctx("Or", "Rencontre")).unwrap();
    assert_eq!(row.game, "Or");
    assert_eq!(row.method, "Pêche");
    assert_eq!(row.location, "Route 12");
    assert_eq!(row.probability, "5%");
}

#[test]
fn three_cells_split_glued_game_and_method() {
    let row = normalize(
        &cells(&["RougeRencontre", "Route 1", "45%"]),
        &RowContext::default(),
    )
    .unwrap();
    assert_eq!(row.game, "Rouge");
    assert_eq!(row.method, "Rencontre");
    assert_eq!(row.location, "Route 1");
}

#[test]
fn two_cells_location_and_probability() {
    let row = normalize(&cells(&["Route 2", "15% TC = 3%"]), &ctx("Bleu", "Rencontre")).unwrap();
    assert_eq!(row.game, "Bleu");
    assert_eq!(row.method, "Rencontre");
    assert_eq!(row.location, "Route 2");
    assert_eq!(row.probability, "15% | TC = 3%");
}

#[test]
fn two_cells_method_and_location() {
    let row = normalize(&cells(&["Surf", "Route 19"]), &ctx("Jaune", "Rencontre")).unwrap();
    assert_eq!(row.game, "Jaune");
    assert_eq!(row.method, "Surf");
    assert_eq!(row.location, "Route 19");
}

#[test]
fn one_cell_needs_rate_and_location() {
    let row = normalize(&cells(&["Route 3 25%"]), &ctx("Rouge", "Rencontre")).unwrap();
    assert_eq!(row.location, "Route 3");
    assert_eq!(row.probability, "25%");
    assert_eq!(row.game, "Rouge");

    assert!(normalize(&cells(&["25%"]), &ctx("Rouge", "Rencontre")).is_none());
    assert!(normalize(&cells(&["Route 3"]), &ctx("Rouge", "Rencontre")).is_none());
    assert!(normalize(&cells(&["??? 25%"]), &ctx("Rouge", "Rencontre")).is_none());
}

#[test]
fn sprite_only_cell_yields_nothing() {
    let sprite = RawCell::new("", r#"<td><img src="p.png" alt="Pikachu"></td>"#);
    assert!(normalize(&[sprite], &ctx("Rouge", "Rencontre")).is_none());
}

#[test]
fn unsupported_cell_counts_yield_nothing() {
    assert!(normalize(&[], &RowContext::default()).is_none());
    assert!(normalize(&cells(&["a", "b", "c", "d", "e"]), &RowContext::default()).is_none());
}

#[test]
fn dropped_row_keeps_context() {
    let start = ctx("Rouge", "Rencontre");
    let (next, row) = normalize_row(start.clone(), &cells(&["", "", "", ""]));
    assert!(row.is_none());
    assert_eq!(next, start);
}

#[test]
fn context_carries_forward_through_a_table() {
    let rows = [
        cells(&["Écarlate", "Rencontre", "Zone Côtière", "30%"]),
        cells(&["Zone Sud", "12%"]),
        cells(&["Sandwich", "Zone Nord", "8%"]),
        cells(&["Grotte Nord", "4%"]),
    ];
    let mut context = RowContext::default();
    let mut out = Vec::new();
    for row in &rows {
        let (next, normalized) = normalize_row(context, row);
        context = next;
        out.extend(normalized);
    }
    let triples: Vec<(&str, &str, &str)> = out
        .iter()
        .map(|r| (r.game.as_str(), r.method.as_str(), r.location.as_str()))
        .collect();
    assert_eq!(
        triples,
        vec![
            ("Écarlate", "Rencontre", "Zone Côtière"),
            ("Écarlate", "Rencontre", "Zone Sud"),
            ("Écarlate", "Sandwich", "Zone Nord"),
            ("Écarlate", "Sandwich", "Grotte Nord"),
        ]
    );
}

#[test]
fn split_composite_requires_leading_text() {
    assert_eq!(
        split_composite("Rouge FeuReset"),
        Some(("Rouge Feu".to_string(), "Reset".to_string()))
    );
    assert_eq!(split_composite("Rencontre niv. 28"), None);
    assert_eq!(split_composite("Route 1"), None);
}

#[test]
fn split_composite_ignores_spaced_keywords() {
    assert_eq!(split_composite("Super Canne Pêche"), None);
    assert_eq!(split_composite("Hautes herbes Rencontre"), None);
    assert_eq!(
        split_composite("ÉpéeRencontre puis Reset"),
        Some(("Épée".to_string(), "Rencontre puis Reset".to_string()))
    );
}

#[test]
fn spaced_method_cell_keeps_context_game() {
    let row = normalize(
        &cells(&["Super Canne Pêche", "Route 12", "5%"]),
        &ctx("Or", "Rencontre"),
    )
    .unwrap();
    assert_eq!(row.game, "Or");
    assert_eq!(row.method, "Super Canne Pêche");
    assert_eq!(row.location, "Route 12");

    let row = normalize(&cells(&["Hautes herbes Rencontre", "Route 12"]), &ctx("Or", "Surf")).unwrap();
    assert_eq!(row.game, "Or");
    assert_eq!(row.method, "Hautes herbes Rencontre");
    assert_eq!(row.location, "Route 12");
}

#[test]
fn probability_cleanup() {
    assert_eq!(clean_probability("50% TC = 10%", &[]), "50% | TC = 10%");
    assert_eq!(clean_probability("50%", &["TC = 10%".to_string()]), "50% | TC = 10%");
    assert_eq!(clean_probability("50%", &["10 %".to_string()]), "50% | TC = 10%");
    assert_eq!(clean_probability("50%", &["Pikachu".to_string()]), "50%");
    assert_eq!(clean_probability("TC = 7%", &[]), "TC = 7%");
    assert_eq!(clean_probability("", &[]), "");
}

#[test]
fn pathological_probability_is_truncated_to_first_rate() {
    let long = format!("{} 12% puis encore du texte", "bla ".repeat(40));
    assert_eq!(clean_probability(&long, &[]), "12%");

    let no_rate = "x".repeat(150);
    assert_eq!(
        clean_probability(&no_rate, &[]).chars().count(),
        MAX_PROBABILITY_CHARS
    );
}

#[test]
fn location_cleanup_strips_rates() {
    assert_eq!(clean_location("Route 1 TC = 5%"), "Route 1");
    assert_eq!(clean_location("Route 1 30% (jour)"), "Route 1");
    assert_eq!(clean_location("  Zone   Côtière | "), "Zone Côtière");
}

#[test]
fn method_details() {
    let details = parse_method_details("Rencontre niv. 28 Repousse");
    assert_eq!(details.level, Some(28));
    assert_eq!(details.conditions.as_deref(), Some("Avec Repousse"));

    let sandwich = parse_method_details("Sandwich Acier N.3");
    assert_eq!(sandwich.conditions.as_deref(), Some("Sandwich Acier Niveau 3"));

    let aura = parse_method_details("Rencontre Aura Porte-Bonheur");
    assert_eq!(aura.conditions.as_deref(), Some("Aura Porte-Bonheur"));

    assert_eq!(parse_method_details("Reset"), MethodDetails::default());
}

#[test]
fn into_record_keeps_method_text_and_details() {
    let row = NormalizedRow {
        game: "Or".to_string(),
        method: "Reset niv. 40".to_string(),
        location: "Tour Cendrée".to_string(),
        probability: "100%".to_string(),
        sprites: vec![],
    };
    let record = row.into_record();
    assert_eq!(record.method, "Reset niv. 40");
    assert_eq!(record.level, Some(40));
    assert_eq!(record.category, MethodCategory::Reset);
}
