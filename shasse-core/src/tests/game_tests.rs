use super::*;

#[test]
fn all_has_38_variants() {
    assert_eq!(Game::all().len(), 38);
}

#[test]
fn scan_order_covers_every_game() {
    for game in Game::all() {
        assert!(
            SCAN_ORDER.contains(game),
            "{:?} missing from scan order",
            game
        );
    }
    assert_eq!(SCAN_ORDER.len(), ALL_GAMES.len());
}

#[test]
fn scan_order_is_most_specific_first() {
    // An earlier name must never be found inside a later one, otherwise the
    // later game could never be detected.
    for (i, earlier) in SCAN_ORDER.iter().enumerate() {
        for later in &SCAN_ORDER[i + 1..] {
            assert!(
                !contains_word(later.canonical_name(), earlier.canonical_name()),
                "'{}' shadows '{}'",
                earlier,
                later
            );
        }
    }
}

#[test]
fn canonical_names_round_trip() {
    for &game in Game::all() {
        let parsed: Game = game.canonical_name().parse().unwrap();
        assert_eq!(parsed, game, "round-trip failed for {:?}", game);
    }
}

#[test]
fn clean_game_name_expands_abbreviations() {
    let cases = [
        ("RF", "Rouge Feu"),
        ("VF", "Vert Feuille"),
        ("Pl", "Platine"),
        ("HG", "HeartGold"),
        ("N2", "Noir 2"),
        ("B2", "Blanc 2"),
        ("US", "Ultra-Soleil"),
        ("LGE", "LG: Évoli"),
        ("LéA", "Légendes Pokémon: Arceus"),
        ("EV", "Écarlate/Violet"),
        (" Ec ", "Écarlate"),
    ];
    for (input, expected) in cases {
        assert_eq!(clean_game_name(input), expected, "input '{}'", input);
    }
}

#[test]
fn clean_game_name_is_case_sensitive_passthrough() {
    assert_eq!(clean_game_name("rf"), "rf");
    assert_eq!(clean_game_name("Écarlate"), "Écarlate");
    assert_eq!(clean_game_name("  Zone Côtière "), "Zone Côtière");
    assert_eq!(clean_game_name(""), "");
}

#[test]
fn rouge_feu_is_third_generation() {
    assert_eq!(detect_generation_from_game("Rouge Feu").map(|g| g.number()), Some(3));
    assert_eq!(detect_generation_from_game("Rouge").map(|g| g.number()), Some(1));
}

#[test]
fn specific_names_beat_their_substrings() {
    let cases = [
        ("Ultra-Lune", 7),
        ("Lune", 7),
        ("Rubis Oméga", 6),
        ("Rubis", 3),
        ("Diamant Étincelant", 8),
        ("Diamant", 4),
        ("Noir 2", 5),
        ("Perle Scintillante", 8),
        ("Écarlate/Violet", 9),
        ("HeartGold", 4),
    ];
    for (name, expected) in cases {
        assert_eq!(
            detect_generation_from_game(name).map(|g| g.number()),
            Some(expected),
            "generation of '{}'",
            name
        );
    }
    assert_eq!(Game::find_in("Rubis Oméga"), Some(Game::OmegaRuby));
    assert_eq!(Game::find_in("Pokémon Ultra-Soleil"), Some(Game::UltraSun));
}

#[test]
fn abbreviation_fallback_detects_generation() {
    assert_eq!(detect_generation_from_game("SS").map(|g| g.number()), Some(4));
    assert_eq!(detect_generation_from_game("LGP").map(|g| g.number()), Some(7));
}

#[test]
fn unknown_game_has_no_generation() {
    assert_eq!(detect_generation_from_game("Pokémon Stadium"), None);
    assert_eq!(detect_generation_from_game(""), None);
}

#[test]
fn short_names_do_not_match_inside_words() {
    assert_eq!(Game::find_in("Forêt de Jade"), None);
    assert!(!contains_known_game("Parc Safari"));
    assert!(contains_known_game("Or"));
    assert!(contains_known_game("RF"));
    assert!(contains_known_game("Let's Go, Pikachu"));
}

#[test]
fn unknown_string_returns_err() {
    assert!("Pokémon Snap".parse::<Game>().is_err());
}

#[test]
fn display_returns_canonical_name() {
    assert_eq!(Game::LegendsArceus.to_string(), "Légendes Pokémon: Arceus");
    assert_eq!(format!("{}", Game::FireRed), "Rouge Feu");
}
