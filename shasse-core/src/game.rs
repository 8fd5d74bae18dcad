use crate::generation::Generation;
use crate::text::contains_word;

/// Main-series games as named on the French wiki.
///
/// This enum centralizes game identity (canonical French name, the
/// abbreviation used in compact table cells, extra spellings, and the
/// generation) so that the classifier, the normalizer and the store all agree
/// on one spelling per game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Game {
    // 1G
    Red,
    Blue,
    Yellow,

    // 2G
    Gold,
    Silver,
    Crystal,

    // 3G
    Ruby,
    Sapphire,
    Emerald,
    FireRed,
    LeafGreen,

    // 4G
    Diamond,
    Pearl,
    Platinum,
    HeartGold,
    SoulSilver,

    // 5G
    Black,
    White,
    Black2,
    White2,

    // 6G
    X,
    Y,
    OmegaRuby,
    AlphaSapphire,

    // 7G
    Sun,
    Moon,
    UltraSun,
    UltraMoon,
    LetsGoPikachu,
    LetsGoEevee,

    // 8G
    Sword,
    Shield,
    BrilliantDiamond,
    ShiningPearl,
    LegendsArceus,

    // 9G
    Scarlet,
    Violet,
    /// Pages often list the 9G pair as a single entry.
    ScarletViolet,
}

/// All game variants in release order.
const ALL_GAMES: &[Game] = &[
    Game::Red,
    Game::Blue,
    Game::Yellow,
    Game::Gold,
    Game::Silver,
    Game::Crystal,
    Game::Ruby,
    Game::Sapphire,
    Game::Emerald,
    Game::FireRed,
    Game::LeafGreen,
    Game::Diamond,
    Game::Pearl,
    Game::Platinum,
    Game::HeartGold,
    Game::SoulSilver,
    Game::Black,
    Game::White,
    Game::Black2,
    Game::White2,
    Game::X,
    Game::Y,
    Game::OmegaRuby,
    Game::AlphaSapphire,
    Game::Sun,
    Game::Moon,
    Game::UltraSun,
    Game::UltraMoon,
    Game::LetsGoPikachu,
    Game::LetsGoEevee,
    Game::Sword,
    Game::Shield,
    Game::BrilliantDiamond,
    Game::ShiningPearl,
    Game::LegendsArceus,
    Game::Scarlet,
    Game::Violet,
    Game::ScarletViolet,
];

/// Substring scan order for [`Game::find_in`].
///
/// Most specific first: a name that occurs inside another game's name
/// ("Rouge" in "Rouge Feu", "Lune" in "Ultra-Lune") must come after it.
const SCAN_ORDER: &[Game] = &[
    Game::ScarletViolet,
    Game::UltraSun,
    Game::UltraMoon,
    Game::OmegaRuby,
    Game::AlphaSapphire,
    Game::BrilliantDiamond,
    Game::ShiningPearl,
    Game::LegendsArceus,
    Game::LetsGoPikachu,
    Game::LetsGoEevee,
    Game::FireRed,
    Game::LeafGreen,
    Game::Black2,
    Game::White2,
    Game::HeartGold,
    Game::SoulSilver,
    Game::Platinum,
    Game::Emerald,
    Game::Crystal,
    Game::Red,
    Game::Blue,
    Game::Yellow,
    Game::Gold,
    Game::Silver,
    Game::Ruby,
    Game::Sapphire,
    Game::Diamond,
    Game::Pearl,
    Game::Black,
    Game::White,
    Game::Sun,
    Game::Moon,
    Game::Sword,
    Game::Shield,
    Game::Scarlet,
    Game::Violet,
    Game::X,
    Game::Y,
];

impl Game {
    /// Canonical French name, as stored and displayed.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Self::Red => "Rouge",
            Self::Blue => "Bleu",
            Self::Yellow => "Jaune",
            Self::Gold => "Or",
            Self::Silver => "Argent",
            Self::Crystal => "Cristal",
            Self::Ruby => "Rubis",
            Self::Sapphire => "Saphir",
            Self::Emerald => "Émeraude",
            Self::FireRed => "Rouge Feu",
            Self::LeafGreen => "Vert Feuille",
            Self::Diamond => "Diamant",
            Self::Pearl => "Perle",
            Self::Platinum => "Platine",
            Self::HeartGold => "HeartGold",
            Self::SoulSilver => "SoulSilver",
            Self::Black => "Noir",
            Self::White => "Blanc",
            Self::Black2 => "Noir 2",
            Self::White2 => "Blanc 2",
            Self::X => "X",
            Self::Y => "Y",
            Self::OmegaRuby => "Rubis Oméga",
            Self::AlphaSapphire => "Saphir Alpha",
            Self::Sun => "Soleil",
            Self::Moon => "Lune",
            Self::UltraSun => "Ultra-Soleil",
            Self::UltraMoon => "Ultra-Lune",
            Self::LetsGoPikachu => "LG: Pikachu",
            Self::LetsGoEevee => "LG: Évoli",
            Self::Sword => "Épée",
            Self::Shield => "Bouclier",
            Self::BrilliantDiamond => "Diamant Étincelant",
            Self::ShiningPearl => "Perle Scintillante",
            Self::LegendsArceus => "Légendes Pokémon: Arceus",
            Self::Scarlet => "Écarlate",
            Self::Violet => "Violet",
            Self::ScarletViolet => "Écarlate/Violet",
        }
    }

    /// Abbreviation used in compact table cells. Case-sensitive.
    pub fn abbreviation(&self) -> Option<&'static str> {
        match self {
            Self::Red => Some("R"),
            Self::Blue => Some("B"),
            Self::Yellow => Some("J"),
            Self::Gold => Some("O"),
            Self::Silver => Some("A"),
            Self::Crystal => Some("C"),
            Self::FireRed => Some("RF"),
            Self::LeafGreen => Some("VF"),
            Self::Diamond => Some("D"),
            Self::Pearl => Some("P"),
            Self::Platinum => Some("Pl"),
            Self::HeartGold => Some("HG"),
            Self::SoulSilver => Some("SS"),
            Self::Black => Some("N"),
            Self::Black2 => Some("N2"),
            Self::White2 => Some("B2"),
            Self::OmegaRuby => Some("RO"),
            Self::AlphaSapphire => Some("SA"),
            Self::Sun => Some("So"),
            Self::Moon => Some("Lu"),
            Self::UltraSun => Some("US"),
            Self::UltraMoon => Some("UL"),
            Self::LetsGoPikachu => Some("LGP"),
            Self::LetsGoEevee => Some("LGE"),
            Self::Sword => Some("Ep"),
            Self::Shield => Some("Bo"),
            Self::BrilliantDiamond => Some("DE"),
            Self::ShiningPearl => Some("PE"),
            Self::LegendsArceus => Some("LéA"),
            Self::Scarlet => Some("Ec"),
            Self::Violet => Some("Vi"),
            Self::ScarletViolet => Some("EV"),
            Self::Ruby
            | Self::Sapphire
            | Self::Emerald
            | Self::White
            | Self::X
            | Self::Y => None,
        }
    }

    /// Other spellings seen in page text (lowercase).
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::HeartGold => &["heart gold", "or heartgold"],
            Self::SoulSilver => &["soul silver", "argent soulsilver"],
            Self::UltraSun => &["ultra soleil"],
            Self::UltraMoon => &["ultra lune"],
            Self::LetsGoPikachu => &["let's go pikachu", "let's go, pikachu", "lg pikachu"],
            Self::LetsGoEevee => &["let's go évoli", "let's go, évoli", "lg évoli"],
            Self::LegendsArceus => &["légendes arceus", "légendes : arceus"],
            Self::ScarletViolet => &["écarlate et violet", "écarlate / violet"],
            Self::OmegaRuby => &["rubis omega"],
            Self::Emerald => &["emeraude"],
            _ => &[],
        }
    }

    pub fn generation(&self) -> Generation {
        let number = match self {
            Self::Red | Self::Blue | Self::Yellow => 1,
            Self::Gold | Self::Silver | Self::Crystal => 2,
            Self::Ruby | Self::Sapphire | Self::Emerald | Self::FireRed | Self::LeafGreen => 3,
            Self::Diamond | Self::Pearl | Self::Platinum | Self::HeartGold | Self::SoulSilver => 4,
            Self::Black | Self::White | Self::Black2 | Self::White2 => 5,
            Self::X | Self::Y | Self::OmegaRuby | Self::AlphaSapphire => 6,
            Self::Sun
            | Self::Moon
            | Self::UltraSun
            | Self::UltraMoon
            | Self::LetsGoPikachu
            | Self::LetsGoEevee => 7,
            Self::Sword
            | Self::Shield
            | Self::BrilliantDiamond
            | Self::ShiningPearl
            | Self::LegendsArceus => 8,
            Self::Scarlet | Self::Violet | Self::ScarletViolet => 9,
        };
        // Every arm above is within 1..=9.
        Generation::new(number).unwrap_or(Generation::FIRST)
    }

    /// Returns a slice of all game variants.
    pub fn all() -> &'static [Game] {
        ALL_GAMES
    }

    /// Exact, case-sensitive abbreviation lookup (`"RF"` is Rouge Feu, `"rf"`
    /// is nothing).
    pub fn from_abbreviation(abbrev: &str) -> Option<Game> {
        ALL_GAMES
            .iter()
            .copied()
            .find(|game| game.abbreviation() == Some(abbrev))
    }

    /// First game whose name or alias occurs in `text` as a whole phrase,
    /// scanning the most specific names first.
    pub fn find_in(text: &str) -> Option<Game> {
        SCAN_ORDER.iter().copied().find(|game| {
            contains_word(text, game.canonical_name())
                || game.aliases().iter().any(|alias| contains_word(text, alias))
        })
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

/// Error returned when a string cannot be parsed into a `Game`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown game: '{0}'")]
pub struct GameParseError(pub String);

impl std::str::FromStr for Game {
    type Err = GameParseError;

    /// Parse a game from its canonical name or an alias (case-insensitive), or
    /// from its abbreviation (case-sensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(game) = Game::from_abbreviation(trimmed) {
            return Ok(game);
        }
        let lower = trimmed.to_lowercase();
        for &game in ALL_GAMES {
            if game.canonical_name().to_lowercase() == lower {
                return Ok(game);
            }
            if game.aliases().contains(&lower.as_str()) {
                return Ok(game);
            }
        }
        Err(GameParseError(s.to_string()))
    }
}

/// Expand an abbreviated game cell to its canonical name.
///
/// Only an exact abbreviation is expanded; anything else is returned trimmed
/// but otherwise untouched.
pub fn clean_game_name(raw: &str) -> String {
    let trimmed = raw.trim();
    match Game::from_abbreviation(trimmed) {
        Some(game) => game.canonical_name().to_string(),
        None => trimmed.to_string(),
    }
}

/// Whether `text` names a known game, either as an exact abbreviation or by
/// containing a game name.
pub fn contains_known_game(text: &str) -> bool {
    Game::from_abbreviation(text.trim()).is_some() || Game::find_in(text).is_some()
}

/// Detect the generation a game name belongs to.
///
/// Returns `None` when neither the name scan nor the abbreviation table
/// recognizes it, so callers can tell an unknown game from a 1G one.
pub fn detect_generation_from_game(name: &str) -> Option<Generation> {
    if let Some(game) = Game::find_in(name) {
        return Some(game.generation());
    }
    if let Some(game) = Game::from_abbreviation(name.trim()) {
        return Some(game.generation());
    }
    log::debug!("No generation known for game '{}'", name);
    None
}

#[cfg(test)]
#[path = "tests/game_tests.rs"]
mod tests;
