use shasse_core::Generation;
use shasse_core::text::fold_accents;

pub const DEFAULT_BASE_URL: &str = "https://www.pokebip.com";

const DOSSIER_PATH: &str = "/page/jeuxvideo/dossier_shasse/pokedex_shasse";
const SPRITE_PATH: &str = "/pages/icones/minichroma/NG";

/// Names whose URL slug is not derivable by the general rule.
const SPECIAL_SLUGS: &[(&str, &str)] = &[
    ("nidoran♀", "nidoran-f"),
    ("nidoran♂", "nidoran-m"),
    ("mr. mime", "mr-mime"),
    ("farfetch'd", "farfetchd"),
    ("ho-oh", "ho-oh"),
    ("type: null", "type-null"),
];

/// Turn a display name into the wiki's URL slug (`"Mr. Mime"` -> `"mr-mime"`).
pub fn normalize_pokemon_name_for_url(name: &str) -> String {
    let lower = fold_accents(&name.trim().to_lowercase());
    if let Some((_, slug)) = SPECIAL_SLUGS.iter().find(|(n, _)| *n == lower) {
        return (*slug).to_string();
    }
    lower
        .replace(' ', "-")
        .replace(['.', '\'', ':'], "")
}

fn trim_base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// The generation portal listing every Pokémon of that generation.
pub fn portal_url(base_url: &str, generation: Generation) -> String {
    format!("{}{}/portail/{}", trim_base(base_url), DOSSIER_PATH, generation.slug())
}

/// The hunting page of one Pokémon.
pub fn details_url(base_url: &str, name: &str, generation: Generation) -> String {
    format!(
        "{}{}/{}/{}",
        trim_base(base_url),
        DOSSIER_PATH,
        generation.slug(),
        normalize_pokemon_name_for_url(name)
    )
}

/// Shiny mini-sprite, by Pokédex number when known, else by slug.
pub fn sprite_url(base_url: &str, name: &str, number: Option<u32>) -> String {
    let key = match number {
        Some(n) => n.to_string(),
        None => normalize_pokemon_name_for_url(name),
    };
    format!("{}{}/{}.png", trim_base(base_url), SPRITE_PATH, key)
}

/// Resolve a protocol-relative or root-relative `src` against the site.
pub fn absolute_url(base_url: &str, src: &str) -> String {
    if let Some(rest) = src.strip_prefix("//") {
        format!("https://{}", rest)
    } else if src.starts_with('/') {
        format!("{}{}", trim_base(base_url), src)
    } else {
        src.to_string()
    }
}

/// Make a file-system safe name (`"Nidoran♀"` -> `"NidoranF"`).
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in fold_accents(name).chars() {
        match c {
            '♀' => out.push('F'),
            '♂' => out.push('M'),
            '.' | ':' | '?' | '!' => {}
            '/' | '\\' | '<' | '>' | '|' | '*' | '"' | ' ' | '-' => out.push('_'),
            other => out.push(other),
        }
    }

    let mut collapsed = String::with_capacity(out.len());
    for c in out.chars() {
        if c == '_' && collapsed.ends_with('_') {
            continue;
        }
        collapsed.push(c);
    }
    let trimmed = collapsed.trim_matches('_');
    shasse_core::text::truncate_chars(trimmed, 100).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generation(n: u8) -> Generation {
        Generation::new(n).unwrap()
    }

    #[test]
    fn slugs() {
        assert_eq!(normalize_pokemon_name_for_url("Bulbizarre"), "bulbizarre");
        assert_eq!(normalize_pokemon_name_for_url("Mr. Mime"), "mr-mime");
        assert_eq!(normalize_pokemon_name_for_url("Nidoran♀"), "nidoran-f");
        assert_eq!(normalize_pokemon_name_for_url("Flabébé"), "flabebe");
        assert_eq!(normalize_pokemon_name_for_url("Type: Null"), "type-null");
        assert_eq!(normalize_pokemon_name_for_url("M. Mime Jr."), "m-mime-jr");
    }

    #[test]
    fn page_urls() {
        assert_eq!(
            portal_url(DEFAULT_BASE_URL, generation(3)),
            "https://www.pokebip.com/page/jeuxvideo/dossier_shasse/pokedex_shasse/portail/3g"
        );
        assert_eq!(
            details_url("https://www.pokebip.com/", "Évoli", generation(1)),
            "https://www.pokebip.com/page/jeuxvideo/dossier_shasse/pokedex_shasse/1g/evoli"
        );
    }

    #[test]
    fn sprite_urls() {
        assert_eq!(
            sprite_url(DEFAULT_BASE_URL, "Pikachu", Some(25)),
            "https://www.pokebip.com/pages/icones/minichroma/NG/25.png"
        );
        assert_eq!(
            sprite_url(DEFAULT_BASE_URL, "Mr. Mime", None),
            "https://www.pokebip.com/pages/icones/minichroma/NG/mr-mime.png"
        );
    }

    #[test]
    fn absolute_urls() {
        assert_eq!(absolute_url(DEFAULT_BASE_URL, "//cdn.site/x.png"), "https://cdn.site/x.png");
        assert_eq!(
            absolute_url(DEFAULT_BASE_URL, "/img/home/1.png"),
            "https://www.pokebip.com/img/home/1.png"
        );
        assert_eq!(absolute_url(DEFAULT_BASE_URL, "https://a/b.png"), "https://a/b.png");
    }

    #[test]
    fn filenames() {
        assert_eq!(sanitize_filename("Nidoran♀"), "NidoranF");
        assert_eq!(sanitize_filename("Mr. Mime"), "Mr_Mime");
        assert_eq!(sanitize_filename("Ho-Oh"), "Ho_Oh");
        assert_eq!(sanitize_filename("Type: Null"), "Type_Null");
        assert_eq!(sanitize_filename("  Flabébé  "), "Flabebe");
        assert_eq!(sanitize_filename(&"a".repeat(150)).len(), 100);
    }
}
