use moto_catalog::SpecValue;
use moto_catalog::coerce::{CoercionRules, coerce, is_numeric_shaped, parse_number};

#[test]
fn reference_examples() {
    assert_eq!(coerce("prix", "34 990"), SpecValue::Number(34990.0));
    assert_eq!(coerce("abs", "Oui"), SpecValue::Bool(true));
    assert_eq!(coerce("modele", "MT-07"), SpecValue::Text("MT-07".to_string()));
    assert_eq!(coerce("prix", ""), SpecValue::Null);
}

#[test]
fn coercion_is_deterministic() {
    let inputs = [
        ("prix", "34 990"),
        ("abs", "Oui"),
        ("modele", "MT-07"),
        ("moteur_cylindree", "689 cc"),
        ("moteur_type", "Bicylindre 4 temps"),
        ("garantie", "2"),
    ];
    for (key, raw) in inputs {
        let first = coerce(key, raw);
        for _ in 0..5 {
            assert_eq!(coerce(key, raw), first, "{key} = {raw:?}");
        }
    }
}

#[test]
fn hinted_key_extracts_number_from_unit_text() {
    assert_eq!(coerce("moteur_cylindree", "689 cc"), SpecValue::Number(689.0));
    assert_eq!(coerce("moteur_puissance_ch", "73,4 ch"), SpecValue::Number(73.4));
    assert_eq!(coerce("poids_kg", "184 kg"), SpecValue::Number(184.0));
    assert_eq!(coerce("prix_tnd", "34.990,500 DT"), SpecValue::Number(34990.5));
}

#[test]
fn hinted_key_without_number_stays_text() {
    assert_eq!(
        coerce("prix", "Sur demande"),
        SpecValue::Text("Sur demande".to_string())
    );
}

#[test]
fn boolean_words_are_bilingual_and_case_insensitive() {
    for word in ["oui", "OUI", "Yes", "true", "Vrai", "1"] {
        assert_eq!(coerce("abs", word), SpecValue::Bool(true), "{word}");
    }
    for word in ["non", "NO", "False", "faux", "0"] {
        assert_eq!(coerce("abs", word), SpecValue::Bool(false), "{word}");
    }
}

#[test]
fn hint_beats_boolean() {
    // "1" under a numeric key is a number, not `true`
    assert_eq!(coerce("nombre_cylindres_cc", "1"), SpecValue::Number(1.0));
    assert_eq!(coerce("options", "1"), SpecValue::Bool(true));
}

#[test]
fn short_numeric_text_without_hint() {
    assert_eq!(coerce("garantie", "24"), SpecValue::Number(24.0));
    assert_eq!(coerce("note", "4,5"), SpecValue::Number(4.5));
    // too long to be a plain number (reference codes, phone numbers)
    assert_eq!(
        coerce("reference", "123456789012345"),
        SpecValue::Text("123456789012345".to_string())
    );
    assert_eq!(coerce("transmission", "6 rapports"), SpecValue::Text("6 rapports".to_string()));
}

#[test]
fn dotted_dates_and_versions_stay_text() {
    assert_eq!(
        coerce("date_mise_a_jour", "12.05.2024"),
        SpecValue::Text("12.05.2024".to_string())
    );
    assert_eq!(
        coerce("version_firmware", "1.2.3"),
        SpecValue::Text("1.2.3".to_string())
    );
    assert_eq!(coerce("homologation", "1.234.5"), SpecValue::Text("1.234.5".to_string()));
    // real thousands grouping still parses
    assert_eq!(coerce("kilometrage", "1.234,5"), SpecValue::Number(1234.5));
    assert_eq!(coerce("stock_total", "1,234,567"), SpecValue::Number(1234567.0));
}

#[test]
fn text_is_trimmed() {
    assert_eq!(coerce("couleur", "  Bleu  "), SpecValue::Text("Bleu".to_string()));
    assert_eq!(coerce("couleur", "   "), SpecValue::Null);
}

#[test]
fn extended_vocabulary() {
    let mut rules = CoercionRules::default();
    rules.extend(&[], &["disponible".to_string()], &["Épuisé".to_string()]);
    assert_eq!(rules.coerce_text("stock", "Disponible"), SpecValue::Bool(true));
    assert_eq!(rules.coerce_text("stock", "EPUISE"), SpecValue::Bool(false));
    // built-in words survive
    assert_eq!(rules.coerce_text("stock", "oui"), SpecValue::Bool(true));
}

#[test]
fn number_helpers() {
    assert_eq!(parse_number("1 234 567"), Some(1234567.0));
    assert_eq!(parse_number("abc"), None);
    assert!(is_numeric_shaped("-12.5"));
    assert!(!is_numeric_shaped("12 mois"));
}
