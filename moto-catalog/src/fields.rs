//! Core field vocabulary: which normalized labels name a record's identity
//! and headline fields rather than an open spec.

/// A field stored directly on [`crate::Moto`] instead of in its specs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreField {
    Brand,
    Model,
    Year,
    Price,
    Category,
    Image,
}

impl CoreField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Model => "model",
            Self::Year => "year",
            Self::Price => "price",
            Self::Category => "category",
            Self::Image => "imageUrl",
        }
    }

    /// Resolve a normalized label to a core field, if it is one of the aliases.
    ///
    /// Underscores are ignored, so camelCase headers (`imageUrl` normalizes to
    /// `imageurl`) resolve like their snake_case spelling.
    pub fn from_key(key: &str) -> Option<Self> {
        CORE_FIELD_ALIASES
            .iter()
            .find(|(_, aliases)| contains_key(aliases, key))
            .map(|(field, _)| *field)
    }
}

/// Normalized label aliases per core field. Labels come from tabular headers
/// and from pivot sub-category cells alike.
pub const CORE_FIELD_ALIASES: &[(CoreField, &[&str])] = &[
    (
        CoreField::Brand,
        &["brand", "marque", "make", "fabricant", "constructeur"],
    ),
    (
        CoreField::Model,
        &["model", "modele", "nom_modele", "model_name"],
    ),
    (
        CoreField::Year,
        &["year", "annee", "millesime", "model_year"],
    ),
    (
        CoreField::Price,
        &["price", "prix", "prix_tnd", "prix_ttc", "tarif"],
    ),
    (CoreField::Category, &["category", "categorie", "segment"]),
    (
        CoreField::Image,
        &[
            "image",
            "images",
            "image_url",
            "image_link",
            "photo",
            "photos",
            "picture",
            "img",
        ],
    ),
];

/// Keys that name record metadata rather than a spec. Never stored in specs.
const METADATA_KEYS: &[&str] = &[
    "id",
    "slug",
    "brand_slug",
    "model_slug",
    "created_at",
    "source_file",
    "sheet",
];

/// Normalized category labels that mark the "general information" block of a
/// pivot sheet.
pub const GENERAL_INFO_MARKERS: &[&str] = &[
    "informations_generales",
    "information_generale",
    "infos_generales",
    "generalites",
    "general",
    "general_information",
];

/// Whether a normalized key is reserved for a core field or record metadata.
pub fn is_reserved_key(key: &str) -> bool {
    CoreField::from_key(key).is_some() || contains_key(METADATA_KEYS, key)
}

/// Table lookup that treats `brand_slug` and `brandslug` as the same key.
fn contains_key(table: &[&str], key: &str) -> bool {
    let compact = |s: &str| s.chars().filter(|c| *c != '_').collect::<String>();
    let key = compact(key);
    table.iter().any(|entry| compact(*entry) == key)
}

pub fn is_general_info(category_key: &str) -> bool {
    GENERAL_INFO_MARKERS.contains(&category_key)
}
