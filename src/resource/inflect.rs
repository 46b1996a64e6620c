//! Resource name to model name inference.

/// Derives a model name from a resource name: singular, camel-cased.
///
/// ```rust
/// use restroom::resource::classify;
///
/// assert_eq!(classify("authors"), "Author");
/// assert_eq!(classify("book_titles"), "BookTitle");
/// assert_eq!(classify("categories"), "Category");
/// ```
#[must_use]
pub fn classify(resource: &str) -> String {
    camelize(&singularize(resource))
}

/// Words with no distinct singular.
const UNCOUNTABLE: &[&str] = &[
    "data",
    "equipment",
    "fish",
    "information",
    "metadata",
    "news",
    "series",
    "sheep",
    "species",
];

/// Plural/singular pairs no suffix rule covers.
const IRREGULAR: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("movies", "movie"),
    ("people", "person"),
    ("women", "woman"),
];

/// Singulars ending in `s` whose plural adds `es`.
const ES_STEMS: &[&str] = &["alias", "bus", "campus", "gas", "lens", "status", "virus"];

/// Singularizes the last word of `word` with a small set of English rules.
///
/// Inference is best-effort: a resource whose model name comes out wrong
/// should name its model explicitly with
/// [`NodeOptions::model`](crate::resource::NodeOptions::model).
#[must_use]
pub fn singularize(word: &str) -> String {
    let split = word.rfind(['_', '-', ' ']).map_or(0, |i| i + 1);
    let (head, last) = word.split_at(split);
    format!("{head}{}", singularize_word(last))
}

fn singularize_word(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
        return (*singular).to_string();
    }

    if ES_STEMS.iter().any(|stem| lower.ends_with(&format!("{stem}es"))) {
        return word[..word.len() - 2].to_string();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }

    for suffix in ["sses", "xes", "ches", "shes", "zes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }

    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }

    word.strip_suffix('s').unwrap_or(word).to_string()
}

/// Joins `_`, `-` or space separated words into `CamelCase`.
#[must_use]
pub fn camelize(word: &str) -> String {
    word.split(['_', '-', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect()
}
