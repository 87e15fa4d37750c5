//! Extraction "Artiste - Titre" depuis les titres de posts

use mixfeed::RawPost;
use std::fmt;

/// Séparateurs reconnus, par ordre de priorité
///
/// Le premier séparateur présent dans le titre l'emporte, même s'il
/// apparaît plus loin qu'un séparateur de rang inférieur.
pub const SEPARATORS: [&str; 4] = [" -- ", " — ", " – ", " - "];

/// Requête de recherche dérivée d'un titre de post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongQuery {
    pub artist: String,
    pub title: String,
    /// `"{artist} {title}"`
    pub search_query: String,
}

impl SongQuery {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        let artist = artist.into();
        let title = title.into();
        let search_query = format!("{} {}", artist, title);
        Self {
            artist,
            title,
            search_query,
        }
    }
}

impl fmt::Display for SongQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}

/// Coupe au premier `[` ou `(` puis supprime les espaces
fn strip_annotations(text: &str) -> &str {
    let end = text.find(['[', '(']).unwrap_or(text.len());
    text[..end].trim()
}

/// Analyse un titre de post
///
/// Retourne `None` si aucun séparateur n'est trouvé. Un côté vide donne
/// un champ vide, pas une erreur.
pub fn parse_title(title: &str) -> Option<SongQuery> {
    let separator = SEPARATORS.iter().find(|sep| title.contains(**sep))?;
    let (artist, remainder) = title.split_once(separator)?;

    Some(SongQuery::new(
        strip_annotations(artist),
        strip_annotations(remainder),
    ))
}

/// Analyse une liste de posts, en ignorant ceux qui ne correspondent pas
pub fn parse_posts(posts: &[RawPost]) -> Vec<SongQuery> {
    posts
        .iter()
        .filter_map(|post| parse_title(&post.title))
        .collect()
}
