//! Voice Search
//!
//! Turns a spoken "play <artist>" query into an ordered queue of songs.
//! Playing the queue is left to the caller.

use crate::library::{AlbumArtist, Library, Song};
use crate::utils::{adjusted_similarity, contains_ignore_case};
use tracing::{debug, info};

/// Default minimum score for the fuzzy fallback
pub const DEFAULT_THRESHOLD: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Try fuzzy matching when no album artist name contains the query
    pub fuzzy_fallback: bool,
    /// Minimum adjusted similarity for a fuzzy hit
    pub threshold: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            fuzzy_fallback: true,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Album artist chosen for a query
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistMatch {
    pub artist: AlbumArtist,
    /// 1.0 for substring hits
    pub score: f64,
    pub fuzzy: bool,
}

pub struct VoiceSearch<'a> {
    library: &'a Library,
    options: SearchOptions,
}

impl<'a> VoiceSearch<'a> {
    pub fn new(library: &'a Library, options: SearchOptions) -> Self {
        Self { library, options }
    }

    /// Pick the album artist a query refers to.
    ///
    /// The first artist whose name contains the query wins. Otherwise, with
    /// the fallback enabled, the best fuzzy score at or above the threshold;
    /// ties go to the artist seen first.
    pub fn find_album_artist(&self, query: &str) -> Option<ArtistMatch> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let artists = self.library.album_artists();

        if let Some(artist) = artists.iter().find(|a| contains_ignore_case(&a.name, query)) {
            debug!("'{}' contains '{}'", artist.name, query);
            return Some(ArtistMatch {
                artist: artist.clone(),
                score: 1.0,
                fuzzy: false,
            });
        }

        if !self.options.fuzzy_fallback {
            return None;
        }

        let mut best: Option<(&AlbumArtist, f64)> = None;
        for artist in &artists {
            let score = adjusted_similarity(Some(&artist.name), Some(query));
            debug!("Fuzzy '{}' vs '{}': {:.2}", artist.name, query, score);
            if score < self.options.threshold {
                continue;
            }
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((artist, score));
            }
        }

        best.map(|(artist, score)| ArtistMatch {
            artist: artist.clone(),
            score,
            fuzzy: true,
        })
    }

    /// Songs to queue for `query`, empty when nothing matches.
    pub fn resolve(&self, query: &str) -> Vec<Song> {
        match self.find_album_artist(query) {
            Some(hit) => {
                info!(
                    "🎵 '{}' -> {} ({} songs, score {:.2})",
                    query.trim(),
                    hit.artist.name,
                    hit.artist.songs.len(),
                    hit.score
                );
                let mut songs = hit.artist.songs;
                sort_for_queue(&mut songs);
                songs
            }
            None => {
                info!("No album artist matches '{}'", query.trim());
                Vec::new()
            }
        }
    }
}

/// Queue order: disc, then track, then album, then album artist.
pub fn sort_for_queue(songs: &mut [Song]) {
    songs.sort_by(|a, b| {
        a.disc_number
            .cmp(&b.disc_number)
            .then(a.track.cmp(&b.track))
            .then_with(|| a.album.cmp(&b.album))
            .then_with(|| a.album_artist.cmp(&b.album_artist))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(title: &str, album: &str, artist: &str, disc: i32, track: i32) -> Song {
        Song {
            title: title.to_string(),
            album: album.to_string(),
            album_artist: artist.to_string(),
            artist: artist.to_string(),
            track,
            disc_number: disc,
            year: 0,
            duration_secs: 180,
            path: String::new(),
        }
    }

    fn library() -> Library {
        Library::new(vec![
            song("Let It Be", "Let It Be", "The Beatles", 1, 6),
            song("Help!", "Help!", "The Beatles", 1, 1),
            song("Yesterday", "Help!", "Beatles, The", 1, 13),
            song("Creep", "Pablo Honey", "Radiohead", 1, 2),
            song("Airbag", "OK Computer", "Radiohead", 1, 1),
            song("Hey Jude", "Past Masters", "The Beatles", 2, 1),
        ])
    }

    #[test]
    fn test_substring_match_orders_queue() {
        let library = library();
        let search = VoiceSearch::new(&library, SearchOptions::default());

        let titles: Vec<String> = search
            .resolve("beatles")
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Help!", "Let It Be", "Yesterday", "Hey Jude"]);
    }

    #[test]
    fn test_match_ignores_case() {
        let library = library();
        let search = VoiceSearch::new(&library, SearchOptions::default());

        let titles: Vec<String> = search
            .resolve("RADIOHEAD")
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Airbag", "Creep"]);
    }

    #[test]
    fn test_blank_query() {
        let library = library();
        let search = VoiceSearch::new(&library, SearchOptions::default());
        assert!(search.resolve("").is_empty());
        assert!(search.resolve("   ").is_empty());
    }

    #[test]
    fn test_fuzzy_fallback() {
        let library = library();
        let search = VoiceSearch::new(&library, SearchOptions::default());

        let hit = search.find_album_artist("radiohed").expect("fuzzy hit");
        assert_eq!(hit.artist.name, "Radiohead");
        assert!(hit.fuzzy);
        assert!(hit.score >= DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_fuzzy_fallback_disabled() {
        let library = library();
        let options = SearchOptions {
            fuzzy_fallback: false,
            ..SearchOptions::default()
        };
        let search = VoiceSearch::new(&library, options);
        assert!(search.find_album_artist("radiohed").is_none());
        assert!(search.resolve("radiohed").is_empty());
    }

    #[test]
    fn test_unrelated_query() {
        let library = library();
        let search = VoiceSearch::new(&library, SearchOptions::default());
        assert!(search.resolve("mozart").is_empty());
    }
}
