use crate::error::{SongkeyError, SongkeyResult};
use crate::utils::{key_for, parse_int, PARSE_FAILED};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    #[serde(default)]
    pub album: String,
    pub album_artist: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default, deserialize_with = "tag_number")]
    pub track: i32,
    #[serde(default, deserialize_with = "tag_number")]
    pub disc_number: i32,
    #[serde(default, deserialize_with = "tag_number")]
    pub year: i32,
    #[serde(default)]
    pub duration_secs: i64,
    #[serde(default)]
    pub path: String,
}

/// Tag numbers arrive either as JSON numbers or as raw tag text ("7", "3/12")
#[derive(Deserialize)]
#[serde(untagged)]
enum TagNumber {
    Number(i64),
    Text(String),
}

fn tag_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TagNumber::deserialize(deserializer)? {
        TagNumber::Number(n) => i32::try_from(n).unwrap_or(PARSE_FAILED),
        TagNumber::Text(text) => parse_int(Some(&text)),
    })
}

/// Songs sharing an album artist name key
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumArtist {
    /// First spelling seen in the library
    pub name: String,
    pub songs: Vec<Song>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Library {
    pub songs: Vec<Song>,
}

impl Library {
    pub fn new(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    pub fn from_json_str(json: &str) -> SongkeyResult<Self> {
        let library: Library = serde_json::from_str(json)?;
        library.validate()?;
        Ok(library)
    }

    pub fn load(path: &Path) -> SongkeyResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let library = Self::from_json_str(&content)?;
        info!("📚 Loaded {} songs from {}", library.songs.len(), path.display());
        Ok(library)
    }

    fn validate(&self) -> SongkeyResult<()> {
        for (idx, song) in self.songs.iter().enumerate() {
            if song.title.trim().is_empty() {
                return Err(SongkeyError::Library(format!("song {} has no title", idx)));
            }
            if song.album_artist.trim().is_empty() {
                return Err(SongkeyError::Library(format!(
                    "song {} ({:?}) has no album artist",
                    idx, song.title
                )));
            }
        }
        Ok(())
    }

    /// Group songs by album artist key, in order of first appearance.
    ///
    /// "The Beatles" and "Beatles, The" land in the same group.
    pub fn album_artists(&self) -> Vec<AlbumArtist> {
        let mut groups: Vec<AlbumArtist> = Vec::new();
        let mut by_key: HashMap<String, usize> = HashMap::new();

        for song in &self.songs {
            let key = key_for(Some(&song.album_artist));
            match by_key.get(&key) {
                Some(&idx) => groups[idx].songs.push(song.clone()),
                None => {
                    by_key.insert(key, groups.len());
                    groups.push(AlbumArtist {
                        name: song.album_artist.clone(),
                        songs: vec![song.clone()],
                    });
                }
            }
        }

        debug!("Grouped {} songs into {} album artists", self.songs.len(), groups.len());
        groups
    }

    pub fn album_artist_names(&self) -> Vec<String> {
        self.album_artists().into_iter().map(|a| a.name).collect()
    }
}
