//! Catalog statistics
//!
//! [`compute_stats`] turns a snapshot of the song collection into a
//! [`StatsReport`]: overview totals plus genre, artist and album groupings.
//!
//! Every grouping is built in one pass into an insertion-ordered frequency
//! table and then stable-sorted by count descending, so groups with equal
//! counts keep the order in which their key was first seen in the input.
//! The function is pure: it borrows the input, keeps no state, and returns
//! the same report for the same input.

use crate::db::models::Song;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Collection-wide totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_songs: usize,
    pub total_artists: usize,
    pub total_albums: usize,
    pub total_genres: usize,
}

/// Songs per genre
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

/// Songs per genre with share of the whole catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreShare {
    pub genre: String,
    pub count: usize,
    /// Percent of all songs, rounded to two decimals; 0 for an empty catalog
    pub percentage: f64,
}

/// Songs and distinct albums per artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistStats {
    pub artist: String,
    pub song_count: usize,
    pub album_count: usize,
    /// Distinct album names in first-seen order
    pub albums: Vec<String>,
}

/// Songs per (album, artist) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumStats {
    pub album: String,
    pub artist: String,
    pub song_count: usize,
}

/// Complete computed aggregates for one snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub overview: Overview,
    pub songs_by_genre: Vec<GenreCount>,
    pub songs_by_artist: Vec<ArtistStats>,
    pub songs_by_album: Vec<AlbumStats>,
    pub genre_distribution: Vec<GenreShare>,
}

/// Frequency table that remembers first-seen key order
///
/// Keys are borrowed from the snapshot; nothing is allocated per song.
struct Tally<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K: Eq + Hash + Copy, V: Default> Tally<K, V> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn entry(&mut self, key: K) -> &mut V {
        let slot = *self.index.entry(key).or_insert_with(|| {
            self.entries.push((key, V::default()));
            self.entries.len() - 1
        });
        &mut self.entries[slot].1
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries sorted by `count` descending, ties in first-seen order
    fn into_ranked(self, count: impl Fn(&V) -> usize) -> Vec<(K, V)> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| count(&b.1).cmp(&count(&a.1)));
        entries
    }
}

#[derive(Default)]
struct ArtistTally<'a> {
    songs: usize,
    seen: HashSet<&'a str>,
    albums: Vec<&'a str>,
}

/// Round to two decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Share of `count` in `total` as a percentage, 0 when `total` is 0
fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

/// Compute catalog statistics from a snapshot of songs
pub fn compute_stats(songs: &[Song]) -> StatsReport {
    let mut genres: Tally<&str, usize> = Tally::new();
    let mut artists: Tally<&str, ArtistTally> = Tally::new();
    let mut albums: Tally<(&str, &str), usize> = Tally::new();
    let mut album_names: HashSet<&str> = HashSet::new();

    for song in songs {
        let (genre, artist, album) = (
            song.genre.as_str(),
            song.artist.as_str(),
            song.album.as_str(),
        );

        *genres.entry(genre) += 1;

        let tally = artists.entry(artist);
        tally.songs += 1;
        if tally.seen.insert(album) {
            tally.albums.push(album);
        }

        *albums.entry((album, artist)) += 1;
        album_names.insert(album);
    }

    let total_songs = songs.len();
    let overview = Overview {
        total_songs,
        total_artists: artists.len(),
        total_albums: album_names.len(),
        total_genres: genres.len(),
    };

    let songs_by_genre: Vec<GenreCount> = genres
        .into_ranked(|count| *count)
        .into_iter()
        .map(|(genre, count)| GenreCount {
            genre: genre.to_string(),
            count,
        })
        .collect();

    let genre_distribution = songs_by_genre
        .iter()
        .map(|g| GenreShare {
            genre: g.genre.clone(),
            count: g.count,
            percentage: percentage(g.count, total_songs),
        })
        .collect();

    let songs_by_artist = artists
        .into_ranked(|tally| tally.songs)
        .into_iter()
        .map(|(artist, tally)| ArtistStats {
            artist: artist.to_string(),
            song_count: tally.songs,
            album_count: tally.albums.len(),
            albums: tally.albums.into_iter().map(str::to_string).collect(),
        })
        .collect();

    let songs_by_album = albums
        .into_ranked(|count| *count)
        .into_iter()
        .map(|((album, artist), song_count)| AlbumStats {
            album: album.to_string(),
            artist: artist.to_string(),
            song_count,
        })
        .collect();

    StatsReport {
        overview,
        songs_by_genre,
        songs_by_artist,
        songs_by_album,
        genre_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time;

    fn song(n: usize, artist: &str, album: &str, genre: &str) -> Song {
        let now = time::now();
        Song {
            id: format!("song-{}", n),
            title: format!("Track {}", n),
            artist: artist.to_string(),
            album: album.to_string(),
            genre: genre.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn classic_rock_and_pop() -> Vec<Song> {
        vec![
            song(1, "Queen", "A Night at the Opera", "Rock"),
            song(2, "Eagles", "Hotel California", "Rock"),
            song(3, "Michael Jackson", "Thriller", "Pop"),
        ]
    }

    fn mixed_catalog() -> Vec<Song> {
        vec![
            song(1, "Queen", "A Night at the Opera", "Rock"),
            song(2, "Queen", "A Night at the Opera", "Rock"),
            song(3, "Queen", "News of the World", "Rock"),
            song(4, "Miles Davis", "Kind of Blue", "Jazz"),
            song(5, "Miles Davis", "Kind of Blue", "Jazz"),
            song(6, "Weezer", "Weezer", "Rock"),
            song(7, "Weezer", "Weezer", "Alternative"),
            song(8, "Metallica", "Metallica", "Metal"),
            song(9, "Peter Gabriel", "Peter Gabriel", "Art Rock"),
            song(10, "Peter Gabriel", "Peter Gabriel", "Art Rock"),
            song(11, "Weezer", "Peter Gabriel", "Rock"),
        ]
    }

    #[test]
    fn test_empty_catalog() {
        let report = compute_stats(&[]);

        assert_eq!(report.overview, Overview::default());
        assert!(report.songs_by_genre.is_empty());
        assert!(report.songs_by_artist.is_empty());
        assert!(report.songs_by_album.is_empty());
        assert!(report.genre_distribution.is_empty());
    }

    #[test]
    fn test_percentage_of_empty_total_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(3, 0), 0.0);
    }

    #[test]
    fn test_three_song_scenario() {
        let report = compute_stats(&classic_rock_and_pop());

        assert_eq!(
            report.overview,
            Overview {
                total_songs: 3,
                total_artists: 3,
                total_albums: 3,
                total_genres: 2,
            }
        );

        assert_eq!(
            report.genre_distribution,
            vec![
                GenreShare {
                    genre: "Rock".to_string(),
                    count: 2,
                    percentage: 66.67,
                },
                GenreShare {
                    genre: "Pop".to_string(),
                    count: 1,
                    percentage: 33.33,
                },
            ]
        );
    }

    #[test]
    fn test_genre_counts_sum_to_total() {
        let songs = mixed_catalog();
        let report = compute_stats(&songs);

        let sum: usize = report.songs_by_genre.iter().map(|g| g.count).sum();
        assert_eq!(sum, report.overview.total_songs);
        assert_eq!(sum, songs.len());
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let report = compute_stats(&mixed_catalog());

        let sum: f64 = report.genre_distribution.iter().map(|g| g.percentage).sum();
        assert!((sum - 100.0).abs() <= 0.1, "percentages summed to {}", sum);
    }

    #[test]
    fn test_distinct_totals_match_input() {
        let songs = mixed_catalog();
        let report = compute_stats(&songs);

        let artists: HashSet<&str> = songs.iter().map(|s| s.artist.as_str()).collect();
        let albums: HashSet<&str> = songs.iter().map(|s| s.album.as_str()).collect();
        let genres: HashSet<&str> = songs.iter().map(|s| s.genre.as_str()).collect();

        assert_eq!(report.overview.total_artists, artists.len());
        assert_eq!(report.overview.total_albums, albums.len());
        assert_eq!(report.overview.total_genres, genres.len());
    }

    #[test]
    fn test_distinct_values_are_case_sensitive() {
        let songs = vec![
            song(1, "Queen", "Innuendo", "Rock"),
            song(2, "queen", "innuendo", "rock"),
        ];
        let report = compute_stats(&songs);

        assert_eq!(report.overview.total_artists, 2);
        assert_eq!(report.overview.total_albums, 2);
        assert_eq!(report.overview.total_genres, 2);
    }

    #[test]
    fn test_artist_album_count_matches_albums() {
        let report = compute_stats(&mixed_catalog());

        for artist in &report.songs_by_artist {
            assert_eq!(artist.album_count, artist.albums.len());
            let distinct: HashSet<&String> = artist.albums.iter().collect();
            assert_eq!(distinct.len(), artist.albums.len());
        }

        let queen = &report.songs_by_artist[0];
        assert_eq!(queen.artist, "Queen");
        assert_eq!(queen.song_count, 3);
        assert_eq!(
            queen.albums,
            vec!["A Night at the Opera".to_string(), "News of the World".to_string()]
        );
    }

    #[test]
    fn test_album_groups_keyed_by_album_and_artist() {
        let songs = mixed_catalog();
        let report = compute_stats(&songs);

        for entry in &report.songs_by_album {
            let expected = songs
                .iter()
                .filter(|s| s.album == entry.album && s.artist == entry.artist)
                .count();
            assert_eq!(entry.song_count, expected);
        }

        // "Peter Gabriel" exists by two artists and must form two groups
        let peter_gabriel: Vec<&AlbumStats> = report
            .songs_by_album
            .iter()
            .filter(|a| a.album == "Peter Gabriel")
            .collect();
        assert_eq!(peter_gabriel.len(), 2);
    }

    #[test]
    fn test_groupings_sorted_by_count_descending() {
        let report = compute_stats(&mixed_catalog());

        assert!(report
            .songs_by_genre
            .windows(2)
            .all(|w| w[0].count >= w[1].count));
        assert!(report
            .songs_by_artist
            .windows(2)
            .all(|w| w[0].song_count >= w[1].song_count));
        assert!(report
            .songs_by_album
            .windows(2)
            .all(|w| w[0].song_count >= w[1].song_count));
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let songs = vec![
            song(1, "Miles Davis", "Kind of Blue", "Jazz"),
            song(2, "Queen", "Innuendo", "Rock"),
            song(3, "Queen", "Innuendo", "Rock"),
            song(4, "Miles Davis", "Kind of Blue", "Jazz"),
            song(5, "Metallica", "Metallica", "Metal"),
        ];
        let report = compute_stats(&songs);

        let genres: Vec<&str> = report.songs_by_genre.iter().map(|g| g.genre.as_str()).collect();
        assert_eq!(genres, vec!["Jazz", "Rock", "Metal"]);

        let artists: Vec<&str> = report
            .songs_by_artist
            .iter()
            .map(|a| a.artist.as_str())
            .collect();
        assert_eq!(artists, vec!["Miles Davis", "Queen", "Metallica"]);

        let albums: Vec<&str> = report.songs_by_album.iter().map(|a| a.album.as_str()).collect();
        assert_eq!(albums, vec!["Kind of Blue", "Innuendo", "Metallica"]);

        // Same counts, different first-seen order
        let mut reversed = songs.clone();
        reversed.swap(0, 1);
        let report = compute_stats(&reversed);
        let genres: Vec<&str> = report.songs_by_genre.iter().map(|g| g.genre.as_str()).collect();
        assert_eq!(genres, vec!["Rock", "Jazz", "Metal"]);
        let albums: Vec<&str> = report.songs_by_album.iter().map(|a| a.album.as_str()).collect();
        assert_eq!(albums, vec!["Innuendo", "Kind of Blue", "Metallica"]);
    }

    #[test]
    fn test_artist_albums_tie_in_first_seen_order() {
        let songs = vec![
            song(1, "The Beatles", "Revolver", "Rock"),
            song(2, "The Beatles", "Abbey Road", "Rock"),
            song(3, "The Beatles", "Abbey Road", "Rock"),
            song(4, "The Beatles", "Revolver", "Rock"),
        ];
        let report = compute_stats(&songs);

        assert_eq!(report.songs_by_artist[0].albums, vec!["Revolver", "Abbey Road"]);
        let albums: Vec<(&str, usize)> = report
            .songs_by_album
            .iter()
            .map(|a| (a.album.as_str(), a.song_count))
            .collect();
        assert_eq!(albums, vec![("Revolver", 2), ("Abbey Road", 2)]);

        let mut reordered = songs.clone();
        reordered.swap(0, 1);
        let report = compute_stats(&reordered);
        assert_eq!(report.songs_by_artist[0].albums, vec!["Abbey Road", "Revolver"]);
        assert_eq!(report.songs_by_album[0].album, "Abbey Road");
    }

    #[test]
    fn test_idempotent() {
        let songs = mixed_catalog();
        let snapshot = songs.clone();

        let first = compute_stats(&songs);
        let second = compute_stats(&songs);

        assert_eq!(first, second);
        assert_eq!(songs, snapshot);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(1, 8), 12.5);
        assert_eq!(percentage(5, 5), 100.0);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = compute_stats(&classic_rock_and_pop());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["overview"]["totalSongs"], 3);
        assert_eq!(json["overview"]["totalGenres"], 2);
        assert_eq!(json["songsByGenre"][0]["genre"], "Rock");
        assert_eq!(json["songsByArtist"][0]["songCount"], 1);
        assert_eq!(json["songsByArtist"][0]["albumCount"], 1);
        assert_eq!(json["songsByAlbum"][0]["songCount"], 1);
        assert_eq!(json["genreDistribution"][1]["percentage"], 33.33);
    }
}
