//! UUID utilities

use uuid::Uuid;

/// Generate a new song id (UUIDv4, hyphenated lowercase text)
pub fn new_song_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_song_id_is_parseable_v4() {
        let id = new_song_id();
        let parsed = Uuid::parse_str(&id).expect("id should be a UUID");
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(id, parsed.hyphenated().to_string());
    }

    #[test]
    fn test_new_song_id_unique() {
        assert_ne!(new_song_id(), new_song_id());
    }
}
