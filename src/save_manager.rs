use crate::core::constants::SAVE_VERSION_MAGIC;
use crate::core::game_state::GameState;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Manages saving and loading game state with checksummed binary format
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a new SaveManager instance
    ///
    /// Sets up the save directory at the appropriate location for the platform
    /// using the `directories` crate.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "rootbrawl").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine config directory")
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        let save_path = config_dir.join("save.dat");

        Ok(Self { save_path })
    }

    /// Creates a SaveManager writing to an explicit path.
    pub fn with_path(save_path: PathBuf) -> Self {
        Self { save_path }
    }

    /// Saves the game state to disk with checksum verification
    ///
    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - Serialized game state (variable length)
    /// - SHA256 checksum (32 bytes)
    pub fn save(&self, state: &GameState) -> io::Result<()> {
        let data = bincode::serialize(state)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let data_len = data.len() as u32;

        // Checksum covers version + length + data.
        let mut hasher = Sha256::new();
        hasher.update(&SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(&data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;

        Ok(())
    }

    /// Loads the game state from disk with checksum verification
    ///
    /// Returns an error if:
    /// - The file doesn't exist
    /// - The version magic is incorrect
    /// - The checksum verification fails
    /// - The data cannot be deserialized
    pub fn load(&self) -> io::Result<GameState> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);

        if version != SAVE_VERSION_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
                    SAVE_VERSION_MAGIC, version
                ),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(&version_bytes);
        hasher.update(&length_bytes);
        hasher.update(&data);
        let computed_checksum = hasher.finalize();

        if stored_checksum != computed_checksum.as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        let state = bincode::deserialize(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(state)
    }

    /// Checks if a save file exists
    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }
}

/// Serializes the plain record for sharing between devices.
pub fn export_json(state: &GameState) -> io::Result<String> {
    serde_json::to_string_pretty(state).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Replaces the current state with an imported record.
///
/// The payload is structurally validated first: `coins` must be numeric and
/// `collection` must be an array. Any failure rejects the import without
/// touching the current state.
pub fn import_json(state: &mut GameState, json: &str) -> io::Result<()> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if !value.get("coins").map(|c| c.is_u64()).unwrap_or(false) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "import rejected: coins is missing or not numeric",
        ));
    }
    if !value
        .get("collection")
        .map(|c| c.is_array())
        .unwrap_or(false)
    {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "import rejected: collection is missing or not an array",
        ));
    }

    let imported: GameState = serde_json::from_value(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    *state = imported;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::add_copy;
    use std::env;

    fn temp_manager(tag: &str) -> SaveManager {
        let path = env::temp_dir().join(format!("rootbrawl-save-test-{}.dat", tag));
        let _ = fs::remove_file(&path);
        SaveManager::with_path(path)
    }

    fn sample_state() -> GameState {
        let mut state = GameState::new("Tester".to_string(), 1234567890);
        state.coins = 4321;
        add_copy(&mut state.collection, 1);
        add_copy(&mut state.collection, 12);
        state.selected_creature_id = Some(12);
        state.battle_rank_points = 275;
        state.royale_rank_points = 80;
        state
    }

    #[test]
    fn test_save_and_load() {
        let manager = temp_manager("roundtrip");
        let original_state = sample_state();

        manager.save(&original_state).expect("Failed to save game state");
        assert!(manager.save_exists());

        let loaded_state = manager.load().expect("Failed to load game state");

        assert_eq!(loaded_state.coins, original_state.coins);
        assert_eq!(loaded_state.collection.len(), original_state.collection.len());
        assert_eq!(loaded_state.selected_creature_id, Some(12));
        assert_eq!(loaded_state.battle_rank_points, 275);
        assert_eq!(loaded_state.royale_rank_points, 80);
        assert_eq!(loaded_state.player_name, original_state.player_name);

        fs::remove_file(&manager.save_path).expect("Failed to remove save file");
    }

    #[test]
    fn test_load_nonexistent() {
        let manager = temp_manager("missing");
        let result = manager.load();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_corrupted_save_fails_checksum() {
        let manager = temp_manager("corrupt");
        manager.save(&sample_state()).expect("Failed to save");

        let mut bytes = fs::read(&manager.save_path).expect("read save");
        let mid = bytes.len() / 2;
        bytes[mid] ^= 0xFF;
        fs::write(&manager.save_path, &bytes).expect("write save");

        let result = manager.load();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidData);

        fs::remove_file(&manager.save_path).expect("Failed to remove save file");
    }

    #[test]
    fn test_export_import_roundtrip() {
        let original = sample_state();
        let json = export_json(&original).expect("export");

        let mut target = GameState::new("Someone".to_string(), 0);
        import_json(&mut target, &json).expect("import");

        assert_eq!(target.coins, original.coins);
        assert_eq!(target.collection.len(), 2);
        assert_eq!(target.player_name, "Tester");
    }

    #[test]
    fn test_import_rejects_non_numeric_coins() {
        let mut state = sample_state();
        let coins_before = state.coins;

        let bad = r#"{"coins": "lots", "collection": []}"#;
        assert!(import_json(&mut state, bad).is_err());
        assert_eq!(state.coins, coins_before);
        assert_eq!(state.collection.len(), 2);
    }

    #[test]
    fn test_import_rejects_non_array_collection() {
        let mut state = sample_state();
        let bad = r#"{"coins": 10, "collection": {"definition_id": 1}}"#;
        assert!(import_json(&mut state, bad).is_err());
        assert_eq!(state.coins, 4321);
    }

    #[test]
    fn test_import_rejects_garbage_without_mutation() {
        let mut state = sample_state();
        assert!(import_json(&mut state, "not json at all").is_err());
        assert_eq!(state.coins, 4321);
    }
}
