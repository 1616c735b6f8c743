use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use wheel_shared::constants::{PRIZE_POOL_STORAGE_KEY, WHEEL_CONFIG_STORAGE_KEY};
use wheel_shared::{PrizePool, WheelConfig};

/// Wheel tunables from local storage, or the built-in defaults.
pub fn load_wheel_config() -> WheelConfig {
    match LocalStorage::get::<WheelConfig>(WHEEL_CONFIG_STORAGE_KEY) {
        Ok(config) => config.checked().unwrap_or_else(|e| {
            log::warn!("Stored wheel config rejected, using defaults: {}", e);
            WheelConfig::default()
        }),
        Err(StorageError::KeyNotFound(_)) => WheelConfig::default(),
        Err(e) => {
            log::warn!("Could not read wheel config, using defaults: {}", e);
            WheelConfig::default()
        }
    }
}

/// The last committed prize pool, or the seed pool on first run.
pub fn load_prize_pool() -> PrizePool {
    match LocalStorage::get::<PrizePool>(PRIZE_POOL_STORAGE_KEY) {
        Ok(pool) => pool,
        Err(StorageError::KeyNotFound(_)) => PrizePool::default_seed(),
        Err(e) => {
            log::warn!("Stored prize pool rejected, using the seed pool: {}", e);
            PrizePool::default_seed()
        }
    }
}

pub fn save_prize_pool(pool: &PrizePool) {
    if let Err(e) = LocalStorage::set(PRIZE_POOL_STORAGE_KEY, pool) {
        log::error!("Failed to persist prize pool: {}", e);
    }
}
