//! Fleet destruction checks.

use crate::config::FLEET_SIZE;

/// True once `destroyed_ships` covers the whole fleet.
pub fn is_fleet_destroyed(destroyed_ships: usize) -> bool {
    destroyed_ships == FLEET_SIZE
}

/// Store-backed form: counts `owner`'s destroyed ships in `game`.
#[cfg(feature = "std")]
pub async fn fleet_destroyed<S>(
    store: &S,
    game: crate::domain::GameId,
    owner: crate::ship::Owner,
) -> Result<bool, crate::common::StoreError>
where
    S: crate::store::Store + ?Sized,
{
    let destroyed = store.count_destroyed_ships(game, owner).await?;
    Ok(is_fleet_destroyed(destroyed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_full_fleet_counts() {
        assert!(!is_fleet_destroyed(0));
        assert!(!is_fleet_destroyed(2));
        assert!(is_fleet_destroyed(3));
    }
}
