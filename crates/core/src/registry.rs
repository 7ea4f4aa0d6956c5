//! Territory registry: the fixed-size, authoritative map state.

use serde::Serialize;

use crate::{
    error::{GameError, GameResult},
    models::Territory,
};

/// Fixed set of territories for one game.
///
/// Territories are never added or removed after construction; only their
/// owner and troop fields change.
#[derive(Debug, Clone, Serialize)]
pub struct Registry {
    territories: Vec<Territory>,
}

impl Registry {
    /// Allocate `count` placeholder slots for the setup step to fill.
    pub fn create(count: usize) -> GameResult<Self> {
        if count == 0 {
            return Err(GameError::InvalidArgument(
                "territory count must be positive".to_string(),
            ));
        }
        let mut territories = Vec::new();
        territories
            .try_reserve_exact(count)
            .map_err(|_| GameError::AllocationError { requested: count })?;
        territories.resize_with(count, Territory::placeholder);
        Ok(Self { territories })
    }

    /// Build a registry from fully configured territories.
    pub fn from_territories(territories: Vec<Territory>) -> GameResult<Self> {
        if territories.is_empty() {
            return Err(GameError::InvalidArgument(
                "a map needs at least one territory".to_string(),
            ));
        }
        Ok(Self { territories })
    }

    /// Total number of territories.
    pub fn count(&self) -> usize {
        self.territories.len()
    }

    /// Exclusive access to one territory.
    pub fn get(&mut self, index: usize) -> GameResult<&mut Territory> {
        let count = self.count();
        self.territories
            .get_mut(index)
            .ok_or(GameError::OutOfRange { index, count })
    }

    /// Shared access to one territory.
    pub fn territory(&self, index: usize) -> GameResult<&Territory> {
        self.territories.get(index).ok_or(GameError::OutOfRange {
            index,
            count: self.count(),
        })
    }

    /// Two distinct territories borrowed mutably at once.
    pub(crate) fn pair_mut(
        &mut self,
        first: usize,
        second: usize,
    ) -> GameResult<(&mut Territory, &mut Territory)> {
        if first == second {
            return Err(GameError::SelfAttack);
        }
        let count = self.count();
        for index in [first, second] {
            if index >= count {
                return Err(GameError::OutOfRange { index, count });
            }
        }
        if first < second {
            let (head, tail) = self.territories.split_at_mut(second);
            Ok((&mut head[first], &mut tail[0]))
        } else {
            let (head, tail) = self.territories.split_at_mut(first);
            Ok((&mut tail[0], &mut head[second]))
        }
    }

    /// Iterate over all territories in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Territory> {
        self.territories.iter()
    }

    /// Territories currently held by `color`.
    pub fn owned_by<'a>(&'a self, color: &'a str) -> impl Iterator<Item = &'a Territory> + 'a {
        self.territories
            .iter()
            .filter(move |territory| territory.is_owned_by(color))
    }

    /// Sum of troops over the territories held by `color`.
    pub fn troops_of(&self, color: &str) -> u64 {
        self.owned_by(color)
            .map(|territory| u64::from(territory.troops()))
            .sum()
    }
}
