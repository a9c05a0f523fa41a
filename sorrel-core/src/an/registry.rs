// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use std::collections::HashMap;

use crate::an::record::Category;
use crate::error::SorrelError;
use crate::im::{Color, is_background};

/// First-seen-order bijection between color keys and category ids
///
/// The registry assigns each distinct color a stable integer id across a
/// whole batch run, starting at 1. Ids are never reassigned or reused
/// within a run and the background sentinel is rejected. A fresh registry
/// is constructed per batch and threaded by reference through the
/// per-image conversion step.
///
/// # Examples
///
/// ```
/// use sorrel_core::an::ColorRegistry;
///
/// let mut registry = ColorRegistry::new();
///
/// assert_eq!(registry.lookup_or_create([1, 2, 3]).unwrap(), 1);
/// assert_eq!(registry.lookup_or_create([4, 5, 6]).unwrap(), 2);
/// assert_eq!(registry.lookup_or_create([1, 2, 3]).unwrap(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ColorRegistry {
    ids: HashMap<Color, u32>,
    order: Vec<Color>,
}

impl ColorRegistry {
    /// Initialize an empty registry for a new batch run
    pub fn new() -> ColorRegistry {
        ColorRegistry {
            ids: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Return the id for a color, assigning the next id on first sight
    ///
    /// Callers are expected to query once per distinct color per image
    /// and reuse the returned id for the pixel pass.
    pub fn lookup_or_create(&mut self, color: Color) -> Result<u32, SorrelError> {
        if is_background(&color) {
            return Err(SorrelError::BackgroundColorError);
        }

        if let Some(&id) = self.ids.get(&color) {
            return Ok(id);
        }

        let id = self.order.len() as u32 + 1;
        self.ids.insert(color, id);
        self.order.push(color);

        Ok(id)
    }

    /// Return the number of registered categories
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check whether any color has been registered
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Return category records in creation order
    ///
    /// Only meaningful after the full batch has been scanned as ids are
    /// stable once every image has contributed its colors.
    pub fn categories(&self) -> Vec<Category> {
        self.order
            .iter()
            .enumerate()
            .map(|(idx, color)| Category::new(idx as u32 + 1, color))
            .collect()
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_first_seen_order() {
        let mut registry = ColorRegistry::new();

        assert_eq!(registry.lookup_or_create([9, 9, 9]).unwrap(), 1);
        assert_eq!(registry.lookup_or_create([1, 1, 1]).unwrap(), 2);
        assert_eq!(registry.lookup_or_create([5, 5, 5]).unwrap(), 3);
    }

    #[test]
    fn test_ids_stable_across_images() {
        let mut registry = ColorRegistry::new();

        // image A
        assert_eq!(registry.lookup_or_create([1, 2, 3]).unwrap(), 1);

        // image B
        assert_eq!(registry.lookup_or_create([1, 2, 3]).unwrap(), 1);
        assert_eq!(registry.lookup_or_create([4, 5, 6]).unwrap(), 2);
    }

    #[test]
    fn test_bijection() {
        let mut registry = ColorRegistry::new();

        let colors: Vec<[u8; 3]> = (1..=50).map(|v| [v, 0, v]).collect();

        let first: Vec<u32> = colors
            .iter()
            .map(|&c| registry.lookup_or_create(c).unwrap())
            .collect();

        let second: Vec<u32> = colors
            .iter()
            .map(|&c| registry.lookup_or_create(c).unwrap())
            .collect();

        assert_eq!(first, second);

        let mut sorted = first.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), colors.len());
    }

    #[test]
    fn test_background_rejected() {
        let mut registry = ColorRegistry::new();

        assert!(registry.lookup_or_create([0, 0, 0]).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_categories() {
        let mut registry = ColorRegistry::new();
        registry.lookup_or_create([1, 2, 3]).unwrap();
        registry.lookup_or_create([4, 5, 6]).unwrap();

        let categories = registry.categories();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "class1");
        assert_eq!(categories[0].color, "#030201");
        assert_eq!(categories[0].idx, 1);
        assert!(!categories[0].instance);
        assert!(categories[0].properties.is_empty());
        assert_eq!(categories[1].name, "class2");
        assert_eq!(categories[1].idx, 2);
    }

    #[test]
    fn test_indices_contiguous() {
        let mut registry = ColorRegistry::new();

        for v in 1..=20u8 {
            registry.lookup_or_create([v, v, 0]).unwrap();
        }

        let indices: Vec<u32> = registry.categories().iter().map(|c| c.idx).collect();
        assert_eq!(indices, (1..=20).collect::<Vec<u32>>());
    }
}
