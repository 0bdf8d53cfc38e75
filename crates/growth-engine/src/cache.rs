//! Shared cache of generated curve sets

use growth_domain::{AgeSampling, CentileCurveSet, MeasurementType, Sex};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Identity of a curve set: who it is for, which lines, which ages
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurveKey {
    sex: Sex,
    measurement_type: MeasurementType,
    percentile_bits: Vec<u64>,
    sampling: AgeSampling,
}

impl CurveKey {
    /// Build a key from normalized percentiles and a resolved sampling
    ///
    /// Callers sort and de-duplicate the percentiles and resolve `Auto`
    /// first so equivalent requests share an entry.
    pub fn new(
        sex: Sex,
        measurement_type: MeasurementType,
        percentiles: &[f64],
        sampling: AgeSampling,
    ) -> Self {
        Self {
            sex,
            measurement_type,
            percentile_bits: percentiles.iter().map(|p| p.to_bits()).collect(),
            sampling,
        }
    }
}

/// Default number of curve sets held before the cache is flushed
pub const MAX_CURVE_SETS: usize = 256;

/// Curve sets keyed by [`CurveKey`]
///
/// Entries are immutable once inserted. Readers share the lock; a miss
/// builds outside the lock and the first insert for a key wins. Inserting a
/// new key into a full cache first drops every entry; sets already handed
/// out stay valid.
#[derive(Debug)]
pub struct CurveCache {
    entries: RwLock<HashMap<CurveKey, Arc<CentileCurveSet>>>,
    capacity: usize,
}

impl Default for CurveCache {
    fn default() -> Self {
        Self::with_capacity(MAX_CURVE_SETS)
    }
}

impl CurveCache {
    /// Create an empty cache holding up to [`MAX_CURVE_SETS`] sets
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache holding up to `capacity` sets (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Maximum number of sets held
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cached set for `key`, building it with `build` on a miss
    pub fn get_or_try_insert<E, F>(
        &self,
        key: CurveKey,
        build: F,
    ) -> Result<Arc<CentileCurveSet>, E>
    where
        F: FnOnce() -> Result<CentileCurveSet, E>,
    {
        let hit = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        if let Some(set) = hit {
            tracing::debug!(
                measurement = %key.measurement_type,
                sex = %key.sex,
                "Curve cache hit"
            );
            return Ok(set);
        }

        tracing::debug!(
            measurement = %key.measurement_type,
            sex = %key.sex,
            "Curve cache miss"
        );
        let built = Arc::new(build()?);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            tracing::debug!(entries = entries.len(), "Curve cache full, flushing");
            entries.clear();
        }
        Ok(Arc::clone(entries.entry(key).or_insert(built)))
    }

    /// Number of cached sets
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached set
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_set() -> CentileCurveSet {
        CentileCurveSet {
            measurement_type: MeasurementType::Weight,
            sex: Sex::Male,
            curves: Vec::new(),
        }
    }

    fn key(percentiles: &[f64]) -> CurveKey {
        CurveKey::new(Sex::Male, MeasurementType::Weight, percentiles, AgeSampling::Step(30))
    }

    #[test]
    fn test_miss_then_hit() {
        let cache = CurveCache::new();
        let mut builds = 0;

        let first = cache
            .get_or_try_insert::<(), _>(key(&[50.0]), || {
                builds += 1;
                Ok(empty_set())
            })
            .unwrap();
        let second = cache
            .get_or_try_insert::<(), _>(key(&[50.0]), || {
                builds += 1;
                Ok(empty_set())
            })
            .unwrap();

        assert_eq!(builds, 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_keys() {
        let cache = CurveCache::new();
        cache.get_or_try_insert::<(), _>(key(&[50.0]), || Ok(empty_set())).unwrap();
        cache.get_or_try_insert::<(), _>(key(&[3.0, 50.0]), || Ok(empty_set())).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_failed_build_is_not_cached() {
        let cache = CurveCache::new();
        let result = cache.get_or_try_insert(key(&[50.0]), || Err("boom"));
        assert_eq!(result.unwrap_err(), "boom");
        assert!(cache.is_empty());
    }

    #[test]
    fn test_full_cache_flushes_before_insert() {
        let cache = CurveCache::with_capacity(2);
        let kept = cache
            .get_or_try_insert::<(), _>(key(&[3.0]), || Ok(empty_set()))
            .unwrap();
        cache.get_or_try_insert::<(), _>(key(&[50.0]), || Ok(empty_set())).unwrap();
        assert_eq!(cache.len(), 2);

        // a hit on a full cache keeps everything
        cache.get_or_try_insert::<(), _>(key(&[3.0]), || Ok(empty_set())).unwrap();
        assert_eq!(cache.len(), 2);

        cache.get_or_try_insert::<(), _>(key(&[97.0]), || Ok(empty_set())).unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(kept.measurement_type, MeasurementType::Weight);
    }

    #[test]
    fn test_default_capacity() {
        assert_eq!(CurveCache::new().capacity(), MAX_CURVE_SETS);
        assert_eq!(CurveCache::with_capacity(0).capacity(), 1);
    }

    #[test]
    fn test_clear() {
        let cache = CurveCache::new();
        cache.get_or_try_insert::<(), _>(key(&[50.0]), || Ok(empty_set())).unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
