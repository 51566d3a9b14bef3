//! Per-cache counters and their derived, formatted statistics.

/// Raw counters maintained by a [`super::Cache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheCounters {
    pub load_hits: u64,
    pub load_misses: u64,
    pub store_hits: u64,
    pub store_misses: u64,
    pub compulsory_misses: u64,
    pub evictions: u64,
}

impl CacheCounters {
    pub fn load_count(&self) -> u64 {
        self.load_hits + self.load_misses
    }

    pub fn store_count(&self) -> u64 {
        self.store_hits + self.store_misses
    }

    pub fn load_miss_rate(&self) -> f64 {
        ratio(self.load_misses, self.load_count())
    }

    pub fn store_miss_rate(&self) -> f64 {
        ratio(self.store_misses, self.store_count())
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl std::fmt::Display for CacheCounters {
    /// Renders the §6 stats line: load_hits, load_misses, load_miss_rate,
    /// store_hits, store_misses, store_miss_rate, compulsory_misses, evictions.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "load_hits={} load_misses={} load_miss_rate={:.4} \
             store_hits={} store_misses={} store_miss_rate={:.4} \
             compulsory_misses={} evictions={}",
            self.load_hits,
            self.load_misses,
            self.load_miss_rate(),
            self.store_hits,
            self.store_misses,
            self.store_miss_rate(),
            self.compulsory_misses,
            self.evictions,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_rate_is_zero_with_no_accesses() {
        let c = CacheCounters::default();
        assert_eq!(c.load_miss_rate(), 0.0);
        assert_eq!(c.store_miss_rate(), 0.0);
    }

    #[test]
    fn miss_rate_matches_ratio() {
        let c = CacheCounters {
            load_hits: 1,
            load_misses: 2,
            ..Default::default()
        };
        assert_eq!(c.load_count(), 3);
        assert!((c.load_miss_rate() - (2.0 / 3.0)).abs() < 1e-9);
    }
}
