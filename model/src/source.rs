use rand::Rng;

use crate::reading::Reading;

pub type ReadingSourcePointer = Box<dyn ReadingSource>;

/// Provides the readings shown by the twin.
pub trait ReadingSource {
    /// Produces the next reading.
    fn next_reading(&mut self) -> Reading;
}

/// Draws readings uniformly from `Reading::MIN..=Reading::MAX`.
pub struct RandomReadingSource<R = rand::rngs::ThreadRng> {
    rng: R,
}

impl RandomReadingSource {
    /// A source backed by the thread-local generator.
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RandomReadingSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomReadingSource<rand::rngs::StdRng> {
    /// A reproducible source, for demos and tests.
    pub fn seeded(seed: u64) -> Self {
        use rand::SeedableRng;

        Self {
            rng: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> ReadingSource for RandomReadingSource<R> {
    fn next_reading(&mut self) -> Reading {
        let celsius = self.rng.random_range(Reading::MIN..=Reading::MAX);

        // The range above is exactly the valid range.
        Reading::new(celsius).unwrap_or_else(|| unreachable!("{celsius} out of range"))
    }
}

#[test]
fn test_random_readings_stay_in_range() {
    let mut source = RandomReadingSource::new();

    for _ in 0..10_000 {
        let celsius = source.next_reading().celsius();
        assert!((Reading::MIN..=Reading::MAX).contains(&celsius));
    }
}

#[test]
fn test_random_readings_cover_range() {
    let mut source = RandomReadingSource::seeded(7);
    let mut seen = [false; (Reading::MAX - Reading::MIN + 1) as usize];

    for _ in 0..10_000 {
        seen[(source.next_reading().celsius() - Reading::MIN) as usize] = true;
    }

    assert!(seen.iter().all(|hit| *hit), "not every temperature was drawn");
}

#[test]
fn test_seeded_source_is_reproducible() {
    let mut a = RandomReadingSource::seeded(42);
    let mut b = RandomReadingSource::seeded(42);

    for _ in 0..100 {
        assert_eq!(a.next_reading(), b.next_reading());
    }
}
