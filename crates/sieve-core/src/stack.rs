//! # Sieve Stack
//!
//! The ordered test apparatus: screens sorted from coarsest to finest,
//! always closed by exactly one pan, plus the sample they are run against.
//!
//! ## Invariants
//!
//! - `entries` is never empty and its last element is the only pan
//! - mesh sizes are strictly descending, without duplicates
//! - sizes are immutable once inserted; only masses change
//!
//! The backing sequence is private. Callers go through [`SieveStack::add`],
//! [`SieveStack::remove`] and [`SieveStack::set_retained`], and inspect the
//! stack through read-only accessors.

use crate::sieve::Sieve;
use crate::{Sample, SieveError, SieveSize, SizeToken, UnitsSystem};

/// An ordered collection of sieves terminated by a pan.
#[derive(Debug, Clone, PartialEq)]
pub struct SieveStack {
    entries: Vec<Sieve>,
    units: UnitsSystem,
    sample: Sample,
}

impl SieveStack {
    /// Build a stack from a list of screen sizes.
    ///
    /// Tokens that are not positive finite numbers are dropped, as are
    /// repeated sizes. The pan is always synthesized and never taken from
    /// the input. An empty or fully invalid list yields a pan-only stack.
    pub fn new<I, T>(sizes: I, units: UnitsSystem, sample: Option<Sample>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SizeToken>,
    {
        let mut sizes: Vec<SieveSize> = sizes
            .into_iter()
            .filter_map(|token| token.into().screen_size())
            .collect();
        sizes.sort_by(SieveSize::stack_order);
        sizes.dedup();

        let mut entries: Vec<Sieve> = sizes
            .into_iter()
            .filter_map(|size| Sieve::new(size, units).ok())
            .collect();
        entries.push(Sieve::pan(units));

        Self {
            entries,
            units,
            sample: sample.unwrap_or_default(),
        }
    }

    /// Assemble a stack from parts that were already checked by the caller.
    pub(crate) fn from_parts(entries: Vec<Sieve>, units: UnitsSystem, sample: Sample) -> Self {
        Self {
            entries,
            units,
            sample,
        }
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// Position of the sieve of the given size, `None` if absent.
    pub fn index_of(&self, size: impl Into<SieveSize>) -> Result<Option<usize>, SieveError> {
        if self.entries.is_empty() {
            return Err(SieveError::EmptyStack);
        }
        let size = size.into();
        Ok(self.entries.iter().position(|sieve| sieve.size() == size))
    }

    /// The sieve of the given size, if present.
    pub fn sieve_at(&self, size: impl Into<SieveSize>) -> Option<&Sieve> {
        let size = size.into();
        self.entries.iter().find(|sieve| sieve.size() == size)
    }

    /// Whether a sieve of the given size is in the stack.
    pub fn contains(&self, size: impl Into<SieveSize>) -> bool {
        self.sieve_at(size).is_some()
    }

    // =========================================================================
    // MUTATION
    // =========================================================================

    /// Insert an empty sieve of `size` at its sorted position.
    ///
    /// The new sieve takes the stack's unit system. A size already present,
    /// including the pan, is rejected with `DuplicateSize`.
    pub fn add(&mut self, size: impl Into<SieveSize>) -> Result<(), SieveError> {
        let sieve = Sieve::new(size.into(), self.units)?;
        if self.contains(sieve.size()) {
            return Err(SieveError::DuplicateSize(sieve.size().to_string()));
        }

        let position = self
            .entries
            .iter()
            .position(|existing| existing.is_pan() || sieve.size() > existing.size())
            .unwrap_or(self.entries.len());
        self.entries.insert(position, sieve);
        Ok(())
    }

    /// Remove the sieve of `size` and return it.
    pub fn remove(&mut self, size: impl Into<SieveSize>) -> Result<Sieve, SieveError> {
        let size = size.into();
        if size.is_pan() {
            return Err(SieveError::ProtectedEntry);
        }
        let position = self
            .index_of(size)?
            .ok_or_else(|| SieveError::NotFound(size.to_string()))?;
        Ok(self.entries.remove(position))
    }

    /// Record the mass retained on the sieve of `size` and return the stored mass.
    ///
    /// Follows [`Sieve::retained`]: an unusable mass leaves the sieve unchanged.
    pub fn set_retained(
        &mut self,
        size: impl Into<SieveSize>,
        mass: f64,
    ) -> Result<f64, SieveError> {
        let size = size.into();
        self.entries
            .iter_mut()
            .find(|sieve| sieve.size() == size)
            .map(|sieve| sieve.retained(Some(mass)))
            .ok_or_else(|| SieveError::NotFound(size.to_string()))
    }

    /// Replace the sample wholesale.
    pub fn set_sample(&mut self, sample: Sample) {
        self.sample = sample;
    }

    // =========================================================================
    // INSPECTION
    // =========================================================================

    /// Read-only view of the entries, coarsest first, pan last.
    pub fn entries(&self) -> &[Sieve] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sieve> {
        self.entries.iter()
    }

    /// Sizes in stack order.
    pub fn sizes(&self) -> Vec<SieveSize> {
        self.entries.iter().map(Sieve::size).collect()
    }

    /// The terminal pan.
    pub fn pan(&self) -> Option<&Sieve> {
        self.entries.last().filter(|sieve| sieve.is_pan())
    }

    /// Number of entries, pan included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn units(&self) -> UnitsSystem {
        self.units
    }

    pub const fn sample(&self) -> &Sample {
        &self.sample
    }

    /// Sum of the masses on every entry, pan included.
    pub fn total_retained(&self) -> f64 {
        self.entries.iter().map(Sieve::mass).sum()
    }
}

impl<'a> IntoIterator for &'a SieveStack {
    type Item = &'a Sieve;
    type IntoIter = std::slice::Iter<'a, Sieve>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(sizes: &[f64]) -> SieveStack {
        SieveStack::new(sizes.iter().copied(), UnitsSystem::Metric, None)
    }

    #[test]
    fn construction_sorts_and_appends_pan() {
        let stack = metric(&[10.0, 0.08, 20.0]);
        assert_eq!(
            stack.sizes(),
            vec![
                SieveSize::Mesh(20.0),
                SieveSize::Mesh(10.0),
                SieveSize::Mesh(0.08),
                SieveSize::Pan
            ]
        );
        assert!(stack.pan().is_some());
    }

    #[test]
    fn construction_drops_labels_and_invalid_numbers() {
        let tokens: Vec<SizeToken> = vec![
            "Pan".into(),
            "Pan".into(),
            20.0.into(),
            "Pan".into(),
            (-4.0).into(),
            f64::NAN.into(),
            0.0.into(),
        ];
        let stack = SieveStack::new(tokens, UnitsSystem::Metric, None);
        assert_eq!(stack.sizes(), vec![SieveSize::Mesh(20.0), SieveSize::Pan]);
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn construction_collapses_duplicates() {
        let stack = metric(&[5.0, 10.0, 5.0]);
        assert_eq!(
            stack.sizes(),
            vec![SieveSize::Mesh(10.0), SieveSize::Mesh(5.0), SieveSize::Pan]
        );
    }

    #[test]
    fn empty_input_yields_pan_only() {
        let stack = metric(&[]);
        assert_eq!(stack.sizes(), vec![SieveSize::Pan]);
        assert_eq!(stack.sample(), &Sample::default());
    }

    #[test]
    fn every_sieve_takes_stack_units() {
        let mut stack = SieveStack::new([0.75, 0.375], UnitsSystem::Imperial, None);
        stack.add(0.5).expect("add");
        assert!(stack.iter().all(|s| s.units() == UnitsSystem::Imperial));
    }

    #[test]
    fn index_of_finds_positions() {
        let stack = metric(&[20.0, 16.0, 12.0, 0.08]);
        assert_eq!(stack.index_of(20.0).expect("index"), Some(0));
        assert_eq!(stack.index_of(12.0).expect("index"), Some(2));
        assert_eq!(stack.index_of(0.08).expect("index"), Some(3));
        assert_eq!(stack.index_of(SieveSize::Pan).expect("index"), Some(4));
        assert_eq!(stack.index_of(2.5).expect("index"), None);
    }

    #[test]
    fn index_of_detects_corrupted_stack() {
        let mut stack = metric(&[20.0]);
        stack.entries.clear();
        assert_eq!(stack.index_of(20.0), Err(SieveError::EmptyStack));
    }

    #[test]
    fn add_places_sieve_in_order() {
        let mut stack = metric(&[20.0, 12.0]);
        stack.add(16.0).expect("add");
        stack.add(0.08).expect("add");
        assert_eq!(
            stack.sizes(),
            vec![
                SieveSize::Mesh(20.0),
                SieveSize::Mesh(16.0),
                SieveSize::Mesh(12.0),
                SieveSize::Mesh(0.08),
                SieveSize::Pan
            ]
        );
    }

    #[test]
    fn add_grows_stack_by_one() {
        let sizes = [20.0, 16.0, 12.0, 5.0, 0.08];
        let mut stack = metric(&sizes);
        stack.add(2.5).expect("add");
        assert_eq!(stack.len(), sizes.len() + 2);
    }

    #[test]
    fn add_on_top_and_into_pan_only_stack() {
        let mut stack = metric(&[]);
        stack.add(2.0).expect("add");
        stack.add(50.0).expect("add");
        assert_eq!(
            stack.sizes(),
            vec![SieveSize::Mesh(50.0), SieveSize::Mesh(2.0), SieveSize::Pan]
        );
    }

    #[test]
    fn add_rejects_invalid_size_without_touching_entries() {
        let mut stack = metric(&[20.0, 10.0]);
        let before = stack.clone();
        assert!(matches!(stack.add(-1.0), Err(SieveError::InvalidSize(_))));
        assert!(matches!(stack.add(f64::NAN), Err(SieveError::InvalidSize(_))));
        assert_eq!(stack, before);
    }

    #[test]
    fn add_rejects_duplicates_and_second_pan() {
        let mut stack = metric(&[20.0, 10.0]);
        assert_eq!(
            stack.add(10.0),
            Err(SieveError::DuplicateSize("10".to_string()))
        );
        assert_eq!(
            stack.add(SieveSize::Pan),
            Err(SieveError::DuplicateSize("Pan".to_string()))
        );
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn remove_closes_the_gap() {
        let sizes = [20.0, 16.0, 12.0, 5.0];
        let mut stack = metric(&sizes);
        let removed = stack.remove(16.0).expect("remove");
        assert_eq!(removed.size(), SieveSize::Mesh(16.0));
        assert_eq!(stack.index_of(12.0).expect("index"), Some(1));
        assert_eq!(stack.len(), sizes.len());
    }

    #[test]
    fn remove_missing_size_fails() {
        let mut stack = metric(&[20.0, 16.0, 12.0, 5.0]);
        let before = stack.clone();
        assert_eq!(
            stack.remove(2.5),
            Err(SieveError::NotFound("2.5".to_string()))
        );
        assert_eq!(stack, before);

        stack.remove(5.0).expect("remove");
        let before = stack.clone();
        assert!(matches!(stack.remove(5.0), Err(SieveError::NotFound(_))));
        assert_eq!(stack, before);
    }

    #[test]
    fn pan_cannot_be_removed() {
        let mut stack = metric(&[20.0]);
        stack.set_retained(SieveSize::Pan, 30.0).expect("retain");
        let before = stack.clone();
        assert_eq!(
            stack.remove(SieveSize::Pan),
            Err(SieveError::ProtectedEntry)
        );
        assert_eq!(stack, before);
        assert_eq!(stack.pan().map(Sieve::mass), Some(30.0));
    }

    #[test]
    fn sieve_at_returns_matching_sieve() {
        let stack = metric(&[20.0, 16.0, 12.0, 5.0]);
        let sieve = stack.sieve_at(16.0).expect("sieve");
        assert_eq!(sieve.size(), SieveSize::Mesh(16.0));
        assert!(stack.sieve_at(3.0).is_none());
    }

    #[test]
    fn set_retained_updates_one_sieve() {
        let mut stack = metric(&[20.0, 10.0]);
        assert_eq!(stack.set_retained(10.0, 120.5).expect("retain"), 120.5);
        assert_eq!(stack.set_retained(SieveSize::Pan, 30.0).expect("retain"), 30.0);
        assert_eq!(stack.sieve_at(10.0).map(Sieve::mass), Some(120.5));
        assert_eq!(stack.sieve_at(20.0).map(Sieve::mass), Some(0.0));
        assert_eq!(stack.total_retained(), 150.5);
        assert!(matches!(
            stack.set_retained(4.0, 1.0),
            Err(SieveError::NotFound(_))
        ));
    }

    #[test]
    fn sample_is_replaced_wholesale() {
        let mut stack = metric(&[20.0]);
        stack.set_sample(Sample::with_dry_mass(1500.0));
        assert_eq!(stack.sample().dry_mass, 1500.0);
        assert_eq!(stack.sample().wet_mass, None);
    }
}
