use crate::figure::Figure;
use rand::Rng;

/// Unbiased in-place Fisher–Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// The order figures are shown in during one session. Fixed at creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FigureSequence {
    figures: Vec<Figure>,
}

impl FigureSequence {
    pub fn shuffled<R: Rng + ?Sized>(source: &[Figure], rng: &mut R) -> Self {
        let mut figures = source.to_vec();
        shuffle(&mut figures, rng);
        Self { figures }
    }

    /// Keep the given order, for scripted runs
    pub fn ordered(figures: Vec<Figure>) -> Self {
        Self { figures }
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Figure> {
        self.figures.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Figure> {
        self.figures.iter()
    }
}
