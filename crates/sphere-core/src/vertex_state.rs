/// Per-vertex freeze state stored as parallel arrays indexed by vertex id.
///
/// Only the proximity freezer writes; only the surface updater reads. The
/// table is sized once with the geometry and never resized.
#[derive(Clone, Debug)]
pub struct VertexStateTable {
    frozen: Vec<bool>,
    frozen_value: Vec<f32>,
}

impl VertexStateTable {
    pub fn new(len: usize) -> Self {
        Self {
            frozen: vec![false; len],
            frozen_value: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.frozen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frozen.is_empty()
    }

    #[inline]
    pub fn is_frozen(&self, index: usize) -> bool {
        self.frozen.get(index).copied().unwrap_or(false)
    }

    /// Cached noise sample while frozen.
    #[inline]
    pub fn frozen_value(&self, index: usize) -> Option<f32> {
        if self.is_frozen(index) {
            self.frozen_value.get(index).copied()
        } else {
            None
        }
    }

    /// Freeze `index` with the value produced by `sample`, unless already
    /// frozen. `sample` runs only on the transition. Returns whether the
    /// vertex transitioned.
    #[inline]
    pub fn freeze_with(&mut self, index: usize, sample: impl FnOnce() -> f32) -> bool {
        match self.frozen.get_mut(index) {
            Some(f) if !*f => {
                *f = true;
                self.frozen_value[index] = sample();
                true
            }
            _ => false,
        }
    }

    /// Unconditional; returns whether the vertex was frozen before.
    #[inline]
    pub fn unfreeze(&mut self, index: usize) -> bool {
        match self.frozen.get_mut(index) {
            Some(f) => std::mem::replace(f, false),
            None => false,
        }
    }

    pub fn frozen_count(&self) -> usize {
        self.frozen.iter().filter(|f| **f).count()
    }
}
