//! Explicit per-material uniform storage with dirty tracking.
//!
//! A [`UniformSet`] wraps one `#[repr(C)]` struct of named uniform fields. Writes go
//! through [`UniformSet::set`] or [`UniformSet::modify`], which mark the set dirty; the
//! render layer calls [`UniformSet::take_dirty`] once per frame and uploads only what
//! changed.

#[derive(Clone, Debug)]
pub struct UniformSet<U: bytemuck::Pod> {
    value: U,
    dirty: bool,
}

impl<U: bytemuck::Pod> UniformSet<U> {
    /// A fresh set starts dirty so that the first frame uploads it.
    pub fn new(value: U) -> Self {
        Self { value, dirty: true }
    }

    pub fn get(&self) -> &U {
        &self.value
    }

    pub fn set(&mut self, value: U) {
        self.value = value;
        self.dirty = true;
    }

    pub fn modify(&mut self, mutation: impl FnOnce(&mut U)) {
        mutation(&mut self.value);
        self.dirty = true;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the bytes to upload if anything changed since the last call.
    pub fn take_dirty(&mut self) -> Option<&[u8]> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(bytemuck::bytes_of(&self.value))
    }
}
