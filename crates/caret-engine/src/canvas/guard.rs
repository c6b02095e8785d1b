use core::ops::{Deref, DerefMut};

use super::Canvas;

/// Scoped canvas state.
///
/// Calls `save` on creation and the matching `restore` when dropped, so the pair
/// stays balanced on every exit path, unwinding included.
pub struct SaveGuard<'a> {
    canvas: &'a mut dyn Canvas,
}

impl<'a> SaveGuard<'a> {
    pub fn new(canvas: &'a mut dyn Canvas) -> Self {
        canvas.save();
        Self { canvas }
    }
}

impl<'a> Deref for SaveGuard<'a> {
    type Target = dyn Canvas + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.canvas
    }
}

impl<'a> DerefMut for SaveGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.canvas
    }
}

impl Drop for SaveGuard<'_> {
    fn drop(&mut self) {
        self.canvas.restore();
    }
}
