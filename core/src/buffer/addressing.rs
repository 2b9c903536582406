/// Where index `0` points for indexed access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// Index `0` is the bottom border.
    #[default]
    Bottom,
    /// Index `0` is the first byte of the backing block.
    Block,
}

/// Which positions indexed access may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// Only positions inside `[bottom, top]`.
    #[default]
    Window,
    /// Any position inside the backing block.
    Block,
}

/// Addressing mode for [`RingStore::value_at`](super::RingStore::value_at)
/// and [`RingStore::set_value_at`](super::RingStore::set_value_at).
///
/// The default is border-relative and window-restricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Addressing {
    pub origin: Origin,
    pub scope: Scope,
}

impl Addressing {
    /// Border-relative, window-restricted.
    pub const WINDOW: Self = Self {
        origin: Origin::Bottom,
        scope: Scope::Window,
    };

    /// Absolute position, anywhere in the backing block.
    pub const BLOCK: Self = Self {
        origin: Origin::Block,
        scope: Scope::Block,
    };

    pub fn new(origin: Origin, scope: Scope) -> Self {
        Self { origin, scope }
    }

    /// Map `index` to a block position, or `None` if this mode forbids it.
    pub(super) fn resolve(
        self,
        index: usize,
        capacity: usize,
        bottom: usize,
        top: usize,
    ) -> Option<usize> {
        let pos = match self.origin {
            Origin::Bottom => index.checked_add(bottom)?,
            Origin::Block => index,
        };

        if pos >= capacity {
            return None;
        }
        if self.scope == Scope::Window && (pos < bottom || pos > top) {
            return None;
        }
        Some(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_window() {
        assert_eq!(Addressing::default(), Addressing::WINDOW);
    }

    #[test]
    fn bottom_origin_adds_border() {
        assert_eq!(Addressing::WINDOW.resolve(2, 16, 4, 10), Some(6));
    }

    #[test]
    fn window_scope_rejects_outside_borders() {
        // 7 + 4 = 11 > top
        assert_eq!(Addressing::WINDOW.resolve(7, 16, 4, 10), None);
        let absolute_window = Addressing::new(Origin::Block, Scope::Window);
        assert_eq!(absolute_window.resolve(3, 16, 4, 10), None);
        assert_eq!(absolute_window.resolve(4, 16, 4, 10), Some(4));
    }

    #[test]
    fn block_scope_allows_outside_borders() {
        assert_eq!(Addressing::BLOCK.resolve(0, 16, 4, 10), Some(0));
        assert_eq!(Addressing::BLOCK.resolve(15, 16, 4, 10), Some(15));
        let relative_block = Addressing::new(Origin::Bottom, Scope::Block);
        assert_eq!(relative_block.resolve(11, 16, 4, 10), Some(15));
    }

    #[test]
    fn past_capacity_is_always_rejected() {
        assert_eq!(Addressing::BLOCK.resolve(16, 16, 0, 15), None);
        assert_eq!(Addressing::WINDOW.resolve(usize::MAX, 16, 1, 15), None);
    }
}
