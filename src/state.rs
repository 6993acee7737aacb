bitflags::bitflags! {
    /// The per splat edit state.
    ///
    /// The bits are mutually exclusive by convention only, any combination may be stored and
    /// every query below must tolerate it.
    #[repr(transparent)]
    #[derive(
        Debug, Default, Clone, Copy, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable,
    )]
    pub struct SplatState: u8 {
        /// The splat is selected.
        const SELECT = 1 << 0;
        /// The splat is hidden, also known as locked.
        const HIDE = 1 << 1;
        /// The splat is deleted.
        const DELETE = 1 << 2;
        /// The splat has been painted.
        const PAINT = 1 << 3;
    }
}

impl SplatState {
    /// The state of an untouched splat.
    pub const NORMAL: Self = Self::empty();

    /// The bits that decide how a splat takes part in editing, PAINT is not one of them.
    const EDIT_BITS: u8 = Self::SELECT.bits() | Self::HIDE.bits() | Self::DELETE.bits();

    /// Whether the splat is neither selected, hidden nor deleted. It may be painted.
    pub const fn is_normal(self) -> bool {
        self.bits() & Self::EDIT_BITS == 0
    }

    /// Whether the splat is selected and neither hidden nor deleted. It may be painted.
    pub const fn is_selected(self) -> bool {
        self.bits() & Self::EDIT_BITS == Self::SELECT.bits()
    }

    /// Whether the splat is painted and nothing else.
    pub const fn is_painted(self) -> bool {
        self.bits() == Self::PAINT.bits()
    }

    /// Whether the splat can take part in selection, i.e. it is neither hidden nor deleted.
    pub const fn is_selectable(self) -> bool {
        self.bits() & (Self::HIDE.bits() | Self::DELETE.bits()) == 0
    }

    /// Whether the splat is hidden but not deleted.
    pub const fn is_hidden(self) -> bool {
        self.bits() & (Self::HIDE.bits() | Self::DELETE.bits()) == Self::HIDE.bits()
    }

    /// Whether the splat carries the delete bit.
    pub const fn is_deleted(self) -> bool {
        self.bits() & Self::DELETE.bits() != 0
    }
}
