//! Register-backed GPIO output
//!
//! Most Cortex-M GPIO blocks expose write-one-to-set and write-one-to-clear
//! registers for both output level and direction. Writing a single bit mask
//! there is atomic with respect to other pins on the same port, which is what
//! the bit emitter needs on its hot path.

use pixbang_hal::OutputPin;

/// Register offsets (in bytes) of a set/clear style GPIO block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortLayout {
    /// Output level readback
    pub out: usize,
    /// Write-one-to-set output level
    pub out_set: usize,
    /// Write-one-to-clear output level
    pub out_clr: usize,
    /// Direction readback (1 = output)
    pub dir: usize,
    /// Write-one-to-set direction
    pub dir_set: usize,
    /// Number of pins on the port
    pub pin_count: u8,
}

impl PortLayout {
    /// RP2040 single-cycle IO block (base `0xd000_0000`)
    pub const RP2040_SIO: PortLayout = PortLayout {
        out: 0x010,
        out_set: 0x014,
        out_clr: 0x018,
        dir: 0x020,
        dir_set: 0x024,
        pin_count: 30,
    };

    /// nRF52 GPIO port 0 (base `0x5000_0000`)
    pub const NRF52_P0: PortLayout = PortLayout {
        out: 0x504,
        out_set: 0x508,
        out_clr: 0x50c,
        dir: 0x514,
        dir_set: 0x518,
        pin_count: 32,
    };
}

/// RP2040 SIO base address
pub const RP2040_SIO_BASE: usize = 0xd000_0000;

/// nRF52 P0 base address
pub const NRF52_P0_BASE: usize = 0x5000_0000;

/// Output pin driven through a port's set/clear registers
#[derive(Debug)]
pub struct SetClearPin {
    base: usize,
    mask: u32,
    layout: PortLayout,
}

impl SetClearPin {
    /// Create a pin on the GPIO block at `base`
    ///
    /// Returns `None` if `pin` does not exist on the port.
    ///
    /// # Safety
    ///
    /// `base` must be the address of a GPIO block laid out as `layout`, the
    /// pin must already be routed to that block, and nothing else may drive
    /// the same pin while the returned value exists.
    pub unsafe fn new(base: usize, pin: u8, layout: PortLayout) -> Option<Self> {
        if pin >= layout.pin_count || pin >= 32 {
            return None;
        }
        Some(Self {
            base,
            mask: 1 << pin,
            layout,
        })
    }

    /// Bit mask of this pin within the port
    pub fn mask(&self) -> u32 {
        self.mask
    }

    #[inline(always)]
    fn write(&self, offset: usize, value: u32) {
        let reg = (self.base + offset) as *mut u32;
        // SAFETY: `new` requires `base` to point at a register block with
        // this layout, so every offset is a valid aligned 32-bit register.
        unsafe { core::ptr::write_volatile(reg, value) }
    }

    #[inline(always)]
    fn read(&self, offset: usize) -> u32 {
        let reg = (self.base + offset) as *const u32;
        // SAFETY: see `write`.
        unsafe { core::ptr::read_volatile(reg) }
    }
}

impl OutputPin for SetClearPin {
    fn set_output(&mut self) {
        self.write(self.layout.dir_set, self.mask);
    }

    #[inline(always)]
    fn set_high(&mut self) {
        self.write(self.layout.out_set, self.mask);
    }

    #[inline(always)]
    fn set_low(&mut self) {
        self.write(self.layout.out_clr, self.mask);
    }

    fn is_set_high(&self) -> bool {
        self.read(self.layout.out) & self.mask != 0
    }

    fn is_output(&self) -> bool {
        self.read(self.layout.dir) & self.mask != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIO_WORDS: usize = 16;

    fn word(offset: usize) -> usize {
        offset / 4
    }

    /// In-RAM stand-in for a GPIO register block
    fn pin_on(regs: &mut [u32; SIO_WORDS], pin: u8) -> SetClearPin {
        // SAFETY: the array outlives the pin in every test and covers all
        // RP2040_SIO offsets.
        unsafe { SetClearPin::new(regs.as_mut_ptr() as usize, pin, PortLayout::RP2040_SIO) }
            .unwrap()
    }

    #[test]
    fn test_rejects_missing_pin() {
        let mut regs = [0u32; SIO_WORDS];
        let base = regs.as_mut_ptr() as usize;
        // SAFETY: never dereferenced when construction fails
        let pin = unsafe { SetClearPin::new(base, 30, PortLayout::RP2040_SIO) };
        assert!(pin.is_none());
    }

    #[test]
    fn test_set_and_clear_write_mask() {
        let mut regs = [0u32; SIO_WORDS];
        let mut pin = pin_on(&mut regs, 5);
        assert_eq!(pin.mask(), 1 << 5);

        pin.set_output();
        pin.set_high();
        pin.set_low();
        drop(pin);

        assert_eq!(regs[word(PortLayout::RP2040_SIO.dir_set)], 1 << 5);
        assert_eq!(regs[word(PortLayout::RP2040_SIO.out_set)], 1 << 5);
        assert_eq!(regs[word(PortLayout::RP2040_SIO.out_clr)], 1 << 5);
        // Other pins untouched
        assert_eq!(regs[word(PortLayout::RP2040_SIO.out)], 0);
    }

    #[test]
    fn test_set_output_leaves_level_alone() {
        let mut regs = [0u32; SIO_WORDS];
        let mut pin = pin_on(&mut regs, 5);
        pin.set_output();
        drop(pin);

        // Only the direction changes; driving LOW is `Ws2812::init`'s job
        assert_eq!(regs[word(PortLayout::RP2040_SIO.dir_set)], 1 << 5);
        assert_eq!(regs[word(PortLayout::RP2040_SIO.out_set)], 0);
        assert_eq!(regs[word(PortLayout::RP2040_SIO.out_clr)], 0);
    }

    #[test]
    fn test_readback_uses_level_and_direction_registers() {
        let mut regs = [0u32; SIO_WORDS];
        regs[word(PortLayout::RP2040_SIO.out)] = 1 << 7;
        regs[word(PortLayout::RP2040_SIO.dir)] = 1 << 7;

        let pin = pin_on(&mut regs, 7);
        assert!(pin.is_set_high());
        assert!(pin.is_output());

        let mut regs = [0u32; SIO_WORDS];
        regs[word(PortLayout::RP2040_SIO.out)] = !(1 << 7);
        let pin = pin_on(&mut regs, 7);
        assert!(!pin.is_set_high());
        assert!(!pin.is_output());
    }

    #[test]
    fn test_nrf52_layout_offsets() {
        let layout = PortLayout::NRF52_P0;
        assert_eq!(layout.out_clr - layout.out_set, 4);
        assert_eq!(layout.pin_count, 32);
    }
}
