//! SH1106 OLED page sink
//!
//! Streams [`MonoFrameBuffer`](crate::MonoFrameBuffer) pages to a 128x64
//! SH1106 panel over I2C. The controller's RAM is 132 columns wide and the
//! visible area starts at column 2.

use embedded_hal::i2c::I2c;

use crate::mono::{PageSink, WIDTH};

/// Default I2C address (0x3D on some modules)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Column where the visible area starts
const COLUMN_OFFSET: u8 = 2;

/// Control byte prefixes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80,
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14,
    cmd::SET_SEG_REMAP,
    cmd::SET_COM_SCAN_DEC,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// SH1106 panel on a blocking I2C bus
pub struct Sh1106Sink<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Sh1106Sink<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Run the power-up sequence and switch the panel on
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        for &c in INIT_SEQUENCE {
            self.command(c)?;
        }
        debug!("SH1106 at {=u8:#x} initialized", self.address);
        Ok(())
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), I2C::Error> {
        self.command(cmd::SET_CONTRAST)?;
        self.command(contrast)
    }

    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), I2C::Error> {
        self.command(if inverted {
            cmd::SET_INVERSE
        } else {
            cmd::SET_NORMAL
        })
    }

    pub fn into_inner(self) -> I2C {
        self.i2c
    }

    fn command(&mut self, c: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[CONTROL_COMMAND, c])
    }
}

impl<I2C: I2c> PageSink for Sh1106Sink<I2C> {
    type Error = I2C::Error;

    fn write_page(&mut self, page: u8, data: &[u8; WIDTH]) -> Result<(), Self::Error> {
        self.command(cmd::SET_PAGE_ADDR | (page & 0x07))?;
        self.command(cmd::SET_LOW_COLUMN | COLUMN_OFFSET)?;
        self.command(cmd::SET_HIGH_COLUMN)?;

        let mut frame = [0u8; WIDTH + 1];
        frame[0] = CONTROL_DATA;
        frame[1..].copy_from_slice(data);
        self.i2c.write(self.address, &frame)
    }
}
