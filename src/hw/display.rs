//! SSD1306 OLED implementation of the display capability.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use crate::hal::DisplaySurface;

/// Pixel height of one rendered text row.
const LINE_HEIGHT: i32 = 10;

/// Vertical distance from a glyph's top-left to its baseline.
const BASELINE: i32 = 8;

type Driver<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// 128x64 OLED behind the `DisplaySurface` trait. The panel has no
/// backlight; the backlight toggle maps to panel brightness.
pub struct Oled<I2C> {
    driver: Driver<I2C>,
}

impl<I2C> Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the panel and show an empty screen.
    pub fn new(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let mut driver = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        if driver.init().is_err() {
            defmt::warn!("display: {:?}", crate::error::Error::Display);
        }
        driver.clear_buffer();
        let _ = driver.flush();
        Self { driver }
    }

    fn style() -> embedded_graphics::mono_font::MonoTextStyle<'static, BinaryColor> {
        MonoTextStyleBuilder::new()
            .font(&FONT_6X10)
            .text_color(BinaryColor::On)
            .build()
    }
}

impl<I2C> DisplaySurface for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn clear(&mut self) {
        self.driver.clear_buffer();
    }

    fn text(&mut self, x: u8, y: u8, text: &str) {
        let mut row = 0;
        for line in text.split('\n') {
            if line.is_empty() {
                row += 1;
                continue;
            }
            let point = Point::new(x as i32, y as i32 + row * LINE_HEIGHT + BASELINE);
            let _ = Text::new(line, point, Self::style()).draw(&mut self.driver);
            row += 1;
        }
    }

    fn present(&mut self) {
        let _ = self.driver.flush();
    }

    fn sleep(&mut self) {
        let _ = self.driver.set_display_on(false);
    }

    fn wake(&mut self) {
        let _ = self.driver.set_display_on(true);
    }

    fn set_backlight(&mut self, on: bool) {
        let brightness = if on {
            Brightness::BRIGHTEST
        } else {
            Brightness::DIM
        };
        let _ = self.driver.set_brightness(brightness);
    }
}
