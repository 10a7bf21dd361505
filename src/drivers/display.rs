//! HD44780 16x2 character display driver (4-bit parallel).
//!
//! Bit-bangs the classic RS/EN/D4-D7 interface through the GPIO shims.
//! The panel is write-only; a shadow copy of both lines is kept so the
//! rest of the firmware (and the tests) can read back what is showing.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real panel and the shadow.
//! On host/test: shadow only.

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

/// Characters per display line.
pub const LINE_WIDTH: usize = 16;

pub struct Lcd1602 {
    lines: [heapless::String<LINE_WIDTH>; 2],
}

impl Lcd1602 {
    pub fn new() -> Self {
        Self {
            lines: [heapless::String::new(), heapless::String::new()],
        }
    }

    /// Run the HD44780 4-bit wake-up dance.  Call once after power-on,
    /// before any text is written.
    pub fn init(&mut self) {
        #[cfg(target_os = "espidf")]
        {
            // Three 8-bit function-set knocks, then switch to 4-bit.
            Self::delay_ms(50);
            self.write_nibble(0x03, false);
            Self::delay_ms(5);
            self.write_nibble(0x03, false);
            Self::delay_ms(5);
            self.write_nibble(0x03, false);
            Self::delay_ms(1);
            self.write_nibble(0x02, false);

            self.command(0x28); // 4-bit, 2 lines, 5x8 font
            self.command(0x0C); // display on, cursor off
            self.command(0x06); // entry mode: increment, no shift
        }
        self.clear();
    }

    /// Replace both lines.  Text beyond 16 columns is truncated, matching
    /// what the panel would physically show.
    pub fn print(&mut self, line1: &str, line2: &str) {
        self.set_line(0, line1);
        self.set_line(1, line2);
    }

    /// Blank the panel.
    pub fn clear(&mut self) {
        self.lines[0].clear();
        self.lines[1].clear();
        #[cfg(target_os = "espidf")]
        {
            self.command(0x01); // clear display
            Self::delay_ms(2); // the one slow HD44780 command
        }
    }

    /// Shadow copy of a line (0 or 1).
    pub fn line(&self, idx: usize) -> &str {
        &self.lines[idx]
    }

    // ── Internal ──────────────────────────────────────────────

    fn set_line(&mut self, idx: usize, text: &str) {
        self.lines[idx].clear();
        for ch in text.chars().take(LINE_WIDTH) {
            let _ = self.lines[idx].push(ch);
        }
        #[cfg(target_os = "espidf")]
        {
            // DDRAM row offsets: 0x00 and 0x40.
            self.command(0x80 | if idx == 0 { 0x00 } else { 0x40 });
            let shadow = self.lines[idx].clone();
            for ch in shadow.chars() {
                self.write_data(ch as u8);
            }
            // Pad the rest of the row so stale characters never linger.
            for _ in shadow.chars().count()..LINE_WIDTH {
                self.write_data(b' ');
            }
        }
    }

    #[cfg(target_os = "espidf")]
    fn command(&mut self, byte: u8) {
        self.write_byte(byte, false);
    }

    #[cfg(target_os = "espidf")]
    fn write_data(&mut self, byte: u8) {
        self.write_byte(byte, true);
    }

    #[cfg(target_os = "espidf")]
    fn write_byte(&mut self, byte: u8, is_data: bool) {
        self.write_nibble(byte >> 4, is_data);
        self.write_nibble(byte & 0x0F, is_data);
    }

    #[cfg(target_os = "espidf")]
    fn write_nibble(&mut self, nibble: u8, is_data: bool) {
        hw_init::gpio_write(pins::LCD_RS_GPIO, is_data);
        hw_init::gpio_write(pins::LCD_D4_GPIO, nibble & 0x01 != 0);
        hw_init::gpio_write(pins::LCD_D5_GPIO, nibble & 0x02 != 0);
        hw_init::gpio_write(pins::LCD_D6_GPIO, nibble & 0x04 != 0);
        hw_init::gpio_write(pins::LCD_D7_GPIO, nibble & 0x08 != 0);

        // Latch on the EN falling edge; >450 ns pulse required.
        hw_init::gpio_write(pins::LCD_EN_GPIO, true);
        unsafe { esp_idf_svc::sys::esp_rom_delay_us(1) };
        hw_init::gpio_write(pins::LCD_EN_GPIO, false);
        unsafe { esp_idf_svc::sys::esp_rom_delay_us(50) };
    }

    #[cfg(target_os = "espidf")]
    fn delay_ms(ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}

impl Default for Lcd1602 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadow_tracks_printed_text() {
        let mut lcd = Lcd1602::new();
        lcd.init();
        lcd.print("WELCOME", "Alice");
        assert_eq!(lcd.line(0), "WELCOME");
        assert_eq!(lcd.line(1), "Alice");
    }

    #[test]
    fn overlong_text_is_truncated_to_panel_width() {
        let mut lcd = Lcd1602::new();
        lcd.print("ABCDEFGHIJKLMNOPQRSTUVWXYZ", "");
        assert_eq!(lcd.line(0), "ABCDEFGHIJKLMNOP");
    }

    #[test]
    fn clear_blanks_both_lines() {
        let mut lcd = Lcd1602::new();
        lcd.print("DOOR UNLOCKED!!!", "x");
        lcd.clear();
        assert_eq!(lcd.line(0), "");
        assert_eq!(lcd.line(1), "");
    }
}
