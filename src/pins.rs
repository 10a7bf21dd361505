//! GPIO / peripheral pin assignments for the DoorGuard main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Indicator LEDs (discrete, active HIGH)
// ---------------------------------------------------------------------------

/// Red indicator — intrusion alert.
pub const LED_RED_GPIO: i32 = 2;
/// Yellow indicator — access denied.
pub const LED_YELLOW_GPIO: i32 = 3;
/// Green indicator — door released / access granted.
pub const LED_GREEN_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Manual door-release button — analog level via resistive divider.
/// ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const BUTTON_ADC_GPIO: i32 = 1;
/// ADC channel index for the release button.
pub const BUTTON_ADC_CHANNEL: u32 = 0;

/// Door contact (reed switch, external pull-up).
/// LOW = door closed (magnet present), HIGH = door open.
pub const DOOR_CONTACT_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Buzzer (LEDC tone output)
// ---------------------------------------------------------------------------

/// Piezo buzzer drive pin.
pub const BUZZER_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// MFRC522 tag reader (SPI2)
// ---------------------------------------------------------------------------

pub const RFID_SCLK_GPIO: i32 = 12;
pub const RFID_MOSI_GPIO: i32 = 11;
pub const RFID_MISO_GPIO: i32 = 13;
/// SPI chip select for the reader.
pub const RFID_CS_GPIO: i32 = 10;
/// Reader hard-reset line.
pub const RFID_RST_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// SD card slot (shares SPI2 with the reader, own chip select)
// ---------------------------------------------------------------------------

pub const SD_CS_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// HD44780 16x2 character display (4-bit parallel)
// ---------------------------------------------------------------------------

pub const LCD_RS_GPIO: i32 = 8;
pub const LCD_EN_GPIO: i32 = 7;
pub const LCD_D4_GPIO: i32 = 15;
pub const LCD_D5_GPIO: i32 = 16;
pub const LCD_D6_GPIO: i32 = 17;
pub const LCD_D7_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// LEDC configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 - 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
