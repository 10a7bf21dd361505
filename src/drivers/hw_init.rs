//! One-shot hardware peripheral initialization and raw-sys shims.
//!
//! Configures the button ADC channel, GPIO directions, the buzzer LEDC
//! channel, and the SPI bus for the MFRC522 tag reader using raw ESP-IDF
//! sys calls.  Called once from `main()` before the poll loop starts.
//! Every other driver goes through the thin read/write shims at the
//! bottom of this file; on host targets the shims are no-ops so the rest
//! of the crate compiles and tests unchanged.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    LedcInitFailed,
    SpiInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed => write!(f, "LEDC timer/channel config failed"),
            Self::SpiInitFailed(rc) => write!(f, "SPI bus init failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the poll loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio()?;
        init_ledc()?;
        init_spi()?;
        rfid_pcd_init();
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop read path.  `init_adc()` completes before the poll loop
/// starts, so no concurrent access is possible.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        // 10-bit width matches the button divider's 0-1023 scale.
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_10,
    };
    let ret = unsafe {
        adc_oneshot_config_channel(adc1_handle(), pins::BUTTON_ADC_CHANNEL, &chan_cfg)
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    info!("hw_init: ADC1 configured (CH{}=release button)", pins::BUTTON_ADC_CHANNEL);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract — single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    0
}

// ── GPIO ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio() -> Result<(), HwInitError> {
    // Door contact: input with pull-up (reed switch to ground).
    let ret = unsafe {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pins::DOOR_CONTACT_GPIO,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        gpio_config(&cfg)
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }

    // Outputs: indicator LEDs, LCD control/data lines, reader reset and
    // both chip selects.
    let output_pins = [
        pins::LED_RED_GPIO,
        pins::LED_YELLOW_GPIO,
        pins::LED_GREEN_GPIO,
        pins::LCD_RS_GPIO,
        pins::LCD_EN_GPIO,
        pins::LCD_D4_GPIO,
        pins::LCD_D5_GPIO,
        pins::LCD_D6_GPIO,
        pins::LCD_D7_GPIO,
        pins::RFID_RST_GPIO,
        pins::RFID_CS_GPIO,
        pins::SD_CS_GPIO,
    ];
    let mask = output_pins.iter().fold(0u64, |m, &p| m | (1u64 << p));
    let ret = unsafe {
        let cfg = gpio_config_t {
            pin_bit_mask: mask,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        gpio_config(&cfg)
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }

    // Chip selects idle high, reader held out of reset.
    gpio_write(pins::RFID_CS_GPIO, true);
    gpio_write(pins::SD_CS_GPIO, true);
    gpio_write(pins::RFID_RST_GPIO, true);

    info!("hw_init: GPIO configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: plain level read of a configured input pin.
    unsafe { gpio_get_level(pin) != 0 }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    false
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, level: bool) {
    // SAFETY: plain level write of a configured output pin.
    unsafe {
        gpio_set_level(pin, u32::from(level));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _level: bool) {}

// ── LEDC (buzzer tone) ────────────────────────────────────────

#[cfg(target_os = "espidf")]
const LEDC_TIMER_BUZZER: u32 = ledc_timer_t_LEDC_TIMER_0;
#[cfg(target_os = "espidf")]
const LEDC_CH_BUZZER: u32 = ledc_channel_t_LEDC_CHANNEL_0;

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    let timer_cfg = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        duty_resolution: pins::PWM_RESOLUTION_BITS,
        timer_num: LEDC_TIMER_BUZZER,
        freq_hz: 450, // reconfigured per tone by buzzer_on()
        clk_cfg: ledc_clk_cfg_t_LEDC_AUTO_CLK,
        deconfigure: false,
    };
    // SAFETY: one-shot timer + channel config before the poll loop.
    if unsafe { ledc_timer_config(&timer_cfg) } != ESP_OK as i32 {
        return Err(HwInitError::LedcInitFailed);
    }

    let chan_cfg = ledc_channel_config_t {
        gpio_num: pins::BUZZER_GPIO,
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        channel: LEDC_CH_BUZZER,
        intr_type: ledc_intr_type_t_LEDC_INTR_DISABLE,
        timer_sel: LEDC_TIMER_BUZZER,
        duty: 0,
        hpoint: 0,
        ..Default::default()
    };
    if unsafe { ledc_channel_config(&chan_cfg) } != ESP_OK as i32 {
        return Err(HwInitError::LedcInitFailed);
    }

    info!("hw_init: LEDC buzzer channel configured");
    Ok(())
}

/// Start the buzzer tone at `freq_hz` (50 % duty square wave).
#[cfg(target_os = "espidf")]
pub fn buzzer_on(freq_hz: u32) {
    let half_scale = 1u32 << (pins::PWM_RESOLUTION_BITS - 1);
    // SAFETY: LEDC configured by init_ledc(); main-loop access only.
    unsafe {
        ledc_set_freq(ledc_mode_t_LEDC_LOW_SPEED_MODE, LEDC_TIMER_BUZZER, freq_hz);
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, LEDC_CH_BUZZER, half_scale);
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, LEDC_CH_BUZZER);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn buzzer_on(_freq_hz: u32) {}

/// Silence the buzzer.
#[cfg(target_os = "espidf")]
pub fn buzzer_off() {
    // SAFETY: LEDC configured by init_ledc(); main-loop access only.
    unsafe {
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, LEDC_CH_BUZZER, 0);
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, LEDC_CH_BUZZER);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn buzzer_off() {}

// ── SPI bus + MFRC522 transceiver ─────────────────────────────
//
// The reader is a commodity peripheral: a minimal register-level driver
// is enough.  REQA probes the field, anticollision cascade 1 fetches the
// 4-byte UID.

#[cfg(target_os = "espidf")]
static mut RFID_SPI: spi_device_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
mod mfrc522 {
    pub const COMMAND_REG: u8 = 0x01;
    pub const COM_IRQ_REG: u8 = 0x04;
    pub const FIFO_DATA_REG: u8 = 0x09;
    pub const FIFO_LEVEL_REG: u8 = 0x0A;
    pub const BIT_FRAMING_REG: u8 = 0x0D;
    pub const MODE_REG: u8 = 0x11;
    pub const TX_CONTROL_REG: u8 = 0x14;
    pub const TX_ASK_REG: u8 = 0x15;
    pub const T_MODE_REG: u8 = 0x2A;
    pub const T_PRESCALER_REG: u8 = 0x2B;
    pub const T_RELOAD_H_REG: u8 = 0x2C;
    pub const T_RELOAD_L_REG: u8 = 0x2D;
    pub const VERSION_REG: u8 = 0x37;

    pub const CMD_IDLE: u8 = 0x00;
    pub const CMD_TRANSCEIVE: u8 = 0x0C;

    pub const PICC_REQA: u8 = 0x26;
    pub const PICC_ANTICOLL_CL1: [u8; 2] = [0x93, 0x20];
}

#[cfg(target_os = "espidf")]
unsafe fn init_spi() -> Result<(), HwInitError> {
    let bus_cfg = spi_bus_config_t {
        __bindgen_anon_1: spi_bus_config_t__bindgen_ty_1 {
            mosi_io_num: pins::RFID_MOSI_GPIO,
        },
        __bindgen_anon_2: spi_bus_config_t__bindgen_ty_2 {
            miso_io_num: pins::RFID_MISO_GPIO,
        },
        sclk_io_num: pins::RFID_SCLK_GPIO,
        __bindgen_anon_3: spi_bus_config_t__bindgen_ty_3 { quadwp_io_num: -1 },
        __bindgen_anon_4: spi_bus_config_t__bindgen_ty_4 { quadhd_io_num: -1 },
        ..Default::default()
    };
    // SAFETY: one-shot bus + device setup before the poll loop.
    let ret = unsafe {
        spi_bus_initialize(
            spi_host_device_t_SPI2_HOST,
            &bus_cfg,
            spi_common_dma_t_SPI_DMA_CH_AUTO,
        )
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::SpiInitFailed(ret));
    }

    let dev_cfg = spi_device_interface_config_t {
        clock_speed_hz: 4_000_000, // MFRC522 tops out at 10 MHz
        mode: 0,
        spics_io_num: pins::RFID_CS_GPIO,
        queue_size: 1,
        ..Default::default()
    };
    let ret = unsafe {
        spi_bus_add_device(spi_host_device_t_SPI2_HOST, &dev_cfg, &raw mut RFID_SPI)
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::SpiInitFailed(ret));
    }

    info!("hw_init: SPI2 bus up, reader attached");
    Ok(())
}

#[cfg(target_os = "espidf")]
fn rfid_register_read(reg: u8) -> u8 {
    let tx = [0x80 | (reg << 1), 0x00];
    let mut rx = [0u8; 2];
    let mut t = spi_transaction_t {
        length: 16,
        ..Default::default()
    };
    t.__bindgen_anon_1.tx_buffer = tx.as_ptr().cast();
    t.__bindgen_anon_2.rx_buffer = rx.as_mut_ptr().cast();
    // SAFETY: RFID_SPI is written once in init_spi(); main-loop access only.
    unsafe {
        spi_device_transmit(RFID_SPI, &mut t);
    }
    rx[1]
}

#[cfg(target_os = "espidf")]
fn rfid_register_write(reg: u8, value: u8) {
    let tx = [reg << 1, value];
    let mut t = spi_transaction_t {
        length: 16,
        ..Default::default()
    };
    t.__bindgen_anon_1.tx_buffer = tx.as_ptr().cast();
    // SAFETY: RFID_SPI is written once in init_spi(); main-loop access only.
    unsafe {
        spi_device_transmit(RFID_SPI, &mut t);
    }
}

/// Soft-configure the PCD: timer, 100 % ASK, CRC preset, antenna on.
#[cfg(target_os = "espidf")]
fn rfid_pcd_init() {
    use mfrc522::*;
    rfid_register_write(T_MODE_REG, 0x80);
    rfid_register_write(T_PRESCALER_REG, 0xA9);
    rfid_register_write(T_RELOAD_H_REG, 0x03);
    rfid_register_write(T_RELOAD_L_REG, 0xE8);
    rfid_register_write(TX_ASK_REG, 0x40);
    rfid_register_write(MODE_REG, 0x3D);
    // Antenna on (TX1/TX2 drivers).
    let tx = rfid_register_read(TX_CONTROL_REG);
    if tx & 0x03 != 0x03 {
        rfid_register_write(TX_CONTROL_REG, tx | 0x03);
    }
    info!(
        "hw_init: MFRC522 up (version=0x{:02X})",
        rfid_register_read(VERSION_REG)
    );
}

/// Run one transceive and collect the response from the FIFO.
/// Returns the number of response bytes, or `None` on timeout/error.
#[cfg(target_os = "espidf")]
fn rfid_transceive(data: &[u8], bit_framing: u8, out: &mut [u8]) -> Option<usize> {
    use mfrc522::*;

    rfid_register_write(COMMAND_REG, CMD_IDLE);
    rfid_register_write(COM_IRQ_REG, 0x7F); // clear pending IRQs
    rfid_register_write(FIFO_LEVEL_REG, 0x80); // flush FIFO
    for &b in data {
        rfid_register_write(FIFO_DATA_REG, b);
    }
    rfid_register_write(COMMAND_REG, CMD_TRANSCEIVE);
    rfid_register_write(BIT_FRAMING_REG, 0x80 | bit_framing); // StartSend

    // Poll for RxIRq/IdleIRq; the field round trip is well under a
    // millisecond, the bound only guards a dead transceiver.
    for _ in 0..2000 {
        let irq = rfid_register_read(COM_IRQ_REG);
        if irq & 0x30 != 0 {
            let n = usize::from(rfid_register_read(FIFO_LEVEL_REG)).min(out.len());
            for slot in out.iter_mut().take(n) {
                *slot = rfid_register_read(FIFO_DATA_REG);
            }
            return Some(n);
        }
        if irq & 0x01 != 0 {
            return None; // timer IRQ: no tag answered
        }
    }
    None
}

/// `true` when a tag in the field answers the REQA probe.
#[cfg(target_os = "espidf")]
pub fn rfid_card_present() -> bool {
    let mut atqa = [0u8; 2];
    // REQA is a short frame: 7 bits.
    rfid_transceive(&[mfrc522::PICC_REQA], 0x07, &mut atqa) == Some(2)
}

#[cfg(not(target_os = "espidf"))]
pub fn rfid_card_present() -> bool {
    false
}

/// Anticollision cascade 1: read the 4-byte UID of the answering tag.
/// The fifth response byte is the BCC checksum (XOR of the UID bytes).
#[cfg(target_os = "espidf")]
pub fn rfid_read_uid() -> Option<[u8; 4]> {
    let mut resp = [0u8; 5];
    let n = rfid_transceive(&mfrc522::PICC_ANTICOLL_CL1, 0x00, &mut resp)?;
    if n < 5 {
        return None;
    }
    let uid = [resp[0], resp[1], resp[2], resp[3]];
    let bcc = uid.iter().fold(0u8, |acc, b| acc ^ b);
    if bcc != resp[4] {
        log::warn!("rfid: UID BCC mismatch, discarding read");
        return None;
    }
    Some(uid)
}

#[cfg(not(target_os = "espidf"))]
pub fn rfid_read_uid() -> Option<[u8; 4]> {
    None
}
