//! SD-card roster store adapter.
//!
//! Mounts the FAT volume on the SD slot (ESP-IDF targets) and hands the
//! roster file to [`Roster::from_reader`].  On host targets the path is
//! read directly, which also gives tests a file-backed store for free.

use std::fs::File;
use std::path::PathBuf;

use log::warn;

use crate::access::roster::{Roster, RosterError};
use crate::app::ports::RosterStore;

pub struct SdRosterStore {
    path: PathBuf,
    #[cfg(target_os = "espidf")]
    mounted: bool,
}

impl SdRosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            #[cfg(target_os = "espidf")]
            mounted: false,
        }
    }

    #[cfg(target_os = "espidf")]
    fn ensure_mounted(&mut self) -> Result<(), RosterError> {
        use esp_idf_svc::sys::*;

        if self.mounted {
            return Ok(());
        }

        let mount_cfg = esp_vfs_fat_sdmmc_mount_config_t {
            format_if_mount_failed: false,
            max_files: 2,
            allocation_unit_size: 0,
            disk_status_check_enable: false,
            use_one_fat: false,
        };

        // The C SDSPI_HOST_DEFAULT / SDSPI_DEVICE_CONFIG_DEFAULT macros
        // are not bound, so the tables are filled by hand.
        // SAFETY: zeroed C config structs, populated before use.
        let mut host: sdmmc_host_t = unsafe { core::mem::zeroed() };
        host.flags = SDMMC_HOST_FLAG_SPI | SDMMC_HOST_FLAG_DEINIT_ARG;
        host.slot = spi_host_device_t_SPI2_HOST as i32;
        host.max_freq_khz = SDMMC_FREQ_DEFAULT as i32;
        host.io_voltage = 3.3;
        host.init = Some(sdspi_host_init);
        host.set_card_clk = Some(sdspi_host_set_card_clk);
        host.do_transaction = Some(sdspi_host_do_transaction);
        host.deinit_p = Some(sdspi_host_remove_device);
        host.get_real_freq = Some(sdspi_host_get_real_freq);

        let mut slot_cfg: sdspi_device_config_t = unsafe { core::mem::zeroed() };
        slot_cfg.host_id = spi_host_device_t_SPI2_HOST;
        slot_cfg.gpio_cs = crate::pins::SD_CS_GPIO;
        slot_cfg.gpio_cd = SDSPI_SLOT_NO_CD;
        slot_cfg.gpio_wp = SDSPI_SLOT_NO_WP;
        slot_cfg.gpio_int = gpio_num_t_GPIO_NUM_NC;

        let mut card: *mut sdmmc_card_t = core::ptr::null_mut();
        // SAFETY: one-shot VFS mount on the already-initialised SPI bus;
        // called before the poll loop, single-threaded.
        let ret = unsafe {
            esp_vfs_fat_sdspi_mount(c"/sdcard".as_ptr(), &host, &slot_cfg, &mount_cfg, &mut card)
        };
        if ret != ESP_OK {
            warn!("sd: mount failed (rc={ret})");
            return Err(RosterError::Unavailable);
        }

        self.mounted = true;
        log::info!("sd: FAT volume mounted at /sdcard");
        Ok(())
    }
}

impl RosterStore for SdRosterStore {
    fn load(&mut self) -> Result<Roster, RosterError> {
        #[cfg(target_os = "espidf")]
        self.ensure_mounted()?;

        let file = File::open(&self.path).map_err(|e| {
            warn!("sd: cannot open {}: {e}", self.path.display());
            RosterError::Unavailable
        })?;
        Roster::from_reader(file)
    }
}
