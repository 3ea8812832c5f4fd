//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use mindless_config::{Config, DeviceSetting};

#[derive(Debug, Parser)]
#[command(name = "mindless")]
#[command(about = "An animated coming-soon splash for the terminal")]
#[command(version)]
pub struct Cli {
    /// Config file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Caption typed out below the wordmark
    #[arg(long)]
    pub caption: Option<String>,

    /// Device class used for rain density and repaint rates
    #[arg(long, value_enum)]
    pub device: Option<DeviceArg>,

    /// Leave the splash automatically after this many seconds
    #[arg(long, value_name = "SECS")]
    pub dismiss_after: Option<f64>,

    /// Write logs to this file (the terminal is busy drawing)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Logo image shown above the wordmark
    #[arg(long, value_name = "PATH")]
    pub logo: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DeviceArg {
    Auto,
    Desktop,
    Mobile,
}

impl From<DeviceArg> for DeviceSetting {
    fn from(arg: DeviceArg) -> Self {
        match arg {
            DeviceArg::Auto => DeviceSetting::Auto,
            DeviceArg::Desktop => DeviceSetting::Desktop,
            DeviceArg::Mobile => DeviceSetting::Mobile,
        }
    }
}

impl Cli {
    /// Load the config file named on the command line (or the default one)
    /// and apply the flag overrides.
    pub fn load_config(&self) -> color_eyre::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)
                .wrap_err_with(|| format!("could not load {}", path.display()))?,
            None => Config::load().wrap_err("could not load the default config file")?,
        };
        self.apply(&mut config);
        Ok(config)
    }

    /// Override config values with the flags that were given.
    pub fn apply(&self, config: &mut Config) {
        if let Some(caption) = &self.caption {
            config.caption = caption.clone();
        }
        if let Some(device) = self.device {
            config.device = device.into();
        }
        if let Some(secs) = self.dismiss_after {
            config.dismiss_after_secs = Some(secs);
        }
        if let Some(path) = &self.log_file {
            config.log_file = Some(path.clone());
        }
        if let Some(path) = &self.logo {
            config.logo = Some(path.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "mindless",
            "--caption",
            "SOON",
            "--device",
            "mobile",
            "--dismiss-after",
            "2.5",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.caption, "SOON");
        assert_eq!(config.device, DeviceSetting::Mobile);
        assert_eq!(config.dismiss_after_secs, Some(2.5));
        assert_eq!(config.logo, None);
    }

    #[test]
    fn no_flags_leave_config_alone() {
        let cli = Cli::try_parse_from(["mindless"]).unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config, Config::default());
        assert!(!cli.print_config);
    }

    #[test]
    fn unknown_device_is_rejected() {
        assert!(Cli::try_parse_from(["mindless", "--device", "tablet"]).is_err());
    }
}
