use {
    crate::kernel::entities::Amount,
    anyhow::Result,
    clap::{
        crate_authors,
        crate_description,
        crate_name,
        crate_version,
        Args,
        Parser,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    std::fs,
};

pub mod server;

#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
pub enum Options {
    /// Run the salvage auction server.
    Run(RunOptions),
}

#[derive(Args, Clone, Debug)]
pub struct RunOptions {
    /// Server Options
    #[command(flatten)]
    pub server: server::Options,

    #[command(flatten)]
    pub config: ConfigOptions,

    /// Bearer token required for administrative operations: registering
    /// batches, opening, cancelling and resolving auctions.
    #[arg(long = "admin-api-key")]
    #[arg(env = "ADMIN_API_KEY")]
    pub admin_api_key: String,
}

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Config Options")]
#[group(id = "Config")]
pub struct ConfigOptions {
    /// Path to a configuration file containing the engine tunables.
    #[arg(long = "config")]
    #[arg(env = "SALVAGE_CONFIG")]
    #[arg(default_value = "config.yaml")]
    pub config: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub allocation: AllocationConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Administrative cost per distinct contracted vendor, in minor units.
    /// Charged once per vendor in the itemized strategy and once in the
    /// bundled strategy.
    #[serde(default = "default_vendor_admin_cost")]
    pub vendor_admin_cost: Amount,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            vendor_admin_cost: default_vendor_admin_cost(),
        }
    }
}

// 600 currency units expressed in minor units.
fn default_vendor_admin_cost() -> Amount {
    60_000
}

impl Config {
    pub fn load(path: &str) -> Result<Config> {
        let yaml_content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&yaml_content)?;
        Ok(config)
    }
}
