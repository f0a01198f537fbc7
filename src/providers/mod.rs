pub mod caching;
pub mod remote;
pub mod table;
pub mod util;

use crate::core::ImpactOracle;
use crate::core::config::OracleConfig;
use caching::CachingOracle;
use remote::RemoteOracle;
use table::TableOracle;

/// Builds the oracle described by the configuration.
pub fn oracle_from_config(config: &OracleConfig, cache: bool) -> Box<dyn ImpactOracle> {
    let oracle: Box<dyn ImpactOracle> = match config {
        OracleConfig::Table(table) => Box::new(TableOracle::new(table.clone())),
        OracleConfig::Remote(remote) => Box::new(RemoteOracle::new(remote.clone())),
    };
    if cache {
        Box::new(CachingOracle::new(oracle))
    } else {
        oracle
    }
}
