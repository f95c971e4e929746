use raster_nest::io::ext_repr::{ExtInstance, ExtSolution};
use serde::{Deserialize, Serialize};

use crate::config::CliConfig;

/// Everything written to the solution JSON: the input, the solution and the configuration used
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NestOutput {
    pub instance: ExtInstance,
    pub solution: ExtSolution,
    pub config: CliConfig,
}
