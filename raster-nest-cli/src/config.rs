use raster_nest::io::svg::SvgDrawOptions;
use raster_nest::util::NestConfig;
use serde::{Deserialize, Serialize};

/// Configuration of the command line driver
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub struct CliConfig {
    /// Configuration of the nesting pass
    #[serde(flatten)]
    pub nest_config: NestConfig,
    /// Options for the svg of the solution
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}
