use std::path::PathBuf;

use clap::Parser;
use dictionary::{ResultOptions, DEFAULT_WORD_API_URL};
use sunburst::ChartConfig;

/// Draws a word, its senses and related words as a sunburst chart.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Config {
    /// Word to draw right away
    pub word: Option<String>,

    /// Base url of the word lookup service
    #[arg(long, env = "WORD_SUNBURST_SERVER", default_value = DEFAULT_WORD_API_URL)]
    pub server: String,

    /// Relations feeding the chart: any of also, antonyms, similarTo, synonyms, or all/none
    #[arg(long, default_value = "antonyms")]
    pub relations: ResultOptions,

    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    #[arg(long, default_value_t = 1024)]
    pub height: u32,

    /// Id of the generated svg element
    #[arg(long, default_value = "word-chart")]
    pub container_id: String,

    /// Where the chart is written after every change
    #[arg(long, short, default_value = "chart.svg")]
    pub output: PathBuf,
}

impl Config {
    pub fn chart_config(&self) -> ChartConfig {
        ChartConfig {
            width: self.width,
            height: self.height,
            container_id: self.container_id.clone(),
            ..ChartConfig::default()
        }
    }
}
