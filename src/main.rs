use crate::picker::{load_file, open_file_dialog, FilePickerError};
use crate::AppError::ConfigError;
use clap::Parser;
use config::Config;
use osuguide::{parse_offset_input, parse_osu_data, spawn_import, GuideError};
use std::io;
use std::path::PathBuf;

mod config;
mod picker;

fn main() {
    let result = main_result();
    std::process::exit(match result {
        Ok(()) => 0,
        Err(err) => {
            // use Display instead of Debug for user friendly error messages
            log::error!("{err}");
            1
        }
    });
}

pub fn main_result() -> Result<(), AppError> {
    // setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("osuguide=info"))
        .init();

    // args
    let args = CliArgs::parse();

    // read local config
    let local_config = Config::read_config()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(|err| AppError::OtherError(format!("Could not start runtime {err}")))?;

    // go!
    runtime.block_on(run(args, local_config))
}

async fn run(args: CliArgs, mut local_config: Config) -> Result<(), AppError> {
    let osu_file_path = match args.osu_file_path.map(PathBuf::from) {
        Some(path) => {
            // check if beatmap file exists
            if !path.exists() {
                return Err(ConfigError(format!("Beatmap file not found {path:?}")));
            }
            path
        }
        None => open_file_dialog(local_config.beatmaps_folder()).await?,
    };
    local_config.set_beatmaps_folder(osu_file_path.parent().map(PathBuf::from))?;

    let offset_ms = args
        .offset
        .as_deref()
        .map_or(local_config.default_offset_ms(), parse_offset_input);
    if args.save_offset {
        local_config.set_default_offset_ms(offset_ms)?;
        log::info!("Saved {offset_ms}ms as default offset");
    }

    if args.print_events {
        let file_data = load_file(&osu_file_path).await?;
        let beatmap = parse_osu_data(&file_data)?;
        for event in &beatmap.click_events {
            println!("{event}");
        }
        println!("Total events: {}", beatmap.click_events.len());
    }

    log::info!("Importing {osu_file_path:?} with offset {offset_ms}ms");
    let guidelines = spawn_import(osu_file_path, offset_ms).wait().await?;

    match args.output.map(PathBuf::from) {
        Some(output) => {
            tokio::fs::write(&output, guidelines.as_bytes()).await?;
            log::info!("Guidelines written to {output:?}");
        }
        None => println!("{guidelines}"),
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Optional path to the beatmap to by-pass the file picker.
    #[arg(long)]
    osu_file_path: Option<String>,
    /// Offset in milliseconds added to every guideline, non numeric values count as 0.
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<String>,
    /// Remember the offset for the next runs.
    #[arg(long, default_value_t = false)]
    save_offset: bool,
    /// Optional file receiving the guideline string instead of stdout.
    #[arg(long)]
    output: Option<String>,
    /// List every click event before the guideline string.
    #[arg(long, default_value_t = false)]
    print_events: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("parsing error: {0}")]
    ParsingError(String),
    #[error("file picker error: {0}")]
    PickerError(FilePickerError),
    #[error("other error: {0}")]
    OtherError(String),
}

impl From<GuideError> for AppError {
    fn from(error: GuideError) -> Self {
        match error {
            GuideError::InvalidFormat(s) => Self::ParsingError(s),
            GuideError::ConfigError(s) => Self::ConfigError(s),
            GuideError::IoFailure(s) => Self::OtherError(s),
        }
    }
}

impl From<FilePickerError> for AppError {
    fn from(error: FilePickerError) -> Self {
        Self::PickerError(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::OtherError(error.to_string())
    }
}
