use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tapaterra_core::assets::SizeVariant;

/// CLI arguments for tapaterra-cli
#[derive(Debug, Parser)]
#[command(
    name = "tapaterra",
    version,
    about = "Data and asset pipeline tools for the Tapaterra flag app"
)]
pub struct CliArgs {
    /// More output (-v: debug, -vv: trace). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Replace the bundled name → ISO2 table (JSON object)
    #[arg(long = "iso-table", global = true)]
    pub iso_table: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Append `isoCode:` to the Country(...) literals of a Swift file
    EnrichIso {
        /// Swift source to patch in place
        #[arg(long = "swift-file", default_value = tapaterra_core::enrich::DEFAULT_SWIFT_FILE)]
        swift_file: PathBuf,
    },

    /// Build country_details.json from REST Countries + curated tables
    #[cfg(feature = "fetch")]
    FetchDetails {
        /// Output document
        #[arg(short = 'o', long = "output", default_value = tapaterra_core::store::DEFAULT_DETAILS_FILE)]
        output: PathBuf,

        /// Replace the bundled cities / rivers / mountains data set
        #[arg(long = "features-table")]
        features_table: Option<PathBuf>,

        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Resize the app icon into every required size
    #[cfg(feature = "icons")]
    Icons {
        /// Source bitmap
        #[arg(short = 's', long = "source", default_value = tapaterra_core::icons::DEFAULT_ICON_SOURCE)]
        source: PathBuf,

        /// Output .appiconset directory
        #[arg(short = 'o', long = "output", default_value = tapaterra_core::icons::DEFAULT_ICON_DIR)]
        output: PathBuf,
    },

    /// Rebuild the Flags asset catalog from a region/size/image tree
    ImportFlags {
        /// Source root (region/size/flag.png)
        #[arg(short = 's', long = "source")]
        source: PathBuf,

        /// Destination folder inside the .xcassets (deleted and rebuilt)
        #[arg(short = 'd', long = "dest", default_value = tapaterra_core::assets::DEFAULT_FLAGS_DIR)]
        dest: PathBuf,

        /// Size variant to import: large, medium or small
        #[arg(long = "size", default_value = "large")]
        size: SizeVariant,
    },

    /// Fill in missing neighbours of an existing country_details.json
    #[cfg(feature = "fetch")]
    BackfillNeighbours {
        /// Document to update in place
        #[arg(short = 'i', long = "input", default_value = tapaterra_core::store::DEFAULT_DETAILS_FILE)]
        input: PathBuf,

        /// Cache border names and checkpoint every ten updates
        #[arg(long = "fast")]
        fast: bool,

        #[command(flatten)]
        remote: RemoteArgs,
    },
}

#[cfg(feature = "fetch")]
#[derive(Debug, clap::Args)]
pub struct RemoteArgs {
    /// REST Countries base URL
    #[arg(long = "base-url", default_value = tapaterra_core::source::REST_COUNTRIES_BASE)]
    pub base_url: String,

    /// Override the pause between requests, in milliseconds
    #[arg(long = "delay-ms")]
    pub delay_ms: Option<u64>,
}
