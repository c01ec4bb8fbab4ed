use crate::cli::type_enums::EquipmentEntry;
use clap::{Args, Parser, Subcommand};
use el_hornito::schemas::user_settings::{CookingTime, Locale, SpiceLevel};

/// Defines the command-line interface (CLI) for 'el-hornito'.
/// `#[derive(Parser)]` automatically generates argument parsing code via `clap`.
#[derive(Parser)]
#[command(name = "el-hornito")]
#[command(version, about = "Manage your El Hornito cooking preferences", long_about = None)]
pub struct Cli {
    /// Enables detailed debug output for troubleshooting and development.
    #[arg(short, long, global = true)]
    pub(crate) debug: bool,

    /// Directory holding the settings store (defaults to $EL_HORNITO_HOME or ~/.el-hornito).
    #[arg(long, global = true, value_name = "DIR")]
    pub(crate) store: Option<String>,

    /// Run without persistent storage: nothing is read or written.
    #[arg(long, global = true, conflicts_with = "store")]
    pub(crate) no_store: bool,

    /// Defines available subcommands for 'el-hornito'.
    #[command(subcommand)]
    pub(crate) command: Commands,
}

/// Enumerates all supported subcommands with their specific arguments and options.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the current settings.
    Show {
        /// Print the raw settings document as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Change cooking preferences, kitchen equipment or API preferences.
    /// List options replace the stored list when given.
    Set(SetArgs),
    /// Read or change the interface language.
    Locale {
        #[command(subcommand)]
        action: LocaleCommands,
    },
    /// Export the settings document (with metadata) as JSON.
    Export {
        /// Write to this file instead of stdout.
        #[arg(long, short)]
        output: Option<String>,
    },
    /// Import a previously exported settings document.
    Import {
        /// Path to the exported JSON file.
        file: String,
    },
    /// Delete the stored settings.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Summarize whether the user is new and has configured preferences.
    Status,
    /// Show, or apply, a reasonable starting set of preferences.
    SmartDefaults {
        /// Merge the smart defaults into the stored settings.
        #[arg(long)]
        apply: bool,
    },
    /// Check an AI API key against the validation endpoint and record the outcome.
    ValidateKey {
        /// The key to validate.
        #[arg(long, env = "EL_HORNITO_API_KEY", hide_env_values = true)]
        key: Option<String>,
        /// Validation endpoint (defaults to $EL_HORNITO_API_URL or the local app).
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Parse a raw model response and print the recipe it contains.
    Recipe {
        /// File holding the model's response text.
        file: String,
    },
}

/// Options of `el-hornito set`.
#[derive(Args, Debug, Default)]
pub struct SetArgs {
    /// One of: mild, medium, spicy, very-spicy.
    #[arg(long)]
    pub spice_level: Option<SpiceLevel>,
    /// One of: quick, moderate, elaborate.
    #[arg(long)]
    pub cooking_time: Option<CookingTime>,
    /// Default number of servings (1 to 20).
    #[arg(long)]
    pub servings: Option<u32>,
    /// Preferred cuisine (repeatable).
    #[arg(long = "cuisine")]
    pub cuisines: Vec<String>,
    /// Dietary restriction (repeatable).
    #[arg(long = "restriction")]
    pub restrictions: Vec<String>,
    /// Meal type (repeatable).
    #[arg(long = "meal-type")]
    pub meal_types: Vec<String>,
    /// Free-form notes for the recipe generator. An empty string removes them.
    #[arg(long)]
    pub notes: Option<String>,
    /// Kitchen equipment as CATEGORY:ITEM (repeatable); categories are
    /// basic, advanced, cookware, baking, other.
    #[arg(long = "equipment")]
    pub equipment: Vec<EquipmentEntry>,
    /// Whether usage tracking is allowed.
    #[arg(long)]
    pub usage_tracking: Option<bool>,
}

impl SetArgs {
    /// True when no option was given at all.
    pub fn is_empty(&self) -> bool {
        self.spice_level.is_none()
            && self.cooking_time.is_none()
            && self.servings.is_none()
            && self.cuisines.is_empty()
            && self.restrictions.is_empty()
            && self.meal_types.is_empty()
            && self.notes.is_none()
            && self.equipment.is_empty()
            && self.usage_tracking.is_none()
    }
}

/// Subcommands of `el-hornito locale`.
#[derive(Subcommand)]
pub enum LocaleCommands {
    /// Print the current locale.
    Get,
    /// Change the locale [possible values: en, es].
    Set { locale: Locale },
}
