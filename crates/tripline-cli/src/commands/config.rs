use clap::Subcommand;
use tripline_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one tunable
    Get {
        /// Dotted key (e.g. "interaction.orientation", "layout.min_activity_lanes")
        key: String,
    },
    /// Change one tunable and save
    Set {
        /// Dotted key
        key: String,
        /// New value, parsed as the key's type
        #[arg(allow_negative_numbers = true)]
        value: String,
    },
    /// Print the whole configuration as stored (TOML)
    List {
        /// Print JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Print every settable key
    Keys,
    /// Print the location of config.toml
    Path,
    /// Reset config to defaults
    Reset,
}

fn unknown_key(key: &str) -> Box<dyn std::error::Error> {
    format!(
        "unknown key: {key} (known keys: {})",
        Config::keys().join(", ")
    )
    .into()
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load()?.get(&key).ok_or_else(|| unknown_key(&key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            if !Config::keys().contains(&key) {
                return Err(unknown_key(&key));
            }
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            tracing::debug!(%key, %value, "config updated");
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List { json } => {
            let config = Config::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", config.to_toml()?);
            }
        }
        ConfigAction::Keys => {
            for key in Config::keys() {
                println!("{key}");
            }
        }
        ConfigAction::Path => println!("{}", Config::file_path()?.display()),
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
