use std::sync::Once;

use serde::{Deserialize, Serialize};
use stride_syntax::{ScanContext, ScanOptions};

use crate::error::ConvertError;

/// How warning marker comments are spelled in the converted tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningStyle {
    /// A human readable sentence, e.g. `Unsupported feature: varargs`.
    #[default]
    Message,
    /// A stable `WARNING:<Kind>` marker.
    Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConvertOptions {
    /// The grammar production the input is scanned as.
    pub context: ScanContext,
    pub warning_comments: WarningStyle,
    /// Tokens the scanner buffers ahead of the consumed position.
    pub comment_lookahead: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            context: ScanContext::TopLevel,
            warning_comments: WarningStyle::Message,
            comment_lookahead: 1,
        }
    }
}

impl ConvertOptions {
    pub fn with_context(context: ScanContext) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    /// Parses options from TOML text; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConvertError> {
        let options: ConvertOptions =
            toml::from_str(text).map_err(|err| ConvertError::Config(err.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.comment_lookahead == 0 {
            return Err(ConvertError::Config(
                "comment-lookahead must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    pub(crate) fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            context: self.context,
            comment_lookahead: self.comment_lookahead,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// A bare level (`debug`) or a full `EnvFilter` directive string.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

impl LoggingConfig {
    fn normalized_level(&self) -> String {
        let trimmed = self.level.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => "info".to_owned(),
            "trace" => "trace".to_owned(),
            "debug" => "debug".to_owned(),
            "info" => "info".to_owned(),
            "warn" | "warning" => "warn".to_owned(),
            "error" => "error".to_owned(),
            _ => trimmed.to_owned(),
        }
    }

    /// Builds the filter for the configured level, falling back to `info` when
    /// the directives do not parse.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        tracing_subscriber::EnvFilter::try_new(self.normalized_level()).unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::default()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        })
    }
}

static TRACING_INIT: Once = Once::new();

/// Installs a global fmt subscriber writing to stderr.
///
/// Safe to call more than once; only the first call has an effect, and an
/// already installed subscriber is left alone.
pub fn init_tracing(config: &LoggingConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(config.env_filter())
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init();
    });
}
