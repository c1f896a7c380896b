use std::fmt;

use crate::config::WarningStyle;

/// A recoverable conversion problem: the construct was recognized but has no
/// Stride counterpart, so it was dropped or altered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConversionWarning {
    UnsupportedModifier { context: String, modifier: String },
    UnsupportedFeature { feature: String },
}

impl ConversionWarning {
    pub fn modifier(context: impl Into<String>, modifier: impl Into<String>) -> Self {
        ConversionWarning::UnsupportedModifier {
            context: context.into(),
            modifier: modifier.into(),
        }
    }

    pub fn feature(feature: impl Into<String>) -> Self {
        ConversionWarning::UnsupportedFeature {
            feature: feature.into(),
        }
    }

    /// Stable name of the warning kind.
    pub fn identifier(&self) -> &'static str {
        match self {
            ConversionWarning::UnsupportedModifier { .. } => "UnsupportedModifier",
            ConversionWarning::UnsupportedFeature { .. } => "UnsupportedFeature",
        }
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionWarning::UnsupportedModifier { context, modifier } => {
                write!(f, "Unsupported modifier in {context}: {modifier}")
            }
            ConversionWarning::UnsupportedFeature { feature } => {
                write!(f, "Unsupported feature: {feature}")
            }
        }
    }
}

/// Records warnings in order and produces the marker comment for each one.
///
/// Markers land in `pending` until the converter moves them into the
/// statement handler on top of its stack.
#[derive(Debug)]
pub(crate) struct WarningManager {
    style: WarningStyle,
    warnings: Vec<ConversionWarning>,
    pending: Vec<String>,
}

impl WarningManager {
    pub(crate) fn new(style: WarningStyle) -> Self {
        Self {
            style,
            warnings: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, warning: ConversionWarning) {
        let marker = self.add_detached(warning);
        self.pending.push(marker);
    }

    /// Records `warning` and returns its marker comment for the caller to
    /// place itself.
    pub(crate) fn add_detached(&mut self, warning: ConversionWarning) -> String {
        tracing::debug!(
            target: "stride.convert",
            kind = warning.identifier(),
            detail = %warning,
            "conversion warning"
        );
        let marker = match self.style {
            WarningStyle::Identifier => format!("// WARNING:{}", warning.identifier()),
            WarningStyle::Message => format!("// {warning}"),
        };
        self.warnings.push(warning);
        marker
    }

    pub(crate) fn take_pending(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn into_warnings(self) -> Vec<ConversionWarning> {
        self.warnings
    }
}
